//! Body text font resolution.

use std::cmp::Ordering;

use crate::model::FontProperty;

use super::stats::FontStatistics;

/// The font property judged to be ordinary paragraph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyFont {
    /// The prevailing body text property
    pub property: FontProperty,
    /// Largest size key in the floored statistics
    pub max_size_key: i32,
}

impl BodyFont {
    /// Largest font size in the document, in points.
    pub fn max_size(&self) -> f32 {
        self.max_size_key as f32 / 100.0
    }
}

/// Pick the body font from floored statistics.
///
/// The single largest size is excluded from consideration unless it is the
/// only size present. Among the rest, the most frequent property wins; ties
/// prefer the smaller size, then non-bold, then first-seen order.
///
/// Returns `None` when `stats` is empty.
pub fn resolve_body_font(stats: &FontStatistics) -> Option<BodyFont> {
    let max_size_key = stats.max_size_key()?;

    let has_smaller = stats.iter().any(|(p, _)| p.size_key() < max_size_key);
    let candidates = stats
        .iter()
        .filter(|(p, _)| !has_smaller || p.size_key() < max_size_key);

    let mut best: Option<(FontProperty, usize)> = None;
    for (property, count) in candidates {
        match best {
            Some((current, current_count))
                if compare_body_candidates((property, count), (current, current_count))
                    != Ordering::Greater => {}
            _ => best = Some((property, count)),
        }
    }

    best.map(|(property, _)| BodyFont {
        property,
        max_size_key,
    })
}

/// `Greater` means `a` is the better body candidate.
fn compare_body_candidates(a: (FontProperty, usize), b: (FontProperty, usize)) -> Ordering {
    a.1.cmp(&b.1)
        .then_with(|| b.0.size_key().cmp(&a.0.size_key()))
        .then_with(|| b.0.is_bold().cmp(&a.0.is_bold()))
}
