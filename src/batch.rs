//! Directory batch processing.
//!
//! Every `.pdf` file in an input directory gets a `<stem>.json` outline in
//! the output directory. Files are independent: one bad document never
//! stops the rest.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::outline::{OutlineBuilder, OutlineConfig};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory receiving the `.json` outlines
    pub output_dir: PathBuf,
    /// Process files on the rayon thread pool
    pub parallel: bool,
    /// JSON layout of each output file
    pub format: JsonFormat,
    /// Heading inference thresholds
    pub config: OutlineConfig,
}

impl BatchOptions {
    /// Create options writing pretty JSON to `output_dir`, sequentially.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            parallel: false,
            format: JsonFormat::Pretty,
            config: OutlineConfig::default(),
        }
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the JSON layout.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the heading inference thresholds.
    pub fn with_config(mut self, config: OutlineConfig) -> Self {
        self.config = config;
        self
    }

    /// Output path for an input file: `<output_dir>/<stem>.json`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or_default().to_os_string();
        name.push(".json");
        self.output_dir.join(name)
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Inputs whose outline file was written
    pub processed: Vec<PathBuf>,
    /// Inputs that could not be written, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.processed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List the PDF files of a directory, sorted by path.
pub fn pdf_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Process one input file and write its outline.
///
/// A document that cannot be opened still yields an empty outline file;
/// only a render or write failure is an error.
pub fn process_file(input: &Path, options: &BatchOptions) -> Result<PathBuf> {
    let builder = OutlineBuilder::with_config(options.config.clone());
    let outline = crate::extract_outline_with(input, &builder);
    let json = to_json(&outline, options.format)?;

    let output = options.output_path(input);
    fs::write(&output, json)?;
    log::debug!(
        "{} -> {} ({} headings)",
        input.display(),
        output.display(),
        outline.len()
    );
    Ok(output)
}

/// Process every PDF in `input_dir`.
///
/// Fails only when the input directory cannot be read or the output
/// directory cannot be created.
pub fn process_directory(input_dir: &Path, options: &BatchOptions) -> Result<BatchReport> {
    process_directory_with_progress(input_dir, options, |_, _| {})
}

/// Like [`process_directory`], calling `progress` after each file with
/// whether it succeeded.
pub fn process_directory_with_progress<F>(
    input_dir: &Path,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchReport>
where
    F: Fn(&Path, bool) + Sync,
{
    if !input_dir.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input directory not found: {}", input_dir.display()),
        )));
    }
    let files = pdf_files(input_dir)?;
    fs::create_dir_all(&options.output_dir)?;

    log::info!(
        "Processing {} PDF file(s) from {}",
        files.len(),
        input_dir.display()
    );

    let run = |input: &PathBuf| {
        let result = process_file(input, options);
        if let Err(ref e) = result {
            log::warn!("Failed to process {}: {}", input.display(), e);
        }
        progress(input, result.is_ok());
        (input.clone(), result)
    };

    let results: Vec<(PathBuf, Result<PathBuf>)> = if options.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let mut report = BatchReport::default();
    for (input, result) in results {
        match result {
            Ok(_) => report.processed.push(input),
            Err(e) => report.failed.push((input, e.to_string())),
        }
    }
    Ok(report)
}
