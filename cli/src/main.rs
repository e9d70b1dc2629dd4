//! unoutline CLI - PDF heading outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unoutline::batch::{pdf_files, process_directory_with_progress};
use unoutline::{analyze_file, detect_format_from_path, try_extract_outline, BatchOptions, JsonFormat};

#[derive(Parser)]
#[command(name = "unoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer H1-H3 outlines from PDF typography", long_about = None)]
struct Cli {
    /// Directory of PDF files
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Directory for the JSON outlines
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an outline for every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process files in parallel
        #[arg(long)]
        parallel: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the outline of a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the font statistics behind an outline
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            parallel,
            compact,
        }) => cmd_batch(&input, &output, parallel, compact),
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact),
        Some(Commands::Inspect { input }) => cmd_inspect(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_batch(&input, &output, cli.parallel, cli.compact),
            _ => {
                println!("{}", "Usage: unoutline <INPUT_DIR> <OUTPUT_DIR>".yellow());
                println!("       unoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    parallel: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("input directory not found: {}", input.display()).into());
    }

    let total = pdf_files(input)?.len() as u64;
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let options = BatchOptions::new(output)
        .with_parallel(parallel)
        .with_format(json_format(compact));

    let report = process_directory_with_progress(input, &options, |path, _ok| {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} file(s) -> {}",
        "Processed".green().bold(),
        report.processed.len(),
        report.total(),
        output.display()
    );
    for (path, reason) in &report.failed {
        println!("  {} {}: {}", "✗".red(), path.display(), reason.dimmed());
    }

    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = try_extract_outline(input)?;
    let json = unoutline::render::to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    let analysis = analyze_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Spans".bold(), analysis.statistics.total());

    println!();
    println!("{}", "Font Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (property, count) in analysis.statistics.iter() {
        let level = analysis
            .levels
            .get(&property)
            .map(|l| l.as_str())
            .unwrap_or("");
        println!("  {:<20} {:>8}  {}", property.to_string(), count, level.green());
    }

    println!();
    match analysis.body_font() {
        Ok(body) => {
            println!("{}: {}", "Body font".bold(), body.property);
            println!("{}: {:.2}pt", "Largest size".bold(), body.max_size());
        }
        Err(e) => println!("{}: {}", "Body font".bold(), e.to_string().yellow()),
    }

    println!();
    println!("{}", "Heading Levels".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    if analysis.levels.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (property, level) in analysis.levels.iter() {
        println!("  {} {}", level.to_string().bold(), property);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline inference tool");
    println!();
    println!("License: MIT");
}
