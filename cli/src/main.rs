//! pdfsift CLI - report PDF to structured JSON

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::render::{write_json_file, JsonFormat};
use pdfsift::PdfParser;

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(version)]
#[command(about = "Extract structured JSON content from report PDFs", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, value_name = "FILE", default_value = "output.json")]
    output: PathBuf,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&cli) {
        // Status lines go to stdout, the error line included.
        println!("{} {}", "Error parsing PDF:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Opening PDF...");
    let parser = PdfParser::open(&cli.input)?;
    pb.inc(1);

    pb.set_message("Extracting content...");
    let document = parser.parse()?;
    pb.inc(1);

    pb.set_message("Writing JSON...");
    write_json_file(&cli.output, &document, JsonFormat::Pretty)?;
    pb.inc(1);

    pb.finish_and_clear();

    println!(
        "{} {}",
        "Successfully parsed".green().bold(),
        cli.input.display()
    );
    println!("{} {}", "Output saved to".green(), cli.output.display());

    Ok(())
}
