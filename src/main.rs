//! doclift - Static documentation page enhancer

use std::process::ExitCode;

use clap::Parser;

use doclift::{Engine, EnhanceOptions, EnhanceReport, Page, enhance_file};

#[derive(Parser)]
#[command(name = "doclift")]
#[command(version, about = "Static documentation page enhancer", long_about = None)]
#[command(after_help = "EXAMPLES:
    doclift docs.html out.html           Enhance a page
    doclift docs.html out.html --engine naive
                                         Use the legacy regex highlighter
    doclift docs.html --check            Report dead anchor links
    doclift docs.html --check --json     Same, as JSON")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output HTML file
    #[arg(value_name = "OUTPUT", required_unless_present = "check")]
    output: Option<String>,

    /// Highlighting engine (spans or naive)
    #[arg(long, default_value_t = Engine::Spans)]
    engine: Engine,

    /// Report enhancement results without requiring an output file;
    /// exits nonzero when any anchor fragment is unresolved
    #[arg(long)]
    check: bool,

    /// Emit the report as JSON
    #[arg(long, requires = "check")]
    json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = EnhanceOptions::default().with_engine(cli.engine);

    let result = match cli.output {
        Some(ref output) => enhance_file(&cli.input, output, &options),
        None => check_only(&cli.input, &options),
    };

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        if cli.json {
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            print_report(&cli.input, &report);
        }
        if !report.unresolved_anchors.is_empty() {
            return ExitCode::FAILURE;
        }
    } else if !cli.quiet {
        println!(
            "{}: {} anchors, {} code blocks, {} sections",
            cli.input, report.anchors_bound, report.code_blocks, report.sections
        );
    }

    ExitCode::SUCCESS
}

fn check_only(input: &str, options: &EnhanceOptions) -> doclift::Result<EnhanceReport> {
    let bytes = std::fs::read(input)?;
    let html = String::from_utf8(bytes)?;
    let mut page = Page::parse(&html);
    page.enhance(options)
}

fn print_report(input: &str, report: &EnhanceReport) {
    println!("File: {input}");
    println!("Anchors bound: {}", report.anchors_bound);
    println!("Code blocks: {}", report.code_blocks);
    println!("Sections: {}", report.sections);
    if report.unresolved_anchors.is_empty() {
        println!("All anchor fragments resolve");
    } else {
        println!("Unresolved fragments:");
        for fragment in &report.unresolved_anchors {
            println!("  #{fragment}");
        }
    }
}
