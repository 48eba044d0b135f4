mod config;
mod error;
mod invocation;
mod model;
mod output;
mod parser;
mod pdf;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::config::Settings;
use crate::error::ParseError;
use crate::invocation::{InvocationMode, Runner};
use crate::pdf::PdfTextService;

#[derive(Parser)]
#[command(
    name = "transcript_parser",
    about = "Extract completed, in-progress and exempted courses from a PDF transcript"
)]
struct Cli {
    /// PDF files to parse. Reads PDF bytes from stdin when omitted.
    pdfs: Vec<PathBuf>,
    /// Replace the curriculum id found in the document
    #[arg(long)]
    curriculum_id: Option<String>,
    /// Replace the course code found in the document
    #[arg(long)]
    course_code: Option<String>,
}

fn init_tracing(default_level: &str) {
    // stdout carries the JSON result in streamed mode
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .with_ansi(colour_output(&io::stderr()))
        .try_init();
}

/// Colour only when stderr is a terminal and `NO_COLOR` is unset.
fn colour_output(stream: &impl IsTerminal) -> bool {
    stream.is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Unexpected error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_level);

    match run(cli, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ParseError>() {
                Some(ParseError::EmptyInput) => eprintln!("{e}"),
                _ => eprintln!("Unexpected error: {e}\n{e:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    let t0 = Instant::now();
    let overrides = settings.overrides(cli.curriculum_id, cli.course_code);
    let service = PdfTextService;
    let runner = Runner::new(&service, overrides, settings.output_dir);

    match InvocationMode::from_args(cli.pdfs) {
        InvocationMode::StreamedBytes => {
            let stdin = io::stdin().lock();
            runner.quiet_stdout(true).run_streamed(stdin, io::stdout())?;
        }
        InvocationMode::PathInput(paths) => {
            let written = runner.run_paths(&paths)?;
            tracing::info!(
                documents = written.len(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "done"
            );
        }
    }
    Ok(())
}
