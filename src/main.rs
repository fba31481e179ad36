//! redline - apply accepted edits to DOCX documents

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use redline::request::{ExportRequest, ProcessRequest, handle_export, handle_process, health};
use redline::{
    EditCandidate, PdfConfig, WriteConfig, document_text, export_pdf_with_config,
    process_with_config,
};

#[derive(Parser)]
#[command(name = "redline")]
#[command(version, about = "Apply accepted edits to DOCX documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    redline apply cv.docx --edits edits.json --accept 0,2 -o cv-new.docx
    redline text cv.docx
    redline pdf cv.docx -o cv.pdf
    redline process < request.json > response.json")]
struct Cli {
    /// Log more detail to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply accepted edits from a JSON candidate list
    Apply {
        /// Input DOCX file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// JSON file holding an array of edit candidates
        #[arg(short, long, value_name = "JSON")]
        edits: PathBuf,

        /// Accepted candidate indices, in application order (default: all)
        #[arg(short, long, value_delimiter = ',', value_name = "INDICES")]
        accept: Option<Vec<usize>>,

        /// Output DOCX file
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Deflate level for rewritten entries (0-9)
        #[arg(long, value_name = "LEVEL")]
        compression_level: Option<u32>,

        /// Print the per-edit outcome report as JSON
        #[arg(long)]
        report: bool,
    },
    /// Print the text of every paragraph
    Text {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
    /// Write the placeholder PDF page for a document
    Pdf {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Read a JSON process request on stdin, write the response on stdout
    Process,
    /// Read a JSON export request on stdin, write the response on stdout
    Export,
    /// Print service status as JSON
    Health,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Apply {
            input,
            edits,
            accept,
            output,
            compression_level,
            report,
        } => apply(input, edits, accept, output, compression_level, report),
        Command::Text { input } => text(input),
        Command::Pdf { input, output } => pdf(input, output),
        Command::Process => process(),
        Command::Export => export(),
        Command::Health => print_json(&health()).map(|_| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn apply(
    input: PathBuf,
    edits: PathBuf,
    accept: Option<Vec<usize>>,
    output: PathBuf,
    compression_level: Option<u32>,
    report: bool,
) -> redline::Result<bool> {
    let original = std::fs::read(&input)?;
    let candidates: Vec<EditCandidate> = serde_json::from_slice(&std::fs::read(&edits)?)?;
    let accepted = accept.unwrap_or_else(|| (0..candidates.len()).collect());

    let config = WriteConfig { compression_level };
    let (bytes, outcomes) = process_with_config(&original, &accepted, &candidates, &config)?;
    std::fs::write(&output, bytes)?;

    if report {
        print_json(&outcomes)?;
    } else {
        eprintln!(
            "{}: applied {} of {} accepted edits",
            output.display(),
            outcomes.applied_count(),
            accepted.len()
        );
    }
    Ok(true)
}

fn text(input: PathBuf) -> redline::Result<bool> {
    let bytes = std::fs::read(&input)?;
    let text = document_text(&bytes)?;
    io::stdout().write_all(text.as_bytes())?;
    Ok(true)
}

fn pdf(input: PathBuf, output: PathBuf) -> redline::Result<bool> {
    let bytes = std::fs::read(&input)?;
    let pdf = export_pdf_with_config(&bytes, &PdfConfig::default())?;
    std::fs::write(&output, pdf)?;
    Ok(true)
}

fn process() -> redline::Result<bool> {
    let request: ProcessRequest = serde_json::from_str(&read_stdin()?)?;
    let response = handle_process(&request);
    print_json(&response)?;
    Ok(response.success)
}

fn export() -> redline::Result<bool> {
    let request: ExportRequest = serde_json::from_str(&read_stdin()?)?;
    let response = handle_export(&request);
    print_json(&response)?;
    Ok(response.success)
}

fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn print_json<T: serde::Serialize>(value: &T) -> redline::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
