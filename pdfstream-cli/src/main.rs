//! pdfstream CLI - Command-line tool for stream payload extraction
//!
//! This binary provides command-line interfaces for:
//! - extract: write the payload of a stream at an offset to a file or stdout
//! - inspect: report how a stream's end was found and its corrected length

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pdfstream_format::{ExtractOptions, ExtractedStream};
use pdfstream_io::StreamReader;
use serde_json::json;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdfstream")]
#[command(about = "Extract embedded stream payloads, recovering from wrong lengths")]
#[command(version)]
struct Cli {
    /// Log extraction steps to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a stream payload to a file or stdout
    ///
    /// Examples:
    ///   pdfstream extract doc.pdf --offset 1234 --length 500 -o page.bin
    ///   pdfstream extract doc.pdf --offset 1234 > page.bin
    Extract {
        /// Input document
        input: PathBuf,
        /// Offset of the first payload byte
        #[arg(long)]
        offset: u64,
        /// Declared payload length (0 = unknown, scan for endstream)
        #[arg(long, default_value = "0")]
        length: usize,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Show progress spinner while extracting
        #[arg(long)]
        progress: bool,
        #[command(flatten)]
        tuning: TuningArgs,
    },
    /// Report how a stream's end is determined without writing the payload
    ///
    /// Examples:
    ///   pdfstream inspect doc.pdf --offset 1234 --length 500
    ///   pdfstream inspect doc.pdf --offset 1234 --format json
    Inspect {
        /// Input document
        input: PathBuf,
        /// Offset of the first payload byte
        #[arg(long)]
        offset: u64,
        /// Declared payload length (0 = unknown, scan for endstream)
        #[arg(long, default_value = "0")]
        length: usize,
        /// Output format (table, json)
        #[arg(long, value_enum, default_value_t = InspectFormat::Table)]
        format: InspectFormat,
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
struct TuningArgs {
    /// TOML file with extraction options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Bytes read per step while scanning for endstream
    #[arg(long)]
    increment: Option<usize>,
    /// Maximum payload size in bytes
    #[arg(long)]
    max_len: Option<usize>,
    /// Strip line endings before endstream when recovering from a wrong length
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    trim_fallback_eol: Option<bool>,
    /// Abort extraction after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum InspectFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Extract {
            input,
            offset,
            length,
            output,
            progress,
            tuning,
        } => {
            handle_extract(input, offset, length, output, progress, &tuning)?;
        }
        Commands::Inspect {
            input,
            offset,
            length,
            format,
            tuning,
        } => {
            let mut stdout = std::io::stdout().lock();
            handle_inspect(&mut stdout, input, offset, length, format, &tuning)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "pdfstream_io=debug,pdfstream=debug",
        _ => "pdfstream_io=trace,pdfstream=trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    // A subscriber may already be installed when handlers run under tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_options(tuning: &TuningArgs) -> Result<ExtractOptions, Box<dyn Error>> {
    let mut opts = match tuning.config.as_deref() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            toml::from_str(&text)
                .map_err(|e| format!("invalid config {}: {}", path.display(), e))?
        }
        None => ExtractOptions::default(),
    };

    if let Some(increment) = tuning.increment {
        opts.increment = increment;
    }
    if let Some(max_len) = tuning.max_len {
        opts.limits.max_stream_len = max_len;
    }
    if let Some(trim) = tuning.trim_fallback_eol {
        opts.trim_fallback_eol = trim;
    }

    debug!(?opts, "resolved extraction options");
    Ok(opts)
}

fn run_extraction(
    input: &Path,
    offset: u64,
    length: usize,
    tuning: &TuningArgs,
) -> Result<(ExtractedStream, u64), Box<dyn Error>> {
    let opts = load_options(tuning)?;
    let file = File::open(input).map_err(|e| format!("cannot open {}: {}", input.display(), e))?;
    let mut reader = StreamReader::new(file, opts)?;
    if let Some(ms) = tuning.timeout_ms {
        reader = reader.with_timeout(Duration::from_millis(ms));
    }

    let file_size = reader.file_size();
    if offset > file_size {
        return Err(format!("offset {} is past the end of the file ({} bytes)", offset, file_size).into());
    }

    let stream = reader.extract_at(offset, length)?;
    Ok((stream, file_size))
}

fn handle_extract(
    input: PathBuf,
    offset: u64,
    length: usize,
    output: Option<PathBuf>,
    show_progress: bool,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let mut progress_bar = show_progress.then(|| create_spinner("Extracting stream"));
    let (stream, _) = run_extraction(&input, offset, length, tuning)?;
    let elapsed = start.elapsed();

    if let Some(pb) = progress_bar.take() {
        pb.finish_with_message(format!(
            "Extracted {} bytes ({}) in {:.2?}",
            stream.data.len(),
            stream.boundary.as_str(),
            elapsed
        ));
    }

    match output {
        Some(path) => {
            fs::write(&path, &stream.data)?;
            report_extract_summary(&stream, &path, elapsed)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&stream.data)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn report_extract_summary(
    stream: &ExtractedStream,
    output: &Path,
    elapsed: Duration,
) -> Result<(), Box<dyn Error>> {
    let mut stderr = std::io::stderr().lock();
    let mut message = format!(
        "Extracted to {} (bytes: {}, boundary: {}, elapsed: {:.2?}",
        output.display(),
        stream.data.len(),
        stream.boundary.as_str(),
        elapsed
    );
    if let Some(corrected) = stream.corrected_length() {
        message.push_str(&format!(
            ", declared length {} should be {}",
            stream.declared_len, corrected
        ));
    }
    message.push(')');
    writeln!(&mut stderr, "{}", message)?;
    Ok(())
}

fn handle_inspect(
    writer: &mut dyn Write,
    input: PathBuf,
    offset: u64,
    length: usize,
    format: InspectFormat,
    tuning: &TuningArgs,
) -> Result<(), Box<dyn Error>> {
    let (stream, file_size) = run_extraction(&input, offset, length, tuning)?;

    match format {
        InspectFormat::Table => print_inspect_table(writer, &stream, offset, file_size)?,
        InspectFormat::Json => print_inspect_json(writer, &stream, offset, file_size)?,
    }

    Ok(())
}

fn print_inspect_table(
    writer: &mut dyn Write,
    stream: &ExtractedStream,
    offset: u64,
    file_size: u64,
) -> Result<(), Box<dyn Error>> {
    writeln!(writer, "Offset\tDeclared\tExtracted\tBoundary\tCorrected")?;
    writeln!(
        writer,
        "{}\t{}\t{}\t{}\t{}",
        offset,
        stream.declared_len,
        stream.data.len(),
        stream.boundary.as_str(),
        stream
            .corrected_length()
            .map(|len| len.to_string())
            .unwrap_or_else(|| "-".to_string())
    )?;
    writeln!(writer, "File size: {} bytes", file_size)?;
    Ok(())
}

fn print_inspect_json(
    writer: &mut dyn Write,
    stream: &ExtractedStream,
    offset: u64,
    file_size: u64,
) -> Result<(), Box<dyn Error>> {
    let value = json!({
        "offset": offset,
        "file_size": file_size,
        "declared_length": stream.declared_len,
        "extracted_length": stream.data.len(),
        "boundary": stream.boundary.as_str(),
        "corrected_length": stream.corrected_length(),
    });
    serde_json::to_writer_pretty(&mut *writer, &value)?;
    writeln!(writer)?;
    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
