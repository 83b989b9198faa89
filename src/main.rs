use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{ArgAction, Parser, error::ErrorKind};
use midi2sif::prelude::*;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Converts a Standard MIDI File into a beatmap JSON array
#[derive(Parser, Debug)]
#[command(name = "midi2sif", version, about)]
struct Cli {
    /// MIDI file to read, stdin if omitted
    input: Option<PathBuf>,

    /// File to write the beatmap to, stdout if omitted
    output: Option<PathBuf>,

    /// Leave out long notes that are never released instead of failing
    #[arg(long)]
    lenient: bool,

    /// Tempo in force before the first tempo event
    #[arg(long, value_name = "BPM", value_parser = parse_bpm)]
    initial_bpm: Option<f64>,

    /// More logging, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> ConvertSettings {
        let mut settings = ConvertSettings::default();
        if let Some(bpm) = self.initial_bpm {
            settings = settings.with_initial_bpm(bpm);
        }
        if self.lenient {
            settings = settings.with_unterminated_long_notes(UnterminatedLongNotes::Drop);
        }
        settings
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot read input: {0}")]
    Input(#[source] io::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("cannot write: {0}")]
    Output(#[source] io::Error),
}

fn parse_bpm(value: &str) -> Result<f64, String> {
    let bpm: f64 = value.parse().map_err(|err| format!("{err}"))?;
    if bpm.is_finite() && bpm > 0. {
        Ok(bpm)
    } else {
        Err(String::from("tempo must be a positive number"))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>, CliError> {
    let mut bytes = Vec::new();
    let read = match path {
        Some(path) => File::open(path)
            .map_err(|source| CliError::Open {
                path: path.to_path_buf(),
                source,
            })?
            .read_to_end(&mut bytes),
        None => io::stdin().lock().read_to_end(&mut bytes),
    };
    read.map_err(CliError::Input)?;
    Ok(bytes)
}

fn fallback_notice(path: &Path, err: &io::Error) -> String {
    format!("{}: {err}. Writing to stdout...", path.display())
}

fn open_output(path: Option<&Path>) -> Box<dyn Write> {
    if let Some(path) = path {
        match File::create(path) {
            Ok(file) => return Box::new(BufWriter::new(file)),
            Err(err) => eprintln!("{}", fallback_notice(path, &err)),
        }
    }
    Box::new(io::stdout().lock())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let bytes = read_input(cli.input.as_deref())?;
    info!(bytes = bytes.len(), "read input");

    let beatmap = convert_with(&bytes, &cli.settings())?;
    info!(notes = beatmap.len(), "converted");

    let mut out = open_output(cli.output.as_deref());
    beatmap.write_json(&mut out).map_err(CliError::Output)?;
    out.flush().map_err(CliError::Output)
}

fn main() -> ExitCode {
    eprintln!("MIDI2SIF converter");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprint!("{}", err.render());
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(2),
            };
        }
    };
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
