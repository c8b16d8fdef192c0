use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fixture_exporter::config::ExporterConfig;
use fixture_exporter::error::log_export_error;
use fixture_exporter::extractors;
use fixture_exporter::fixtures::FixtureSet;
use fixture_exporter::{EmbeddedSource, FixtureExporter, JsonFileSource, RecordSource};

#[derive(Parser, Debug)]
#[command(
    name = "generate_fixtures",
    about = "Export extractor test cases, minus skipped ones, to a JSON fixture file"
)]
struct Cli {
    /// Configuration file (defaults to ./fixture_exporter.json when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Destination file (defaults to testdata/tests.json in the crate)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Embedded extractor table to export
    #[arg(long, conflicts_with = "input")]
    extractor: Option<String>,
    /// Read test cases from a JSON array on disk instead of an embedded table
    #[arg(long)]
    input: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the runnable fixtures of an exported document
    DumpFixtures {
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List embedded extractor tables
    ListExtractors,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = cli
        .config
        .map(ExporterConfig::load_from_file)
        .unwrap_or_else(ExporterConfig::load);

    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(extractor) = cli.extractor {
        config.source.extractor = extractor;
        config.source.input = None;
    }
    if let Some(input) = cli.input {
        config.source.input = Some(input);
    }

    match cli.command {
        None => run_export(&config),
        Some(Commands::DumpFixtures { path }) => {
            run_dump(path.unwrap_or_else(|| config.output.path.clone()))
        }
        Some(Commands::ListExtractors) => run_list(),
    }
}

fn run_export(config: &ExporterConfig) -> Result<ExitCode> {
    let source: Box<dyn RecordSource> = match &config.source.input {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(EmbeddedSource::new(&config.source.extractor)),
    };

    let records = source
        .load()
        .inspect_err(|err| log_export_error(err, "load"))
        .with_context(|| format!("loading test cases from {}", source.describe()))?;

    let exporter = FixtureExporter::from_config(&config.output);
    let summary = exporter
        .export(records.iter(), &config.output.path)
        .inspect_err(|err| log_export_error(err, "export"))
        .with_context(|| format!("exporting to {}", config.output.path.display()))?;

    println!(
        "Exported {} of {} test cases ({} skipped) to {}",
        summary.exported,
        summary.total,
        summary.skipped,
        summary.destination.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_dump(path: PathBuf) -> Result<ExitCode> {
    let set = FixtureSet::load(&path)
        .with_context(|| format!("reading fixtures from {}", path.display()))?;

    let mut listed = 0usize;
    for fixture in set.runnable() {
        listed += 1;
        match &fixture.note {
            Some(note) => println!("{} -> {} ({})", fixture.info_dict.id, fixture.url, note),
            None => println!("{} -> {}", fixture.info_dict.id, fixture.url),
        }
    }
    if listed == 0 {
        println!("No runnable fixtures in {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn run_list() -> Result<ExitCode> {
    for name in extractors::names() {
        let count = extractors::test_cases(name).map_or(0, <[_]>::len);
        println!("{name} ({count} test cases)");
    }
    Ok(ExitCode::SUCCESS)
}
