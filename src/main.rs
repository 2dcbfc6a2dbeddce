//! sw2abc - convert SongWright (SW) transcriptions to ABC notation
//!
//! Each input `<name>.sw` is written to `<output-dir>/<name>.abc`.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use sw2abc::{Config, Diagnostic, DiagnosticLevel};

#[derive(Parser)]
#[command(name = "sw2abc")]
#[command(about = "Convert SongWright (SW) files to ABC notation")]
#[command(version)]
struct Cli {
    /// SW files to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the .abc files (overrides the configuration)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also copy the converted text to the clipboard
    #[arg(long, conflicts_with = "no_copy")]
    copy: bool,

    /// Do not copy to the clipboard, even if the configuration says so
    #[arg(long)]
    no_copy: bool,

    /// Print the ABC to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Log per-system progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.copy {
        config.copy = true;
    }
    if cli.no_copy {
        config.copy = false;
    }

    for input in &cli.inputs {
        if let Err(e) = convert_one(input, &config, cli.stdout) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn convert_one(input: &Path, config: &Config, to_stdout: bool) -> Result<(), sw2abc::SwError> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    eprintln!("Converting SW file: {}", stem);

    let conversion = sw2abc::convert_file(input, config)?;
    for diagnostic in &conversion.diagnostics {
        report(input, diagnostic);
    }

    if to_stdout {
        println!("{}", conversion.abc);
    } else {
        let path = sw2abc::output_path(input, config);
        sw2abc::write_output(&path, &conversion.abc)?;
        tracing::info!("Wrote ABC to {}", path.display());
    }

    if config.copy {
        sw2abc::copy_to_clipboard(&conversion.abc)?;
        tracing::info!("Copied ABC to the clipboard");
    }

    Ok(())
}

fn report(input: &Path, diagnostic: &Diagnostic) {
    let file = input.display();
    let line = diagnostic.line;
    let message = &diagnostic.message;
    match diagnostic.level {
        DiagnosticLevel::Error => tracing::error!(%file, line, "{}", message),
        DiagnosticLevel::Warning => tracing::warn!(%file, line, "{}", message),
        DiagnosticLevel::Info => tracing::info!(%file, line, "{}", message),
    }
}
