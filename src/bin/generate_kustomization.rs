//! generate-kustomization CLI
//!
//! Writes manifests/base/kustomization.yaml by default,
//! `--check` verifies the committed file, `--stdout` prints instead.
//! Returns 1 on mismatch or failure, 2 on usage errors.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use kustomization_gen::{run, Catalog, Mode, DEFAULT_OUTPUT_FILE};

#[derive(Parser)]
#[command(name = "generate-kustomization")]
#[command(version, about = "Generate kustomization.yaml for manifests/base/")]
struct Cli {
    /// Verify the existing kustomization.yaml matches generated output
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print to stdout instead of writing to file
    #[arg(long)]
    stdout: bool,

    /// Path of the kustomization.yaml to write or check (relative paths
    /// resolve against the working directory, normally the repository root)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else if self.stdout {
            Mode::Stdout
        } else {
            Mode::Write
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .without_time()
        .init();

    let (mut out, mut err) = (io::stdout().lock(), io::stderr().lock());
    match run(cli.mode(), &Catalog::builtin(), &cli.output, &mut out, &mut err) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
