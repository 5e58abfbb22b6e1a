//! Generator entry point.
//!
//! `daedalus-codegen <INPUT> <OUTPUT>` scans the input source file for
//! annotated methods and writes the generated dispatch module to the output
//! path. The output is written only after the whole module has been emitted,
//! so a failed run leaves no partial file behind.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use daedalus_codegen::{emit, extract_methods};

#[derive(Parser)]
#[command(name = "daedalus-codegen")]
#[command(about = "Generate HTTP dispatch glue from annotated service methods")]
#[command(version)]
struct Args {
    /// Source file containing annotated service methods
    input: PathBuf,

    /// Destination for the generated dispatch module
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let file = syn::parse_file(&source)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let methods = extract_methods(&file);
    if methods.is_empty() {
        tracing::warn!(input = %args.input.display(), "no annotated methods found");
    }

    let generated = emit(&methods).context("emitting dispatch module")?;
    std::fs::write(&args.output, generated)
        .with_context(|| format!("writing {}", args.output.display()))?;

    tracing::info!(
        input = %args.input.display(),
        output = %args.output.display(),
        "generation complete"
    );
    Ok(())
}
