//! Command line converter: KiCad board file to DXF R12.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pcb2dxf::pcb::{convert_file, output_path_for, ConverterConfiguration};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "kicadpcb2dxf", version, about = "kicadpcb2dxf converter")]
struct Args {
    /// .kicad_pcb file name
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write HEADER and TABLES sections ahead of the entities
    #[arg(long)]
    fixed_tables: bool,

    /// Keep dimension text on its board layer instead of the "Quote" layer
    #[arg(long)]
    no_quote_layer: bool,

    /// Text style name written on TEXT entities
    #[arg(long, default_value = "SIMPLEX")]
    text_style: String,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    let Some(input) = args.file.as_ref() else {
        println!("...\n   launch:\n          kicadpcb2dxf -f pcbfile_name.kicad_pcb");
        println!("version {}", pcb2dxf::VERSION);
        return ExitCode::SUCCESS;
    };

    match run(input, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "conversion failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &Path, args: &Args) -> anyhow::Result<()> {
    let input = std::path::absolute(input)
        .with_context(|| format!("cannot resolve {}", input.display()))?;
    let output = output_path_for(&input);
    println!("reading from {}", input.display());
    println!("writing to {}", output.display());

    let config = ConverterConfiguration {
        fixed_tables: args.fixed_tables,
        quote_layer: !args.no_quote_layer,
        text_style: args.text_style.clone(),
        ..ConverterConfiguration::default()
    };
    let summary = convert_file(&input, &output, &config)
        .with_context(|| format!("converting {}", input.display()))?;
    if summary.unterminated_text {
        tracing::warn!("input ended inside a text block; that text was not written");
    }
    println!("--> {} written", output.display());
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // already initialized
    }
}
