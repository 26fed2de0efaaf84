use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, span, Level};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use pairalign::batch::{align_batch, plan_jobs, PairAlignment};
use pairalign::io::read_sequences;
use pairalign::{AlignerConfig, Alphabet, GapCosts};

mod cli;

use cli::{AlignArgs, AlphabetKind, CliArgs, CliSubcommand, OutputType};

/// Log to stderr. `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(filter_layer);

    Registry::default().with(stderr_log).init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match &args.command {
        Some(CliSubcommand::Align(v)) => align_subcommand(v)?,
        None => return Err(anyhow!("No subcommand given. Try --help.")),
    };

    Ok(())
}

/// Load the configuration file, if any, and apply command line overrides.
fn build_config(align_args: &AlignArgs) -> Result<AlignerConfig> {
    let mut config = match &align_args.config {
        Some(path) => AlignerConfig::from_json_file(path)
            .with_context(|| format!("Could not load aligner configuration from {}", path.display()))?,
        None => AlignerConfig::default(),
    };

    if let Some(span) = align_args.alignment_span {
        config.alignment_type = span.into();
    }

    if align_args.off_diagonal.is_some() {
        config.off_diagonal = align_args.off_diagonal;
    }

    if let Some(cost) = align_args.cost_match {
        config.costs.match_cost = cost;
    }

    if let Some(cost) = align_args.cost_mismatch {
        config.costs.mismatch_cost = cost;
    }

    let (open, extend) = (align_args.cost_gap_open, align_args.cost_gap_extend);
    config.costs.gaps = match config.costs.gaps {
        GapCosts::Linear { gap } if align_args.linear => GapCosts::Linear { gap: open.or(extend).unwrap_or(gap) },
        GapCosts::Affine { elongate, .. } if align_args.linear => GapCosts::Linear { gap: open.or(extend).unwrap_or(elongate) },
        GapCosts::Linear { gap } if open.is_some() || extend.is_some() => GapCosts::Affine {
            open: open.unwrap_or(gap),
            elongate: extend.unwrap_or(gap),
        },
        GapCosts::Linear { gap } => GapCosts::Linear { gap },
        GapCosts::Affine { open: cfg_open, elongate } => GapCosts::Affine {
            open: open.unwrap_or(cfg_open),
            elongate: extend.unwrap_or(elongate),
        },
    };

    Ok(config)
}

fn align_subcommand(align_args: &AlignArgs) -> Result<()> {
    let span = span!(Level::INFO, "align_subcommand");
    let _enter = span.enter();

    let config = build_config(align_args)?;
    info!(
        "Alignment type: {:?}, costs: {:?}, off-diagonals: {:?}",
        config.alignment_type, config.costs, config.off_diagonal
    );

    let alphabet = match align_args.alphabet {
        AlphabetKind::Dna => Alphabet::dna(),
        AlphabetKind::Protein => Alphabet::protein(),
    };

    let sequences = read_sequences(&align_args.sequences, Arc::new(alphabet))
        .with_context(|| format!("Could not read sequences from {}", align_args.sequences.display()))?;

    if sequences.len() < 2 {
        return Err(anyhow!("Need at least two sequences to align, found {}.", sequences.len()));
    }

    let jobs = plan_jobs(sequences.len(), align_args.pairs.into());
    let results = align_batch(&config, &sequences, &jobs, align_args.threads)?;

    let mut writer: Box<dyn Write> = match &align_args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    for pair in &results {
        match align_args.output_type {
            OutputType::Text => write_text(&mut writer, pair)?,
            OutputType::Json => {
                serde_json::to_writer(&mut writer, pair)?;
                writeln!(writer)?;
            },
        }
    }

    writer.flush()?;
    info!("Done.");

    Ok(())
}

fn write_text<W: Write + ?Sized>(writer: &mut W, pair: &PairAlignment) -> Result<()> {
    let result = &pair.result;
    let (span1, span2) = (result.seq1_span(), result.seq2_span());

    writeln!(
        writer,
        "# {} vs {}\tcost={}\tmatches={}/{}\tspan1={}..{}\tspan2={}..{}",
        pair.name1, pair.name2,
        result.cost(), result.matches(), result.len(),
        span1.start, span1.end,
        span2.start, span2.end,
    )?;
    writeln!(writer, "{result}")?;
    writeln!(writer)?;

    Ok(())
}
