use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use contention::classify;
use log::debug;

mod inputs;
mod prompt;
mod report;

use inputs::{InputFiles, VM1_BASELINE, VM1_CONTENTION, VM2_BASELINE, VM2_CONTENTION};
use report::Report;

/// Identify which of two co-located VMs is monopolizing the shared LLC
#[derive(Debug, Parser)]
#[command(name = "noisy-vm-detector")]
struct Cli {
    /// Total LLC size in KB (prompted for if omitted)
    #[arg(short, long)]
    total_llc_kb: Option<f64>,

    /// VM1 identifier (prompted for if omitted)
    #[arg(long)]
    vm1: Option<String>,

    /// VM2 identifier (prompted for if omitted)
    #[arg(long)]
    vm2: Option<String>,

    /// Directory containing the counter logs
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// VM1 log recorded while running alone
    #[arg(long, default_value = VM1_BASELINE)]
    vm1_baseline: String,

    /// VM1 log recorded alongside VM2
    #[arg(long, default_value = VM1_CONTENTION)]
    vm1_contention: String,

    /// VM2 log recorded while running alone
    #[arg(long, default_value = VM2_BASELINE)]
    vm2_baseline: String,

    /// VM2 log recorded alongside VM1
    #[arg(long, default_value = VM2_CONTENTION)]
    vm2_contention: String,

    /// Verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    println!();
    let operator = prompt::resolve(
        cli.total_llc_kb,
        cli.vm1.clone(),
        cli.vm2.clone(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )?;
    println!();

    let files = InputFiles::in_dir(
        &cli.dir,
        &cli.vm1_baseline,
        &cli.vm1_contention,
        &cli.vm2_baseline,
        &cli.vm2_contention,
    );
    debug!("Input files: {:?}", files);

    let vm1 = inputs::load_profile(operator.vm1_id, &files.vm1_baseline, &files.vm1_contention)?;
    let vm2 = inputs::load_profile(operator.vm2_id, &files.vm2_baseline, &files.vm2_contention)?;

    let assessment = classify(&vm1, &vm2, operator.total_llc_kb);
    for finding in &assessment.findings {
        debug!(
            "{:?} as suspect: {:?} degraded={} suspect flat={} over fair share={}",
            finding.suspect,
            finding.suspect.peer(),
            finding.peer_degraded,
            finding.suspect_flat,
            finding.over_fair_share
        );
    }

    print!("{}", Report::new(&vm1, &vm2, &assessment));

    Ok(())
}
