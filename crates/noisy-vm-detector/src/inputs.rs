use std::path::{Path, PathBuf};

use anyhow::Result;
use contention::{AggregatedMetrics, VmProfile};
use counter_log::CounterLog;
use log::{debug, warn};

pub const VM1_BASELINE: &str = "VM1_baseline.txt";
pub const VM1_CONTENTION: &str = "VM1_contention.txt";
pub const VM2_BASELINE: &str = "VM2_baseline.txt";
pub const VM2_CONTENTION: &str = "VM2_contention.txt";

/// Locations of the four counter logs for a run
#[derive(Debug, Clone, PartialEq)]
pub struct InputFiles {
    pub vm1_baseline: PathBuf,
    pub vm1_contention: PathBuf,
    pub vm2_baseline: PathBuf,
    pub vm2_contention: PathBuf,
}

impl InputFiles {
    pub fn in_dir(
        dir: &Path,
        vm1_baseline: &str,
        vm1_contention: &str,
        vm2_baseline: &str,
        vm2_contention: &str,
    ) -> Self {
        Self {
            vm1_baseline: dir.join(vm1_baseline),
            vm1_contention: dir.join(vm1_contention),
            vm2_baseline: dir.join(vm2_baseline),
            vm2_contention: dir.join(vm2_contention),
        }
    }
}

/// Parse one log, warning when it held no usable samples
pub fn load_log(path: &Path) -> Result<CounterLog> {
    let parsed = CounterLog::from_file(path)?;
    check_quality(path, &parsed);
    Ok(parsed)
}

fn check_quality(path: &Path, parsed: &CounterLog) {
    debug!(
        "{}: {} samples, {} headers, {} ignored, {} malformed",
        path.display(),
        parsed.stats.data_rows,
        parsed.stats.headers,
        parsed.stats.ignored,
        parsed.stats.malformed
    );
    if parsed.is_empty() {
        warn!("no valid data in {}", path.display());
    }
}

/// Load and average the baseline and contention logs for one VM
pub fn load_profile(id: String, baseline: &Path, contention: &Path) -> Result<VmProfile> {
    let baseline = AggregatedMetrics::from_log(&load_log(baseline)?);
    let contention = AggregatedMetrics::from_log(&load_log(contention)?);
    Ok(VmProfile::new(id, baseline, contention))
}
