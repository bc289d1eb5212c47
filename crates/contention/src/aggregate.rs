use counter_log::{CounterLog, CounterSeries};

/// Arithmetic mean of `values`, or 0.0 for an empty series.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `numerator / denominator`, or exactly 1.0 ("no change") unless the
/// denominator is strictly positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

/// Averaged counters for one VM under one condition
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AggregatedMetrics {
    /// Mean LLC occupancy in KB
    pub avg_llc_kb: f64,
    /// Mean LLC misses per second
    pub avg_misses: f64,
    /// Mean instructions per cycle
    pub avg_ipc: f64,
}

impl AggregatedMetrics {
    pub fn new(avg_llc_kb: f64, avg_misses: f64, avg_ipc: f64) -> Self {
        Self {
            avg_llc_kb,
            avg_misses,
            avg_ipc,
        }
    }

    /// Average each series independently
    pub fn from_series(series: &CounterSeries) -> Self {
        Self {
            avg_llc_kb: mean(series.llc_kb.iter().map(|&kb| kb as f64)),
            avg_misses: mean(series.misses_per_sec.iter().copied()),
            avg_ipc: mean(series.ipc.iter().copied()),
        }
    }

    pub fn from_log(log: &CounterLog) -> Self {
        Self::from_series(&log.series)
    }
}

/// Contention-over-baseline ratios for one VM.
///
/// LLC and IPC below 1.0 mean the VM lost cache or throughput; misses above
/// 1.0 mean it missed more often.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioTriple {
    pub llc: f64,
    pub misses: f64,
    pub ipc: f64,
}

impl RatioTriple {
    pub fn new(llc: f64, misses: f64, ipc: f64) -> Self {
        Self { llc, misses, ipc }
    }

    pub fn between(baseline: &AggregatedMetrics, contention: &AggregatedMetrics) -> Self {
        Self {
            llc: ratio(contention.avg_llc_kb, baseline.avg_llc_kb),
            misses: ratio(contention.avg_misses, baseline.avg_misses),
            ipc: ratio(contention.avg_ipc, baseline.avg_ipc),
        }
    }
}
