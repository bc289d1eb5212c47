use crate::aggregate::{AggregatedMetrics, RatioTriple};

/// LLC ratio at or below this is a noticeable drop
pub const LLC_DROP_THRESH: f64 = 0.95;
/// Miss ratio at or above this is a noticeable rise
pub const MISS_RISE_THRESH: f64 = 1.05;
/// IPC ratio at or below this is a noticeable drop
pub const IPC_DROP_THRESH: f64 = 0.95;
/// Inclusive lower bound of the "no change" band
pub const FLAT_LOW: f64 = 0.95;
/// Inclusive upper bound of the "no change" band
pub const FLAT_HIGH: f64 = 1.05;

impl RatioTriple {
    /// Lost cache, missed more and slowed down, all at once.
    pub fn is_degraded(&self) -> bool {
        self.llc <= LLC_DROP_THRESH
            && self.misses >= MISS_RISE_THRESH
            && self.ipc <= IPC_DROP_THRESH
    }

    /// Every ratio within the inclusive ±5% band around 1.0.
    pub fn is_flat(&self) -> bool {
        let in_band = |r: f64| (FLAT_LOW..=FLAT_HIGH).contains(&r);
        in_band(self.llc) && in_band(self.misses) && in_band(self.ipc)
    }
}

/// Which of the two monitored VMs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmSlot {
    Vm1,
    Vm2,
}

impl VmSlot {
    pub fn peer(self) -> Self {
        match self {
            VmSlot::Vm1 => VmSlot::Vm2,
            VmSlot::Vm2 => VmSlot::Vm1,
        }
    }
}

/// Outcome of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    None,
    Noisy(VmSlot),
}

/// A VM's operator-supplied identifier and its averaged counters
#[derive(Debug, Clone, PartialEq)]
pub struct VmProfile {
    pub id: String,
    pub baseline: AggregatedMetrics,
    pub contention: AggregatedMetrics,
}

impl VmProfile {
    pub fn new(
        id: impl Into<String>,
        baseline: AggregatedMetrics,
        contention: AggregatedMetrics,
    ) -> Self {
        Self {
            id: id.into(),
            baseline,
            contention,
        }
    }

    pub fn ratios(&self) -> RatioTriple {
        RatioTriple::between(&self.baseline, &self.contention)
    }
}

/// Evaluation of one direction: is `suspect` the noisy neighbor of its peer?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    pub suspect: VmSlot,
    /// The suspect's peer degraded on all three metrics
    pub peer_degraded: bool,
    /// The suspect itself stayed flat
    pub suspect_flat: bool,
    /// The suspect's contention LLC average exceeds the fair share
    pub over_fair_share: bool,
}

impl Finding {
    pub fn confirmed(&self) -> bool {
        self.peer_degraded && self.suspect_flat && self.over_fair_share
    }
}

/// Everything the classifier computed, alongside its verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub vm1_ratios: RatioTriple,
    pub vm2_ratios: RatioTriple,
    /// Half of the declared total LLC, in KB
    pub fair_share_kb: f64,
    /// Findings in evaluation order: VM2 as suspect, then VM1
    pub findings: [Finding; 2],
    pub verdict: Verdict,
}

/// Half of the declared total cache.
pub fn fair_share(total_llc_kb: f64) -> f64 {
    total_llc_kb / 2.0
}

fn evaluate(
    suspect: VmSlot,
    suspect_ratios: &RatioTriple,
    suspect_contention: &AggregatedMetrics,
    peer_ratios: &RatioTriple,
    fair_share_kb: f64,
) -> Finding {
    Finding {
        suspect,
        peer_degraded: peer_ratios.is_degraded(),
        suspect_flat: suspect_ratios.is_flat(),
        over_fair_share: suspect_contention.avg_llc_kb > fair_share_kb,
    }
}

/// Decide which VM, if any, is the noisy neighbor.
///
/// A VM is flagged when its peer degraded on LLC, misses and IPC together,
/// it stayed flat itself, and its contention LLC average is above half of
/// `total_llc_kb`. Both directions are always evaluated; VM2 is checked
/// first and VM1 second, so if both confirm VM1 is reported.
pub fn classify(vm1: &VmProfile, vm2: &VmProfile, total_llc_kb: f64) -> Assessment {
    let fair_share_kb = fair_share(total_llc_kb);
    let vm1_ratios = vm1.ratios();
    let vm2_ratios = vm2.ratios();

    let findings = [
        evaluate(
            VmSlot::Vm2,
            &vm2_ratios,
            &vm2.contention,
            &vm1_ratios,
            fair_share_kb,
        ),
        evaluate(
            VmSlot::Vm1,
            &vm1_ratios,
            &vm1.contention,
            &vm2_ratios,
            fair_share_kb,
        ),
    ];

    let mut verdict = Verdict::None;
    for finding in &findings {
        if finding.confirmed() {
            verdict = Verdict::Noisy(finding.suspect);
        }
    }

    Assessment {
        vm1_ratios,
        vm2_ratios,
        fair_share_kb,
        findings,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn victim() -> VmProfile {
        VmProfile::new(
            "victim",
            AggregatedMetrics::new(10000.0, 1000.0, 2.0),
            AggregatedMetrics::new(9000.0, 1100.0, 1.8),
        )
    }

    fn steady(id: &str, llc_kb: f64) -> VmProfile {
        VmProfile::new(
            id,
            AggregatedMetrics::new(llc_kb, 800.0, 1.2),
            AggregatedMetrics::new(llc_kb, 800.0, 1.2),
        )
    }

    #[test]
    fn test_vm2_flagged() {
        let assessment = classify(&victim(), &steady("noisy", 12000.0), 20000.0);

        assert_eq!(assessment.fair_share_kb, 10000.0);
        assert_eq!(assessment.vm2_ratios, RatioTriple::new(1.0, 1.0, 1.0));
        assert_eq!(assessment.verdict, Verdict::Noisy(VmSlot::Vm2));
    }

    #[test]
    fn test_vm1_flagged() {
        let assessment = classify(&steady("noisy", 12000.0), &victim(), 20000.0);
        assert_eq!(assessment.verdict, Verdict::Noisy(VmSlot::Vm1));
    }

    #[test]
    fn test_under_fair_share_not_flagged() {
        let assessment = classify(&victim(), &steady("quiet", 8000.0), 20000.0);

        let vm2_finding = assessment.findings[0];
        assert!(vm2_finding.peer_degraded);
        assert!(vm2_finding.suspect_flat);
        assert!(!vm2_finding.over_fair_share);
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_exactly_fair_share_not_flagged() {
        let assessment = classify(&victim(), &steady("even", 10000.0), 20000.0);
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_both_flat() {
        let assessment = classify(&steady("a", 15000.0), &steady("b", 15000.0), 20000.0);
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_both_degraded() {
        let mut other = victim();
        other.id = "other".to_string();
        let assessment = classify(&victim(), &other, 1000.0);
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_peer_improved_is_not_flat() {
        let improved = VmProfile::new(
            "improved",
            AggregatedMetrics::new(10000.0, 1000.0, 1.0),
            AggregatedMetrics::new(12000.0, 1000.0, 1.0),
        );
        let assessment = classify(&victim(), &improved, 20000.0);
        assert!(!assessment.findings[0].suspect_flat);
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_empty_logs_are_flat_and_clear() {
        let empty = VmProfile::new("empty", AggregatedMetrics::default(), AggregatedMetrics::default());
        let assessment = classify(&empty, &empty.clone(), 0.0);

        assert_eq!(assessment.vm1_ratios, RatioTriple::new(1.0, 1.0, 1.0));
        assert_eq!(assessment.verdict, Verdict::None);
    }

    #[test]
    fn test_both_confirmed_vm1_wins() {
        // Ratios sitting exactly on the thresholds are both degraded and flat.
        let boundary = |id: &str| {
            VmProfile::new(
                id,
                AggregatedMetrics::new(100.0, 100.0, 100.0),
                AggregatedMetrics::new(95.0, 105.0, 95.0),
            )
        };
        let assessment = classify(&boundary("a"), &boundary("b"), 100.0);

        assert!(assessment.findings[0].confirmed());
        assert!(assessment.findings[1].confirmed());
        assert_eq!(assessment.verdict, Verdict::Noisy(VmSlot::Vm1));
    }

    #[rstest]
    #[case(RatioTriple::new(0.90, 1.10, 0.90), true)]
    #[case(RatioTriple::new(0.95, 1.05, 0.95), true)]
    #[case(RatioTriple::new(0.96, 1.10, 0.90), false)]
    #[case(RatioTriple::new(0.90, 1.04, 0.90), false)]
    #[case(RatioTriple::new(0.90, 1.10, 0.96), false)]
    #[case(RatioTriple::new(1.0, 1.0, 1.0), false)]
    fn test_is_degraded(#[case] ratios: RatioTriple, #[case] expected: bool) {
        assert_eq!(ratios.is_degraded(), expected);
    }

    #[rstest]
    #[case(RatioTriple::new(1.0, 1.0, 1.0), true)]
    #[case(RatioTriple::new(0.95, 1.05, 0.95), true)]
    #[case(RatioTriple::new(0.94, 1.0, 1.0), false)]
    #[case(RatioTriple::new(1.0, 1.06, 1.0), false)]
    #[case(RatioTriple::new(1.0, 1.0, 0.5), false)]
    fn test_is_flat(#[case] ratios: RatioTriple, #[case] expected: bool) {
        assert_eq!(ratios.is_flat(), expected);
    }

    #[test]
    fn test_peer() {
        assert_eq!(VmSlot::Vm1.peer(), VmSlot::Vm2);
        assert_eq!(VmSlot::Vm2.peer(), VmSlot::Vm1);
    }
}
