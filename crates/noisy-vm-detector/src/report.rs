use std::fmt;

use contention::{AggregatedMetrics, Assessment, RatioTriple, Verdict, VmProfile, VmSlot};

/// Human readable summary of a run
pub struct Report<'a> {
    vm1: &'a VmProfile,
    vm2: &'a VmProfile,
    assessment: &'a Assessment,
}

impl<'a> Report<'a> {
    pub fn new(vm1: &'a VmProfile, vm2: &'a VmProfile, assessment: &'a Assessment) -> Self {
        Self {
            vm1,
            vm2,
            assessment,
        }
    }

    fn profile(&self, slot: VmSlot) -> &VmProfile {
        match slot {
            VmSlot::Vm1 => self.vm1,
            VmSlot::Vm2 => self.vm2,
        }
    }
}

fn write_vm(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    vm: &VmProfile,
    ratios: &RatioTriple,
) -> fmt::Result {
    let AggregatedMetrics {
        avg_llc_kb: base_llc,
        avg_misses: base_miss,
        avg_ipc: base_ipc,
    } = vm.baseline;
    let AggregatedMetrics {
        avg_llc_kb: cont_llc,
        avg_misses: cont_miss,
        avg_ipc: cont_ipc,
    } = vm.contention;

    writeln!(f, "== {} ({}) ==", label, vm.id)?;
    writeln!(
        f,
        "  LLC  (base/cont)  = {:.1} / {:.1} KB   → ratio {:.2}",
        base_llc, cont_llc, ratios.llc
    )?;
    writeln!(
        f,
        "  MISS (base/cont)  = {:.1} / {:.1}     → ratio {:.2}",
        base_miss, cont_miss, ratios.misses
    )?;
    writeln!(
        f,
        "  IPC  (base/cont)  = {:.2} / {:.2}     → ratio {:.2}",
        base_ipc, cont_ipc, ratios.ipc
    )?;
    writeln!(f)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_vm(f, "VM1", self.vm1, &self.assessment.vm1_ratios)?;
        write_vm(f, "VM2", self.vm2, &self.assessment.vm2_ratios)?;

        writeln!(
            f,
            "Fair share of LLC (each) = {:.1} KB",
            self.assessment.fair_share_kb
        )?;
        writeln!(f)?;

        match self.assessment.verdict {
            Verdict::Noisy(slot) => writeln!(f, "Detected noisy VM: {}", self.profile(slot).id),
            Verdict::None => writeln!(
                f,
                "No noisy VM detected under combined peer-degradation + fair-share checks."
            ),
        }
    }
}
