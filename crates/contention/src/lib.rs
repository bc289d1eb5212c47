//! # contention
//!
//! Compares a VM's cache counters under contention against its own baseline
//! and decides which of two co-located VMs, if any, is a noisy neighbor.
//!
//! The pipeline is pure: [`AggregatedMetrics`] reduces a parsed log to
//! averages, [`RatioTriple`] compares contention against baseline, and
//! [`classify`] applies the peer-degradation and fair-share checks.
//!
//! ```
//! use contention::{classify, AggregatedMetrics, Verdict, VmProfile, VmSlot};
//!
//! let victim = VmProfile::new(
//!     "vm-a",
//!     AggregatedMetrics::new(10000.0, 1000.0, 2.0),
//!     AggregatedMetrics::new(9000.0, 1100.0, 1.8),
//! );
//! let noisy = VmProfile::new(
//!     "vm-b",
//!     AggregatedMetrics::new(12000.0, 500.0, 1.5),
//!     AggregatedMetrics::new(12000.0, 500.0, 1.5),
//! );
//!
//! let assessment = classify(&victim, &noisy, 20000.0);
//! assert_eq!(assessment.verdict, Verdict::Noisy(VmSlot::Vm2));
//! ```

pub mod aggregate;
pub mod classify;

pub use aggregate::*;
pub use classify::*;
