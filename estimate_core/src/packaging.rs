//! # Packaging Optimizer
//!
//! Converts a continuous required quantity (kg, L, m², units) into a whole
//! number of retail packages.
//!
//! Two policies sit behind [`PackagingStrategy::plan`]:
//!
//! - [`PackagingStrategy::GreedyDescending`]: take as many of the largest size
//!   as fit, then the next size, and cover whatever remains with the smallest
//!   size. Used for grout, spacers, cement and membranes.
//! - [`PackagingStrategy::BoundedPair`]: try every combination of at most two
//!   distinct sizes that covers the target and keep the one with the least
//!   leftover, then the fewest packages. Used for adhesive mortar, which is
//!   sold in three bag sizes.
//!
//! Both are deterministic and never under-cover a positive target.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::packaging::PackagingStrategy;
//!
//! // 12.3 kg of grout in 5 kg and 1 kg packs
//! let plan = PackagingStrategy::GreedyDescending.plan(12.3, &[5.0, 1.0]);
//! assert_eq!(plan.package_count(), 5);
//! assert!((plan.total() - 13.0).abs() < 1e-9);
//! assert_eq!(plan.note("kg"), "2 × 5 kg + 3 × 1 kg");
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{ceil_count, CEIL_EPSILON};

/// A number of packages of one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageLine {
    pub size: f64,
    pub count: u64,
}

impl PackageLine {
    pub fn total(&self) -> f64 {
        self.size * self.count as f64
    }
}

/// A purchase combination covering a required quantity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackagePlan {
    /// Quantity that had to be covered
    pub required: f64,
    /// Package lines, largest size first
    pub lines: Vec<PackageLine>,
}

impl PackagePlan {
    fn empty(required: f64) -> Self {
        PackagePlan {
            required,
            lines: Vec::new(),
        }
    }

    fn from_counts(required: f64, counts: &[(f64, u64)]) -> Self {
        let mut lines: Vec<PackageLine> = counts
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|&(size, count)| PackageLine { size, count })
            .collect();
        lines.sort_by(|a, b| b.size.total_cmp(&a.size));
        PackagePlan { required, lines }
    }

    /// Total quantity bought
    pub fn total(&self) -> f64 {
        self.lines.iter().map(PackageLine::total).sum()
    }

    /// Quantity bought beyond what is required
    pub fn leftover(&self) -> f64 {
        (self.total() - self.required).max(0.0)
    }

    /// Number of packages bought
    pub fn package_count(&self) -> u64 {
        self.lines.iter().map(|l| l.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Purchase hint such as `"2 × 20 kg + 1 × 5 kg"`
    pub fn note(&self, unit_symbol: &str) -> String {
        self.lines
            .iter()
            .map(|l| format!("{} × {} {}", l.count, format_size(l.size), unit_symbol))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Print a package size without a trailing `.0`
fn format_size(size: f64) -> String {
    if (size - size.round()).abs() < CEIL_EPSILON {
        format!("{}", size.round() as i64)
    } else {
        format!("{}", size)
    }
}

/// Packaging policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackagingStrategy {
    /// Largest sizes first, remainder topped up with the smallest size
    #[default]
    GreedyDescending,
    /// Exhaustive search over combinations of at most two sizes
    BoundedPair,
}

impl PackagingStrategy {
    /// Find a package combination covering `required`.
    ///
    /// Sizes that are not finite and positive are ignored. A non-positive
    /// requirement or an empty size set gives an empty plan.
    pub fn plan(&self, required: f64, sizes: &[f64]) -> PackagePlan {
        let sizes = usable_sizes(sizes);
        if !required.is_finite() || required <= 0.0 || sizes.is_empty() {
            return PackagePlan::empty(required.max(0.0));
        }
        let plan = match self {
            PackagingStrategy::GreedyDescending => greedy_descending(required, &sizes),
            PackagingStrategy::BoundedPair => bounded_pair(required, &sizes),
        };
        trace!(
            strategy = ?self,
            required,
            total = plan.total(),
            packages = plan.package_count(),
            "packaging plan"
        );
        plan
    }
}

/// Finite positive sizes, deduplicated, largest first
fn usable_sizes(sizes: &[f64]) -> Vec<f64> {
    let mut usable: Vec<f64> = sizes
        .iter()
        .copied()
        .filter(|s| s.is_finite() && *s > 0.0)
        .collect();
    usable.sort_by(|a, b| b.total_cmp(a));
    usable.dedup_by(|a, b| (*a - *b).abs() < CEIL_EPSILON);
    usable
}

fn greedy_descending(required: f64, sizes: &[f64]) -> PackagePlan {
    let mut counts: Vec<(f64, u64)> = Vec::with_capacity(sizes.len());
    let mut remaining = required;

    for &size in sizes {
        let count = (remaining / size + CEIL_EPSILON).floor().max(0.0) as u64;
        remaining -= size * count as f64;
        counts.push((size, count));
    }

    if remaining > CEIL_EPSILON {
        // sizes is non-empty and sorted descending, so the last entry is the smallest
        if let Some(last) = counts.last_mut() {
            last.1 += ceil_count(remaining / last.0).max(1);
        }
    }

    PackagePlan::from_counts(required, &counts)
}

/// Candidate under evaluation: (leftover, package count, counts)
struct Candidate {
    leftover: f64,
    packages: u64,
    counts: Vec<(f64, u64)>,
}

impl Candidate {
    fn new(required: f64, counts: Vec<(f64, u64)>) -> Self {
        let total: f64 = counts.iter().map(|(s, c)| s * *c as f64).sum();
        Candidate {
            leftover: total - required,
            packages: counts.iter().map(|(_, c)| c).sum(),
            counts,
        }
    }

    fn beats(&self, other: &Candidate) -> bool {
        if self.leftover < other.leftover - CEIL_EPSILON {
            return true;
        }
        (self.leftover - other.leftover).abs() <= CEIL_EPSILON && self.packages < other.packages
    }
}

/// Counts of the larger size tried per pair, the highest ones below the
/// single-size count
const PAIR_SEARCH_LIMIT: u64 = 10_000;

fn bounded_pair(required: f64, sizes: &[f64]) -> PackagePlan {
    let mut best: Option<Candidate> = None;
    let mut consider = |candidate: Candidate| {
        if best.as_ref().map_or(true, |b| candidate.beats(b)) {
            best = Some(candidate);
        }
    };

    for (i, &a) in sizes.iter().enumerate() {
        let max_a = ceil_count(required / a).max(1);
        consider(Candidate::new(required, vec![(a, max_a)]));

        for &b in &sizes[i + 1..] {
            let first = max_a.saturating_sub(PAIR_SEARCH_LIMIT).max(1);
            for count_a in first..max_a {
                let remaining = required - a * count_a as f64;
                if remaining <= CEIL_EPSILON {
                    break;
                }
                let count_b = ceil_count(remaining / b).max(1);
                consider(Candidate::new(required, vec![(a, count_a), (b, count_b)]));
            }
        }
    }

    match best {
        Some(candidate) => PackagePlan::from_counts(required, &candidate.counts),
        None => PackagePlan::empty(required),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounded_pair_tiny_size_terminates() {
        let plan = PackagingStrategy::BoundedPair.plan(1_000_000.0, &[20.0, 0.001]);
        assert!(plan.total() >= 1_000_000.0 - 1e-6);
        assert_eq!(plan.lines[0].size, 20.0);
        assert_eq!(plan.lines[0].count, 50_000);
    }

    #[test]
    fn test_greedy_grout_scenario() {
        let plan = PackagingStrategy::GreedyDescending.plan(12.3, &[5.0, 1.0]);
        assert_eq!(
            plan.lines,
            vec![PackageLine { size: 5.0, count: 2 }, PackageLine { size: 1.0, count: 3 }]
        );
        assert!((plan.total() - 13.0).abs() < 1e-9);
        assert!((plan.leftover() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_exact_multiple() {
        let plan = PackagingStrategy::GreedyDescending.plan(10.0, &[1.0, 5.0]);
        assert_eq!(plan.lines, vec![PackageLine { size: 5.0, count: 2 }]);
        assert_eq!(plan.leftover(), 0.0);
    }

    #[test]
    fn test_greedy_noisy_remainder() {
        // 0.3 / 0.1 is 2.9999999999999996 in floating point
        let plan = PackagingStrategy::GreedyDescending.plan(0.3, &[0.1]);
        assert_eq!(plan.package_count(), 3);
    }

    #[test]
    fn test_bounded_pair_prefers_low_leftover() {
        // 20+5 leaves 2 kg in 2 bags; 5x5 also leaves 2 kg but needs 5 bags
        let plan = PackagingStrategy::BoundedPair.plan(23.0, &[20.0, 15.0, 5.0]);
        assert_eq!(
            plan.lines,
            vec![PackageLine { size: 20.0, count: 1 }, PackageLine { size: 5.0, count: 1 }]
        );
        assert!((plan.leftover() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounded_pair_tie_keeps_first_found() {
        // 2x20 + 1x5 and 3x15 both hit 45 kg exactly with 3 bags
        let plan = PackagingStrategy::BoundedPair.plan(45.0, &[20.0, 15.0, 5.0]);
        assert_eq!(
            plan.lines,
            vec![PackageLine { size: 20.0, count: 2 }, PackageLine { size: 5.0, count: 1 }]
        );
    }

    #[test]
    fn test_bounded_pair_fewest_packages_on_equal_leftover() {
        // 20+2x5, 2x15 and 6x5 all reach 30 kg; 2x15 uses the fewest bags
        let plan = PackagingStrategy::BoundedPair.plan(28.0, &[20.0, 15.0, 5.0]);
        assert_eq!(plan.lines, vec![PackageLine { size: 15.0, count: 2 }]);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(PackagingStrategy::GreedyDescending.plan(0.0, &[5.0]).is_empty());
        assert!(PackagingStrategy::BoundedPair.plan(-3.0, &[5.0]).is_empty());
        assert!(PackagingStrategy::GreedyDescending.plan(3.0, &[]).is_empty());
        assert!(PackagingStrategy::BoundedPair.plan(3.0, &[0.0, f64::NAN]).is_empty());
    }

    #[test]
    fn test_note_formatting() {
        let plan = PackagingStrategy::GreedyDescending.plan(4.0, &[3.6, 1.0]);
        assert_eq!(plan.note("L"), "1 × 3.6 L + 1 × 1 L");
    }

    #[test]
    fn test_plan_serialization() {
        let plan = PackagingStrategy::BoundedPair.plan(23.0, &[20.0, 15.0, 5.0]);
        let json = serde_json::to_string(&plan).unwrap();
        let back: PackagePlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, back);
    }

    fn size_set() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.5f64..50.0, 1..4)
    }

    proptest! {
        #[test]
        fn greedy_never_under_covers(target in 0.01f64..2000.0, sizes in size_set()) {
            let plan = PackagingStrategy::GreedyDescending.plan(target, &sizes);
            prop_assert!(plan.total() + 1e-6 >= target);
        }

        #[test]
        fn bounded_pair_never_under_covers(target in 0.01f64..2000.0, sizes in size_set()) {
            let plan = PackagingStrategy::BoundedPair.plan(target, &sizes);
            prop_assert!(plan.total() + 1e-6 >= target);
        }

        #[test]
        fn greedy_is_idempotent(target in 0.01f64..2000.0, sizes in size_set()) {
            let first = PackagingStrategy::GreedyDescending.plan(target, &sizes);
            let second = PackagingStrategy::GreedyDescending.plan(target, &sizes);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn bounded_pair_no_worse_than_single_size(target in 0.01f64..2000.0, sizes in size_set()) {
            let plan = PackagingStrategy::BoundedPair.plan(target, &sizes);
            for &size in &sizes {
                let single = size * ceil_count(target / size).max(1) as f64;
                prop_assert!(plan.total() <= single + 1e-6);
            }
        }
    }
}
