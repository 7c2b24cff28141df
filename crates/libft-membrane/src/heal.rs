//! Healing policy engine.
//!
//! When the ABI layer meets a call the C contract leaves undefined (a null
//! string, overlapping `memcpy` regions) it answers with a deterministic
//! healing action instead of dereferencing garbage. In hardened mode each
//! action is counted and kept in a bounded log of recent events.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Maximum number of events retained by [`HealingPolicy::recent`].
pub const RECENT_CAPACITY: usize = 64;

/// Actions the membrane can take to heal an unsafe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealingAction {
    /// Return the function's safe default (null, 0 or no-op) without touching memory.
    ReturnSafeDefault,
    /// Run the safe variant of the requested operation (`memcpy` -> `memmove`).
    UpgradeToSafeVariant,
    /// No healing needed.
    None,
}

impl HealingAction {
    /// Returns true if this action represents an actual healing (not None).
    #[must_use]
    pub const fn is_heal(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable lowercase name used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReturnSafeDefault => "return_safe_default",
            Self::UpgradeToSafeVariant => "upgrade_to_safe_variant",
            Self::None => "none",
        }
    }
}

/// One recorded healing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealRecord {
    /// Exported symbol that applied the heal.
    pub symbol: &'static str,
    pub action: HealingAction,
}

/// Point-in-time copy of the policy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealingSnapshot {
    pub total_heals: u64,
    pub safe_defaults: u64,
    pub variant_upgrades: u64,
}

/// Policy engine that decides and records healing actions.
pub struct HealingPolicy {
    /// Total heals applied.
    pub total_heals: AtomicU64,
    /// Safe defaults returned.
    pub safe_defaults: AtomicU64,
    /// Safe variant upgrades.
    pub variant_upgrades: AtomicU64,
    recent: Mutex<VecDeque<HealRecord>>,
}

impl HealingPolicy {
    /// Create a new policy with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_heals: AtomicU64::new(0),
            safe_defaults: AtomicU64::new(0),
            variant_upgrades: AtomicU64::new(0),
            recent: parking_lot::const_mutex(VecDeque::new()),
        }
    }

    /// Record a healing action applied by `symbol`.
    pub fn record(&self, symbol: &'static str, action: HealingAction) {
        if !action.is_heal() {
            return;
        }
        self.total_heals.fetch_add(1, Ordering::Relaxed);
        match action {
            HealingAction::ReturnSafeDefault => {
                self.safe_defaults.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::UpgradeToSafeVariant => {
                self.variant_upgrades.fetch_add(1, Ordering::Relaxed);
            }
            HealingAction::None => {}
        }

        let mut recent = self.recent.lock();
        if recent.len() == RECENT_CAPACITY {
            recent.pop_front();
        }
        recent.push_back(HealRecord { symbol, action });
    }

    /// Decide healing for a copy whose source and destination ranges may overlap.
    #[must_use]
    pub fn heal_copy_overlap(&self, dst: usize, src: usize, n: usize) -> HealingAction {
        if n != 0 && ranges_overlap(dst, src, n) {
            HealingAction::UpgradeToSafeVariant
        } else {
            HealingAction::None
        }
    }

    /// Most recent events, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<HealRecord> {
        self.recent.lock().iter().copied().collect()
    }

    #[must_use]
    pub fn snapshot(&self) -> HealingSnapshot {
        HealingSnapshot {
            total_heals: self.total_heals.load(Ordering::Relaxed),
            safe_defaults: self.safe_defaults.load(Ordering::Relaxed),
            variant_upgrades: self.variant_upgrades.load(Ordering::Relaxed),
        }
    }
}

impl Default for HealingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `[a, a + n)` and `[b, b + n)` share at least one byte.
#[must_use]
pub fn ranges_overlap(a: usize, b: usize, n: usize) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    hi - lo < n
}

/// Global healing policy instance.
static GLOBAL_POLICY: HealingPolicy = HealingPolicy::new();

/// Access the global healing policy.
#[must_use]
pub fn global_healing_policy() -> &'static HealingPolicy {
    &GLOBAL_POLICY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_increments_counters() {
        let policy = HealingPolicy::new();
        policy.record("ft_strlen", HealingAction::ReturnSafeDefault);
        policy.record("ft_strdup", HealingAction::ReturnSafeDefault);
        policy.record("ft_memcpy", HealingAction::UpgradeToSafeVariant);
        let snap = policy.snapshot();
        assert_eq!(snap.total_heals, 3);
        assert_eq!(snap.safe_defaults, 2);
        assert_eq!(snap.variant_upgrades, 1);
    }

    #[test]
    fn none_is_not_recorded() {
        let policy = HealingPolicy::new();
        policy.record("ft_strlen", HealingAction::None);
        assert_eq!(policy.snapshot(), HealingSnapshot::default());
        assert!(policy.recent().is_empty());
    }

    #[test]
    fn recent_log_is_bounded_and_ordered() {
        let policy = HealingPolicy::new();
        for _ in 0..RECENT_CAPACITY {
            policy.record("ft_strlen", HealingAction::ReturnSafeDefault);
        }
        policy.record("ft_memcpy", HealingAction::UpgradeToSafeVariant);

        let recent = policy.recent();
        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(
            recent.last(),
            Some(&HealRecord {
                symbol: "ft_memcpy",
                action: HealingAction::UpgradeToSafeVariant,
            })
        );
    }

    #[test]
    fn overlap_detection() {
        assert!(ranges_overlap(100, 102, 4));
        assert!(ranges_overlap(102, 100, 4));
        assert!(ranges_overlap(100, 100, 1));
        assert!(!ranges_overlap(100, 104, 4));
        assert!(!ranges_overlap(104, 100, 4));
    }

    #[test]
    fn overlapping_copy_upgrades_to_move() {
        let policy = HealingPolicy::new();
        assert_eq!(
            policy.heal_copy_overlap(0x1002, 0x1000, 4),
            HealingAction::UpgradeToSafeVariant
        );
        assert_eq!(policy.heal_copy_overlap(0x2000, 0x1000, 4), HealingAction::None);
        assert_eq!(policy.heal_copy_overlap(0x1000, 0x1000, 0), HealingAction::None);
    }
}
