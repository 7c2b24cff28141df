//! Runtime policy bridge for ABI entrypoints.
//!
//! Centralizes the membrane lookups so every `ft_*` function decides and
//! records healing the same way.

use libft_membrane::config::{SafetyLevel, safety_level};
use libft_membrane::heal::{HealingAction, global_healing_policy};

#[inline]
pub(crate) fn mode() -> SafetyLevel {
    safety_level()
}

/// A null argument was answered with the function's safe default.
#[inline]
pub(crate) fn null_argument(symbol: &'static str) {
    if mode().heals_enabled() {
        global_healing_policy().record(symbol, HealingAction::ReturnSafeDefault);
    }
}

/// Decide whether a non-overlapping copy request must run as a move.
///
/// Only hardened mode inspects the ranges; strict mode trusts the C contract.
#[inline]
pub(crate) fn copy_needs_move(symbol: &'static str, dst: usize, src: usize, n: usize) -> bool {
    if !mode().heals_enabled() {
        return false;
    }
    let policy = global_healing_policy();
    let action = policy.heal_copy_overlap(dst, src, n);
    policy.record(symbol, action);
    action == HealingAction::UpgradeToSafeVariant
}
