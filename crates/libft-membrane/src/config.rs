//! Runtime mode configuration.
//!
//! The runtime mode is set via the `LIBFT_MODE` environment variable:
//! - `strict` (default): C contract behavior. Null pointer arguments are
//!   answered with the function's safe default (null, 0 or no-op) but nothing
//!   is rewritten or recorded.
//! - `hardened`: the same null short-circuits are recorded as healing events,
//!   and call patterns the C contract leaves undefined (overlapping
//!   `ft_memcpy`) are upgraded to their safe variant.

use std::sync::atomic::{AtomicU8, Ordering};

/// Name of the environment variable holding the runtime mode.
pub const MODE_ENV: &str = "LIBFT_MODE";

/// Runtime operating mode for the membrane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// C contract behavior; repairs are never applied or recorded.
    #[default]
    Strict,
    /// Repairs unsafe call patterns and records every healing action.
    Hardened,
}

impl SafetyLevel {
    /// Parse from string (case-insensitive). Unknown values map to `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardened" | "repair" | "tsm" | "full" => Self::Hardened,
            _ => Self::Strict,
        }
    }

    /// Returns true if the membrane should apply and record healing actions.
    #[must_use]
    pub const fn heals_enabled(self) -> bool {
        matches!(self, Self::Hardened)
    }

    /// Lowercase name, as accepted by [`SafetyLevel::from_str_loose`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Hardened => "hardened",
        }
    }
}

// 0=unresolved, 1=Strict, 2=Hardened.
static CACHED_LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNRESOLVED);

const LEVEL_UNRESOLVED: u8 = 0;
const LEVEL_STRICT: u8 = 1;
const LEVEL_HARDENED: u8 = 2;

fn level_to_u8(level: SafetyLevel) -> u8 {
    match level {
        SafetyLevel::Strict => LEVEL_STRICT,
        SafetyLevel::Hardened => LEVEL_HARDENED,
    }
}

fn u8_to_level(v: u8) -> SafetyLevel {
    match v {
        LEVEL_HARDENED => SafetyLevel::Hardened,
        _ => SafetyLevel::Strict,
    }
}

/// Get the configured safety level (reads `LIBFT_MODE` on first call, caches
/// thereafter).
///
/// Concurrent first calls may both read the environment; they store the same
/// value, so the race is benign.
#[must_use]
pub fn safety_level() -> SafetyLevel {
    let cached = CACHED_LEVEL.load(Ordering::Acquire);
    if cached != LEVEL_UNRESOLVED {
        return u8_to_level(cached);
    }

    let level = std::env::var(MODE_ENV)
        .map(|v| SafetyLevel::from_str_loose(&v))
        .unwrap_or_default();
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
    level
}

/// Override the cached level for the rest of the process.
///
/// Intended for tests and tooling that need to exercise both modes without
/// re-executing the process.
pub fn set_safety_level(level: SafetyLevel) {
    CACHED_LEVEL.store(level_to_u8(level), Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_safety_levels() {
        assert_eq!(SafetyLevel::from_str_loose("strict"), SafetyLevel::Strict);
        assert_eq!(SafetyLevel::from_str_loose("STRICT"), SafetyLevel::Strict);
        assert_eq!(SafetyLevel::from_str_loose("default"), SafetyLevel::Strict);
        assert_eq!(SafetyLevel::from_str_loose("abi"), SafetyLevel::Strict);
        assert_eq!(
            SafetyLevel::from_str_loose("hardened"),
            SafetyLevel::Hardened
        );
        assert_eq!(SafetyLevel::from_str_loose(" Repair "), SafetyLevel::Hardened);
        assert_eq!(SafetyLevel::from_str_loose("tsm"), SafetyLevel::Hardened);
        assert_eq!(SafetyLevel::from_str_loose("bogus"), SafetyLevel::Strict);
    }

    #[test]
    fn default_is_strict() {
        assert_eq!(SafetyLevel::default(), SafetyLevel::Strict);
    }

    #[test]
    fn healing_only_in_hardened() {
        assert!(!SafetyLevel::Strict.heals_enabled());
        assert!(SafetyLevel::Hardened.heals_enabled());
    }

    #[test]
    fn names_round_trip_through_parser() {
        for level in [SafetyLevel::Strict, SafetyLevel::Hardened] {
            assert_eq!(SafetyLevel::from_str_loose(level.as_str()), level);
        }
    }

    #[test]
    fn cached_mode_is_process_sticky_until_overridden() {
        let previous = CACHED_LEVEL.swap(LEVEL_STRICT, Ordering::SeqCst);
        assert_eq!(safety_level(), SafetyLevel::Strict);

        set_safety_level(SafetyLevel::Hardened);
        assert_eq!(safety_level(), SafetyLevel::Hardened);
        assert_eq!(safety_level(), SafetyLevel::Hardened);

        CACHED_LEVEL.store(previous, Ordering::SeqCst);
    }
}
