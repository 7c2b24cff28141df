//! # libft-membrane
//!
//! Runtime configuration and healing bookkeeping shared by the `ft_*` ABI
//! layer.
//!
//! The membrane decides, per process, whether the C boundary runs in
//! **strict** mode (C contract semantics, null arguments short-circuit to a
//! safe default) or **hardened** mode (same short-circuits, plus unsafe call
//! patterns are upgraded to their safe variant and every repair is recorded).

pub mod config;
pub mod heal;

pub use config::{SafetyLevel, safety_level, set_safety_level};
pub use heal::{HealRecord, HealingAction, HealingPolicy, HealingSnapshot, global_healing_policy};
