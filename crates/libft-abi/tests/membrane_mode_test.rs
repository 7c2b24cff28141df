//! Hardened-mode behavior observed through the exported functions.
//!
//! The runtime mode and the healing policy are process-global, so every test
//! here holds `TEST_LOCK` and compares snapshot deltas.

use std::ffi::c_char;
use std::ptr;
use std::sync::Mutex;

use ft::string_abi::{ft_memcpy, ft_split, ft_strdup, ft_strlen};
use libft_membrane::{HealingAction, SafetyLevel, global_healing_policy, set_safety_level};

static TEST_LOCK: Mutex<()> = Mutex::new(());

struct ModeGuard;

impl ModeGuard {
    fn hardened() -> Self {
        set_safety_level(SafetyLevel::Hardened);
        Self
    }
}

impl Drop for ModeGuard {
    fn drop(&mut self) {
        set_safety_level(SafetyLevel::Strict);
    }
}

#[test]
fn strict_mode_records_nothing() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    set_safety_level(SafetyLevel::Strict);
    let before = global_healing_policy().snapshot();

    unsafe {
        assert_eq!(ft_strlen(ptr::null()), 0);
        assert!(ft_strdup(ptr::null()).is_null());
    }
    assert_eq!(global_healing_policy().snapshot(), before);
}

#[test]
fn hardened_mode_records_null_short_circuits() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    let _mode = ModeGuard::hardened();
    let before = global_healing_policy().snapshot();

    unsafe {
        assert_eq!(ft_strlen(ptr::null()), 0);
        assert!(ft_split(ptr::null(), b',' as c_char).is_null());
    }

    let after = global_healing_policy().snapshot();
    assert_eq!(after.safe_defaults - before.safe_defaults, 2);
    assert_eq!(after.total_heals - before.total_heals, 2);

    let recent = global_healing_policy().recent();
    let tail: Vec<_> = recent.iter().rev().take(2).map(|r| r.symbol).collect();
    assert_eq!(tail, ["ft_split", "ft_strlen"]);
    assert!(
        recent
            .iter()
            .rev()
            .take(2)
            .all(|r| r.action == HealingAction::ReturnSafeDefault)
    );
}

#[test]
fn hardened_memcpy_upgrades_overlap_to_move() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    let _mode = ModeGuard::hardened();
    let before = global_healing_policy().snapshot();

    let mut buf = *b"123456\0";
    let base = buf.as_mut_ptr();
    unsafe { ft_memcpy(base.add(2).cast(), base.cast(), 4) };
    assert_eq!(&buf[..6], b"121234");

    let after = global_healing_policy().snapshot();
    assert_eq!(after.variant_upgrades - before.variant_upgrades, 1);
}

#[test]
fn hardened_memcpy_leaves_disjoint_copies_alone() {
    let _guard = TEST_LOCK.lock().expect("test lock");
    let _mode = ModeGuard::hardened();
    let before = global_healing_policy().snapshot();

    let src = *b"abcd";
    let mut dst = [0u8; 4];
    unsafe { ft_memcpy(dst.as_mut_ptr().cast(), src.as_ptr().cast(), 4) };
    assert_eq!(&dst, b"abcd");
    assert_eq!(global_healing_policy().snapshot(), before);
}
