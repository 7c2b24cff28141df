#![no_main]
use libfuzzer_sys::fuzz_target;
use libft_core::stdlib;

fuzz_target!(|data: &[u8]| {
    // Should never panic, whatever the digits.
    let _ = stdlib::atoi(data);

    if data.len() >= 4 {
        let n = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let rendered = stdlib::itoa(n);
        assert_eq!(stdlib::atoi(rendered.as_bytes()), n);
    }
});
