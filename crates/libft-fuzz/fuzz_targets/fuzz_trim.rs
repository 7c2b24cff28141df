#![no_main]
use libfuzzer_sys::fuzz_target;
use libft_core::string;

fuzz_target!(|data: &[u8]| {
    // First byte picks how much of the input is the trim set.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let at = usize::from(split).min(rest.len());
    let (set, s) = rest.split_at(at);

    let trimmed = string::strtrim(s, set);
    assert!(trimmed.len() <= string::strlen(s));
    assert_eq!(string::strtrim(trimmed, set), trimmed);

    let set = &set[..string::strlen(set)];
    if let (Some(first), Some(last)) = (trimmed.first(), trimmed.last()) {
        assert!(!set.contains(first));
        assert!(!set.contains(last));
    }
});
