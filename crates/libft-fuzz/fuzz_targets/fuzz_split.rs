#![no_main]
use libfuzzer_sys::fuzz_target;
use libft_core::string;

fuzz_target!(|data: &[u8]| {
    let Some((&delim, s)) = data.split_first() else {
        return;
    };

    let tokens: Vec<&[u8]> = string::split_tokens(s, delim).collect();
    assert_eq!(tokens.len(), string::count_tokens(s, delim));

    for token in &tokens {
        assert!(!token.is_empty());
        assert!(!token.contains(&0));
        if delim != 0 {
            assert!(!token.contains(&delim));
        }
    }

    // Rejoining with single delimiters and splitting again is stable.
    if delim != 0 {
        let joined = tokens.join(&delim);
        let again: Vec<&[u8]> = string::split_tokens(&joined, delim).collect();
        assert_eq!(again, tokens);
    }

    if let Ok(owned) = string::split(s, delim) {
        assert_eq!(owned.len(), tokens.len());
    }
});
