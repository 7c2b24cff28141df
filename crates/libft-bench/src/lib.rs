//! Shared inputs for the libft benchmarks.

/// `words` space-separated tokens of `word_len` bytes, NUL-terminated, with
/// runs of one to three delimiters between them.
#[must_use]
pub fn split_input(words: usize, word_len: usize) -> Vec<u8> {
    let mut s = Vec::with_capacity(words * (word_len + 3) + 1);
    for i in 0..words {
        s.extend(std::iter::repeat_n(b'a' + (i % 26) as u8, word_len));
        s.extend(std::iter::repeat_n(b' ', 1 + i % 3));
    }
    s.push(0);
    s
}

/// `size` content bytes padded on both sides with `pad` bytes from `set`.
#[must_use]
pub fn trim_input(size: usize, pad: usize, set: &[u8]) -> Vec<u8> {
    let mut s = Vec::with_capacity(size + 2 * pad + 1);
    s.extend((0..pad).map(|i| set[i % set.len()]));
    s.extend(std::iter::repeat_n(b'x', size));
    s.extend((0..pad).map(|i| set[i % set.len()]));
    s.push(0);
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_input_shape() {
        let s = split_input(3, 2);
        assert_eq!(s, b"aa bb  cc   \0");
        assert_eq!(libft_core::string::count_tokens(&s, b' '), 3);
    }

    #[test]
    fn trim_input_shape() {
        assert_eq!(trim_input(2, 3, b" \t"), b" \t xx \t \0");
    }
}
