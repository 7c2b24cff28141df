//! Fixture execution against `libft-core`.
//!
//! Input conventions:
//! - strings are JSON strings; byte buffers are JSON strings or arrays of
//!   `0..=255` integers
//! - single characters (`c`) are integers or one-character strings
//! - callbacks are named operations (`upper`, `lower`, `index`)
//! - lists are arrays of strings, head first
//!
//! Outputs are JSON values: strings for text, arrays for buffers and
//! token/list results, integers for lengths, comparisons and offsets, and
//! `null` where C would return a null pointer.

use libft_core::list::{self, List, Node};
use libft_core::{ctype, io, stdlib, string};
use libft_membrane::config::SafetyLevel;
use libft_membrane::heal::{global_healing_policy, ranges_overlap};
use serde_json::{Value, json};

use crate::error::HarnessError;

/// Output recorded for a call whose C behavior is undefined in strict mode.
pub const UNDEFINED: &str = "UB";

/// Execute one fixture case under `mode` and return the rendered result.
pub fn execute_fixture_case(
    function: &str,
    inputs: &Value,
    mode: &str,
) -> Result<Value, HarnessError> {
    let args = Args { function, inputs };
    let mode = SafetyLevel::from_str_loose(mode);

    let out = match function {
        "isalpha" => classify(&args, ctype::is_alpha)?,
        "isdigit" => classify(&args, ctype::is_digit)?,
        "isalnum" => classify(&args, ctype::is_alnum)?,
        "isascii" => classify(&args, ctype::is_ascii)?,
        "isprint" => classify(&args, ctype::is_print)?,
        "toupper" => convert(&args, ctype::to_upper)?,
        "tolower" => convert(&args, ctype::to_lower)?,

        "atoi" => json!(stdlib::atoi(&args.bytes("s")?)),
        "itoa" => text(&stdlib::itoa_owned(args.int("n")?).map_err(|e| args.bad(e))?),

        "strlen" => json!(string::strlen(&args.bytes("s")?)),
        "strdup" => text(&string::strdup(&args.bytes("s")?).map_err(|e| args.bad(e))?),
        "strchr" => index(string::strchr(&args.bytes("s")?, args.byte("c")?)),
        "strrchr" => index(string::strrchr(&args.bytes("s")?, args.byte("c")?)),
        "strncmp" => json!(string::strncmp(
            &args.bytes("s1")?,
            &args.bytes("s2")?,
            args.usize("n")?
        )),
        "strnstr" => index(string::strnstr(
            &args.bytes("haystack")?,
            &args.bytes("needle")?,
            args.usize("len")?,
        )),
        "strlcpy" => strlcpy(&args)?,
        "strlcat" => strlcat(&args)?,
        "substr" => text(string::substr(
            &args.bytes("s")?,
            args.usize("start")?,
            args.usize("len")?,
        )),
        "strjoin" => {
            let joined = string::strjoin(&args.bytes("s1")?, &args.bytes("s2")?)
                .map_err(|e| args.bad(e))?;
            text(&joined)
        }
        "strtrim" => text(string::strtrim(&args.bytes("s")?, &args.bytes("set")?)),
        "split" => {
            let tokens = string::split(&args.bytes("s")?, args.byte("c")?).map_err(|e| args.bad(e))?;
            Value::Array(tokens.iter().map(|t| text(t)).collect())
        }
        "strmapi" => {
            let op = args.op()?;
            let mapped = string::strmapi(&args.bytes("s")?, |i, c| op.apply(i, c))
                .map_err(|e| args.bad(e))?;
            text(&mapped)
        }
        "striteri" => {
            let op = args.op()?;
            let mut s = args.bytes("s")?;
            string::striteri(&mut s, |i, c| *c = op.apply(i, *c));
            text(&s)
        }

        "bzero" => {
            let (mut buf, n) = (args.bytes("buf")?, args.usize("n")?);
            args.check_len(buf.len(), 0, n)?;
            string::bzero(&mut buf, n);
            json!(buf)
        }
        "memset" => {
            let (mut buf, n) = (args.bytes("buf")?, args.usize("n")?);
            args.check_len(buf.len(), 0, n)?;
            string::memset(&mut buf, args.byte("c")?, n);
            json!(buf)
        }
        "memcpy" => memcpy(&args, mode)?,
        "memmove" => {
            let (mut buf, src, dest, n) = args.copy_request()?;
            string::memmove_within(&mut buf, src, dest, n);
            json!(buf)
        }
        "memchr" => {
            let (buf, n) = (args.bytes("buf")?, args.usize("n")?);
            args.check_len(buf.len(), 0, n)?;
            index(string::memchr(&buf, args.byte("c")?, n))
        }
        "memcmp" => {
            let (a, b, n) = (args.bytes("a")?, args.bytes("b")?, args.usize("n")?);
            args.check_len(a.len().min(b.len()), 0, n)?;
            json!(string::memcmp(&a, &b, n))
        }
        "calloc" => match string::calloc(args.usize("count")?, args.usize("size")?) {
            Ok(buf) => json!({ "len": buf.len(), "zeroed": buf.iter().all(|&b| b == 0) }),
            Err(e) => json!({ "error": e.to_string() }),
        },

        "putchar_fd" => {
            let c = args.byte("c")?;
            captured(|out| io::put_char_fd(out, c))
        }
        "putstr_fd" => {
            let s = args.bytes("s")?;
            captured(|out| io::put_str_fd(out, &s))
        }
        "putendl_fd" => {
            let s = args.bytes("s")?;
            captured(|out| io::put_endl_fd(out, &s))
        }
        "putnbr_fd" => {
            let n = args.int("n")?;
            captured(|out| io::put_nbr_fd(out, n))
        }

        "lstnew" => json!([args.string("content")?]),
        "lstadd_front" | "lstadd_back" => {
            let mut lst = args.list("list")?;
            if let Some(chain) = chain_from(args.strings("new")?) {
                if function == "lstadd_front" {
                    lst.push_front(chain);
                } else {
                    lst.push_back(chain);
                }
            }
            list_value(&lst)
        }
        "lstsize" => json!(args.list("list")?.len()),
        "lstlast" => match args.list("list")?.last() {
            Some(node) => json!(node.content),
            None => Value::Null,
        },
        "lstiter" => {
            let mut lst = args.list("list")?;
            let op = args.op()?;
            lst.for_each(|s| *s = op.apply_str(s));
            list_value(&lst)
        }
        "lstdelone" => {
            let mut deleted = Vec::new();
            let rest = chain_from(args.strings("list")?)
                .and_then(|head| list::delone(head, |c| deleted.push(c)));
            let rest: List<String> = std::iter::successors(rest.as_deref(), |n| n.next.as_deref())
                .map(|n| n.content.clone())
                .collect();
            json!({ "deleted": deleted, "rest": list_value(&rest) })
        }
        "lstclear" => {
            let mut lst = args.list("list")?;
            let mut deleted = Vec::new();
            lst.clear(|c| deleted.push(c));
            json!({ "deleted": deleted, "empty": lst.is_empty() })
        }
        "lstmap" => lstmap(&args)?,

        _ => return Err(HarnessError::UnknownFunction(function.to_string())),
    };
    Ok(out)
}

// ---------------------------------------------------------------------------
// Argument access
// ---------------------------------------------------------------------------

struct Args<'a> {
    function: &'a str,
    inputs: &'a Value,
}

impl Args<'_> {
    fn bad(&self, message: impl ToString) -> HarnessError {
        HarnessError::bad_input(self.function, message.to_string())
    }

    fn get(&self, key: &str) -> Result<&Value, HarnessError> {
        self.inputs
            .get(key)
            .ok_or_else(|| self.bad(format!("missing input '{key}'")))
    }

    fn bytes(&self, key: &str) -> Result<Vec<u8>, HarnessError> {
        match self.get(key)? {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            Value::Array(items) => items
                .iter()
                .map(|v| {
                    v.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| self.bad(format!("'{key}' holds a non-byte value {v}")))
                })
                .collect(),
            other => Err(self.bad(format!("'{key}' must be a string or byte array, got {other}"))),
        }
    }

    fn string(&self, key: &str) -> Result<String, HarnessError> {
        self.get(key)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.bad(format!("'{key}' must be a string")))
    }

    fn strings(&self, key: &str) -> Result<Vec<String>, HarnessError> {
        let items = self
            .get(key)?
            .as_array()
            .ok_or_else(|| self.bad(format!("'{key}' must be an array of strings")))?;
        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| self.bad(format!("'{key}' holds a non-string {v}")))
            })
            .collect()
    }

    fn list(&self, key: &str) -> Result<List<String>, HarnessError> {
        Ok(self.strings(key)?.into_iter().collect())
    }

    fn usize(&self, key: &str) -> Result<usize, HarnessError> {
        self.get(key)?
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| self.bad(format!("'{key}' must be a non-negative integer")))
    }

    fn int(&self, key: &str) -> Result<i32, HarnessError> {
        self.get(key)?
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| self.bad(format!("'{key}' must be a 32-bit integer")))
    }

    /// A C `int` character argument, converted to `unsigned char` the way
    /// the byte-oriented functions do.
    fn byte(&self, key: &str) -> Result<u8, HarnessError> {
        match self.get(key)? {
            Value::String(s) if s.len() == 1 => Ok(s.as_bytes()[0]),
            Value::Number(n) => n
                .as_i64()
                .map(|c| c as u8)
                .ok_or_else(|| self.bad(format!("'{key}' must be an integer"))),
            other => Err(self.bad(format!("'{key}' must be one character, got {other}"))),
        }
    }

    /// Raw `int` for the ctype family, which must see out-of-range values.
    fn raw_char(&self) -> Result<i64, HarnessError> {
        match self.get("c")? {
            Value::String(s) if s.len() == 1 => Ok(i64::from(s.as_bytes()[0])),
            v => v
                .as_i64()
                .ok_or_else(|| self.bad("'c' must be an integer or one character")),
        }
    }

    fn op(&self) -> Result<Op, HarnessError> {
        match self.string("op")?.as_str() {
            "upper" => Ok(Op::Upper),
            "lower" => Ok(Op::Lower),
            "index" => Ok(Op::Index),
            other => Err(self.bad(format!("unknown op '{other}'"))),
        }
    }

    fn check_len(&self, len: usize, offset: usize, n: usize) -> Result<(), HarnessError> {
        match offset.checked_add(n) {
            Some(end) if end <= len => Ok(()),
            _ => Err(self.bad(format!("range {offset}+{n} exceeds buffer of {len} bytes"))),
        }
    }

    /// `{buf, src, dest, n}` for in-buffer copies.
    fn copy_request(&self) -> Result<(Vec<u8>, usize, usize, usize), HarnessError> {
        let buf = self.bytes("buf")?;
        let (src, dest, n) = (self.usize("src")?, self.usize("dest")?, self.usize("n")?);
        self.check_len(buf.len(), src, n)?;
        self.check_len(buf.len(), dest, n)?;
        Ok((buf, src, dest, n))
    }
}

/// Named stand-ins for the C callbacks of strmapi/striteri/lstiter/lstmap.
#[derive(Debug, Clone, Copy)]
enum Op {
    Upper,
    Lower,
    /// Replaces each byte with the last decimal digit of its index.
    Index,
}

impl Op {
    fn apply(self, index: u32, c: u8) -> u8 {
        match self {
            Self::Upper => ctype::to_upper(c),
            Self::Lower => ctype::to_lower(c),
            Self::Index => b'0' + (index % 10) as u8,
        }
    }

    fn apply_str(self, s: &str) -> String {
        let bytes: Vec<u8> = s
            .bytes()
            .enumerate()
            .map(|(i, c)| self.apply(i as u32, c))
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn text(bytes: &[u8]) -> Value {
    Value::String(String::from_utf8_lossy(bytes).into_owned())
}

fn index(found: Option<usize>) -> Value {
    found.map_or(Value::Null, |i| json!(i))
}

fn list_value(lst: &List<String>) -> Value {
    json!(lst.iter().collect::<Vec<_>>())
}

fn chain_from(values: Vec<String>) -> Option<Box<Node<String>>> {
    let mut chain: List<String> = values.into_iter().collect();
    let mut head = chain.pop_front()?;
    let mut link = &mut head.next;
    while let Some(node) = chain.pop_front() {
        link = &mut link.insert(node).next;
    }
    Some(head)
}

/// Run an fd writer against an in-memory sink and render what it wrote.
fn captured<F>(write: F) -> Value
where
    F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
{
    let mut out = Vec::new();
    // Writes into a Vec cannot fail.
    let _ = write(&mut out);
    text(&out)
}

// ---------------------------------------------------------------------------
// Per-function adapters
// ---------------------------------------------------------------------------

fn classify(args: &Args<'_>, f: fn(u8) -> bool) -> Result<Value, HarnessError> {
    let c = args.raw_char()?;
    Ok(json!(u8::try_from(c).is_ok_and(f) as i32))
}

fn convert(args: &Args<'_>, f: fn(u8) -> u8) -> Result<Value, HarnessError> {
    let c = args.raw_char()?;
    Ok(match u8::try_from(c) {
        Ok(byte) => json!(f(byte)),
        Err(_) => json!(c),
    })
}

/// Destination buffer of `size` bytes (at least the given contents plus NUL).
fn dst_buffer(initial: &[u8], size: usize) -> Vec<u8> {
    let mut buf = initial.to_vec();
    buf.push(0);
    if buf.len() < size {
        buf.resize(size, 0);
    }
    buf
}

fn strlcpy(args: &Args<'_>) -> Result<Value, HarnessError> {
    let (src, size) = (args.bytes("src")?, args.usize("size")?);
    let mut dst = vec![0u8; size];
    let ret = string::strlcpy(&mut dst, &src);
    Ok(json!({ "ret": ret, "dst": text(&dst[..string::strlen(&dst)]) }))
}

fn strlcat(args: &Args<'_>) -> Result<Value, HarnessError> {
    let (initial, src, size) = (args.bytes("dst")?, args.bytes("src")?, args.usize("size")?);
    let mut buf = dst_buffer(&initial, size);
    let ret = string::strlcat(&mut buf[..size], &src);
    Ok(json!({ "ret": ret, "dst": text(&buf[..string::strlen(&buf)]) }))
}

/// In-buffer copy. Overlap is undefined for memcpy: strict mode reports
/// [`UNDEFINED`], hardened mode records the upgrade and moves instead.
fn memcpy(args: &Args<'_>, mode: SafetyLevel) -> Result<Value, HarnessError> {
    let (mut buf, src, dest, n) = args.copy_request()?;
    if src == dest || n == 0 {
        return Ok(json!(buf));
    }
    if ranges_overlap(src, dest, n) {
        if !mode.heals_enabled() {
            return Ok(json!(UNDEFINED));
        }
        let policy = global_healing_policy();
        let action = policy.heal_copy_overlap(dest, src, n);
        policy.record("ft_memcpy", action);
        string::memmove_within(&mut buf, src, dest, n);
        return Ok(json!(buf));
    }

    if dest < src {
        let (lo, hi) = buf.split_at_mut(src);
        string::memcpy(&mut lo[dest..dest + n], &hi[..n], n);
    } else {
        let (lo, hi) = buf.split_at_mut(dest);
        string::memcpy(&mut hi[..n], &lo[src..src + n], n);
    }
    Ok(json!(buf))
}

/// `{list, op, fail_at?}`: map with the named op; `fail_at` makes the
/// callback fail on that index so cleanup can be observed.
fn lstmap(args: &Args<'_>) -> Result<Value, HarnessError> {
    let lst = args.list("list")?;
    let op = args.op()?;
    let fail_at = match args.inputs.get("fail_at") {
        Some(_) => Some(args.usize("fail_at")?),
        None => None,
    };

    let mut released = Vec::new();
    let mut calls = 0usize;
    let mapped = lst.map(
        |s| {
            let i = calls;
            calls += 1;
            (Some(i) != fail_at).then(|| op.apply_str(s))
        },
        |s| released.push(s),
    );
    Ok(json!({
        "result": mapped.as_ref().map(list_value),
        "released": released,
        "source": list_value(&lst),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(function: &str, inputs: Value) -> Value {
        execute_fixture_case(function, &inputs, "strict").expect("case should execute")
    }

    #[test]
    fn string_functions_render_text_and_offsets() {
        assert_eq!(run("strlen", json!({"s": "hello"})), json!(5));
        assert_eq!(run("itoa", json!({"n": i32::MIN})), json!("-2147483648"));
        assert_eq!(run("strchr", json!({"s": "banana", "c": "n"})), json!(2));
        assert_eq!(run("strrchr", json!({"s": "banana", "c": 0})), json!(6));
        assert_eq!(run("strchr", json!({"s": "banana", "c": "z"})), Value::Null);
        assert_eq!(
            run("split", json!({"s": "  a  b c ", "c": " "})),
            json!(["a", "b", "c"])
        );
        assert_eq!(
            run("strlcpy", json!({"src": "hello", "size": 3})),
            json!({"ret": 5, "dst": "he"})
        );
    }

    #[test]
    fn byte_buffers_accept_arrays() {
        assert_eq!(
            run("memset", json!({"buf": [1, 2, 3, 4], "c": 0, "n": 2})),
            json!([0, 0, 3, 4])
        );
    }

    #[test]
    fn memcpy_overlap_depends_on_mode() {
        let inputs = json!({"buf": "123456", "src": 0, "dest": 2, "n": 4});
        assert_eq!(run("memcpy", inputs.clone()), json!(UNDEFINED));
        let healed = execute_fixture_case("memcpy", &inputs, "hardened").expect("hardened run");
        assert_eq!(healed, json!(b"121234".to_vec()));
    }

    #[test]
    fn lstmap_failure_reports_released_contents() {
        let out = run(
            "lstmap",
            json!({"list": ["a", "b", "c"], "op": "upper", "fail_at": 2}),
        );
        assert_eq!(out["result"], Value::Null);
        assert_eq!(out["released"], json!(["A", "B"]));
        assert_eq!(out["source"], json!(["a", "b", "c"]));
    }

    #[test]
    fn lstdelone_keeps_successor_chain() {
        let out = run("lstdelone", json!({"list": ["tmp", "keep", "also"]}));
        assert_eq!(out["deleted"], json!(["tmp"]));
        assert_eq!(out["rest"], json!(["keep", "also"]));

        let single = run("lstdelone", json!({"list": ["only"]}));
        assert_eq!(single, json!({"deleted": ["only"], "rest": []}));
    }

    #[test]
    fn errors_are_typed() {
        assert!(matches!(
            execute_fixture_case("strcpy", &json!({}), "strict"),
            Err(HarnessError::UnknownFunction(_))
        ));
        assert!(matches!(
            execute_fixture_case("strlen", &json!({}), "strict"),
            Err(HarnessError::BadInput { .. })
        ));
        assert!(matches!(
            execute_fixture_case("memmove", &json!({"buf": "ab", "src": 0, "dest": 1, "n": 2}), "strict"),
            Err(HarnessError::BadInput { .. })
        ));
    }
}
