//! Helper macros for ABI entry points.

/// Return `$default` from the enclosing `ft_*` function if any of the given
/// pointers is null, reporting the short-circuit to the runtime policy.
///
/// ```ignore
/// return_if_null!("ft_strdup", std::ptr::null_mut(); s1);
/// return_if_null!("ft_putstr_fd", (); s);
/// ```
macro_rules! return_if_null {
    ($symbol:literal, $default:expr; $($ptr:expr),+ $(,)?) => {
        if $($ptr.is_null())||+ {
            $crate::runtime_policy::null_argument($symbol);
            return $default;
        }
    };
}

pub(crate) use return_if_null;
