//! Raw argument syntax: `name=value` splitting and the argument name grammar.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

/// Dot-separated segments; the first starts with a letter, later ones may be indices or keys.
static NAME_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*(\.[a-zA-Z0-9-]+)*$").expect("argument name grammar")
});

/// Split one raw argument at its first `=`.
///
/// An argument without `=` has an empty value.
///
/// ```rust
/// assert_eq!(argpath::split_arg("labels.env=prod=1"), ("labels.env", "prod=1"));
/// assert_eq!(argpath::split_arg("verbose"), ("verbose", ""));
/// ```
pub fn split_arg(arg: &str) -> (&str, &str) {
    arg.split_once('=').unwrap_or((arg, ""))
}

/// Split every raw argument, preserving order and duplicates.
pub fn split_args<S: AsRef<str>>(args: &[S]) -> Vec<(&str, &str)> {
    args.iter().map(|arg| split_arg(arg.as_ref())).collect()
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    NAME_GRAMMAR.is_match(name)
}

/// True when `name` is a UUID literal, which usually means an ID was passed without its key.
pub(crate) fn looks_like_uuid(name: &str) -> bool {
    Uuid::try_parse(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_order_and_duplicates() {
        let pairs = split_args(&["a.b=1", "c", "a.b=1", "d="]);
        assert_eq!(pairs, vec![("a.b", "1"), ("c", ""), ("a.b", "1"), ("d", "")]);
    }

    #[test]
    fn name_grammar() {
        for ok in ["name", "tags.0", "root-volume.size", "Labels.Env", "m.k-1.x"] {
            assert!(is_valid_name(ok), "`{ok}` should be valid");
        }
        for bad in ["", "0", "-name", "a..b", "a.", ".a", "a b", "a_b", "héllo"] {
            assert!(!is_valid_name(bad), "`{bad}` should be invalid");
        }
    }

    #[test]
    fn uuid_detection() {
        assert!(looks_like_uuid("11111111-1111-1111-1111-111111111111"));
        assert!(!looks_like_uuid("1111-2222"));
        assert!(!looks_like_uuid("name"));
    }
}
