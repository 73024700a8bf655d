/// Everything after the last `delimiter`, or all of `s` if it never occurs.
pub fn trim_left_to<'a>(s: &'a str, delimiter: &str) -> &'a str {
    match s.rsplit_once(delimiter) {
        Some((_, tail)) => tail,
        None => s,
    }
}

/// Everything before the first `delimiter`, or all of `s` if it never occurs.
pub fn trim_right_from<'a>(s: &'a str, delimiter: &str) -> &'a str {
    match s.split_once(delimiter) {
        Some((head, _)) => head,
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_left_to() {
        assert_eq!(trim_left_to("a/b/c", "/"), "c");
        assert_eq!(trim_left_to("abc", "/"), "abc");
        assert_eq!(trim_left_to("a/b/", "/"), "");
        assert_eq!(trim_left_to("key::value::x", "::"), "x");
    }

    #[test]
    fn test_trim_right_from() {
        assert_eq!(trim_right_from("a/b/c", "/"), "a");
        assert_eq!(trim_right_from("abc", "/"), "abc");
        assert_eq!(trim_right_from("/a", "/"), "");
        assert_eq!(trim_right_from("key::value::x", "::"), "key");
    }
}
