// Utilities for quoted strings in DBC files.
//
// These helpers support escaped quotes (\") and multi-line quoted strings,
// which are common in CM_ comments or attribute values.

// Count unescaped double quotes in a string.
// A quote is considered escaped if immediately preceded by an odd number of backslashes.
pub(crate) fn count_unescaped_quotes(s: &str) -> usize {
    let mut count = 0usize;
    let mut backslashes = 0usize;
    for ch in s.chars() {
        if ch == '\\' {
            backslashes += 1;
            continue;
        }
        if ch == '"' && backslashes % 2 == 0 {
            count += 1;
        }
        backslashes = 0;
    }
    count
}

// Return true if the string ends inside a quoted segment.
pub(crate) fn has_open_quoted_segment(s: &str) -> bool {
    count_unescaped_quotes(s) % 2 == 1
}

// Return true if the record carries its terminating ';' (outside quotes).
pub(crate) fn is_terminated(s: &str) -> bool {
    !has_open_quoted_segment(s) && s.trim_end().ends_with(';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_unescaped_quotes() {
        assert_eq!(count_unescaped_quotes("\"a\""), 2);
        assert_eq!(count_unescaped_quotes("\\\"a\\\""), 0);
        assert_eq!(count_unescaped_quotes("\"a\\\\\""), 2);
        assert!(!has_open_quoted_segment("before \"x\" after"));
        assert!(has_open_quoted_segment("before \"x without end"));
    }

    #[test]
    fn test_is_terminated() {
        assert!(is_terminated("VAL_ 1 S 0 \"Off\" ;"));
        assert!(!is_terminated("VAL_ 1 S 0 \"Off;"));
        assert!(!is_terminated("VAL_ 1 S 0 \"Off\""));
    }
}
