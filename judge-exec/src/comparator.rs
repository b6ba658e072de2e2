/// Compares expected vs. observed output the way the judge scores a case
/// (spec §4.3): trailing newlines stripped, line counts must match, and
/// each line's whitespace-separated tokens compared in order as raw bytes.
pub struct Comparator;

impl Comparator {
    /// `true` iff `expected` and `observed` match under the rules above.
    /// Reflexive (`matches(x, x)`) and symmetric (`matches(x, y) ==
    /// matches(y, x)`) for any input (spec §8).
    pub fn matches(expected: &[u8], observed: &[u8]) -> bool {
        let expected_lines = split_lines(strip_trailing_newline(expected));
        let observed_lines = split_lines(strip_trailing_newline(observed));

        if expected_lines.len() != observed_lines.len() {
            return false;
        }

        expected_lines
            .iter()
            .zip(observed_lines.iter())
            .all(|(a, b)| tokens(a) == tokens(b))
    }
}

fn strip_trailing_newline(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && bytes[end - 1] == b'\r' {
            end -= 1;
        }
    }
    &bytes[..end]
}

fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    if bytes.is_empty() {
        return Vec::new();
    }
    bytes.split(|&b| b == b'\n').collect()
}

fn tokens(line: &[u8]) -> Vec<&[u8]> {
    line.split(|b| b.is_ascii_whitespace()).filter(|t| !t.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whitespace_runs_are_normalized() {
        assert!(Comparator::matches(b"1 2 3\n", b" 1   2 3 \n"));
    }

    #[test]
    fn trailing_newline_is_ignored_but_interior_blank_lines_are_not() {
        assert!(Comparator::matches(b"a\nb", b"a\nb\n"));
        assert!(!Comparator::matches(b"a\n\nb", b"a\nb"));
    }

    #[test]
    fn every_trailing_newline_is_stripped_not_just_one() {
        assert!(Comparator::matches(b"Hello, World!\n", b"Hello, World!\n\n"));
        assert!(Comparator::matches(b"Hello, World!\n\n\n", b"Hello, World!"));
    }

    #[test]
    fn token_content_must_match_exactly() {
        assert!(!Comparator::matches(b"1 2 3\n", b"1 2 4\n"));
    }

    #[test]
    fn is_reflexive_and_symmetric() {
        let cases: &[(&[u8], &[u8])] = &[(b"hello world\n", b"hello\tworld\n"), (b"", b"\n"), (b"a b c", b"a  b c\n")];
        for (a, b) in cases {
            assert!(Comparator::matches(a, a));
            assert_eq!(Comparator::matches(a, b), Comparator::matches(b, a));
        }
    }

    #[test]
    fn empty_both_sides_match() {
        assert!(Comparator::matches(b"", b""));
    }
}
