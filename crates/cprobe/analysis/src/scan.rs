// CProbe
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Character-level scanning primitives shared by the analysis passes
//!
//! Every pass reasons about source text through the small vocabulary defined
//! here: word characters (`[A-Za-z0-9_]`), whitespace, and line terminators.
//! Matchers operate on `&[char]` and report positions as char indices.

/// Whether `c` is a word character (`[A-Za-z0-9_]`)
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `c` is whitespace, including the byte-order mark but not U+0085
pub fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Strip leading and trailing whitespace as defined by [`is_space`]
pub fn trim(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Strip leading whitespace as defined by [`is_space`]
pub fn trim_start(text: &str) -> &str {
    text.trim_start_matches(is_space)
}

/// Whether `c` terminates a line
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whether a word starts at `pos` (a word character not preceded by one)
pub fn is_word_start(chars: &[char], pos: usize) -> bool {
    pos < chars.len() && is_word_char(chars[pos]) && (pos == 0 || !is_word_char(chars[pos - 1]))
}

/// End of the run starting at `pos` whose characters satisfy `pred`
pub fn run_end(chars: &[char], pos: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = pos;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}

/// End of the word run starting at `pos`
pub fn word_end(chars: &[char], pos: usize) -> usize {
    run_end(chars, pos, is_word_char)
}

/// End of the whitespace run starting at `pos`
pub fn space_end(chars: &[char], pos: usize) -> usize {
    run_end(chars, pos, is_space)
}

/// Whether `chars[pos..]` starts with `literal`
pub fn starts_with_at(chars: &[char], pos: usize, literal: &[char]) -> bool {
    chars.len() >= pos + literal.len() && chars[pos..pos + literal.len()] == *literal
}

/// Whether `chars[pos..]` starts with the string `literal`
pub fn starts_with_str(chars: &[char], pos: usize, literal: &str) -> bool {
    literal.chars().enumerate().all(|(i, c)| chars.get(pos + i) == Some(&c))
}

/// Whether no word character follows `pos`
pub fn is_word_boundary_after(chars: &[char], pos: usize) -> bool {
    pos >= chars.len() || !is_word_char(chars[pos])
}

/// Collect a char range back into a `String`
pub fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Split source text into lines on `\n` only, keeping a trailing empty line
pub fn source_lines(text: &str) -> std::str::Split<'_, char> {
    text.split('\n')
}

/// Rewrite every non-overlapping match in `line`, scanning left to right.
///
/// `matcher` is tried at each position; on a hit it returns the end of the
/// match and its replacement, and scanning resumes at the end of the match.
pub fn replace_all<F>(line: &str, mut matcher: F) -> (String, usize)
where
    F: FnMut(&[char], usize) -> Option<(usize, String)>,
{
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::with_capacity(line.len());
    let mut replaced = 0;
    let mut pos = 0;

    while pos < chars.len() {
        match matcher(chars.as_slice(), pos) {
            Some((end, replacement)) if end > pos => {
                out.push_str(&replacement);
                replaced += 1;
                pos = end;
            }
            _ => {
                out.push(chars[pos]);
                pos += 1;
            }
        }
    }

    (out, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_word_start() {
        let line = chars("ab cd_1");
        assert!(is_word_start(&line, 0));
        assert!(!is_word_start(&line, 1));
        assert!(!is_word_start(&line, 2));
        assert!(is_word_start(&line, 3));
        assert_eq!(word_end(&line, 3), 7);
    }

    #[test]
    fn test_source_lines_keeps_trailing_empty_line() {
        let lines: Vec<&str> = source_lines("a\r\nb\n").collect();
        assert_eq!(lines, vec!["a\r", "b", ""]);
    }

    #[test]
    fn test_replace_all_is_non_overlapping() {
        let (out, count) = replace_all("aaaa", |chars, pos| {
            (starts_with_at(chars, pos, &['a', 'a'])).then(|| (pos + 2, "b".to_string()))
        });
        assert_eq!(out, "bb");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_trim_matches_space_class() {
        assert_eq!(trim("\u{feff} \tx = 1;\u{a0}\r"), "x = 1;");
        assert_eq!(trim_start("\u{feff}return x;"), "return x;");
        assert_eq!(trim("\u{85}x\u{85}"), "\u{85}x\u{85}");
        assert!(!is_space('\u{85}'));
        assert!(is_space('\u{3000}'));
    }

    #[test]
    fn test_boundary_after() {
        let line = chars("x0;");
        assert!(!is_word_boundary_after(&line, 1));
        assert!(is_word_boundary_after(&line, 2));
        assert!(is_word_boundary_after(&line, 3));
    }
}
