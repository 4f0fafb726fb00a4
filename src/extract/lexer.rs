// File: ./src/extract/lexer.rs
// Splits boxed `lazy` output into card boundaries and interior content.

pub const CARD_OPEN: &str = "╭";
pub const CARD_CLOSE: &str = "╰";
pub const SIDE_BORDER: char = '│';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLine<'a> {
    Open,
    Close,
    /// Trimmed text between the outermost side borders. Never empty.
    Content(&'a str),
}

/// Classifies a single raw line. Returns `None` for blank lines, lines without
/// two side borders, and bordered lines with nothing inside them.
pub fn lex_line(line: &str) -> Option<CardLine<'_>> {
    if line.contains(CARD_OPEN) {
        return Some(CardLine::Open);
    }
    if line.contains(CARD_CLOSE) {
        return Some(CardLine::Close);
    }

    let first = line.find(SIDE_BORDER)?;
    let last = line.rfind(SIDE_BORDER)?;
    if first == last {
        return None;
    }

    let content = line[first + SIDE_BORDER.len_utf8()..last].trim();
    if content.is_empty() {
        None
    } else {
        Some(CardLine::Content(content))
    }
}

/// Lazily lexes every line of a blob, skipping the ones `lex_line` rejects.
pub fn lex(text: &str) -> impl Iterator<Item = CardLine<'_>> {
    text.lines().filter_map(lex_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borders() {
        assert_eq!(lex_line("╭──────────╮"), Some(CardLine::Open));
        assert_eq!(lex_line("  ╰──────────╯  "), Some(CardLine::Close));
    }

    #[test]
    fn test_content_is_trimmed() {
        assert_eq!(
            lex_line("│   Essay 1 [ID: 42]      │"),
            Some(CardLine::Content("Essay 1 [ID: 42]"))
        );
    }

    #[test]
    fn test_content_spans_first_to_last_border() {
        assert_eq!(
            lex_line("│ a │ b │"),
            Some(CardLine::Content("a │ b"))
        );
    }

    #[test]
    fn test_rejected_lines() {
        assert_eq!(lex_line(""), None);
        assert_eq!(lex_line("plain text"), None);
        assert_eq!(lex_line("│ only one border"), None);
        assert_eq!(lex_line("│          │"), None);
    }

    #[test]
    fn test_lex_skips_noise() {
        let text = "header\n╭─╮\n│ x │\n\n│ │\n╰─╯\nfooter";
        let lines: Vec<_> = lex(text).collect();
        assert_eq!(
            lines,
            vec![CardLine::Open, CardLine::Content("x"), CardLine::Close]
        );
    }
}
