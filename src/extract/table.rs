// File: ./src/extract/table.rs
// Row extraction for `lazy resource list` tables.
use crate::model::ResourceRow;
use once_cell::sync::Lazy;
use regex::Regex;

// Box-drawing or plain ASCII pipes as cell borders, one style per row, so a
// `|` inside a box-drawn name stays part of the name.
static ROW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"│\s*(?P<box_id>\d+)\s*│\s*(?P<box_name>.*?)\s*│|\|\s*(?P<id>\d+)\s*\|\s*(?P<name>.*?)\s*\|",
    )
    .expect("row regex")
});

/// Parses one table line into an id/name pair. Header and rule lines yield `None`.
pub fn parse_row(line: &str) -> Option<ResourceRow> {
    let caps = ROW_RE.captures(line)?;
    let (id, name) = match (caps.name("box_id"), caps.name("box_name")) {
        (Some(id), Some(name)) => (id, name),
        _ => (caps.name("id")?, caps.name("name")?),
    };
    Some(ResourceRow::new(id.as_str(), name.as_str()))
}

pub fn rows(text: &str) -> impl Iterator<Item = ResourceRow> + '_ {
    text.lines().filter_map(parse_row)
}

/// Id of the first row whose name is exactly `target`.
pub fn find_resource_id(text: &str, target: &str) -> Option<String> {
    rows(text)
        .find(|row| row.matches(target))
        .map(|row| row.identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_box_row() {
        assert_eq!(
            parse_row("│ 12 │ notes.txt      │ 2.1 KB │ 2024-01-01 │"),
            Some(ResourceRow::new("12", "notes.txt"))
        );
    }

    #[test]
    fn test_header_and_rules_are_skipped() {
        assert_eq!(parse_row("│ ID │ 文件名 │ 大小 │"), None);
        assert_eq!(parse_row("├────┼────────┼──────┤"), None);
        assert_eq!(parse_row(""), None);
    }

    #[test]
    fn test_ascii_pipe_inside_box_row() {
        assert_eq!(
            parse_row("│ 1 │ a|b.txt │ 2 KB │"),
            Some(ResourceRow::new("1", "a|b.txt"))
        );
    }

    #[test]
    fn test_name_with_inner_spaces() {
        assert_eq!(
            parse_row("| 3 | final report v2.pdf   | x |"),
            Some(ResourceRow::new("3", "final report v2.pdf"))
        );
    }
}
