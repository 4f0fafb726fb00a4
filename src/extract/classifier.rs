// File: ./src/extract/classifier.rs
//! Ordered field rules for the interior lines of an assignment card.
//!
//! Each rule is tried in priority order and the first one that matches wins,
//! so a line never sets more than one field. The order is:
//!
//! 1. title with a bracketed `[ID: n]` marker
//! 2. deadline (`截止时间: ...`)
//! 3. link (anything containing `https://`)
//! 4. course name followed by a trailing course number
//!
//! The course rule is deliberately last: it is loose enough to match a title
//! line that lost its marker.
use once_cell::sync::Lazy;
use regex::Regex;
use strum::Display;

pub const DEADLINE_LABEL: &str = "截止时间";
pub const LINK_PREFIX: &str = "https://";

static TITLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.*?)\s*\[ID:\s*(\d+)\]").expect("title regex"));
static DEADLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"截止时间\s*[:：]\s*(.*)").expect("deadline regex"));
static DEADLINE_COUNTDOWN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"截止时间\s*[:：]\s*(.*?)\s*[(（]([^()（）]*)[)）]\s*$").expect("countdown regex")
});
static COURSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(.*?)\s+(\d+)\s*$").expect("course regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FieldKind {
    TitleId,
    Deadline,
    Link,
    Course,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    TitleId {
        title: String,
        identifier: String,
    },
    Deadline {
        text: String,
        remaining: Option<String>,
    },
    Link(String),
    Course {
        name: String,
        identifier: String,
    },
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::TitleId { .. } => FieldKind::TitleId,
            Field::Deadline { .. } => FieldKind::Deadline,
            Field::Link(_) => FieldKind::Link,
            Field::Course { .. } => FieldKind::Course,
        }
    }
}

/// How the deadline line is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadlineRule {
    /// Everything after the label is the deadline; no countdown is extracted.
    #[default]
    Plain,
    /// A trailing `(...)` group is split off into the remaining-time text.
    /// Lines without one fall back to `Plain`.
    WithCountdown,
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: FieldKind,
    matcher: fn(&str) -> Option<Field>,
}

impl Rule {
    pub fn apply(&self, content: &str) -> Option<Field> {
        (self.matcher)(content)
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DeadlineRule::Plain)
    }
}

impl Classifier {
    pub fn new(deadline: DeadlineRule) -> Self {
        let deadline_matcher: fn(&str) -> Option<Field> = match deadline {
            DeadlineRule::Plain => match_deadline,
            DeadlineRule::WithCountdown => match_deadline_with_countdown,
        };
        Self {
            rules: vec![
                Rule {
                    kind: FieldKind::TitleId,
                    matcher: match_title_id,
                },
                Rule {
                    kind: FieldKind::Deadline,
                    matcher: deadline_matcher,
                },
                Rule {
                    kind: FieldKind::Link,
                    matcher: match_link,
                },
                Rule {
                    kind: FieldKind::Course,
                    matcher: match_course,
                },
            ],
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs the rules in order and returns the first field that matched.
    pub fn classify(&self, content: &str) -> Option<Field> {
        self.rules.iter().find_map(|rule| rule.apply(content))
    }
}

fn match_title_id(content: &str) -> Option<Field> {
    let caps = TITLE_ID_RE.captures(content)?;
    Some(Field::TitleId {
        title: caps[1].trim().to_string(),
        identifier: caps[2].to_string(),
    })
}

fn match_deadline(content: &str) -> Option<Field> {
    let caps = DEADLINE_RE.captures(content)?;
    Some(Field::Deadline {
        text: caps[1].trim().to_string(),
        remaining: None,
    })
}

fn match_deadline_with_countdown(content: &str) -> Option<Field> {
    match DEADLINE_COUNTDOWN_RE.captures(content) {
        Some(caps) => Some(Field::Deadline {
            text: caps[1].trim().to_string(),
            remaining: Some(caps[2].trim().to_string()).filter(|r| !r.is_empty()),
        }),
        None => match_deadline(content),
    }
}

fn match_link(content: &str) -> Option<Field> {
    content
        .contains(LINK_PREFIX)
        .then(|| Field::Link(content.to_string()))
}

fn match_course(content: &str) -> Option<Field> {
    let caps = COURSE_RE.captures(content)?;
    Some(Field::Course {
        name: caps[1].trim().to_string(),
        identifier: caps[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let kinds: Vec<_> = Classifier::default().rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::TitleId,
                FieldKind::Deadline,
                FieldKind::Link,
                FieldKind::Course
            ]
        );
    }

    #[test]
    fn test_title_id() {
        assert_eq!(
            match_title_id("Essay 1 [ID: 42]"),
            Some(Field::TitleId {
                title: "Essay 1".into(),
                identifier: "42".into()
            })
        );
        assert_eq!(
            match_title_id("Lab report [ID:7] (draft)"),
            Some(Field::TitleId {
                title: "Lab report".into(),
                identifier: "7".into()
            })
        );
        assert_eq!(match_title_id("Essay [ID: x]"), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let classifier = Classifier::default();
        let field = classifier
            .classify("Read https://example.com/ch3 [ID: 9]")
            .unwrap();
        assert_eq!(field.kind(), FieldKind::TitleId);

        let field = classifier
            .classify("截止时间: see https://example.com/due")
            .unwrap();
        assert_eq!(field.kind(), FieldKind::Deadline);

        let field = classifier.classify("https://example.com/a 2").unwrap();
        assert_eq!(field.kind(), FieldKind::Link);
    }

    #[test]
    fn test_plain_deadline_keeps_countdown_in_text() {
        assert_eq!(
            match_deadline("截止时间: 2024-01-01 23:59 (剩余 2 天)"),
            Some(Field::Deadline {
                text: "2024-01-01 23:59 (剩余 2 天)".into(),
                remaining: None
            })
        );
    }

    #[test]
    fn test_deadline_full_width_colon() {
        assert_eq!(
            match_deadline("截止时间：2024-01-01"),
            Some(Field::Deadline {
                text: "2024-01-01".into(),
                remaining: None
            })
        );
    }

    #[test]
    fn test_countdown_deadline() {
        assert_eq!(
            match_deadline_with_countdown("截止时间: 2024-01-01 23:59 (剩余 2 天)"),
            Some(Field::Deadline {
                text: "2024-01-01 23:59".into(),
                remaining: Some("剩余 2 天".into())
            })
        );
        assert_eq!(
            match_deadline_with_countdown("截止时间: 2024-01-01"),
            Some(Field::Deadline {
                text: "2024-01-01".into(),
                remaining: None
            })
        );
    }

    #[test]
    fn test_link_takes_whole_line() {
        assert_eq!(
            match_link("链接: https://example.com/x"),
            Some(Field::Link("链接: https://example.com/x".into()))
        );
        assert_eq!(match_link("http://insecure.example"), None);
    }

    #[test]
    fn test_course() {
        assert_eq!(
            match_course("Algorithms 101"),
            Some(Field::Course {
                name: "Algorithms".into(),
                identifier: "101".into()
            })
        );
        assert_eq!(
            match_course("Data Structures   2024001"),
            Some(Field::Course {
                name: "Data Structures".into(),
                identifier: "2024001".into()
            })
        );
        assert_eq!(match_course("101"), None);
        assert_eq!(match_course("Algorithms"), None);
    }

    #[test]
    fn test_unmatched_line() {
        assert_eq!(Classifier::default().classify("状态: 未提交"), None);
    }
}
