// File: ./src/model/assignment.rs
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

const DEADLINE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// A pending assignment recovered from one card of `lazy assignment todo`.
///
/// `identifier` is always non-empty: cards without one never become records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub title: String,
    pub identifier: String,
    pub course_name: Option<String>,
    pub course_identifier: Option<String>,
    pub deadline_text: Option<String>,
    pub remaining_time_text: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Overdue,
    Soon,
    Normal,
    /// The deadline is missing or in a format we do not understand.
    Unknown,
}

impl AssignmentRecord {
    /// Best-effort parse of the raw deadline text.
    ///
    /// Anything after an opening parenthesis (a countdown such as `(2 days left)`)
    /// is ignored. Date-only deadlines are treated as the end of that day.
    pub fn deadline_at(&self) -> Option<NaiveDateTime> {
        let raw = self.deadline_text.as_deref()?;
        let raw = raw
            .split(['(', '（'])
            .next()
            .unwrap_or(raw)
            .trim();

        for fmt in DEADLINE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }

        ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .and_then(|d| d.and_hms_opt(23, 59, 59))
    }

    /// `urgent_hours` beyond the representable range means "always soon";
    /// negative values mean "never soon".
    pub fn urgency(&self, now: NaiveDateTime, urgent_hours: i64) -> Urgency {
        let window = TimeDelta::try_hours(urgent_hours.max(0)).unwrap_or(TimeDelta::MAX);
        match self.deadline_at() {
            None => Urgency::Unknown,
            Some(due) if due < now => Urgency::Overdue,
            Some(due) if due - now <= window => Urgency::Soon,
            Some(_) => Urgency::Normal,
        }
    }

    /// "Algorithms (101)", "Algorithms", or an empty string.
    pub fn course_label(&self) -> String {
        match (&self.course_name, &self.course_identifier) {
            (Some(name), Some(id)) => format!("{} ({})", name, id),
            (Some(name), None) => name.clone(),
            (None, Some(id)) => id.clone(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_deadline(text: &str) -> AssignmentRecord {
        AssignmentRecord {
            title: "Essay".into(),
            identifier: "1".into(),
            deadline_text: Some(text.to_string()),
            ..Default::default()
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_deadline_formats() {
        assert_eq!(
            with_deadline("2024-01-01 12:30").deadline_at(),
            Some(at("2024-01-01 12:30"))
        );
        assert_eq!(
            with_deadline("2024/01/01 12:30").deadline_at(),
            Some(at("2024-01-01 12:30"))
        );
        assert_eq!(
            with_deadline("2024-01-01").deadline_at(),
            NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(23, 59, 59))
        );
    }

    #[test]
    fn test_deadline_ignores_countdown_suffix() {
        assert_eq!(
            with_deadline("2024-01-01 12:30 (剩余 2 天)").deadline_at(),
            Some(at("2024-01-01 12:30"))
        );
    }

    #[test]
    fn test_unparseable_deadline_is_unknown() {
        let rec = with_deadline("next tuesday-ish");
        assert_eq!(rec.deadline_at(), None);
        assert_eq!(rec.urgency(at("2024-01-01 00:00"), 24), Urgency::Unknown);
        assert_eq!(
            AssignmentRecord::default().urgency(at("2024-01-01 00:00"), 24),
            Urgency::Unknown
        );
    }

    #[test]
    fn test_urgency_buckets() {
        let rec = with_deadline("2024-01-02 12:00");
        assert_eq!(rec.urgency(at("2024-01-03 00:00"), 24), Urgency::Overdue);
        assert_eq!(rec.urgency(at("2024-01-02 00:00"), 24), Urgency::Soon);
        assert_eq!(rec.urgency(at("2023-12-25 00:00"), 24), Urgency::Normal);
    }

    #[test]
    fn test_urgency_window_out_of_range() {
        let rec = with_deadline("2024-01-02 12:00");
        let now = at("2023-12-25 00:00");
        assert_eq!(rec.urgency(now, i64::MAX), Urgency::Soon);
        assert_eq!(rec.urgency(now, i64::MIN), Urgency::Normal);
        assert_eq!(rec.urgency(at("2024-01-03 00:00"), i64::MAX), Urgency::Overdue);
    }

    #[test]
    fn test_course_label() {
        let mut rec = AssignmentRecord::default();
        assert_eq!(rec.course_label(), "");
        rec.course_name = Some("Algorithms".into());
        assert_eq!(rec.course_label(), "Algorithms");
        rec.course_identifier = Some("101".into());
        assert_eq!(rec.course_label(), "Algorithms (101)");
    }
}
