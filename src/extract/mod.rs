// File: ./src/extract/mod.rs
//! Recovers typed records from the boxed, human-oriented output of `lazy`.
//!
//! Nothing in here returns an error. Lines that do not look like anything we
//! know are skipped, incomplete cards are dropped, and a missing table row is
//! `None`. The upstream format is not a contract, so the parser stays lenient.
pub mod builder;
pub mod classifier;
pub mod lexer;
pub mod table;

use crate::model::AssignmentRecord;
use builder::CardScan;
use once_cell::sync::Lazy;
use regex::Regex;

pub use classifier::{Classifier, DeadlineRule, Field, FieldKind};
pub use table::find_resource_id;

static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("ansi regex"));

/// Parses `lazy assignment todo` output with the default rules.
pub fn parse_assignments(text: &str) -> Vec<AssignmentRecord> {
    parse_assignments_with(text, &Classifier::default())
}

pub fn parse_assignments_with(text: &str, classifier: &Classifier) -> Vec<AssignmentRecord> {
    lexer::lex(text)
        .fold(CardScan::default(), |scan, line| scan.step(line, classifier))
        .finish()
}

/// Removes terminal color/style escapes so the lexer only sees glyphs and text.
pub fn strip_ansi(text: &str) -> String {
    ANSI_RE.replace_all(text, "").into_owned()
}
