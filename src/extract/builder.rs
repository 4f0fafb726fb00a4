// File: ./src/extract/builder.rs
// Accumulates classified fields into assignment records, one card at a time.
use crate::extract::classifier::{Classifier, Field};
use crate::extract::lexer::CardLine;
use crate::model::AssignmentRecord;

/// The record for the card currently being read. Later fields overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct AssignmentDraft {
    record: AssignmentRecord,
}

impl AssignmentDraft {
    pub fn apply(&mut self, field: Field) {
        let rec = &mut self.record;
        match field {
            Field::TitleId { title, identifier } => {
                rec.title = title;
                rec.identifier = identifier;
            }
            Field::Deadline { text, remaining } => {
                rec.deadline_text = Some(text);
                rec.remaining_time_text = remaining;
            }
            Field::Link(link) => rec.link = Some(link),
            Field::Course { name, identifier } => {
                rec.course_name = Some(name);
                rec.course_identifier = Some(identifier);
            }
        }
    }

    /// Turns the draft into a record, or `None` when no identifier was seen.
    pub fn finish(self) -> Option<AssignmentRecord> {
        if self.record.identifier.is_empty() {
            None
        } else {
            Some(self.record)
        }
    }
}

/// Scan state threaded by value through one pass over a blob.
#[derive(Debug, Default)]
pub struct CardScan {
    draft: Option<AssignmentDraft>,
    records: Vec<AssignmentRecord>,
}

impl CardScan {
    pub fn step(mut self, line: CardLine<'_>, classifier: &Classifier) -> Self {
        match line {
            CardLine::Open => {
                if self.draft.is_some() {
                    log::debug!("Card opened before the previous one closed; dropping it");
                }
                self.draft = Some(AssignmentDraft::default());
            }
            CardLine::Close => match self.draft.take().map(AssignmentDraft::finish) {
                Some(Some(record)) => self.records.push(record),
                Some(None) => log::debug!("Discarding card without an assignment id"),
                None => {}
            },
            CardLine::Content(content) => {
                // Content outside a card has nothing to attach to.
                if let Some(draft) = self.draft.as_mut()
                    && let Some(field) = classifier.classify(content)
                {
                    log::trace!("{} <- {:?}", field.kind(), content);
                    draft.apply(field);
                }
            }
        }
        self
    }

    /// Completed records in input order. An unterminated trailing card is dropped.
    pub fn finish(self) -> Vec<AssignmentRecord> {
        if self.draft.is_some() {
            log::debug!("Input ended inside a card; dropping it");
        }
        self.records
    }
}
