// Defines actions and events exchanged between the UI loop and the CLI actor.
use crate::model::AssignmentRecord;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Refresh,
    ViewAssignment(String),
    Submit {
        assignment_id: String,
        path: PathBuf,
    },
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    AssignmentsLoaded(Vec<AssignmentRecord>),
    DetailLoaded { assignment_id: String, content: String },
    Submitted {
        assignment_id: String,
        resource_id: String,
        file_name: String,
    },
    Error(String),
    Status(String),
}
