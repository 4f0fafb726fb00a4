// File: ./src/model/mod.rs
pub mod assignment;
pub mod resource;

pub use assignment::{AssignmentRecord, Urgency};
pub use resource::ResourceRow;
