// File: ./src/model/resource.rs
/// One row of the `lazy resource list` table.
///
/// Rows are only ever looked at while resolving an uploaded file back to
/// its resource id, so nothing keeps them around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    pub identifier: String,
    pub name: String,
}

impl ResourceRow {
    pub fn new(identifier: impl Into<String>, name: &str) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.trim_end_matches(' ').to_string(),
        }
    }

    /// Byte-exact comparison against a filename. No case folding, no trimming of the target.
    pub fn matches(&self, target: &str) -> bool {
        self.name == target
    }
}
