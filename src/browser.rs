// File: ./src/browser.rs
// Directory listing behind the "pick a file to submit" dialog.
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const PARENT_LABEL: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Dir,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name; lossy for names that are not valid UTF-8.
    pub name: String,
    /// Name as stored on disk, used when joining paths.
    pub file_name: OsString,
    pub kind: EntryKind,
}

impl Entry {
    fn parent() -> Self {
        Self {
            name: PARENT_LABEL.to_string(),
            file_name: OsString::from(PARENT_LABEL),
            kind: EntryKind::Parent,
        }
    }

    fn listed(file_name: OsString, kind: EntryKind) -> Self {
        Self {
            name: file_name.to_string_lossy().into_owned(),
            file_name,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The browser changed directory.
    Moved,
    /// A regular file was chosen.
    Picked(PathBuf),
}

/// Listing order: `..`, then directories, then files, each group sorted by name.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    cwd: PathBuf,
    entries: Vec<Entry>,
    show_hidden: bool,
}

impl FileBrowser {
    /// Creates a browser at `start`. The listing is empty until `refresh` is called.
    pub fn new(start: PathBuf, show_hidden: bool) -> Self {
        Self {
            cwd: start,
            entries: vec![Entry::parent()],
            show_hidden,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn refresh(&mut self) -> Result<()> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let read = fs::read_dir(&self.cwd)
            .with_context(|| format!("Cannot read directory {}", self.cwd.display()))?;
        for entry in read.flatten() {
            let file_name = entry.file_name();
            if !self.show_hidden && file_name.as_encoded_bytes().starts_with(b".") {
                continue;
            }
            // Follows symlinks, so a link to a directory is browsable.
            if entry.path().is_dir() {
                dirs.push(Entry::listed(file_name, EntryKind::Dir));
            } else {
                files.push(Entry::listed(file_name, EntryKind::File));
            }
        }
        dirs.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        self.entries = std::iter::once(Entry::parent())
            .chain(dirs)
            .chain(files)
            .collect();
        Ok(())
    }

    /// Moves to the parent directory. At the filesystem root this only refreshes.
    pub fn go_up(&mut self) -> Result<()> {
        if let Some(parent) = self.cwd.parent().map(Path::to_path_buf) {
            let previous = std::mem::replace(&mut self.cwd, parent);
            if let Err(e) = self.refresh() {
                self.cwd = previous;
                return Err(e);
            }
            return Ok(());
        }
        self.refresh()
    }

    /// Activates the entry at `index`: descends into directories, picks files.
    pub fn open(&mut self, index: usize) -> Result<Step> {
        let entry = self
            .entries
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No entry at index {}", index))?;

        match entry.kind {
            EntryKind::Parent => {
                self.go_up()?;
                Ok(Step::Moved)
            }
            EntryKind::Dir => {
                let target = self.cwd.join(&entry.file_name);
                let previous = std::mem::replace(&mut self.cwd, target);
                if let Err(e) = self.refresh() {
                    self.cwd = previous;
                    return Err(e);
                }
                Ok(Step::Moved)
            }
            EntryKind::File => Ok(Step::Picked(self.cwd.join(&entry.file_name))),
        }
    }

    pub fn toggle_hidden(&mut self) -> Result<()> {
        self.show_hidden = !self.show_hidden;
        self.refresh()
    }
}
