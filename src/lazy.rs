// File: ./src/lazy.rs
//! Invocations of the external `lazy` course CLI.
//!
//! Every call runs the program directly with an argv vector (no shell), waits
//! for it to exit within the configured timeout, and returns its stdout with
//! terminal escapes removed. Parsing is left to `crate::extract`.
use crate::config::Config;
use crate::extract::{self, Classifier};
use crate::model::AssignmentRecord;
use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Argument vector for `lazy assignment submit <id> -f <resource id>`.
pub fn submission_args(assignment_id: &str, resource_id: &str) -> Vec<String> {
    vec![
        "assignment".to_string(),
        "submit".to_string(),
        assignment_id.to_string(),
        "-f".to_string(),
        resource_id.to_string(),
    ]
}

/// Result of a completed upload-and-submit round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub assignment_id: String,
    pub resource_id: String,
    pub file_name: String,
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct LazyCli {
    program: String,
    timeout: Duration,
    classifier: Classifier,
}

impl LazyCli {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
            classifier: Classifier::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lazy_command.clone(), config.command_timeout())
            .with_classifier(Classifier::new(config.deadline_rule()))
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs `lazy <args...>` and returns its cleaned stdout.
    ///
    /// A non-zero exit status is an error carrying the program's stderr.
    pub async fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let display = format!(
            "{} {}",
            self.program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        log::debug!("Running `{}`", display);

        let child = Command::new(&self.program)
            .args(args)
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start `{}`", self.program))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                anyhow::anyhow!("`{}` timed out after {}s", display, self.timeout.as_secs())
            })?
            .with_context(|| format!("Failed to wait for `{}`", display))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!("`{}` exited with {}: {}", display, output.status, stderr.trim());
            return Err(anyhow::anyhow!(
                "`{}` failed ({}): {}",
                display,
                output.status,
                stderr.trim()
            ));
        }

        Ok(extract::strip_ansi(&String::from_utf8_lossy(&output.stdout)))
    }

    pub async fn assignment_todo(&self) -> Result<Vec<AssignmentRecord>> {
        let raw = self.run(["assignment", "todo"]).await?;
        let records = extract::parse_assignments_with(&raw, &self.classifier);
        log::info!("Parsed {} pending assignments", records.len());
        Ok(records)
    }

    pub async fn assignment_view(&self, assignment_id: &str) -> Result<String> {
        self.run(["assignment", "view", assignment_id]).await
    }

    pub async fn resource_upload(&self, path: &Path) -> Result<String> {
        // Passed as an OsStr so non-UTF-8 names reach `lazy` unchanged.
        self.run([OsStr::new("resource"), OsStr::new("upload"), path.as_os_str()])
            .await
    }

    pub async fn resource_list(&self) -> Result<String> {
        self.run(["resource", "list"]).await
    }

    /// Looks a file name up in `lazy resource list`. `Ok(None)` means no row matched.
    pub async fn resolve_resource_id(&self, file_name: &str) -> Result<Option<String>> {
        let listing = self.resource_list().await?;
        Ok(extract::find_resource_id(&listing, file_name))
    }

    pub async fn assignment_submit(&self, assignment_id: &str, resource_id: &str) -> Result<String> {
        self.run(&submission_args(assignment_id, resource_id)).await
    }

    /// Uploads `path`, finds the new resource by file name, and submits it.
    ///
    /// The submission is never sent when the uploaded file cannot be found
    /// in the resource listing.
    pub async fn submit_file(&self, assignment_id: &str, path: &Path) -> Result<Submission> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))?;

        self.resource_upload(path)
            .await
            .with_context(|| format!("Uploading {}", path.display()))?;

        let resource_id = self
            .resolve_resource_id(&file_name)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Uploaded file '{}' not found in resource list", file_name)
            })?;
        log::info!("Resolved '{}' to resource {}", file_name, resource_id);

        let output = self
            .assignment_submit(assignment_id, &resource_id)
            .await
            .with_context(|| format!("Submitting resource {} to {}", resource_id, assignment_id))?;

        Ok(Submission {
            assignment_id: assignment_id.to_string(),
            resource_id,
            file_name,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_args() {
        assert_eq!(
            submission_args("42", "0017"),
            vec!["assignment", "submit", "42", "-f", "0017"]
        );
    }

    #[test]
    fn test_from_config_uses_countdown_rule() {
        let cfg = Config {
            split_countdown: true,
            ..Config::default()
        };
        let cli = LazyCli::from_config(&cfg);
        assert_eq!(cli.program(), "lazy");
        let field = cli.classifier.classify("截止时间: 2024-01-01 (1 天)");
        assert_eq!(
            field,
            Some(crate::extract::Field::Deadline {
                text: "2024-01-01".into(),
                remaining: Some("1 天".into())
            })
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let cli = LazyCli::new("lazyhw-definitely-not-installed", Duration::from_secs(5));
        let err = cli.resource_list().await.unwrap_err();
        assert!(err.to_string().contains("Failed to start"));
    }
}
