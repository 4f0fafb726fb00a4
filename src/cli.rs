// File: ./src/cli.rs
//! Command-line argument handling and help text.
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Help,
    /// Print parsed assignments instead of starting the TUI.
    List { json: bool },
    /// Print the resource id of an uploaded file.
    ResourceId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub root: Option<PathBuf>,
}

/// Parses everything after the binary name.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut root = None;
    let mut positional = Vec::new();
    let mut json = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    command: Command::Help,
                    root,
                });
            }
            "-r" | "--root" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a path", arg))?;
                root = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(anyhow::anyhow!("Unknown option: {}", arg));
            }
            _ => positional.push(arg),
        }
    }

    let command = match positional.first().map(String::as_str) {
        None => Command::Tui,
        Some("list") => Command::List { json },
        Some("resource-id") => {
            let name = positional
                .get(1)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("resource-id requires a file name"))?;
            Command::ResourceId(name)
        }
        Some(other) => return Err(anyhow::anyhow!("Unknown command: {}", other)),
    };

    Ok(CliArgs { command, root })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Lazyhw v{} - Pending assignments at a glance (TUI for the `lazy` course CLI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} list [--json]", binary_name);
    println!("    {} resource-id <file name>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    --json                With `list`, print the assignments as JSON.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    list                  Print pending assignments and exit.");
    println!("    resource-id <name>    Print the id of an uploaded file (exit 1 if missing).");
    println!();
    println!("KEYBINDINGS:");
    println!("    j/k               Move selection");
    println!("    v                 View assignment details");
    println!("    s                 Pick a file and submit it to the selected assignment");
    println!("    r                 Reload assignments");
    println!("    ?                 Toggle help");
    println!("    q                 Quit");
    println!();
    println!("CONFIG:");
    println!("    lazy_command, command_timeout_secs, start_dir, show_hidden_files,");
    println!("    split_countdown, urgent_hours, log_level");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_starts_tui() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.command, Command::Tui);
        assert_eq!(parsed.root, None);
    }

    #[test]
    fn test_list_json_with_root() {
        let parsed = args(&["--root", "/tmp/x", "list", "--json"]).unwrap();
        assert_eq!(parsed.command, Command::List { json: true });
        assert_eq!(parsed.root, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_resource_id() {
        assert_eq!(
            args(&["resource-id", "report.pdf"]).unwrap().command,
            Command::ResourceId("report.pdf".into())
        );
        assert!(args(&["resource-id"]).is_err());
    }

    #[test]
    fn test_errors() {
        assert!(args(&["--root"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["frobnicate"]).is_err());
        assert_eq!(args(&["-h"]).unwrap().command, Command::Help);
    }
}
