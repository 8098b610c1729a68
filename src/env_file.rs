//! Reading profile files and emitting their shell commands.
//!
//! Everything written to `out` is meant to be `eval`ed by the shell wrapper,
//! so diagnostics always go to the separate `err` writer.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::discovery::EXPORT_PREFIX;
use crate::error::Result;

/// Variables whose values name files that should exist
pub const CHECKED_PATH_VARS: [&str; 2] = ["AWS_CONFIG_FILE", "KUBECONFIG"];

/// Parse every `export KEY=VALUE` line, keeping file order
pub fn parse_exports(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix(EXPORT_PREFIX))
        .filter_map(parse_assignment)
        .collect()
}

fn parse_assignment(assignment: &str) -> Option<(String, String)> {
    let (key, value) = assignment.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), parse_value(value.trim())))
}

fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return raw[1..raw.len() - 1]
            .replace("\\n", "\n")
            .replace("\\\"", "\"");
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    match raw.find(" #") {
        Some(comment) => raw[..comment].trim_end().to_string(),
        None => raw.to_string(),
    }
}

/// Lines worth handing to the shell: trimmed, non-blank, not comments
pub fn shell_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references. Unknown variables
/// expand to nothing.
pub fn expand_path<F>(value: &str, home: Option<&Path>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let value = match (value.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{}", home.display(), rest)
        }
        _ => value.to_string(),
    };

    let mut expanded = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            expanded.push(c);
            continue;
        }

        let name: String = if chars.peek() == Some(&'{') {
            chars.next();
            chars.by_ref().take_while(|&c| c != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            name
        };

        if name.is_empty() {
            expanded.push('$');
        } else if let Some(value) = lookup(&name) {
            expanded.push_str(&value);
        }
    }
    expanded
}

/// Warnings for path variables that point at files which do not exist
pub fn path_warnings<F>(exports: &[(String, String)], home: Option<&Path>, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    CHECKED_PATH_VARS
        .iter()
        .filter_map(|var| {
            let (_, value) = exports.iter().find(|(key, _)| key == var)?;
            let path = expand_path(value, home, &lookup);
            (!Path::new(&path).exists()).then(|| format!("{} not found: {}", var, path))
        })
        .collect()
}

/// Emit a profile's shell commands to `out`, reporting missing config files
/// on `err` first
pub fn load_profile_file<W, E>(path: &Path, out: &mut W, err: &mut E) -> Result<()>
where
    W: Write,
    E: Write,
{
    let content = fs::read_to_string(path)?;
    let exports = parse_exports(&content);
    log::info!("📤 load_profile_file: {:?} exports {} variables", path, exports.len());

    let home = dirs::home_dir();
    let warnings = path_warnings(&exports, home.as_deref(), |name| std::env::var(name).ok());
    if !warnings.is_empty() {
        writeln!(err, "\n⚠️  Warnings:")?;
        for warning in &warnings {
            writeln!(err, "  - {}", warning)?;
        }
        writeln!(err)?;
    }

    for line in shell_lines(&content) {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
