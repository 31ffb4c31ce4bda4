use crate::error::SourceError;
use std::process::Command;

pub trait ReferenceLookup {
    /// Plain text of the named reference entry.
    fn lookup(&self, name: &str) -> Result<String, SourceError>;
}

/// Renders manual pages through the local `man` command.
#[derive(Debug, Clone, Default)]
pub struct ManPages;

impl ReferenceLookup for ManPages {
    fn lookup(&self, name: &str) -> Result<String, SourceError> {
        let out = Command::new("man")
            .arg(name)
            .env("MANPAGER", "cat")
            .env("PAGER", "cat")
            .env("MANWIDTH", "80")
            .output()?;
        if !out.status.success() {
            return Err(SourceError::Lookup {
                name: name.to_string(),
                reason: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        let text = strip_overstrike(&String::from_utf8_lossy(&out.stdout));
        if text.trim().is_empty() {
            return Err(SourceError::EmptyLookup(name.to_string()));
        }
        Ok(text)
    }
}

/// Drop backspace overstrikes (`X\bX` bold, `_\bX` underline), keeping the last character.
pub fn strip_overstrike(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\u{8}' {
            out.pop();
        } else {
            out.push(c);
        }
    }
    out
}
