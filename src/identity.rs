//! User identity and the file key derived from it.
//!
//! An identity is a free-form (name, profession) pair. The key used to name
//! journal files is derived separately so that no user-supplied character ever
//! reaches the filesystem unescaped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Please enter your name to continue.")]
    MissingName,

    #[error("Please enter your profession to continue.")]
    MissingProfession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub profession: String,
}

impl Identity {
    pub fn new(name: &str, profession: &str) -> Result<Self, IdentityError> {
        let name = name.trim();
        let profession = profession.trim();
        if name.is_empty() {
            return Err(IdentityError::MissingName);
        }
        if profession.is_empty() {
            return Err(IdentityError::MissingProfession);
        }
        Ok(Self {
            name: name.to_string(),
            profession: profession.to_string(),
        })
    }

    /// `"{name} ({profession})"`, as shown in titles and messages.
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.profession)
    }

    /// Path-safe `{name}_{profession}` key.
    ///
    /// Distinct identities may map to the same key (`"a b"` and `"a_b"`);
    /// they then share one log.
    pub fn file_key(&self) -> String {
        format!(
            "{}_{}",
            escape_component(&self.name),
            escape_component(&self.profession)
        )
    }

    pub fn log_file_name(&self) -> String {
        format!("{}_reflection.txt", self.file_key())
    }

    pub fn document_file_name(&self) -> String {
        format!("{}_Reflection.pdf", self.file_key())
    }
}

/// Replace anything outside `[A-Za-z0-9_-]` with `_`.
fn escape_component(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_requires_both_fields() {
        assert_eq!(Identity::new("  ", "Dev"), Err(IdentityError::MissingName));
        assert_eq!(
            Identity::new("Sara", ""),
            Err(IdentityError::MissingProfession)
        );
        let id = Identity::new(" Sara ", " Web Developer ").unwrap();
        assert_eq!(id.name, "Sara");
        assert_eq!(id.profession, "Web Developer");
        assert_eq!(id.display(), "Sara (Web Developer)");
    }

    #[test]
    fn file_key_escapes_path_characters() {
        let id = Identity::new("../../etc", "root/passwd").unwrap();
        let key = id.file_key();
        assert_eq!(key, "______etc_root_passwd");
        assert!(!key.contains('/'));
        assert!(!key.contains('.'));
    }

    #[test]
    fn file_names_follow_key() {
        let id = Identity::new("Sara", "Web Developer").unwrap();
        assert_eq!(id.log_file_name(), "Sara_Web_Developer_reflection.txt");
        assert_eq!(id.document_file_name(), "Sara_Web_Developer_Reflection.pdf");
    }

    #[test]
    fn non_ascii_is_escaped() {
        let id = Identity::new("Zoë", "Dev").unwrap();
        assert_eq!(id.file_key(), "Zo__Dev");
    }
}
