//! Reflection journal: validation, the append-only log and document export.
//!
//! A submission is validated and rendered in memory before anything touches
//! disk, so a rejected or unrenderable entry leaves no record and no document.

mod export;
mod recorder;

pub use export::{layout, render, DocumentLine, LineStyle, PageLayout};
pub use recorder::Recorder;

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::identity::Identity;

pub const GOALS_HEADING: &str = "Goals for Tomorrow:";
pub const RECORD_DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Please complete both reflection and goals fields before saving.")]
    EmptyFields,

    #[error("Please complete the reflection field before saving.")]
    EmptyReflection,

    #[error("Please complete the goals field before saving.")]
    EmptyGoals,

    #[error("The {field} contains a character the document font cannot render: {ch:?}")]
    UnsupportedCharacter { field: &'static str, ch: char },

    #[error("Failed to render reflection document: {0}")]
    Render(String),

    #[error("Journal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JournalError {
    /// Whether this is a user input problem rather than a server failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            JournalError::EmptyFields | JournalError::EmptyReflection | JournalError::EmptyGoals
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionEntry {
    pub date: NaiveDate,
    pub reflection: String,
    pub goals: String,
}

impl ReflectionEntry {
    pub fn new(date: NaiveDate, reflection: &str, goals: &str) -> Result<Self, JournalError> {
        match (reflection.is_empty(), goals.is_empty()) {
            (true, true) => return Err(JournalError::EmptyFields),
            (true, false) => return Err(JournalError::EmptyReflection),
            (false, true) => return Err(JournalError::EmptyGoals),
            (false, false) => {}
        }
        Ok(Self {
            date,
            reflection: reflection.to_string(),
            goals: goals.to_string(),
        })
    }

    /// The text appended to the identity's log for this entry.
    pub fn record(&self, identity: &Identity) -> String {
        format!(
            "{} - {}: {}\n{} {}\n{}\n",
            self.date.format("%Y-%m-%d"),
            identity.profession,
            self.reflection,
            GOALS_HEADING,
            self.goals,
            RECORD_DELIMITER
        )
    }
}

/// Outcome of a successful save & export.
#[derive(Debug, Clone)]
pub struct Submission {
    pub record_path: PathBuf,
    pub document_path: PathBuf,
    pub document_name: String,
    pub document: Vec<u8>,
    pub message: String,
}

/// Validate, render, append the record and write the document.
pub async fn submit(
    recorder: &Recorder,
    identity: &Identity,
    reflection: &str,
    goals: &str,
    date: NaiveDate,
) -> Result<Submission, JournalError> {
    let entry = ReflectionEntry::new(date, reflection, goals)?;
    let document = {
        let identity = identity.clone();
        let entry = entry.clone();
        tokio::task::spawn_blocking(move || render(&identity, &entry))
            .await
            .map_err(|e| JournalError::Render(e.to_string()))??
    };

    let record_path = recorder.append(identity, &entry).await?;
    let document_path = recorder.write_document(identity, &document).await?;

    Ok(Submission {
        record_path,
        document_path,
        document_name: identity.document_file_name(),
        document,
        message: format!(
            "Reflection & Goals saved & PDF generated for {}!",
            identity.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn sara() -> Identity {
        Identity::new("Sara", "Web Developer").unwrap()
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            ReflectionEntry::new(date(), "", ""),
            Err(JournalError::EmptyFields)
        ));
        assert!(matches!(
            ReflectionEntry::new(date(), "", "Practice Y"),
            Err(JournalError::EmptyReflection)
        ));
        assert!(matches!(
            ReflectionEntry::new(date(), "Learned X", ""),
            Err(JournalError::EmptyGoals)
        ));
    }

    #[test]
    fn record_format() {
        let entry = ReflectionEntry::new(date(), "Learned X", "Practice Y").unwrap();
        assert_eq!(
            entry.record(&sara()),
            "2026-10-19 - Web Developer: Learned X\nGoals for Tomorrow: Practice Y\n---\n"
        );
    }

    #[tokio::test]
    async fn rejected_submission_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::new(temp.path().join("journals"));
        for (reflection, goals) in [("", ""), ("", "Practice Y"), ("Learned X", "")] {
            let err = submit(&recorder, &sara(), reflection, goals, date())
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(!temp.path().join("journals").exists());
    }

    #[tokio::test]
    async fn unrenderable_submission_writes_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::new(temp.path().to_path_buf());
        let err = submit(&recorder, &sara(), "Learned \u{1F680}", "Practice Y", date())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            JournalError::UnsupportedCharacter {
                field: "reflection",
                ..
            }
        ));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn accepted_submission_writes_one_record_and_one_document() {
        let temp = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::new(temp.path().to_path_buf());
        let submission = submit(&recorder, &sara(), "Learned X", "Practice Y", date())
            .await
            .expect("submit");

        let log = std::fs::read_to_string(&submission.record_path).unwrap();
        assert_eq!(log.matches(RECORD_DELIMITER).count(), 1);
        assert!(log.contains("Learned X"));
        assert!(log.contains("Practice Y"));

        assert_eq!(submission.document_name, "Sara_Web_Developer_Reflection.pdf");
        assert!(submission.document.starts_with(b"%PDF"));
        let on_disk = std::fs::read(&submission.document_path).unwrap();
        assert_eq!(on_disk, submission.document);
        assert_eq!(
            submission.message,
            "Reflection & Goals saved & PDF generated for Sara (Web Developer)!"
        );
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn large_submission_leaves_the_runtime_free() {
        let temp = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::new(temp.path().to_path_buf());
        let ran = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = std::sync::Arc::clone(&ran);
        let other = tokio::spawn(async move {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        });

        let reflection = vec!["Learned X and then some more"; 400].join("\n");
        let submission = submit(&recorder, &sara(), &reflection, "Practice Y", date())
            .await
            .expect("submit");

        assert!(ran.load(std::sync::atomic::Ordering::SeqCst));
        other.await.unwrap();
        assert!(submission.document.starts_with(b"%PDF"));
    }
}
