mod record;
pub use record::*;

mod providers;
pub use providers::*;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything we need to know to render a generated quiz as a document
#[derive(Default, Debug)]
pub struct Quiz {
    /// The title of the quiz, shown in the document metadata
    pub title: Option<String>,

    /// The normalized questions, in the order they will be rendered
    pub records: Vec<QuestionRecord>,
}

impl Quiz {
    pub fn set_title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn add_record<R: Into<QuestionRecord>>(&mut self, record: R) -> &mut Self {
        self.records.push(record.into());
        self
    }
}

/// Where the quiz questions come from.
///
/// The snapshot file is the JSON blob the quiz generator stores after a
/// generation run: a map of per-endpoint payloads (`output_boolq`,
/// `output_mcq`, `output_shortq`, and/or a generic `output` list). The
/// generator kind records which endpoint the quiz was requested from, and
/// disambiguates how entries in the generic `output` list are interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the stored generator output (JSON)
    pub snapshot: PathBuf,
    /// Which generation endpoint produced the snapshot, if known
    #[serde(default)]
    pub question_type: Option<GeneratorKind>,
    /// Quiz title for document metadata
    #[serde(default)]
    pub title: Option<String>,
}

impl SourceConfig {
    /// Read the snapshot file and normalize it into a [`Quiz`].
    pub fn load(&self) -> Result<Quiz> {
        let contents = std::fs::read_to_string(&self.snapshot).with_context(|| {
            format!("Failed to read snapshot file {}", self.snapshot.display())
        })?;
        let snapshot: Snapshot =
            serde_json::from_str(&contents).with_context(|| "Failed to parse snapshot JSON")?;

        let mut quiz = Quiz::default();
        if let Some(title) = &self.title {
            quiz.set_title(title);
        }
        for record in normalize(snapshot, self.question_type)? {
            quiz.add_record(record);
        }
        Ok(quiz)
    }
}
