//! Normalization of stored generator output into [`QuestionRecord`]s.
//!
//! The generation backend does not produce one stable schema. Each endpoint
//! wraps its questions differently:
//!
//! - `get_boolq` produces `{"Boolean_Questions": [..], "Text": ..}` payloads,
//!   where each question is a bare string;
//! - `get_mcq` produces `{"questions": [..]}` payloads of objects keyed by
//!   `question_statement`;
//! - `get_shortq` produces `{"questions": [..]}` payloads whose objects may
//!   spell their keys `question`, `question_statement`, or `Question` (and
//!   `answer` or `Answer`);
//! - every endpoint may instead return a flat generic `output` list, whose
//!   interpretation depends on which endpoint was called.
//!
//! This module models those shapes explicitly with serde and maps them
//! deterministically into the single [`QuestionRecord`] form, in a fixed
//! order: boolean payload, MCQ payload, short-answer payload, then the
//! generic list. Rendering never sees raw backend JSON.

use crate::source::{QuestionRecord, QuestionType};
use anyhow::{anyhow, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which generation endpoint a quiz was requested from.
///
/// Stored alongside the snapshot so that entries in the generic `output`
/// list can be normalized without guessing: a `get_boolq` run returns bare
/// question strings, a `get_mcq` run returns option-bearing objects, and
/// everything else is treated as short-answer.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum GeneratorKind {
    #[serde(rename = "get_mcq")]
    Mcq,
    #[serde(rename = "get_mcq_hard")]
    McqHard,
    #[serde(rename = "get_boolq")]
    Boolq,
    #[serde(rename = "get_shortq")]
    Shortq,
    #[serde(rename = "get_shortq_hard")]
    ShortqHard,
    #[serde(rename = "get_problems")]
    Problems,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl GeneratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Mcq => "get_mcq",
            GeneratorKind::McqHard => "get_mcq_hard",
            GeneratorKind::Boolq => "get_boolq",
            GeneratorKind::Shortq => "get_shortq",
            GeneratorKind::ShortqHard => "get_shortq_hard",
            GeneratorKind::Problems => "get_problems",
        }
    }

    pub fn all() -> &'static [GeneratorKind] {
        &[
            GeneratorKind::Mcq,
            GeneratorKind::McqHard,
            GeneratorKind::Boolq,
            GeneratorKind::Shortq,
            GeneratorKind::ShortqHard,
            GeneratorKind::Problems,
        ]
    }

    /// The question type entries in a generic `output` list normalize to.
    fn question_type(&self) -> QuestionType {
        match self {
            GeneratorKind::Mcq => QuestionType::Mcq,
            GeneratorKind::McqHard => QuestionType::McqHard,
            GeneratorKind::Boolq => QuestionType::Boolean,
            GeneratorKind::Shortq | GeneratorKind::ShortqHard | GeneratorKind::Problems => {
                QuestionType::Short
            }
        }
    }
}

/// A stored generation run, as the quiz store persists it.
#[derive(Deserialize, Debug, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub output_boolq: Option<BooleanPayload>,
    #[serde(default)]
    pub output_mcq: Option<QuestionListPayload>,
    #[serde(default)]
    pub output_shortq: Option<QuestionListPayload>,
    #[serde(default)]
    pub output: Option<Vec<GenericEntry>>,
}

/// The `get_boolq` payload shape: bare question strings plus the passage
/// they were generated from.
#[derive(Deserialize, Debug)]
pub struct BooleanPayload {
    #[serde(rename = "Boolean_Questions", default)]
    pub boolean_questions: Vec<String>,
    #[serde(rename = "Text", default)]
    pub text: Option<String>,
}

/// The `get_mcq`/`get_shortq` payload shape: a wrapped list of question
/// objects.
#[derive(Deserialize, Debug)]
pub struct QuestionListPayload {
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// One raw question object, tolerant of the backend's key spellings.
#[derive(Deserialize, Debug)]
pub struct RawQuestion {
    #[serde(alias = "question_statement", alias = "Question", default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(alias = "Answer", default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// An entry in the generic `output` list: either a bare question string
/// (boolean runs) or a full question object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum GenericEntry {
    Question(RawQuestion),
    Prompt(String),
}

/// Map a snapshot into renderable records.
///
/// Produces an error rather than a partial list when an entry has no
/// question text: rendering is fail-fast, so malformed input is rejected
/// before any layout happens.
pub fn normalize(snapshot: Snapshot, kind: Option<GeneratorKind>) -> Result<Vec<QuestionRecord>> {
    let mut records = Vec::new();

    if let Some(boolq) = snapshot.output_boolq {
        for question in boolq.boolean_questions {
            records.push(QuestionRecord {
                question,
                question_type: QuestionType::Boolean,
                options: Vec::new(),
                answer: String::new(),
                context: boolq.text.clone(),
            });
        }
    }

    if let Some(mcq) = snapshot.output_mcq {
        for (i, raw) in mcq.questions.into_iter().enumerate() {
            records.push(raw_to_record(raw, QuestionType::Mcq, "output_mcq", i)?);
        }
    }

    if let Some(shortq) = snapshot.output_shortq {
        for (i, raw) in shortq.questions.into_iter().enumerate() {
            records.push(raw_to_record(raw, QuestionType::Short, "output_shortq", i)?);
        }
    }

    if let Some(output) = snapshot.output {
        let question_type = kind
            .map(|k| k.question_type())
            .unwrap_or(QuestionType::Short);
        for (i, entry) in output.into_iter().enumerate() {
            match entry {
                GenericEntry::Prompt(question) if question_type == QuestionType::Boolean => {
                    records.push(QuestionRecord {
                        question,
                        question_type,
                        options: Vec::new(),
                        answer: String::new(),
                        context: None,
                    });
                }
                GenericEntry::Prompt(_) => {
                    return Err(anyhow!(
                        "output entry {i} is a bare string, but {} questions need an object",
                        question_type
                    ));
                }
                GenericEntry::Question(raw) => {
                    records.push(raw_to_record(raw, question_type, "output", i)?);
                }
            }
        }
    }

    debug!("normalized {} question records", records.len());
    Ok(records)
}

fn raw_to_record(
    raw: RawQuestion,
    question_type: QuestionType,
    payload: &str,
    index: usize,
) -> Result<QuestionRecord> {
    let question = raw
        .question
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| anyhow!("{payload} entry {index} has no question text"))?;

    Ok(QuestionRecord {
        question,
        question_type,
        options: raw.options,
        answer: raw.answer.unwrap_or_default(),
        context: raw.context,
    })
}
