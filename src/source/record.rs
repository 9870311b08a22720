use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of answer a question expects, which determines the input
/// affordance rendered into the PDF (radio group, text field, etc).
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum QuestionType {
    #[serde(rename = "Boolean")]
    Boolean,
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "MCQ_Hard")]
    McqHard,
    #[serde(rename = "Short")]
    Short,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl QuestionType {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionType::Boolean => "Boolean",
            QuestionType::Mcq => "MCQ",
            QuestionType::McqHard => "MCQ_Hard",
            QuestionType::Short => "Short",
        }
    }

    /// Whether this type renders a multiple-choice option list.
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::McqHard)
    }
}

/// One normalized quiz question, ready for rendering.
///
/// The several differently-keyed shapes the generation backend produces are
/// flattened into this single form by the snapshot provider; the renderer
/// never sees raw backend JSON. `options` is only populated for the
/// multiple-choice types, and is never mutated by rendering: the renderer
/// shuffles a working copy for display.
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct QuestionRecord {
    /// The question prompt text; must be non-empty to render
    pub question: String,
    pub question_type: QuestionType,
    /// Candidate choices for multiple-choice questions. May or may not
    /// include the correct answer; rendering guarantees the answer appears
    /// among the displayed choices regardless.
    #[builder(setter(each(name = "option", into)), default)]
    pub options: Vec<String>,
    /// The correct answer text. Empty when the generator produced none
    /// (e.g. plain Boolean prompts).
    #[builder(default)]
    pub answer: String,
    /// Supporting passage the question was generated from. Not rendered
    /// into the PDF.
    #[builder(setter(into, strip_option), default)]
    pub context: Option<String>,
}
