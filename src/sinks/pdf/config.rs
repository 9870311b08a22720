use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which sections of the quiz the document includes.
///
/// Questions-only is the fillable variant: it is the only mode that renders
/// interactive form fields. Questions-and-answers renders the question text
/// but no fields, since the answers are printed right below.
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum RenderMode {
    #[serde(rename = "questions")]
    Questions,
    #[serde(rename = "answers")]
    Answers,
    #[serde(rename = "questions_answers")]
    QuestionsAndAnswers,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl RenderMode {
    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Questions => "questions",
            RenderMode::Answers => "answers",
            RenderMode::QuestionsAndAnswers => "questions_answers",
        }
    }

    pub fn all() -> &'static [RenderMode] {
        &[
            RenderMode::Questions,
            RenderMode::Answers,
            RenderMode::QuestionsAndAnswers,
        ]
    }

    /// Whether question prompts are rendered.
    pub fn includes_questions(&self) -> bool {
        !matches!(self, RenderMode::Answers)
    }

    /// Whether the answer summary line is rendered.
    pub fn includes_answers(&self) -> bool {
        matches!(self, RenderMode::Answers | RenderMode::QuestionsAndAnswers)
    }

    /// Whether interactive form fields are rendered. Only the plain
    /// questions mode is fillable.
    pub fn is_fillable(&self) -> bool {
        matches!(self, RenderMode::Questions)
    }
}

/// PDF output configuration.
///
/// Defaults match the quiz document as users know it: A4 pages
/// (595.28 x 841.89 pt) with a uniform 50 pt margin, a 20 pt title and
/// 12 pt body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfSink {
    /// Output PDF file path
    pub outfile: PathBuf,
    /// Which sections each question contributes
    #[serde(default = "default_mode")]
    pub mode: RenderMode,
    /// Title text drawn at the top of page one
    #[serde(default = "default_title")]
    pub title: String,
    /// Page width in points
    #[serde(default = "default_page_width")]
    pub page_width_pt: f32,
    /// Page height in points
    #[serde(default = "default_page_height")]
    pub page_height_pt: f32,
    /// Margin in points, applied on all four sides
    #[serde(default = "default_margin")]
    pub margin_pt: f32,
    #[serde(default = "default_font_size_title")]
    pub font_size_title_pt: f32,
    #[serde(default = "default_font_size_body")]
    pub font_size_body_pt: f32,
    #[serde(default = "default_font_size_small")]
    pub font_size_small_pt: f32,
}

fn default_mode() -> RenderMode {
    RenderMode::Questions
}
fn default_title() -> String {
    "Inquizzitive generated Quiz".to_string()
}
fn default_page_width() -> f32 {
    595.28
}
fn default_page_height() -> f32 {
    841.89
}
fn default_margin() -> f32 {
    50.0
}
fn default_font_size_title() -> f32 {
    20.0
}
fn default_font_size_body() -> f32 {
    12.0
}
fn default_font_size_small() -> f32 {
    10.0
}

impl Default for PdfSink {
    fn default() -> Self {
        PdfSink {
            outfile: PathBuf::from("inquizzitive_quiz.pdf"),
            mode: default_mode(),
            title: default_title(),
            page_width_pt: default_page_width(),
            page_height_pt: default_page_height(),
            margin_pt: default_margin(),
            font_size_title_pt: default_font_size_title(),
            font_size_body_pt: default_font_size_body(),
            font_size_small_pt: default_font_size_small(),
        }
    }
}

impl PdfSink {
    /// Horizontal space available to content between the margins.
    pub fn content_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }
}

/// Statistics from rendering a PDF, used for user feedback.
#[derive(Debug)]
pub struct RenderStats {
    /// Number of pages in the document
    pub page_count: usize,
    /// Number of questions laid out
    pub question_count: usize,
}
