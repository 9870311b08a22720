//! Pagination over fixed-size pages.
//!
//! Questions are laid out top to bottom against a single descending cursor.
//! Before a question is drawn, its full height is estimated; if the estimate
//! does not fit above the bottom margin, layout moves to a fresh page. The
//! check happens once per question, never per sub-element, so a question is
//! never split across a page boundary.
//!
//! ## Known limitation
//!
//! The height estimate reserves 25 pt per multiple-choice option, but an
//! option whose text wraps to several lines consumes 20 pt per line when
//! drawn. Since bounds are not re-checked mid-question, a question with many
//! long options can overflow the bottom margin. Keep option text to a line
//! or two on A4 at the default margins.

use crate::sinks::pdf::config::RenderMode;
use crate::source::{QuestionRecord, QuestionType};
use log::debug;

/// Vertical distance between the top margin and the first question,
/// reserving room for the title block on page one.
pub const TITLE_BLOCK_HEIGHT_PT: f32 = 70.0;

/// Leading between wrapped question lines, and the gap after each question.
pub const LINE_HEIGHT_PT: f32 = 20.0;

/// Mutable cursor state threaded through a single layout pass.
///
/// Owns nothing persistent: a fresh `LayoutState` is built per render call
/// and discarded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    /// Zero-based index of the page currently being drawn to
    pub page_index: usize,
    /// Current vertical cursor, descending from the top of the page
    pub y: f32,
    /// One-based question number; increments once per record in all modes
    pub question_index: usize,
}

impl LayoutState {
    /// Start layout on page one, below the title block.
    pub fn new(page_height_pt: f32, margin_pt: f32) -> LayoutState {
        LayoutState {
            page_index: 0,
            y: page_height_pt - margin_pt - TITLE_BLOCK_HEIGHT_PT,
            question_index: 1,
        }
    }

    /// Whether a block of `required_pt` no longer fits above the bottom margin.
    pub fn needs_page_break(&self, required_pt: f32, margin_pt: f32) -> bool {
        self.y - required_pt < margin_pt
    }

    /// Reset the cursor to the top of a fresh page.
    pub fn start_new_page(&mut self, page_height_pt: f32, margin_pt: f32) {
        self.page_index += 1;
        self.y = page_height_pt - margin_pt;
        debug!(
            "page break before question {}: continuing on page {}",
            self.question_index,
            self.page_index + 1
        );
    }

    /// Move the cursor down by `dy_pt`.
    pub fn advance(&mut self, dy_pt: f32) {
        self.y -= dy_pt;
    }
}

/// Conservative height estimate for one question block, in points.
///
/// `question_lines` is the wrapped line count of the prompt. The estimate is
/// mode-dependent: input affordances only count when questions are rendered,
/// the answer line only when answers are. Multiple-choice reserves one slot
/// beyond the stored options for the injected correct answer.
pub fn required_height(
    record: &QuestionRecord,
    question_lines: usize,
    mode: RenderMode,
) -> f32 {
    let mut required = 60.0 + question_lines as f32 * LINE_HEIGHT_PT;

    if mode.includes_questions() {
        required += match record.question_type {
            QuestionType::Boolean => 60.0,
            QuestionType::Mcq | QuestionType::McqHard => {
                let option_count = if record.options.is_empty() {
                    1
                } else {
                    record.options.len() + 1
                };
                option_count as f32 * 25.0
            }
            QuestionType::Short => 40.0,
        };
    }

    if mode.includes_answers() {
        required += 40.0;
    }

    required
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::QuestionRecordBuilder;

    fn record(question_type: QuestionType, options: &[&str]) -> QuestionRecord {
        QuestionRecordBuilder::default()
            .question("q")
            .question_type(question_type)
            .options(options.iter().map(|o| o.to_string()).collect::<Vec<_>>())
            .answer("a")
            .build()
            .expect("can build record")
    }

    #[test]
    fn boolean_height_reserves_two_fixed_choices() {
        let r = record(QuestionType::Boolean, &[]);
        assert_eq!(required_height(&r, 1, RenderMode::Questions), 140.0);
    }

    #[test]
    fn mcq_height_reserves_room_for_the_injected_answer() {
        let r = record(QuestionType::Mcq, &["a", "b", "c"]);
        // 60 base + 20 for one question line + 4 * 25 for options
        assert_eq!(required_height(&r, 1, RenderMode::Questions), 180.0);

        // no stored options still reserves a slot for the answer
        let r = record(QuestionType::Mcq, &[]);
        assert_eq!(required_height(&r, 1, RenderMode::Questions), 105.0);
    }

    #[test]
    fn answer_mode_drops_the_affordance_and_adds_the_answer_line() {
        let r = record(QuestionType::Mcq, &["a", "b"]);
        assert_eq!(required_height(&r, 2, RenderMode::Answers), 140.0);
        assert_eq!(
            required_height(&r, 2, RenderMode::QuestionsAndAnswers),
            // 60 + 40 question lines + 3 * 25 options + 40 answer
            215.0
        );
    }

    #[test]
    fn cursor_breaks_to_a_new_page_when_out_of_room() {
        let mut layout = LayoutState::new(841.89, 50.0);
        assert_eq!(layout.page_index, 0);
        assert_eq!(layout.question_index, 1);

        layout.advance(841.89 - 50.0 - 70.0 - 60.0);
        assert!(layout.needs_page_break(100.0, 50.0));
        assert!(!layout.needs_page_break(5.0, 50.0));

        layout.start_new_page(841.89, 50.0);
        assert_eq!(layout.page_index, 1);
        assert_eq!(layout.y, 841.89 - 50.0);
    }
}
