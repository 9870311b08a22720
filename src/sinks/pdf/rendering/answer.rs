//! Answer summary line rendering.

use crate::sinks::pdf::config::PdfSink;
use crate::sinks::pdf::document::QuizDocument;
use crate::sinks::pdf::layout::{LayoutState, LINE_HEIGHT_PT};
use crate::sinks::pdf::wrap::wrap_text;
use crate::source::QuestionRecord;

/// Fill color for answer text, distinguishing it from question content.
const ANSWER_GREEN: (f32, f32, f32) = (0.0, 0.5, 0.0);

/// Draw the `Answer {n}: {text}` line (wrapped if long) in green and
/// advance the cursor past it.
pub fn render(
    config: &PdfSink,
    doc: &mut QuizDocument,
    layout: &mut LayoutState,
    record: &QuestionRecord,
) {
    let answer_text = format!("Answer {}: {}", layout.question_index, record.answer);
    let answer_lines = wrap_text(&answer_text, config.content_width());
    for (line_index, line) in answer_lines.iter().enumerate() {
        doc.draw_text_colored(
            line,
            config.margin_pt,
            layout.y - line_index as f32 * 15.0,
            config.font_size_body_pt,
            ANSWER_GREEN,
        );
    }
    layout.advance(answer_lines.len() as f32 * LINE_HEIGHT_PT);
}
