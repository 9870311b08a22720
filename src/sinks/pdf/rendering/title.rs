//! Title block rendering for page one.

use crate::sinks::pdf::config::PdfSink;
use crate::sinks::pdf::document::QuizDocument;

/// Draw the quiz title and generation timestamp at the top of the current
/// page. Layout starts a fixed distance below this block, so it is only
/// called for page one.
pub fn render(config: &PdfSink, doc: &mut QuizDocument) {
    let x = config.margin_pt;
    let top = config.page_height_pt - config.margin_pt;

    doc.draw_text(&config.title, x, top, config.font_size_title_pt);

    let created = format!("Created On: {}", chrono::Local::now().format("%a %b %d %Y %H:%M:%S"));
    doc.draw_text(&created, x, top - 30.0, config.font_size_small_pt);
}
