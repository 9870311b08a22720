//! Question prompt and per-type input affordances.
//!
//! The prompt is drawn the same way for every type: wrapped, numbered on
//! the first line, with a hanging indent on continuations. What follows it
//! depends on the question type:
//!
//! - Boolean questions get a fixed, unshuffled True/False radio pair;
//! - multiple-choice questions get a shuffled radio group that is
//!   guaranteed to contain the correct answer, even when the generator left
//!   it out of the option list;
//! - short-answer questions get a single blank text field.
//!
//! All fields for one question share the field name
//! `question{n}_answer`, so each question accepts exactly one answer.

use crate::sinks::pdf::config::PdfSink;
use crate::sinks::pdf::document::QuizDocument;
use crate::sinks::pdf::layout::{LayoutState, LINE_HEIGHT_PT};
use crate::sinks::pdf::wrap::wrap_text;
use crate::source::{QuestionRecord, QuestionType};
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw the wrapped, numbered prompt and advance the cursor past it.
pub fn render_prompt(
    config: &PdfSink,
    doc: &mut QuizDocument,
    layout: &mut LayoutState,
    question_lines: &[String],
) {
    for (line_index, line) in question_lines.iter().enumerate() {
        let text = if line_index == 0 {
            format!("Q{}) {}", layout.question_index, line)
        } else {
            format!("        {}", line)
        };
        doc.draw_text(
            &text,
            config.margin_pt,
            layout.y - line_index as f32 * LINE_HEIGHT_PT,
            config.font_size_body_pt,
        );
    }
    layout.advance(question_lines.len() as f32 * LINE_HEIGHT_PT + LINE_HEIGHT_PT);
}

/// Draw the type-specific input affordance and advance the cursor past it.
pub fn render_affordance<R: Rng>(
    config: &PdfSink,
    doc: &mut QuizDocument,
    layout: &mut LayoutState,
    record: &QuestionRecord,
    rng: &mut R,
) {
    let field_name = format!("question{}_answer", layout.question_index);

    match record.question_type {
        QuestionType::Boolean => {
            let group = doc.begin_radio_group(&field_name);
            for option in ["True", "False"] {
                doc.add_radio_option(group, option, config.margin_pt + 20.0, layout.y);
                doc.draw_text(
                    option,
                    config.margin_pt + 40.0,
                    layout.y + 2.0,
                    config.font_size_body_pt,
                );
                layout.advance(20.0);
            }
        }
        QuestionType::Mcq | QuestionType::McqHard => {
            let options = displayed_options(record, rng);
            let group = doc.begin_radio_group(&field_name);
            for (option_index, option) in options.iter().enumerate() {
                doc.add_radio_option(
                    group,
                    &format!("option{option_index}"),
                    config.margin_pt + 20.0,
                    layout.y,
                );
                let option_lines = wrap_text(option, config.content_width() - 60.0);
                for (line_index, line) in option_lines.iter().enumerate() {
                    doc.draw_text(
                        line,
                        config.margin_pt + 40.0,
                        layout.y + 2.0 - line_index as f32 * 15.0,
                        config.font_size_body_pt,
                    );
                }
                layout.advance(f32::max(25.0, option_lines.len() as f32 * 20.0));
            }
        }
        QuestionType::Short => {
            doc.add_text_field(
                &field_name,
                config.margin_pt,
                layout.y - 20.0,
                config.content_width(),
                20.0,
            );
            layout.advance(40.0);
        }
    }
}

/// Build the shuffled option list shown for a multiple-choice question.
///
/// Works on a copy: the record's own options are never reordered. The
/// correct answer is appended before shuffling when the stored options omit
/// it, so it is always an eligible choice.
pub fn displayed_options<R: Rng>(record: &QuestionRecord, rng: &mut R) -> Vec<String> {
    let mut options = record.options.clone();
    if !record.answer.is_empty() && !options.contains(&record.answer) {
        options.push(record.answer.clone());
    }
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::QuestionRecordBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mcq(options: &[&str], answer: &str) -> QuestionRecord {
        QuestionRecordBuilder::default()
            .question("q")
            .question_type(QuestionType::Mcq)
            .options(options.iter().map(|o| o.to_string()).collect::<Vec<_>>())
            .answer(answer)
            .build()
            .expect("can build record")
    }

    #[test]
    fn missing_answer_is_injected_into_the_choices() {
        let record = mcq(&["Paris", "Rome"], "Berlin");
        let mut rng = StdRng::seed_from_u64(7);
        let options = displayed_options(&record, &mut rng);

        assert_eq!(options.len(), 3);
        assert!(options.contains(&"Berlin".to_string()));
        // the source record is untouched
        assert_eq!(record.options, vec!["Paris", "Rome"]);
    }

    #[test]
    fn present_answer_is_not_duplicated() {
        let record = mcq(&["Paris", "Rome", "Berlin"], "Berlin");
        let mut rng = StdRng::seed_from_u64(7);
        let options = displayed_options(&record, &mut rng);
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn empty_answer_is_not_injected() {
        let record = mcq(&["Paris", "Rome"], "");
        let mut rng = StdRng::seed_from_u64(7);
        let options = displayed_options(&record, &mut rng);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn a_record_with_no_options_still_offers_the_answer() {
        let record = mcq(&[], "Berlin");
        let mut rng = StdRng::seed_from_u64(7);
        let options = displayed_options(&record, &mut rng);
        assert_eq!(options, vec!["Berlin"]);
    }

    #[test]
    fn shuffle_is_a_permutation_and_seed_deterministic() {
        let record = mcq(&["a", "b", "c", "d", "e"], "f");

        let mut rng = StdRng::seed_from_u64(42);
        let first = displayed_options(&record, &mut rng);
        let mut rng = StdRng::seed_from_u64(42);
        let second = displayed_options(&record, &mut rng);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn every_permutation_is_reachable() {
        // over enough seeds, three options should appear in all six orders
        let record = mcq(&["a", "b", "c"], "a");
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            seen.insert(displayed_options(&record, &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }
}
