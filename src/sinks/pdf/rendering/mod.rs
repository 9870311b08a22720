//! PDF rendering orchestration.
//!
//! Lays out every question of a quiz onto A4 pages in source order, then
//! serializes the document and writes it out. Layout is a single synchronous
//! pass: one descending cursor and one question counter, threaded through
//! the whole document via [`LayoutState`]. Each question gets a conservative
//! height estimate up front and moves to a fresh page when the estimate no
//! longer fits; questions are never split across pages.
//!
//! Rendering is fail-fast with no partial output: a record with an empty
//! prompt aborts the render before any bytes are produced, and the output
//! file is only written after the whole document serialized successfully.
//!
//! The option shuffle is the only source of non-determinism, which keeps
//! the correct answer from always landing in the same slot. Internals are
//! generic over [`rand::Rng`] so tests can pin a seed.

mod answer;
mod question;
mod title;

use crate::sinks::pdf::config::{PdfSink, RenderStats};
use crate::sinks::pdf::document::QuizDocument;
use crate::sinks::pdf::layout::{required_height, LayoutState, LINE_HEIGHT_PT};
use crate::sinks::pdf::wrap::wrap_text;
use crate::source::Quiz;
use anyhow::{ensure, Context, Result};
use indicatif::ProgressBar;
use rand::Rng;

impl PdfSink {
    /// Render `quiz` and write the PDF to [`PdfSink::outfile`].
    ///
    /// The progress bar is advanced once per question. On error nothing is
    /// written: serialization happens fully in memory first.
    pub fn render(&self, quiz: &Quiz, progress: &ProgressBar) -> Result<RenderStats> {
        let (bytes, stats) = render_to_bytes(self, quiz, &mut rand::thread_rng(), progress)?;
        std::fs::write(&self.outfile, bytes)
            .with_context(|| format!("Failed to write {}", self.outfile.display()))?;
        Ok(stats)
    }
}

fn render_to_bytes<R: Rng>(
    config: &PdfSink,
    quiz: &Quiz,
    rng: &mut R,
    progress: &ProgressBar,
) -> Result<(Vec<u8>, RenderStats)> {
    let mut doc = QuizDocument::new(config.page_width_pt, config.page_height_pt)
        .with_context(|| "Failed to create PDF document")?;
    title::render(config, &mut doc);

    let mut layout = LayoutState::new(config.page_height_pt, config.margin_pt);

    for record in quiz.records.iter() {
        ensure!(
            !record.question.trim().is_empty(),
            "question {} has an empty prompt",
            layout.question_index
        );
        progress.set_message(format!("Question {}", layout.question_index));

        let question_lines = wrap_text(&record.question, config.content_width());
        let required = required_height(record, question_lines.len(), config.mode);
        if layout.needs_page_break(required, config.margin_pt) {
            doc.add_page();
            layout.start_new_page(config.page_height_pt, config.margin_pt);
        }

        if config.mode.includes_questions() {
            question::render_prompt(config, &mut doc, &mut layout, &question_lines);
            if config.mode.is_fillable() {
                question::render_affordance(config, &mut doc, &mut layout, record, rng);
            }
        }

        if config.mode.includes_answers() {
            answer::render(config, &mut doc, &mut layout, record);
        }

        layout.advance(LINE_HEIGHT_PT);
        layout.question_index += 1;
        progress.inc(1);
    }

    let stats = RenderStats {
        page_count: doc.page_count(),
        question_count: quiz.records.len(),
    };
    let bytes = doc.finish(quiz.title.as_deref().unwrap_or(&config.title))?;
    Ok((bytes, stats))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::pdf::config::RenderMode;
    use crate::source::{QuestionRecordBuilder, QuestionType};
    use lopdf::Document;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_quiz() -> Quiz {
        let mut quiz = Quiz::default();
        quiz.add_record(
            QuestionRecordBuilder::default()
                .question("Is water wet?")
                .question_type(QuestionType::Boolean)
                .answer("True")
                .build()
                .expect("can build record"),
        );
        quiz.add_record(
            QuestionRecordBuilder::default()
                .question("Which planet is largest?")
                .question_type(QuestionType::Mcq)
                .option("Jupiter")
                .option("Mars")
                .option("Venus")
                .answer("Jupiter")
                .build()
                .expect("can build record"),
        );
        quiz.add_record(
            QuestionRecordBuilder::default()
                .question("Name the largest ocean.")
                .question_type(QuestionType::Short)
                .answer("Pacific")
                .build()
                .expect("can build record"),
        );
        quiz
    }

    fn render(quiz: &Quiz, mode: RenderMode) -> (Document, RenderStats) {
        let config = PdfSink {
            mode,
            ..PdfSink::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let (bytes, stats) = render_to_bytes(&config, quiz, &mut rng, &ProgressBar::hidden())
            .expect("can render quiz");
        let parsed = Document::load_mem(&bytes).expect("can re-parse generated PDF");
        (parsed, stats)
    }

    fn page_text(doc: &Document) -> String {
        doc.get_pages()
            .values()
            .map(|page_id| {
                let content = doc
                    .get_page_content(*page_id)
                    .expect("page has content");
                String::from_utf8_lossy(&content).into_owned()
            })
            .collect()
    }

    fn form_fields(doc: &Document) -> Vec<lopdf::Dictionary> {
        let catalog = doc.catalog().expect("document has a catalog");
        let acroform = match catalog.get(b"AcroForm") {
            Ok(form) => form.as_dict().expect("AcroForm is a dictionary"),
            Err(_) => return Vec::new(),
        };
        acroform
            .get(b"Fields")
            .and_then(|o| o.as_array())
            .expect("AcroForm has a field array")
            .iter()
            .map(|field| {
                doc.get_object(field.as_reference().expect("field is a reference"))
                    .and_then(|o| o.as_dict())
                    .expect("field resolves to a dictionary")
                    .clone()
            })
            .collect()
    }

    #[test]
    fn questions_mode_renders_numbered_prompts_and_fields() {
        let (doc, stats) = render(&sample_quiz(), RenderMode::Questions);
        assert_eq!(stats.question_count, 3);
        assert_eq!(stats.page_count, 1);
        assert_eq!(doc.get_pages().len(), 1);

        let text = page_text(&doc);
        assert!(text.contains("Q1"));
        assert!(text.contains("Q2"));
        assert!(text.contains("Q3"));
        assert!(text.contains("True"));
        assert!(text.contains("False"));
        // no answer summary in fillable mode
        assert!(!text.contains("Answer 1:"));

        // one field per question: two radio groups and one text field
        let fields = form_fields(&doc);
        assert_eq!(fields.len(), 3);
        let names: Vec<_> = fields
            .iter()
            .map(|f| {
                String::from_utf8_lossy(f.get(b"T").and_then(|o| o.as_str()).unwrap()).into_owned()
            })
            .collect();
        assert_eq!(
            names,
            vec!["question1_answer", "question2_answer", "question3_answer"]
        );
    }

    #[test]
    fn answers_mode_renders_only_the_answer_summary() {
        let (doc, _) = render(&sample_quiz(), RenderMode::Answers);
        let text = page_text(&doc);
        assert!(text.contains("Answer 1:"));
        assert!(text.contains("Answer 2: Jupiter"));
        assert!(text.contains("Answer 3: Pacific"));
        assert!(!text.contains("Q1"));
        assert!(!text.contains("Which planet is largest?"));

        // no interactive fields at all
        assert!(form_fields(&doc).is_empty());
    }

    #[test]
    fn combined_mode_renders_prompts_and_answers_but_no_fields() {
        let (doc, _) = render(&sample_quiz(), RenderMode::QuestionsAndAnswers);
        let text = page_text(&doc);
        assert!(text.contains("Q1"));
        assert!(text.contains("Answer 3: Pacific"));
        assert!(form_fields(&doc).is_empty());
    }

    #[test]
    fn a_missing_mcq_answer_choice_is_injected() {
        let mut quiz = Quiz::default();
        quiz.add_record(
            QuestionRecordBuilder::default()
                .question("What is the capital of Germany?")
                .question_type(QuestionType::Mcq)
                .option("Paris")
                .option("Rome")
                .answer("Berlin")
                .build()
                .expect("can build record"),
        );

        let (doc, _) = render(&quiz, RenderMode::Questions);
        assert!(page_text(&doc).contains("Berlin"));

        let fields = form_fields(&doc);
        assert_eq!(fields.len(), 1);
        let kids = fields[0]
            .get(b"Kids")
            .and_then(|o| o.as_array())
            .expect("radio field has kids");
        assert_eq!(kids.len(), 3);
    }

    #[test]
    fn long_quizzes_paginate_without_splitting_a_question() {
        let mut quiz = Quiz::default();
        for i in 0..20 {
            quiz.add_record(
                QuestionRecordBuilder::default()
                    .question(format!("Statement number {i} is true?"))
                    .question_type(QuestionType::Boolean)
                    .build()
                    .expect("can build record"),
            );
        }

        let (doc, stats) = render(&quiz, RenderMode::Questions);
        assert_eq!(stats.question_count, 20);
        assert!(stats.page_count > 1);
        assert_eq!(doc.get_pages().len(), stats.page_count);

        // numbering stays strictly sequential across the page breaks
        let text = page_text(&doc);
        for i in 1..=20 {
            assert!(text.contains(&format!("Q{i}")), "missing question {i}");
        }
    }

    #[test]
    fn an_empty_prompt_aborts_the_render() {
        let mut quiz = Quiz::default();
        quiz.add_record(
            QuestionRecordBuilder::default()
                .question("   ")
                .question_type(QuestionType::Short)
                .build()
                .expect("can build record"),
        );

        let config = PdfSink::default();
        let mut rng = StdRng::seed_from_u64(1);
        let err = render_to_bytes(&config, &quiz, &mut rng, &ProgressBar::hidden())
            .expect_err("rendering should fail");
        assert!(err.to_string().contains("question 1"));
    }
}
