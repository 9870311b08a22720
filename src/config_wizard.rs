//! Interactive configuration wizard for creating `quizpress.toml`.
//!
//! The wizard collects the snapshot location, the generator endpoint the
//! quiz came from (which disambiguates the generic `output` payload shape),
//! and the PDF output options through a series of prompts.

use crate::sinks::{PdfSink, RenderMode};
use crate::source::{GeneratorKind, SourceConfig};
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration for a quizpress project.
#[derive(Deserialize, Serialize)]
pub struct Configuration {
    pub source: SourceConfig,
    pub pdf: Option<PdfSink>,
}

/// Run the interactive configuration wizard.
///
/// Prompts the user for the snapshot file, generator kind, and PDF output
/// options, then writes `quizpress.toml` to the current directory.
pub fn run() -> Result<()> {
    let theme = ColorfulTheme {
        ..ColorfulTheme::default()
    };

    let snapshot: String = Input::with_theme(&theme)
        .with_prompt("Quiz snapshot file (JSON)")
        .default("qa_pairs.json".to_string())
        .interact()
        .with_context(|| "Failed to obtain snapshot path")?;
    let snapshot = PathBuf::from(snapshot);
    if !snapshot.exists() || !snapshot.is_file() {
        return Err(anyhow!("Path '{}' isn't a file!", snapshot.display()));
    }

    let title: String = Input::with_theme(&theme)
        .with_prompt("Quiz title")
        .allow_empty(true)
        .interact()
        .with_context(|| "Failed to obtain title")?;
    let title = if title.trim().is_empty() {
        None
    } else {
        Some(title)
    };

    let question_type = if Confirm::with_theme(&theme)
        .with_prompt("Do you know which generator endpoint produced this snapshot?")
        .interact()?
    {
        let kinds = GeneratorKind::all();
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt("Generator endpoint")
            .items(kinds)
            .default(0)
            .interact()
            .with_context(|| "Failed to select generator endpoint")?;
        Some(kinds[selection])
    } else {
        None
    };

    let pdf = if Confirm::with_theme(&theme)
        .with_prompt("Configure PDF output?")
        .default(true)
        .interact()?
    {
        let modes = RenderMode::all();
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt("Document mode")
            .items(modes)
            .default(0)
            .interact()
            .with_context(|| "Failed to select document mode")?;
        let mode = modes[selection];

        let outfile: String = Input::with_theme(&theme)
            .with_prompt("Output PDF file")
            .default("inquizzitive_quiz.pdf".to_string())
            .interact()
            .with_context(|| "Failed to obtain output path")?;

        Some(PdfSink {
            outfile: PathBuf::from(outfile),
            mode,
            ..PdfSink::default()
        })
    } else {
        None
    };

    let configuration = Configuration {
        source: SourceConfig {
            snapshot,
            question_type,
            title,
        },
        pdf,
    };

    let contents =
        toml::to_string(&configuration).with_context(|| "Failed to serialize configuration")?;
    std::fs::write("quizpress.toml", contents)
        .with_context(|| "Failed to write quizpress.toml")?;
    println!("Wrote quizpress.toml");

    Ok(())
}
