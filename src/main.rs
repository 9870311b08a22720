use anyhow::{Context, Result};
use cli::Cli;
use config_wizard::Configuration;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;

mod cli;
mod config_wizard;
mod sinks {
    mod pdf;
    pub use pdf::{PdfSink, RenderMode};
}
mod source;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config => config_wizard::run(),
        cli::Commands::Render => {
            println!("Loading configuration...");
            let contents = std::fs::read_to_string("quizpress.toml")
                .with_context(|| "Failed to load quizpress.toml contents")?;
            let config: Configuration =
                toml::from_str(&contents).with_context(|| "Failed to parse TOML")?;

            let Configuration { source, pdf } = config;

            let quiz = source.load().with_context(|| {
                format!(
                    "Failed to load quiz snapshot from {}",
                    source.snapshot.display()
                )
            })?;

            if let Some(pdf) = pdf {
                let progress = ProgressBar::new(quiz.records.len() as u64);
                progress.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .expect("can parse progress style")
                        .progress_chars("#>-"),
                );
                progress.set_message("Rendering PDF...");

                let stats = pdf
                    .render(&quiz, &progress)
                    .with_context(|| "Failed to render PDF")?;
                progress.finish_and_clear();

                println!();
                println!("  Quiz PDF:  {}", pdf.outfile.display());
                println!("  Questions: {}", stats.question_count);
                println!("  Pages:     {}", stats.page_count);
            } else {
                println!("No PDF output configured.");
            }

            Ok(())
        }
    }
}
