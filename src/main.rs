use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fluency_screen::SpeechAnalyzer;

#[derive(Parser)]
#[command(
    name = "fluency-screen",
    about = "Score verbal fluency transcripts for cognitive screening",
    version
)]
struct Cli {
    /// Transcript files to analyze (reads stdin if none provided)
    files: Vec<String>,

    /// Emit the result record as pretty JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so report/JSON output on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let analyzer = SpeechAnalyzer::new();

    if cli.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        emit(&analyzer, &input, cli.json)?;
    } else {
        for path in &cli.files {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {path}"))?;
            emit(&analyzer, &text, cli.json)?;
        }
    }

    Ok(())
}

fn emit(analyzer: &SpeechAnalyzer, text: &str, json: bool) -> Result<()> {
    let result = analyzer.analyze_speech(text);
    info!(
        animal_count = result.animal_count,
        repetitions = result.repetitions,
        brain_health_score = result.brain_health_score,
        "analysis complete"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", analyzer.generate_report(&result));
    }
    Ok(())
}
