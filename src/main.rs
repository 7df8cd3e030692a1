use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use seo_score::{ContentInput, ScoreReport, ScoringRules};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser)]
#[command(
    name = "seo-score",
    about = "Score article content for on-page SEO",
    version
)]
struct Cli {
    /// Content file, HTML or plain text (reads stdin if omitted)
    file: Option<PathBuf>,

    /// Page title
    #[arg(long, default_value = "")]
    title: String,

    /// Meta description
    #[arg(long, default_value = "")]
    description: String,

    /// Focus keyword
    #[arg(long, short = 'k', default_value = "")]
    keyword: String,

    /// TOML file overriding scoring thresholds and weights
    #[arg(long)]
    rules: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let content = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            input
        }
    };

    let rules = match &cli.rules {
        Some(path) => ScoringRules::load(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => ScoringRules::default(),
    };

    let input = ContentInput::new(content)
        .with_title(cli.title)
        .with_description(cli.description)
        .with_focus_keyword(cli.keyword);
    let report = seo_score::analyze_with_rules(&input, &rules);

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_text(&report)),
    }
    Ok(())
}

fn render_text(report: &ScoreReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "SEO score: {}/100 ({}, {})\n",
        report.score, report.grade.grade, report.grade.description
    ));

    let m = &report.metrics;
    out.push_str(&format!(
        "Words: {}  Reading time: {} min  Headings: {}  Keyword density: {:.2}%  Readability: {:.1}\n",
        m.word_count, m.reading_time_minutes, m.heading_count, m.keyword_density, m.readability_score
    ));

    if !report.headings.is_empty() {
        out.push_str("\nHeading outline:\n");
        for h in &report.headings {
            let indent = "  ".repeat(usize::from(h.level.saturating_sub(1)));
            out.push_str(&format!("{indent}H{} {}\n", h.level, h.text));
        }
    }

    if !report.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for s in &report.suggestions {
            out.push_str(&format!(
                "- [{}/{}] {}\n",
                s.kind.as_str(),
                s.priority.as_str(),
                s.message
            ));
        }
    }
    out
}
