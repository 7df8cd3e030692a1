//! Heuristic SEO scoring for article content.
//!
//! [`analyze`] takes the body (HTML or plain text), a title, a meta
//! description and an optional focus keyword, and returns a [`ScoreReport`]:
//! a 0-100 score, a letter grade, ordered suggestions and derived metrics.
//! The computation is pure and total: empty or missing fields lower the score
//! and add suggestions, they never fail.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod config;

pub use config::{ConfigError, ScoringRules};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// One scoring pass worth of input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentInput {
    pub content: String,
    pub title: String,
    pub description: String,
    pub focus_keyword: String,
}

impl ContentInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_focus_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.focus_keyword = keyword.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Error,
    Warning,
    Info,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Error => "error",
            SuggestionKind::Warning => "warning",
            SuggestionKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Identifies the rule that emitted a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    WordCount,
    TitleLength,
    KeywordInTitle,
    DescriptionLength,
    KeywordInDescription,
    KeywordDensity,
    HeadingPresence,
    H1Present,
    HeadingHierarchy,
    KeywordInHeadings,
    Readability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub message: String,
    pub priority: Priority,
    pub rule: RuleId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Highest band first; the first threshold the score reaches wins.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            50..=59 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Grade::APlus => "#4caf50",
            Grade::A => "#8bc34a",
            Grade::B => "#ffeb3b",
            Grade::C => "#ff9800",
            Grade::D => "#ff5722",
            Grade::F => "#f44336",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::APlus => "Excellent SEO",
            Grade::A => "Very Good SEO",
            Grade::B => "Good SEO",
            Grade::C => "Fair SEO",
            Grade::D => "Poor SEO",
            Grade::F => "Very Poor SEO",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeInfo {
    pub grade: Grade,
    pub color: &'static str,
    pub description: &'static str,
}

impl From<Grade> for GradeInfo {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            color: grade.color(),
            description: grade.description(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub heading_count: usize,
    /// Percent of tokens containing the focus keyword.
    pub keyword_density: f64,
    pub readability_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub score: u32,
    pub grade: GradeInfo,
    pub suggestions: Vec<Suggestion>,
    pub metrics: Metrics,
    pub headings: Vec<HeadingEntry>,
    pub keyword_densities: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h([1-6])[^>]*>(.*?)</h[1-6]>").unwrap());

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

static VOWEL_GROUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[aeiou]+").unwrap());

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Removes every `<...>` tag. Tags are deleted, not replaced by whitespace.
pub fn strip_tags(content: &str) -> String {
    TAG_RE.replace_all(content, "").into_owned()
}

pub fn word_count(content: &str) -> usize {
    count_words(&strip_tags(content))
}

/// Whole minutes, rounded up.
pub fn reading_time(word_count: usize, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    word_count.div_ceil(words_per_minute)
}

pub fn extract_headings(content: &str) -> Vec<HeadingEntry> {
    HEADING_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let level = caps.get(1)?.as_str().parse::<u8>().ok()?;
            let text = strip_tags(caps.get(2)?.as_str()).trim().to_string();
            Some(HeadingEntry { level, text })
        })
        .collect()
}

/// Share of tokens that contain `keyword` as a case-insensitive substring,
/// as a percentage. Substring matching means "cat" also counts "category".
pub fn keyword_density(content: &str, keyword: &str) -> f64 {
    density_of(&strip_tags(content), keyword)
}

/// Frequency of every token longer than two characters, as a percentage of
/// all such tokens, rounded to two decimals.
pub fn keyword_density_map(content: &str) -> BTreeMap<String, f64> {
    let text = strip_tags(content).to_lowercase();
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();
    if words.is_empty() {
        return BTreeMap::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &word in &words {
        *counts.entry(word).or_insert(0) += 1;
    }

    let total = words.len() as f64;
    counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), round2(count as f64 / total * 100.0)))
        .collect()
}

/// Flesch Reading Ease, clamped to `0..=100`. Zero when there are no words
/// or no sentences.
pub fn readability(content: &str) -> f64 {
    readability_of(&strip_tags(content))
}

/// Vowel groups per word, at least one per word.
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace().map(word_syllables).sum()
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn density_of(text: &str, keyword: &str) -> f64 {
    if keyword.is_empty() {
        return 0.0;
    }
    let keyword = keyword.to_lowercase();
    let text = text.to_lowercase();
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words.iter().filter(|w| w.contains(&keyword)).count();
    hits as f64 / words.len() as f64 * 100.0
}

fn readability_of(text: &str) -> f64 {
    let sentences = SENTENCE_SPLIT_RE
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let words = count_words(text);
    if sentences == 0 || words == 0 {
        return 0.0;
    }

    let syllables = count_syllables(text);
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    let score = 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word;
    score.clamp(0.0, 100.0)
}

fn word_syllables(word: &str) -> usize {
    let letters: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    VOWEL_GROUP_RE.find_iter(&letters).count().max(1)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Rule implementations
// ---------------------------------------------------------------------------

struct RuleOutput {
    earned: f64,
    suggestions: Vec<Suggestion>,
}

impl RuleOutput {
    fn new() -> Self {
        Self {
            earned: 0.0,
            suggestions: Vec::new(),
        }
    }

    fn credit(&mut self, weight: f64) {
        self.earned += weight;
    }

    fn suggest(
        &mut self,
        rule: RuleId,
        kind: SuggestionKind,
        priority: Priority,
        message: impl Into<String>,
    ) {
        self.suggestions.push(Suggestion {
            kind,
            message: message.into(),
            priority,
            rule,
        });
    }
}

fn rule_word_count(wc: usize, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();
    let (min, max) = (rules.word_count_min, rules.word_count_max);

    if (min..=max).contains(&wc) {
        out.credit(rules.word_count_weight);
    } else if wc < min {
        out.suggest(
            RuleId::WordCount,
            SuggestionKind::Warning,
            Priority::High,
            format!(
                "Content is too short ({wc} words). Aim for at least {min} words for better SEO."
            ),
        );
    } else {
        out.suggest(
            RuleId::WordCount,
            SuggestionKind::Info,
            Priority::Medium,
            format!(
                "Content is quite long ({wc} words). Consider breaking it into multiple articles or sections."
            ),
        );
        out.credit(rules.word_count_weight * rules.word_count_overflow_ratio);
    }
    out
}

fn rule_title(title: &str, keyword: &str, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();

    if title.is_empty() {
        out.suggest(
            RuleId::TitleLength,
            SuggestionKind::Error,
            Priority::High,
            "Title is required for SEO.",
        );
        return out;
    }

    let len = title.chars().count();
    let (min, max) = (rules.title_length_min, rules.title_length_max);
    if (min..=max).contains(&len) {
        out.credit(rules.title_length_weight);
    } else if len < min {
        out.suggest(
            RuleId::TitleLength,
            SuggestionKind::Warning,
            Priority::High,
            format!("Title is too short ({len} characters). Aim for {min}-{max} characters."),
        );
    } else {
        out.suggest(
            RuleId::TitleLength,
            SuggestionKind::Warning,
            Priority::High,
            format!("Title is too long ({len} characters). Keep it under {max} characters."),
        );
    }

    if keyword.is_empty() {
        return out;
    }
    if contains_ignore_case(title, keyword) {
        out.credit(rules.keyword_in_title_weight);
    } else {
        out.suggest(
            RuleId::KeywordInTitle,
            SuggestionKind::Warning,
            Priority::High,
            "Include your focus keyword in the title for better SEO.",
        );
    }
    out
}

fn rule_description(description: &str, keyword: &str, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();

    if description.is_empty() {
        out.suggest(
            RuleId::DescriptionLength,
            SuggestionKind::Warning,
            Priority::High,
            "Meta description is missing. Add one for better search results.",
        );
        return out;
    }

    let len = description.chars().count();
    let (min, max) = (rules.description_length_min, rules.description_length_max);
    if (min..=max).contains(&len) {
        out.credit(rules.description_length_weight);
    } else if len < min {
        out.suggest(
            RuleId::DescriptionLength,
            SuggestionKind::Warning,
            Priority::Medium,
            format!(
                "Meta description is too short ({len} characters). Aim for {min}-{max} characters."
            ),
        );
    } else {
        out.suggest(
            RuleId::DescriptionLength,
            SuggestionKind::Warning,
            Priority::Medium,
            format!(
                "Meta description is too long ({len} characters). Keep it under {max} characters."
            ),
        );
    }

    if keyword.is_empty() {
        return out;
    }
    if contains_ignore_case(description, keyword) {
        out.credit(rules.keyword_in_description_weight);
    } else {
        out.suggest(
            RuleId::KeywordInDescription,
            SuggestionKind::Info,
            Priority::Medium,
            "Consider including your focus keyword in the meta description.",
        );
    }
    out
}

fn rule_keyword_density(density: f64, keyword: &str, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();

    if keyword.is_empty() {
        out.suggest(
            RuleId::KeywordDensity,
            SuggestionKind::Info,
            Priority::Medium,
            "Set a focus keyword to get keyword-specific SEO recommendations.",
        );
        return out;
    }

    if density >= rules.keyword_density_min && density <= rules.keyword_density_max {
        out.credit(rules.keyword_density_weight);
    } else if density < rules.keyword_density_min {
        out.suggest(
            RuleId::KeywordDensity,
            SuggestionKind::Warning,
            Priority::Medium,
            format!(
                "Keyword density is too low ({density:.2}%). Use your focus keyword more naturally in the content."
            ),
        );
    } else {
        out.suggest(
            RuleId::KeywordDensity,
            SuggestionKind::Warning,
            Priority::High,
            format!("Keyword density is too high ({density:.2}%). Avoid keyword stuffing."),
        );
    }
    out
}

fn rule_headings(headings: &[HeadingEntry], keyword: &str, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();

    if headings.is_empty() {
        out.suggest(
            RuleId::HeadingPresence,
            SuggestionKind::Warning,
            Priority::High,
            "Add headings (H1, H2, H3) to improve content structure and SEO.",
        );
        return out;
    }

    if headings.iter().any(|h| h.level == 1) {
        out.credit(rules.h1_weight);
    } else {
        out.suggest(
            RuleId::H1Present,
            SuggestionKind::Warning,
            Priority::High,
            "Add an H1 heading for better SEO structure.",
        );
    }

    // The first heading is measured against level 0, so opening on H2 counts
    // as a skip.
    let mut previous = 0u8;
    let mut skips = 0usize;
    for heading in headings {
        if heading.level > previous + 1 {
            skips += 1;
        }
        previous = heading.level;
    }
    if skips == 0 {
        out.credit(rules.heading_hierarchy_weight);
    } else {
        out.suggest(
            RuleId::HeadingHierarchy,
            SuggestionKind::Info,
            Priority::Low,
            "Improve heading hierarchy. Avoid skipping heading levels (e.g., H1 to H3).",
        );
    }

    if keyword.is_empty() {
        return out;
    }
    if headings.iter().any(|h| contains_ignore_case(&h.text, keyword)) {
        out.credit(rules.keyword_in_headings_weight);
    } else {
        out.suggest(
            RuleId::KeywordInHeadings,
            SuggestionKind::Info,
            Priority::Medium,
            "Include your focus keyword in at least one heading.",
        );
    }
    out
}

fn rule_readability(score: f64, rules: &ScoringRules) -> RuleOutput {
    let mut out = RuleOutput::new();

    if score >= rules.readability_good_min {
        out.credit(rules.readability_weight);
    } else if score >= rules.readability_fair_min {
        out.suggest(
            RuleId::Readability,
            SuggestionKind::Info,
            Priority::Low,
            "Content readability could be improved. Use shorter sentences and simpler words.",
        );
    } else {
        out.suggest(
            RuleId::Readability,
            SuggestionKind::Warning,
            Priority::Medium,
            "Content is difficult to read. Consider simplifying language and sentence structure.",
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Merge helper
// ---------------------------------------------------------------------------

fn merge_output(earned: &mut f64, suggestions: &mut Vec<Suggestion>, out: RuleOutput) {
    *earned += out.earned;
    suggestions.extend(out.suggestions);
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze(content: &str, focus_keyword: &str, title: &str, description: &str) -> ScoreReport {
    let input = ContentInput {
        content: content.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        focus_keyword: focus_keyword.to_string(),
    };
    analyze_input(&input)
}

pub fn analyze_input(input: &ContentInput) -> ScoreReport {
    analyze_with_rules(input, &ScoringRules::default())
}

pub fn analyze_with_rules(input: &ContentInput, rules: &ScoringRules) -> ScoreReport {
    let text = strip_tags(&input.content);
    // Trimmed so a whitespace-only keyword counts as unset; padding around a
    // real keyword is ignored as well.
    let keyword = input.focus_keyword.trim();

    let wc = count_words(&text);
    let headings = extract_headings(&input.content);
    let density = density_of(&text, keyword);
    let readability_score = readability_of(&text);

    let mut earned = 0.0f64;
    let mut suggestions: Vec<Suggestion> = Vec::new();

    // 1. Word count
    merge_output(&mut earned, &mut suggestions, rule_word_count(wc, rules));
    // 2. Title length, keyword in title
    merge_output(
        &mut earned,
        &mut suggestions,
        rule_title(&input.title, keyword, rules),
    );
    // 3. Description length, keyword in description
    merge_output(
        &mut earned,
        &mut suggestions,
        rule_description(&input.description, keyword, rules),
    );
    // 4. Keyword density
    merge_output(
        &mut earned,
        &mut suggestions,
        rule_keyword_density(density, keyword, rules),
    );
    // 5. Headings: presence, H1, hierarchy, keyword
    merge_output(
        &mut earned,
        &mut suggestions,
        rule_headings(&headings, keyword, rules),
    );
    // 6. Readability
    merge_output(
        &mut earned,
        &mut suggestions,
        rule_readability(readability_score, rules),
    );

    let score = earned.round().clamp(0.0, 100.0) as u32;
    let grade = Grade::from_score(score);

    debug!(
        word_count = wc,
        score,
        grade = %grade,
        suggestions = suggestions.len(),
        "content analyzed"
    );

    ScoreReport {
        score,
        grade: grade.into(),
        suggestions,
        metrics: Metrics {
            word_count: wc,
            reading_time_minutes: reading_time(wc, rules.reading_words_per_minute),
            heading_count: headings.len(),
            keyword_density: round2(density),
            readability_score: round2(readability_score),
        },
        headings,
        keyword_densities: keyword_density_map(&text),
    }
}
