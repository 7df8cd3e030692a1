use seo_score::{
    analyze, analyze_input, extract_headings, reading_time, word_count, ContentInput, Grade,
    HeadingEntry, Priority, RuleId, ScoreReport, SuggestionKind,
};

const TITLE: &str = "A practical garden guide for busy weekend growers";
const DESCRIPTION: &str = "Learn how to plan, plant and maintain a small garden that thrives all year, \
                           with simple steps for soil, watering, light and seasonal care.";

/// 500 words, ten of which contain "garden" (2% density), one H1.
fn garden_article() -> String {
    let mut sentences = vec!["We like the garden a lot."; 9];
    sentences.extend(vec!["The cat sat on the mat."; 74]);
    format!("<h1>Garden tips</h1>\n<p>{}</p>", sentences.join(" "))
}

fn suggestions_for(report: &ScoreReport, rule: RuleId) -> Vec<&seo_score::Suggestion> {
    report
        .suggestions
        .iter()
        .filter(|s| s.rule == rule)
        .collect()
}

#[test]
fn fully_optimized_content_scores_100() {
    let report = analyze(&garden_article(), "garden", TITLE, DESCRIPTION);
    assert_eq!(report.metrics.word_count, 500);
    assert_eq!(report.metrics.keyword_density, 2.0);
    assert!(report.metrics.readability_score >= 60.0);
    assert_eq!(report.score, 100);
    assert_eq!(report.grade.grade, Grade::APlus);
    assert_eq!(report.grade.description, "Excellent SEO");
    assert!(
        report.suggestions.is_empty(),
        "unexpected suggestions: {:?}",
        report.suggestions
    );
}

#[test]
fn analyze_is_idempotent() {
    let article = garden_article();
    let first = analyze(&article, "garden", TITLE, DESCRIPTION);
    let second = analyze(&article, "garden", TITLE, DESCRIPTION);
    assert_eq!(first, second);
}

#[test]
fn word_count_strips_markup() {
    assert_eq!(word_count("<p>Hello world</p>"), 2);
}

#[test]
fn reading_time_for_400_words_is_two_minutes() {
    let content = vec!["word"; 400].join(" ");
    let report = analyze(&content, "", "", "");
    assert_eq!(report.metrics.word_count, 400);
    assert_eq!(report.metrics.reading_time_minutes, 2);
    assert_eq!(reading_time(400, 200), 2);
}

#[test]
fn skipped_heading_level_is_low_priority_info() {
    let content = "<h1>Intro</h1><h3>Detail</h3>";
    assert_eq!(
        extract_headings(content),
        vec![
            HeadingEntry {
                level: 1,
                text: "Intro".to_string()
            },
            HeadingEntry {
                level: 3,
                text: "Detail".to_string()
            },
        ]
    );

    let report = analyze(content, "", "", "");
    let hierarchy = suggestions_for(&report, RuleId::HeadingHierarchy);
    assert_eq!(hierarchy.len(), 1);
    assert_eq!(hierarchy[0].kind, SuggestionKind::Info);
    assert_eq!(hierarchy[0].priority, Priority::Low);
    assert_eq!(report.metrics.heading_count, 2);
    assert_eq!(report.headings.len(), 2);
}

#[test]
fn short_title_gets_no_length_credit() {
    let title = "t".repeat(25);
    let report = analyze("", "", &title, "");
    let title_issues = suggestions_for(&report, RuleId::TitleLength);
    assert_eq!(title_issues.len(), 1);
    assert_eq!(title_issues[0].kind, SuggestionKind::Warning);
    assert_eq!(title_issues[0].priority, Priority::High);
    assert!(title_issues[0].message.contains("(25 characters)"));
}

#[test]
fn mid_length_title_earns_full_credit() {
    let short = analyze("", "", &"t".repeat(25), "");
    let good = analyze("", "", &"t".repeat(45), "");
    assert!(suggestions_for(&good, RuleId::TitleLength).is_empty());
    assert_eq!(good.score - short.score, 15);
}

#[test]
fn empty_keyword_skips_keyword_rules() {
    let report = analyze(&garden_article(), "", TITLE, DESCRIPTION);

    let density = suggestions_for(&report, RuleId::KeywordDensity);
    assert_eq!(density.len(), 1);
    assert_eq!(density[0].kind, SuggestionKind::Info);
    assert!(density[0].message.starts_with("Set a focus keyword"));

    assert!(suggestions_for(&report, RuleId::KeywordInTitle).is_empty());
    assert!(suggestions_for(&report, RuleId::KeywordInDescription).is_empty());
    assert!(suggestions_for(&report, RuleId::KeywordInHeadings).is_empty());
    assert_eq!(report.metrics.keyword_density, 0.0);
    // 20 + 15 + 15 + 10 + 5 + 5
    assert_eq!(report.score, 70);
    assert_eq!(report.grade.grade, Grade::B);
}

#[test]
fn whitespace_keyword_is_treated_as_unset() {
    let report = analyze(&garden_article(), "   ", TITLE, DESCRIPTION);
    assert_eq!(report.score, 70);
}

#[test]
fn missing_keyword_everywhere_is_flagged() {
    let report = analyze(&garden_article(), "tomato", TITLE, DESCRIPTION);
    assert_eq!(suggestions_for(&report, RuleId::KeywordInTitle).len(), 1);
    assert_eq!(suggestions_for(&report, RuleId::KeywordInDescription).len(), 1);
    assert_eq!(suggestions_for(&report, RuleId::KeywordInHeadings).len(), 1);
    let density = suggestions_for(&report, RuleId::KeywordDensity);
    assert_eq!(density[0].priority, Priority::Medium);
    assert!(density[0].message.contains("(0.00%)"));
}

#[test]
fn keyword_stuffing_is_high_priority() {
    let content = format!("<h1>Garden</h1>\n<p>{}</p>", vec!["garden"; 50].join(" "));
    let report = analyze(&content, "garden", TITLE, DESCRIPTION);
    let density = suggestions_for(&report, RuleId::KeywordDensity);
    assert_eq!(density.len(), 1);
    assert_eq!(density[0].priority, Priority::High);
}

#[test]
fn suggestions_follow_rule_evaluation_order() {
    let report = analyze("<h2>Only a subheading</h2>", "garden", "Short", "");
    let order: Vec<RuleId> = report.suggestions.iter().map(|s| s.rule).collect();
    assert_eq!(
        order,
        vec![
            RuleId::WordCount,
            RuleId::TitleLength,
            RuleId::KeywordInTitle,
            RuleId::DescriptionLength,
            RuleId::KeywordDensity,
            RuleId::H1Present,
            RuleId::HeadingHierarchy,
            RuleId::KeywordInHeadings,
        ]
    );
}

#[test]
fn missing_title_is_an_error() {
    let report = analyze(&garden_article(), "garden", "", DESCRIPTION);
    let title = suggestions_for(&report, RuleId::TitleLength);
    assert_eq!(title[0].kind, SuggestionKind::Error);
    assert_eq!(title[0].message, "Title is required for SEO.");
    assert!(suggestions_for(&report, RuleId::KeywordInTitle).is_empty());
    assert_eq!(report.score, 85);
}

#[test]
fn builder_input_matches_positional_call() {
    let input = ContentInput::new(garden_article())
        .with_title(TITLE)
        .with_description(DESCRIPTION)
        .with_focus_keyword("garden");
    assert_eq!(
        analyze_input(&input),
        analyze(&garden_article(), "garden", TITLE, DESCRIPTION)
    );
}

#[test]
fn report_includes_word_frequencies() {
    let report = analyze(&garden_article(), "garden", TITLE, DESCRIPTION);
    assert!(report.keyword_densities.contains_key("garden"));
    assert!(!report.keyword_densities.contains_key("we"));
}

#[test]
fn json_output_is_valid() {
    let report = analyze(&garden_article(), "tomato", TITLE, DESCRIPTION);
    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("score").is_some());
    assert_eq!(parsed["score"], 70);
    assert_eq!(parsed["grade"]["grade"], "B");
    assert_eq!(parsed["grade"]["color"], "#ffeb3b");
    assert!(parsed["metrics"].get("word_count").is_some());
    assert!(parsed["metrics"].get("reading_time_minutes").is_some());
    assert!(parsed["metrics"].get("heading_count").is_some());
    assert!(parsed["metrics"].get("keyword_density").is_some());
    assert!(parsed["metrics"].get("readability_score").is_some());
    assert!(parsed.get("headings").is_some());

    let first = &parsed["suggestions"][0];
    assert_eq!(first["type"], "warning");
    assert_eq!(first["priority"], "high");
    assert_eq!(first["rule"], "keyword_in_title");
}
