use chat_stats::config::TextAnalysisConfig;
use chat_stats::nlp::{classify_case, has_punctuation, language_code, CaseClass, Period, TextAnalyzer};
use chrono::NaiveDate;
use whatlang::Lang;

fn analyzer() -> TextAnalyzer {
    TextAnalyzer::new(&TextAnalysisConfig::default()).expect("Failed to create analyzer")
}

#[test]
fn test_analyzer_rejects_bad_boundary() {
    let config = TextAnalysisConfig {
        period_boundary: "yesterday".to_string(),
        ..TextAnalysisConfig::default()
    };
    assert!(TextAnalyzer::new(&config).is_err());
}

#[test]
fn test_alcohol_stems_match_inside_words() {
    let analyzer = analyzer();

    let mentions = analyzer.alcohol_mentions("пивко и водочка? нет, водку");
    assert!(mentions.contains(&("пиво".to_string(), 1)));
    assert!(mentions.contains(&("водка".to_string(), 1)));
}

#[test]
fn test_alcohol_counts_non_overlapping() {
    let analyzer = analyzer();
    assert_eq!(analyzer.alcohol_mentions("вино вино вино"), vec![("вино".to_string(), 3)]);
}

#[test]
fn test_alcohol_matching_is_case_sensitive() {
    let analyzer = analyzer();
    assert!(analyzer.alcohol_mentions("ПИВО").is_empty());
}

#[test]
fn test_neologisms() {
    let analyzer = analyzer();

    let mentions = analyzer.neologism_mentions("кек лол кек");
    assert!(mentions.contains(&("кек".to_string(), 2)));
    assert!(mentions.contains(&("лол".to_string(), 1)));
    assert!(analyzer.neologism_mentions("hello").is_empty());
}

#[test]
fn test_untracked_language_is_none() {
    let analyzer = analyzer();
    let english = "The quick brown fox jumps over the lazy dog while the farmer watches quietly.";
    assert_eq!(analyzer.tracked_language(english), None);
}

#[test]
fn test_language_needs_letters() {
    let analyzer = analyzer();
    assert_eq!(analyzer.tracked_language("12345 !!!"), None);
}

#[test]
fn test_period_boundary_is_inclusive() {
    let analyzer = analyzer();
    let day = |d| NaiveDate::from_ymd_opt(2022, 2, d).unwrap();

    assert_eq!(analyzer.period_of(day(23)), Period::Before);
    assert_eq!(analyzer.period_of(day(24)), Period::OnOrAfter);
    assert_eq!(analyzer.period_of(day(25)), Period::OnOrAfter);
}

#[test]
fn test_language_codes() {
    assert_eq!(language_code(Lang::Ukr), "uk");
    assert_eq!(language_code(Lang::Rus), "ru");
    assert_eq!(language_code(Lang::Eng), "en");
}

#[test]
fn test_case_classes() {
    assert_eq!(classify_case("hello world"), CaseClass::Lower);
    assert_eq!(classify_case("HELLO"), CaseClass::Upper);
    assert_eq!(classify_case("Hello"), CaseClass::Mixed);
    // Caseless text counts as lower case
    assert_eq!(classify_case("123 ?"), CaseClass::Lower);
    assert_eq!(classify_case(""), CaseClass::Lower);
}

#[test]
fn test_punctuation() {
    assert!(has_punctuation("hi!"));
    assert!(has_punctuation("a~b"));
    assert!(!has_punctuation("hi there"));
    // Only ASCII punctuation counts
    assert!(!has_punctuation("привет «мир»"));
}
