//! Integration tests for analyst-engine crate.

use analyst_common::fetcher::main_table_from_html;
use analyst_common::test_utils::{fixtures, init_test_logging};
use analyst_common::{MockTableFetcher, Outcome};
use analyst_config::Config;
use analyst_engine::court::{PLOT_QUESTION, SLOPE_QUESTION, TOP_COURT_QUESTION};
use analyst_engine::{AnalysisKind, AnalysisReport, Analyst};
use std::sync::Arc;

fn fixture_fetcher() -> MockTableFetcher {
    let mut mock = MockTableFetcher::new();
    mock.expect_fetch_table()
        .withf(|url| url.contains("highest-grossing"))
        .times(1)
        .returning(|url| main_table_from_html(&fixtures::films_html(), url));
    mock
}

fn analyst(mock: MockTableFetcher) -> Analyst {
    Analyst::new(Arc::new(Config::default()), Arc::new(mock))
}

#[tokio::test]
async fn test_films_answers_from_fixture_table() {
    init_test_logging();

    let report = analyst(fixture_fetcher())
        .analyze(fixtures::FILM_QUESTIONS)
        .await;

    let AnalysisReport::Films(answers) = &report else {
        panic!("expected films report, got {report:?}");
    };
    assert_eq!(answers.count, Outcome::Computed(1));
    assert_eq!(answers.earliest, Outcome::Computed("Titanic".to_string()));
    assert!(!answers.correlation.is_fallback());
    assert!(!answers.plot.is_fallback());
    assert_eq!(report.fallback_count(), 0);

    let body = report.to_json();
    let array = body.as_array().unwrap();
    assert_eq!(array.len(), 4);
    let uri = array[3].as_str().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert!(uri.len() < 100_000);
}

#[tokio::test]
async fn test_court_answers_have_documented_keys() {
    let mut mock = MockTableFetcher::new();
    mock.expect_fetch_table().never();

    let report = analyst(mock).analyze(fixtures::COURT_QUESTIONS).await;
    assert_eq!(report.kind(), AnalysisKind::Court);

    let body = report.to_json();
    let object = body.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = vec![TOP_COURT_QUESTION, SLOPE_QUESTION, PLOT_QUESTION];
    expected.sort_unstable();
    assert_eq!(keys, expected);
    assert!(object[SLOPE_QUESTION].is_number());
}

#[tokio::test]
async fn test_generic_answers() {
    let report = analyst(MockTableFetcher::new())
        .analyze(fixtures::GENERIC_QUESTIONS)
        .await;

    let body = report.to_json();
    assert_eq!(body[0], "Analysis complete");
    assert_eq!(body[1], "Generic response");
    assert_eq!(body[2], 0.5);
    assert!(body[3].as_str().unwrap().starts_with("data:image/png;base64,"));
    assert_eq!(report.fallback_count(), 4);
}
