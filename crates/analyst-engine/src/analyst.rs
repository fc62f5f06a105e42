//! Request-scoped orchestration of classification, fetching and rendering.

use crate::court::{self, MOCK_SLOPE, MOCK_TOP_COURT};
use crate::films::{self, FilmFacts};
use crate::intent::AnalysisKind;
use crate::questions::QuestionSet;
use crate::report::{AnalysisReport, CourtAnswers, FilmsAnswers, GenericAnswers};
use analyst_common::{
    truncate_string, FallbackReason, HttpTableFetcher, Outcome, Result, TableFetcher,
};
use analyst_config::Config;
use analyst_graphs::{render_scatter_blocking, PlotConfig, SamplePair, PLACEHOLDER_PNG_DATA_URI};
use std::sync::Arc;
use tracing::{field, info, instrument, warn, Span};
use uuid::Uuid;

/// Generic answer texts.
pub const GENERIC_STATUS: &str = "Analysis complete";
pub const GENERIC_SUMMARY: &str = "Generic response";
pub const GENERIC_SCORE: f64 = 0.5;

/// Shared, stateless analysis service.
#[derive(Clone)]
pub struct Analyst {
    config: Arc<Config>,
    fetcher: Arc<dyn TableFetcher>,
}

impl std::fmt::Debug for Analyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyst")
            .field("films_url", &self.config.scrape.films_url)
            .finish_non_exhaustive()
    }
}

impl Analyst {
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn TableFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Builds an analyst fetching over HTTP with the configured timeout.
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = HttpTableFetcher::new(config.scrape.fetcher_config())?;
        Ok(Self::new(Arc::new(config), Arc::new(fetcher)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn plot_config(&self) -> PlotConfig {
        PlotConfig::from(&self.config.plot)
    }

    /// Answers a questions document. Never fails: every problem becomes a
    /// tagged fallback answer.
    #[instrument(
        name = "analysis",
        skip_all,
        fields(request_id = %Uuid::new_v4(), kind = field::Empty)
    )]
    pub async fn analyze(&self, text: &str) -> AnalysisReport {
        let kind = AnalysisKind::classify(text);
        Span::current().record("kind", kind.as_str());
        info!(preview = %truncate_string(text.trim(), 200), "Received questions");

        let questions = QuestionSet::parse(text);
        let report = match kind {
            AnalysisKind::Films => AnalysisReport::Films(self.films(&questions).await),
            AnalysisKind::Court => AnalysisReport::Court(self.court().await),
            AnalysisKind::Unclassified => AnalysisReport::Generic(self.generic().await),
        };

        for reason in report.fallback_reasons() {
            warn!(%reason, "Answer substituted with fallback");
        }
        info!(fallbacks = report.fallback_count(), "Analysis finished");
        report
    }

    /// Answers raw upload bytes; invalid UTF-8 yields error placeholders.
    pub async fn analyze_bytes(&self, bytes: &[u8]) -> AnalysisReport {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.analyze(text).await,
            Err(error) => {
                let kind = AnalysisKind::classify(&String::from_utf8_lossy(bytes));
                warn!(%error, %kind, "Questions are not valid UTF-8");
                AnalysisReport::Failed {
                    kind,
                    reason: format!("questions are not valid UTF-8: {error}"),
                }
            }
        }
    }

    async fn films(&self, questions: &QuestionSet) -> FilmsAnswers {
        let url = &self.config.scrape.films_url;
        let facts = match self.fetcher.fetch_table(url).await {
            Ok(table) => {
                info!(rows = table.row_count(), columns = table.column_count(), "Fetched films table");
                FilmFacts::from_table(&table, &questions.film_thresholds())
            }
            Err(error) => FilmFacts::fallback(FallbackReason::FetchFailure(error.to_string())),
        };

        let base = self.plot_config();
        let style = questions.line_style(&base.style.regression);
        let config = base
            .with_labels(films::PLOT_TITLE, "Rank", "Peak")
            .with_regression_style(style);

        FilmsAnswers {
            count: facts.count,
            earliest: facts.earliest,
            correlation: facts.correlation,
            plot: plot(facts.rank_peak, config).await,
        }
    }

    async fn court(&self) -> CourtAnswers {
        let reason = FallbackReason::MockedDataset;
        let config = self
            .plot_config()
            .with_labels(court::PLOT_TITLE, "Year", "Days of delay");

        CourtAnswers {
            top_court: Outcome::fallback(MOCK_TOP_COURT.to_string(), reason.clone()),
            regression_slope: Outcome::fallback(MOCK_SLOPE, reason.clone()),
            delay_plot: plot(Outcome::fallback(SamplePair::demo(), reason), config).await,
        }
    }

    async fn generic(&self) -> GenericAnswers {
        let reason = FallbackReason::Unclassified;
        let config = self.plot_config().with_labels("Sample data", "x", "y");

        GenericAnswers {
            status: Outcome::fallback(GENERIC_STATUS.to_string(), reason.clone()),
            summary: Outcome::fallback(GENERIC_SUMMARY.to_string(), reason.clone()),
            score: Outcome::fallback(GENERIC_SCORE, reason.clone()),
            plot: plot(Outcome::fallback(SamplePair::demo(), reason), config).await,
        }
    }
}

/// Renders `sample`, keeping its fallback tag; a failed render yields the
/// placeholder image, which is shorter than any budget validation accepts.
async fn plot(sample: Outcome<SamplePair>, config: PlotConfig) -> Outcome<String> {
    let reason = sample.reason().cloned();
    match render_scatter_blocking(sample.into_value(), config).await {
        Ok(image) => match reason {
            Some(reason) => Outcome::fallback(image.into_data_uri(), reason),
            None => Outcome::Computed(image.into_data_uri()),
        },
        Err(error) => Outcome::fallback(
            PLACEHOLDER_PNG_DATA_URI.to_string(),
            FallbackReason::RenderFailure(error.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_common::{AnalystError, MockTableFetcher};
    use analyst_config::MIN_ENCODED_BYTES;

    fn analyst_with(mock: MockTableFetcher, config: Config) -> Analyst {
        Analyst::new(Arc::new(config), Arc::new(mock))
    }

    #[tokio::test]
    async fn test_court_is_mocked() {
        let mut mock = MockTableFetcher::new();
        mock.expect_fetch_table().never();

        let report = analyst_with(mock, Config::default())
            .analyze("Which high court disposed the most cases?")
            .await;

        let AnalysisReport::Court(answers) = &report else {
            panic!("expected court report, got {report:?}");
        };
        assert_eq!(answers.top_court.value(), "33_10");
        assert_eq!(*answers.regression_slope.value(), 0.123456);
        assert_eq!(
            answers.delay_plot.reason(),
            Some(&FallbackReason::MockedDataset)
        );
        assert_eq!(report.fallback_count(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_uses_fallback_set() {
        let mut mock = MockTableFetcher::new();
        mock.expect_fetch_table()
            .times(1)
            .returning(|url| Err(AnalystError::fetch("connection refused", url)));

        let report = analyst_with(mock, Config::default())
            .analyze("Scrape the highest-grossing films list")
            .await;

        assert_eq!(report.kind(), AnalysisKind::Films);
        assert_eq!(report.fallback_count(), 4);
        let body = report.to_json();
        assert_eq!(body[0], 1);
        assert_eq!(body[1], "Titanic");
        assert_eq!(body[2], 0.485782);
        assert!(body[3].as_str().unwrap().starts_with("data:image/png;base64,"));
        assert!(matches!(
            report.fallback_reasons()[0],
            FallbackReason::FetchFailure(_)
        ));
    }

    #[tokio::test]
    async fn test_render_failure_yields_placeholder() {
        let mut config = Config::default();
        config.plot.max_encoded_bytes = MIN_ENCODED_BYTES;
        assert!(config.validate().is_ok());

        let report = analyst_with(MockTableFetcher::new(), config)
            .analyze("anything at all")
            .await;

        let AnalysisReport::Generic(answers) = &report else {
            panic!("expected generic report");
        };
        assert_eq!(answers.plot.value(), PLACEHOLDER_PNG_DATA_URI);
        assert!(answers.plot.value().len() < MIN_ENCODED_BYTES);
        assert!(matches!(
            answers.plot.reason(),
            Some(FallbackReason::RenderFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_failed_report() {
        let analyst = analyst_with(MockTableFetcher::new(), Config::default());

        let report = analyst.analyze_bytes(b"court \xff\xfe").await;
        assert_eq!(report.kind(), AnalysisKind::Court);
        assert!(matches!(report, AnalysisReport::Failed { .. }));

        let report = analyst.analyze_bytes(b"\xc3\x28 plain").await;
        assert_eq!(report.to_json()[0], "Error");
    }
}
