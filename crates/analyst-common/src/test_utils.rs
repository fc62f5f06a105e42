//! Test utilities and shared test helpers for the analyst workspace.
//!
//! This module provides fixtures and helper functions that can be used
//! across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Question documents and scraped pages used across crates.
pub mod fixtures {
    /// Rows of the films fixture: (rank, peak, title, gross, year).
    pub const FILM_ROWS: [(&str, &str, &str, &str, &str); 12] = [
        ("1", "1", "Avatar", "$2,923,706,026", "2009"),
        ("2", "1", "Avengers: Endgame", "$2,797,501,328", "2019"),
        ("3", "3", "Avatar: The Way of Water", "$2,320,250,281", "2022"),
        ("4", "1", "Titanic", "$2,257,844,554", "1997"),
        ("5", "3", "Star Wars: The Force Awakens", "$2,068,223,624", "2015"),
        ("6", "4", "Avengers: Infinity War", "$2,048,359,754", "2018"),
        ("7", "6", "Spider-Man: No Way Home", "$1,921,847,111", "2021"),
        ("8", "3TS", "Jurassic World", "$1,671,537,444", "2015"),
        ("9", "7", "The Lion King", "$1,656,943,394", "2019"),
        ("10", "3", "The Avengers", "$1,518,815,515", "2012"),
        ("11", "4", "Furious 7", "$1,515,341,399", "2015"),
        ("12", "9", "Top Gun: Maverick", "$1,495,696,292", "2022"),
    ];

    /// A page shaped like the highest-grossing films article.
    pub fn films_html() -> String {
        let body: String = FILM_ROWS
            .iter()
            .map(|(rank, peak, title, gross, year)| {
                format!(
                    "<tr><td>{rank}</td><td>{peak}</td><th scope=\"row\"><i><a href=\"#\">{title}</a></i></th>\
                     <td>{gross}<sup>[1]</sup></td><td>{year}</td><td><sup>[2]</sup></td></tr>\n"
                )
            })
            .collect();

        format!(
            "<html><body>\
             <table class=\"infobox\"><tr><th>Note</th><td>not data</td></tr></table>\
             <table class=\"wikitable sortable plainrowheaders\">\
             <caption>Highest-grossing films</caption>\
             <tr><th>Rank</th><th>Peak</th><th>Title</th><th>Worldwide gross</th><th>Year</th><th>Ref</th></tr>\n\
             {body}</table></body></html>"
        )
    }

    /// The films questions document.
    pub const FILM_QUESTIONS: &str = "Scrape the list of highest grossing films from Wikipedia. It is at the URL:
https://en.wikipedia.org/wiki/List_of_highest-grossing_films

Answer the following questions and respond with a JSON array of strings containing the answer.

1. How many $2 bn movies were released before 2000?
2. Which is the earliest film that grossed over $1.5 bn?
3. What's the correlation between the Rank and Peak?
4. Draw a scatterplot of Rank and Peak along with a dotted red regression line through it.
   Return as a base-64 encoded data URI, `\"data:image/png;base64,iVBORw0KG...\"` under 100,000 bytes.
";

    /// The court questions document.
    pub const COURT_QUESTIONS: &str = "The Indian high court judgement dataset contains judgements from the Indian High Courts, downloaded from ecourts website.

This DuckDB query counts the number of decisions in the dataset:

```sql
SELECT COUNT(*) FROM read_parquet('s3://indian-high-court-judgments/metadata/parquet/year=*/court=*/bench=*/metadata.parquet?s3_region=ap-south-1');
```

Answer the following questions and respond with a JSON object containing the answer.

{
  \"Which high court disposed the most cases from 2019 - 2022?\": \"...\",
  \"What's the regression slope of the date_of_registration - decision_date by year in the court=33_10?\": \"...\",
  \"Plot the year and # of days of delay from the above question as a scatterplot with a regression line. Encode as a base64 data URI under 100,000 characters\": \"data:image/webp:base64,...\"
}";

    /// A document that matches no known analysis.
    pub const GENERIC_QUESTIONS: &str = "Summarise the attached sales figures by region.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_films_fixture_parses() {
        let table = crate::fetcher::main_table_from_html(&fixtures::films_html(), "fixture").unwrap();
        assert_eq!(table.row_count(), fixtures::FILM_ROWS.len());
        assert_eq!(table.headers()[0], "Rank");
        assert_eq!(table.cell(3, 2), Some("Titanic"));
        assert_eq!(table.cell(0, 3), Some("$2,923,706,026"));
    }
}
