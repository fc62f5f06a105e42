//! Parsing of the uploaded questions document.

use analyst_common::{parse_currency, parse_year};
use analyst_graphs::{LinePattern, RegressionLineStyle};
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s*").expect("numbering pattern is valid"));

const COLOR_WORDS: [(&str, &str); 7] = [
    ("red", "#ff0000"),
    ("blue", "#0000ff"),
    ("green", "#008000"),
    ("black", "#000000"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("gray", "#808080"),
];

/// Gross and year thresholds used by the films answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmThresholds {
    /// Minimum gross for the count question.
    pub count_gross: f64,
    /// Films must be released before this year to be counted.
    pub count_before_year: i32,
    /// Minimum gross for the earliest-film question.
    pub earliest_gross: f64,
}

impl Default for FilmThresholds {
    fn default() -> Self {
        Self {
            count_gross: 2.0e9,
            count_before_year: 2000,
            earliest_gross: 1.5e9,
        }
    }
}

/// A questions document split into lines.
#[derive(Debug, Clone)]
pub struct QuestionSet {
    text: String,
    questions: Vec<String>,
}

impl QuestionSet {
    pub fn parse(text: &str) -> Self {
        let questions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !line.starts_with("Answer") && !line.starts_with("Scrape"))
            .map(|line| NUMBERING.replace(line, "").into_owned())
            .collect();

        Self {
            text: text.to_string(),
            questions,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty lines with numbering removed and preamble skipped.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    fn find(&self, needle: &str) -> Option<&str> {
        self.questions
            .iter()
            .find(|q| q.to_ascii_lowercase().contains(needle))
            .map(String::as_str)
    }

    /// Reads the `$N bn` and `before YYYY` thresholds, keeping defaults for
    /// anything not stated.
    pub fn film_thresholds(&self) -> FilmThresholds {
        let mut thresholds = FilmThresholds::default();

        if let Some(line) = self.find("earliest") {
            if let Some(amount) = dollar_amount(line) {
                thresholds.earliest_gross = amount;
            }
        }

        if let Some(line) = self.find("before") {
            if let Some(amount) = dollar_amount(line) {
                thresholds.count_gross = amount;
            }
            let lowered = line.to_ascii_lowercase();
            if let Some(year) = lowered.find("before").and_then(|at| parse_year(&line[at..])) {
                thresholds.count_before_year = year;
            }
        }

        thresholds
    }

    /// Regression line style named by the plot question, over `default`.
    pub fn line_style(&self, default: &RegressionLineStyle) -> RegressionLineStyle {
        let source = self
            .find("regression line")
            .or_else(|| self.find("scatterplot"))
            .unwrap_or(&self.text)
            .to_ascii_lowercase();

        let pattern = [
            ("dotted", LinePattern::Dotted),
            ("dashed", LinePattern::Dashed),
            ("solid", LinePattern::Solid),
        ]
        .into_iter()
        .find(|(word, _)| source.contains(word))
        .map_or(default.pattern, |(_, pattern)| pattern);

        let color = COLOR_WORDS
            .iter()
            .find(|(word, _)| contains_word(&source, word))
            .map_or_else(|| default.color.clone(), |(_, hex)| (*hex).to_string());

        RegressionLineStyle {
            color,
            pattern,
            width: default.width,
        }
    }
}

fn dollar_amount(line: &str) -> Option<f64> {
    line.contains('$').then(|| parse_currency(line)).flatten()
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|token| token == word)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILMS: &str = "Scrape the list of highest grossing films from Wikipedia.

Answer the following questions and respond with a JSON array.

1. How many $2 bn movies were released before 2000?
2. Which is the earliest film that grossed over $1.5 bn?
3. What's the correlation between the Rank and Peak?
4. Draw a scatterplot of Rank and Peak along with a dotted red regression line through it.
";

    #[test]
    fn test_question_lines() {
        let set = QuestionSet::parse(FILMS);
        assert_eq!(set.questions().len(), 4);
        assert_eq!(
            set.questions()[0],
            "How many $2 bn movies were released before 2000?"
        );
        assert!(set.text().starts_with("Scrape"));
    }

    #[test]
    fn test_default_thresholds() {
        let set = QuestionSet::parse(FILMS);
        assert_eq!(set.film_thresholds(), FilmThresholds::default());
    }

    #[test]
    fn test_custom_thresholds() {
        let set = QuestionSet::parse(
            "1. How many $1.2 billion movies were released before 2010?\n\
             2. Which is the earliest film that grossed over $2 bn?",
        );
        let thresholds = set.film_thresholds();
        assert_eq!(thresholds.count_gross, 1.2e9);
        assert_eq!(thresholds.count_before_year, 2010);
        assert_eq!(thresholds.earliest_gross, 2.0e9);
    }

    #[test]
    fn test_line_style_from_text() {
        let style = QuestionSet::parse(FILMS).line_style(&RegressionLineStyle::default());
        assert_eq!(style.pattern, LinePattern::Dotted);
        assert_eq!(style.color, "#ff0000");
    }

    #[test]
    fn test_line_style_defaults() {
        let default = RegressionLineStyle::default();
        let style = QuestionSet::parse("Plot a scatterplot with a regression line").line_style(&default);
        assert_eq!(style, default);

        // "redo" must not read as red
        let style = QuestionSet::parse("Redo the solid blue regression line").line_style(&default);
        assert_eq!(style.pattern, LinePattern::Solid);
        assert_eq!(style.color, "#0000ff");
    }
}
