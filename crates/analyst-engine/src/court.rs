//! Mocked answers for the high court judgement questions.

/// Question asking which court disposed the most cases.
pub const TOP_COURT_QUESTION: &str = "Which high court disposed the most cases from 2019 - 2022?";

/// Question asking for the registration-to-decision regression slope.
pub const SLOPE_QUESTION: &str =
    "What's the regression slope of the date_of_registration - decision_date by year in the court=33_10?";

/// Question asking for the delay scatterplot.
pub const PLOT_QUESTION: &str = "Plot the year and # of days of delay from the above question as a scatterplot with a regression line. Encode as a base64 data URI under 100,000 characters";

/// Court id returned for the top-court question.
pub const MOCK_TOP_COURT: &str = "33_10";

/// Slope returned for the regression question.
pub const MOCK_SLOPE: f64 = 0.123456;

/// Title used for the delay chart.
pub const PLOT_TITLE: &str = "Delay by year";
