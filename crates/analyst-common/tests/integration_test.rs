//! Integration tests for analyst-common crate.

use analyst_common::{
    fetcher::main_table_from_html, parse_currency, parse_leading_number, parse_year,
    truncate_string,
};
use proptest::prelude::*;

const PAGE: &str = r#"
<table class="wikitable">
  <tr><th>Rank</th><th>Peak</th><th>Title</th><th>Worldwide gross</th><th>Year</th></tr>
  <tr><td>1</td><td>1</td><th>Avatar</th><td>$2,923,706,026</td><td>2009</td></tr>
  <tr><td>4</td><td>1</td><th>Titanic</th><td>$2,257,844,554<sup>[a]</sup></td><td>1997</td></tr>
  <tr><td>8</td><td>3TS</td><th>Jurassic World</th><td>$1,671,537,444</td><td>2015</td></tr>
</table>
"#;

#[test]
fn test_scraped_columns_parse_as_numbers() {
    let table = main_table_from_html(PAGE, "inline").unwrap();

    let grosses: Vec<f64> = table.column(3).filter_map(parse_currency).collect();
    let years: Vec<i32> = table.column(4).filter_map(parse_year).collect();
    let peaks: Vec<f64> = table.column(1).filter_map(parse_leading_number).collect();

    assert_eq!(grosses, vec![2_923_706_026.0, 2_257_844_554.0, 1_671_537_444.0]);
    assert_eq!(years, vec![2009, 1997, 2015]);
    assert_eq!(peaks, vec![1.0, 1.0, 3.0]);
}

#[test]
fn test_truncate_string() {
    let input = "This is a very long string that should be truncated";
    assert_eq!(truncate_string(input, 20), "This is a very lo...");
    assert_eq!(truncate_string("Short", 20), "Short");
}

proptest! {
    #[test]
    fn test_currency_roundtrips_formatted_integers(value in 0u64..10_000_000_000u64) {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        prop_assert_eq!(parse_currency(&format!("${grouped}")), Some(value as f64));
    }

    #[test]
    fn test_year_extracted_from_surrounding_text(year in 1800i32..2100, suffix in "[A-Z]{0,3}") {
        prop_assert_eq!(parse_year(&format!("Released {year}{suffix}")), Some(year));
    }
}
