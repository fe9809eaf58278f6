//! Locale-aware number parsing and formatting

use crate::state::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language driving decimal and thousand separators
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    It,
    En,
}

impl Language {
    /// Resolve a language code, falling back to Italian for unknown codes
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::It,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    pub fn locale(self) -> &'static str {
        match self {
            Language::It => "it-IT",
            Language::En => "en-EN",
        }
    }

    pub fn decimal_separator(self) -> char {
        match self {
            Language::It => ',',
            Language::En => '.',
        }
    }

    pub fn thousand_separator(self) -> char {
        match self {
            Language::It => '.',
            Language::En => ',',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parse a localized numeric string
///
/// Thousand separators are dropped, the localized decimal separator is
/// normalized, then the longest numeric prefix is read. Returns `None` for
/// empty or malformed input.
pub fn parse_string_to_number(value: &str, language: Language) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    let normalized = match language {
        Language::It => {
            let stripped = value.replace('.', "");
            stripped.replacen(',', ".", 1)
        }
        Language::En => value.replace(',', ""),
    };

    parse_float_prefix(&normalized)
}

/// Format a number, or a localized numeric string, with `digits` decimals
///
/// Numbers are formatted as is and text is parsed first; null, booleans and
/// malformed text give `None`. Use [`format_number`] for a plain `f64`.
pub fn parse_number_to_string(
    value: impl Into<FieldValue>,
    language: Language,
    digits: u32,
) -> Option<String> {
    let number = match value.into() {
        FieldValue::Number(n) => n,
        FieldValue::Text(s) => parse_string_to_number(&s, language)?,
        FieldValue::Null | FieldValue::Bool(_) => return None,
    };
    Some(format_number(number, language, digits))
}

/// Most fraction digits [`format_number`] will print
pub const MAX_FRACTION_DIGITS: u32 = 20;

/// Format a number with exactly `digits` decimals and grouped thousands
///
/// `digits` is capped at [`MAX_FRACTION_DIGITS`].
pub fn format_number(value: f64, language: Language, digits: u32) -> String {
    let digits = digits.min(MAX_FRACTION_DIGITS);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    let rounded = if rounded.is_finite() { rounded } else { value };

    let fixed = format!("{:.*}", digits as usize, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(language.thousand_separator());
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push(language.decimal_separator());
        out.push_str(frac);
    }
    out
}

/// Read the longest prefix of `s` that forms a decimal float literal
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if has_digits || frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("it"), Language::It);
        assert_eq!(Language::from_code("de"), Language::It);
        assert_eq!(Language::En.locale(), "en-EN");
    }

    #[test]
    fn test_parse_italian() {
        assert_eq!(parse_string_to_number("1.234,56", Language::It), Some(1234.56));
        assert_eq!(parse_string_to_number("1.234", Language::It), Some(1234.0));
        assert_eq!(parse_string_to_number("-7,5", Language::It), Some(-7.5));
    }

    #[test]
    fn test_parse_english() {
        assert_eq!(parse_string_to_number("1,234.56", Language::En), Some(1234.56));
        assert_eq!(parse_string_to_number("42", Language::En), Some(42.0));
        assert_eq!(parse_string_to_number(".5", Language::En), Some(0.5));
    }

    #[test]
    fn test_parse_reads_numeric_prefix() {
        assert_eq!(parse_string_to_number("12abc", Language::En), Some(12.0));
        assert_eq!(parse_string_to_number("  3.5kg", Language::En), Some(3.5));
        assert_eq!(parse_string_to_number("1e3", Language::En), Some(1000.0));
        assert_eq!(parse_string_to_number("2e", Language::En), Some(2.0));
    }

    #[test]
    fn test_parse_malformed_is_none() {
        assert_eq!(parse_string_to_number("", Language::It), None);
        assert_eq!(parse_string_to_number("abc", Language::En), None);
        assert_eq!(parse_string_to_number("-", Language::En), None);
        assert_eq!(parse_string_to_number(".", Language::En), None);
        assert_eq!(parse_string_to_number("€ 10", Language::It), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.5, Language::It, 2), "1.234,50");
        assert_eq!(format_number(1234.5, Language::En, 2), "1,234.50");
        assert_eq!(format_number(1234567.0, Language::En, 0), "1,234,567");
        assert_eq!(format_number(-999.0, Language::It, 0), "-999");
        assert_eq!(format_number(-1000.0, Language::It, 0), "-1.000");
        assert_eq!(format_number(2.5, Language::En, 0), "3");
        assert_eq!(format_number(-0.2, Language::En, 0), "0");
    }

    #[test]
    fn test_parse_number_to_string() {
        assert_eq!(
            parse_number_to_string("1234,5", Language::It, 1),
            Some("1.234,5".to_string())
        );
        assert_eq!(parse_number_to_string("x", Language::En, 2), None);
        assert_eq!(
            parse_number_to_string(1234.5, Language::En, 2),
            Some("1,234.50".to_string())
        );
        assert_eq!(parse_number_to_string(FieldValue::Null, Language::En, 2), None);
    }

    #[test]
    fn test_fraction_digits_are_capped() {
        assert_eq!(
            format_number(1.5, Language::En, u32::MAX),
            "1.50000000000000000000"
        );
        assert_eq!(
            format_number(1.5, Language::En, u32::MAX),
            format_number(1.5, Language::En, MAX_FRACTION_DIGITS)
        );
    }

    #[test]
    fn test_round_trip_preserves_value() {
        let cases = [
            ("1.234,56", Language::It, 2),
            ("0,5", Language::It, 1),
            ("-12.000", Language::It, 0),
            ("1,234.56", Language::En, 2),
            ("0.5", Language::En, 1),
            ("-12,000", Language::En, 0),
        ];
        for (input, language, digits) in cases {
            let number = parse_string_to_number(input, language);
            let formatted = parse_number_to_string(number, language, digits).unwrap();
            assert_eq!(formatted, input, "round trip of {input} ({language})");
            assert_eq!(parse_string_to_number(&formatted, language), number);
        }
    }
}
