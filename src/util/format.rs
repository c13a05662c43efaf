//! Locale-style number formatting for labels, ticks and tooltips.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Formats numbers with a bounded number of fraction digits.
pub trait NumberFormat {
    /// Format `value` rounded to `max_decimals` fraction digits, keeping at
    /// least `min_decimals` of them.
    fn format(
        &self,
        value: f64,
        min_decimals: usize,
        max_decimals: usize,
    ) -> String;

    /// Format with exactly `decimals` fraction digits.
    fn format_fixed(&self, value: f64, decimals: usize) -> String {
        self.format(value, decimals, decimals)
    }
}

/// Decimal formatter with a configurable grouping and decimal separator.
///
/// The default renders `1234567.891` as `1,234,567.891`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DecimalFormat {
    /// Separator between integer and fraction digits.
    pub decimal_separator: char,
    /// Thousands separator; `None` disables grouping.
    pub group_separator: Option<char>,
}

impl Default for DecimalFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: Some(','),
        }
    }
}

impl NumberFormat for DecimalFormat {
    fn format(
        &self,
        value: f64,
        min_decimals: usize,
        max_decimals: usize,
    ) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let max_decimals = max_decimals.max(min_decimals);
        let rendered = format!("{:.*}", max_decimals, value.abs());
        let (int_part, frac_part) = rendered
            .split_once('.')
            .unwrap_or((rendered.as_str(), ""));

        let mut frac = frac_part.trim_end_matches('0');
        if frac.len() < min_decimals {
            frac = &frac_part[..min_decimals];
        }

        let mut out = String::with_capacity(rendered.len() + 4);
        let is_zero = int_part.bytes().all(|b| b == b'0')
            && frac.bytes().all(|b| b == b'0');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        push_grouped(&mut out, int_part, self.group_separator);
        if !frac.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

fn push_grouped(out: &mut String, digits: &str, separator: Option<char>) {
    let Some(sep) = separator else {
        out.push_str(digits);
        return;
    };
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        let f = DecimalFormat::default();
        assert_eq!(f.format(1_234_567.0, 0, 0), "1,234,567");
        assert_eq!(f.format(999.0, 0, 0), "999");
        assert_eq!(f.format(1000.0, 0, 3), "1,000");
    }

    #[test]
    fn trims_fraction_to_bounds() {
        let f = DecimalFormat::default();
        assert_eq!(f.format(3.14159, 0, 3), "3.142");
        assert_eq!(f.format(2.5, 0, 3), "2.5");
        assert_eq!(f.format(2.0, 2, 3), "2.00");
        assert_eq!(f.format_fixed(0.26, 1), "0.3");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        let f = DecimalFormat::default();
        assert_eq!(f.format(-0.0001, 0, 2), "0");
        assert_eq!(f.format(-1500.5, 1, 1), "-1,500.5");
    }

    #[test]
    fn custom_separators() {
        let f = DecimalFormat {
            decimal_separator: ',',
            group_separator: Some('.'),
        };
        assert_eq!(f.format(12345.6, 1, 1), "12.345,6");
        let plain = DecimalFormat {
            group_separator: None,
            ..DecimalFormat::default()
        };
        assert_eq!(plain.format(12345.0, 0, 0), "12345");
    }
}
