use crate::Number;

/// Convention used to decide whether a raw CSV field is a number.
///
/// The default is the invariant convention: `.` as decimal separator, no
/// digit grouping, leading zeros allowed. Only plain decimal spellings are
/// accepted (sign, digits, separators, exponent), so words such as `inf` or
/// `NaN` stay text even though `str::parse` would take them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub group_separator: Option<char>,
    pub allow_leading_zeros: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimal_separator: '.',
            group_separator: None,
            allow_leading_zeros: true,
        }
    }
}

impl NumberFormat {
    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_group_separator(mut self, separator: char) -> Self {
        self.group_separator = Some(separator);
        self
    }

    pub fn with_leading_zeros(mut self, allow: bool) -> Self {
        self.allow_leading_zeros = allow;
        self
    }

    /// Parses `field` as a `T`, or returns `None` if it does not follow
    /// this convention or does not fit `T`.
    pub fn parse<T: Number>(&self, field: &str) -> Option<T> {
        let mut canonical = String::with_capacity(field.len());
        for c in field.chars() {
            if Some(c) == self.group_separator {
                continue;
            }
            match c {
                _ if c == self.decimal_separator => canonical.push('.'),
                '0'..='9' | '+' | '-' | 'e' | 'E' => canonical.push(c),
                _ => return None,
            }
        }
        if !canonical.bytes().any(|b| b.is_ascii_digit()) {
            return None;
        }
        if !self.allow_leading_zeros && has_leading_zero(&canonical) {
            return None;
        }
        canonical.parse().ok()
    }
}

// "0", "0.5" and "-0" are fine; "007" and "-01.5" are not.
fn has_leading_zero(canonical: &str) -> bool {
    let unsigned = canonical.trim_start_matches(['+', '-']);
    let mut digits = unsigned.bytes();
    matches!(
        (digits.next(), digits.next()),
        (Some(b'0'), Some(b'0'..=b'9'))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_parses_plain_numbers() {
        let format = NumberFormat::default();
        assert_eq!(format.parse::<f64>("1.5"), Some(1.5));
        assert_eq!(format.parse::<f64>("-2e3"), Some(-2000.0));
        assert_eq!(format.parse::<i32>("007"), Some(7));
        assert_eq!(format.parse::<i32>("1.5"), None);
        assert_eq!(format.parse::<u8>("300"), None);
    }

    #[test]
    fn rejects_words_and_empty() {
        let format = NumberFormat::default();
        assert_eq!(format.parse::<f64>(""), None);
        assert_eq!(format.parse::<f64>("NaN"), None);
        assert_eq!(format.parse::<f64>("inf"), None);
        assert_eq!(format.parse::<f64>("cat"), None);
        assert_eq!(format.parse::<f64>("-"), None);
    }

    #[test]
    fn leading_zeros_can_be_disallowed() {
        let format = NumberFormat::default().with_leading_zeros(false);
        assert_eq!(format.parse::<i64>("007"), None);
        assert_eq!(format.parse::<f64>("-01.5"), None);
        assert_eq!(format.parse::<i64>("0"), Some(0));
        assert_eq!(format.parse::<f64>("0.25"), Some(0.25));
    }

    #[test]
    fn european_convention() {
        let format = NumberFormat::default()
            .with_decimal_separator(',')
            .with_group_separator('.');
        assert_eq!(format.parse::<f64>("1.234,5"), Some(1234.5));
        assert_eq!(format.parse::<f64>("1.5"), Some(15.0));
    }
}
