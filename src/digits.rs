//! Persian to Western digit normalization

use std::borrow::Cow;

/// Extended Arabic-Indic (Persian) digits, indexed by their value.
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Map a single Persian digit to its Western counterpart. Any other character
/// is returned unchanged.
pub fn to_western_digit(c: char) -> char {
    match PERSIAN_DIGITS.iter().position(|&d| d == c) {
        Some(value) => char::from(b'0' + value as u8),
        None => c,
    }
}

/// Replace every Persian digit in `input` with the matching ASCII digit.
///
/// Non-digit characters pass through untouched and the character count is
/// preserved. Borrows the input when it contains nothing to replace.
pub fn normalize_digits(input: &str) -> Cow<'_, str> {
    if input.chars().any(|c| PERSIAN_DIGITS.contains(&c)) {
        Cow::Owned(input.chars().map(to_western_digit).collect())
    } else {
        Cow::Borrowed(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persian_digits_become_western() {
        assert_eq!(normalize_digits("۱۲۳"), "123");
        assert_eq!(normalize_digits("۴.۵"), "4.5");
        assert_eq!(normalize_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
    }

    #[test]
    fn test_mixed_text_keeps_structure() {
        let input = "۱۲,000 تومان";
        let output = normalize_digits(input);
        assert_eq!(output, "12,000 تومان");
        assert_eq!(output.chars().count(), input.chars().count());
    }

    #[test]
    fn test_western_input_is_borrowed() {
        assert!(matches!(normalize_digits("4.5"), Cow::Borrowed("4.5")));
        assert!(matches!(normalize_digits("جدید"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_idempotent() {
        for input in ["۳.۸", "12 ۳۴", "", "no digits", "۹۹۹"] {
            let once = normalize_digits(input).into_owned();
            let twice = normalize_digits(&once).into_owned();
            assert_eq!(once, twice);
            assert!(!twice.chars().any(|c| PERSIAN_DIGITS.contains(&c)));
        }
    }

    #[test]
    fn test_single_char_mapping() {
        assert_eq!(to_western_digit('۷'), '7');
        assert_eq!(to_western_digit('7'), '7');
        assert_eq!(to_western_digit('x'), 'x');
    }
}
