use std::sync::LazyLock;

use regex::Regex;

use crate::models::checked_age;

/// ASCII, Arabic-Indic and Extended Arabic-Indic digits.
const DIGIT: &str = r"[0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}]";

/// Tried in order; the first in-range match wins.
static AGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "عمره 22", "عمرها ٥", "العمر 40"
        Regex::new(&format!(r"(?:عمره|عمرها|العمر)\s*({DIGIT}{{1,3}})"))
            .expect("Invalid age-word pattern"),
        // "22 سنة", "5 سنوات"
        Regex::new(&format!(r"({DIGIT}{{1,3}})\s*(?:سنه|سنة|سنوات)"))
            .expect("Invalid year-unit pattern"),
    ]
});

/// Extract an age in (0, 120) from normalized text.
///
/// Only the first match of each pattern is considered. An out-of-range
/// value falls through to the next pattern; no match yields `None`.
pub fn extract_age(text: &str) -> Option<u32> {
    AGE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let n = parse_digits(caps.get(1)?.as_str())?;
        checked_age(i64::from(n))
    })
}

fn parse_digits(s: &str) -> Option<u32> {
    s.chars().try_fold(0u32, |acc, c| {
        let d = digit_value(c)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_word_followed_by_digits() {
        assert_eq!(extract_age("طاح وعمره 22 ويتنفس"), Some(22));
        assert_eq!(extract_age("عمرها5"), Some(5));
        assert_eq!(extract_age("العمر 81"), Some(81));
    }

    #[test]
    fn digits_followed_by_year_unit() {
        assert_eq!(extract_age("ولد 5 سنوات يطرش"), Some(5));
        assert_eq!(extract_age("رجل 40 سنة"), Some(40));
        assert_eq!(extract_age("3سنه"), Some(3));
    }

    #[test]
    fn arabic_indic_digits() {
        assert_eq!(extract_age("عمره ٢٢"), Some(22));
        assert_eq!(extract_age("۷ سنوات"), Some(7));
    }

    #[test]
    fn zero_and_too_old_are_absent() {
        assert_eq!(extract_age("عمره 0"), None);
        assert_eq!(extract_age("عمره 120"), None);
        assert_eq!(extract_age("150 سنة"), None);
    }

    #[test]
    fn no_mention_is_absent() {
        assert_eq!(extract_age(""), None);
        assert_eq!(extract_age("ما يتنفس"), None);
        assert_eq!(extract_age("صار له 3 ساعات"), None);
    }

    #[test]
    fn first_pattern_wins_when_both_match() {
        assert_eq!(extract_age("عمره 30 وصار له 2 سنوات مريض"), Some(30));
    }

    #[test]
    fn out_of_range_first_pattern_falls_through() {
        assert_eq!(extract_age("عمره 0 تقريبا 4 سنوات"), Some(4));
    }

    #[test]
    fn only_first_match_of_a_pattern_counts() {
        // The first year-unit match is out of range; a later one is not retried.
        assert_eq!(extract_age("200 سنة و 30 سنة"), None);
    }

    #[test]
    fn long_numbers_match_three_digits() {
        // \d{1,3} takes the leading three digits of a longer run
        assert_eq!(extract_age("عمره 1234"), None);
        assert_eq!(extract_age("عمره 0450"), Some(45));
    }
}
