use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a letter, number, underscore, whitespace or in the
/// Arabic block. Combining marks outside the Arabic block are stripped.
static STRIP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}_\x{0600}-\x{06FF}\s]").expect("Invalid strip pattern")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"));

/// Canonicalize free-text symptom input.
///
/// Lowercases, folds hamza/madda alef variants (أ إ آ) to bare alef,
/// replaces punctuation and symbols with spaces, then collapses whitespace.
/// Never fails; empty input yields empty output. Idempotent.
pub fn normalize_text(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' => 'ا',
            other => other,
        })
        .collect();

    let stripped = STRIP_PATTERN.replace_all(&folded, " ");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   \n\t "), "");
    }

    #[test]
    fn alef_variants_fold_to_bare_alef() {
        assert_eq!(normalize_text("ألم إصابة آلام"), "الم اصابة الام");
    }

    #[test]
    fn punctuation_becomes_space_and_collapses() {
        assert_eq!(normalize_text("ما يتنفس!!  ،  عمره: 22."), "ما يتنفس ، عمره 22");
    }

    #[test]
    fn combining_marks_outside_arabic_block_are_stripped() {
        assert_eq!(normalize_text("cafe\u{301} ok"), "cafe ok");
        // Zero-width non-joiner is not a word character
        assert_eq!(normalize_text("می\u{200C}خواهم"), "می خواهم");
    }

    #[test]
    fn arabic_harakat_are_kept() {
        assert_eq!(normalize_text("يطرّش"), "يطرّش");
    }

    #[test]
    fn latin_is_lowercased() {
        assert_eq!(normalize_text("Needs CPR, NOW"), "needs cpr now");
    }

    #[test]
    fn arabic_punctuation_in_block_is_kept() {
        // Arabic comma (U+060C) and tatweel (U+0640) sit inside the Arabic block
        let text = normalize_text("يطـرش، كثير");
        assert!(text.contains('،'));
        assert!(text.contains('ـ'));
    }

    #[test]
    fn emoji_and_symbols_are_stripped() {
        assert_eq!(normalize_text("🔴 نزيف *شديد*"), "نزيف شديد");
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "",
            "أخوي طاح وما يتنفس!!! عمره 22 سنة",
            "  Chest   PAIN؟ ضيق صدر… ",
            "إبني (٥ سنوات) يطرّش",
            "Ça va? ñ ß",
        ];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "not a fixed point: {input}");
        }
    }
}
