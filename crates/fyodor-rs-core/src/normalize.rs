//! Canonicalization of raw message text before fingerprinting.

use crate::error::CoreError;
use regex::Regex;

/// User, nickname and channel mentions: `<@id>`, `<@!id>`, `<#id>`.
const MENTION_PATTERN: &str = r"<(?:@!?|#)\d{5,20}>";
/// Unicode whitespace plus the ASCII separators `\x1C`-`\x1F`.
const WHITESPACE_PATTERN: &str = r"[\s\x1C-\x1F]+";
/// Characters dropped after mentions are removed.
const STRIPPED_CHARS: &[char] = &[
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '!', '@', '#', '$', '%', '^', '&', '*', '(',
    ')', '_', '+', '"', '№', ';', ':', '?', '=', '-',
];

/// Compiled normalization patterns.
#[derive(Debug, Clone)]
pub struct Normalizer {
    mention: Regex,
    whitespace: Regex,
}

impl Normalizer {
    /// Compile the normalization patterns.
    pub fn new() -> Result<Self, CoreError> {
        Ok(Self {
            mention: Regex::new(MENTION_PATTERN)?,
            whitespace: Regex::new(WHITESPACE_PATTERN)?,
        })
    }

    /// Canonicalize raw text, returning `None` when nothing meaningful remains.
    ///
    /// Steps: lowercase, drop mentions, drop digits and the symbol set,
    /// collapse whitespace runs to a single space, trim.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let lowered = raw.to_lowercase();
        let without_mentions = self.mention.replace_all(&lowered, "");
        let stripped: String = without_mentions
            .chars()
            .filter(|ch| !STRIPPED_CHARS.contains(ch))
            .collect();
        let collapsed = self.whitespace.replace_all(&stripped, " ");
        let trimmed = collapsed.trim_matches(' ');
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Normalizer;
    use pretty_assertions::assert_eq;

    fn normalize(raw: &str) -> Option<String> {
        Normalizer::new().expect("normalizer").normalize(raw)
    }

    #[test]
    fn strips_user_mention() {
        assert_eq!(normalize("<@123456789> hello").as_deref(), Some("hello"));
    }

    #[test]
    fn strips_nickname_and_channel_mentions() {
        assert_eq!(
            normalize("<@!12345> see <#98765432109876543> now").as_deref(),
            Some("see now")
        );
    }

    #[test]
    fn keeps_mention_shaped_text_outside_digit_bounds() {
        // four digits is too short, the brackets survive
        assert_eq!(normalize("<@1234> hi").as_deref(), Some("<> hi"));
    }

    #[test]
    fn folds_case_symbols_and_whitespace() {
        assert_eq!(
            normalize("Hello   WORLD!! #1").as_deref(),
            Some("hello world")
        );
        assert_eq!(normalize("The Quick Fox!!").as_deref(), Some("the quick fox"));
    }

    #[test]
    fn keeps_characters_outside_the_symbol_set() {
        assert_eq!(
            normalize("Hello,   WORLD!! #1").as_deref(),
            Some("hello, world")
        );
        assert_eq!(normalize("a.b/c").as_deref(), Some("a.b/c"));
    }

    #[test]
    fn removes_numero_sign_and_quotes() {
        assert_eq!(normalize("order №42 \"now\"").as_deref(), Some("order now"));
    }

    #[test]
    fn collapses_unicode_whitespace() {
        assert_eq!(
            normalize("\tfoo\u{00A0}\u{2003}bar\n\nbaz ").as_deref(),
            Some("foo bar baz")
        );
    }

    #[test]
    fn digits_and_punctuation_only_is_empty() {
        assert_eq!(normalize("12345!!!"), None);
        assert_eq!(normalize("<@123456789>"), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let inputs = [
            "Hello,   WORLD!! #1",
            "<@123456789> hello",
            "  Mixed\tCASE   text №7 ",
            "ÀÉÎ õü  ß",
            "<@!1234567> <#1234567> spam spam",
            "emoji 💩 stays",
        ];
        for input in inputs {
            let once = normalize(input).expect("non-empty");
            let twice = normalize(&once).expect("still non-empty");
            assert_eq!(once, twice, "input: {input:?}");
        }
    }
}
