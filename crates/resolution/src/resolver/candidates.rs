//! Candidate derivation from extracted entity strings.
//!
//! Each entity string yields up to two candidates: an uppercase
//! ticker-shaped token (when the string passes the shape checks) and the
//! original phrase for name-based fuzzy search. Keeping both means an
//! aggressive ticker filter never starves company-name matching.
//!
//! Shape checks are explicit whitelist-style scans rather than regexes,
//! matching how symbol suffixes are recognized elsewhere in this codebase.

use crate::models::Candidate;

/// Derive the normalized candidate set for a list of entity strings.
///
/// A string that fails every ticker-shape check is not an error; it simply
/// contributes its phrase candidate only. Duplicate candidates (same kind
/// and text) are emitted once.
pub fn derive_candidates(entities: &[String]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::with_capacity(entities.len() * 2);

    for entity in entities {
        let stripped = strip_ticker_marker(entity.trim());
        if stripped.is_empty() {
            continue;
        }

        if is_ticker_shaped(stripped) {
            push_unique(&mut candidates, Candidate::ticker(stripped.to_uppercase()));
        }
        push_unique(&mut candidates, Candidate::phrase(stripped));
    }

    log::debug!(
        "Derived {} candidates from {} entities",
        candidates.len(),
        entities.len()
    );
    candidates
}

fn push_unique(candidates: &mut Vec<Candidate>, candidate: Candidate) {
    if !candidates.contains(&candidate) {
        candidates.push(candidate);
    }
}

/// Strip a leading currency-style ticker marker ("$BABA" -> "BABA").
fn strip_ticker_marker(text: &str) -> &str {
    text.strip_prefix('$').unwrap_or(text)
}

/// Whether a string plausibly is a ticker symbol.
///
/// Accepted shapes:
/// - 1 to 5 ASCII letters ("NVDA", "F")
/// - digits + `.` + 1-2 letter regional suffix ("9988.HK", "600519.SS")
/// - letters + `.` + single-letter share class ("BRK.B")
fn is_ticker_shaped(text: &str) -> bool {
    if let Some((head, tail)) = text.split_once('.') {
        if head.is_empty() || tail.is_empty() || tail.len() > 2 {
            return false;
        }
        if !tail.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        if head.chars().all(|c| c.is_ascii_digit()) {
            // Regionally coded ticker: numeric body, short exchange suffix.
            return head.len() <= 6;
        }
        // Share-class ticker: letter body, single-letter class.
        return tail.len() == 1
            && head.len() <= 5
            && head.chars().all(|c| c.is_ascii_alphabetic());
    }

    !text.is_empty() && text.len() <= 5 && text.chars().all(|c| c.is_ascii_alphabetic())
}

/// Uppercase tokens of the original query text, for explicit-mention checks.
///
/// Splits on anything that is not alphanumeric or `.` so regionally coded
/// symbols like "9988.HK" survive as single tokens.
pub(crate) fn query_tokens(original_text: &str) -> Vec<String> {
    original_text
        .split(|c: char| !(c.is_alphanumeric() || c == '.'))
        .filter(|token| !token.is_empty())
        .map(|token| token.trim_matches('.').to_uppercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Whether a catalog symbol literally appears as a token in the query text.
pub(crate) fn is_mentioned(tokens: &[String], symbol: &str) -> bool {
    let symbol = symbol.to_uppercase();
    tokens.iter().any(|token| *token == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ticker_yields_both_candidates() {
        let candidates = derive_candidates(&["BABA".to_string()]);
        assert_eq!(
            candidates,
            vec![Candidate::ticker("BABA"), Candidate::phrase("BABA")]
        );
    }

    #[test]
    fn test_company_name_yields_phrase_only() {
        let candidates = derive_candidates(&["Alibaba Group".to_string()]);
        assert_eq!(candidates, vec![Candidate::phrase("Alibaba Group")]);
    }

    #[test]
    fn test_currency_marker_is_stripped() {
        let candidates = derive_candidates(&["$nvda".to_string()]);
        assert_eq!(
            candidates,
            vec![Candidate::ticker("NVDA"), Candidate::phrase("nvda")]
        );
    }

    #[test]
    fn test_ticker_shapes() {
        assert!(is_ticker_shaped("F"));
        assert!(is_ticker_shaped("NVDA"));
        assert!(is_ticker_shaped("GOOGL"));
        assert!(is_ticker_shaped("9988.HK"));
        assert!(is_ticker_shaped("600519.SS"));
        assert!(is_ticker_shaped("BRK.B"));

        assert!(!is_ticker_shaped("ALIBABA"));
        assert!(!is_ticker_shaped("9988.HKEX"));
        assert!(!is_ticker_shaped("BRK.BB"));
        assert!(!is_ticker_shaped(".HK"));
        assert!(!is_ticker_shaped("12345678.SS"));
        assert!(!is_ticker_shaped("AB12"));
    }

    #[test]
    fn test_duplicate_entities_collapse() {
        let candidates = derive_candidates(&["BABA".to_string(), "$BABA".to_string()]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_empty_entities_are_skipped() {
        let candidates = derive_candidates(&["".to_string(), "  ".to_string(), "$".to_string()]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_query_tokens_keep_regional_symbols() {
        let tokens = query_tokens("compare 9988.HK and BABA, please");
        assert!(tokens.contains(&"9988.HK".to_string()));
        assert!(tokens.contains(&"BABA".to_string()));
        assert!(is_mentioned(&tokens, "baba"));
        assert!(!is_mentioned(&tokens, "MSFT"));
    }

    #[test]
    fn test_query_tokens_trim_sentence_dots() {
        let tokens = query_tokens("I like BABA.");
        assert!(is_mentioned(&tokens, "BABA"));
    }
}
