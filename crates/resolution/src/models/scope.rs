//! Market scopes and the exchange tables consumed everywhere.
//!
//! A scope is the requested market/exchange-region filter for a resolution
//! call. All scope-to-exchange knowledge lives in this one module: accepted
//! exchange codes, sort priority, the GLOBAL liquidity and anchor preference
//! lists, and the market-hint vocabulary scanned in original query text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of exchange codes a catalog snapshot may use.
pub const KNOWN_EXCHANGES: &[&str] = &["NYSE", "NASDAQ", "AMEX", "HKSE", "SHH", "SHZ"];

/// Preferred listings for GLOBAL tie-breaking: the most liquid venues.
/// Used only for cross-listing disambiguation, never for filtering.
pub const GLOBAL_PRIMARY_EXCHANGES: &[&str] = &["NYSE", "NASDAQ"];

/// Home-market anchor exchanges for GLOBAL tie-breaking when no primary
/// listing exists (dual Asian listings and the like).
pub const GLOBAL_ANCHOR_EXCHANGES: &[&str] = &["HKSE", "SHH", "SHZ"];

/// The requested market/exchange-region filter for a resolution call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketScope {
    /// Any exchange; liquidity preferences apply only to tie-breaks.
    Global,
    /// United States listings (NYSE, NASDAQ, AMEX).
    Us,
    /// Mainland China listings (Shanghai, Shenzhen).
    Cn,
    /// Hong Kong listings.
    Hk,
}

impl MarketScope {
    /// All scopes, used to build one index partition each.
    pub const ALL: &'static [MarketScope] = &[
        MarketScope::Global,
        MarketScope::Us,
        MarketScope::Cn,
        MarketScope::Hk,
    ];

    /// Exchange codes this scope accepts, in priority order.
    ///
    /// GLOBAL returns an empty slice: it accepts every exchange and has no
    /// internal priority order.
    pub fn accepted_exchanges(&self) -> &'static [&'static str] {
        match self {
            MarketScope::Global => &[],
            MarketScope::Us => &["NYSE", "NASDAQ", "AMEX"],
            MarketScope::Cn => &["SHH", "SHZ"],
            MarketScope::Hk => &["HKSE"],
        }
    }

    /// Whether a listing on `exchange` is in scope.
    pub fn accepts(&self, exchange: &str) -> bool {
        match self {
            MarketScope::Global => true,
            _ => self.accepted_exchanges().contains(&exchange),
        }
    }

    /// Sort priority of an exchange within this scope (lower sorts first).
    ///
    /// Only meaningful for scopes with an internal exchange order; GLOBAL
    /// ranks every exchange equally so confidence decides. Exchanges outside
    /// the accepted set (explicit-mention survivors) sort last.
    pub fn sort_priority(&self, exchange: &str) -> usize {
        match self {
            MarketScope::Global => 0,
            _ => self
                .accepted_exchanges()
                .iter()
                .position(|code| *code == exchange)
                .unwrap_or(usize::MAX),
        }
    }

    /// Market-hint vocabulary identifying this scope in free-form text.
    ///
    /// The original (untranslated) query text is scanned, so each scope
    /// carries both English and Chinese market terms. All entries lowercase.
    /// Plain-word entries match on word boundaries; entries carrying
    /// punctuation or CJK characters match as substrings (Chinese text has
    /// no word separators).
    fn hint_keywords(&self) -> &'static [&'static str] {
        match self {
            MarketScope::Global => &[],
            MarketScope::Us => &[
                "us stock",
                "us stocks",
                "u.s.",
                "nyse",
                "nasdaq",
                "wall street",
                "美股",
            ],
            MarketScope::Cn => &[
                "a-share",
                "a-shares",
                "shanghai",
                "shenzhen",
                "a股",
                "上海",
                "深圳",
            ],
            MarketScope::Hk => &[
                "hong kong",
                "hongkong",
                "hkex",
                "hk stock",
                "hk stocks",
                "h-share",
                "h-shares",
                "港股",
                "香港",
            ],
        }
    }
}

impl FromStr for MarketScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GLOBAL" | "ALL" => Ok(MarketScope::Global),
            "US" | "USA" => Ok(MarketScope::Us),
            "CN" | "CHINA" => Ok(MarketScope::Cn),
            "HK" | "HONGKONG" | "HONG_KONG" => Ok(MarketScope::Hk),
            other => Err(format!("Unknown market scope: {other}")),
        }
    }
}

impl std::fmt::Display for MarketScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarketScope::Global => "GLOBAL",
            MarketScope::Us => "US",
            MarketScope::Cn => "CN",
            MarketScope::Hk => "HK",
        };
        write!(f, "{name}")
    }
}

/// Scan original query text for scope-identifying vocabulary.
///
/// Returns the first scope (HK, CN, US order) with a keyword present in the
/// lowercased text, or `None`. The fixed order keeps detection deterministic
/// when a query names several markets.
///
/// Keywords made of plain words are matched as whole-word sequences, so
/// conversational phrases ("which shares", "buy a share") never fire a
/// hint. Keywords carrying punctuation ("u.s.", "a-share") or CJK text are
/// matched as substrings.
pub fn detect_market_hint(original_text: &str) -> Option<MarketScope> {
    let text = original_text.to_lowercase();
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    for scope in [MarketScope::Hk, MarketScope::Cn, MarketScope::Us] {
        if scope
            .hint_keywords()
            .iter()
            .any(|kw| keyword_present(kw, &text, &words))
        {
            return Some(scope);
        }
    }
    None
}

fn keyword_present(keyword: &str, text: &str, words: &[&str]) -> bool {
    let needs_substring = keyword
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != ' ');
    if needs_substring {
        return text.contains(keyword);
    }

    let keyword_words: Vec<&str> = keyword.split(' ').filter(|w| !w.is_empty()).collect();
    if keyword_words.is_empty() {
        return false;
    }
    words
        .windows(keyword_words.len())
        .any(|window| window == keyword_words.as_slice())
}

/// Friendly display name for an exchange code.
pub fn exchange_name(code: &str) -> Option<&'static str> {
    match code {
        "NYSE" => Some("New York Stock Exchange"),
        "NASDAQ" => Some("NASDAQ"),
        "AMEX" => Some("NYSE American"),
        "HKSE" => Some("Hong Kong Stock Exchange"),
        "SHH" => Some("Shanghai Stock Exchange"),
        "SHZ" => Some("Shenzhen Stock Exchange"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_accepts() {
        assert!(MarketScope::Global.accepts("NYSE"));
        assert!(MarketScope::Global.accepts("HKSE"));
        assert!(MarketScope::Us.accepts("NASDAQ"));
        assert!(!MarketScope::Us.accepts("HKSE"));
        assert!(MarketScope::Hk.accepts("HKSE"));
        assert!(!MarketScope::Cn.accepts("NYSE"));
    }

    #[test]
    fn test_sort_priority_follows_accepted_order() {
        assert_eq!(MarketScope::Us.sort_priority("NYSE"), 0);
        assert_eq!(MarketScope::Us.sort_priority("NASDAQ"), 1);
        assert_eq!(MarketScope::Us.sort_priority("HKSE"), usize::MAX);
        assert_eq!(MarketScope::Global.sort_priority("HKSE"), 0);
    }

    #[test]
    fn test_detect_hint_english() {
        assert_eq!(
            detect_market_hint("Alibaba Hong Kong stocks"),
            Some(MarketScope::Hk)
        );
        assert_eq!(
            detect_market_hint("tech names on the NASDAQ"),
            Some(MarketScope::Us)
        );
        assert_eq!(
            detect_market_hint("Shanghai listed liquor makers"),
            Some(MarketScope::Cn)
        );
        assert_eq!(detect_market_hint("compare Alibaba and NVDA"), None);
    }

    #[test]
    fn test_detect_hint_chinese() {
        assert_eq!(detect_market_hint("阿里巴巴港股"), Some(MarketScope::Hk));
        assert_eq!(detect_market_hint("贵州茅台A股"), Some(MarketScope::Cn));
        assert_eq!(detect_market_hint("英伟达美股"), Some(MarketScope::Us));
    }

    #[test]
    fn test_hint_keywords_match_whole_words() {
        // Everyday phrasing must not fire market hints.
        assert_eq!(
            detect_market_hint("which shares of Alibaba should I buy"),
            None
        );
        assert_eq!(detect_market_hint("buy a share of Apple"), None);
        assert_eq!(detect_market_hint("my focus stocks this week"), None);

        // The hyphenated market terms still hit.
        assert_eq!(
            detect_market_hint("the A-share market is closed"),
            Some(MarketScope::Cn)
        );
        assert_eq!(
            detect_market_hint("H-share discount to the ADR"),
            Some(MarketScope::Hk)
        );
    }

    #[test]
    fn test_hint_order_is_deterministic() {
        // Both HK and US vocabulary present: HK wins by fixed scan order.
        assert_eq!(
            detect_market_hint("Hong Kong listing vs NYSE listing"),
            Some(MarketScope::Hk)
        );
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("global".parse::<MarketScope>().unwrap(), MarketScope::Global);
        assert_eq!("USA".parse::<MarketScope>().unwrap(), MarketScope::Us);
        assert_eq!("HongKong".parse::<MarketScope>().unwrap(), MarketScope::Hk);
        assert_eq!("china".parse::<MarketScope>().unwrap(), MarketScope::Cn);
        assert!("MARS".parse::<MarketScope>().is_err());
    }

    #[test]
    fn test_exchange_name_known_codes() {
        for code in KNOWN_EXCHANGES {
            assert!(exchange_name(code).is_some(), "missing name for {code}");
        }
        assert!(exchange_name("LSE").is_none());
    }
}
