//! Rule-based fallbacks for fields the recognizer spans left unset.
//!
//! Fallbacks scan the raw query and are independent of the recognizer.
//! The index scan consults the priority phrase list before the general
//! lexicon so that `bank nifty` is never swallowed by the generic `nifty`
//! entry.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::lexicon::{Lexicon, LexiconSet, PRIORITY_INDEX_PHRASES};
use crate::types::OptionsData;

/// Strike prices are 4-5 digit values, token-bounded, first match wins.
static STRIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4,5})\b").unwrap());

/// Resolve every still-unset field from the raw query.
pub(super) fn apply_fallbacks(data: &mut OptionsData, query: &str, lexicons: &LexiconSet) {
    let query_lower = query.to_lowercase();

    if data.index.is_none() {
        data.index = scan_index(&query_lower, &lexicons.index);
        if let Some(index) = &data.index {
            debug!(%index, "index resolved by fallback scan");
        }
    }

    if data.strike_price.is_none() {
        if let Some(captures) = STRIKE_RE.captures(query) {
            data.strike_price = captures[1].parse().ok();
            debug!(strike_price = data.strike_price, "strike resolved by fallback scan");
        }
    }

    if data.strike_type.is_none() {
        data.strike_type = scan_option_type(&query_lower, &lexicons.option);
        if let Some(strike_type) = &data.strike_type {
            debug!(%strike_type, "option side resolved by fallback scan");
        }
    }
}

/// Index scan shared with the repair stage: priority phrases first, then
/// the general lexicon in insertion order.
pub(super) fn scan_index(query_lower: &str, index_lexicon: &Lexicon) -> Option<String> {
    for (phrase, canonical) in PRIORITY_INDEX_PHRASES {
        if query_lower.contains(phrase) {
            return Some((*canonical).to_string());
        }
    }
    index_lexicon
        .first_phrase_in(query_lower)
        .map(|entry| entry.canonical.clone())
}

/// Option-side scan: lexicon phrases as plain substrings first, then the
/// call/put keyword heuristic with token-bounded `ce`/`pe`.
fn scan_option_type(query_lower: &str, option_lexicon: &Lexicon) -> Option<String> {
    if let Some(entry) = option_lexicon.first_phrase_in(query_lower) {
        return Some(entry.canonical.clone());
    }
    if query_lower.contains("call") || bounded_token(query_lower, "ce") {
        return Some("CE".to_string());
    }
    if query_lower.contains("put") || bounded_token(query_lower, "pe") {
        return Some("PE".to_string());
    }
    None
}

/// True when `token` appears with a space on at least one side.
fn bounded_token(haystack: &str, token: &str) -> bool {
    haystack.contains(&format!(" {token}")) || haystack.contains(&format!("{token} "))
}
