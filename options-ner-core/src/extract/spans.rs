//! Primary resolution: canonicalize recognizer spans through the lexicons.

use tracing::debug;

use crate::lexicon::LexiconSet;
use crate::types::{EntityLabel, OptionsData, RecognizedSpan};

/// Fill result fields from recognizer spans, in emission order.
///
/// A later span with the same label overwrites the earlier result. That is
/// an inherited rule, kept explicit here rather than left to iteration
/// order.
pub(super) fn apply_spans(data: &mut OptionsData, spans: &[RecognizedSpan], lexicons: &LexiconSet) {
    for span in spans {
        match span.label {
            EntityLabel::Index => {
                let mut text = span.text.to_lowercase();
                // Recognizer spans sometimes drag in neighboring tokens
                // ("sensex sd"); keep just the known phrase inside them.
                if let Some(entry) = lexicons.index.first_phrase_in(&text) {
                    if entry.phrase != text {
                        debug!(span = %text, phrase = %entry.phrase, "trimmed index span to known phrase");
                    }
                    text = entry.phrase.clone();
                }
                data.index = Some(match lexicons.index.lookup(&text) {
                    Some(canonical) => canonical.to_string(),
                    // Low-confidence literal; the repair stage may still fix it.
                    None => span.text.to_uppercase(),
                });
            }
            EntityLabel::StrikePrice => {
                if let Some(value) = parse_strike(&span.text) {
                    data.strike_price = Some(value);
                }
            }
            EntityLabel::OptionType => {
                data.strike_type = Some(match lexicons.option.lookup(&span.text.to_lowercase()) {
                    Some(canonical) => canonical.to_string(),
                    None => span.text.to_uppercase(),
                });
            }
        }
    }
}

/// Parse a strike span: direct integer parse first, then the concatenation
/// of all digit runs ("around 40,000" -> 40000). No digits, or a value too
/// large for i64, leaves the field unset.
fn parse_strike(text: &str) -> Option<i64> {
    if let Ok(value) = text.trim().parse::<i64>() {
        return Some(value);
    }
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
