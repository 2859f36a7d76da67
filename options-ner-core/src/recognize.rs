//! Recognizer seam: labeled-span production from raw query text.
//!
//! The extraction pipeline treats its recognizer as an oracle with no
//! accuracy contract: output may be empty, partial, or wrong, and the
//! fallback/repair stages exist to absorb that. The trait keeps the
//! statistical model swappable; `LexiconRecognizer` is the deterministic
//! default used by the server, `StubRecognizer` the test collaborator.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::lexicon::LexiconSet;
use crate::types::{EntityLabel, RecognizedSpan};

/// Produces labeled entity spans for a query.
pub trait Recognizer: Send + Sync {
    /// Spans in emission order. May return an empty list.
    fn recognize(&self, query: &str) -> Vec<RecognizedSpan>;
}

/// Deterministic recognizer driven by the canonicalization tables.
///
/// Scans the query left to right, emitting the longest lexicon phrase
/// match at each position (index or option side) and any standalone
/// 4-5 digit token as a strike price. Span text is the original-case
/// query slice.
pub struct LexiconRecognizer {
    lexicons: Arc<LexiconSet>,
    max_ngram: usize,
}

impl LexiconRecognizer {
    pub fn new(lexicons: Arc<LexiconSet>) -> Self {
        let max_ngram = lexicons
            .index
            .max_phrase_tokens()
            .max(lexicons.option.max_phrase_tokens())
            .max(1);
        Self {
            lexicons,
            max_ngram,
        }
    }

    /// Longest lexicon phrase starting at token `start`, if any.
    fn longest_phrase_at(
        &self,
        words: &[(usize, usize, String)],
        start: usize,
    ) -> Option<(usize, EntityLabel)> {
        let limit = self.max_ngram.min(words.len() - start);
        for len in (1..=limit).rev() {
            let joined = words[start..start + len]
                .iter()
                .map(|(_, _, t)| t.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            if self.lexicons.index.lookup(&joined).is_some() {
                return Some((len, EntityLabel::Index));
            }
            if self.lexicons.option.lookup(&joined).is_some() {
                return Some((len, EntityLabel::OptionType));
            }
        }
        None
    }
}

impl Recognizer for LexiconRecognizer {
    fn recognize(&self, query: &str) -> Vec<RecognizedSpan> {
        let words = tokenize_with_positions(query);
        let mut spans: SmallVec<[RecognizedSpan; 4]> = SmallVec::new();

        let mut i = 0;
        while i < words.len() {
            if let Some((len, label)) = self.longest_phrase_at(&words, i) {
                let start = words[i].0;
                let end = words[i + len - 1].1;
                spans.push(RecognizedSpan::new(&query[start..end], label));
                i += len;
                continue;
            }

            let (start, end, token) = &words[i];
            if (4..=5).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit()) {
                spans.push(RecognizedSpan::new(
                    &query[*start..*end],
                    EntityLabel::StrikePrice,
                ));
            }
            i += 1;
        }

        spans.into_vec()
    }
}

/// Fixed-output recognizer for tests and offline harnesses.
#[derive(Default)]
pub struct StubRecognizer {
    spans: Vec<RecognizedSpan>,
}

impl StubRecognizer {
    pub fn new(spans: Vec<RecognizedSpan>) -> Self {
        Self { spans }
    }

    /// A recognizer that never finds anything
    pub fn empty() -> Self {
        Self::default()
    }
}

impl Recognizer for StubRecognizer {
    fn recognize(&self, _query: &str) -> Vec<RecognizedSpan> {
        self.spans.clone()
    }
}

/// Tokenize into lowercase alphanumeric runs with byte positions:
/// `(start, end, token)`.
fn tokenize_with_positions(s: &str) -> Vec<(usize, usize, String)> {
    let mut result = Vec::new();
    let mut in_word = false;
    let mut word_start = 0;

    for (i, c) in s.char_indices() {
        if c.is_alphanumeric() {
            if !in_word {
                word_start = i;
                in_word = true;
            }
        } else if in_word {
            result.push((word_start, i, s[word_start..i].to_lowercase()));
            in_word = false;
        }
    }

    if in_word {
        result.push((word_start, s.len(), s[word_start..].to_lowercase()));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_recognizer() -> LexiconRecognizer {
        LexiconRecognizer::new(Arc::new(LexiconSet::builtin()))
    }

    fn labels(spans: &[RecognizedSpan]) -> Vec<EntityLabel> {
        spans.iter().map(|s| s.label).collect()
    }

    #[test]
    fn test_standard_query() {
        let spans = make_recognizer().recognize("What's the price of nifty 18500 call?");
        assert_eq!(
            labels(&spans),
            vec![
                EntityLabel::Index,
                EntityLabel::StrikePrice,
                EntityLabel::OptionType
            ]
        );
        assert_eq!(spans[0].text, "nifty");
        assert_eq!(spans[1].text, "18500");
        assert_eq!(spans[2].text, "call");
    }

    #[test]
    fn test_longest_phrase_wins() {
        // "bank nifty" must come out as one index span, not "nifty" alone,
        // and "put option" as one option span.
        let spans = make_recognizer().recognize("bank nifty 40000 put option");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "bank nifty");
        assert_eq!(spans[2].text, "put option");
    }

    #[test]
    fn test_nifty_50_consumed_as_index() {
        // The "50" in "nifty 50" belongs to the index phrase and must not
        // leak out as a strike price.
        let spans = make_recognizer().recognize("nifty 50 18000 ce");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "nifty 50");
        assert_eq!(spans[1].label, EntityLabel::StrikePrice);
        assert_eq!(spans[1].text, "18000");
    }

    #[test]
    fn test_digit_runs_outside_strike_shape_ignored() {
        let spans = make_recognizer().recognize("top 3 trades at 123456 lots");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_preserves_original_case_slices() {
        let spans = make_recognizer().recognize("Should I buy MIDCAP NIFTY 30000 CE?");
        assert_eq!(spans[0].text, "MIDCAP NIFTY");
        assert_eq!(spans[2].text, "CE");
    }

    #[test]
    fn test_no_cues_no_spans() {
        assert!(make_recognizer().recognize("hello world").is_empty());
        assert!(make_recognizer().recognize("").is_empty());
    }

    #[test]
    fn test_stub_ignores_query() {
        let stub = StubRecognizer::new(vec![RecognizedSpan::new("sensex", EntityLabel::Index)]);
        assert_eq!(stub.recognize("anything at all").len(), 1);
        assert!(StubRecognizer::empty().recognize("nifty 18000 ce").is_empty());
    }

    #[test]
    fn test_tokenize_positions_round_trip() {
        let query = "The Apple company";
        let words = tokenize_with_positions(query);
        assert_eq!(words.len(), 3);
        assert_eq!(&query[words[1].0..words[1].1], "Apple");
        assert_eq!(words[1].2, "apple");
    }
}
