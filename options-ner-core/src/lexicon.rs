//! Canonicalization tables mapping user phrasings to canonical tokens.
//!
//! A `Lexicon` is an *ordered* phrase -> canonical-token table. Ordering is
//! part of the contract: substring scans iterate entries in insertion order
//! and the first hit wins, so priority between overlapping phrasings is
//! explicit rather than an accident of map iteration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// Specific-index cues checked before the general index lexicon.
///
/// Without this list, the generic `nifty` phrase would shadow every
/// compound index name in substring scans (`bank nifty` contains `nifty`).
pub const PRIORITY_INDEX_PHRASES: &[(&str, &str)] = &[
    ("banknifty", "BANKNIFTY"),
    ("bank nifty", "BANKNIFTY"),
    ("finnifty", "FINNIFTY"),
    ("fin nifty", "FINNIFTY"),
    ("midcap", "MIDCAPNIFTY"),
    ("midcap nifty", "MIDCAPNIFTY"),
    ("sensex", "SENSEX"),
];

/// One phrase -> canonical pair in a lexicon file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Lowercase user phrasing (e.g. `"bank nifty"`)
    pub phrase: String,
    /// Canonical token (e.g. `"BANKNIFTY"`)
    pub canonical: String,
}

/// Ordered canonicalization table with an exact-lookup index
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    exact: HashMap<String, usize>,
}

impl Lexicon {
    /// Build a lexicon from `(phrase, canonical)` pairs, preserving order.
    ///
    /// Phrases are lowercased. A duplicate phrase overwrites the earlier
    /// exact-lookup target but keeps its original scan position.
    pub fn from_pairs<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let mut lexicon = Self::default();
        for (phrase, canonical) in pairs {
            lexicon.insert(phrase.into(), canonical.into());
        }
        lexicon
    }

    fn insert(&mut self, phrase: String, canonical: String) {
        let phrase = phrase.to_lowercase();
        match self.exact.get(&phrase) {
            Some(&pos) => self.entries[pos].canonical = canonical,
            None => {
                self.exact.insert(phrase.clone(), self.entries.len());
                self.entries.push(LexiconEntry { phrase, canonical });
            }
        }
    }

    /// Load an ordered lexicon from a JSON array of `{phrase, canonical}`
    /// entries.
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let bytes = std::fs::read(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<LexiconEntry> =
            serde_json::from_slice(&bytes).map_err(|source| LexiconError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if entries.is_empty() {
            return Err(LexiconError::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_pairs(
            entries.into_iter().map(|e| (e.phrase, e.canonical)),
        ))
    }

    /// Exact lookup of a lowercase phrase
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.exact
            .get(phrase)
            .map(|&pos| self.entries[pos].canonical.as_str())
    }

    /// First entry (in insertion order) whose phrase is a substring of
    /// `haystack`. The haystack must already be lowercased.
    pub fn first_phrase_in(&self, haystack: &str) -> Option<&LexiconEntry> {
        self.entries.iter().find(|e| haystack.contains(&e.phrase))
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    /// Longest phrase length in whitespace-separated tokens
    pub fn max_phrase_tokens(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.phrase.split_whitespace().count())
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two canonicalization tables the pipeline consumes.
///
/// Immutable after construction; share across requests behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct LexiconSet {
    pub index: Lexicon,
    pub option: Lexicon,
}

impl LexiconSet {
    /// The built-in tables, used when no lexicon files are deployed.
    pub fn builtin() -> Self {
        Self {
            index: default_index_lexicon(),
            option: default_option_lexicon(),
        }
    }
}

/// Built-in index table: user phrasings for the five supported indices.
pub fn default_index_lexicon() -> Lexicon {
    Lexicon::from_pairs([
        ("nifty", "NIFTY50"),
        ("nifty 50", "NIFTY50"),
        ("nifty50", "NIFTY50"),
        ("nifty index", "NIFTY50"),
        ("nifty 50 index", "NIFTY50"),
        ("bank nifty", "BANKNIFTY"),
        ("banknifty", "BANKNIFTY"),
        ("nifty bank", "BANKNIFTY"),
        ("banking index", "BANKNIFTY"),
        ("bank index", "BANKNIFTY"),
        ("fin nifty", "FINNIFTY"),
        ("finnifty", "FINNIFTY"),
        ("nifty fin", "FINNIFTY"),
        ("financial index", "FINNIFTY"),
        ("financial nifty", "FINNIFTY"),
        ("midcap nifty", "MIDCAPNIFTY"),
        ("nifty midcap", "MIDCAPNIFTY"),
        ("midcap", "MIDCAPNIFTY"),
        ("midcap index", "MIDCAPNIFTY"),
        ("mid cap nifty", "MIDCAPNIFTY"),
        ("sensex", "SENSEX"),
        ("bse sensex", "SENSEX"),
        ("sensex index", "SENSEX"),
        ("bse 30", "SENSEX"),
        ("sensex 30", "SENSEX"),
    ])
}

/// Built-in option table: user phrasings for the two option sides.
pub fn default_option_lexicon() -> Lexicon {
    Lexicon::from_pairs([
        ("ce", "CE"),
        ("call", "CE"),
        ("call option", "CE"),
        ("call options", "CE"),
        ("call option contract", "CE"),
        ("pe", "PE"),
        ("put", "PE"),
        ("put option", "PE"),
        ("put options", "PE"),
        ("put option contract", "PE"),
    ])
}
