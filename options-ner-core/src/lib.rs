//! Options query entity extraction.
//!
//! Extracts a market index, a numeric strike price, and an option side
//! (CE/PE) from free-form natural-language trading queries. All extraction
//! flows through one staged pipeline:
//! Recognizer spans -> Lexicon canonicalization -> Fallback rules -> Repair -> Template overrides
//!
//! The pipeline is a pure function of `(query, spans, lexicons)`: no shared
//! mutable state, no I/O, and a miss on any field degrades to `None` rather
//! than an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use options_ner_core::{extract_options_data, LexiconSet, RecognizedSpan};
//!
//! let lexicons = LexiconSet::builtin();
//! let spans: Vec<RecognizedSpan> = Vec::new();
//! let data = extract_options_data("How is bank nifty 40000 pe doing today?", &spans, &lexicons);
//! assert_eq!(data.index.as_deref(), Some("BANKNIFTY"));
//! assert_eq!(data.strike_price, Some(40000));
//! assert_eq!(data.strike_type.as_deref(), Some("PE"));
//! ```

// Core error handling
pub mod error;

// Canonicalization tables
pub mod lexicon;

// Recognizer seam (trait + deterministic implementations)
pub mod recognize;

// Data model shared across pipeline stages
pub mod types;

// The extraction pipeline
pub mod extract;

pub use error::LexiconError;
pub use extract::extract_options_data;
pub use lexicon::{Lexicon, LexiconEntry, LexiconSet};
pub use recognize::{LexiconRecognizer, Recognizer, StubRecognizer};
pub use types::{EntityLabel, OptionsData, RecognizedSpan};
