//! The options extraction pipeline.
//!
//! Control flows strictly forward through four stages; no stage re-invokes
//! an earlier one:
//!
//! 1. `spans`     - canonicalize recognizer spans through the lexicons
//! 2. `fallback`  - rule-based resolution for fields the spans left unset
//! 3. `repair`    - corrections for known failure shapes of stages 1-2
//! 4. `templates` - fixed-phrasing overrides that replace the whole record
//!
//! Every stage degrades to `None` on a miss; the pipeline never fails.

mod fallback;
mod repair;
mod spans;
mod templates;

use tracing::debug;

use crate::lexicon::LexiconSet;
use crate::types::{OptionsData, RecognizedSpan};

/// Extract structured options fields from a query.
///
/// Pure function of its inputs: identical `(query, spans, lexicons)` always
/// yields an identical result.
pub fn extract_options_data(
    query: &str,
    spans: &[RecognizedSpan],
    lexicons: &LexiconSet,
) -> OptionsData {
    let mut data = OptionsData::default();

    spans::apply_spans(&mut data, spans, lexicons);

    if data.has_unresolved() {
        fallback::apply_fallbacks(&mut data, query, lexicons);
    }

    repair::repair_index(&mut data, query, lexicons);
    templates::apply_template_override(&mut data, query);

    debug!(
        index = data.index.as_deref(),
        strike_price = data.strike_price,
        strike_type = data.strike_type.as_deref(),
        "extraction complete"
    );
    data
}
