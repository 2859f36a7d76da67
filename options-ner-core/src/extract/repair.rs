//! Corrections for known failure shapes of the earlier stages.
//!
//! Two repairs run on every result:
//! - a spaced index value means an unmapped compound literal leaked through
//!   primary resolution; the query is rescanned and the field nulled if the
//!   rescan finds nothing (a non-canonical value must not escape),
//! - a generic NIFTY50 result is overridden when the query names a more
//!   specific index.

use tracing::debug;

use super::fallback::scan_index;
use crate::lexicon::LexiconSet;
use crate::types::OptionsData;

/// Cues that outrank a generic NIFTY50 resolution, checked in order.
const SPECIFIC_INDEX_CUES: &[(&str, &str)] = &[
    ("banknifty", "BANKNIFTY"),
    ("bank nifty", "BANKNIFTY"),
    ("finnifty", "FINNIFTY"),
    ("fin nifty", "FINNIFTY"),
    ("midcap", "MIDCAPNIFTY"),
    ("sensex", "SENSEX"),
];

pub(super) fn repair_index(data: &mut OptionsData, query: &str, lexicons: &LexiconSet) {
    let query_lower = query.to_lowercase();

    if let Some(index) = &data.index {
        if index.contains(' ') {
            debug!(%index, "spaced index literal, rescanning query");
            data.index = scan_index(&query_lower, &lexicons.index);
        }
    }

    if data.index.as_deref() == Some("NIFTY50") {
        for (cue, canonical) in SPECIFIC_INDEX_CUES {
            if query_lower.contains(cue) {
                debug!(cue, canonical, "overriding generic index with specific cue");
                data.index = Some((*canonical).to_string());
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconSet;

    fn repaired(index: Option<&str>, query: &str) -> Option<String> {
        let mut data = OptionsData {
            index: index.map(String::from),
            ..OptionsData::default()
        };
        repair_index(&mut data, query, &LexiconSet::builtin());
        data.index
    }

    #[test]
    fn test_spaced_literal_repaired_from_query() {
        assert_eq!(
            repaired(Some("BANK NIFTY TODAY"), "bank nifty 35000 put").as_deref(),
            Some("BANKNIFTY")
        );
    }

    #[test]
    fn test_spaced_literal_nulled_when_query_has_no_index() {
        assert_eq!(repaired(Some("DOW JONES"), "dow jones 35000 put"), None);
    }

    #[test]
    fn test_generic_result_overridden_by_specific_cue() {
        assert_eq!(
            repaired(Some("NIFTY50"), "bank nifty 35000 put").as_deref(),
            Some("BANKNIFTY")
        );
        assert_eq!(
            repaired(Some("NIFTY50"), "sensex 60000 ce").as_deref(),
            Some("SENSEX")
        );
        assert_eq!(
            repaired(Some("NIFTY50"), "update on midcap 28000 ce").as_deref(),
            Some("MIDCAPNIFTY")
        );
    }

    #[test]
    fn test_first_specific_cue_wins() {
        assert_eq!(
            repaired(Some("NIFTY50"), "banknifty vs sensex 18000 ce").as_deref(),
            Some("BANKNIFTY")
        );
    }

    #[test]
    fn test_clean_results_untouched() {
        assert_eq!(
            repaired(Some("FINNIFTY"), "fin nifty 20000 put").as_deref(),
            Some("FINNIFTY")
        );
        assert_eq!(
            repaired(Some("NIFTY50"), "nifty 18000 call").as_deref(),
            Some("NIFTY50")
        );
        assert_eq!(repaired(None, "nothing here"), None);
    }
}
