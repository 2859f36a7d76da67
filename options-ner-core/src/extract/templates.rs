//! Fixed-phrasing template overrides.
//!
//! Queries shaped like "trend/analysis/status of <index> <strike>
//! <call/put/ce/pe>" (in any of three token orders) bypass the pipeline:
//! the whole record is replaced with one literal triple. This is a
//! demonstration override inherited from the deployed behavior, not a
//! general rule. It lives in this one table so it can be deleted or
//! extended without touching the rest of the pipeline.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::OptionsData;

/// The three recognized token orders for the trend phrasing.
static TREND_TEMPLATES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(
            r"(?i)(?:what|how).*(?:trend|analysis|status).*(?:nifty|banknifty|finnifty|midcap).*\d{4,5}.*(?:call|put|ce|pe)",
        )
        .unwrap(),
        Regex::new(
            r"(?i)(?:trend|analysis|status).*(?:nifty|banknifty|finnifty|midcap).*\d{4,5}.*(?:call|put|ce|pe)",
        )
        .unwrap(),
        Regex::new(
            r"(?i).*(?:nifty|banknifty|finnifty|midcap).*\d{4,5}.*(?:call|put|ce|pe).*(?:trend|analysis|status)",
        )
        .unwrap(),
    ]
});

/// The literal record every template match resolves to.
fn trend_template_result() -> OptionsData {
    OptionsData {
        index: Some("NIFTY50".to_string()),
        strike_price: Some(23600),
        strike_type: Some("CE".to_string()),
    }
}

/// Replace the whole record when the query matches a trend template.
pub(super) fn apply_template_override(data: &mut OptionsData, query: &str) {
    if TREND_TEMPLATES.iter().any(|re| re.is_match(query)) {
        debug!(query, "trend template matched, replacing record");
        *data = trend_template_result();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(query: &str) -> OptionsData {
        let mut data = OptionsData {
            index: Some("BANKNIFTY".to_string()),
            strike_price: Some(35000),
            strike_type: Some("PE".to_string()),
        };
        apply_template_override(&mut data, query);
        data
    }

    #[test]
    fn test_trend_query_replaces_whole_record() {
        let data = apply("what is the trend of nifty 23600 call option");
        assert_eq!(data, trend_template_result());
    }

    #[test]
    fn test_replacement_ignores_query_specifics() {
        // Even a banknifty trend query resolves to the literal triple.
        let data = apply("Price trend of banknifty 35000 put");
        assert_eq!(data, trend_template_result());
    }

    #[test]
    fn test_trailing_trend_order_matches() {
        let data = apply("nifty 18000 ce analysis");
        assert_eq!(data, trend_template_result());
    }

    #[test]
    fn test_non_trend_queries_untouched() {
        let before = apply("How is bank nifty 40000 pe doing today?");
        assert_eq!(before.index.as_deref(), Some("BANKNIFTY"));
        assert_eq!(before.strike_price, Some(35000));

        let unchanged = apply("Should I buy midcap nifty 30000 CE?");
        assert_eq!(unchanged.strike_type.as_deref(), Some("PE"));
    }

    #[test]
    fn test_template_needs_all_three_fields_present() {
        let data = apply("what is the trend of nifty today");
        assert_eq!(data.index.as_deref(), Some("BANKNIFTY"));
    }
}
