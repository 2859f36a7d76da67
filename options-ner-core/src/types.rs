//! Data model for options query extraction.

use serde::{Deserialize, Serialize};

/// Entity labels a recognizer can attach to a span of query text.
///
/// Serialized in the recognizer's label vocabulary:
/// `"INDEX"`, `"STRIKE_PRICE"`, `"OPTION_TYPE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Index,
    StrikePrice,
    OptionType,
}

impl EntityLabel {
    /// Parse an external label string, ignoring unrecognized labels.
    ///
    /// Recognizers may emit labels outside our vocabulary; those spans are
    /// dropped rather than rejected.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "INDEX" => Some(Self::Index),
            "STRIKE_PRICE" => Some(Self::StrikePrice),
            "OPTION_TYPE" => Some(Self::OptionType),
            _ => None,
        }
    }
}

/// A labeled substring of the query identified by a recognizer.
///
/// Emission order is meaningful: when multiple spans carry the same label,
/// the last one in emission order wins for that field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    /// Span text as it appeared in the query
    pub text: String,
    /// Entity label assigned by the recognizer
    pub label: EntityLabel,
}

impl RecognizedSpan {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Structured fields extracted from a single query.
///
/// Each field is independently either a canonical value, an uppercased
/// best-effort literal (when the recognizer span missed the table), or
/// `None`. Strike prices are 4-5 digit values by domain convention; only
/// the fallback regex enforces that shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsData {
    /// Canonical index token (e.g. `NIFTY50`, `BANKNIFTY`)
    pub index: Option<String>,
    /// Strike price of the contract
    pub strike_price: Option<i64>,
    /// Canonical option side (`CE` or `PE`)
    pub strike_type: Option<String>,
}

impl OptionsData {
    /// True when all three fields resolved
    pub fn is_complete(&self) -> bool {
        self.index.is_some() && self.strike_price.is_some() && self.strike_type.is_some()
    }

    /// True when at least one field is still unresolved
    pub(crate) fn has_unresolved(&self) -> bool {
        !self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_serde_vocabulary() {
        let json = serde_json::to_string(&EntityLabel::StrikePrice).unwrap();
        assert_eq!(json, "\"STRIKE_PRICE\"");
        let label: EntityLabel = serde_json::from_str("\"OPTION_TYPE\"").unwrap();
        assert_eq!(label, EntityLabel::OptionType);
    }

    #[test]
    fn test_label_parse_ignores_unknown() {
        assert_eq!(EntityLabel::parse("INDEX"), Some(EntityLabel::Index));
        assert_eq!(EntityLabel::parse("EXPIRY_DATE"), None);
        assert_eq!(EntityLabel::parse(""), None);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let data = OptionsData {
            index: Some("BANKNIFTY".to_string()),
            strike_price: Some(40000),
            strike_type: Some("PE".to_string()),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["index"], "BANKNIFTY");
        assert_eq!(json["strikePrice"], 40000);
        assert_eq!(json["strikeType"], "PE");
    }

    #[test]
    fn test_empty_result_is_all_null() {
        let json = serde_json::to_value(OptionsData::default()).unwrap();
        assert!(json["index"].is_null());
        assert!(json["strikePrice"].is_null());
        assert!(json["strikeType"].is_null());
    }

    #[test]
    fn test_completeness() {
        let mut data = OptionsData::default();
        assert!(!data.is_complete());
        data.index = Some("NIFTY50".to_string());
        data.strike_price = Some(18000);
        assert!(data.has_unresolved());
        data.strike_type = Some("CE".to_string());
        assert!(data.is_complete());
    }
}
