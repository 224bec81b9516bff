use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{parse_calendar_date, us_date};

/// An offer as returned by the server; both members are nullable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub offer_code: Option<String>,
    /// Raw `Date` scalar as sent by the server
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl Offer {
    pub fn valid_until_date(&self) -> Option<NaiveDate> {
        self.valid_until.as_deref().and_then(parse_calendar_date)
    }

    /// `validUntil` as `M/D/YYYY`, verbatim when it is not a date, empty
    /// when null
    pub fn valid_until_display(&self) -> String {
        match (&self.valid_until, self.valid_until_date()) {
            (_, Some(date)) => us_date(date),
            (Some(raw), None) => raw.clone(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offer_deserialize() {
        let offer: Offer =
            serde_json::from_value(json!({"offerCode": "WKND30", "validUntil": "2024-12-12"})).unwrap();
        assert_eq!(offer.offer_code.as_deref(), Some("WKND30"));
        assert_eq!(offer.valid_until_display(), "12/12/2024");
    }

    #[test]
    fn test_timestamp_valid_until() {
        let offer = Offer {
            offer_code: Some("SUNDAY20".to_string()),
            valid_until: Some("2024-12-25T00:00:00Z".to_string()),
        };
        assert_eq!(offer.valid_until_display(), "12/25/2024");
    }

    #[test]
    fn test_unparseable_valid_until_is_shown_verbatim() {
        let offer = Offer {
            offer_code: Some("XMAS".to_string()),
            valid_until: Some("soon".to_string()),
        };
        assert_eq!(offer.valid_until_date(), None);
        assert_eq!(offer.valid_until_display(), "soon");
    }

    #[test]
    fn test_null_valid_until_is_shown_empty() {
        let offer: Offer =
            serde_json::from_value(json!({"offerCode": "NOEXPIRY", "validUntil": null})).unwrap();
        assert_eq!(offer.valid_until, None);
        assert_eq!(offer.valid_until_display(), "");
    }
}
