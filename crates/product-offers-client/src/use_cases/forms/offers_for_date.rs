use serde_json::{json, Value};

use super::{decode_list, fields};
use crate::entities::{iso_date, FormState, GraphQLRequest, Offer, Section};
use crate::error::{Fault, ValidationError};
use crate::use_cases::validation;
use crate::use_cases::FormKind;

const QUERY: &str = "query FindOffersForDate($date: String!) {
  findOffersForDate(date: $date) {
    offerCode
    validUntil
  }
}";

/// Offers still valid on a date
pub struct FindOffersForDate;

impl FormKind for FindOffersForDate {
    type Output = Vec<Option<Offer>>;

    const TITLE: &'static str = "Find offers valid until a certain date";
    const OPERATION: &'static str = "findOffersForDate";

    fn initial_form() -> FormState {
        FormState::new().with_field(fields::DATE, "")
    }

    fn prepare(form: &FormState) -> Result<GraphQLRequest, Vec<ValidationError>> {
        let date = validation::calendar_date(form.get(fields::DATE)).map_err(|e| vec![e])?;
        Ok(GraphQLRequest::new(QUERY)
            .with_operation_name("FindOffersForDate")
            .with_variables(json!({"date": iso_date(date)})))
    }

    fn decode(mut data: Value) -> Result<Self::Output, Fault> {
        decode_list(&mut data, Self::OPERATION)
    }

    fn render(results: Option<&Self::Output>) -> Vec<Section> {
        results
            .map(|offers| vec![Section::list("Offers", offers, "No offers found")])
            .unwrap_or_default()
    }
}
