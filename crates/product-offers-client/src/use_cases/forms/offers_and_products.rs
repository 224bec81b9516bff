use serde_json::{json, Value};

use super::{decode_list, fields, REGION, REGION_HEADER};
use crate::entities::{iso_date, FormState, GraphQLRequest, Offer, Product, ProductType, Section};
use crate::error::{Fault, ValidationError};
use crate::use_cases::validation;
use crate::use_cases::FormKind;

const QUERY: &str = "query FindOffersAndProducts($date: String!, $type: ProductType!, $pageSize: Int!) {
  findOffersForDate(date: $date) {
    offerCode
    validUntil
  }
  findAvailableProducts(type: $type, pageSize: $pageSize) {
    id
    name
    inventory
    type
  }
}";

/// Both lists answered by the combined query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffersAndProducts {
    pub offers: Vec<Option<Offer>>,
    pub products: Vec<Option<Product>>,
}

/// Offers for a date and available products in a single round trip
pub struct FindOffersAndProducts;

impl FormKind for FindOffersAndProducts {
    type Output = OffersAndProducts;

    const TITLE: &'static str = "Find Offers and Products";
    const OPERATION: &'static str = "findAvailableProducts";

    fn initial_form() -> FormState {
        FormState::new()
            .with_field(fields::DATE, "")
            .with_field(fields::TYPE, ProductType::default().as_str())
            .with_field(fields::PAGE_SIZE, "")
    }

    fn prepare(form: &FormState) -> Result<GraphQLRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let date = validation::calendar_date(form.get(fields::DATE))
            .map_err(|e| errors.push(e))
            .ok();
        let product_type = validation::product_type(form.get(fields::TYPE))
            .map_err(|e| errors.push(e))
            .ok();
        let page_size = validation::page_size(form.get(fields::PAGE_SIZE))
            .map_err(|e| errors.push(e))
            .ok();

        match (date, product_type, page_size) {
            (Some(date), Some(product_type), Some(page_size)) => Ok(GraphQLRequest::new(QUERY)
                .with_operation_name("FindOffersAndProducts")
                .with_variables(json!({
                    "date": iso_date(date),
                    "type": product_type,
                    "pageSize": page_size,
                }))
                .with_header(REGION_HEADER, REGION)),
            _ => Err(errors),
        }
    }

    fn decode(mut data: Value) -> Result<Self::Output, Fault> {
        Ok(OffersAndProducts {
            offers: decode_list(&mut data, "findOffersForDate")?,
            products: decode_list(&mut data, "findAvailableProducts")?,
        })
    }

    fn render(results: Option<&Self::Output>) -> Vec<Section> {
        match results {
            Some(results) => vec![
                Section::list("Offers", &results.offers, "No offers found"),
                Section::list("Products", &results.products, "No products found"),
            ],
            None => Vec::new(),
        }
    }
}
