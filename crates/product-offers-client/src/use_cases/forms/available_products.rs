use serde_json::{json, Value};

use super::{decode_list, fields, REGION, REGION_HEADER};
use crate::entities::{FormState, GraphQLRequest, Product, ProductType, Section};
use crate::error::{Fault, ValidationError};
use crate::use_cases::validation;
use crate::use_cases::FormKind;

const QUERY: &str = "query FindAvailableProducts($type: ProductType!, $pageSize: Int!) {
  findAvailableProducts(type: $type, pageSize: $pageSize) {
    id
    name
    inventory
    type
  }
}";

/// Products of one type in stock in the caller's region
pub struct FindAvailableProducts;

impl FormKind for FindAvailableProducts {
    type Output = Vec<Option<Product>>;

    const TITLE: &'static str = "Find Available Products";
    const OPERATION: &'static str = "findAvailableProducts";

    fn initial_form() -> FormState {
        FormState::new()
            .with_field(fields::TYPE, ProductType::default().as_str())
            .with_field(fields::PAGE_SIZE, "")
    }

    fn prepare(form: &FormState) -> Result<GraphQLRequest, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let product_type = validation::product_type(form.get(fields::TYPE))
            .map_err(|e| errors.push(e))
            .ok();
        let page_size = validation::page_size(form.get(fields::PAGE_SIZE))
            .map_err(|e| errors.push(e))
            .ok();

        match (product_type, page_size) {
            (Some(product_type), Some(page_size)) => Ok(GraphQLRequest::new(QUERY)
                .with_operation_name("FindAvailableProducts")
                .with_variables(json!({"type": product_type, "pageSize": page_size}))
                .with_header(REGION_HEADER, REGION)),
            _ => Err(errors),
        }
    }

    fn decode(mut data: Value) -> Result<Self::Output, Fault> {
        decode_list(&mut data, Self::OPERATION)
    }

    fn render(results: Option<&Self::Output>) -> Vec<Section> {
        results
            .map(|products| vec![Section::list("Available Products", products, "No products found")])
            .unwrap_or_default()
    }
}
