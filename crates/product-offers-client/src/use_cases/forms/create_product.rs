use serde_json::Value;

use super::fields;
use crate::entities::{FormState, GraphQLRequest, NewProduct, Notification, Product, ProductType, Section};
use crate::error::{Fault, ValidationError};
use crate::use_cases::validation;
use crate::use_cases::FormKind;

const MUTATION: &str = "mutation CreateProduct($name: String!, $inventory: Int!, $type: ProductType!) {
  createProduct(name: $name, inventory: $inventory, type: $type) {
    id
    name
    inventory
    type
  }
}";

/// Adds a product to the catalogue
pub struct CreateProduct;

impl CreateProduct {
    fn new_product(form: &FormState) -> Result<NewProduct, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let name = validation::required(form, fields::NAME)
            .map_err(|e| errors.push(e))
            .ok();
        let inventory = validation::required(form, fields::INVENTORY)
            .and_then(validation::inventory)
            .map_err(|e| errors.push(e))
            .ok();
        let product_type = validation::required(form, fields::TYPE)
            .and_then(validation::product_type)
            .map_err(|e| errors.push(e))
            .ok();

        match (name, inventory, product_type) {
            (Some(name), Some(inventory), Some(product_type)) => Ok(NewProduct {
                name: name.to_string(),
                inventory,
                product_type,
            }),
            _ => Err(errors),
        }
    }
}

impl FormKind for CreateProduct {
    type Output = Product;

    const TITLE: &'static str = "Add Product";
    const OPERATION: &'static str = "createProduct";
    const SUBMIT_LABEL: &'static str = "Add Product";
    const BUSY_LABEL: &'static str = "Adding...";

    fn initial_form() -> FormState {
        FormState::new()
            .with_field(fields::NAME, "")
            .with_field(fields::INVENTORY, "")
            .with_field(fields::TYPE, ProductType::default().as_str())
    }

    fn prepare(form: &FormState) -> Result<GraphQLRequest, Vec<ValidationError>> {
        let product = Self::new_product(form)?;
        Ok(GraphQLRequest::new(MUTATION)
            .with_operation_name("CreateProduct")
            .with_variables(product.to_variables()))
    }

    fn decode(mut data: Value) -> Result<Self::Output, Fault> {
        match data.get_mut(Self::OPERATION).map(Value::take) {
            None | Some(Value::Null) => Err(Fault::MissingData),
            Some(product) => {
                serde_json::from_value(product).map_err(|e| Fault::Decode(e.to_string()))
            }
        }
    }

    fn after_success(form: &mut FormState, _product: &Product) -> Option<Notification> {
        *form = Self::initial_form();
        Some(Notification::success("Product added successfully"))
    }

    /// The created product is not displayed
    fn render(_results: Option<&Self::Output>) -> Vec<Section> {
        Vec::new()
    }
}
