//! The four forms of the product offers API
mod available_products;
mod create_product;
mod offers_and_products;
mod offers_for_date;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Fault;
use crate::use_cases::FormController;

pub use available_products::FindAvailableProducts;
pub use create_product::CreateProduct;
pub use offers_and_products::{FindOffersAndProducts, OffersAndProducts};
pub use offers_for_date::FindOffersForDate;

pub type CreateProductForm = FormController<CreateProduct>;
pub type FindAvailableProductsForm = FormController<FindAvailableProducts>;
pub type FindOffersForDateForm = FormController<FindOffersForDate>;
pub type FindOffersAndProductsForm = FormController<FindOffersAndProducts>;

/// Field names accepted by `set_field`
pub mod fields {
    pub const NAME: &str = "name";
    pub const INVENTORY: &str = "inventory";
    pub const TYPE: &str = "type";
    pub const PAGE_SIZE: &str = "pageSize";
    pub const DATE: &str = "date";
}

/// Header routing product lookups to a region
pub const REGION_HEADER: &str = "X-region";
pub const REGION: &str = "north-west";

/// Take a list-valued root field out of `data`. A `null` or absent field is
/// an empty list; `null` members are kept so rendering can skip them.
fn decode_list<T: DeserializeOwned>(data: &mut Value, field: &str) -> Result<Vec<Option<T>>, Fault> {
    match data.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => serde_json::from_value(list)
            .map_err(|e| Fault::Decode(format!("{field}: {e}"))),
    }
}
