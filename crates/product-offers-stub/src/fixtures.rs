//! Canned examples of the product-and-offers API.

use serde_json::{json, Value};

use crate::entities::{Field, Handler, Operation};

pub const REGION_HEADER: &str = "X-region";
pub const REGION: &str = "north-west";

/// Date the canned offers are looked up for
pub const OFFERS_DATE: &str = "2024-12-31";

pub fn gadget_products() -> Value {
    json!([
        {"id": "1", "name": "iPhone", "inventory": 100, "type": "gadget"},
        {"id": "2", "name": "Macbook", "inventory": 50, "type": "gadget"},
        {"id": "3", "name": "iPad", "inventory": 25, "type": "gadget"}
    ])
}

pub fn offers() -> Value {
    json!([
        {"offerCode": "WKND30", "validUntil": "2024-12-12"},
        {"offerCode": "SUNDAY20", "validUntil": "2024-12-25"}
    ])
}

pub fn almanac() -> Value {
    json!({"id": "10", "name": "The Almanac", "inventory": 10, "type": "book"})
}

/// Every canned example: gadgets for a page size of 10 from the north-west
/// region, the offers valid on [`OFFERS_DATE`], and the creation of
/// "The Almanac"
pub fn product_offers() -> Vec<Operation> {
    vec![
        Operation::query()
            .with_field(
                Field::new("findAvailableProducts").with_handler(
                    Handler::new(gadget_products())
                        .when_arguments(json!({"type": "gadget", "pageSize": 10}))
                        .when_header(REGION_HEADER, REGION),
                ),
            )
            .with_field(
                Field::new("findOffersForDate")
                    .with_handler(Handler::new(offers()).when_arguments(json!({"date": OFFERS_DATE}))),
            ),
        Operation::mutation().with_field(
            Field::new("createProduct").with_handler(
                Handler::new(almanac())
                    .when_arguments(json!({"name": "The Almanac", "inventory": 10, "type": "book"})),
            ),
        ),
    ]
}
