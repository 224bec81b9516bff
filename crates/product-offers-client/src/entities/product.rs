use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

use crate::error::ValidationError;

/// Kind of product, as named by the `ProductType` enum of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Gadget,
    Book,
    Food,
    Other,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Gadget,
        ProductType::Book,
        ProductType::Food,
        ProductType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Gadget => "gadget",
            ProductType::Book => "book",
            ProductType::Food => "food",
            ProductType::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownProductType(s.to_string()))
    }
}

/// A product as returned by the server. Every member is nullable in the
/// schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
}

/// `ID` values arrive as strings, but some servers send plain integers
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number ID, got {other}"
        ))),
    }
}

/// Input of the `createProduct` mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub inventory: i32,
    pub product_type: ProductType,
}

impl NewProduct {
    pub fn to_variables(&self) -> Value {
        json!({
            "name": self.name,
            "inventory": self.inventory,
            "type": self.product_type,
        })
    }
}
