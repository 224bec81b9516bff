use serde_json::Value;
use std::collections::HashMap;

/// A GraphQL request received by the stub
#[derive(Debug, Clone, Default)]
pub struct CollectedRequest {
    pub query: String,
    pub operation_name: Option<String>,
    pub variables: Option<Value>,
    /// Header names are stored lowercase
    pub headers: HashMap<String, String>,
    /// Root fields selected by the executed operation, in document order
    pub fields: Vec<String>,
}

impl CollectedRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self = self.with_header(name, value);
        }
        self
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|v| v.get(name))
    }

    pub fn selects(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collected_request_new() {
        let req = CollectedRequest::new("query { findOffersForDate(date: \"2024-12-31\") { offerCode } }");
        assert!(req.query.contains("findOffersForDate"));
        assert!(req.operation_name.is_none());
        assert!(req.variables.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = CollectedRequest::new("{ __typename }").with_header("X-Region", "north-west");
        assert_eq!(req.header("x-region"), Some("north-west"));
        assert_eq!(req.header("X-REGION"), Some("north-west"));
        assert_eq!(req.header("x-tenant"), None);
    }

    #[test]
    fn test_variable_lookup() {
        let req = CollectedRequest::new("query ($pageSize: Int!) { findAvailableProducts(type: gadget, pageSize: $pageSize) { id } }")
            .with_variables(serde_json::json!({"pageSize": 10}));
        assert_eq!(req.variable("pageSize"), Some(&serde_json::json!(10)));
        assert_eq!(req.variable("type"), None);
    }

    #[test]
    fn test_selects() {
        let req = CollectedRequest::new("")
            .with_fields(vec!["findOffersForDate".into(), "findAvailableProducts".into()]);
        assert!(req.selects("findAvailableProducts"));
        assert!(!req.selects("createProduct"));
    }
}
