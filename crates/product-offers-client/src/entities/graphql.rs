use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Fault;

/// One GraphQL operation ready to be sent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub variables: Value,
    /// Extra HTTP headers; not part of the JSON body
    #[serde(skip)]
    pub headers: Vec<(String, String)>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: Value::Object(Map::new()),
            headers: Vec::new(),
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQLErrorBody {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

/// Body of a GraphQL response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLErrorBody>>,
}

impl GraphQLResponse {
    /// The `data` member, or the fault the response represents. Any
    /// reported error fails the whole operation.
    pub fn into_data(self) -> Result<Value, Fault> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(Fault::GraphQL(errors.into_iter().map(|e| e.message).collect()));
        }
        match self.data {
            Some(Value::Null) | None => Err(Fault::MissingData),
            Some(data) => Ok(data),
        }
    }
}
