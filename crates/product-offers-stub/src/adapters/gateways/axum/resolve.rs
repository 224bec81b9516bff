use async_graphql::parser::parse_query;
use async_graphql::parser::types::{
    ExecutableDocument, Field as SelectedField, OperationDefinition,
    OperationType as DocumentOperationType, Selection,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::entities::{Field, GraphQLError, HandlerResponse, Operation, OperationType, RequestContext};

#[derive(Debug, Deserialize)]
pub(super) struct GraphQLRequest {
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    pub variables: Option<Value>,
}

/// Stubbed root fields indexed by operation type and field name
#[derive(Debug, Default)]
pub(super) struct HandlerTable {
    fields: HashMap<(OperationType, String), Field>,
}

impl HandlerTable {
    pub fn from_operations(operations: Vec<Operation>) -> Self {
        let mut fields: HashMap<(OperationType, String), Field> = HashMap::new();
        for operation in operations {
            for field in operation.fields {
                let key = (operation.operation_type, field.name.clone());
                match fields.get_mut(&key) {
                    Some(existing) => existing.handlers.extend(field.handlers),
                    None => {
                        fields.insert(key, field);
                    }
                }
            }
        }
        Self { fields }
    }

    fn field(&self, operation_type: OperationType, name: &str) -> Option<&Field> {
        self.fields.get(&(operation_type, name.to_string()))
    }
}

/// How the stub answers a request
#[derive(Debug, PartialEq)]
pub(super) enum Outcome {
    Body {
        data: Option<Value>,
        errors: Vec<GraphQLError>,
    },
    Status(u16),
}

impl Outcome {
    fn failure(message: impl Into<String>) -> Self {
        Outcome::Body {
            data: None,
            errors: vec![GraphQLError::new(message)],
        }
    }
}

#[derive(Debug)]
pub(super) struct Resolved {
    /// Root fields the executed operation selected
    pub fields: Vec<String>,
    pub outcome: Outcome,
}

pub(super) fn resolve(
    request: &GraphQLRequest,
    headers: &HashMap<String, String>,
    table: &HandlerTable,
) -> Resolved {
    let document = match parse_query(&request.query) {
        Ok(document) => document,
        Err(e) => {
            return Resolved {
                fields: Vec::new(),
                outcome: Outcome::failure(e.to_string()),
            }
        }
    };

    let Some(operation) = select_operation(&document, request.operation_name.as_deref()) else {
        let message = match &request.operation_name {
            Some(name) => format!("Unknown operation named \"{name}\""),
            None => "Operation name is required when the document has several operations".to_string(),
        };
        return Resolved {
            fields: Vec::new(),
            outcome: Outcome::failure(message),
        };
    };

    let operation_type = match operation.ty {
        DocumentOperationType::Query => OperationType::Query,
        DocumentOperationType::Mutation => OperationType::Mutation,
        DocumentOperationType::Subscription => {
            return Resolved {
                fields: Vec::new(),
                outcome: Outcome::failure("Subscriptions are not supported"),
            }
        }
    };

    let mut fields = Vec::new();
    let mut data = Map::new();
    let mut errors = Vec::new();

    for selection in &operation.selection_set.node.items {
        let Selection::Field(selected) = &selection.node else {
            continue;
        };
        let selected = &selected.node;
        let name = selected.name.node.as_str();
        let key = selected
            .alias
            .as_ref()
            .map_or(name, |alias| alias.node.as_str())
            .to_string();

        if name == "__typename" {
            data.insert(key, Value::String(operation_type.root_type_name().to_string()));
            continue;
        }
        fields.push(name.to_string());

        let arguments = match resolve_arguments(selected, request.variables.as_ref()) {
            Ok(arguments) => arguments,
            Err(message) => {
                errors.push(GraphQLError::new(message).at_path(vec![key.clone()]));
                data.insert(key, Value::Null);
                continue;
            }
        };

        let mut ctx = RequestContext::new(name).with_arguments(Value::Object(arguments));
        ctx.headers = headers.clone();
        if let Some(op_name) = &request.operation_name {
            ctx = ctx.with_operation_name(op_name);
        }
        if let Some(vars) = &request.variables {
            ctx = ctx.with_variables(vars.clone());
        }

        let Some(handler) = table
            .field(operation_type, name)
            .and_then(|field| field.handler_for(&ctx))
        else {
            tracing::debug!(field = name, arguments = ?ctx.arguments, "no stubbed example matches");
            errors.push(
                GraphQLError::new(format!("No example matches {operation_type} field \"{name}\""))
                    .at_path(vec![key.clone()]),
            );
            data.insert(key, Value::Null);
            continue;
        };

        match handler.respond(&ctx) {
            HandlerResponse::Data(value) => {
                data.insert(key, value);
            }
            HandlerResponse::Error(mut error) => {
                if error.path.is_none() {
                    error.path = Some(vec![key.clone()]);
                }
                errors.push(error);
                data.insert(key, Value::Null);
            }
            HandlerResponse::Status(code) => {
                return Resolved {
                    fields,
                    outcome: Outcome::Status(code),
                }
            }
        }
    }

    Resolved {
        fields,
        outcome: Outcome::Body {
            data: Some(Value::Object(data)),
            errors,
        },
    }
}

/// The operation named `operation_name`, or the only one of the document
/// when no name is given
fn select_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Option<&'a OperationDefinition> {
    if let Some(wanted) = operation_name {
        return document
            .operations
            .iter()
            .find(|(name, _)| name.map(|n| n.as_str()) == Some(wanted))
            .map(|(_, operation)| &operation.node);
    }
    let mut operations = document.operations.iter();
    let (_, first) = operations.next()?;
    match operations.next() {
        Some(_) => None,
        None => Some(&first.node),
    }
}

/// Arguments of a root field as JSON, with variables substituted
fn resolve_arguments(
    field: &SelectedField,
    variables: Option<&Value>,
) -> Result<Map<String, Value>, String> {
    let mut resolved = Map::new();
    for (name, value) in &field.arguments {
        let constant = value
            .node
            .clone()
            .into_const_with(|variable| {
                let json = variables
                    .and_then(|vars| vars.get(variable.as_str()))
                    .cloned()
                    .unwrap_or(Value::Null);
                async_graphql::Value::from_json(json).map_err(|e| e.to_string())
            })?;
        let json = constant.into_json().map_err(|e| e.to_string())?;
        resolved.insert(name.node.as_str().to_string(), json);
    }
    Ok(resolved)
}
