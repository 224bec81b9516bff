use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Context passed to handlers for one root field of a request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub field_name: String,
    pub operation_name: Option<String>,
    /// Field arguments with variables already substituted
    pub arguments: Map<String, Value>,
    pub variables: Option<Value>,
    /// Header names are stored lowercase
    pub headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Replace the arguments; anything but a JSON object clears them
    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = match arguments {
            Value::Object(map) => map,
            _ => Map::new(),
        };
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

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|v| v.get(name))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// A GraphQL error entry of the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    pub message: String,
    pub path: Option<Vec<String>>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    pub fn at_path(mut self, path: Vec<String>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut err = serde_json::json!({"message": self.message});
        if let Some(path) = &self.path {
            err["path"] = serde_json::json!(path);
        }
        err
    }
}

/// What a handler produces for one root field
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResponse {
    /// Value placed under the field's response key
    Data(Value),
    /// The field resolves to null and the error is reported
    Error(GraphQLError),
    /// The whole request is answered with this HTTP status
    Status(u16),
}

impl HandlerResponse {
    pub fn data(value: Value) -> Self {
        HandlerResponse::Data(value)
    }

    pub fn error(message: impl Into<String>) -> Self {
        HandlerResponse::Error(GraphQLError::new(message))
    }

    pub fn status(code: u16) -> Self {
        HandlerResponse::Status(code)
    }
}

/// Type alias for dynamic handler functions
pub type HandlerFn = Arc<dyn Fn(&RequestContext) -> HandlerResponse + Send + Sync>;

#[derive(Clone)]
enum Responder {
    Static(HandlerResponse),
    Dynamic(HandlerFn),
}

/// A canned answer for a field, optionally guarded by expected arguments
/// and required headers
#[derive(Clone)]
pub struct Handler {
    responder: Responder,
    arguments: Option<Map<String, Value>>,
    headers: Vec<(String, String)>,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Handler");
        match &self.responder {
            Responder::Static(response) => debug.field("response", response),
            Responder::Dynamic(_) => debug.field("response", &"<fn>"),
        };
        debug
            .field("arguments", &self.arguments)
            .field("headers", &self.headers)
            .finish()
    }
}

impl Handler {
    fn from_responder(responder: Responder) -> Self {
        Self {
            responder,
            arguments: None,
            headers: Vec::new(),
        }
    }

    /// Answer the field with a fixed value
    pub fn new(data: Value) -> Self {
        Self::from_responder(Responder::Static(HandlerResponse::Data(data)))
    }

    /// Resolve the field to null and report `message`
    pub fn error(message: impl Into<String>) -> Self {
        Self::from_responder(Responder::Static(HandlerResponse::error(message)))
    }

    /// Fail the whole request with an HTTP status
    pub fn status(code: u16) -> Self {
        Self::from_responder(Responder::Static(HandlerResponse::Status(code)))
    }

    /// Build the answer from the request context
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&RequestContext) -> HandlerResponse + Send + Sync + 'static,
    {
        Self::from_responder(Responder::Dynamic(Arc::new(f)))
    }

    /// Only serve requests whose arguments contain these members with equal
    /// values. A non-object value accepts any arguments.
    pub fn when_arguments(mut self, arguments: Value) -> Self {
        self.arguments = match arguments {
            Value::Object(map) => Some(map),
            _ => None,
        };
        self
    }

    /// Only serve requests carrying this header value
    pub fn when_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .push((name.as_ref().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn matches(&self, ctx: &RequestContext) -> bool {
        let arguments_match = self.arguments.as_ref().map_or(true, |expected| {
            expected
                .iter()
                .all(|(name, value)| ctx.argument(name) == Some(value))
        });
        let headers_match = self
            .headers
            .iter()
            .all(|(name, value)| ctx.header(name) == Some(value.as_str()));
        arguments_match && headers_match
    }

    /// Get the response for a given request context
    pub fn respond(&self, ctx: &RequestContext) -> HandlerResponse {
        match &self.responder {
            Responder::Static(response) => response.clone(),
            Responder::Dynamic(f) => f(ctx),
        }
    }
}

impl From<Value> for Handler {
    fn from(data: Value) -> Self {
        Handler::new(data)
    }
}
