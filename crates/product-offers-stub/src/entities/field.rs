use super::{Handler, RequestContext};

/// A root field of the stubbed schema with its candidate handlers
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub handlers: Vec<Handler>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn with_handlers(mut self, handlers: impl IntoIterator<Item = Handler>) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// First handler whose guards accept the request
    pub fn handler_for(&self, ctx: &RequestContext) -> Option<&Handler> {
        self.handlers.iter().find(|handler| handler.matches(ctx))
    }
}
