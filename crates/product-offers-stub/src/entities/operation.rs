use super::Field;

/// Root type a stubbed field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
}

impl OperationType {
    /// Name reported for `__typename` on the root selection
    pub fn root_type_name(&self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Query => write!(f, "query"),
            OperationType::Mutation => write!(f, "mutation"),
        }
    }
}

/// A set of stubbed root fields of one operation type
#[derive(Debug, Clone)]
pub struct Operation {
    pub operation_type: OperationType,
    pub fields: Vec<Field>,
}

impl Operation {
    pub fn query() -> Self {
        Self {
            operation_type: OperationType::Query,
            fields: Vec::new(),
        }
    }

    pub fn mutation() -> Self {
        Self {
            operation_type: OperationType::Mutation,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }
}
