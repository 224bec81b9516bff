use async_trait::async_trait;
use serde_json::Value;

use crate::entities::GraphQLRequest;
use crate::error::Fault;

/// Trait for sending GraphQL operations to the remote API
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    /// Send one operation, bypassing any response cache, and return the
    /// `data` member of its response
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value, Fault>;
}
