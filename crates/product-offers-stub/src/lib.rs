//! Product Offers Stub
//!
//! A stub GraphQL backend that answers root fields from canned examples and
//! records every request it receives. Examples are matched on the resolved
//! field arguments and on request headers, the way a contract-driven
//! virtualization server matches its example files.
//!
//! # Example
//!
//! ```rust,no_run
//! use product_offers_stub::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), StubError> {
//!     let running = ScenarioBuilder::new()
//!         .server(StubServer::default())
//!         .collector(DefaultCollector::new())
//!         .operation(
//!             Operation::query().with_field(
//!                 Field::new("findOffersForDate").with_handler(
//!                     Handler::new(json!([{"offerCode": "WKND30", "validUntil": "2024-12-12"}]))
//!                         .when_arguments(json!({"date": "2024-12-31"})),
//!                 ),
//!             ),
//!         )
//!         .start()
//!         .await?;
//!
//!     println!("stub listening on {}", running.url());
//!
//!     let requests = running.stop().await?;
//!     println!("served {} requests", requests.len());
//!     Ok(())
//! }
//! ```

mod adapters;
pub mod entities;
pub mod error;
pub mod fixtures;
pub mod use_cases;

pub use error::StubError;

#[cfg(feature = "axum")]
pub use adapters::gateways::StubServer;

/// Default collector keeping every request in arrival order
pub struct DefaultCollector {
    requests: std::sync::Mutex<Vec<entities::CollectedRequest>>,
}

impl DefaultCollector {
    pub fn new() -> Self {
        Self {
            requests: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Number of requests recorded so far
    pub fn len(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DefaultCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl use_cases::ports::Collector for DefaultCollector {
    type Output = Vec<entities::CollectedRequest>;

    fn collect(&self, request: entities::CollectedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }

    fn into_output(self) -> Self::Output {
        self.requests.into_inner().unwrap_or_default()
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::entities::{
        CollectedRequest, Field, GraphQLError, Handler, HandlerResponse, Operation, OperationType,
        RequestContext, Scenario,
    };
    pub use crate::error::StubError;
    pub use crate::fixtures;
    pub use crate::use_cases::ports::{Collector, RunningServer, Server};
    pub use crate::use_cases::ScenarioBuilder;
    pub use crate::DefaultCollector;
    pub use serde_json::json;

    #[cfg(feature = "axum")]
    pub use crate::StubServer;
}
