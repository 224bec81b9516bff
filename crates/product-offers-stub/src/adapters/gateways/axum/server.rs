use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;

use super::resolve::{resolve, GraphQLRequest, HandlerTable, Outcome};
use crate::entities::{CollectedRequest, GraphQLError, Operation};
use crate::error::StubError;
use crate::use_cases::ports::{Collector, RunningServer, Server};

/// Axum-based stub server answering `POST /graphql`
#[derive(Clone)]
pub struct StubServer {
    addr: SocketAddr,
}

impl StubServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    pub fn bind(addr: impl Into<SocketAddr>) -> Self {
        Self::new(addr.into())
    }
}

impl Default for StubServer {
    fn default() -> Self {
        Self::new(([127, 0, 0, 1], 0).into())
    }
}

#[derive(Debug, Serialize)]
struct GraphQLResponse {
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<Value>>,
}

impl GraphQLResponse {
    fn new(data: Option<Value>, errors: &[GraphQLError]) -> Self {
        Self {
            data,
            errors: if errors.is_empty() {
                None
            } else {
                Some(errors.iter().map(GraphQLError::to_value).collect())
            },
        }
    }
}

/// Type-erased collector trait for internal use
trait RequestSink: Send + Sync {
    fn collect(&self, request: CollectedRequest);
}

impl<C: Collector> RequestSink for C {
    fn collect(&self, request: CollectedRequest) {
        Collector::collect(self, request);
    }
}

/// State shared with handlers
#[derive(Clone)]
struct ServerState {
    handlers: Arc<HandlerTable>,
    collector: Arc<dyn RequestSink>,
}

fn header_map(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_ascii_lowercase(),
                v.to_str().unwrap_or("").to_string(),
            )
        })
        .collect()
}

async fn handle_graphql(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let headers = header_map(&headers);

    let request: GraphQLRequest = match serde_json::from_str(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed GraphQL request body");
            state
                .collector
                .collect(CollectedRequest::new(body).with_headers(headers));
            let errors = [GraphQLError::new(e.to_string())];
            return (StatusCode::OK, Json(GraphQLResponse::new(None, &errors))).into_response();
        }
    };

    let resolved = resolve(&request, &headers, &state.handlers);
    tracing::debug!(
        operation = ?request.operation_name,
        fields = ?resolved.fields,
        "stub answered GraphQL request"
    );

    let mut collected = CollectedRequest::new(&request.query)
        .with_headers(headers)
        .with_fields(resolved.fields);
    if let Some(op_name) = &request.operation_name {
        collected = collected.with_operation_name(op_name);
    }
    if let Some(vars) = &request.variables {
        collected = collected.with_variables(vars.clone());
    }
    state.collector.collect(collected);

    match resolved.outcome {
        Outcome::Body { data, errors } => {
            (StatusCode::OK, Json(GraphQLResponse::new(data, &errors))).into_response()
        }
        Outcome::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let errors = [GraphQLError::new(format!("Stubbed failure with status {code}"))];
            (status, Json(GraphQLResponse::new(None, &errors))).into_response()
        }
    }
}

#[async_trait]
impl Server for StubServer {
    async fn start<C>(
        &self,
        operations: Vec<Operation>,
        collector: C,
    ) -> Result<RunningServer<C>, StubError>
    where
        C: Collector + 'static,
    {
        let collector = Arc::new(collector);

        let state = ServerState {
            handlers: Arc::new(HandlerTable::from_operations(operations)),
            collector: collector.clone(),
        };

        let router = Router::new()
            .route("/graphql", post(handle_graphql))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "stub GraphQL server listening");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .map_err(|e| StubError::ServerError(e.to_string()))
        });

        Ok(RunningServer::new(addr, collector, shutdown_tx, task))
    }
}
