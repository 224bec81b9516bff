use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::Collector;
use crate::entities::Operation;
use crate::error::StubError;

/// Trait for stub server implementations
#[async_trait]
pub trait Server: Send + Sync + Clone {
    /// Bind and start answering the given operations in the background
    async fn start<C>(
        &self,
        operations: Vec<Operation>,
        collector: C,
    ) -> Result<RunningServer<C>, StubError>
    where
        C: Collector + 'static;
}

/// Handle to a started stub. Dropping it without `stop` also shuts the
/// server down, but discards what was collected.
pub struct RunningServer<C> {
    addr: SocketAddr,
    collector: Arc<C>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Result<(), StubError>>,
}

impl<C: Collector> RunningServer<C> {
    pub fn new(
        addr: SocketAddr,
        collector: Arc<C>,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), StubError>>,
    ) -> Self {
        Self {
            addr,
            collector,
            shutdown,
            task,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// GraphQL endpoint URL of the stub
    pub fn url(&self) -> String {
        format!("http://{}/graphql", self.addr)
    }

    /// The collector while the server is still running
    pub fn collector(&self) -> &C {
        &self.collector
    }

    /// Shut down gracefully and return what the collector recorded
    pub async fn stop(self) -> Result<C::Output, StubError> {
        let _ = self.shutdown.send(());
        self.task
            .await
            .map_err(|e| StubError::ServerError(e.to_string()))??;

        let collector = Arc::try_unwrap(self.collector)
            .map_err(|_| StubError::ServerError("Collector is still shared".to_string()))?;
        Ok(collector.into_output())
    }
}
