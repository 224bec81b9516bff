use crate::entities::{Operation, Scenario};
use crate::error::StubError;
use crate::use_cases::ports::{Collector, RunningServer, Server};

/// Builder for creating scenarios with a fluent API
pub struct ScenarioBuilder<S, C> {
    server: S,
    collector: C,
    operations: Vec<Operation>,
}

impl ScenarioBuilder<(), ()> {
    pub fn new() -> Self {
        Self {
            server: (),
            collector: (),
            operations: Vec::new(),
        }
    }
}

impl Default for ScenarioBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> ScenarioBuilder<S, C> {
    pub fn server<NewS: Server>(self, server: NewS) -> ScenarioBuilder<NewS, C> {
        ScenarioBuilder {
            server,
            collector: self.collector,
            operations: self.operations,
        }
    }

    pub fn collector<NewC: Collector>(self, collector: NewC) -> ScenarioBuilder<S, NewC> {
        ScenarioBuilder {
            server: self.server,
            collector,
            operations: self.operations,
        }
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }
}

impl<S: Server + 'static, C: Collector + 'static> ScenarioBuilder<S, C> {
    pub fn build(self) -> Scenario<S, C> {
        Scenario {
            server: self.server,
            collector: self.collector,
            operations: self.operations,
        }
    }

    /// Start the scenario directly from the builder
    pub async fn start(self) -> Result<RunningServer<C>, StubError> {
        self.build().start().await
    }
}

impl<S: Server + 'static, C: Collector + 'static> Scenario<S, C> {
    /// Bind the server and answer requests until the handle is stopped
    pub async fn start(self) -> Result<RunningServer<C>, StubError> {
        self.server.start(self.operations, self.collector).await
    }
}
