use crate::entities::Operation;

/// A stub configuration: the server to run, where requests are recorded, and
/// the operations it answers
pub struct Scenario<S, C> {
    pub(crate) server: S,
    pub(crate) collector: C,
    pub(crate) operations: Vec<Operation>,
}
