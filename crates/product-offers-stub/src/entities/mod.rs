mod collected_request;
mod field;
mod handler;
mod operation;
mod scenario;

pub use collected_request::CollectedRequest;
pub use field::Field;
pub use handler::{GraphQLError, Handler, HandlerFn, HandlerResponse, RequestContext};
pub use operation::{Operation, OperationType};
pub use scenario::Scenario;
