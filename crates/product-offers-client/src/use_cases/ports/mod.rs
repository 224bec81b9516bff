mod notifier;
mod transport;

pub use notifier::Notifier;
pub use transport::GraphQLTransport;
