mod resolve;
mod server;

pub use server::StubServer;
