pub mod rescale_request;
pub mod server;
pub mod action;

pub use rescale_request::RescaleRequest;
pub use server::{Server, ServerTypeRef};
pub use action::{Action, ActionError};
