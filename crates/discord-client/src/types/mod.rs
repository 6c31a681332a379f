//! Request and response types for the Discord REST API.

mod message;

pub use message::*;
