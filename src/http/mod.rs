//! HTTP value types shared by the router and the runtime.

mod request;
mod response;

pub use request::{Method, ParrotRequest, QueryMap, QueryValue};
pub use response::{ParrotResponse, StatusCode};
