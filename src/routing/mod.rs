//! Request dispatch: the route table and the handler seam.

pub mod handler;
pub mod router;

pub use handler::{ParrotError, RouteContext, RouteHandler};
pub use router::Router;
