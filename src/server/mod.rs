//! In-memory fake of the order API
//!
//! Three routes over an [`InMemoryOrderStore`](crate::storage::InMemoryOrderStore):
//! create, get by id and update. Used for local development and as the
//! end-to-end counterpart of [`OrderClient`](crate::client::OrderClient).

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::FakeApiServer;
pub use handlers::OrderAppState;
pub use router::{build_order_routes, build_router};
