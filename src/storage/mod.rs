//! Remote procedure store abstraction and its REST-backed implementation

pub mod rest;
pub mod traits;

pub use rest::{RestProcedureStore, RestStoreConnector};
pub use traits::{ProcedureStore, StoreConnector};
