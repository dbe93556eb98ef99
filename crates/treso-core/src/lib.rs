//! treso-core
//!
//! Cash-flow ledger store, balance projection and reconciliation helpers.
//! Depends on treso-domain. No CLI, no terminal I/O, no persistence.

pub mod error;
pub mod format;
pub mod ledger_store;
pub mod projection_service;
pub mod reconciliation_service;
pub mod time;
pub mod validation;

pub use error::CoreError;
pub use format::*;
pub use ledger_store::*;
pub use projection_service::*;
pub use reconciliation_service::*;
pub use time::*;
pub use validation::*;
