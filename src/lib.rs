#![doc(test(attr(deny(warnings))))]

//! Trésorerie offers the cash-flow forecast model of the back office: the movement
//! ledger, balance projections and reconciliation helpers, wired into an application
//! context and a reporting CLI.

pub mod app;
pub mod cli;
pub mod errors;
pub mod utils;

pub use app::AppContext;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Trésorerie tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
