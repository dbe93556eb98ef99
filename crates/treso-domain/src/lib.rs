//! treso-domain
//!
//! Pure domain models for the cash-flow forecast (transactions, bookings, credit notes).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod booking;
pub mod credit_note;
pub mod transaction;
pub mod window;

pub use booking::*;
pub use credit_note::*;
pub use transaction::*;
pub use window::*;
