//! Hardware abstraction for the matrix controller
//!
//! Provides:
//! - Register map and single-transaction register writes over I²C
//! - A simulated controller for host-side previews and tests

pub mod bus;
pub mod sim;

pub use bus::{Bank, Frame, RegisterBus, DEFAULT_ADDRESS};
pub use sim::{SimBus, Transaction};
