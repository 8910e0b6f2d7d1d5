//! Driver for IS31FL3731-class charlieplexed LED matrices
//!
//! This crate drives the two 144-LED panels found on small maker boards: a
//! 15×8 panel wired row by row and a 16×6 panel wired column by column.
//! Both sit behind the same I²C controller with eight frame buffers and
//! hardware blinking.
//!
//! # Architecture
//!
//! ```text
//! Application
//!     │
//!     ▼
//! ┌─────────────┐    ┌──────────────┐
//! │   Matrix    │◀───│  ScrollText  │
//! │  (engine)   │    │ (animation)  │
//! └──────┬──────┘    └──────────────┘
//!        │
//!   ┌────┴─────┬──────────┬─────────┐
//!   ▼          ▼          ▼         ▼
//! planes    geometry    world     text
//!   └────┬─────┴──────────┴─────────┘
//!        ▼
//! ┌───────────────┐
//! │ Layout (pack) │
//! └──────┬────────┘
//!        ▼
//! ┌─────────────────┐
//! │ FrameController │
//! └──────┬──────────┘
//!        ▼
//!   RegisterBus ──▶ embedded-hal I²C
//! ```
//!
//! # Guarantees
//!
//! - Out-of-range coordinates are ignored, never written
//! - Switching a pixel off also switches its blink bit off
//! - Every register write reaches the controller as one bus transaction
//! - Frame numbers outside 0-7 cannot be expressed

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod animation;
pub mod config;
pub mod display;
pub mod hal;
pub mod layout;
pub mod text;

// Re-export main types
pub use animation::{Animation, ScrollText};
pub use config::{ConfigError, MatrixConfig};
pub use display::{Canvas, ControllerState, Direction, Matrix, Plane, PlanePair, Shape, WorldCanvas};
pub use hal::{Frame, SimBus};
pub use layout::{Layout, Variant};
pub use text::{Bitmap, FontProvider, Glyph, MicroFont, Symbol};
