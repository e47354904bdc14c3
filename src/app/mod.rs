//! Application core: pure bridge logic, zero I/O.
//!
//! All interaction with the board happens through the **port traits**
//! defined in [`ports`], keeping this layer testable without a micro:bit.

pub mod events;
pub mod ports;
pub mod service;
