//! Microbit More bridge core.
//!
//! The device-side logic that lets a paired companion application drive a
//! micro:bit over BLE: command decoding and dispatch, pin event routing,
//! event and telemetry encoding, median filtering, the shadow display
//! buffer and the shared registers.  The BLE stack, LED driver and host
//! message bus stay outside; the core reaches them through the port traits
//! in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod pin_events;
pub mod pins;
pub mod protocol;
pub mod pull;
pub mod registers;
pub mod sensors;
