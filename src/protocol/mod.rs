//! Wire protocol: the byte-exact contract with the BLE transport.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  inbound   20-byte write ──▶ command::Command::parse       │
//! │                                                            │
//! │  outbound  telemetry   ◀── scheduler-driven sampling       │
//! │            events      ◀── host message-bus callbacks      │
//! │            (frame::NotificationFrame, format byte at 19)   │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod command;
pub mod events;
pub mod frame;
pub mod telemetry;
