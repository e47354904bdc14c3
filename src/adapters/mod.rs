//! Adapters: concrete implementations of the outbound port traits.
//!
//! | Adapter        | Implements | Connects to                        |
//! |----------------|------------|------------------------------------|
//! | `log_sink`     | NotifySink | Serial log output                  |
//! | `channel_sink` | NotifySink | embassy-sync channel to a BLE task |

pub mod channel_sink;
pub mod log_sink;
