//! Cluster Wire Protocol
//!
//! Defines the vocabulary every node speaks over UDP: node identities, colors,
//! and the nine message kinds exchanged during election, membership tracking,
//! color assignment and monitoring.
//!
//! ## Wire Format
//! Each datagram carries a small `{type, data}` envelope encoded with `bincode`.
//! `type` is the numeric message code and `data` is an optional color code,
//! used only by `KEEPALIVE` and `MONITOR_COLOR_RESPONSE`.

pub mod codec;
pub mod types;

#[cfg(test)]
mod tests;
