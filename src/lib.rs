//! Self-Organizing Color Cluster Library
//!
//! Equal peers on one broadcast segment elect a single leader (Bully-style,
//! highest address wins). The leader tracks membership through keepalives and
//! keeps a fixed fraction of the cluster RED and the rest GREEN. Slaves watch
//! the leader and re-run the election when it dies.
//!
//! ## Architecture Modules
//! - **`protocol`**: Node addresses, colors, the nine message kinds and their wire envelope.
//! - **`transport`**: The `Transport` seam and its UDP implementation.
//! - **`node`**: The election state machine and the leader/slave roles, plus the
//!   service that drives them from the socket and a ticker.
//! - **`monitor`**: A passive observer that polls and displays node colors.
//! - **`status`**: Read-only HTTP endpoints for nodes and monitors.
//! - **`config`** / **`discovery`**: Startup settings and self-identification.

pub mod config;
pub mod discovery;
pub mod monitor;
pub mod node;
pub mod protocol;
pub mod status;
pub mod transport;
