//! Node Role Module
//!
//! The heart of the cluster: every node runs the same state machine and ends up
//! either the single LEADER or one of many SLAVES.
//!
//! ## Core Mechanisms
//! - **Bully Election**: A leaderless node first asks for an existing leader, then
//!   broadcasts ELECTION, and declares VICTORY if nobody with a higher address objects.
//! - **Membership**: The leader tracks slaves through their keepalives and evicts
//!   the ones that go quiet for longer than the dead threshold.
//! - **Coloring**: After every membership change the leader repaints the cluster so
//!   that a fixed fraction of it is RED.
//! - **Leader Liveness**: Slaves watch the leader's keepalive acks and restart the
//!   election when the leader goes quiet.
//!
//! ## Submodules
//! - **`controller`**: `NodeRoleController`, the single entry point for messages and ticks.
//! - **`leader`** / **`slave`**: The two role behaviors the controller delegates to.
//! - **`membership`**: The leader's ordered membership table.
//! - **`service`**: Wires a controller to the UDP socket and the ticker.

pub mod controller;
pub mod leader;
pub mod membership;
pub mod service;
pub mod slave;
pub mod types;
