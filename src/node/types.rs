use crate::protocol::types::{NodeAddress, NodeColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationMode {
    #[default]
    Slave,
    Leader,
}

/// Progress of a leaderless slave towards finding or becoming the leader.
///
/// Only meaningful while the node is a slave with no known leader; it is reset
/// to `Init` whenever a leader becomes known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElectionState {
    #[default]
    Init,
    /// Broadcast LEADER_REQUEST, waiting one tick for a LEADER_RESPONSE.
    SentLeaderRequest,
    /// Broadcast ELECTION, waiting one tick for a higher node to object.
    SentElectionBroadcast,
    /// A higher node is running for leader; wait for its VICTORY.
    ElectionMsgReceived,
    /// Already waited one full tick for the higher node; one more and we restart.
    ElectionMsgLongDelay,
}

/// A member as reported by the status snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberStatus {
    pub node: NodeAddress,
    pub color: NodeColor,
    pub last_seen_ms_ago: u64,
}

/// Point-in-time view of a node, served by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub node: NodeAddress,
    pub mode: OperationMode,
    pub election_state: ElectionState,
    pub color: NodeColor,
    pub leader: Option<NodeAddress>,
    /// Non-empty only on the leader.
    pub members: Vec<MemberStatus>,
}
