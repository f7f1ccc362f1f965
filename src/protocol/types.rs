use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Identity of a cluster node.
///
/// The address doubles as the election priority: a numerically higher address
/// always wins. Ordering is the big-endian integer value of the IPv4 address,
/// which is the same as comparing octets left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeAddress(pub Ipv4Addr);

impl NodeAddress {
    pub fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(Ipv4Addr::new(a, b, c, d))
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }

    /// Returns true if this node has a higher election priority than `other`.
    pub fn outranks(&self, other: &NodeAddress) -> bool {
        u32::from(self.0) > u32::from(other.0)
    }
}

impl From<Ipv4Addr> for NodeAddress {
    fn from(ip: Ipv4Addr) -> Self {
        Self(ip)
    }
}

impl FromStr for NodeAddress {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Binary role tag assigned by the leader.
///
/// Every node starts as `Init`, the leader paints itself `Red`, and everyone
/// else receives `Red` or `Green` from the leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeColor {
    #[default]
    Init,
    Red,
    Green,
}

impl NodeColor {
    pub fn code(self) -> u8 {
        match self {
            NodeColor::Init => 1,
            NodeColor::Red => 2,
            NodeColor::Green => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(NodeColor::Init),
            2 => Some(NodeColor::Red),
            3 => Some(NodeColor::Green),
            _ => None,
        }
    }
}

impl fmt::Display for NodeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeColor::Init => "INIT",
            NodeColor::Red => "RED",
            NodeColor::Green => "GREEN",
        };
        f.write_str(name)
    }
}

/// Numeric message codes as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MsgType {
    Election = 1,
    Victory = 2,
    LeaderRequest = 3,
    LeaderResponse = 4,
    SetToRed = 5,
    SetToGreen = 6,
    Keepalive = 7,
    MonitorColorRequest = 8,
    MonitorColorResponse = 9,
}

impl MsgType {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        let msg_type = match code {
            1 => MsgType::Election,
            2 => MsgType::Victory,
            3 => MsgType::LeaderRequest,
            4 => MsgType::LeaderResponse,
            5 => MsgType::SetToRed,
            6 => MsgType::SetToGreen,
            7 => MsgType::Keepalive,
            8 => MsgType::MonitorColorRequest,
            9 => MsgType::MonitorColorResponse,
            _ => return None,
        };
        Some(msg_type)
    }
}

/// A protocol message exchanged between nodes.
///
/// - `Election/Victory`: Bully-style candidacy and the winner's announcement.
/// - `LeaderRequest/LeaderResponse`: Cheap discovery of an already elected leader.
/// - `SetToRed/SetToGreen`: Color directives pushed by the leader.
/// - `Keepalive`: Slave to leader it carries the slave's color; leader to slave
///   it is a bare liveness ack (`color: None`).
/// - `MonitorColorRequest/MonitorColorResponse`: Read-only observation of colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Election,
    Victory,
    LeaderRequest,
    LeaderResponse,
    SetToRed,
    SetToGreen,
    Keepalive { color: Option<NodeColor> },
    MonitorColorRequest,
    MonitorColorResponse { color: NodeColor },
}

impl Message {
    pub fn msg_type(&self) -> MsgType {
        match self {
            Message::Election => MsgType::Election,
            Message::Victory => MsgType::Victory,
            Message::LeaderRequest => MsgType::LeaderRequest,
            Message::LeaderResponse => MsgType::LeaderResponse,
            Message::SetToRed => MsgType::SetToRed,
            Message::SetToGreen => MsgType::SetToGreen,
            Message::Keepalive { .. } => MsgType::Keepalive,
            Message::MonitorColorRequest => MsgType::MonitorColorRequest,
            Message::MonitorColorResponse { .. } => MsgType::MonitorColorResponse,
        }
    }

    /// The directive that paints a node with `color`, if there is one.
    pub fn set_color(color: NodeColor) -> Option<Message> {
        match color {
            NodeColor::Red => Some(Message::SetToRed),
            NodeColor::Green => Some(Message::SetToGreen),
            NodeColor::Init => None,
        }
    }
}
