//! Envelope encoding for datagrams.

use super::types::{Message, MsgType, NodeColor};

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// The `{type, data}` envelope that travels inside each UDP datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEnvelope {
    pub msg_type: u8,
    pub data: Option<u8>,
}

impl From<&Message> for WireEnvelope {
    fn from(msg: &Message) -> Self {
        let data = match msg {
            Message::Keepalive { color } => color.map(NodeColor::code),
            Message::MonitorColorResponse { color } => Some(color.code()),
            _ => None,
        };

        Self {
            msg_type: msg.msg_type().code(),
            data,
        }
    }
}

impl TryFrom<WireEnvelope> for Message {
    type Error = anyhow::Error;

    fn try_from(envelope: WireEnvelope) -> Result<Self> {
        let msg_type = MsgType::from_code(envelope.msg_type)
            .ok_or_else(|| anyhow!("Unknown message type: {}", envelope.msg_type))?;

        let color = match envelope.data {
            Some(code) => Some(
                NodeColor::from_code(code).ok_or_else(|| anyhow!("Unknown color code: {}", code))?,
            ),
            None => None,
        };

        let msg = match msg_type {
            MsgType::Election => Message::Election,
            MsgType::Victory => Message::Victory,
            MsgType::LeaderRequest => Message::LeaderRequest,
            MsgType::LeaderResponse => Message::LeaderResponse,
            MsgType::SetToRed => Message::SetToRed,
            MsgType::SetToGreen => Message::SetToGreen,
            MsgType::Keepalive => Message::Keepalive { color },
            MsgType::MonitorColorRequest => Message::MonitorColorRequest,
            MsgType::MonitorColorResponse => match color {
                Some(color) => Message::MonitorColorResponse { color },
                None => bail!("MONITOR_COLOR_RESPONSE without a color"),
            },
        };

        Ok(msg)
    }
}

pub fn encode(msg: &Message) -> Result<Vec<u8>> {
    Ok(bincode::serialize(&WireEnvelope::from(msg))?)
}

pub fn decode(bytes: &[u8]) -> Result<Message> {
    let envelope: WireEnvelope = bincode::deserialize(bytes)?;
    Message::try_from(envelope)
}
