//! Protocol Module Tests
//!
//! Validates node identity ordering and the datagram envelope.
//!
//! ## Test Scopes
//! - **Addresses**: The election priority order must be identical on every node.
//! - **Codes**: Message and color codes match the numbers other nodes put on the wire.
//! - **Codec**: Payload-carrying messages keep their data, malformed datagrams are rejected.

#[cfg(test)]
mod tests {
    use crate::protocol::codec::{WireEnvelope, decode, encode};
    use crate::protocol::types::{Message, MsgType, NodeAddress, NodeColor};

    // ============================================================
    // NODE ADDRESS TESTS
    // ============================================================

    #[test]
    fn test_higher_last_octet_outranks() {
        let a = NodeAddress::new(10, 0, 1, 5);
        let b = NodeAddress::new(10, 0, 1, 9);

        assert!(b.outranks(&a));
        assert!(!a.outranks(&b));
    }

    #[test]
    fn test_ordering_is_numeric_not_textual() {
        // "10.0.1.10" < "10.0.1.9" as strings, but not as addresses
        let nine = NodeAddress::new(10, 0, 1, 9);
        let ten = NodeAddress::new(10, 0, 1, 10);

        assert!(ten.outranks(&nine));
        assert!(nine < ten);
    }

    #[test]
    fn test_leading_octets_dominate() {
        let low = NodeAddress::new(10, 0, 1, 254);
        let high = NodeAddress::new(10, 0, 2, 1);

        assert!(high.outranks(&low));
    }

    #[test]
    fn test_node_never_outranks_itself() {
        let a = NodeAddress::new(10, 0, 1, 5);
        assert!(!a.outranks(&a));
    }

    #[test]
    fn test_address_parse_and_display() {
        let addr: NodeAddress = "10.0.1.42".parse().expect("valid address");

        assert_eq!(addr, NodeAddress::new(10, 0, 1, 42));
        assert_eq!(addr.to_string(), "10.0.1.42");
        assert!("10.0.1".parse::<NodeAddress>().is_err());
    }

    // ============================================================
    // CODE TESTS
    // ============================================================

    #[test]
    fn test_message_codes() {
        assert_eq!(Message::Election.msg_type().code(), 1);
        assert_eq!(Message::Victory.msg_type().code(), 2);
        assert_eq!(Message::LeaderRequest.msg_type().code(), 3);
        assert_eq!(Message::LeaderResponse.msg_type().code(), 4);
        assert_eq!(Message::SetToRed.msg_type().code(), 5);
        assert_eq!(Message::SetToGreen.msg_type().code(), 6);
        assert_eq!(Message::Keepalive { color: None }.msg_type().code(), 7);
        assert_eq!(Message::MonitorColorRequest.msg_type().code(), 8);
        assert_eq!(
            Message::MonitorColorResponse {
                color: NodeColor::Red
            }
            .msg_type()
            .code(),
            9
        );
        assert_eq!(MsgType::from_code(0), None);
        assert_eq!(MsgType::from_code(10), None);
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(NodeColor::Init.code(), 1);
        assert_eq!(NodeColor::Red.code(), 2);
        assert_eq!(NodeColor::Green.code(), 3);
        assert_eq!(NodeColor::from_code(4), None);
        assert_eq!(NodeColor::default(), NodeColor::Init);
    }

    #[test]
    fn test_set_color_directive() {
        assert_eq!(Message::set_color(NodeColor::Red), Some(Message::SetToRed));
        assert_eq!(Message::set_color(NodeColor::Green), Some(Message::SetToGreen));
        assert_eq!(Message::set_color(NodeColor::Init), None);
    }

    // ============================================================
    // CODEC TESTS
    // ============================================================

    #[test]
    fn test_keepalive_carries_color() {
        let msg = Message::Keepalive {
            color: Some(NodeColor::Green),
        };

        let envelope = WireEnvelope::from(&msg);
        assert_eq!(envelope.msg_type, 7);
        assert_eq!(envelope.data, Some(3));

        let decoded = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_bare_keepalive_has_no_data() {
        let msg = Message::Keepalive { color: None };

        let envelope = WireEnvelope::from(&msg);
        assert_eq!(envelope.data, None);

        let decoded = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_monitor_response_carries_color() {
        let msg = Message::MonitorColorResponse {
            color: NodeColor::Red,
        };

        let decoded = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_plain_messages_have_no_data() {
        for msg in [
            Message::Election,
            Message::Victory,
            Message::LeaderRequest,
            Message::LeaderResponse,
            Message::SetToRed,
            Message::SetToGreen,
            Message::MonitorColorRequest,
        ] {
            assert_eq!(WireEnvelope::from(&msg).data, None, "{:?}", msg);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let bytes = bincode::serialize(&WireEnvelope {
            msg_type: 42,
            data: None,
        })
        .unwrap();

        let result = decode(&bytes);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown message type"));
    }

    #[test]
    fn test_decode_rejects_unknown_color() {
        let bytes = bincode::serialize(&WireEnvelope {
            msg_type: 7,
            data: Some(9),
        })
        .unwrap();

        let result = decode(&bytes);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown color code"));
    }

    #[test]
    fn test_decode_rejects_monitor_response_without_color() {
        let bytes = bincode::serialize(&WireEnvelope {
            msg_type: 9,
            data: None,
        })
        .unwrap();

        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode(&[]).is_err());
        assert!(decode(b"7").is_err());
    }
}
