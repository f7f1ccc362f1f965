//! UDP Transport Adapter
//!
//! Owns the node's single UDP socket. Receiving goes through tokio; sending uses
//! a non-blocking clone of the same socket so that a send never waits on the
//! reactor. Peers see our listening address as the datagram source and can
//! reply to it directly.

use super::Transport;
use crate::protocol::codec;
use crate::protocol::types::{Message, NodeAddress};

use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;

const MAX_DATAGRAM_SIZE: usize = 1024;

pub struct UdpTransport {
    socket: UdpSocket,
    sender: std::net::UdpSocket,
    port: u16,
    broadcast_addr: SocketAddr,
}

impl UdpTransport {
    /// Binds the cluster socket and enables broadcast on it.
    ///
    /// Binding port 0 picks a free port, which then becomes the cluster port
    /// used for every outbound datagram.
    pub async fn bind(listen_addr: SocketAddr, broadcast_ip: Ipv4Addr) -> Result<Arc<Self>> {
        let std_socket = std::net::UdpSocket::bind(listen_addr)?;
        std_socket.set_broadcast(true)?;
        std_socket.set_nonblocking(true)?;

        let sender = std_socket.try_clone()?;
        let socket = UdpSocket::from_std(std_socket)?;

        let port = socket.local_addr()?.port();
        let broadcast_addr = SocketAddr::V4(SocketAddrV4::new(broadcast_ip, port));

        tracing::info!(
            "UDP transport bound on {} (broadcast {})",
            socket.local_addr()?,
            broadcast_addr
        );

        Ok(Arc::new(Self {
            socket,
            sender,
            port,
            broadcast_addr,
        }))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn send(&self, target: SocketAddr, msg: &Message) {
        let encoded = match codec::encode(msg) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!("Failed to encode {:?}: {}", msg, e);
                return;
            }
        };

        if let Err(e) = self.sender.send_to(&encoded, target) {
            tracing::warn!("Failed to send {:?} to {}: {}", msg.msg_type(), target, e);
        }
    }

    /// Receives datagrams forever and hands each decoded message to `handler`.
    ///
    /// Undecodable payloads and non-IPv4 senders are logged and dropped.
    pub async fn receive_loop<F>(self: Arc<Self>, mut handler: F)
    where
        F: FnMut(NodeAddress, Message) + Send,
    {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            match self.socket.recv_from(&mut buf).await {
                Ok((len, src)) => {
                    let sender = match src.ip() {
                        IpAddr::V4(ip) => NodeAddress(ip),
                        IpAddr::V6(_) => {
                            tracing::warn!("Ignoring datagram from non-IPv4 peer {}", src);
                            continue;
                        }
                    };

                    match codec::decode(&buf[..len]) {
                        Ok(msg) => handler(sender, msg),
                        Err(e) => {
                            tracing::warn!("Discarding malformed datagram from {}: {}", src, e);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to receive UDP packet: {}", e);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}

impl Transport for UdpTransport {
    fn broadcast(&self, msg: &Message) {
        tracing::debug!("Sending {:?} broadcast", msg.msg_type());
        self.send(self.broadcast_addr, msg);
    }

    fn unicast(&self, peer: NodeAddress, msg: &Message) {
        tracing::debug!("Sending {:?} unicast to {}", msg.msg_type(), peer);
        self.send(SocketAddr::V4(SocketAddrV4::new(peer.ip(), self.port)), msg);
    }
}
