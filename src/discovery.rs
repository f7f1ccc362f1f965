//! Self-identification: finds which of the host's addresses belongs to the
//! cluster segment.

use crate::protocol::types::NodeAddress;

use anyhow::{Result, anyhow};
use std::net::{IpAddr, Ipv4Addr};

/// Returns the first IPv4 interface address whose dotted form starts with `prefix`.
pub fn local_address(prefix: &str) -> Result<NodeAddress> {
    let candidates: Vec<Ipv4Addr> = get_if_addrs::get_if_addrs()?
        .into_iter()
        .filter_map(|iface| match iface.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .collect();

    tracing::debug!("Interface addresses: {:?}", candidates);

    match_prefix(&candidates, prefix)
        .ok_or_else(|| anyhow!("No local IPv4 address matches prefix '{}'", prefix))
}

pub fn match_prefix(candidates: &[Ipv4Addr], prefix: &str) -> Option<NodeAddress> {
    candidates
        .iter()
        .find(|ip| ip.to_string().starts_with(prefix))
        .map(|ip| NodeAddress(*ip))
}
