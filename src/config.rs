//! Process-wide cluster settings.
//!
//! Read once at startup (from the command line in `main.rs`) and handed to the
//! node or monitor by reference. Defaults match the lab deployment on the
//! `10.0.1.0/24` segment.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub listen_ip: Ipv4Addr,
    pub port: u16,
    pub broadcast_ip: Ipv4Addr,
    /// Prefix used to pick this node's own address among the host interfaces.
    pub ip_prefix: String,
    /// Explicit node address; skips interface discovery when set.
    pub node_address: Option<Ipv4Addr>,
    /// Tick period for election progress, keepalives and dead-peer sweeps.
    pub keepalive_interval: Duration,
    pub leader_dead_after: Duration,
    pub node_dead_after: Duration,
    /// Fraction of the cluster (leader included) kept RED.
    pub red_ratio: f64,
    pub monitor_poll_interval: Duration,
    pub http_port: Option<u16>,
    /// Re-send a member's color directive when its keepalive reports a different color.
    pub reassert_colors: bool,
}

impl ClusterConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.listen_ip, self.port))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.red_ratio > 0.0 && self.red_ratio <= 1.0) {
            bail!("red ratio must be in (0, 1], got {}", self.red_ratio);
        }
        if self.keepalive_interval.is_zero() {
            bail!("keepalive interval must be non-zero");
        }
        if self.monitor_poll_interval.is_zero() {
            bail!("monitor poll interval must be non-zero");
        }
        if self.leader_dead_after < self.keepalive_interval {
            bail!(
                "leader dead threshold {:?} is shorter than the keepalive interval {:?}",
                self.leader_dead_after,
                self.keepalive_interval
            );
        }
        if self.node_dead_after < self.keepalive_interval {
            bail!(
                "node dead threshold {:?} is shorter than the keepalive interval {:?}",
                self.node_dead_after,
                self.keepalive_interval
            );
        }
        Ok(())
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            listen_ip: Ipv4Addr::UNSPECIFIED,
            port: 9999,
            broadcast_ip: Ipv4Addr::new(10, 0, 1, 255),
            ip_prefix: "10.0.1.".to_string(),
            node_address: None,
            keepalive_interval: Duration::from_secs(5),
            leader_dead_after: Duration::from_secs(20),
            node_dead_after: Duration::from_secs(20),
            red_ratio: 1.0 / 3.0,
            monitor_poll_interval: Duration::from_secs(3),
            http_port: None,
            reassert_colors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values_are_sensible() {
        let cfg = ClusterConfig::default();

        assert_eq!(cfg.port, 9999);
        assert_eq!(cfg.broadcast_ip, Ipv4Addr::new(10, 0, 1, 255));
        assert_eq!(cfg.keepalive_interval, Duration::from_secs(5));
        assert_eq!(cfg.leader_dead_after, Duration::from_secs(20));
        assert_eq!(cfg.node_dead_after, Duration::from_secs(20));
        assert!((cfg.red_ratio - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(cfg.listen_addr().to_string(), "0.0.0.0:9999");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_ratio() {
        let mut cfg = ClusterConfig::default();

        cfg.red_ratio = 0.0;
        assert!(cfg.validate().is_err());

        cfg.red_ratio = 1.5;
        assert!(cfg.validate().is_err());

        cfg.red_ratio = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_thresholds_below_one_tick() {
        let mut cfg = ClusterConfig::default();
        cfg.leader_dead_after = Duration::from_secs(1);
        assert!(cfg.validate().is_err());

        let mut cfg = ClusterConfig::default();
        cfg.node_dead_after = Duration::from_secs(1);
        assert!(cfg.validate().is_err());

        let mut cfg = ClusterConfig::default();
        cfg.keepalive_interval = Duration::ZERO;
        assert!(cfg.validate().is_err());
    }
}
