//! Gateway interface resolution
//!
//! Enumerates local interfaces, applies the viability filters and returns the
//! single interface usable as the outbound gateway.

use crate::error::InterfaceError;
use std::net::{IpAddr, Ipv4Addr};
use tracing::info;

/// Local interface evaluated for gateway suitability
#[derive(Debug, Clone)]
pub struct Candidate {
    pub index: u32,
    pub name: String,
    pub is_up: bool,
    pub is_loopback: bool,
    pub addrs: Vec<IpAddr>,
}

/// Resolve the single local interface usable as the outbound gateway.
///
/// Interfaces are enumerated fresh on every call; nothing is cached between
/// resolutions.
pub fn resolve(requested: Option<Ipv4Addr>) -> Result<Candidate, InterfaceError> {
    resolve_from(enumerate(), requested)
}

fn enumerate() -> Vec<Candidate> {
    pnet_datalink::interfaces()
        .into_iter()
        .map(|intf| Candidate {
            index: intf.index,
            is_up: intf.is_up(),
            is_loopback: intf.is_loopback(),
            addrs: intf.ips.iter().map(|net| net.ip()).collect(),
            name: intf.name,
        })
        .collect()
}

/// Apply the viability filters and pick the surviving interface.
///
/// An interface survives when it is up, not loopback, and carries a global
/// unicast IPv4 address; with a requested gateway address, only an exact
/// address match qualifies. Several survivors are an error rather than a
/// first-wins pick: enumeration order is whatever the host reports, and the
/// caller disambiguates by supplying an explicit gateway address.
pub fn resolve_from(
    candidates: Vec<Candidate>,
    requested: Option<Ipv4Addr>,
) -> Result<Candidate, InterfaceError> {
    let viable: Vec<Candidate> = candidates
        .into_iter()
        .filter(|intf| intf.is_up && !intf.is_loopback)
        .filter(|intf| {
            intf.addrs.iter().any(|addr| match addr {
                IpAddr::V4(v4) => {
                    is_global_unicast(*v4) && requested.map_or(true, |want| *v4 == want)
                }
                IpAddr::V6(_) => false,
            })
        })
        .collect();

    for intf in &viable {
        info!(index = intf.index, name = %intf.name, "Found viable interface");
    }

    let mut survivors = viable.into_iter();
    match (survivors.next(), survivors.next()) {
        (Some(intf), None) => Ok(intf),
        (None, _) => Err(InterfaceError::NoViableInterface),
        _ => Err(InterfaceError::AmbiguousInterface),
    }
}

/// Global unicast excludes the unspecified address, loopback, link-local,
/// multicast and the limited broadcast address.
fn is_global_unicast(addr: Ipv4Addr) -> bool {
    !addr.is_unspecified()
        && !addr.is_loopback()
        && !addr.is_link_local()
        && !addr.is_multicast()
        && !addr.is_broadcast()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: u32, name: &str, addrs: &[&str]) -> Candidate {
        Candidate {
            index,
            name: name.to_string(),
            is_up: true,
            is_loopback: false,
            addrs: addrs.iter().map(|a| a.parse().unwrap()).collect(),
        }
    }

    #[test]
    fn test_single_viable_interface() {
        let candidates = vec![candidate(2, "eth0", &["192.168.1.10"])];
        let intf = resolve_from(candidates, None).unwrap();
        assert_eq!(intf.index, 2);
        assert_eq!(intf.name, "eth0");
    }

    #[test]
    fn test_no_interfaces() {
        assert_eq!(
            resolve_from(Vec::new(), None).unwrap_err(),
            InterfaceError::NoViableInterface
        );
    }

    #[test]
    fn test_two_viable_interfaces_are_ambiguous() {
        let candidates = vec![
            candidate(2, "eth0", &["192.168.1.10"]),
            candidate(3, "eth1", &["10.0.0.5"]),
        ];
        assert_eq!(
            resolve_from(candidates, None).unwrap_err(),
            InterfaceError::AmbiguousInterface
        );
    }

    #[test]
    fn test_requested_gateway_disambiguates() {
        let candidates = vec![
            candidate(2, "eth0", &["192.168.1.10"]),
            candidate(3, "eth1", &["10.0.0.5"]),
        ];
        let want: Ipv4Addr = "10.0.0.5".parse().unwrap();
        let intf = resolve_from(candidates, Some(want)).unwrap();
        assert_eq!(intf.index, 3);
    }

    #[test]
    fn test_requested_gateway_matches_nothing() {
        let candidates = vec![candidate(2, "eth0", &["192.168.1.10"])];
        let want: Ipv4Addr = "172.16.0.1".parse().unwrap();
        assert_eq!(
            resolve_from(candidates, Some(want)).unwrap_err(),
            InterfaceError::NoViableInterface
        );
    }

    #[test]
    fn test_down_interface_is_skipped() {
        let mut down = candidate(2, "eth0", &["192.168.1.10"]);
        down.is_up = false;
        let candidates = vec![down, candidate(3, "eth1", &["10.0.0.5"])];
        let intf = resolve_from(candidates, None).unwrap();
        assert_eq!(intf.index, 3);
    }

    #[test]
    fn test_loopback_interface_is_skipped() {
        let mut lo = candidate(1, "lo", &["127.0.0.1"]);
        lo.is_loopback = true;
        let candidates = vec![lo, candidate(2, "eth0", &["192.168.1.10"])];
        let intf = resolve_from(candidates, None).unwrap();
        assert_eq!(intf.index, 2);
    }

    #[test]
    fn test_non_global_addresses_do_not_qualify() {
        // Link-local only, IPv6 only, loopback address on a non-loopback
        // interface: none of these make an interface viable.
        let candidates = vec![
            candidate(2, "eth0", &["169.254.1.1"]),
            candidate(3, "eth1", &["fd00::1", "fe80::1"]),
            candidate(4, "eth2", &["127.0.0.2"]),
        ];
        assert_eq!(
            resolve_from(candidates, None).unwrap_err(),
            InterfaceError::NoViableInterface
        );
    }

    #[test]
    fn test_mixed_addresses_qualify_through_the_v4_one() {
        let candidates = vec![candidate(2, "eth0", &["fe80::1", "169.254.0.9", "10.1.2.3"])];
        let intf = resolve_from(candidates, None).unwrap();
        assert_eq!(intf.index, 2);
    }

    #[test]
    fn test_is_global_unicast() {
        let global: Ipv4Addr = "8.8.8.8".parse().unwrap();
        let private: Ipv4Addr = "192.168.1.1".parse().unwrap();
        assert!(is_global_unicast(global));
        assert!(is_global_unicast(private));

        for bad in ["0.0.0.0", "127.0.0.1", "169.254.0.1", "224.0.0.1", "255.255.255.255"] {
            assert!(!is_global_unicast(bad.parse().unwrap()), "{bad}");
        }
    }
}
