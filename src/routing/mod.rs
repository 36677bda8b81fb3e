//! Routing table management module
//!
//! Data model for IP Helper forwarding entries and the table gateway that
//! issues the native calls

pub mod table;

#[cfg(windows)]
pub mod sys;

pub use table::{IpHelperApi, RouteList, RouteTable};

/// IPv4 address family (`AF_INET`)
pub const AF_INET: u16 = 2;

/// One forwarding-table entry, laid out exactly like `MIB_IPFORWARDROW`.
///
/// Records obtained from the table are read in place by pointer
/// reinterpretation, so field order and width must match the native struct
/// byte-for-byte. The fields this crate does not interpret (`policy`, `age`,
/// `next_hop_as`, `metric2`..`metric5`) round-trip unchanged into add and
/// update calls.
///
/// `dest`, `mask` and `next_hop` hold network-ordered bytes viewed as a
/// native-endian `u32`, the way the native table stores them; one record never
/// mixes byte orders.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IpForwardRow {
    pub dest: u32,
    pub mask: u32,
    pub policy: u32,
    pub next_hop: u32,
    pub if_index: u32,
    pub route_type: u32,
    pub proto: u32,
    pub age: u32,
    pub next_hop_as: u32,
    pub metric1: u32,
    pub metric2: u32,
    pub metric3: u32,
    pub metric4: u32,
    pub metric5: u32,
}

// MIB_IPFORWARDROW is fourteen DWORDs.
const _: () = assert!(std::mem::size_of::<IpForwardRow>() == 56);

/// Route type field values (`MIB_IPROUTE_TYPE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteType {
    Other = 1,
    Invalid = 2,
    Direct = 3,
    Indirect = 4,
}

impl RouteType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Other),
            2 => Some(Self::Invalid),
            3 => Some(Self::Direct),
            4 => Some(Self::Indirect),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn label(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Invalid => "invalid",
            Self::Direct => "direct",
            Self::Indirect => "indirect",
        }
    }
}

impl From<RouteType> for u32 {
    fn from(value: RouteType) -> Self {
        value as u32
    }
}

/// Route protocol/origin field values (`MIB_IPPROTO`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteProto {
    Other = 1,
    Local = 2,
    Netmgmt = 3,
}

impl RouteProto {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Other),
            2 => Some(Self::Local),
            3 => Some(Self::Netmgmt),
            _ => None,
        }
    }

    /// Short name for logging.
    pub fn label(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Local => "local",
            Self::Netmgmt => "netmgmt",
        }
    }
}

impl From<RouteProto> for u32 {
    fn from(value: RouteProto) -> Self {
        value as u32
    }
}

/// Per-interface forwarding cost and identity.
///
/// The metric is a site-specific cost added on top of any route's own metric.
/// Entries are queried on demand and never cached, so a stale metric cannot
/// leak into a freshly built route.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceMetricEntry {
    pub family: u16,
    pub if_index: u32,
    pub metric: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_raw_round_trip() {
        for ty in [
            RouteType::Other,
            RouteType::Invalid,
            RouteType::Direct,
            RouteType::Indirect,
        ] {
            assert_eq!(RouteType::from_raw(u32::from(ty)), Some(ty));
        }
        assert_eq!(RouteType::from_raw(0), None);
        assert_eq!(RouteType::from_raw(5), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(RouteType::Direct.label(), "direct");
        assert_eq!(RouteType::Indirect.label(), "indirect");
        assert_eq!(RouteProto::Netmgmt.label(), "netmgmt");
        assert_eq!(RouteProto::Local.label(), "local");
    }

    #[test]
    fn test_route_proto_raw_round_trip() {
        for proto in [RouteProto::Other, RouteProto::Local, RouteProto::Netmgmt] {
            assert_eq!(RouteProto::from_raw(u32::from(proto)), Some(proto));
        }
        assert_eq!(RouteProto::from_raw(4), None);
    }
}
