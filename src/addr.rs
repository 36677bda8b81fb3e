//! IPv4 address codec
//!
//! Converts between 32-bit integers and dotted-decimal text with explicit
//! byte-order selection, mirroring the classic `inet_ntoa`/`inet_aton` pair.

use crate::error::AddrError;
use std::net::Ipv4Addr;

/// Byte order of a packed IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Render a packed IPv4 address as dotted-decimal text.
pub fn inet_ntoa(addr: u32, order: ByteOrder) -> String {
    let octets: [u8; 4] = match order {
        ByteOrder::Big => addr.to_be_bytes(),
        ByteOrder::Little => addr.to_le_bytes(),
    };
    Ipv4Addr::from(octets).to_string()
}

/// Parse dotted-decimal text into a packed IPv4 address.
pub fn inet_aton(text: &str, order: ByteOrder) -> Result<u32, AddrError> {
    let ip: Ipv4Addr = text
        .parse()
        .map_err(|_| AddrError::InvalidAddress(text.to_string()))?;
    let octets = ip.octets();
    Ok(match order {
        ByteOrder::Big => u32::from_be_bytes(octets),
        ByteOrder::Little => u32::from_le_bytes(octets),
    })
}
