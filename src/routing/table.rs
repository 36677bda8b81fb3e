//! Route table gateway
//!
//! Owns the native routing subsystem handle and exposes the forwarding-table
//! operations: metric query, listing with the growable-buffer protocol, and
//! the add/update/delete mutations. Listing reinterprets the returned byte
//! region in place as a typed record sequence; all of that aliasing sits
//! behind [`RouteList`].

use crate::error::RouteError;
use crate::mem::DynamicMemory;
use crate::routing::{InterfaceMetricEntry, IpForwardRow, AF_INET};
use std::fmt;
use std::mem;
use std::ops::Deref;
use std::slice;
use tracing::{debug, warn};

/// Default listing capacity in records before the first native call.
pub const DEFAULT_ROUTE_CAPACITY: usize = 256;

/// Maximum buffer-growth retries before listing gives up.
pub const MAX_RESIZE_RETRIES: usize = 5;

const NO_ERROR: u32 = 0;
const ERROR_INSUFFICIENT_BUFFER: u32 = 122;

/// The IP Helper calls consumed by the route table gateway.
///
/// Implementations return the raw status code of the underlying call; zero is
/// success. `get_ip_forward_table` writes the table into `buf` and must leave
/// the required byte count in `size` when it reports an insufficient buffer
/// (status 122). It must never write past the buffer's end.
pub trait IpHelperApi {
    fn get_ip_interface_entry(&self, entry: &mut InterfaceMetricEntry) -> u32;
    fn get_ip_forward_table(&self, buf: &mut DynamicMemory, size: &mut u32, sorted: bool) -> u32;
    fn create_ip_forward_entry(&self, route: &IpForwardRow) -> u32;
    fn set_ip_forward_entry(&self, route: &IpForwardRow) -> u32;
    fn delete_ip_forward_entry(&self, route: &IpForwardRow) -> u32;
}

/// Gateway to the native routing subsystem.
///
/// Holds the subsystem handle from construction until [`close`] releases it.
/// Operations invoked after close fail with [`RouteError::UseAfterClose`].
/// A single instance is not safe for concurrent use; callers serialize
/// externally if they share one.
///
/// [`close`]: RouteTable::close
pub struct RouteTable<A: IpHelperApi> {
    api: Option<A>,
}

impl<A: IpHelperApi> RouteTable<A> {
    pub fn new(api: A) -> Self {
        Self { api: Some(api) }
    }

    fn api(&self) -> Result<&A, RouteError> {
        self.api.as_ref().ok_or(RouteError::UseAfterClose)
    }

    /// Query the forwarding metric of one interface, address family fixed to
    /// IPv4.
    pub fn interface_metric(&self, if_index: u32) -> Result<InterfaceMetricEntry, RouteError> {
        let mut entry = InterfaceMetricEntry {
            family: AF_INET,
            if_index,
            metric: 0,
        };
        let status = self.api()?.get_ip_interface_entry(&mut entry);
        debug!(status, ?entry, "GetIpInterfaceEntry returned");
        check(status)?;
        Ok(entry)
    }

    /// List the forwarding table.
    ///
    /// The true table size is only known to the native subsystem, so listing
    /// negotiates it: a too-small buffer makes the call fail cleanly with
    /// status 122 and report the required size, which becomes the next
    /// attempt's allocation. The loop is bounded; a subsystem that never
    /// reports a satisfiable size surfaces as
    /// [`RouteError::BufferNegotiationExhausted`].
    pub fn routes(&self) -> Result<RouteList, RouteError> {
        let api = self.api()?;

        let mut required = (DEFAULT_ROUTE_CAPACITY * mem::size_of::<IpForwardRow>()) as u32;
        let mut buf = DynamicMemory::new(required as usize);
        let mut status = api.get_ip_forward_table(&mut buf, &mut required, false);

        let mut attempts = 1;
        while status == ERROR_INSUFFICIENT_BUFFER {
            if attempts > MAX_RESIZE_RETRIES {
                return Err(RouteError::BufferNegotiationExhausted { attempts, required });
            }
            attempts += 1;
            warn!(
                cur_bufsize = buf.len(),
                req_bufsize = required,
                "Insufficient buffer"
            );

            // Never resize in place while a native call may alias the region;
            // a fresh allocation replaces the old one.
            buf = DynamicMemory::new(required as usize);
            status = api.get_ip_forward_table(&mut buf, &mut required, false);
        }

        if status != NO_ERROR {
            return Err(RouteError::NativeCallFailed(status));
        }
        RouteList::new(buf)
    }

    /// Add a forwarding entry.
    ///
    /// An already-existing route is reported as whatever status the subsystem
    /// returns; it is not special-cased here.
    pub fn add_route(&self, route: &IpForwardRow) -> Result<(), RouteError> {
        let status = self.api()?.create_ip_forward_entry(route);
        debug!(status, "CreateIpForwardEntry returned");
        check(status)
    }

    /// Replace a forwarding entry.
    pub fn update_route(&self, route: &IpForwardRow) -> Result<(), RouteError> {
        let status = self.api()?.set_ip_forward_entry(route);
        debug!(status, "SetIpForwardEntry returned");
        check(status)
    }

    /// Delete the forwarding entry matching the record's destination, mask,
    /// next hop and interface.
    pub fn delete_route(&self, route: &IpForwardRow) -> Result<(), RouteError> {
        let status = self.api()?.delete_ip_forward_entry(route);
        debug!(status, "DeleteIpForwardEntry returned");
        check(status)
    }

    /// Release the native subsystem handle. Further operations fail with
    /// [`RouteError::UseAfterClose`].
    pub fn close(&mut self) {
        self.api = None;
    }
}

fn check(status: u32) -> Result<(), RouteError> {
    if status == NO_ERROR {
        Ok(())
    } else {
        Err(RouteError::NativeCallFailed(status))
    }
}

/// Forwarding table snapshot viewed in place.
///
/// Owns the buffer the native call filled and exposes its records as a
/// `&[IpForwardRow]` without copying: the first four bytes carry the record
/// count, the records follow contiguously at offset 4.
pub struct RouteList {
    buf: DynamicMemory,
    count: usize,
}

impl RouteList {
    /// Validate the declared count against the buffer and take ownership.
    ///
    /// This is the single construction point for the aliased view; a count
    /// that does not fit the buffer is rejected here so the accessors below
    /// can never read out of bounds.
    fn new(buf: DynamicMemory) -> Result<Self, RouteError> {
        let bytes = buf.bytes();
        if bytes.len() < 4 {
            return Err(RouteError::MalformedTable {
                count: 0,
                len: bytes.len(),
            });
        }
        let count = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let needed = 4 + count as usize * mem::size_of::<IpForwardRow>();
        if needed > bytes.len() {
            return Err(RouteError::MalformedTable {
                count,
                len: bytes.len(),
            });
        }
        Ok(Self {
            buf,
            count: count as usize,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[IpForwardRow] {
        // Bounds were validated at construction; the region is 4-byte aligned
        // and rows start at offset 4, so the row pointer is aligned too.
        unsafe {
            slice::from_raw_parts(
                self.buf.as_ptr().add(4) as *const IpForwardRow,
                self.count,
            )
        }
    }

    pub fn iter(&self) -> slice::Iter<'_, IpForwardRow> {
        self.as_slice().iter()
    }
}

impl fmt::Debug for RouteList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Deref for RouteList {
    type Target = [IpForwardRow];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a RouteList {
    type Item = &'a IpForwardRow;
    type IntoIter = slice::Iter<'a, IpForwardRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
