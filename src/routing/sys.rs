//! Windows IP Helper bindings
//!
//! The live implementation of [`IpHelperApi`] over `iphlpapi` through
//! `windows-sys`. Everything above this module works in terms of the trait,
//! so this is the only file that touches the system API.

use crate::mem::DynamicMemory;
use crate::routing::{InterfaceMetricEntry, IpForwardRow, IpHelperApi};
use std::mem;
use windows_sys::Win32::NetworkManagement::IpHelper::{
    CreateIpForwardEntry, DeleteIpForwardEntry, GetIpForwardTable, GetIpInterfaceEntry,
    SetIpForwardEntry, MIB_IPFORWARDROW, MIB_IPFORWARDTABLE, MIB_IPINTERFACE_ROW,
};

// Records cross the boundary by pointer reinterpretation, so the local layout
// must match the system's exactly.
const _: () = {
    assert!(mem::size_of::<IpForwardRow>() == mem::size_of::<MIB_IPFORWARDROW>());
    assert!(mem::align_of::<IpForwardRow>() == mem::align_of::<MIB_IPFORWARDROW>());
};

/// Live IP Helper subsystem.
#[derive(Default)]
pub struct SystemIpHelper;

impl SystemIpHelper {
    pub fn new() -> Self {
        Self
    }
}

impl IpHelperApi for SystemIpHelper {
    fn get_ip_interface_entry(&self, entry: &mut InterfaceMetricEntry) -> u32 {
        let mut row: MIB_IPINTERFACE_ROW = unsafe { mem::zeroed() };
        row.Family = entry.family;
        row.InterfaceIndex = entry.if_index;
        let status = unsafe { GetIpInterfaceEntry(&mut row) };
        entry.metric = row.Metric;
        status
    }

    fn get_ip_forward_table(&self, buf: &mut DynamicMemory, size: &mut u32, sorted: bool) -> u32 {
        // The buffer outlives the call and is never relocated while the
        // system writes into it.
        unsafe {
            GetIpForwardTable(
                buf.as_mut_ptr() as *mut MIB_IPFORWARDTABLE,
                size,
                sorted as i32,
            )
        }
    }

    fn create_ip_forward_entry(&self, route: &IpForwardRow) -> u32 {
        unsafe { CreateIpForwardEntry(route as *const IpForwardRow as *const MIB_IPFORWARDROW) }
    }

    fn set_ip_forward_entry(&self, route: &IpForwardRow) -> u32 {
        unsafe { SetIpForwardEntry(route as *const IpForwardRow as *const MIB_IPFORWARDROW) }
    }

    fn delete_ip_forward_entry(&self, route: &IpForwardRow) -> u32 {
        unsafe { DeleteIpForwardEntry(route as *const IpForwardRow as *const MIB_IPFORWARDROW) }
    }
}
