//! Demonstration orchestration
//!
//! Resolve the gateway interface, show the table, add a demonstration route,
//! show the table, delete the route and show the table once more.

use crate::addr::{inet_aton, inet_ntoa, ByteOrder};
use crate::error::{AddrError, AppError};
use crate::network;
use crate::routing::{
    InterfaceMetricEntry, IpForwardRow, IpHelperApi, RouteProto, RouteTable, RouteType,
};
use std::net::Ipv4Addr;
use tracing::{error, info, warn};

const DEMO_DEST: &str = "192.168.1.0";
const DEMO_MASK: &str = "255.255.255.0";
const DEMO_NEXT_HOP: &str = "172.22.101.121";

/// Run the demonstration sequence against the given native bindings.
///
/// Interface resolution and the metric query are fatal when they fail; the
/// add and delete mutations only log a warning, since a failed mutation is a
/// reported outcome rather than a reason to stop.
pub fn run<A: IpHelperApi>(api: A, gateway: Option<Ipv4Addr>) -> Result<(), AppError> {
    let intf = network::resolve(gateway)?;

    let mut table = RouteTable::new(api);
    let metric = table.interface_metric(intf.index)?;

    print_routes(&table);

    let route = demo_route(&metric)?;

    match table.add_route(&route) {
        Ok(()) => {
            info!("Added route");
            print_routes(&table);

            match table.delete_route(&route) {
                Ok(()) => {
                    info!("Deleted route");
                    print_routes(&table);
                }
                Err(err) => warn!(%err, "Error deleting route"),
            }
        }
        Err(err) => warn!(%err, "Error adding route"),
    }

    table.close();
    Ok(())
}

/// Build the demonstration route on the resolved interface.
///
/// A direct route, since the next hop is the interface's own address; the
/// route metric is 0, plus the interface metric.
fn demo_route(metric: &InterfaceMetricEntry) -> Result<IpForwardRow, AddrError> {
    Ok(IpForwardRow {
        dest: inet_aton(DEMO_DEST, ByteOrder::Little)?,
        mask: inet_aton(DEMO_MASK, ByteOrder::Little)?,
        next_hop: inet_aton(DEMO_NEXT_HOP, ByteOrder::Little)?,
        if_index: metric.if_index,
        route_type: RouteType::Direct.into(),
        proto: RouteProto::Netmgmt.into(),
        metric1: metric.metric,
        ..Default::default()
    })
}

fn print_routes<A: IpHelperApi>(table: &RouteTable<A>) {
    let routes = match table.routes() {
        Ok(routes) => routes,
        Err(err) => {
            error!(%err, "Error getting routes");
            return;
        }
    };
    for route in &routes {
        info!(
            dest = %inet_ntoa(route.dest, ByteOrder::Little),
            mask = %inet_ntoa(route.mask, ByteOrder::Little),
            gate = %inet_ntoa(route.next_hop, ByteOrder::Little),
            metric = route.metric1,
            if_index = route.if_index,
            route_type = RouteType::from_raw(route.route_type).map_or("unknown", |t| t.label()),
            proto = RouteProto::from_raw(route.proto).map_or("unknown", |p| p.label()),
            "Route"
        );
    }
}
