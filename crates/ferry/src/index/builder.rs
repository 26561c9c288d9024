//! In-memory route index built from the fleet table.
//!
//! Each fleet row names an origin port with its coordinates, a destination
//! port and a vehicle serving the pair. The index groups those rows into
//! three lookups: port coordinates, destinations per origin and vehicles
//! per directed route.

use std::collections::HashMap;

use geo::Point;
use tracing::{debug, info, warn};

use crate::config::FleetColumns;
use crate::identifiers::*;
use crate::index::ordered::OrderedSet;
use crate::loader::table::Row;
use crate::models::types::{FerryError, Result};

/// Rows the builder dropped, with the reason for each
#[derive(Debug, Default)]
pub struct BuildReport {
    pub rows_read: usize,
    pub rows_indexed: usize,
    pub skipped: Vec<FerryError>,
}

/// Read-only lookups over ports and directed routes
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct RouteIndex {
    separator: char,
    ports: OrderedSet<PortName>,
    port_coordinates: HashMap<PortName, Point>,
    routes_by_origin: HashMap<PortName, OrderedSet<PortName>>,
    vehicles_by_route: HashMap<RouteKey, OrderedSet<VehicleId>>,
}

struct FleetRecord {
    origin: PortName,
    destination: PortName,
    location: Point,
    vehicle_id: VehicleId,
}

fn field<'r>(row: &'r Row, name: &str) -> Result<&'r str> {
    row.get(name).ok_or_else(|| FerryError::MalformedRow {
        row: row.line,
        field: name.to_string(),
        value: String::new(),
    })
}

fn coordinate(row: &Row, name: &str) -> Result<f64> {
    let raw = field(row, name)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FerryError::MalformedRow {
            row: row.line,
            field: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

impl RouteIndex {
    pub fn empty(separator: char) -> Self {
        Self {
            separator,
            ports: OrderedSet::new(),
            port_coordinates: HashMap::new(),
            routes_by_origin: HashMap::new(),
            vehicles_by_route: HashMap::new(),
        }
    }

    /// Build the index from fleet rows.
    ///
    /// Rows with unparseable or non-finite coordinates or missing columns
    /// are skipped and listed in the report. A port name containing `separator` aborts the
    /// build with [`FerryError::AmbiguousKey`].
    pub fn build(rows: &[Row], columns: &FleetColumns, separator: char) -> Result<(Self, BuildReport)> {
        let mut index = Self::empty(separator);
        let mut report = BuildReport {
            rows_read: rows.len(),
            ..Default::default()
        };

        for row in rows {
            match index.parse_row(row, columns) {
                Ok(record) => {
                    index.insert(record)?;
                    report.rows_indexed += 1;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!("skipping fleet row: {err}");
                    report.skipped.push(err);
                }
            }
        }

        info!(
            ports = index.ports.len(),
            routes = index.vehicles_by_route.len(),
            skipped = report.skipped.len(),
            "built route index"
        );
        debug!(
            "route keys: {:?}",
            index.vehicles_by_route.keys().map(RouteKey::as_str).collect::<Vec<_>>()
        );

        Ok((index, report))
    }

    fn parse_row(&self, row: &Row, columns: &FleetColumns) -> Result<FleetRecord> {
        let origin = PortName::clean(field(row, &columns.origin)?);
        let destination = PortName::clean(field(row, &columns.destination)?);

        // Validate names before coordinates so a bad key is never masked
        // by a skippable row error.
        self.route_key(&origin, &destination)?;

        let latitude = coordinate(row, &columns.latitude)?;
        let longitude = coordinate(row, &columns.longitude)?;
        let vehicle_id = VehicleId::new(field(row, &columns.vehicle_id)?);

        Ok(FleetRecord {
            origin,
            destination,
            location: Point::new(longitude, latitude),
            vehicle_id,
        })
    }

    fn insert(&mut self, record: FleetRecord) -> Result<()> {
        let key = self.route_key(&record.origin, &record.destination)?;

        // First occurrence wins for coordinates
        if self.ports.insert(record.origin.clone()) {
            self.port_coordinates
                .insert(record.origin.clone(), record.location);
        }

        self.routes_by_origin
            .entry(record.origin)
            .or_default()
            .insert(record.destination);

        self.vehicles_by_route
            .entry(key)
            .or_default()
            .insert(record.vehicle_id);

        Ok(())
    }

    // ---- Lookups ----

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn route_key(&self, origin: &PortName, destination: &PortName) -> Result<RouteKey> {
        RouteKey::for_ports(origin, destination, self.separator)
    }

    pub fn coordinates(&self, port: &PortName) -> Option<Point> {
        self.port_coordinates.get(port).copied()
    }

    /// Destinations reachable from `origin`, in first-seen order
    pub fn destinations(&self, origin: &PortName) -> &[PortName] {
        self.routes_by_origin
            .get(origin)
            .map(OrderedSet::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_destination(&self, origin: &PortName, destination: &PortName) -> bool {
        self.routes_by_origin
            .get(origin)
            .is_some_and(|set| set.contains(destination))
    }

    /// Vehicles serving a route, in first-seen order
    pub fn vehicles(&self, key: &RouteKey) -> Option<&[VehicleId]> {
        self.vehicles_by_route.get(key).map(OrderedSet::as_slice)
    }

    // ---- Collections ----

    /// Ports with known coordinates, in first-seen order
    pub fn ports(&self) -> impl Iterator<Item = (&PortName, Point)> {
        self.ports
            .iter()
            .filter_map(|name| self.coordinates(name).map(|p| (name, p)))
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    pub fn route_count(&self) -> usize {
        self.vehicles_by_route.len()
    }

    #[cfg(test)]
    pub(crate) fn drop_vehicles(&mut self, key: &RouteKey) -> bool {
        self.vehicles_by_route.remove(key).is_some()
    }
}
