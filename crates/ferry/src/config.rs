//! Map configuration.
//!
//! Defaults describe the Canary Islands fleet export: `;`-separated
//! tables with Spanish column names and a map texture covering the
//! archipelago.

use crate::spatial::projection::{MapBounds, PlaneSize};

/// Default height of the map plane in display units
pub const DEFAULT_PLANE_SCALE: f64 = 10.0;

/// Radius of a port marker in display units
pub const PORT_MARKER_RADIUS: f64 = 0.2;

/// Column names of the fleet (routes) table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetColumns {
    pub origin: String,
    pub destination: String,
    pub latitude: String,
    pub longitude: String,
    pub vehicle_id: String,
}

impl Default for FleetColumns {
    fn default() -> Self {
        Self {
            origin: "nombre_puerto_origen".into(),
            destination: "nombre_puertodestino".into(),
            latitude: "latitud".into(),
            longitude: "longitud".into(),
            vehicle_id: "idbase".into(),
        }
    }
}

/// Column names of the timetable table
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleColumns {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub day: String,
    pub departure: String,
    pub arrival: String,
}

impl Default for ScheduleColumns {
    fn default() -> Self {
        Self {
            vehicle_id: "idbase".into(),
            vehicle_name: "nombre_barco".into(),
            day: "Dia".into(),
            departure: "hora_salida".into(),
            arrival: "hora_llegada".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapConfig {
    pub bounds: MapBounds,
    pub plane: PlaneSize,
    /// Field delimiter of both tables
    pub delimiter: u8,
    /// Joins origin and destination into a route key
    pub key_separator: char,
    /// Pointer distance, in display units, that still counts as a port hit
    pub pick_radius: f64,
    pub fleet_columns: FleetColumns,
    pub schedule_columns: ScheduleColumns,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            bounds: MapBounds::default(),
            plane: PlaneSize::square(DEFAULT_PLANE_SCALE),
            delimiter: b';',
            key_separator: '|',
            pick_radius: PORT_MARKER_RADIUS,
            fleet_columns: FleetColumns::default(),
            schedule_columns: ScheduleColumns::default(),
        }
    }
}
