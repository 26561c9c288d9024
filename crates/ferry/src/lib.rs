//! # ferry-routes
//!
//! Interactive ferry route map core, independent of any rendering engine.
//!
//! ## Features
//!
//! - **Tabular loading**: `;`-separated fleet and timetable tables from disk or HTTP
//! - **Route index**: ports, destinations per origin and vehicles per directed route
//! - **Projection**: longitude/latitude onto a map plane centred at the origin
//! - **Two-click selection**: origin then destination, resolved to a timetable
//! - **Pluggable display**: implement [`RenderSurface`] and [`DisplayPanel`]
//!
//! ## Example
//!
//! ```
//! use ferry_routes::prelude::*;
//!
//! let fleet = parse_table(
//!     "nombre_puerto_origen;nombre_puertodestino;latitud;longitud;idbase\r\n\
//!      Agaete;Santa Cruz de Tenerife;28.10;-15.71;1\r\n",
//!     b';',
//! );
//! let schedule = parse_table(
//!     "idbase;nombre_barco;Dia;hora_salida;hora_llegada\r\n\
//!      1;Bentago Express;Lunes;08:00;09:20\r\n",
//!     b';',
//! );
//!
//! let map = FerryMap::from_tables(&fleet, &schedule, &MapConfig::default()).unwrap();
//!
//! let agaete = PortName::new("Agaete");
//! let santa_cruz = PortName::new("Santa Cruz de Tenerife");
//! assert_eq!(map.index().destinations(&agaete), &[santa_cruz.clone()]);
//!
//! let vehicles = map.index().vehicles(&map.index().route_key(&agaete, &santa_cruz).unwrap()).unwrap();
//! let info = map.route_info(agaete, santa_cruz, vehicles.to_vec());
//! assert_eq!(info.schedules[0].vehicle_name, "Bentago Express");
//! ```

pub mod config;
pub mod identifiers;
pub mod index;
pub mod loader;
pub mod map;
pub mod models;
pub mod schedule;
pub mod selection;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::{FleetColumns, MapConfig, ScheduleColumns};
    pub use crate::identifiers::*;
    pub use crate::index::{BuildReport, RouteIndex};
    pub use crate::loader::{load_table, parse_table, DataFetcher, FileFetcher, Row, SourceFetcher, Table};
    pub use crate::map::FerryMap;
    pub use crate::models::{traits::*, types::*};
    pub use crate::schedule::filter_schedules;
    pub use crate::selection::{SelectionEffect, SelectionEvent, SelectionMachine, SelectionState};
    pub use crate::spatial::{DisplayPoint, MapBounds, PlaneSize, PortPicker, Projector};
}

pub use prelude::*;
