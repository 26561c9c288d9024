//! Core data types for ferry routes and schedules.

use crate::identifiers::*;

// ============================================================================
// Data Structures
// ============================================================================

/// A single row of the ship timetable.
///
/// Values are kept exactly as they appear in the table (trimmed), so days
/// and times are free-form strings such as `"Lunes"` or `"08:00"`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleEntry {
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub day: String,
    pub departure: String,
    pub arrival: String,
}

/// Payload handed to the display panel once a route has been picked
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteInfo {
    pub origin: PortName,
    pub destination: PortName,
    pub vehicle_ids: Vec<VehicleId>,
    pub schedules: Vec<ScheduleEntry>,
}

impl RouteInfo {
    /// True when no timetable row matched any of the route's vehicles
    pub fn has_schedules(&self) -> bool {
        !self.schedules.is_empty()
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FerryError {
    #[error("Failed to load {resource}: {reason}")]
    Load { resource: String, reason: String },

    #[error("Malformed row {row}: field `{field}` has unusable value {value:?}")]
    MalformedRow {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Port name {port:?} contains the route key separator {separator:?}")]
    AmbiguousKey { port: PortName, separator: char },

    #[error("Route {route_key} is listed as a destination but has no vehicles")]
    RouteLookupInconsistency { route_key: RouteKey },
}

impl FerryError {
    /// Whether the error should abort startup rather than skip a row or
    /// reset the selection.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::AmbiguousKey { .. })
    }
}

pub type Result<T> = std::result::Result<T, FerryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = FerryError::MalformedRow {
            row: 7,
            field: "latitud".into(),
            value: "28,1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed row 7: field `latitud` has unusable value \"28,1\""
        );

        let err = FerryError::RouteLookupInconsistency {
            route_key: RouteKey::new("Agaete|Santa Cruz"),
        };
        assert!(err.to_string().contains("Agaete|Santa Cruz"));
    }

    #[test]
    fn test_fatality() {
        let load = FerryError::Load {
            resource: "flota.csv".into(),
            reason: "not found".into(),
        };
        assert!(load.is_fatal());

        let lookup = FerryError::RouteLookupInconsistency {
            route_key: RouteKey::new("A|B"),
        };
        assert!(!lookup.is_fatal());
    }
}
