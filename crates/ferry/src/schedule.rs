//! Timetable rows and per-route filtering.

use std::collections::HashSet;

use tracing::warn;

use crate::config::ScheduleColumns;
use crate::identifiers::VehicleId;
use crate::loader::table::Row;
use crate::models::types::{FerryError, Result, ScheduleEntry};

impl ScheduleEntry {
    pub fn from_row(row: &Row, columns: &ScheduleColumns) -> Result<Self> {
        let get = |name: &str| {
            row.get(name)
                .map(str::to_string)
                .ok_or_else(|| FerryError::MalformedRow {
                    row: row.line,
                    field: name.to_string(),
                    value: String::new(),
                })
        };

        Ok(Self {
            vehicle_id: VehicleId::new(get(&columns.vehicle_id)?),
            vehicle_name: get(&columns.vehicle_name)?,
            day: get(&columns.day)?,
            departure: get(&columns.departure)?,
            arrival: get(&columns.arrival)?,
        })
    }
}

/// Convert timetable rows into entries, skipping rows that lack a column
pub fn schedule_entries(rows: &[Row], columns: &ScheduleColumns) -> (Vec<ScheduleEntry>, Vec<FerryError>) {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for row in rows {
        match ScheduleEntry::from_row(row, columns) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!("skipping timetable row: {err}");
                skipped.push(err);
            }
        }
    }

    (entries, skipped)
}

/// Entries run by any of `vehicle_ids`, in timetable order.
///
/// Matching is exact on the id string.
pub fn filter_schedules<'a, I>(
    entries: &'a [ScheduleEntry],
    vehicle_ids: I,
) -> impl Iterator<Item = &'a ScheduleEntry> + 'a
where
    I: IntoIterator<Item = &'a VehicleId>,
{
    let wanted: HashSet<&'a VehicleId> = vehicle_ids.into_iter().collect();
    entries
        .iter()
        .filter(move |entry| wanted.contains(&entry.vehicle_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::table::parse_table;

    fn entries() -> Vec<ScheduleEntry> {
        let table = parse_table(
            "idbase;nombre_barco;Dia;hora_salida;hora_llegada\n\
             1;Bentago Express;Lunes;08:00;09:20\n\
             2;Volcan de Tamadaba;Lunes;09:00;11:00\n\
             1;Bentago Express;Martes;08:00;09:20\n\
             3;Benchijigua Express;Lunes;10:00;10:50\n",
            b';',
        );
        let (entries, skipped) = schedule_entries(&table.rows, &ScheduleColumns::default());
        assert!(skipped.is_empty());
        entries
    }

    #[test]
    fn test_from_row() {
        let entries = entries();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].vehicle_id, VehicleId::new("2"));
        assert_eq!(entries[1].vehicle_name, "Volcan de Tamadaba");
        assert_eq!(entries[1].day, "Lunes");
        assert_eq!(entries[1].departure, "09:00");
        assert_eq!(entries[1].arrival, "11:00");
    }

    #[test]
    fn test_missing_column_skips_row() {
        let table = parse_table("idbase;nombre_barco\n1;Bentago Express\n", b';');
        let (entries, skipped) = schedule_entries(&table.rows, &ScheduleColumns::default());
        assert!(entries.is_empty());
        assert!(matches!(&skipped[0], FerryError::MalformedRow { field, .. } if field == "Dia"));
    }

    #[test]
    fn test_filter_by_vehicle() {
        let entries = entries();
        let ids = [VehicleId::new("1")];
        let days: Vec<_> = filter_schedules(&entries, &ids).map(|e| e.day.as_str()).collect();
        assert_eq!(days, vec!["Lunes", "Martes"]);
    }

    #[test]
    fn test_filter_with_no_ids() {
        let entries = entries();
        assert_eq!(filter_schedules(&entries, &[]).count(), 0);
    }

    #[test]
    fn test_filter_with_all_ids_keeps_order() {
        let entries = entries();
        let ids = [VehicleId::new("3"), VehicleId::new("2"), VehicleId::new("1")];
        let filtered: Vec<_> = filter_schedules(&entries, &ids).cloned().collect();
        assert_eq!(filtered, entries);
    }

    #[test]
    fn test_filter_is_exact_match() {
        let entries = entries();
        let ids = [VehicleId::new("01"), VehicleId::new(" 1")];
        assert_eq!(filter_schedules(&entries, &ids).count(), 0);
    }
}
