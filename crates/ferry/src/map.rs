//! The ferry map: loaded data plus the current selection.
//!
//! [`FerryMap`] owns everything built at startup and the one piece of
//! mutable state, the selection. Pointer events are dispatched through it
//! and turned into calls on a [`RenderSurface`] and a [`DisplayPanel`].

use tracing::{debug, error, info};

use crate::config::MapConfig;
use crate::identifiers::*;
use crate::index::{BuildReport, RouteIndex};
use crate::loader::fetch::DataFetcher;
use crate::loader::table::{load_table, Table};
use crate::models::traits::{DisplayPanel, PointerEvent, RenderSurface};
use crate::models::types::{FerryError, Result, RouteInfo, ScheduleEntry};
use crate::schedule::{filter_schedules, schedule_entries};
use crate::selection::{SelectionEffect, SelectionEvent, SelectionMachine, SelectionState};
use crate::spatial::picker::PortPicker;
use crate::spatial::projection::{Projector, MARKER_ELEVATION};

pub struct FerryMap {
    index: RouteIndex,
    report: BuildReport,
    schedules: Vec<ScheduleEntry>,
    projector: Projector,
    picker: PortPicker,
    selection: SelectionMachine,
}

impl FerryMap {
    /// Fetch both tables and build the map.
    ///
    /// The map is only returned once parsing and indexing are complete, so
    /// no pointer event can see a partially built index.
    pub async fn load<F>(
        fetcher: &F,
        fleet_source: &str,
        schedule_source: &str,
        config: &MapConfig,
    ) -> Result<Self>
    where
        F: DataFetcher + ?Sized,
    {
        let fleet = load_table(fetcher, fleet_source, config.delimiter).await?;
        info!(source = fleet_source, rows = fleet.len(), skipped = fleet.skipped_lines.len(), "loaded fleet table");

        let schedule = load_table(fetcher, schedule_source, config.delimiter).await?;
        info!(source = schedule_source, rows = schedule.len(), skipped = schedule.skipped_lines.len(), "loaded timetable");

        Self::from_tables(&fleet, &schedule, config)
    }

    pub fn from_tables(fleet: &Table, schedule: &Table, config: &MapConfig) -> Result<Self> {
        let (index, report) = RouteIndex::build(&fleet.rows, &config.fleet_columns, config.key_separator)?;

        let (schedules, skipped) = schedule_entries(&schedule.rows, &config.schedule_columns);
        if !skipped.is_empty() {
            info!(skipped = skipped.len(), "timetable rows without required columns");
        }

        let projector = Projector::new(config.bounds, config.plane);
        let picker = PortPicker::new(
            index
                .ports()
                .map(|(name, location)| (name.clone(), projector.project(location))),
            config.pick_radius,
        );

        Ok(Self {
            index,
            report,
            schedules,
            projector,
            picker,
            selection: SelectionMachine::new(),
        })
    }

    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn schedules(&self) -> &[ScheduleEntry] {
        &self.schedules
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Put a marker for every port with known coordinates
    pub fn place_ports(&self, surface: &mut dyn RenderSurface) {
        for (name, location) in self.index.ports() {
            let at = self.projector.project(location).at_height(MARKER_ELEVATION);
            surface.place_port(name, at);
        }
    }

    /// Assemble the panel payload for a resolved route
    pub fn route_info(&self, origin: PortName, destination: PortName, vehicle_ids: Vec<VehicleId>) -> RouteInfo {
        let schedules = filter_schedules(&self.schedules, &vehicle_ids)
            .cloned()
            .collect();

        RouteInfo {
            origin,
            destination,
            vehicle_ids,
            schedules,
        }
    }

    /// Turn a raw pointer event into a selection event.
    ///
    /// A hit name reported by the surface takes precedence. Without one the
    /// pointer position is matched against the port markers.
    pub fn resolve_pointer(&self, event: &PointerEvent) -> SelectionEvent {
        if let Some(hit) = &event.hit {
            return SelectionEvent::PortClicked(PortName::clean(hit));
        }

        let point = self.projector.ndc_to_display(event.ndc);
        match self.picker.pick(point) {
            Some(port) => SelectionEvent::PortClicked(port.clone()),
            None => SelectionEvent::EmptySpaceClicked,
        }
    }

    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        surface: &mut dyn RenderSurface,
        panel: &mut dyn DisplayPanel,
    ) {
        let event = self.resolve_pointer(event);
        self.dispatch(event, surface, panel);
    }

    /// Run one selection event and apply its effects
    pub fn dispatch(
        &mut self,
        event: SelectionEvent,
        surface: &mut dyn RenderSurface,
        panel: &mut dyn DisplayPanel,
    ) {
        debug!(?event, "dispatching selection event");
        let effects = self.selection.handle(event, &self.index, &self.projector);

        for effect in effects {
            match effect {
                SelectionEffect::ClearRouteLines => surface.clear_route_lines(),
                SelectionEffect::DrawRouteLine {
                    origin,
                    destination,
                    from,
                    to,
                } => surface.draw_route_line(&origin, &destination, from, to),
                SelectionEffect::NoRoutes(origin) => {
                    panel.show_notice(&format!("No routes depart from {origin}."));
                }
                SelectionEffect::ShowSchedules {
                    origin,
                    destination,
                    vehicles,
                } => {
                    let info = self.route_info(origin, destination, vehicles);
                    info!(
                        origin = %info.origin,
                        destination = %info.destination,
                        schedules = info.schedules.len(),
                        "showing route"
                    );
                    panel.show_route_info(&info);
                }
                SelectionEffect::RouteLookupFailed { route_key } => {
                    let err = FerryError::RouteLookupInconsistency { route_key };
                    error!("{err}");
                    panel.show_error(&err);
                }
                SelectionEffect::HidePanel => panel.hide(),
            }
        }
    }
}
