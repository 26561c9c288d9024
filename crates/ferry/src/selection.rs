//! Two-click origin/destination selection.
//!
//! The first click on a port selects it as origin and draws a line to each
//! of its destinations. A second click on one of those destinations
//! resolves the route. Clicking anything else either starts over from the
//! new port or, on empty space, clears the selection.
//!
//! The machine only decides what should happen. It returns a list of
//! [`SelectionEffect`]s for the caller to apply to the surface and panel.

use tracing::{debug, error, info, warn};

use crate::identifiers::*;
use crate::index::RouteIndex;
use crate::spatial::projection::{DisplayPoint, Projector, LINE_LIFT};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    OriginSelected(PortName),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
    PortClicked(PortName),
    EmptySpaceClicked,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEffect {
    ClearRouteLines,
    DrawRouteLine {
        origin: PortName,
        destination: PortName,
        from: DisplayPoint,
        to: DisplayPoint,
    },
    /// The selected origin has no outgoing routes
    NoRoutes(PortName),
    ShowSchedules {
        origin: PortName,
        destination: PortName,
        vehicles: Vec<VehicleId>,
    },
    /// A listed destination had no vehicle entry
    RouteLookupFailed { route_key: RouteKey },
    HidePanel,
}

#[derive(Clone, Debug, Default)]
pub struct SelectionMachine {
    state: SelectionState,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn handle(
        &mut self,
        event: SelectionEvent,
        index: &RouteIndex,
        projector: &Projector,
    ) -> Vec<SelectionEffect> {
        let mut effects = Vec::new();

        match event {
            SelectionEvent::EmptySpaceClicked => {
                debug!("empty space clicked, clearing selection");
                effects.push(SelectionEffect::ClearRouteLines);
                effects.push(SelectionEffect::HidePanel);
                self.state = SelectionState::Idle;
            }
            SelectionEvent::PortClicked(port) => {
                let origin = match &self.state {
                    SelectionState::OriginSelected(origin)
                        if *origin != port && index.is_destination(origin, &port) =>
                    {
                        Some(origin.clone())
                    }
                    _ => None,
                };

                match origin {
                    Some(origin) => self.resolve_route(origin, port, index, &mut effects),
                    None => self.select_origin(port, index, projector, &mut effects),
                }
            }
        }

        effects
    }

    fn select_origin(
        &mut self,
        origin: PortName,
        index: &RouteIndex,
        projector: &Projector,
        effects: &mut Vec<SelectionEffect>,
    ) {
        effects.push(SelectionEffect::ClearRouteLines);
        info!(origin = %origin, "origin port selected");

        let destinations = index.destinations(&origin);
        if destinations.is_empty() {
            info!(origin = %origin, "no outgoing routes");
            effects.push(SelectionEffect::NoRoutes(origin.clone()));
        } else if let Some(origin_location) = index.coordinates(&origin) {
            let from = projector.project(origin_location).lifted(LINE_LIFT);

            for destination in destinations {
                let Some(location) = index.coordinates(destination) else {
                    warn!(destination = %destination, "destination has no coordinates, skipping line");
                    continue;
                };

                effects.push(SelectionEffect::DrawRouteLine {
                    origin: origin.clone(),
                    destination: destination.clone(),
                    from,
                    to: projector.project(location).lifted(LINE_LIFT),
                });
            }
        }

        self.state = SelectionState::OriginSelected(origin);
    }

    fn resolve_route(
        &mut self,
        origin: PortName,
        destination: PortName,
        index: &RouteIndex,
        effects: &mut Vec<SelectionEffect>,
    ) {
        let vehicles = index
            .route_key(&origin, &destination)
            .map(|key| (index.vehicles(&key).map(<[VehicleId]>::to_vec), key));

        match vehicles {
            Ok((Some(vehicles), key)) => {
                debug!(route = %key, vehicles = vehicles.len(), "route resolved");
                effects.push(SelectionEffect::ShowSchedules {
                    origin,
                    destination,
                    vehicles,
                });
            }
            Ok((None, route_key)) => {
                error!(route = %route_key, "destination listed without vehicles");
                effects.push(SelectionEffect::RouteLookupFailed { route_key });
            }
            Err(err) => {
                // Names were validated when the index was built
                error!("unroutable selection: {err}");
            }
        }

        effects.push(SelectionEffect::ClearRouteLines);
        self.state = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FleetColumns;
    use crate::loader::table::parse_table;
    use crate::spatial::projection::{MapBounds, PlaneSize};

    fn index(body: &str) -> RouteIndex {
        let text = format!("nombre_puerto_origen;nombre_puertodestino;latitud;longitud;idbase\n{body}");
        let table = parse_table(&text, b';');
        RouteIndex::build(&table.rows, &FleetColumns::default(), '|')
            .unwrap()
            .0
    }

    fn projector() -> Projector {
        Projector::new(MapBounds::default(), PlaneSize::square(10.0))
    }

    fn click(name: &str) -> SelectionEvent {
        SelectionEvent::PortClicked(PortName::new(name))
    }

    fn fleet() -> RouteIndex {
        index(
            "A;B;28.0;-15.0;V1\n\
             A;C;28.0;-15.0;V2\n\
             B;A;28.5;-16.0;V1\n\
             C;A;27.8;-17.0;V2\n",
        )
    }

    fn line_count(effects: &[SelectionEffect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, SelectionEffect::DrawRouteLine { .. }))
            .count()
    }

    fn shows_schedules(effects: &[SelectionEffect]) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, SelectionEffect::ShowSchedules { .. }))
    }

    #[test]
    fn test_first_click_draws_lines() {
        let index = fleet();
        let mut machine = SelectionMachine::new();

        let effects = machine.handle(click("A"), &index, &projector());
        assert_eq!(effects[0], SelectionEffect::ClearRouteLines);
        assert_eq!(line_count(&effects), 2);
        assert_eq!(machine.state(), &SelectionState::OriginSelected(PortName::new("A")));

        let SelectionEffect::DrawRouteLine { from, to, destination, .. } = &effects[1] else {
            panic!("expected a route line");
        };
        assert_eq!(destination.as_str(), "B");
        assert!(from.z > crate::spatial::PLANE_ELEVATION);
        assert_eq!(*to, projector().project(geo::Point::new(-16.0, 28.5)).lifted(LINE_LIFT));
    }

    #[test]
    fn test_second_click_resolves_route() {
        let index = fleet();
        let mut machine = SelectionMachine::new();
        machine.handle(click("A"), &index, &projector());

        let effects = machine.handle(click("C"), &index, &projector());
        assert_eq!(
            effects,
            vec![
                SelectionEffect::ShowSchedules {
                    origin: PortName::new("A"),
                    destination: PortName::new("C"),
                    vehicles: vec![VehicleId::new("V2")],
                },
                SelectionEffect::ClearRouteLines,
            ]
        );
        assert_eq!(machine.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_invalid_destination_becomes_new_origin() {
        let index = index(
            "A;B;28.0;-15.0;V1\n\
             C;A;27.8;-17.0;V2\n",
        );
        let mut machine = SelectionMachine::new();
        machine.handle(click("A"), &index, &projector());

        let effects = machine.handle(click("C"), &index, &projector());
        assert!(!shows_schedules(&effects));
        assert_eq!(effects[0], SelectionEffect::ClearRouteLines);
        assert_eq!(line_count(&effects), 1);
        assert_eq!(machine.state(), &SelectionState::OriginSelected(PortName::new("C")));
    }

    #[test]
    fn test_port_without_routes() {
        let index = fleet();
        let mut machine = SelectionMachine::new();

        let effects = machine.handle(click("Z"), &index, &projector());
        assert_eq!(line_count(&effects), 0);
        assert!(effects.contains(&SelectionEffect::NoRoutes(PortName::new("Z"))));
        assert_eq!(machine.state(), &SelectionState::OriginSelected(PortName::new("Z")));
    }

    #[test]
    fn test_same_port_twice_never_shows_schedules() {
        for index in [fleet(), index("A;A;28.0;-15.0;V9\nA;B;28.0;-15.0;V1\n")] {
            let mut machine = SelectionMachine::new();
            machine.handle(click("A"), &index, &projector());

            let effects = machine.handle(click("A"), &index, &projector());
            assert!(!shows_schedules(&effects));
            assert_eq!(machine.state(), &SelectionState::OriginSelected(PortName::new("A")));
        }
    }

    #[test]
    fn test_empty_space_resets() {
        let index = fleet();
        let mut machine = SelectionMachine::new();
        machine.handle(click("A"), &index, &projector());

        let effects = machine.handle(SelectionEvent::EmptySpaceClicked, &index, &projector());
        assert_eq!(
            effects,
            vec![SelectionEffect::ClearRouteLines, SelectionEffect::HidePanel]
        );
        assert_eq!(machine.state(), &SelectionState::Idle);

        // Also harmless from idle
        let effects = machine.handle(SelectionEvent::EmptySpaceClicked, &index, &projector());
        assert_eq!(effects.len(), 2);
        assert_eq!(machine.state(), &SelectionState::Idle);
    }

    #[test]
    fn test_destination_without_coordinates_is_skipped() {
        // D never appears as an origin, so it has no coordinates
        let index = index("A;B;28.0;-15.0;V1\nA;D;28.0;-15.0;V2\nB;A;28.5;-16.0;V1\n");
        let mut machine = SelectionMachine::new();

        let effects = machine.handle(click("A"), &index, &projector());
        assert_eq!(line_count(&effects), 1);

        // It can still be picked as a destination by name
        let effects = machine.handle(click("D"), &index, &projector());
        assert!(shows_schedules(&effects));
    }
}
