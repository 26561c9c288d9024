//! Text rendering of the map surface and route panel.

use std::io::Write;

use ferry_routes::{DisplayPanel, DisplayPoint, FerryError, PortName, RenderSurface, RouteInfo};
use serde_json::json;

/// Plain text, or one JSON object per line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct TerminalSurface<W> {
    out: W,
    format: OutputFormat,
    lines_drawn: usize,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            lines_drawn: 0,
        }
    }

    pub fn lines_drawn(&self) -> usize {
        self.lines_drawn
    }

    fn emit(&mut self, text: String, value: serde_json::Value) {
        let result = match self.format {
            OutputFormat::Text => writeln!(self.out, "{text}"),
            OutputFormat::Json => writeln!(self.out, "{value}"),
        };
        if let Err(e) = result {
            tracing::error!("failed to write surface output: {e}");
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn place_port(&mut self, name: &PortName, at: DisplayPoint) {
        self.emit(
            format!("port   {:<32} ({:>7.3}, {:>7.3})", name.as_str(), at.x, at.y),
            json!({ "event": "place_port", "port": name, "at": at }),
        );
    }

    fn draw_route_line(&mut self, origin: &PortName, destination: &PortName, from: DisplayPoint, to: DisplayPoint) {
        self.lines_drawn += 1;
        self.emit(
            format!("line   {origin} -> {destination}"),
            json!({ "event": "draw_route_line", "origin": origin, "destination": destination, "from": from, "to": to }),
        );
    }

    fn clear_route_lines(&mut self) {
        if self.lines_drawn == 0 {
            return;
        }
        let cleared = self.lines_drawn;
        self.lines_drawn = 0;
        self.emit(
            format!("clear  {cleared} route line(s)"),
            json!({ "event": "clear_route_lines", "cleared": cleared }),
        );
    }
}

pub struct TerminalPanel<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalPanel<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    fn render_text(info: &RouteInfo) -> String {
        let mut text = format!("Route: {} -> {}\n", info.origin, info.destination);

        if !info.has_schedules() {
            text.push_str("  No schedules found for this route.\n");
            return text;
        }

        let vehicles: Vec<_> = info.vehicle_ids.iter().map(|v| v.as_str()).collect();
        text.push_str(&format!("  Vessels: {}\n", vehicles.join(", ")));
        for entry in &info.schedules {
            text.push_str(&format!(
                "  {:<24} {:<10} dep {:<6} arr {}\n",
                entry.vehicle_name, entry.day, entry.departure, entry.arrival
            ));
        }
        text
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            tracing::error!("failed to write panel output: {e}");
        }
    }
}

impl<W: Write> DisplayPanel for TerminalPanel<W> {
    fn show_route_info(&mut self, info: &RouteInfo) {
        let text = match self.format {
            OutputFormat::Text => Self::render_text(info),
            OutputFormat::Json => format!("{}\n", json!({ "event": "show_route_info", "route": info })),
        };
        self.write(&text);
    }

    fn hide(&mut self) {
        if self.format == OutputFormat::Json {
            self.write(&format!("{}\n", json!({ "event": "hide_panel" })));
        }
    }

    fn show_error(&mut self, error: &FerryError) {
        let text = match self.format {
            OutputFormat::Text => format!("Error: {error}\n"),
            OutputFormat::Json => format!("{}\n", json!({ "event": "error", "message": error.to_string() })),
        };
        self.write(&text);
    }

    fn show_notice(&mut self, message: &str) {
        let text = match self.format {
            OutputFormat::Text => format!("{message}\n"),
            OutputFormat::Json => format!("{}\n", json!({ "event": "notice", "message": message })),
        };
        self.write(&text);
    }
}
