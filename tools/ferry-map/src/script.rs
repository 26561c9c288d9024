//! Click scripts.
//!
//! One command per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! click Agaete
//! pick 0.25 -0.4
//! empty
//! ```
//!
//! `click` names a port the way a raycasting surface would report a hit.
//! `pick` gives a pointer position in normalized device coordinates.
//! `empty` clicks the background.

use anyhow::{anyhow, bail, Context, Result};
use ferry_routes::PointerEvent;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Click(String),
    Pick(f32, f32),
    Empty,
}

impl Command {
    /// The pointer event a surface would report, or `None` for a background
    /// click that needs no hit testing.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        match self {
            Command::Click(name) => Some(PointerEvent::on_port(name.clone())),
            Command::Pick(x, y) => Some(PointerEvent::at(*x, *y)),
            Command::Empty => None,
        }
    }
}

fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "click" => {
            if rest.is_empty() {
                bail!("`click` needs a port name");
            }
            Command::Click(rest.to_string())
        }
        "pick" => {
            let mut coords = rest.split_whitespace().map(str::parse::<f32>);
            let x = coords
                .next()
                .ok_or_else(|| anyhow!("`pick` needs an x coordinate"))?
                .context("invalid x coordinate")?;
            let y = coords
                .next()
                .ok_or_else(|| anyhow!("`pick` needs a y coordinate"))?
                .context("invalid y coordinate")?;
            if coords.next().is_some() {
                bail!("`pick` takes exactly two coordinates");
            }
            Command::Pick(x, y)
        }
        "empty" => Command::Empty,
        other => bail!("unknown command `{other}`"),
    };

    Ok(Some(command))
}

pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            parse_line(line)
                .with_context(|| format!("script line {}", i + 1))
                .transpose()
        })
        .collect()
}
