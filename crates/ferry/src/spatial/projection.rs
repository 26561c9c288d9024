//! Geographic to display coordinate mapping.
//!
//! The map texture covers a fixed longitude/latitude rectangle and is drawn
//! on a plane centred at the origin. Longitude maps linearly onto the
//! plane's x axis and latitude onto its y axis, so east is right and north
//! is up.
//!
//! Neither mapping guards against a degenerate range: when `min == max` the
//! division yields NaN or ±infinity and that value is returned as is.

use geo::Point;

/// Height of projected positions above the map plane
pub const PLANE_ELEVATION: f64 = 0.005;

/// Height of port marker centres
pub const MARKER_ELEVATION: f64 = 0.075;

/// Height of route lines above projected positions
pub const LINE_LIFT: f64 = 0.01;

/// Linear map of `val` from `[min, max]` onto `[dmin, dmax]`.
///
/// Used for longitude.
pub fn map_direct(val: f64, min: f64, max: f64, dmin: f64, dmax: f64) -> f64 {
    let t = (val - min) / (max - min);
    dmin + t * (dmax - dmin)
}

/// Linear map of `val` from `[min, max]` onto `[dmin, dmax]`, measured from
/// the top of the range.
///
/// Used for latitude. Equal to [`map_direct`] for non-degenerate ranges.
pub fn map_inverted(val: f64, min: f64, max: f64, dmin: f64, dmax: f64) -> f64 {
    let t = 1.0 - (max - val) / (max - min);
    dmin + t * (dmax - dmin)
}

/// Geographic extent covered by the map texture, in decimal degrees
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl Default for MapBounds {
    /// The Canary Islands
    fn default() -> Self {
        Self {
            min_lon: -18.455,
            max_lon: -13.307,
            min_lat: 27.522,
            max_lat: 29.458,
        }
    }
}

/// Size of the map plane in display units
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaneSize {
    pub width: f64,
    pub height: f64,
}

impl PlaneSize {
    pub fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Plane of height `scale` that keeps the texture's aspect ratio
    pub fn from_texture(scale: f64, width_px: u32, height_px: u32) -> Self {
        let aspect = width_px as f64 / height_px as f64;
        Self {
            width: scale * aspect,
            height: scale,
        }
    }
}

/// A position on (or just above) the map plane
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl DisplayPoint {
    pub fn lifted(self, dz: f64) -> Self {
        Self {
            z: self.z + dz,
            ..self
        }
    }

    pub fn at_height(self, z: f64) -> Self {
        Self { z, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    bounds: MapBounds,
    plane: PlaneSize,
}

impl Projector {
    pub fn new(bounds: MapBounds, plane: PlaneSize) -> Self {
        Self { bounds, plane }
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn plane(&self) -> PlaneSize {
        self.plane
    }

    /// Project a lon/lat point onto the plane at [`PLANE_ELEVATION`]
    pub fn project(&self, location: Point) -> DisplayPoint {
        let half_w = self.plane.width / 2.0;
        let half_h = self.plane.height / 2.0;

        DisplayPoint {
            x: map_direct(
                location.x(),
                self.bounds.min_lon,
                self.bounds.max_lon,
                -half_w,
                half_w,
            ),
            y: map_inverted(
                location.y(),
                self.bounds.min_lat,
                self.bounds.max_lat,
                -half_h,
                half_h,
            ),
            z: PLANE_ELEVATION,
        }
    }

    /// Convert normalized device coordinates to plane coordinates, assuming
    /// a top-down view framing exactly the plane.
    pub fn ndc_to_display(&self, ndc: [f32; 2]) -> [f64; 2] {
        [
            ndc[0] as f64 * self.plane.width / 2.0,
            ndc[1] as f64 * self.plane.height / 2.0,
        ]
    }
}
