use serde::{Deserialize, Serialize};

/// The extent of a scan's cartesian coordinates, in meters.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartesianBounds {
    pub x_minimum: f64,
    pub x_maximum: f64,
    pub y_minimum: f64,
    pub y_maximum: f64,
    pub z_minimum: f64,
    pub z_maximum: f64,
}

/// The extent of a scan's spherical coordinates.
///
/// Ranges are in meters, angles in radians.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphericalBounds {
    pub range_minimum: f64,
    pub range_maximum: f64,
    pub elevation_minimum: f64,
    pub elevation_maximum: f64,
    pub azimuth_start: f64,
    pub azimuth_end: f64,
}

/// The extent of a scan's grid and return indices.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexBounds {
    pub row_minimum: i64,
    pub row_maximum: i64,
    pub column_minimum: i64,
    pub column_maximum: i64,
    pub return_minimum: i64,
    pub return_maximum: i64,
}

/// The range of intensity values the sensor produces.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityLimits {
    pub intensity_minimum: f64,
    pub intensity_maximum: f64,
}

/// The range of color values the sensor produces.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorLimits {
    pub color_red_minimum: f64,
    pub color_red_maximum: f64,
    pub color_green_minimum: f64,
    pub color_green_maximum: f64,
    pub color_blue_minimum: f64,
    pub color_blue_maximum: f64,
}
