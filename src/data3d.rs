//! Scan headers.

use crate::{
    CartesianBounds, ColorLimits, DateTime, IndexBounds, IntensityLimits, RigidBody,
    SphericalBounds, point::FieldName,
};
use serde::{Deserialize, Serialize};

/// The header of one scan: metadata about its acquisition and its point collection.
///
/// Configure one of these before calling [Writer::new_data3d](crate::Writer::new_data3d):
///
/// ```
/// use e57_simple::{Data3D, DateTime};
///
/// let data3d = Data3D {
///     name: "station 1".to_string(),
///     acquisition_start: DateTime::from_utc(2024, 5, 1, 9, 30, 0.).unwrap(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data3D {
    /// Globally unique identifier. Filled in by the writer when empty.
    pub guid: String,
    /// A user-defined name.
    pub name: String,
    /// A user-defined description.
    pub description: String,
    /// Guids of the scans this one was derived from.
    pub original_guids: Vec<String>,

    /// The manufacturer of the sensor.
    pub sensor_vendor: String,
    /// The model of the sensor.
    pub sensor_model: String,
    /// The serial number of the sensor.
    pub sensor_serial_number: String,
    /// The version of the sensor's hardware.
    pub sensor_hardware_version: String,
    /// The version of the software that ran the sensor.
    pub sensor_software_version: String,
    /// The version of the sensor's firmware.
    pub sensor_firmware_version: String,

    /// Ambient temperature during acquisition, in degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity during acquisition, in percent.
    pub relative_humidity: Option<f64>,
    /// Atmospheric pressure during acquisition, in pascals.
    pub atmospheric_pressure: Option<f64>,

    /// When the acquisition started.
    pub acquisition_start: DateTime,
    /// When the acquisition ended.
    pub acquisition_end: DateTime,

    /// The pose of the sensor during the acquisition.
    pub pose: RigidBody,

    /// The extent of the row, column, and return indices.
    pub index_bounds: Option<IndexBounds>,
    /// The extent of the cartesian coordinates.
    pub cartesian_bounds: Option<CartesianBounds>,
    /// The extent of the spherical coordinates.
    pub spherical_bounds: Option<SphericalBounds>,
    /// The range of the sensor's intensity values.
    pub intensity_limits: Option<IntensityLimits>,
    /// The range of the sensor's color values.
    pub color_limits: Option<ColorLimits>,

    /// How the points are grouped into lines, if they are.
    pub grouping_by_line: Option<LineGrouping>,

    /// The fields stored in the point collection.
    ///
    /// Set by the writer when points are written; ignored on input.
    pub point_fields: Vec<FieldName>,

    /// The number of points in the collection.
    ///
    /// Set by the writer; ignored on input.
    pub points_size: u64,
}

/// Grouping of a point collection into lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineGrouping {
    /// The field the group ids refer to, either `rowIndex` or `columnIndex`.
    pub id_element_name: FieldName,
    /// The number of groups.
    pub groups_size: u64,
    /// The largest number of points in one group.
    pub point_count_size: u64,
}

/// Sizes needed to allocate buffers for a scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Data3DSizes {
    /// The number of rows in the grid.
    pub row_max: u64,
    /// The number of columns in the grid.
    pub column_max: u64,
    /// The number of points.
    pub points_size: u64,
    /// The number of groups.
    pub groups_size: u64,
    /// The largest number of points in one group.
    pub count_size: u64,
    /// True if groups are columns rather than rows.
    pub column_index: bool,
}

impl Data3D {
    /// Returns the sizes of this scan's grid, points, and groups.
    ///
    /// Once points are written, a grid dimension whose index field is not stored is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::{Data3D, IndexBounds};
    /// let data3d = Data3D {
    ///     index_bounds: Some(IndexBounds { row_maximum: 9, column_maximum: 4, ..Default::default() }),
    ///     points_size: 50,
    ///     ..Default::default()
    /// };
    /// let sizes = data3d.sizes();
    /// assert_eq!(10, sizes.row_max);
    /// assert_eq!(5, sizes.column_max);
    /// assert_eq!(50, sizes.points_size);
    /// ```
    pub fn sizes(&self) -> Data3DSizes {
        let stored = |name: FieldName| {
            self.point_fields.is_empty() || self.point_fields.contains(&name)
        };
        let (row_max, column_max) = self.index_bounds.map_or((0, 0), |bounds| {
            (
                if stored(FieldName::RowIndex) {
                    extent(bounds.row_minimum, bounds.row_maximum)
                } else {
                    0
                },
                if stored(FieldName::ColumnIndex) {
                    extent(bounds.column_minimum, bounds.column_maximum)
                } else {
                    0
                },
            )
        });
        let grouping = self.grouping_by_line.unwrap_or_default();
        Data3DSizes {
            row_max,
            column_max,
            points_size: self.points_size,
            groups_size: grouping.groups_size,
            count_size: grouping.point_count_size,
            column_index: grouping.id_element_name == FieldName::ColumnIndex,
        }
    }
}

impl Default for LineGrouping {
    fn default() -> LineGrouping {
        LineGrouping {
            id_element_name: FieldName::RowIndex,
            groups_size: 0,
            point_count_size: 0,
        }
    }
}

fn extent(minimum: i64, maximum: i64) -> u64 {
    u64::try_from(maximum.saturating_sub(minimum).saturating_add(1)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_ignore_missing_index_fields() {
        let data3d = Data3D {
            index_bounds: Some(IndexBounds {
                column_maximum: 2,
                ..Default::default()
            }),
            point_fields: vec![FieldName::ColumnIndex],
            points_size: 6,
            ..Default::default()
        };
        let sizes = data3d.sizes();
        assert_eq!(0, sizes.row_max);
        assert_eq!(3, sizes.column_max);
    }

    #[test]
    fn sizes_without_index_bounds() {
        let data3d = Data3D {
            point_fields: vec![FieldName::CartesianX],
            ..Default::default()
        };
        assert_eq!(Data3DSizes::default(), data3d.sizes());
    }
}
