use crate::DateTime;
use serde::{Deserialize, Serialize};

/// The format name every E57 file carries.
pub const FORMAT_NAME: &str = "ASTM E57 3D Imaging Data File";

/// File-level metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct E57Root {
    /// Always [FORMAT_NAME].
    pub format_name: String,
    /// Globally unique identifier of the file.
    pub guid: String,
    /// The major version of the format.
    pub version_major: u32,
    /// The minor version of the format.
    pub version_minor: u32,
    /// The library that wrote the file.
    pub e57_library_version: String,
    /// When the file was created.
    pub creation_date_time: DateTime,
    /// The number of scans.
    pub data3d_size: u64,
    /// The number of images.
    pub images2d_size: u64,
    /// The coordinate reference system, e.g. as WKT.
    pub coordinate_metadata: String,
}

impl Default for E57Root {
    fn default() -> E57Root {
        E57Root {
            format_name: FORMAT_NAME.to_string(),
            guid: String::new(),
            version_major: crate::raw::MAJOR_VERSION,
            version_minor: crate::raw::MINOR_VERSION,
            e57_library_version: format!("{}-{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            creation_date_time: DateTime::default(),
            data3d_size: 0,
            images2d_size: 0,
            coordinate_metadata: String::new(),
        }
    }
}
