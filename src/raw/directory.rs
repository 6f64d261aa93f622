//! The metadata directory written at the end of the file.

use crate::{
    Data3D, E57Root, GroupRecord, Image2D, Result,
    image::{ImageFormat, Projection},
    point::PrototypeField,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Everything a file knows about its scans and images, except the binary sections themselves.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Directory {
    /// File-level metadata.
    pub root: E57Root,
    /// The scans, in creation order.
    pub data3d: Vec<ScanEntry>,
    /// The images, in creation order.
    pub images2d: Vec<ImageEntry>,
}

/// One scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanEntry {
    /// The scan header.
    pub header: Data3D,
    /// Where the scan's points live, if they were written.
    pub points: Option<PointSection>,
    /// The scan's group table.
    pub groups: Vec<GroupRecord>,
}

/// A binary section of packed point records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSection {
    /// The offset of the first record.
    pub offset: u64,
    /// The number of records.
    pub record_count: u64,
    /// The stored fields, in record order.
    pub prototype: Vec<PrototypeField>,
}

/// One image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageEntry {
    /// The image header.
    pub header: Image2D,
    /// The allocated blobs.
    pub blobs: Vec<BlobSection>,
}

/// A binary section holding one image blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobSection {
    /// The representation the blob belongs to.
    pub projection: Projection,
    /// The encoding of the blob.
    pub format: ImageFormat,
    /// The offset of the blob's first byte.
    pub offset: u64,
    /// The length of the blob, in bytes.
    pub size: u64,
}

impl Directory {
    /// Reads a directory of `len` bytes.
    pub fn read_from<R: Read>(read: R, len: u64) -> Result<Directory> {
        serde_json::from_reader(read.take(len)).map_err(Into::into)
    }

    /// Writes this directory.
    pub fn write_to<W: Write>(&self, write: W) -> Result<()> {
        serde_json::to_writer(write, self).map_err(Into::into)
    }
}

impl ImageEntry {
    /// Returns the blob for a projection and format, if it was allocated.
    pub fn blob(&self, projection: Projection, format: ImageFormat) -> Option<&BlobSection> {
        self.blobs
            .iter()
            .find(|blob| blob.projection == projection && blob.format == format)
    }
}
