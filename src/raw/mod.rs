//! Raw file structures.
//!
//! A file is a fixed-size [Header], followed by binary sections of packed point records and
//! image blobs, followed by a JSON [Directory] that describes them. The header points to the
//! directory, so the directory can be written last.

mod directory;
mod header;

pub use self::{
    directory::{BlobSection, Directory, ImageEntry, PointSection, ScanEntry},
    header::Header,
};

/// The file signature.
pub const SIGNATURE: &[u8; 8] = b"ASTM-E57";

/// The major version written by this library.
pub const MAJOR_VERSION: u32 = 1;

/// The minor version written by this library.
pub const MINOR_VERSION: u32 = 0;

/// The page size written by this library.
pub const PAGE_SIZE: u64 = 1024;
