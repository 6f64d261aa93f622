//! Read and write [ASTM E57](https://www.astm.org/e2807-11r19e01.html) 3D imaging data.
//!
//! An E57 file holds any number of scans (`Data3D`), each with a point collection and an
//! optional group table, and any number of camera images (`Image2D`), each with up to four
//! representations stored as JPEG or PNG blobs.
//!
//! # Writing
//!
//! Create a `Writer` from anything that implements `Write + Seek`, add a scan, and write its
//! points in blocks with a `PointWriter`:
//!
//! ```
//! use std::io::Cursor;
//! use e57_simple::{Data3D, Writer};
//! use e57_simple::point::{Buffers, FieldName};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
//! let index = writer.new_data3d(Data3D::default()).unwrap();
//!
//! let x = vec![1., 2.];
//! let y = vec![3., 4.];
//! let z = vec![5., 6.];
//! let buffers = Buffers::new()
//!     .with(FieldName::CartesianX, &x)
//!     .with(FieldName::CartesianY, &y)
//!     .with(FieldName::CartesianZ, &z);
//! let mut points = writer.setup_points(index, 1024, buffers.schema().unwrap()).unwrap();
//! points.transfer_next(&buffers).unwrap();
//!
//! let cursor = writer.into_inner().unwrap();
//! ```
//!
//! You can also write out to a path (automatically buffered with `BufWriter`):
//!
//! ```
//! use e57_simple::Writer;
//! let dir = tempfile::tempdir().unwrap();
//! let writer = Writer::from_path(dir.path().join("out.e57"), "EPSG:4326").unwrap();
//! ```
//!
//! # Reading
//!
//! Create a `Reader` from a `Path`, or anything that implements `Read + Seek`, and read a scan's
//! points with a `PointReader`. A session's [Schema](point::Schema) picks the fields to read:
//!
//! ```
//! use std::io::Cursor;
//! use e57_simple::{Data3D, Reader, Writer};
//! use e57_simple::point::{Buffers, BuffersMut, FieldName, Schema};
//!
//! # let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
//! # let index = writer.new_data3d(Data3D::default()).unwrap();
//! # let x = vec![1., 2.];
//! # let buffers = Buffers::new().with(FieldName::CartesianX, &x);
//! # writer.setup_points(index, 2, buffers.schema().unwrap()).unwrap().transfer_next(&buffers).unwrap();
//! # let cursor = writer.into_inner().unwrap();
//! let mut reader = Reader::new(cursor).unwrap();
//! let data3d = reader.read_data3d(0).unwrap();
//! let mut x = vec![0.; data3d.points_size as usize];
//!
//! let schema = Schema::from_fields([FieldName::CartesianX]).unwrap();
//! let mut points = reader.setup_points(0, x.len(), schema).unwrap();
//! let mut buffers = BuffersMut::new().with(FieldName::CartesianX, &mut x);
//! while points.transfer_next(&mut buffers).unwrap() > 0 {}
//! ```
//!
//! # Time
//!
//! Timestamps are seconds since the GPS epoch. [gps_time] converts to and from UTC:
//!
//! ```
//! use e57_simple::gps_time;
//! let gps = gps_time::gps_from_utc(2017, 1, 1, 0, 0, 0.).unwrap();
//! assert_eq!(1_167_264_018., gps);
//! ```

#![deny(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod gps_time;
pub mod group;
pub mod image;
pub mod point;
pub mod raw;
pub mod reader;
pub mod writer;

mod bounds;
mod data3d;
mod date_time;
mod error;
mod guid;
mod pose;
mod root;

pub use crate::{
    bounds::{CartesianBounds, ColorLimits, IndexBounds, IntensityLimits, SphericalBounds},
    data3d::{Data3D, Data3DSizes, LineGrouping},
    date_time::DateTime,
    error::Error,
    group::GroupRecord,
    guid::new_guid,
    image::{
        CylindricalRepresentation, Image2D, ImageBlobDescriptor, PinholeRepresentation,
        SphericalRepresentation, VisualReferenceRepresentation,
    },
    pose::{Quaternion, RigidBody, Translation},
    reader::{PointReader, Reader, ReaderOptions},
    root::{E57Root, FORMAT_NAME},
    writer::{PointWriter, Writer, WriterOptions},
};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;
