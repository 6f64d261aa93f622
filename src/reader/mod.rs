//! Read E57 files.
//!
//! A `Reader` parses the file header and metadata directory when it opens. Points and image
//! blobs stay on disk until they are asked for:
//!
//! ```
//! use std::io::Cursor;
//! use e57_simple::{Data3D, Reader, Writer};
//! use e57_simple::point::{Buffers, BuffersMut, FieldName, Schema};
//!
//! # let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
//! # let index = writer.new_data3d(Data3D::default()).unwrap();
//! # let intensity = vec![0.1, 0.2, 0.3];
//! # let buffers = Buffers::new().with(FieldName::Intensity, &intensity);
//! # let mut points = writer.setup_points(index, 3, buffers.schema().unwrap()).unwrap();
//! # let _ = points.transfer_next(&buffers).unwrap();
//! # let cursor = writer.into_inner().unwrap();
//! let mut reader = Reader::new(cursor).unwrap();
//! assert_eq!(1, reader.data3d_count().unwrap());
//!
//! let schema = Schema::from_fields([FieldName::Intensity]).unwrap();
//! let mut points = reader.setup_points(0, 2, schema).unwrap();
//! let mut intensity = vec![0.; 2];
//! let mut buffers = BuffersMut::new().with(FieldName::Intensity, &mut intensity);
//! assert_eq!(2, points.transfer_next(&mut buffers).unwrap());
//! assert_eq!(1, points.transfer_next(&mut buffers).unwrap());
//! assert_eq!(0, points.transfer_next(&mut buffers).unwrap());
//! ```
//!
//! `Reader::from_path` wraps a file in a `BufReader`:
//!
//! ```no_run
//! use e57_simple::Reader;
//! let reader = Reader::from_path("scan.e57").unwrap();
//! ```

mod points;

pub use self::points::PointReader;

use crate::{
    Data3D, Data3DSizes, E57Root, Error, GroupRecord, Image2D, ImageBlobDescriptor, Result,
    group,
    image::{ImageFormat, Projection},
    point::{Schema, record::Layout},
    raw::{self, Directory, ImageEntry, ScanEntry},
};
use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

/// Options for Reader.
///
/// ```
/// use e57_simple::ReaderOptions;
/// let options = ReaderOptions::default().with_strict_groups(true);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReaderOptions {
    strict_groups: bool,
}

impl ReaderOptions {
    /// Sets whether group tables are validated against the point count when they are read.
    pub fn with_strict_groups(mut self, strict_groups: bool) -> Self {
        self.strict_groups = strict_groups;
        self
    }
}

/// Reads E57 data.
#[allow(missing_debug_implementations)]
pub struct Reader<R: Read + Seek> {
    read: R,
    start: u64,
    header: raw::Header,
    directory: Directory,
    options: ReaderOptions,
    closed: bool,
}

impl<R: Read + Seek> Reader<R> {
    /// Creates a new reader with default options.
    ///
    /// This does *not* wrap the `Read` in a `BufRead`, so if you're concerned
    /// about performance you should do that wrapping yourself (or use
    /// `from_path`).
    pub fn new(read: R) -> Result<Reader<R>> {
        Reader::with_options(read, ReaderOptions::default())
    }

    /// Creates a new reader with custom options.
    ///
    /// The file starts at the current position of the stream.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Reader, ReaderOptions};
    /// let cursor = Cursor::new(b"LASF".to_vec());
    /// assert!(Reader::with_options(cursor, ReaderOptions::default()).is_err());
    /// ```
    pub fn with_options(mut read: R, options: ReaderOptions) -> Result<Reader<R>> {
        let start = read.stream_position()?;
        let header = raw::Header::read_from(&mut read)?;
        let directory_offset = start
            .checked_add(header.directory_offset)
            .ok_or(Error::OutOfRange {
                what: "directory offset",
                value: header.directory_offset as f64,
            })?;
        let _ = read.seek(SeekFrom::Start(directory_offset))?;
        let directory = Directory::read_from(&mut read, header.directory_length)?;
        if directory.root.format_name != crate::root::FORMAT_NAME {
            log::warn!("unexpected format name: {}", directory.root.format_name);
        }
        if header.minor_version != raw::MINOR_VERSION {
            log::warn!(
                "reading e57 version {}.{} as {}.{}",
                header.major_version,
                header.minor_version,
                raw::MAJOR_VERSION,
                raw::MINOR_VERSION
            );
        }
        log::debug!(
            "opened e57 file {} with {} data3d and {} image2d",
            directory.root.guid,
            directory.data3d.len(),
            directory.images2d.len()
        );
        Ok(Reader {
            read,
            start,
            header,
            directory,
            options,
            closed: false,
        })
    }

    /// Returns the raw file header.
    pub fn header(&self) -> &raw::Header {
        &self.header
    }

    /// Returns true if this reader has not been closed.
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Closes this reader.
    ///
    /// Any later call fails with [Error::SessionClosed].
    pub fn close(&mut self) -> Result<()> {
        self.check_open()?;
        self.closed = true;
        Ok(())
    }

    /// Returns the file-level metadata.
    pub fn e57_root(&self) -> Result<&E57Root> {
        self.check_open()?;
        Ok(&self.directory.root)
    }

    /// Returns the number of scans.
    pub fn data3d_count(&self) -> Result<usize> {
        self.check_open()?;
        Ok(self.directory.data3d.len())
    }

    /// Returns a scan header.
    pub fn read_data3d(&self, index: usize) -> Result<&Data3D> {
        self.scan(index).map(|entry| &entry.header)
    }

    /// Returns the sizes needed to allocate buffers for a scan.
    pub fn data3d_sizes(&self, index: usize) -> Result<Data3DSizes> {
        self.read_data3d(index).map(Data3D::sizes)
    }

    /// Returns the number of images.
    pub fn image2d_count(&self) -> Result<usize> {
        self.check_open()?;
        Ok(self.directory.images2d.len())
    }

    /// Returns an image header.
    pub fn read_image2d(&self, index: usize) -> Result<&Image2D> {
        self.image(index).map(|entry| &entry.header)
    }

    /// Describes an image's main blob, or returns `None` if it has no image blobs.
    pub fn image2d_sizes(&self, index: usize) -> Result<Option<ImageBlobDescriptor>> {
        self.read_image2d(index).map(Image2D::descriptor)
    }

    /// Starts reading the points of a scan.
    ///
    /// `point_count` is the largest number of records the session moves per transfer. Every
    /// schema field must be stored in the scan, with the same type.
    pub fn setup_points(
        &mut self,
        data_index: usize,
        point_count: usize,
        schema: Schema,
    ) -> Result<PointReader<'_, R>> {
        self.check_open()?;
        if point_count == 0 {
            return Err(Error::OutOfRange {
                what: "point count",
                value: 0.,
            });
        }
        let entry = self.scan(data_index)?;
        let (offset, len, layout) = match &entry.points {
            Some(section) => {
                let layout = Layout::new(section.prototype.iter().copied());
                (section.offset, section.record_count, layout)
            }
            None => (0, 0, Layout::new([])),
        };
        layout.check(&schema)?;
        log::debug!(
            "reading {} points from data3d {} in blocks of {}",
            len,
            data_index,
            point_count
        );
        Ok(PointReader::new(
            self,
            offset,
            len,
            layout,
            schema,
            point_count,
        ))
    }

    /// Reads the group table of a scan into `groups`, whose length must match the table's.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, Error, GroupRecord, Reader, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let index = writer.new_data3d(Data3D::default()).unwrap();
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// reader.read_groups(index, &mut []).unwrap();
    /// let mut groups = [GroupRecord::default()];
    /// assert!(matches!(
    ///     reader.read_groups(index, &mut groups),
    ///     Err(Error::GroupCountMismatch { expected: 1, found: 0 })
    /// ));
    /// ```
    pub fn read_groups(&self, data_index: usize, groups: &mut [GroupRecord]) -> Result<()> {
        let entry = self.scan(data_index)?;
        if groups.len() != entry.groups.len() {
            return Err(Error::GroupCountMismatch {
                expected: groups.len(),
                found: entry.groups.len(),
            });
        }
        if self.options.strict_groups {
            let total = entry
                .points
                .as_ref()
                .map_or(0, |section| section.record_count);
            group::validate(&entry.groups, total)?;
        }
        groups.copy_from_slice(&entry.groups);
        Ok(())
    }

    /// Reads part of an image blob, returning the number of bytes read.
    ///
    /// Reads `min(buffer.len(), size - start)` bytes, so reading at the end of the blob returns
    /// zero.
    pub fn read_image2d_data(
        &mut self,
        index: usize,
        projection: Projection,
        format: ImageFormat,
        buffer: &mut [u8],
        start: u64,
    ) -> Result<usize> {
        let not_present = Error::ProjectionNotPresent {
            index,
            projection,
            format,
        };
        let entry = self.image(index)?;
        let size = entry
            .header
            .raster(projection)
            .map_or(0, |raster| raster.size(format));
        let Some(blob) = entry.blob(projection, format).copied().filter(|_| size > 0) else {
            return Err(not_present);
        };
        if start > blob.size {
            return Err(Error::OutOfRange {
                what: "blob start",
                value: start as f64,
            });
        }
        let n = usize::try_from(blob.size - start)
            .unwrap_or(usize::MAX)
            .min(buffer.len());
        let position = self
            .start
            .checked_add(blob.offset)
            .and_then(|position| position.checked_add(start))
            .ok_or(Error::OutOfRange {
                what: "blob offset",
                value: blob.offset as f64,
            })?;
        let _ = self.read.seek(SeekFrom::Start(position))?;
        self.read.read_exact(&mut buffer[..n])?;
        Ok(n)
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn scan(&self, index: usize) -> Result<&ScanEntry> {
        self.check_open()?;
        self.directory.data3d.get(index).ok_or(Error::OutOfRange {
            what: "data3d index",
            value: index as f64,
        })
    }

    fn image(&self, index: usize) -> Result<&ImageEntry> {
        self.check_open()?;
        self.directory.images2d.get(index).ok_or(Error::OutOfRange {
            what: "image2d index",
            value: index as f64,
        })
    }
}

impl Reader<BufReader<File>> {
    /// Creates a new reader from a path.
    ///
    /// The underlying `File` is wrapped in a `BufReader` for performance reasons.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Reader<BufReader<File>>> {
        File::open(path)
            .map_err(Error::from)
            .and_then(|file| Reader::new(BufReader::new(file)))
    }
}
