//! Write E57 files.
//!
//! A `Writer` creates scans and images, then moves their points and blobs into the file:
//!
//! ```
//! use std::io::Cursor;
//! use e57_simple::{Data3D, Writer};
//! use e57_simple::point::{Buffers, FieldName};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
//! let index = writer.new_data3d(Data3D::default()).unwrap();
//!
//! let x = vec![1., 2., 3.];
//! let y = vec![4., 5., 6.];
//! let z = vec![7., 8., 9.];
//! let buffers = Buffers::new()
//!     .with(FieldName::CartesianX, &x)
//!     .with(FieldName::CartesianY, &y)
//!     .with(FieldName::CartesianZ, &z);
//! let mut points = writer.setup_points(index, 1024, buffers.schema().unwrap()).unwrap();
//! assert_eq!(3, points.transfer_next(&buffers).unwrap());
//! points.close().unwrap();
//!
//! assert_eq!(3, writer.data3d(index).unwrap().points_size);
//! writer.close().unwrap();
//! ```
//!
//! The metadata directory is written when the writer closes, which `Drop` does for you. If you
//! want to see close errors, call `close` explicitly.

mod points;

pub use self::points::PointWriter;

use crate::{
    Data3D, DateTime, E57Root, Error, GroupRecord, Image2D, Result, group,
    image::{ImageFormat, Projection},
    new_guid,
    point::{Schema, record},
    raw::{self, BlobSection, Directory, ImageEntry, PointSection, ScanEntry},
};
use std::{
    fs::File,
    io::{self, BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

const FORMATS: [ImageFormat; 3] = [ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::PngMask];
const PROJECTIONS: [Projection; 4] = [
    Projection::Visual,
    Projection::Pinhole,
    Projection::Spherical,
    Projection::Cylindrical,
];

/// Options for Writer.
///
/// ```
/// use e57_simple::WriterOptions;
/// let options = WriterOptions::default()
///     .with_coordinate_metadata("EPSG:32610")
///     .with_compute_bounds(false);
/// ```
#[derive(Debug, Clone)]
pub struct WriterOptions {
    coordinate_metadata: String,
    guid: Option<String>,
    compute_bounds: bool,
}

impl WriterOptions {
    /// Sets the coordinate reference system of the file, e.g. as WKT.
    pub fn with_coordinate_metadata<S: Into<String>>(mut self, coordinate_metadata: S) -> Self {
        self.coordinate_metadata = coordinate_metadata.into();
        self
    }

    /// Sets the guid of the file, instead of generating one.
    pub fn with_guid<S: Into<String>>(mut self, guid: S) -> Self {
        self.guid = Some(guid.into());
        self
    }

    /// Sets whether point sessions compute the scan's bounds from the written points.
    pub fn with_compute_bounds(mut self, compute_bounds: bool) -> Self {
        self.compute_bounds = compute_bounds;
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            coordinate_metadata: String::new(),
            guid: None,
            compute_bounds: true,
        }
    }
}

/// Writes E57 data.
///
/// Binary sections are appended as they are written. The metadata directory is written when the
/// writer closes. For convenience, this is done via the `Drop` implementation of the writer,
/// which logs any error. If you want to check for errors, use `close` explicitly.
///
/// ```
/// use std::io::Cursor;
/// use e57_simple::Writer;
/// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
/// writer.close().unwrap();
/// assert!(writer.close().is_err());
/// ```
#[allow(missing_debug_implementations)]
pub struct Writer<W: Write + Seek> {
    write: Option<W>,
    start: u64,
    end: u64,
    directory: Directory,
    options: WriterOptions,
    closed: bool,
}

impl<W: Write + Seek> Writer<W> {
    /// Creates a new writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), "EPSG:4326").unwrap();
    /// assert_eq!("EPSG:4326", writer.e57_root().unwrap().coordinate_metadata);
    /// ```
    pub fn new<S: Into<String>>(write: W, coordinate_metadata: S) -> Result<Writer<W>> {
        Writer::with_options(
            write,
            WriterOptions::default().with_coordinate_metadata(coordinate_metadata),
        )
    }

    /// Creates a new writer with custom options.
    ///
    /// A placeholder header is written right away, at the current position of the stream.
    pub fn with_options(mut write: W, options: WriterOptions) -> Result<Writer<W>> {
        let start = write.stream_position()?;
        raw::Header::default().write_to(&mut write)?;
        let root = E57Root {
            guid: options.guid.clone().unwrap_or_else(new_guid),
            creation_date_time: DateTime::now()?,
            coordinate_metadata: options.coordinate_metadata.clone(),
            ..Default::default()
        };
        log::debug!("creating e57 file {}", root.guid);
        Ok(Writer {
            write: Some(write),
            start,
            end: raw::Header::LEN,
            directory: Directory {
                root,
                ..Default::default()
            },
            options,
            closed: false,
        })
    }

    /// Returns true if this writer has not been closed.
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Returns the file-level metadata.
    pub fn e57_root(&self) -> Result<&E57Root> {
        self.check_open()?;
        Ok(&self.directory.root)
    }

    /// Adds a scan, returning its index.
    ///
    /// An empty guid is replaced by a new one. The point fields and count are set when points
    /// are written.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// assert_eq!(0, writer.new_data3d(Data3D::default()).unwrap());
    /// assert_eq!(1, writer.new_data3d(Data3D::default()).unwrap());
    /// assert!(!writer.data3d(1).unwrap().guid.is_empty());
    /// ```
    pub fn new_data3d(&mut self, mut data3d: Data3D) -> Result<usize> {
        self.check_open()?;
        if data3d.guid.is_empty() {
            data3d.guid = new_guid();
        }
        data3d.point_fields.clear();
        data3d.points_size = 0;
        let index = self.directory.data3d.len();
        log::debug!("adding data3d {} ({})", index, data3d.guid);
        self.directory.data3d.push(ScanEntry {
            header: data3d,
            ..Default::default()
        });
        self.directory.root.data3d_size = u64::try_from(self.directory.data3d.len())?;
        Ok(index)
    }

    /// Returns a scan header.
    pub fn data3d(&self, index: usize) -> Result<&Data3D> {
        self.check_open()?;
        scan(&self.directory, index).map(|entry| &entry.header)
    }

    /// Adds an image, returning its index.
    ///
    /// Blob sizes declared in the header fix the size of each blob. Zero sizes are decided by
    /// the first write.
    pub fn new_image2d(&mut self, mut image2d: Image2D) -> Result<usize> {
        self.check_open()?;
        if image2d.guid.is_empty() {
            image2d.guid = new_guid();
        }
        let index = self.directory.images2d.len();
        log::debug!("adding image2d {} ({})", index, image2d.guid);
        self.directory.images2d.push(ImageEntry {
            header: image2d,
            blobs: Vec::new(),
        });
        self.directory.root.images2d_size = u64::try_from(self.directory.images2d.len())?;
        Ok(index)
    }

    /// Returns an image header.
    pub fn image2d(&self, index: usize) -> Result<&Image2D> {
        self.check_open()?;
        image(&self.directory, index).map(|entry| &entry.header)
    }

    /// Starts writing the points of a scan.
    ///
    /// `point_count` is the largest number of records the session moves per transfer. The
    /// session borrows the writer, so it must be closed or dropped before the writer is used
    /// again.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, Writer};
    /// use e57_simple::point::{FieldName, Schema};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let index = writer.new_data3d(Data3D::default()).unwrap();
    /// let schema = Schema::from_fields([FieldName::RowIndex, FieldName::ColumnIndex]).unwrap();
    /// assert!(writer.setup_points(index, 0, schema.clone()).is_err());
    /// let _points = writer.setup_points(index, 100, schema.clone()).unwrap();
    /// assert!(writer.setup_points(index, 100, schema).is_err());
    /// ```
    pub fn setup_points(
        &mut self,
        data_index: usize,
        point_count: usize,
        schema: Schema,
    ) -> Result<PointWriter<'_, W>> {
        self.check_open()?;
        if point_count == 0 {
            return Err(Error::OutOfRange {
                what: "point count",
                value: 0.,
            });
        }
        let offset = self.end;
        let entry = scan_mut(&mut self.directory, data_index)?;
        if entry.points.is_some() {
            return Err(Error::PointsAlreadyWritten(data_index));
        }
        entry.points = Some(PointSection {
            offset,
            record_count: 0,
            prototype: record::prototype(&schema),
        });
        entry.header.point_fields = schema.names().collect();
        entry.header.points_size = 0;
        log::debug!(
            "writing points to data3d {} with fields {:?}",
            data_index,
            entry.header.point_fields
        );
        let compute_bounds = self.options.compute_bounds;
        Ok(PointWriter::new(
            self,
            data_index,
            point_count,
            schema,
            compute_bounds,
        ))
    }

    /// Writes the group table of a scan, replacing any previous table.
    ///
    /// Groups must fit inside the points written so far.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, GroupRecord, Writer};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let index = writer.new_data3d(Data3D::default()).unwrap();
    /// writer.write_groups(index, &[]).unwrap();
    /// assert!(writer.write_groups(index, &[GroupRecord::new(0, 0, 1)]).is_err());
    /// ```
    pub fn write_groups(&mut self, data_index: usize, groups: &[GroupRecord]) -> Result<()> {
        self.check_open()?;
        let entry = scan_mut(&mut self.directory, data_index)?;
        let total = entry
            .points
            .as_ref()
            .map_or(0, |section| section.record_count);
        group::validate(groups, total)?;
        let largest = groups.iter().map(|group| group.point_count).max().unwrap_or(0);
        let grouping = entry.header.grouping_by_line.get_or_insert_with(Default::default);
        grouping.groups_size = u64::try_from(groups.len())?;
        grouping.point_count_size = u64::try_from(largest)?;
        entry.groups = groups.to_vec();
        log::debug!("wrote {} groups to data3d {}", groups.len(), data_index);
        Ok(())
    }

    /// Writes part of an image blob, returning the number of bytes written.
    ///
    /// Writes may come in any order. A blob with a size declared in the image header accepts
    /// writes anywhere inside that size, and its unwritten bytes read back as zero. A blob with
    /// no declared size takes `start + buffer.len()` as its size on the first write.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Image2D, Writer, VisualReferenceRepresentation};
    /// use e57_simple::image::{ImageFormat, Projection};
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let image = Image2D {
    ///     visual_reference: Some(VisualReferenceRepresentation::default()),
    ///     ..Default::default()
    /// };
    /// let index = writer.new_image2d(image).unwrap();
    /// let png = [0x89, b'P', b'N', b'G'];
    /// assert_eq!(4, writer.write_image2d_data(index, Projection::Visual, ImageFormat::Png, &png, 0).unwrap());
    /// assert!(writer.write_image2d_data(index, Projection::Visual, ImageFormat::Png, &png, 1).is_err());
    /// ```
    pub fn write_image2d_data(
        &mut self,
        index: usize,
        projection: Projection,
        format: ImageFormat,
        buffer: &[u8],
        start: u64,
    ) -> Result<usize> {
        self.check_open()?;
        let count = u64::try_from(buffer.len())?;
        let end = start.checked_add(count).ok_or(Error::OutOfRange {
            what: "blob write end",
            value: start as f64,
        })?;
        let entry = image_mut(&mut self.directory, index)?;
        let existing = entry.blob(projection, format).copied();
        let raster = entry
            .header
            .raster_mut(projection)
            .ok_or(Error::ProjectionNotPresent {
                index,
                projection,
                format,
            })?;
        let size = match existing {
            Some(blob) => blob.size,
            None if raster.size(format) > 0 => raster.size(format),
            None => end,
        };
        if start > size {
            return Err(Error::OutOfRange {
                what: "blob start",
                value: start as f64,
            });
        }
        if end > size {
            return Err(Error::SizeAlreadyFinalized { size, end });
        }
        let blob = match existing {
            Some(blob) => blob,
            None if size == 0 => return Ok(0),
            None => {
                raster.set_size(format, size);
                let blob = BlobSection {
                    projection,
                    format,
                    offset: self.end,
                    size,
                };
                let write = self.write.as_mut().ok_or(Error::SessionClosed)?;
                allocate(write, self.start, &blob)?;
                self.end += size;
                entry.blobs.push(blob);
                log::debug!(
                    "allocated {} bytes for the {} {} blob of image2d {}",
                    size,
                    projection,
                    format,
                    index
                );
                blob
            }
        };
        let write = self.write.as_mut().ok_or(Error::SessionClosed)?;
        let _ = write.seek(SeekFrom::Start(self.start + blob.offset + start))?;
        write.write_all(buffer)?;
        Ok(buffer.len())
    }

    /// Closes this writer, writing the metadata directory and the final header.
    ///
    /// Blobs that were declared in an image header but never written are filled with zeros.
    pub fn close(&mut self) -> Result<()> {
        self.check_open()?;
        let write = self.write.as_mut().ok_or(Error::SessionClosed)?;
        for (index, entry) in self.directory.images2d.iter_mut().enumerate() {
            for projection in PROJECTIONS {
                for format in FORMATS {
                    let Some(size) = entry.header.raster(projection).map(|r| r.size(format)) else {
                        continue;
                    };
                    if size == 0 || entry.blob(projection, format).is_some() {
                        continue;
                    }
                    log::warn!(
                        "the {} {} blob of image2d {} was never written, filling it with zeros",
                        projection,
                        format,
                        index
                    );
                    let blob = BlobSection {
                        projection,
                        format,
                        offset: self.end,
                        size,
                    };
                    allocate(write, self.start, &blob)?;
                    self.end += size;
                    entry.blobs.push(blob);
                }
            }
        }

        let mut bytes = Vec::new();
        self.directory.write_to(&mut bytes)?;
        let directory_length = u64::try_from(bytes.len())?;
        let header = raw::Header {
            file_physical_length: self.end + directory_length,
            directory_offset: self.end,
            directory_length,
            ..Default::default()
        };
        let _ = write.seek(SeekFrom::Start(self.start + self.end))?;
        write.write_all(&bytes)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        header.write_to(&mut *write)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        write.flush()?;
        self.closed = true;
        log::debug!(
            "closed e57 file {} with {} data3d and {} image2d",
            self.directory.root.guid,
            self.directory.data3d.len(),
            self.directory.images2d.len()
        );
        Ok(())
    }

    /// Closes this writer and returns its inner `Write`, seeked to the beginning of the file.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::Writer;
    /// let writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let cursor = writer.into_inner().unwrap();
    /// assert_eq!(0, cursor.position());
    /// ```
    pub fn into_inner(mut self) -> Result<W> {
        if !self.closed {
            self.close()?;
        }
        self.write.take().ok_or(Error::SessionClosed)
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Appends a block of bytes at the end of the binary sections.
    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let write = self.write.as_mut().ok_or(Error::SessionClosed)?;
        let _ = write.seek(SeekFrom::Start(self.start + self.end))?;
        write.write_all(bytes)?;
        self.end += u64::try_from(bytes.len())?;
        Ok(())
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a new writer for a path.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::Writer;
    /// let dir = tempfile::tempdir().unwrap();
    /// let writer = Writer::from_path(dir.path().join("scan.e57"), "").unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>, S: Into<String>>(
        path: P,
        coordinate_metadata: S,
    ) -> Result<Writer<BufWriter<File>>> {
        File::create(path)
            .map_err(Error::from)
            .and_then(|file| Writer::new(BufWriter::new(file), coordinate_metadata))
    }
}

impl<W: Write + Seek> Drop for Writer<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.close() {
                log::error!("error when dropping the writer: {}", err);
            }
        }
    }
}

fn scan(directory: &Directory, index: usize) -> Result<&ScanEntry> {
    directory.data3d.get(index).ok_or(Error::OutOfRange {
        what: "data3d index",
        value: index as f64,
    })
}

fn scan_mut(directory: &mut Directory, index: usize) -> Result<&mut ScanEntry> {
    directory.data3d.get_mut(index).ok_or(Error::OutOfRange {
        what: "data3d index",
        value: index as f64,
    })
}

fn image(directory: &Directory, index: usize) -> Result<&ImageEntry> {
    directory.images2d.get(index).ok_or(Error::OutOfRange {
        what: "image2d index",
        value: index as f64,
    })
}

fn image_mut(directory: &mut Directory, index: usize) -> Result<&mut ImageEntry> {
    directory.images2d.get_mut(index).ok_or(Error::OutOfRange {
        what: "image2d index",
        value: index as f64,
    })
}

/// Fills a blob's section with zeros.
fn allocate<W: Write + Seek>(write: &mut W, start: u64, blob: &BlobSection) -> Result<()> {
    let _ = write.seek(SeekFrom::Start(start + blob.offset))?;
    let _ = io::copy(&mut io::repeat(0).take(blob.size), write)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CylindricalRepresentation, PinholeRepresentation, Reader,
        point::{Buffers, FieldName},
    };
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    fn writer() -> Writer<Cursor<Vec<u8>>> {
        Writer::new(Cursor::new(Vec::new()), "").unwrap()
    }

    #[test]
    fn already_closed() {
        let mut writer = writer();
        let _ = writer.new_data3d(Data3D::default()).unwrap();
        writer.close().unwrap();
        assert!(!writer.is_open());
        assert!(matches!(writer.close(), Err(Error::SessionClosed)));
        assert!(matches!(
            writer.new_data3d(Data3D::default()),
            Err(Error::SessionClosed)
        ));
        assert!(matches!(writer.write_groups(0, &[]), Err(Error::SessionClosed)));
    }

    #[test]
    fn options() {
        let options = WriterOptions::default()
            .with_guid("{FILE}")
            .with_coordinate_metadata("wkt");
        let writer = Writer::with_options(Cursor::new(Vec::new()), options).unwrap();
        let root = writer.e57_root().unwrap();
        assert_eq!("{FILE}", root.guid);
        assert_eq!("wkt", root.coordinate_metadata);
        assert_eq!(crate::root::FORMAT_NAME, root.format_name);
    }

    #[test]
    fn bad_indices() {
        let mut writer = writer();
        let schema = Schema::from_fields([FieldName::CartesianX]).unwrap();
        assert!(matches!(
            writer.setup_points(0, 10, schema),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            writer.write_groups(3, &[]),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            writer.write_image2d_data(0, Projection::Visual, ImageFormat::Png, &[1], 0),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn groups_update_the_header() {
        let mut writer = writer();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let rows = vec![0u32, 0, 1, 1, 1];
        let buffers = Buffers::new().with(FieldName::RowIndex, &rows);
        let mut points = writer
            .setup_points(index, 10, buffers.schema().unwrap())
            .unwrap();
        assert_eq!(5, points.transfer_next(&buffers).unwrap());
        points.close().unwrap();

        let groups = [GroupRecord::new(0, 0, 2), GroupRecord::new(1, 2, 3)];
        writer.write_groups(index, &groups).unwrap();
        let grouping = writer.data3d(index).unwrap().grouping_by_line.unwrap();
        assert_eq!(FieldName::RowIndex, grouping.id_element_name);
        assert_eq!(2, grouping.groups_size);
        assert_eq!(3, grouping.point_count_size);

        writer.write_groups(index, &groups[..1]).unwrap();
        let grouping = writer.data3d(index).unwrap().grouping_by_line.unwrap();
        assert_eq!(1, grouping.groups_size);
        assert_eq!(2, grouping.point_count_size);

        let overlapping = [GroupRecord::new(0, 0, 3), GroupRecord::new(1, 2, 3)];
        assert!(matches!(
            writer.write_groups(index, &overlapping),
            Err(Error::InvalidGroupLayout { index: 1, .. })
        ));
    }

    #[test]
    fn declared_blob() {
        let mut writer = writer();
        let mut pinhole = PinholeRepresentation::default();
        pinhole.raster.jpeg_image_size = 8;
        let index = writer
            .new_image2d(Image2D {
                pinhole: Some(pinhole),
                ..Default::default()
            })
            .unwrap();
        let write = |writer: &mut Writer<_>, bytes: &[u8], start| {
            writer.write_image2d_data(index, Projection::Pinhole, ImageFormat::Jpeg, bytes, start)
        };
        assert_eq!(4, write(&mut writer, &[5, 6, 7, 8], 4).unwrap());
        assert_eq!(2, write(&mut writer, &[1, 2], 0).unwrap());
        assert_eq!(0, write(&mut writer, &[], 8).unwrap());
        assert!(matches!(
            write(&mut writer, &[9, 9], 7),
            Err(Error::SizeAlreadyFinalized { size: 8, end: 9 })
        ));
        assert!(matches!(
            write(&mut writer, &[9], 9),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            writer.write_image2d_data(index, Projection::Spherical, ImageFormat::Jpeg, &[1], 0),
            Err(Error::ProjectionNotPresent { .. })
        ));

        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        let mut bytes = [0xff; 8];
        assert_eq!(
            8,
            reader
                .read_image2d_data(index, Projection::Pinhole, ImageFormat::Jpeg, &mut bytes, 0)
                .unwrap()
        );
        assert_eq!([1, 2, 0, 0, 5, 6, 7, 8], bytes);
    }

    #[test]
    fn undeclared_blob_takes_its_size_from_the_first_write() {
        let mut writer = writer();
        let index = writer
            .new_image2d(Image2D {
                cylindrical: Some(CylindricalRepresentation::default()),
                ..Default::default()
            })
            .unwrap();
        let projection = Projection::Cylindrical;
        assert_eq!(
            3,
            writer
                .write_image2d_data(index, projection, ImageFormat::Png, &[1, 2, 3], 2)
                .unwrap()
        );
        let raster = writer.image2d(index).unwrap().raster(projection).unwrap();
        assert_eq!(5, raster.png_image_size);
        assert!(matches!(
            writer.write_image2d_data(index, projection, ImageFormat::Png, &[4], 5),
            Err(Error::SizeAlreadyFinalized { size: 5, end: 6 })
        ));
        assert_eq!(
            2,
            writer
                .write_image2d_data(index, projection, ImageFormat::Png, &[9, 9], 0)
                .unwrap()
        );
    }

    #[test]
    fn unwritten_declared_blob_is_zero_filled() {
        let mut writer = writer();
        let mut pinhole = PinholeRepresentation::default();
        pinhole.raster.image_mask_size = 16;
        let index = writer
            .new_image2d(Image2D {
                pinhole: Some(pinhole),
                ..Default::default()
            })
            .unwrap();
        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        let mut bytes = [0xff; 16];
        assert_eq!(
            16,
            reader
                .read_image2d_data(index, Projection::Pinhole, ImageFormat::PngMask, &mut bytes, 0)
                .unwrap()
        );
        assert_eq!([0; 16], bytes);
    }

    #[test]
    fn drop_closes() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = Writer::new(&mut cursor, "").unwrap();
            let _ = writer.new_data3d(Data3D::default()).unwrap();
        }
        cursor.set_position(0);
        let reader = Reader::new(cursor).unwrap();
        assert_eq!(1, reader.data3d_count().unwrap());
    }

    #[test]
    fn write_not_at_start() {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_u8(42).unwrap();
        let mut writer = Writer::new(cursor, "").unwrap();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let x = vec![1., 2.];
        let buffers = Buffers::new().with(FieldName::CartesianX, &x);
        let mut points = writer
            .setup_points(index, 2, buffers.schema().unwrap())
            .unwrap();
        assert_eq!(2, points.transfer_next(&buffers).unwrap());
        drop(points);
        let mut cursor = writer.into_inner().unwrap();
        assert_eq!(1, cursor.position());
        let mut reader = Reader::new(&mut cursor).unwrap();
        assert_eq!(2, reader.read_data3d(index).unwrap().points_size);
        let schema = Schema::from_fields([FieldName::CartesianX]).unwrap();
        let mut points = reader.setup_points(index, 2, schema).unwrap();
        let mut out = vec![0.; 2];
        let mut buffers = crate::point::BuffersMut::new().with(FieldName::CartesianX, &mut out);
        assert_eq!(2, points.transfer_next(&mut buffers).unwrap());
        drop(buffers);
        assert_eq!(x, out);
    }
}
