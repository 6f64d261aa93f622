use super::Reader;
use crate::{
    Error, Result,
    point::{BuffersMut, Schema, record::Layout},
};
use std::io::{Read, Seek, SeekFrom};

/// Reads blocks of points from one scan.
///
/// Created by [Reader::setup_points]. Records are read in stream order, starting at the first.
#[allow(missing_debug_implementations)]
pub struct PointReader<'a, R: Read + Seek> {
    reader: &'a mut Reader<R>,
    offset: u64,
    len: u64,
    layout: Layout,
    schema: Schema,
    point_count: usize,
    bytes: Vec<u8>,
    index: u64,
    closed: bool,
}

impl<'a, R: Read + Seek> PointReader<'a, R> {
    pub(super) fn new(
        reader: &'a mut Reader<R>,
        offset: u64,
        len: u64,
        layout: Layout,
        schema: Schema,
        point_count: usize,
    ) -> PointReader<'a, R> {
        PointReader {
            reader,
            offset,
            len,
            layout,
            schema,
            point_count,
            bytes: Vec::new(),
            index: 0,
            closed: false,
        }
    }

    /// Reads the next block of points into the buffers, returning the number of records read.
    ///
    /// At most `point_count` records are read. Elements past the returned count are left
    /// untouched. Returns zero once every record has been read.
    pub fn transfer_next(&mut self, buffers: &mut BuffersMut<'_>) -> Result<usize> {
        self.check_open()?;
        let remaining = self.len - self.index;
        let n = usize::try_from(remaining)
            .unwrap_or(usize::MAX)
            .min(self.point_count);
        buffers.check(&self.schema, n)?;
        if n == 0 {
            return Ok(0);
        }
        let record_length = u64::try_from(self.layout.record_length())?;
        let position = self
            .index
            .checked_mul(record_length)
            .and_then(|position| position.checked_add(self.offset))
            .and_then(|position| position.checked_add(self.reader.start))
            .ok_or(Error::OutOfRange {
                what: "point section offset",
                value: self.offset as f64,
            })?;
        let _ = self.reader.read.seek(SeekFrom::Start(position))?;
        self.bytes.resize(n * self.layout.record_length(), 0);
        self.reader.read.read_exact(&mut self.bytes)?;
        self.layout.decode(&self.schema, &self.bytes, n, buffers)?;
        self.index += u64::try_from(n)?;
        Ok(n)
    }

    /// Seeks to the given record, zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, Reader, Writer};
    /// use e57_simple::point::{Buffers, BuffersMut, FieldName};
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let index = writer.new_data3d(Data3D::default()).unwrap();
    /// let time = vec![10., 20., 30.];
    /// let buffers = Buffers::new().with(FieldName::TimeStamp, &time);
    /// let schema = buffers.schema().unwrap();
    /// let _ = writer.setup_points(index, 3, schema.clone()).unwrap().transfer_next(&buffers).unwrap();
    ///
    /// let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    /// let mut points = reader.setup_points(index, 3, schema).unwrap();
    /// points.seek(2).unwrap();
    /// let mut time = vec![0.];
    /// let mut buffers = BuffersMut::new().with(FieldName::TimeStamp, &mut time);
    /// assert_eq!(1, points.transfer_next(&mut buffers).unwrap());
    /// drop(buffers);
    /// assert_eq!(30., time[0]);
    /// ```
    pub fn seek(&mut self, index: u64) -> Result<()> {
        self.check_open()?;
        if index > self.len {
            return Err(Error::OutOfRange {
                what: "point index",
                value: index as f64,
            });
        }
        self.index = index;
        Ok(())
    }

    /// Returns the index of the next record to be read.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Returns the number of records in the scan.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns true if the scan has no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the schema of this session.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns true if this session has not been closed.
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Closes this session.
    ///
    /// Any later call fails with [Error::SessionClosed].
    pub fn close(&mut self) -> Result<()> {
        self.check_open()?;
        self.closed = true;
        Ok(())
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }
}
