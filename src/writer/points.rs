use super::{Writer, scan_mut};
use crate::{
    Data3D, Error, Result,
    point::{
        Buffers, FieldName, Schema,
        record::{self, Layout},
    },
};
use std::{
    collections::BTreeMap,
    io::{Seek, Write},
};

/// The fields whose extent goes into the scan's bounds.
const TRACKED: [FieldName; 9] = [
    FieldName::CartesianX,
    FieldName::CartesianY,
    FieldName::CartesianZ,
    FieldName::SphericalRange,
    FieldName::SphericalAzimuth,
    FieldName::SphericalElevation,
    FieldName::RowIndex,
    FieldName::ColumnIndex,
    FieldName::ReturnIndex,
];

/// Minimum and maximum of the valid values written so far, per field.
#[derive(Debug, Default)]
struct Extents(BTreeMap<FieldName, (f64, f64)>);

/// Writes blocks of points into one scan.
///
/// Created by [Writer::setup_points]. The scan's point count, and its bounds unless disabled in
/// [WriterOptions](crate::WriterOptions), are updated after every block, so a session needs no
/// finalization beyond being dropped.
#[allow(missing_debug_implementations)]
pub struct PointWriter<'a, W: Write + Seek> {
    writer: &'a mut Writer<W>,
    data_index: usize,
    point_count: usize,
    schema: Schema,
    layout: Layout,
    extents: Option<Extents>,
    bytes: Vec<u8>,
    index: u64,
    closed: bool,
}

impl<'a, W: Write + Seek> PointWriter<'a, W> {
    pub(super) fn new(
        writer: &'a mut Writer<W>,
        data_index: usize,
        point_count: usize,
        schema: Schema,
        compute_bounds: bool,
    ) -> PointWriter<'a, W> {
        PointWriter {
            writer,
            data_index,
            point_count,
            layout: Layout::from_schema(&schema),
            schema,
            extents: compute_bounds.then(Extents::default),
            bytes: Vec::new(),
            index: 0,
            closed: false,
        }
    }

    /// Writes the next block of points, returning the number of records written.
    ///
    /// Every buffer must have the same length. At most `point_count` records are written. The
    /// whole block is checked before anything is written, so a block that fails writes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use e57_simple::{Data3D, Error, Writer};
    /// use e57_simple::point::{Buffers, FieldName};
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    /// let index = writer.new_data3d(Data3D::default()).unwrap();
    /// let good = vec![1., 2.];
    /// let bad = vec![1., -2.];
    /// let schema = Buffers::new().with(FieldName::SphericalRange, &good).schema().unwrap();
    /// let mut points = writer.setup_points(index, 10, schema).unwrap();
    ///
    /// let buffers = Buffers::new().with(FieldName::SphericalRange, &bad);
    /// assert!(matches!(points.transfer_next(&buffers), Err(Error::DomainViolation { index: 1, .. })));
    /// let buffers = Buffers::new().with(FieldName::SphericalRange, &good);
    /// assert_eq!(2, points.transfer_next(&buffers).unwrap());
    /// ```
    pub fn transfer_next(&mut self, buffers: &Buffers<'_>) -> Result<usize> {
        self.check_open()?;
        let len = buffers.check(&self.schema)?;
        let n = len.min(self.point_count);
        if n == 0 {
            return Ok(0);
        }
        record::check_domains(&self.schema, buffers, n, self.index)?;
        self.layout.encode(buffers, n, &mut self.bytes)?;
        self.writer.append(&self.bytes)?;
        self.index += u64::try_from(n)?;

        let entry = scan_mut(&mut self.writer.directory, self.data_index)?;
        if let Some(section) = entry.points.as_mut() {
            section.record_count = self.index;
        }
        entry.header.points_size = self.index;
        if let Some(extents) = self.extents.as_mut() {
            extents.grow(&self.schema, buffers, n);
            extents.apply(&mut entry.header);
        }
        Ok(n)
    }

    /// Returns the number of records written so far.
    pub fn index(&self) -> u64 {
        self.index
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
        log::debug!(
            "wrote {} points to data3d {}",
            self.index,
            self.data_index
        );
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

impl Extents {
    fn grow(&mut self, schema: &Schema, buffers: &Buffers<'_>, n: usize) {
        for field in schema.fields() {
            if !TRACKED.contains(&field.name) {
                continue;
            }
            let Some(buffer) = buffers.get(field.name) else {
                continue;
            };
            let flags = field.validity.and_then(|flag| buffers.get(flag));
            for i in 0..n {
                if flags.is_some_and(|flags| flags.value(i) != Some(0.)) {
                    continue;
                }
                let Some(value) = buffer.value(i).filter(|value| !value.is_nan()) else {
                    continue;
                };
                let extent = self.0.entry(field.name).or_insert((value, value));
                extent.0 = extent.0.min(value);
                extent.1 = extent.1.max(value);
            }
        }
    }

    /// Overwrites the bounds of the fields seen so far, keeping the others.
    fn apply(&self, data3d: &mut Data3D) {
        use FieldName::*;

        let get = |name: FieldName| self.0.get(&name).copied();
        let any = |names: [FieldName; 3]| names.iter().any(|name| self.0.contains_key(name));

        if any([CartesianX, CartesianY, CartesianZ]) {
            let bounds = data3d.cartesian_bounds.get_or_insert_with(Default::default);
            if let Some((min, max)) = get(CartesianX) {
                bounds.x_minimum = min;
                bounds.x_maximum = max;
            }
            if let Some((min, max)) = get(CartesianY) {
                bounds.y_minimum = min;
                bounds.y_maximum = max;
            }
            if let Some((min, max)) = get(CartesianZ) {
                bounds.z_minimum = min;
                bounds.z_maximum = max;
            }
        }
        if any([SphericalRange, SphericalAzimuth, SphericalElevation]) {
            let bounds = data3d.spherical_bounds.get_or_insert_with(Default::default);
            if let Some((min, max)) = get(SphericalRange) {
                bounds.range_minimum = min;
                bounds.range_maximum = max;
            }
            if let Some((min, max)) = get(SphericalAzimuth) {
                bounds.azimuth_start = min;
                bounds.azimuth_end = max;
            }
            if let Some((min, max)) = get(SphericalElevation) {
                bounds.elevation_minimum = min;
                bounds.elevation_maximum = max;
            }
        }
        if any([RowIndex, ColumnIndex, ReturnIndex]) {
            let bounds = data3d.index_bounds.get_or_insert_with(Default::default);
            if let Some((min, max)) = get(RowIndex) {
                bounds.row_minimum = min as i64;
                bounds.row_maximum = max as i64;
            }
            if let Some((min, max)) = get(ColumnIndex) {
                bounds.column_minimum = min as i64;
                bounds.column_maximum = max as i64;
            }
            if let Some((min, max)) = get(ReturnIndex) {
                bounds.return_minimum = min as i64;
                bounds.return_maximum = max as i64;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Data3D, Error, IntensityLimits, Reader, Writer, WriterOptions,
        point::{Buffers, BuffersMut, FieldName, Schema},
    };
    use std::io::Cursor;

    fn writer() -> Writer<Cursor<Vec<u8>>> {
        Writer::new(Cursor::new(Vec::new()), "").unwrap()
    }

    #[test]
    fn block_size() {
        let mut writer = writer();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let x = vec![1., 2., 3., 4., 5.];
        let schema = Schema::from_fields([FieldName::CartesianX]).unwrap();
        let mut points = writer.setup_points(index, 2, schema.clone()).unwrap();
        // Each call takes the first `point_count` elements of the buffers it is given.
        for (start, written) in [(0, 2), (2, 2), (4, 1), (5, 0)] {
            let buffers = Buffers::new().with(FieldName::CartesianX, &x[start..]);
            assert_eq!(written, points.transfer_next(&buffers).unwrap());
        }
        assert_eq!(5, points.index());
        assert_eq!(5, writer.data3d(index).unwrap().points_size);

        let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
        let mut points = reader.setup_points(index, 5, schema).unwrap();
        let mut read = vec![0.; 5];
        let mut buffers = BuffersMut::new().with(FieldName::CartesianX, &mut read);
        assert_eq!(5, points.transfer_next(&mut buffers).unwrap());
        drop(buffers);
        assert_eq!(x, read);
    }

    #[test]
    fn failing_block_writes_nothing() {
        let mut writer = writer();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let rows = vec![0u32, 1];
        let returns = vec![0i8, 3];
        let counts = vec![1i8, 2];
        let buffers = Buffers::new()
            .with(FieldName::RowIndex, &rows)
            .with(FieldName::ReturnIndex, &returns)
            .with(FieldName::ReturnCount, &counts);
        let mut points = writer
            .setup_points(index, 10, buffers.schema().unwrap())
            .unwrap();
        assert!(matches!(
            points.transfer_next(&buffers),
            Err(Error::DomainViolation {
                field: FieldName::ReturnIndex,
                index: 1,
                ..
            })
        ));
        assert_eq!(0, points.index());
        assert_eq!(0, writer.data3d(index).unwrap().points_size);
    }

    #[test]
    fn mismatched_buffers() {
        let mut writer = writer();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let x = vec![1., 2.];
        let y = vec![1.];
        let schema = Schema::from_fields([FieldName::CartesianX, FieldName::CartesianY]).unwrap();
        let mut points = writer.setup_points(index, 10, schema).unwrap();
        let buffers = Buffers::new()
            .with(FieldName::CartesianX, &x)
            .with(FieldName::CartesianY, &y);
        assert!(matches!(
            points.transfer_next(&buffers),
            Err(Error::BufferLengthMismatch { .. })
        ));
        let buffers = Buffers::new().with(FieldName::CartesianX, &x);
        assert!(matches!(
            points.transfer_next(&buffers),
            Err(Error::MissingBuffer(FieldName::CartesianY))
        ));
    }

    #[test]
    fn bounds_skip_invalid_records() {
        let mut writer = writer();
        let index = writer
            .new_data3d(Data3D {
                intensity_limits: Some(IntensityLimits {
                    intensity_minimum: 0.,
                    intensity_maximum: 1.,
                }),
                ..Default::default()
            })
            .unwrap();
        let x = vec![1., 3., -100.];
        let y = vec![2., -2., 100.];
        let z = vec![0., 0., 100.];
        let invalid = vec![0i8, 0, 1];
        let intensity = vec![5., 6., 7.];
        let rows = vec![4u32, 7, 9];
        let buffers = Buffers::new()
            .with(FieldName::CartesianX, &x)
            .with(FieldName::CartesianY, &y)
            .with(FieldName::CartesianZ, &z)
            .with(FieldName::CartesianInvalidState, &invalid)
            .with(FieldName::Intensity, &intensity)
            .with(FieldName::RowIndex, &rows);
        let mut points = writer
            .setup_points(index, 2, buffers.schema().unwrap())
            .unwrap();
        assert_eq!(2, points.transfer_next(&buffers).unwrap());
        let x = &x[2..];
        let y = &y[2..];
        let z = &z[2..];
        let invalid = &invalid[2..];
        let intensity = &intensity[2..];
        let rows = &rows[2..];
        let buffers = Buffers::new()
            .with(FieldName::CartesianX, x)
            .with(FieldName::CartesianY, y)
            .with(FieldName::CartesianZ, z)
            .with(FieldName::CartesianInvalidState, invalid)
            .with(FieldName::Intensity, intensity)
            .with(FieldName::RowIndex, rows);
        assert_eq!(1, points.transfer_next(&buffers).unwrap());
        points.close().unwrap();

        let data3d = writer.data3d(index).unwrap();
        let bounds = data3d.cartesian_bounds.unwrap();
        assert_eq!(1., bounds.x_minimum);
        assert_eq!(3., bounds.x_maximum);
        assert_eq!(-2., bounds.y_minimum);
        assert_eq!(2., bounds.y_maximum);
        let index_bounds = data3d.index_bounds.unwrap();
        assert_eq!(4, index_bounds.row_minimum);
        assert_eq!(9, index_bounds.row_maximum);
        assert_eq!(0, index_bounds.column_maximum);
        assert!(data3d.spherical_bounds.is_none());
        assert_eq!(1., data3d.intensity_limits.unwrap().intensity_maximum);
        assert_eq!(3, data3d.points_size);
        assert_eq!(
            vec![
                FieldName::CartesianX,
                FieldName::CartesianY,
                FieldName::CartesianZ,
                FieldName::CartesianInvalidState,
                FieldName::Intensity,
                FieldName::RowIndex,
            ],
            data3d.point_fields
        );
    }

    #[test]
    fn bounds_can_be_disabled() {
        let options = WriterOptions::default().with_compute_bounds(false);
        let mut writer = Writer::with_options(Cursor::new(Vec::new()), options).unwrap();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let range = vec![1., 2.];
        let buffers = Buffers::new().with(FieldName::SphericalRange, &range);
        let mut points = writer
            .setup_points(index, 2, buffers.schema().unwrap())
            .unwrap();
        assert_eq!(2, points.transfer_next(&buffers).unwrap());
        assert!(writer.data3d(index).unwrap().spherical_bounds.is_none());
    }

    #[test]
    fn closed() {
        let mut writer = writer();
        let index = writer.new_data3d(Data3D::default()).unwrap();
        let x = vec![1.];
        let buffers = Buffers::new().with(FieldName::CartesianX, &x);
        let mut points = writer
            .setup_points(index, 2, buffers.schema().unwrap())
            .unwrap();
        assert!(points.is_open());
        points.close().unwrap();
        assert!(!points.is_open());
        assert!(matches!(points.close(), Err(Error::SessionClosed)));
        assert!(matches!(
            points.transfer_next(&buffers),
            Err(Error::SessionClosed)
        ));
    }
}
