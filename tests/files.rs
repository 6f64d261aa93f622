//! File-level tests: paths, headers, metadata, and groups.

use e57_simple::{
    Data3D, Error, FORMAT_NAME, GroupRecord, Reader, ReaderOptions, Writer,
    WriterOptions,
    point::{Buffers, BuffersMut, FieldName, Schema},
};
use std::io::Cursor;

const WKT: &str = "GEOGCS[\"WGS 84\"]";

#[test]
fn path_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scan.e57");
    let intensity = vec![0.25, 0.5, 0.75];
    {
        let mut writer = Writer::from_path(&path, WKT).unwrap();
        let index = writer
            .new_data3d(Data3D {
                name: "station 1".to_string(),
                ..Default::default()
            })
            .unwrap();
        let buffers = Buffers::new().with(FieldName::Intensity, &intensity);
        let mut points = writer
            .setup_points(index, 3, buffers.schema().unwrap())
            .unwrap();
        assert_eq!(3, points.transfer_next(&buffers).unwrap());
        writer.close().unwrap();
    }

    let mut reader = Reader::from_path(&path).unwrap();
    let root = reader.e57_root().unwrap();
    assert_eq!(FORMAT_NAME, root.format_name);
    assert_eq!(WKT, root.coordinate_metadata);
    assert_eq!(1, root.data3d_size);
    assert_eq!(
        std::fs::metadata(&path).unwrap().len(),
        reader.header().file_physical_length
    );
    assert_eq!("station 1", reader.read_data3d(0).unwrap().name);
    let schema = Schema::from_fields([FieldName::Intensity]).unwrap();
    let mut points = reader.setup_points(0, 3, schema).unwrap();
    let mut read = vec![0.; 3];
    let mut buffers = BuffersMut::new().with(FieldName::Intensity, &mut read);
    assert_eq!(3, points.transfer_next(&mut buffers).unwrap());
    drop(buffers);
    assert_eq!(intensity, read);
}

#[test]
fn dropped_writer_is_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dropped.e57");
    {
        let mut writer = Writer::from_path(&path, "").unwrap();
        let _ = writer.new_data3d(Data3D::default()).unwrap();
    }
    let reader = Reader::from_path(&path).unwrap();
    assert_eq!(1, reader.data3d_count().unwrap());
}

#[test]
fn root_metadata() {
    let options = WriterOptions::default()
        .with_coordinate_metadata(WKT)
        .with_guid("{00000000-0000-0000-0000-000000000001}");
    let writer = Writer::with_options(Cursor::new(Vec::new()), options).unwrap();
    let created = writer.e57_root().unwrap().creation_date_time;
    let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    let root = reader.e57_root().unwrap();
    assert_eq!("{00000000-0000-0000-0000-000000000001}", root.guid);
    assert_eq!(created, root.creation_date_time);
    assert!(root.creation_date_time.date_time_value > 1e9);
    assert_eq!(1, root.version_major);
    assert_eq!(0, root.data3d_size);
    assert_eq!(0, reader.image2d_count().unwrap());
}

#[test]
fn invalid_signature() {
    let bytes = vec![b'x'; 64];
    assert!(matches!(
        Reader::new(Cursor::new(bytes)),
        Err(Error::InvalidFileSignature(_))
    ));
    assert!(Reader::new(Cursor::new(Vec::new())).is_err());
}

#[test]
fn closed_reader() {
    let writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    let mut reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    reader.close().unwrap();
    assert!(matches!(reader.e57_root(), Err(Error::SessionClosed)));
    assert!(matches!(reader.data3d_count(), Err(Error::SessionClosed)));
}

fn scan_with_points(n: usize) -> Writer<Cursor<Vec<u8>>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()), "").unwrap();
    let index = writer.new_data3d(Data3D::default()).unwrap();
    let row: Vec<u32> = (0..n).map(|i| (i / 4) as u32).collect();
    let buffers = Buffers::new().with(FieldName::RowIndex, &row);
    let mut points = writer
        .setup_points(index, n, buffers.schema().unwrap())
        .unwrap();
    assert_eq!(n, points.transfer_next(&buffers).unwrap());
    writer
}

#[test]
fn groups_roundtrip() {
    let mut writer = scan_with_points(12);
    let groups = [
        GroupRecord::new(0, 0, 4),
        GroupRecord::new(1, 4, 4),
        GroupRecord::new(2, 8, 4),
    ];
    writer.write_groups(0, &groups).unwrap();

    let reader = Reader::new(writer.into_inner().unwrap()).unwrap();
    let sizes = reader.data3d_sizes(0).unwrap();
    assert_eq!(3, sizes.groups_size);
    assert_eq!(4, sizes.count_size);
    assert!(!sizes.column_index);
    let mut read = [GroupRecord::default(); 3];
    reader.read_groups(0, &mut read).unwrap();
    assert_eq!(groups, read);
}

#[test]
fn overlapping_groups() {
    let mut writer = scan_with_points(12);
    let groups = [GroupRecord::new(0, 0, 6), GroupRecord::new(1, 4, 4)];
    assert!(matches!(
        writer.write_groups(0, &groups),
        Err(Error::InvalidGroupLayout { index: 1, .. })
    ));
    let groups = [GroupRecord::new(0, 8, 8)];
    assert!(matches!(
        writer.write_groups(0, &groups),
        Err(Error::InvalidGroupLayout { index: 0, .. })
    ));
    assert_eq!(None, writer.data3d(0).unwrap().grouping_by_line);
}

#[test]
fn strict_groups_on_read() {
    let mut writer = scan_with_points(8);
    writer
        .write_groups(0, &[GroupRecord::new(0, 0, 4), GroupRecord::new(1, 4, 4)])
        .unwrap();
    let cursor = writer.into_inner().unwrap();
    let reader =
        Reader::with_options(cursor, ReaderOptions::default().with_strict_groups(true)).unwrap();
    let mut read = [GroupRecord::default(); 2];
    reader.read_groups(0, &mut read).unwrap();
    assert_eq!(4, read[1].start_point_index);
}
