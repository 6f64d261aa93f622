//! Packing of point records into a byte stream.
//!
//! A record is the concatenation of its fields' little-endian values, in layout order, with no
//! padding.

use super::{Buffer, BufferMut, Buffers, BuffersMut, Domain, FieldName, FieldType, Schema};
use crate::{Error, Result};
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// 2^63, the exclusive upper bound of index fields.
const INDEX_LIMIT: f64 = 9_223_372_036_854_775_808.;

/// One field of a stored point collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrototypeField {
    /// The field name.
    pub name: FieldName,
    /// The stored element type.
    pub field_type: FieldType,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    name: FieldName,
    field_type: FieldType,
    offset: usize,
}

/// Where each field of a record lives.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    slots: Vec<Slot>,
    record_length: usize,
}

trait Element: Copy {
    fn read(bytes: &[u8]) -> Self;
    fn write(self, bytes: &mut [u8]);
}

impl Element for f64 {
    fn read(bytes: &[u8]) -> f64 {
        LittleEndian::read_f64(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_f64(bytes, self)
    }
}

impl Element for u32 {
    fn read(bytes: &[u8]) -> u32 {
        LittleEndian::read_u32(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_u32(bytes, self)
    }
}

impl Element for u16 {
    fn read(bytes: &[u8]) -> u16 {
        LittleEndian::read_u16(bytes)
    }
    fn write(self, bytes: &mut [u8]) {
        LittleEndian::write_u16(bytes, self)
    }
}

impl Element for i8 {
    fn read(bytes: &[u8]) -> i8 {
        i8::from_le_bytes([bytes[0]])
    }
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self.to_le_bytes()[0];
    }
}

impl Layout {
    /// Lays out fields in the given order.
    pub(crate) fn new<I: IntoIterator<Item = PrototypeField>>(fields: I) -> Layout {
        let mut offset = 0;
        let slots = fields
            .into_iter()
            .map(|field| {
                let slot = Slot {
                    name: field.name,
                    field_type: field.field_type,
                    offset,
                };
                offset += field.field_type.len();
                slot
            })
            .collect();
        Layout {
            slots,
            record_length: offset,
        }
    }

    /// Lays out a schema's fields in schema order.
    pub(crate) fn from_schema(schema: &Schema) -> Layout {
        Layout::new(prototype(schema))
    }

    /// Returns the length of one record, in bytes.
    pub(crate) fn record_length(&self) -> usize {
        self.record_length
    }

    /// Checks that every schema field is stored with the schema's type.
    pub(crate) fn check(&self, schema: &Schema) -> Result<()> {
        for field in schema.fields() {
            let slot = self.slot(field.name)?;
            if slot.field_type != field.field_type {
                return Err(Error::FieldTypeMismatch {
                    field: field.name,
                    expected: field.field_type,
                    found: slot.field_type,
                });
            }
        }
        Ok(())
    }

    /// Packs `n` records from the buffers, which must already be checked against this layout.
    pub(crate) fn encode(&self, buffers: &Buffers<'_>, n: usize, bytes: &mut Vec<u8>) -> Result<()> {
        bytes.clear();
        bytes.resize(n * self.record_length, 0);
        for slot in &self.slots {
            let buffer = buffers.get(slot.name).ok_or(Error::MissingBuffer(slot.name))?;
            match *buffer {
                Buffer::F64(values) => self.encode_column(slot, &values[..n], bytes),
                Buffer::U32(values) => self.encode_column(slot, &values[..n], bytes),
                Buffer::U16(values) => self.encode_column(slot, &values[..n], bytes),
                Buffer::I8(values) => self.encode_column(slot, &values[..n], bytes),
            }
        }
        Ok(())
    }

    /// Unpacks the schema's fields of `n` records into the buffers.
    ///
    /// Stored fields outside of the schema are skipped.
    pub(crate) fn decode(
        &self,
        schema: &Schema,
        bytes: &[u8],
        n: usize,
        buffers: &mut BuffersMut<'_>,
    ) -> Result<()> {
        for name in schema.names() {
            let slot = *self.slot(name)?;
            let buffer = buffers.get_mut(name).ok_or(Error::MissingBuffer(name))?;
            match buffer {
                BufferMut::F64(values) => self.decode_column(&slot, bytes, &mut values[..n]),
                BufferMut::U32(values) => self.decode_column(&slot, bytes, &mut values[..n]),
                BufferMut::U16(values) => self.decode_column(&slot, bytes, &mut values[..n]),
                BufferMut::I8(values) => self.decode_column(&slot, bytes, &mut values[..n]),
            }
        }
        Ok(())
    }

    fn slot(&self, name: FieldName) -> Result<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .ok_or(Error::SchemaMismatch(name))
    }

    fn encode_column<T: Element>(&self, slot: &Slot, values: &[T], bytes: &mut [u8]) {
        for (i, &value) in values.iter().enumerate() {
            let start = i * self.record_length + slot.offset;
            value.write(&mut bytes[start..start + slot.field_type.len()]);
        }
    }

    fn decode_column<T: Element>(&self, slot: &Slot, bytes: &[u8], values: &mut [T]) {
        for (i, value) in values.iter_mut().enumerate() {
            let start = i * self.record_length + slot.offset;
            *value = T::read(&bytes[start..start + slot.field_type.len()]);
        }
    }
}

/// Returns the stored prototype for a schema.
pub(crate) fn prototype(schema: &Schema) -> Vec<PrototypeField> {
    schema
        .fields()
        .iter()
        .map(|field| PrototypeField {
            name: field.name,
            field_type: field.field_type,
        })
        .collect()
}

/// Checks the domain of the first `n` records.
///
/// `first_index` is the stream index of the first record, used for error reporting. Records
/// whose validity flag is set are not checked.
pub(crate) fn check_domains(
    schema: &Schema,
    buffers: &Buffers<'_>,
    n: usize,
    first_index: u64,
) -> Result<()> {
    let return_count = buffers.get(FieldName::ReturnCount);
    for field in schema.fields() {
        if matches!(field.domain, Domain::Unconstrained | Domain::Flag) {
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
            let Some(value) = buffer.value(i) else {
                continue;
            };
            let ok = match field.domain {
                Domain::NonNegative => value >= 0.,
                Domain::Index => (0.0..INDEX_LIMIT).contains(&value),
                Domain::ReturnIndex => {
                    value >= 0.
                        && return_count
                            .and_then(|counts| counts.value(i))
                            .is_none_or(|count| value < count)
                }
                Domain::Unconstrained | Domain::Flag => true,
            };
            if !ok {
                return Err(Error::DomainViolation {
                    field: field.name,
                    index: first_index + i as u64,
                    value,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[FieldName]) -> Schema {
        Schema::from_fields(names.iter().copied()).unwrap()
    }

    #[test]
    fn packs_without_padding() {
        let x = vec![1.5, -2.];
        let red = vec![7u16, 8];
        let flags = vec![0i8, 1];
        let buffers = Buffers::new()
            .with(FieldName::CartesianX, &x)
            .with(FieldName::ColorRed, &red)
            .with(FieldName::IsColorInvalid, &flags);
        let schema = buffers.schema().unwrap();
        let layout = Layout::from_schema(&schema);
        assert_eq!(11, layout.record_length());
        let mut bytes = Vec::new();
        layout.encode(&buffers, 2, &mut bytes).unwrap();
        assert_eq!(22, bytes.len());
        assert_eq!(1.5, LittleEndian::read_f64(&bytes[0..8]));
        assert_eq!(7, LittleEndian::read_u16(&bytes[8..10]));
        assert_eq!(0, bytes[10]);
        assert_eq!(-2., LittleEndian::read_f64(&bytes[11..19]));
        assert_eq!(1, bytes[21]);
    }

    #[test]
    fn decodes_a_subset() {
        let x = vec![1., 2.];
        let intensity = vec![0.25, 0.5];
        let buffers = Buffers::new()
            .with(FieldName::CartesianX, &x)
            .with(FieldName::Intensity, &intensity);
        let stored = buffers.schema().unwrap();
        let layout = Layout::from_schema(&stored);
        let mut bytes = Vec::new();
        layout.encode(&buffers, 2, &mut bytes).unwrap();

        let requested = schema(&[FieldName::Intensity]);
        layout.check(&requested).unwrap();
        let mut out = vec![0.; 3];
        let mut buffers = BuffersMut::new().with(FieldName::Intensity, &mut out);
        layout.decode(&requested, &bytes, 2, &mut buffers).unwrap();
        drop(buffers);
        assert_eq!(vec![0.25, 0.5, 0.], out);
    }

    #[test]
    fn missing_field() {
        let layout = Layout::from_schema(&schema(&[FieldName::CartesianX]));
        assert!(matches!(
            layout.check(&schema(&[FieldName::TimeStamp])),
            Err(Error::SchemaMismatch(FieldName::TimeStamp))
        ));
    }

    #[test]
    fn stored_type_mismatch() {
        let layout = Layout::new([PrototypeField {
            name: FieldName::RowIndex,
            field_type: FieldType::U16,
        }]);
        assert!(matches!(
            layout.check(&schema(&[FieldName::RowIndex])),
            Err(Error::FieldTypeMismatch {
                expected: FieldType::U32,
                found: FieldType::U16,
                ..
            })
        ));
    }

    #[test]
    fn negative_range() {
        let range = vec![1., -1.];
        let buffers = Buffers::new().with(FieldName::SphericalRange, &range);
        let schema = buffers.schema().unwrap();
        assert!(matches!(
            check_domains(&schema, &buffers, 2, 10),
            Err(Error::DomainViolation {
                field: FieldName::SphericalRange,
                index: 11,
                ..
            })
        ));
        assert!(check_domains(&schema, &buffers, 1, 10).is_ok());
    }

    #[test]
    fn invalid_records_are_exempt() {
        let range = vec![1., -1.];
        let flags = vec![0i8, 1];
        let buffers = Buffers::new()
            .with(FieldName::SphericalRange, &range)
            .with(FieldName::SphericalInvalidState, &flags);
        let schema = buffers.schema().unwrap();
        check_domains(&schema, &buffers, 2, 0).unwrap();
    }

    #[test]
    fn return_index_below_count() {
        let index = vec![0i8, 2];
        let count = vec![2i8, 2];
        let buffers = Buffers::new()
            .with(FieldName::ReturnIndex, &index)
            .with(FieldName::ReturnCount, &count);
        let schema = buffers.schema().unwrap();
        assert!(matches!(
            check_domains(&schema, &buffers, 2, 0),
            Err(Error::DomainViolation {
                field: FieldName::ReturnIndex,
                index: 1,
                ..
            })
        ));
        let count = vec![-1i8];
        let buffers = Buffers::new().with(FieldName::ReturnCount, &count);
        let schema = buffers.schema().unwrap();
        assert!(check_domains(&schema, &buffers, 1, 0).is_err());
    }

    #[test]
    fn nan_timestamp() {
        let time = vec![f64::NAN];
        let buffers = Buffers::new().with(FieldName::TimeStamp, &time);
        let schema = buffers.schema().unwrap();
        assert!(check_domains(&schema, &buffers, 1, 0).is_err());
    }
}
