use super::{FieldName, FieldType, Schema};
use crate::{Error, Result};
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

/// A borrowed column of values to be written.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Buffer<'a> {
    F64(&'a [f64]),
    U32(&'a [u32]),
    U16(&'a [u16]),
    I8(&'a [i8]),
}

/// A borrowed column that receives read values.
#[allow(missing_docs)]
#[derive(Debug, PartialEq)]
pub enum BufferMut<'a> {
    F64(&'a mut [f64]),
    U32(&'a mut [u32]),
    U16(&'a mut [u16]),
    I8(&'a mut [i8]),
}

/// The caller's columns for one point write.
///
/// Buffers are only borrowed for the duration of a single transfer.
///
/// ```
/// use e57_simple::point::{Buffers, FieldName};
///
/// let x = [1., 2.];
/// let y = [3., 4.];
/// let z = [5., 6.];
/// let buffers = Buffers::new()
///     .with(FieldName::CartesianX, &x[..])
///     .with(FieldName::CartesianY, &y[..])
///     .with(FieldName::CartesianZ, &z[..]);
/// let schema = buffers.schema().unwrap();
/// assert_eq!(3, schema.len());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Buffers<'a> {
    buffers: BTreeMap<FieldName, Buffer<'a>>,
}

/// The caller's columns for one point read.
#[derive(Debug, Default)]
pub struct BuffersMut<'a> {
    buffers: BTreeMap<FieldName, BufferMut<'a>>,
}

macro_rules! buffer_from {
    ($ty:ty, $variant:ident) => {
        impl<'a> From<&'a [$ty]> for Buffer<'a> {
            fn from(values: &'a [$ty]) -> Buffer<'a> {
                Buffer::$variant(values)
            }
        }

        impl<'a> From<&'a Vec<$ty>> for Buffer<'a> {
            fn from(values: &'a Vec<$ty>) -> Buffer<'a> {
                Buffer::$variant(values.as_slice())
            }
        }

        impl<'a> From<&'a mut [$ty]> for BufferMut<'a> {
            fn from(values: &'a mut [$ty]) -> BufferMut<'a> {
                BufferMut::$variant(values)
            }
        }

        impl<'a> From<&'a mut Vec<$ty>> for BufferMut<'a> {
            fn from(values: &'a mut Vec<$ty>) -> BufferMut<'a> {
                BufferMut::$variant(values.as_mut_slice())
            }
        }
    };
}

buffer_from!(f64, F64);
buffer_from!(u32, U32);
buffer_from!(u16, U16);
buffer_from!(i8, I8);

impl Buffer<'_> {
    /// Returns the element type of this buffer.
    pub fn field_type(&self) -> FieldType {
        match self {
            Buffer::F64(_) => FieldType::F64,
            Buffer::U32(_) => FieldType::U32,
            Buffer::U16(_) => FieldType::U16,
            Buffer::I8(_) => FieldType::I8,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            Buffer::F64(values) => values.len(),
            Buffer::U32(values) => values.len(),
            Buffer::U16(values) => values.len(),
            Buffer::I8(values) => values.len(),
        }
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns one element as a float.
    pub fn value(&self, index: usize) -> Option<f64> {
        match self {
            Buffer::F64(values) => values.get(index).and_then(ToPrimitive::to_f64),
            Buffer::U32(values) => values.get(index).and_then(ToPrimitive::to_f64),
            Buffer::U16(values) => values.get(index).and_then(ToPrimitive::to_f64),
            Buffer::I8(values) => values.get(index).and_then(ToPrimitive::to_f64),
        }
    }
}

impl BufferMut<'_> {
    /// Returns the element type of this buffer.
    pub fn field_type(&self) -> FieldType {
        match self {
            BufferMut::F64(_) => FieldType::F64,
            BufferMut::U32(_) => FieldType::U32,
            BufferMut::U16(_) => FieldType::U16,
            BufferMut::I8(_) => FieldType::I8,
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            BufferMut::F64(values) => values.len(),
            BufferMut::U32(values) => values.len(),
            BufferMut::U16(values) => values.len(),
            BufferMut::I8(values) => values.len(),
        }
    }

    /// Returns true if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Buffers<'a> {
    /// Creates an empty set of buffers.
    pub fn new() -> Buffers<'a> {
        Buffers::default()
    }

    /// Adds a buffer, returning the set.
    pub fn with<B: Into<Buffer<'a>>>(mut self, name: FieldName, buffer: B) -> Buffers<'a> {
        let _ = self.insert(name, buffer);
        self
    }

    /// Adds a buffer, returning the buffer it replaces.
    pub fn insert<B: Into<Buffer<'a>>>(
        &mut self,
        name: FieldName,
        buffer: B,
    ) -> Option<Buffer<'a>> {
        self.buffers.insert(name, buffer.into())
    }

    /// Returns the buffer for a field.
    pub fn get(&self, name: FieldName) -> Option<&Buffer<'a>> {
        self.buffers.get(&name)
    }

    /// Returns the number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if there are no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Builds the schema of the fields these buffers provide.
    pub fn schema(&self) -> Result<Schema> {
        Schema::from_fields(self.buffers.keys().copied())
    }

    /// Checks these buffers against a schema, returning their common length.
    pub(crate) fn check(&self, schema: &Schema) -> Result<usize> {
        check_names(schema, self.buffers.keys().copied())?;
        let mut common = None;
        for field in schema.fields() {
            let buffer = self
                .get(field.name)
                .ok_or(Error::MissingBuffer(field.name))?;
            check_type(field.name, buffer.field_type())?;
            match common {
                None => common = Some(buffer.len()),
                Some(expected) if expected != buffer.len() => {
                    return Err(Error::BufferLengthMismatch {
                        field: field.name,
                        len: buffer.len(),
                        expected,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(common.unwrap_or(0))
    }
}

impl<'a> BuffersMut<'a> {
    /// Creates an empty set of buffers.
    pub fn new() -> BuffersMut<'a> {
        BuffersMut::default()
    }

    /// Adds a buffer, returning the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::{BuffersMut, FieldName};
    /// let mut intensity = vec![0.; 1024];
    /// let buffers = BuffersMut::new().with(FieldName::Intensity, &mut intensity);
    /// assert_eq!(1, buffers.len());
    /// ```
    pub fn with<B: Into<BufferMut<'a>>>(mut self, name: FieldName, buffer: B) -> BuffersMut<'a> {
        let _ = self.insert(name, buffer);
        self
    }

    /// Adds a buffer, returning the buffer it replaces.
    pub fn insert<B: Into<BufferMut<'a>>>(
        &mut self,
        name: FieldName,
        buffer: B,
    ) -> Option<BufferMut<'a>> {
        self.buffers.insert(name, buffer.into())
    }

    /// Returns the buffer for a field.
    pub fn get(&self, name: FieldName) -> Option<&BufferMut<'a>> {
        self.buffers.get(&name)
    }

    /// Returns the buffer for a field, mutably.
    pub fn get_mut(&mut self, name: FieldName) -> Option<&mut BufferMut<'a>> {
        self.buffers.get_mut(&name)
    }

    /// Returns the number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if there are no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Builds the schema of the fields these buffers receive.
    pub fn schema(&self) -> Result<Schema> {
        Schema::from_fields(self.buffers.keys().copied())
    }

    /// Checks these buffers against a schema and the size of the next block.
    pub(crate) fn check(&self, schema: &Schema, needed: usize) -> Result<()> {
        check_names(schema, self.buffers.keys().copied())?;
        for field in schema.fields() {
            let buffer = self
                .get(field.name)
                .ok_or(Error::MissingBuffer(field.name))?;
            check_type(field.name, buffer.field_type())?;
            if buffer.len() < needed {
                return Err(Error::BufferTooSmall {
                    field: field.name,
                    len: buffer.len(),
                    needed,
                });
            }
        }
        Ok(())
    }
}

fn check_names<I: Iterator<Item = FieldName>>(schema: &Schema, mut names: I) -> Result<()> {
    if let Some(name) = names.find(|&name| !schema.contains(name)) {
        Err(Error::UnexpectedBuffer(name))
    } else {
        Ok(())
    }
}

fn check_type(name: FieldName, found: FieldType) -> Result<()> {
    if name.field_type() == found {
        Ok(())
    } else {
        Err(Error::FieldTypeMismatch {
            field: name,
            expected: name.field_type(),
            found,
        })
    }
}
