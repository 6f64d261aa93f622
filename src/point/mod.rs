//! Point fields, schemas, and the caller's point buffers.
//!
//! A point collection stores up to twenty optional columns. A [Schema] says which of them one
//! read or write session moves, and [Buffers] / [BuffersMut] hold the caller's columns for a
//! single transfer.

mod buffer;
mod field;
pub(crate) mod record;
mod schema;

pub use self::buffer::{Buffer, BufferMut, Buffers, BuffersMut};
pub use self::field::{Domain, FieldName, FieldType};
pub use self::record::PrototypeField;
pub use self::schema::{FieldSpec, Schema, SchemaBuilder, SchemaWarning};
