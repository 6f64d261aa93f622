use crate::{
    image::{ImageFormat, Projection},
    point::{FieldName, FieldType},
};

/// Crate-specific error enum.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The in-memory point buffers are not all the same length.
    #[error("buffer for {field} has {len} elements, but {expected} were expected")]
    BufferLengthMismatch {
        /// The field whose buffer disagrees.
        field: FieldName,
        /// The length of the buffer.
        len: usize,
        /// The length of the other buffers.
        expected: usize,
    },

    /// A buffer is too small to receive the next block of records.
    #[error("buffer for {field} holds {len} elements, but {needed} are needed")]
    BufferTooSmall {
        /// The field.
        field: FieldName,
        /// The length of the buffer.
        len: usize,
        /// The number of records in the block.
        needed: usize,
    },

    /// A value is outside of the domain the format allows for its field.
    #[error("{field} value {value} at record {index} is out of its domain")]
    DomainViolation {
        /// The field.
        field: FieldName,
        /// The record index in the point stream.
        index: u64,
        /// The offending value.
        value: f64,
    },

    /// No fields were requested for a schema.
    #[error("a schema needs at least one field")]
    EmptySchema,

    /// The stored field type does not match the requested one.
    #[error("{field} is stored as {found}, but {expected} was requested")]
    FieldTypeMismatch {
        /// The field.
        field: FieldName,
        /// The type the caller asked for.
        expected: FieldType,
        /// The type that was found.
        found: FieldType,
    },

    /// The group table has a different size than requested.
    #[error("the group table has {found} records, but {expected} were requested")]
    GroupCountMismatch {
        /// The number of records requested.
        expected: usize,
        /// The number of records stored.
        found: usize,
    },

    /// A calendar field is out of its valid range.
    #[error("invalid calendar field {field}: {value}")]
    InvalidCalendarField {
        /// The name of the field, e.g. "month".
        field: &'static str,
        /// The value that was provided.
        value: f64,
    },

    /// The file signature was not "ASTM-E57".
    #[error("file signature must be ASTM-E57, found '{0}'")]
    InvalidFileSignature(String),

    /// A group table does not partition the point stream.
    #[error("invalid group layout at group {index}: {reason}")]
    InvalidGroupLayout {
        /// The index of the first offending group.
        index: usize,
        /// What went wrong.
        reason: &'static str,
    },

    /// Wrapper around `std::io::Error`.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper around `serde_json::Error`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A schema field had no buffer.
    #[error("no buffer was provided for {0}")]
    MissingBuffer(FieldName),

    /// A value or index is out of range.
    #[error("{what} is out of range: {value}")]
    OutOfRange {
        /// What was out of range.
        what: &'static str,
        /// The value, as a float.
        value: f64,
    },

    /// The scan already has a point collection.
    #[error("points have already been written for data3d {0}")]
    PointsAlreadyWritten(usize),

    /// The projection or format was not stored for this image.
    #[error("image {index} has no {projection} {format} data")]
    ProjectionNotPresent {
        /// The image index.
        index: usize,
        /// The projection.
        projection: Projection,
        /// The image format.
        format: ImageFormat,
    },

    /// A requested field is not stored in the point collection.
    #[error("{0} is not stored in the point collection")]
    SchemaMismatch(FieldName),

    /// The reader, writer, or session is closed.
    #[error("the session is closed")]
    SessionClosed,

    /// A blob write reaches past the blob's size.
    #[error("blob is {size} bytes, cannot write up to byte {end}")]
    SizeAlreadyFinalized {
        /// The size of the blob.
        size: u64,
        /// The end of the attempted write.
        end: u64,
    },

    /// Wrapper around `std::num::TryFromIntError`.
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// A buffer was provided for a field that is not in the schema.
    #[error("{0} is not part of the session's schema")]
    UnexpectedBuffer(FieldName),

    /// The name is not one of the standardized point field names.
    #[error("unknown point field name: {0}")]
    UnknownFieldName(String),

    /// The file's major version is not supported.
    #[error("unsupported E57 version {major}.{minor}")]
    UnsupportedVersion {
        /// Major version.
        major: u32,
        /// Minor version.
        minor: u32,
    },
}
