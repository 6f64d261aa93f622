use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The standardized E57 point fields.
///
/// Variants are declared in format order, so ordering two field names gives their order in a
/// point record. Validity flags come right after the fields they describe.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    CartesianX,
    CartesianY,
    CartesianZ,
    CartesianInvalidState,
    Intensity,
    IsIntensityInvalid,
    ColorRed,
    ColorGreen,
    ColorBlue,
    IsColorInvalid,
    SphericalRange,
    SphericalAzimuth,
    SphericalElevation,
    SphericalInvalidState,
    RowIndex,
    ColumnIndex,
    ReturnIndex,
    ReturnCount,
    TimeStamp,
    IsTimeStampInvalid,
}

/// The numeric type of one element of a point field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// 64-bit float.
    F64,
    /// 32-bit unsigned integer.
    U32,
    /// 16-bit unsigned integer.
    U16,
    /// 8-bit signed integer, used for flags and return numbers.
    I8,
}

/// The values a field may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Any value.
    Unconstrained,
    /// Zero or more.
    NonNegative,
    /// An index in `[0, 2^63)`.
    Index,
    /// A return number in `[0, returnCount)`.
    ReturnIndex,
    /// A validity flag, transferred verbatim: 0 is valid, anything else is invalid.
    Flag,
}

impl FieldName {
    /// All field names, in format order.
    pub const ALL: [FieldName; 20] = [
        FieldName::CartesianX,
        FieldName::CartesianY,
        FieldName::CartesianZ,
        FieldName::CartesianInvalidState,
        FieldName::Intensity,
        FieldName::IsIntensityInvalid,
        FieldName::ColorRed,
        FieldName::ColorGreen,
        FieldName::ColorBlue,
        FieldName::IsColorInvalid,
        FieldName::SphericalRange,
        FieldName::SphericalAzimuth,
        FieldName::SphericalElevation,
        FieldName::SphericalInvalidState,
        FieldName::RowIndex,
        FieldName::ColumnIndex,
        FieldName::ReturnIndex,
        FieldName::ReturnCount,
        FieldName::TimeStamp,
        FieldName::IsTimeStampInvalid,
    ];

    /// Returns the E57 element name of this field.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::FieldName;
    /// assert_eq!("cartesianX", FieldName::CartesianX.as_str());
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::CartesianX => "cartesianX",
            FieldName::CartesianY => "cartesianY",
            FieldName::CartesianZ => "cartesianZ",
            FieldName::CartesianInvalidState => "cartesianInvalidState",
            FieldName::Intensity => "intensity",
            FieldName::IsIntensityInvalid => "isIntensityInvalid",
            FieldName::ColorRed => "colorRed",
            FieldName::ColorGreen => "colorGreen",
            FieldName::ColorBlue => "colorBlue",
            FieldName::IsColorInvalid => "isColorInvalid",
            FieldName::SphericalRange => "sphericalRange",
            FieldName::SphericalAzimuth => "sphericalAzimuth",
            FieldName::SphericalElevation => "sphericalElevation",
            FieldName::SphericalInvalidState => "sphericalInvalidState",
            FieldName::RowIndex => "rowIndex",
            FieldName::ColumnIndex => "columnIndex",
            FieldName::ReturnIndex => "returnIndex",
            FieldName::ReturnCount => "returnCount",
            FieldName::TimeStamp => "timeStamp",
            FieldName::IsTimeStampInvalid => "isTimeStampInvalid",
        }
    }

    /// Returns the element type of this field.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::{FieldName, FieldType};
    /// assert_eq!(FieldType::U16, FieldName::ColorRed.field_type());
    /// assert_eq!(FieldType::I8, FieldName::IsColorInvalid.field_type());
    /// ```
    pub fn field_type(&self) -> FieldType {
        use FieldName::*;
        match self {
            CartesianX | CartesianY | CartesianZ | Intensity | SphericalRange
            | SphericalAzimuth | SphericalElevation | TimeStamp => FieldType::F64,
            ColorRed | ColorGreen | ColorBlue => FieldType::U16,
            RowIndex | ColumnIndex => FieldType::U32,
            CartesianInvalidState
            | IsIntensityInvalid
            | IsColorInvalid
            | SphericalInvalidState
            | ReturnIndex
            | ReturnCount
            | IsTimeStampInvalid => FieldType::I8,
        }
    }

    /// Returns the domain of this field.
    pub fn domain(&self) -> Domain {
        use FieldName::*;
        match self {
            SphericalRange | TimeStamp => Domain::NonNegative,
            RowIndex | ColumnIndex | ReturnCount => Domain::Index,
            ReturnIndex => Domain::ReturnIndex,
            CartesianInvalidState
            | IsIntensityInvalid
            | IsColorInvalid
            | SphericalInvalidState
            | IsTimeStampInvalid => Domain::Flag,
            _ => Domain::Unconstrained,
        }
    }

    /// Returns true if this field is a validity flag.
    pub fn is_validity_flag(&self) -> bool {
        self.domain() == Domain::Flag
    }

    /// Returns the validity flag that describes this field, if the format defines one.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::FieldName;
    /// assert_eq!(Some(FieldName::IsColorInvalid), FieldName::ColorGreen.validity_flag());
    /// assert_eq!(None, FieldName::RowIndex.validity_flag());
    /// ```
    pub fn validity_flag(&self) -> Option<FieldName> {
        use FieldName::*;
        match self {
            CartesianX | CartesianY | CartesianZ => Some(CartesianInvalidState),
            Intensity => Some(IsIntensityInvalid),
            ColorRed | ColorGreen | ColorBlue => Some(IsColorInvalid),
            SphericalRange | SphericalAzimuth | SphericalElevation => Some(SphericalInvalidState),
            TimeStamp => Some(IsTimeStampInvalid),
            _ => None,
        }
    }

    /// Returns the fields that a validity flag describes.
    ///
    /// Returns an empty slice if this field is not a validity flag.
    pub fn flagged_fields(&self) -> &'static [FieldName] {
        use FieldName::*;
        match self {
            CartesianInvalidState => &[CartesianX, CartesianY, CartesianZ],
            IsIntensityInvalid => &[Intensity],
            IsColorInvalid => &[ColorRed, ColorGreen, ColorBlue],
            SphericalInvalidState => &[SphericalRange, SphericalAzimuth, SphericalElevation],
            IsTimeStampInvalid => &[TimeStamp],
            _ => &[],
        }
    }

    /// Returns true if this field is part of a coordinate representation.
    pub fn is_coordinate(&self) -> bool {
        use FieldName::*;
        matches!(
            self,
            CartesianX
                | CartesianY
                | CartesianZ
                | SphericalRange
                | SphericalAzimuth
                | SphericalElevation
                | RowIndex
                | ColumnIndex
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldName> {
        FieldName::ALL
            .iter()
            .find(|name| name.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownFieldName(s.to_string()))
    }
}

impl FieldType {
    /// Returns the size of one element, in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::FieldType;
    /// assert_eq!(8, FieldType::F64.len());
    /// ```
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            FieldType::F64 => 8,
            FieldType::U32 => 4,
            FieldType::U16 => 2,
            FieldType::I8 => 1,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::F64 => f.write_str("f64"),
            FieldType::U32 => f.write_str("u32"),
            FieldType::U16 => f.write_str("u16"),
            FieldType::I8 => f.write_str("i8"),
        }
    }
}
