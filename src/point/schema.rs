use super::{Domain, FieldName, FieldType};
use crate::{Error, Result};
use std::collections::BTreeSet;

/// One attribute column of a [Schema].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name.
    pub name: FieldName,
    /// The element type.
    pub field_type: FieldType,
    /// The values the field may hold.
    pub domain: Domain,
    /// The field's validity flag, if the schema carries it.
    pub validity: Option<FieldName>,
}

/// Something odd about a requested set of fields.
///
/// Warnings never prevent a schema from being built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaWarning {
    /// `returnIndex` was requested without `returnCount`.
    ReturnIndexWithoutCount,
    /// `returnCount` was requested without `returnIndex`.
    ReturnCountWithoutIndex,
    /// A validity flag was requested without any of the fields it describes.
    FlagWithoutField(FieldName),
    /// None of the cartesian, spherical, or row/column fields were requested.
    NoCoordinates,
}

/// The ordered set of fields moved by one point read or write session.
///
/// Field order is defined by the format, not by the order in which fields were requested, so the
/// same set of fields always produces the same schema:
///
/// ```
/// use e57_simple::point::{FieldName, Schema};
///
/// let a = Schema::from_fields([FieldName::Intensity, FieldName::CartesianX]).unwrap();
/// let b = Schema::from_fields([FieldName::CartesianX, FieldName::Intensity]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(FieldName::CartesianX, a.fields()[0].name);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    warnings: Vec<SchemaWarning>,
}

/// Builds a [Schema].
#[derive(Clone, Debug, Default)]
pub struct SchemaBuilder {
    names: BTreeSet<FieldName>,
}

impl Schema {
    /// Returns a new builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::{FieldName, Schema};
    /// let schema = Schema::builder()
    ///     .field(FieldName::CartesianX)
    ///     .field(FieldName::CartesianY)
    ///     .field(FieldName::CartesianZ)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(3, schema.len());
    /// ```
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Builds a schema from some field names.
    pub fn from_fields<I: IntoIterator<Item = FieldName>>(names: I) -> Result<Schema> {
        Schema::builder().fields(names).build()
    }

    /// Returns the fields, in record order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns an iterator over the field names, in record order.
    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Returns the warnings raised while building this schema.
    ///
    /// # Examples
    ///
    /// ```
    /// use e57_simple::point::{FieldName, Schema, SchemaWarning};
    /// let schema = Schema::from_fields([FieldName::CartesianX, FieldName::ReturnIndex]).unwrap();
    /// assert_eq!(&[SchemaWarning::ReturnIndexWithoutCount], schema.warnings());
    /// ```
    pub fn warnings(&self) -> &[SchemaWarning] {
        &self.warnings
    }

    /// Returns true if the schema has this field.
    pub fn contains(&self, name: FieldName) -> bool {
        self.get(name).is_some()
    }

    /// Returns the column of a field, if the schema has it.
    pub fn get(&self, name: FieldName) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false, since empty schemas can't be built.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the length of one packed record, in bytes.
    pub fn record_length(&self) -> usize {
        self.fields.iter().map(|field| field.field_type.len()).sum()
    }
}

impl SchemaBuilder {
    /// Requests a field.
    ///
    /// Validity flags are requested like any other field, e.g. [FieldName::IsColorInvalid].
    pub fn field(mut self, name: FieldName) -> SchemaBuilder {
        let _ = self.names.insert(name);
        self
    }

    /// Requests several fields.
    pub fn fields<I: IntoIterator<Item = FieldName>>(mut self, names: I) -> SchemaBuilder {
        self.names.extend(names);
        self
    }

    /// Builds the schema.
    ///
    /// Returns [Error::EmptySchema] if no fields were requested.
    pub fn build(self) -> Result<Schema> {
        if self.names.is_empty() {
            return Err(Error::EmptySchema);
        }
        let mut warnings = Vec::new();
        let has_return_index = self.names.contains(&FieldName::ReturnIndex);
        let has_return_count = self.names.contains(&FieldName::ReturnCount);
        if has_return_index && !has_return_count {
            warnings.push(SchemaWarning::ReturnIndexWithoutCount);
        } else if has_return_count && !has_return_index {
            warnings.push(SchemaWarning::ReturnCountWithoutIndex);
        }
        for name in self.names.iter().filter(|name| name.is_validity_flag()) {
            if !name
                .flagged_fields()
                .iter()
                .any(|field| self.names.contains(field))
            {
                warnings.push(SchemaWarning::FlagWithoutField(*name));
            }
        }
        if !self.names.iter().any(|name| name.is_coordinate()) {
            warnings.push(SchemaWarning::NoCoordinates);
        }
        for warning in &warnings {
            log::warn!("degraded point schema: {:?}", warning);
        }

        let fields = self
            .names
            .iter()
            .map(|&name| FieldSpec {
                name,
                field_type: name.field_type(),
                domain: name.domain(),
                validity: name
                    .validity_flag()
                    .filter(|flag| self.names.contains(flag)),
            })
            .collect();
        Ok(Schema { fields, warnings })
    }
}
