//! Field-level view over domain records.
//!
//! Every record declares the names of its fields up front and can list its
//! current values. The validator works against this view instead of against
//! concrete types, which is what lets one `is_valid_object` serve users,
//! orders and items alike.

/// A single field value, reduced to what input validation cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Int(i64),
    Decimal(f64),
    Text(&'a str),
    Flag(bool),
}

impl FieldValue<'_> {
    /// Zero, NaN, the empty string and `false` are falsy; everything else is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match *self {
            FieldValue::Int(v) => v != 0,
            FieldValue::Decimal(v) => v != 0.0 && !v.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Flag(b) => b,
        }
    }
}

pub trait Record {
    /// Public (wire) names of the record's fields, in declaration order.
    const FIELDS: &'static [&'static str];

    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)>;
}
