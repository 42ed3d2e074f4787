//! Pure input predicates shared by the services and the HTTP layer.
//!
//! None of these functions fail; they only answer yes or no.

use std::collections::{BTreeMap, HashMap};

use crate::domain::item::Item;
use crate::domain::order::Order;
use crate::domain::record::Record;
use crate::domain::user::User;

/// A finite, integral, strictly positive number.
pub fn is_valid_id(id: f64) -> bool {
    id.is_finite() && id.fract() == 0.0 && id > 0.0
}

/// Numeric reading of raw text such as a path segment or query value:
/// blank text is zero, anything unparsable is NaN.
pub fn to_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse().unwrap_or(f64::NAN)
}

/// Every value is a non-empty string.
pub fn is_valid_strings(values: &[&str]) -> bool {
    values.iter().all(|s| !s.is_empty())
}

/// The record is present and every field not named in `nullable` is truthy.
pub fn is_valid_object<R: Record>(obj: Option<&R>, nullable: &[&str]) -> bool {
    match obj {
        None => false,
        Some(record) => record
            .field_values()
            .iter()
            .all(|(name, value)| nullable.contains(name) || value.is_truthy()),
    }
}

/// `key` names one of the fields of `R`.
pub fn is_property_of<R: Record>(key: &str) -> bool {
    !key.is_empty() && R::FIELDS.contains(&key)
}

/// Values that can be "empty": absent, zero-length, or falsy.
pub trait Emptiness {
    fn is_empty_value(&self) -> bool;
}

/// True for absent values, empty collections and every falsy primitive.
/// A falsy primitive therefore reads the same as "no record found".
pub fn is_empty_object<T: Emptiness + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

impl<T: Emptiness> Emptiness for Option<T> {
    fn is_empty_value(&self) -> bool {
        match self {
            None => true,
            Some(v) => v.is_empty_value(),
        }
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Emptiness for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiness for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for i64 {
    fn is_empty_value(&self) -> bool {
        *self == 0
    }
}

impl Emptiness for f64 {
    fn is_empty_value(&self) -> bool {
        *self == 0.0 || self.is_nan()
    }
}

impl Emptiness for bool {
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Emptiness for () {
    fn is_empty_value(&self) -> bool {
        true
    }
}

macro_rules! record_emptiness {
    ($($ty:ty),*) => {
        $(impl Emptiness for $ty {
            fn is_empty_value(&self) -> bool {
                <$ty as Record>::FIELDS.is_empty()
            }
        })*
    };
}

record_emptiness!(User, Order, Item);
