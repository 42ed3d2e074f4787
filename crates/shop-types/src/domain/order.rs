use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

/// A customer order. `status` is `true` while the order is open.
///
/// Items are not embedded; they are linked through the order/item join
/// relation and fetched separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub status: bool,
    pub location: String,
    pub destination: String,
}

impl Order {
    pub fn new(
        customer_id: i64,
        status: bool,
        location: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            customer_id,
            status,
            location: location.into(),
            destination: destination.into(),
        }
    }
}

impl Record for Order {
    const FIELDS: &'static [&'static str] =
        &["id", "customerId", "status", "location", "destination"];

    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("customerId", FieldValue::Int(self.customer_id)),
            ("status", FieldValue::Flag(self.status)),
            ("location", FieldValue::Text(&self.location)),
            ("destination", FieldValue::Text(&self.destination)),
        ]
    }
}
