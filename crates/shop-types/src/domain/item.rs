use serde::{Deserialize, Serialize};

use super::record::{FieldValue, Record};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub amount: i64,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cost: f64, amount: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            cost,
            amount,
        }
    }
}

impl Record for Item {
    const FIELDS: &'static [&'static str] = &["id", "name", "description", "cost", "amount"];

    fn field_values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("name", FieldValue::Text(&self.name)),
            ("description", FieldValue::Text(&self.description)),
            ("cost", FieldValue::Decimal(self.cost)),
            ("amount", FieldValue::Int(self.amount)),
        ]
    }
}
