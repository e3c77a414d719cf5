use crate::common::Result;
use crate::errinput;
use crate::types::field::Field;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::slice::Iter;

/// A materialized tuple: an ordered list of field values, decoded from
/// whatever byte format a higher layer stores pages in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Field>,
}

impl From<Vec<Field>> for Row {
    fn from(values: Vec<Field>) -> Self {
        Row { values }
    }
}

impl From<Vec<&Field>> for Row {
    fn from(values: Vec<&Field>) -> Self {
        Row {
            values: values.into_iter().cloned().collect(),
        }
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.values.eq(&other.values)
    }
}

impl IntoIterator for Row {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl Row {
    pub fn iter(&self) -> Iter<Field> {
        self.values.iter()
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn get_field(&self, index: usize) -> Result<Field> {
        match self.values.get(index) {
            Some(field) => Ok(field.clone()),
            None => errinput!(
                "field index {index} out of range for row with {} fields",
                self.values.len()
            ),
        }
    }

    pub fn to_string(&self) -> String {
        self.values.iter().map(|field| field.to_string()).join(", ")
    }
}
