/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The "ODIN" software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! an in-memory columnar table for one attribute type, accumulating rows
//! between flushes. `original_source/thuner/attribute/attribute.py` keeps
//! attributes as a dict-of-lists with duck-typed elements; here each
//! column is one variant of `ColumnBuffer` fixed at construction from the
//! declared `AttributeDataType`, so a retrieval producing the wrong shape
//! of value is a panic at append time rather than a silently-ragged csv
//! column discovered on read-back.

use crate::errors::{AttrError, Result};
use crate::options::{AttributeDataType, AttributeType};
use crate::retrieve::Value;

#[derive(Debug, Clone)]
pub enum ColumnBuffer {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
}

impl ColumnBuffer {
    fn new(data_type: AttributeDataType) -> Self {
        match data_type {
            AttributeDataType::Int => ColumnBuffer::Int(Vec::new()),
            AttributeDataType::Float => ColumnBuffer::Float(Vec::new()),
            AttributeDataType::String | AttributeDataType::Datetime => ColumnBuffer::Str(Vec::new()),
        }
    }

    fn push(&mut self, value: Value) {
        match (self, value) {
            (ColumnBuffer::Int(col), Value::Int(v)) => col.push(Some(v)),
            (ColumnBuffer::Int(col), Value::Null) => col.push(None),
            (ColumnBuffer::Float(col), Value::Float(v)) => col.push(Some(v)),
            (ColumnBuffer::Float(col), Value::Null) => col.push(None),
            (ColumnBuffer::Str(col), Value::Str(v)) => col.push(Some(v)),
            (ColumnBuffer::Str(col), Value::Null) => col.push(None),
            (col, value) => panic!("retrieved value {value:?} does not match column type {col:?}"),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnBuffer::Int(c) => c.len(),
            ColumnBuffer::Float(c) => c.len(),
            ColumnBuffer::Str(c) => c.len(),
        }
    }

    fn clear(&mut self) {
        match self {
            ColumnBuffer::Int(c) => c.clear(),
            ColumnBuffer::Float(c) => c.clear(),
            ColumnBuffer::Str(c) => c.clear(),
        }
    }

    /// string form of row `i`, `""` standing in for csv's conventional NA.
    fn render(&self, i: usize, precision: Option<u8>) -> String {
        match self {
            ColumnBuffer::Int(c) => c[i].map(|v| v.to_string()).unwrap_or_default(),
            ColumnBuffer::Float(c) => c[i]
                .map(|v| match precision {
                    Some(p) => format!("{:.*}", p as usize, v),
                    None => v.to_string(),
                })
                .unwrap_or_default(),
            ColumnBuffer::Str(c) => c[i].clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttributeTable {
    pub attribute_type: AttributeType,
    columns: Vec<(String, ColumnBuffer)>,
}

impl AttributeTable {
    pub fn new(attribute_type: AttributeType) -> Self {
        let columns = attribute_type
            .columns()
            .iter()
            .map(|attribute| (attribute.name.clone(), ColumnBuffer::new(attribute.data_type)))
            .collect();
        AttributeTable { attribute_type, columns }
    }

    pub fn column_names(&self) -> Vec<&str> { self.columns.iter().map(|(name, _)| name.as_str()).collect() }

    pub fn row_count(&self) -> usize { self.columns.first().map(|(_, col)| col.len()).unwrap_or(0) }

    /// appends one row. `values` must align 1:1 with `column_names()`, as
    /// produced by concatenating `retrieve::dispatch` over the attribute
    /// type's entries in order.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(AttrError::RowCountMismatch {
                name: self.attribute_type.name.clone(),
                got: values.len(),
                expected: self.columns.len(),
            });
        }
        for ((_, col), value) in self.columns.iter_mut().zip(values) {
            col.push(value);
        }
        Ok(())
    }

    /// header row followed by one rendered row per record, precision
    /// applied per the declaring `Attribute`.
    pub fn render_rows(&self) -> Vec<Vec<String>> {
        let precisions: Vec<Option<u8>> = self.attribute_type.columns().iter().map(|a| a.precision).collect();
        let n = self.row_count();
        (0..n)
            .map(|i| self.columns.iter().zip(&precisions).map(|((_, col), precision)| col.render(i, *precision)).collect())
            .collect()
    }

    pub fn clear(&mut self) {
        for (_, col) in &mut self.columns {
            col.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Attribute, AttributeEntry};
    use crate::retrieve::RetrievalKind;

    fn sample_type() -> AttributeType {
        AttributeType {
            name: "core".to_string(),
            entries: vec![
                AttributeEntry::Single(Attribute {
                    name: "id".to_string(),
                    data_type: AttributeDataType::Int,
                    precision: None,
                    units: None,
                    description: "object id".to_string(),
                    retrieval: RetrievalKind::Id,
                }),
                AttributeEntry::Single(Attribute {
                    name: "area".to_string(),
                    data_type: AttributeDataType::Float,
                    precision: Some(1),
                    units: Some("km^2".to_string()),
                    description: "object area".to_string(),
                    retrieval: RetrievalKind::AreaKm2,
                }),
            ],
            member: None,
        }
    }

    #[test]
    fn push_row_and_render_round_trip() {
        let mut table = AttributeTable::new(sample_type());
        table.push_row(vec![Value::Int(3), Value::Float(12.345)]).unwrap();
        table.push_row(vec![Value::Int(4), Value::Null]).unwrap();
        assert_eq!(table.row_count(), 2);
        let rows = table.render_rows();
        assert_eq!(rows[0], vec!["3".to_string(), "12.3".to_string()]);
        assert_eq!(rows[1], vec!["4".to_string(), "".to_string()]);
    }

    #[test]
    fn wrong_row_width_is_an_error() {
        let mut table = AttributeTable::new(sample_type());
        assert!(table.push_row(vec![Value::Int(3)]).is_err());
    }

    #[test]
    fn clear_resets_row_count() {
        let mut table = AttributeTable::new(sample_type());
        table.push_row(vec![Value::Int(1), Value::Float(1.0)]).unwrap();
        table.clear();
        assert_eq!(table.row_count(), 0);
    }
}
