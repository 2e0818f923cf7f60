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

//! periodic flush of an `AttributeTable` to `attributes/<object>[/<member>]/<type>.csv`
//! plus a `.yml` metadata sidecar recording each column's units and
//! description - the split `original_source/thuner/write/write.py` makes
//! between the numeric payload and its human-readable schema. A transient
//! write failure (the recoverable I/O case from the top-level error
//! taxonomy) is retried once before giving up.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use serde::Serialize;

use thuner_paths::Paths;

use crate::errors::{AttrError, Result};
use crate::table::AttributeTable;

#[derive(Debug, Serialize)]
struct ColumnMetadata {
    name: String,
    data_type: String,
    units: Option<String>,
    description: String,
}

#[derive(Debug, Serialize)]
struct TableMetadata {
    attribute_type: String,
    columns: Vec<ColumnMetadata>,
}

/// appends `table`'s accumulated rows to its csv file (writing a header
/// first if the file is new), refreshes the `.yml` sidecar, then clears
/// the in-memory table - the "flush" half of the write-interval policy.
/// `table` is not cleared on an error, so the caller can retry later
/// without having lost the accumulated rows.
pub fn flush(paths: &Paths, object: &str, member: Option<&str>, table: &mut AttributeTable) -> Result<()> {
    let csv_path = paths.attribute_table_path(object, member, &table.attribute_type.name);
    let yml_path = paths.attribute_metadata_path(object, member, &table.attribute_type.name);

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| AttrError::Io { path: parent.display().to_string(), source })?;
    }

    write_csv_with_retry(&csv_path, table)?;
    write_metadata(&yml_path, table)?;
    table.clear();
    Ok(())
}

fn write_csv_with_retry(path: &Path, table: &AttributeTable) -> Result<()> {
    match write_csv(path, table) {
        Ok(()) => Ok(()),
        Err(_first) => write_csv(path, table).map_err(|source| AttrError::FlushRetriesExhausted { path: path.display().to_string(), source }),
    }
}

fn write_csv(path: &Path, table: &AttributeTable) -> std::io::Result<()> {
    let needs_header = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    if needs_header {
        writer.write_record(table.column_names())?;
    }
    for row in table.render_rows() {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_metadata(path: &Path, table: &AttributeTable) -> Result<()> {
    let columns = table
        .attribute_type
        .columns()
        .iter()
        .map(|attribute| ColumnMetadata {
            name: attribute.name.clone(),
            data_type: format!("{:?}", attribute.data_type),
            units: attribute.units.clone(),
            description: attribute.description.clone(),
        })
        .collect();
    let metadata = TableMetadata { attribute_type: table.attribute_type.name.clone(), columns };
    let text = serde_yaml::to_string(&metadata).map_err(|source| AttrError::Yaml { path: path.display().to_string(), source })?;
    let mut file = std::fs::File::create(path).map_err(|source| AttrError::Io { path: path.display().to_string(), source })?;
    file.write_all(text.as_bytes()).map_err(|source| AttrError::Io { path: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Attribute, AttributeDataType, AttributeEntry, AttributeType};
    use crate::retrieve::{RetrievalKind, Value};

    fn sample_type() -> AttributeType {
        AttributeType {
            name: "core".to_string(),
            entries: vec![AttributeEntry::Single(Attribute {
                name: "id".to_string(),
                data_type: AttributeDataType::Int,
                precision: None,
                units: None,
                description: "object id".to_string(),
                retrieval: RetrievalKind::Id,
            })],
            member: None,
        }
    }

    #[test]
    fn flush_writes_header_once_and_appends_on_subsequent_calls() {
        let root = std::env::temp_dir().join(format!("thuner_attr_flush_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let paths = Paths::new(&root);

        let mut table = AttributeTable::new(sample_type());
        table.push_row(vec![Value::Int(1)]).unwrap();
        flush(&paths, "cell", None, &mut table).unwrap();
        assert_eq!(table.row_count(), 0);

        table.push_row(vec![Value::Int(2)]).unwrap();
        flush(&paths, "cell", None, &mut table).unwrap();

        let csv_path = paths.attribute_table_path("cell", None, "core");
        let contents = std::fs::read_to_string(csv_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["id", "1", "2"]);

        let yml_path = paths.attribute_metadata_path("cell", None, "core");
        assert!(yml_path.exists());

        std::fs::remove_dir_all(&root).ok();
    }
}
