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

//! a minimal in-memory view onto one attribute csv, read back for
//! post-run analysis. `thuner_attr::table::AttributeTable` accumulates
//! rows during a run and never needs to read its own output back; this
//! is the complementary read path the analysis stage needs instead,
//! grounded on `original_source/thuner/attribute/utils.py::read_attribute_csv`.

use std::path::Path;

use crate::errors::{AnalysisError, Result};

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn csv_error(path: &Path, source: csv::Error) -> AnalysisError {
    AnalysisError::Csv { path: path.display().to_string(), source }
}

impl Table {
    pub fn read_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path).map_err(|e| csv_error(path, e))?;
        let headers = reader.headers().map_err(|e| csv_error(path, e))?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| csv_error(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Table { headers, rows })
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path).map_err(|e| csv_error(path, e))?;
        writer.write_record(&self.headers).map_err(|e| csv_error(path, e))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| csv_error(path, e))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn column_index(&self, path: &Path, name: &str) -> Result<usize> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| AnalysisError::MissingColumn { path: path.display().to_string(), column: name.to_string() })
    }

    pub fn column_str<'a>(&'a self, index: usize) -> Vec<&'a str> {
        self.rows.iter().map(|row| row.get(index).map(String::as_str).unwrap_or("")).collect()
    }

    /// parses a column as `f64`; an empty cell (an unmatched record's
    /// still-`NA` attribute) is `None` rather than an error.
    pub fn column_f64(&self, path: &Path, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self.column_index(path, name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let cell = row.get(index).map(String::as_str).unwrap_or("");
                if cell.is_empty() {
                    Ok(None)
                } else {
                    cell.parse::<f64>().map(Some).map_err(|_| AnalysisError::ParseFloat {
                        path: path.display().to_string(),
                        column: name.to_string(),
                        row: row_index,
                        value: cell.to_string(),
                    })
                }
            })
            .collect()
    }

    pub fn column_u64(&self, path: &Path, name: &str) -> Result<Vec<u64>> {
        let index = self.column_index(path, name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let cell = row.get(index).map(String::as_str).unwrap_or("");
                cell.parse::<u64>().map_err(|_| AnalysisError::ParseFloat {
                    path: path.display().to_string(),
                    column: name.to_string(),
                    row: row_index,
                    value: cell.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_writes_round_trip() {
        let root = std::env::temp_dir().join(format!("thuner_analysis_table_test_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let path = root.join("core.csv");
        std::fs::write(&path, "time,universal_id,area\n2020-01-01T00:00:00Z,1,12.5\n2020-01-01T00:10:00Z,1,\n").unwrap();

        let table = Table::read_csv(&path).unwrap();
        assert_eq!(table.headers, vec!["time", "universal_id", "area"]);
        let area = table.column_f64(&path, "area").unwrap();
        assert_eq!(area, vec![Some(12.5), None]);
        let ids = table.column_u64(&path, "universal_id").unwrap();
        assert_eq!(ids, vec![1, 1]);

        let destination = root.join("copy.csv");
        table.write_csv(&destination).unwrap();
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), std::fs::read_to_string(&path).unwrap());

        std::fs::remove_dir_all(&root).ok();
    }
}
