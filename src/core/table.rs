//! Row-oriented tables decoded from provider responses.
//!
//! Both providers hand back record sets with loosely typed columns, so cells
//! are kept as [`serde_json::Value`] and `Value::Null` marks a missing cell.
//! The operations here are the small relational toolkit the join pipelines
//! need: projection, renaming, concatenation and key-based left joins.

use std::collections::HashMap;
use std::io::Write;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::{FeedError, Result};


/// An ordered set of named columns and the rows that fill them.
///
/// Every row has exactly one cell per column. The default table has no
/// columns and no rows and is the identity for [`Table::append`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from column names and rows. Short rows are padded with
    /// nulls and long rows are truncated to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table from JSON objects. Column order follows the first
    /// appearance of each key; keys absent from a record become nulls.
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for record in &records {
            for key in record.keys() {
                if !positions.contains_key(key) {
                    positions.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let mut row = vec![Value::Null; columns.len()];
                for (key, value) in record {
                    row[positions[&key]] = value;
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[col]).collect())
    }

    /// Project onto `names` in the given order. A requested column the table
    /// does not carry comes back filled with nulls, so the output schema does
    /// not depend on what a provider happened to return.
    pub fn select(&self, names: &[&str]) -> Table {
        let picks: Vec<Option<usize>> = names.iter().map(|n| self.column_index(n)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                picks
                    .iter()
                    .map(|p| p.map(|i| row[i].clone()).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        }
    }

    /// Remove the named columns; names the table lacks are ignored.
    pub fn drop(self, names: &[&str]) -> Table {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        if keep.len() == self.columns.len() {
            return self;
        }

        let columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table { columns, rows }
    }

    /// Rename columns through an explicit `(old, new)` mapping.
    pub fn rename(mut self, mapping: &[(&str, &str)]) -> Table {
        for column in self.columns.iter_mut() {
            if let Some((_, new)) = mapping.iter().find(|(old, _)| old == column) {
                *column = new.to_string();
            }
        }
        self
    }

    /// Set every row of `name` to `value`, adding the column if needed.
    pub fn with_constant(mut self, name: &str, value: Value) -> Table {
        match self.column_index(name) {
            Some(col) => {
                for row in self.rows.iter_mut() {
                    row[col] = value.clone();
                }
            }
            None => {
                self.columns.push(name.to_string());
                for row in self.rows.iter_mut() {
                    row.push(value.clone());
                }
            }
        }
        self
    }

    /// Append `other` below this table. Columns are unioned (new ones go to
    /// the right) and cells a side does not have are null.
    pub fn append(&mut self, other: Table) {
        if other.columns.is_empty() {
            return;
        }
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }

        for column in &other.columns {
            if !self.has_column(column) {
                self.columns.push(column.clone());
                for row in self.rows.iter_mut() {
                    row.push(Value::Null);
                }
            }
        }

        let targets: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();
        let width = self.columns.len();
        for row in other.rows {
            let mut out = vec![Value::Null; width];
            for (value, &target) in row.into_iter().zip(&targets) {
                out[target] = value;
            }
            self.rows.push(out);
        }
    }

    /// Stack tables in iteration order.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let mut out = Table::default();
        for table in tables {
            out.append(table);
        }
        out
    }

    /// Left join on identically named key columns.
    pub fn left_join_on(&self, right: &Table, on: &[&str], suffix: &str) -> Table {
        self.left_join(right, on, on, suffix)
    }

    /// Left join anchored on `self`.
    ///
    /// Every left row survives; a row without a match gets nulls in the
    /// right-hand columns. Right key columns are not carried over. A
    /// right-hand column whose name is already taken is renamed with `suffix`
    /// appended, then a counter if that is taken too; left names never change. Rows with a null key
    /// cell never match. If a key matches several right rows the left row is
    /// repeated once per match and a warning is logged.
    pub fn left_join(
        &self,
        right: &Table,
        left_on: &[&str],
        right_on: &[&str],
        suffix: &str,
    ) -> Table {
        let left_keys: Vec<Option<usize>> = left_on.iter().map(|c| self.column_index(c)).collect();
        let right_keys: Vec<Option<usize>> =
            right_on.iter().map(|c| right.column_index(c)).collect();

        let payload: Vec<usize> = (0..right.columns.len())
            .filter(|&i| !right_on.contains(&right.columns[i].as_str()))
            .collect();

        let mut columns = self.columns.clone();
        for &i in &payload {
            let name = unique_name(&columns, &right.columns[i], suffix);
            columns.push(name);
        }

        let mut index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
        for (r, row) in right.rows.iter().enumerate() {
            if let Some(key) = row_key(row, &right_keys) {
                index.entry(key).or_default().push(r);
            }
        }

        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            match row_key(row, &left_keys).and_then(|k| index.get(&k)) {
                Some(hits) => {
                    for &r in hits {
                        let mut out = row.clone();
                        out.extend(payload.iter().map(|&i| right.rows[r][i].clone()));
                        rows.push(out);
                    }
                }
                None => {
                    let mut out = row.clone();
                    out.extend(payload.iter().map(|_| Value::Null));
                    rows.push(out);
                }
            }
        }

        if rows.len() > self.rows.len() {
            warn!(
                keys = ?right_on,
                before = self.rows.len(),
                after = rows.len(),
                "left join fanned out: right side has duplicate keys"
            );
        }

        Table { columns, rows }
    }

    /// Write the table as CSV with a header row. Nulls are empty fields.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        out.write_record(&self.columns)?;
        for row in &self.rows {
            out.write_record(row.iter().map(render_cell))?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&Record {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct Record<'a> {
    columns: &'a [String],
    row: &'a [Value],
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in self.columns.iter().zip(self.row) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// `name`, or `name{suffix}`, or `name{suffix}2`, ... whichever is free.
fn unique_name(taken: &[String], name: &str, suffix: &str) -> String {
    let is_free = |candidate: &str| !taken.iter().any(|c| c == candidate);
    if is_free(name) {
        return name.to_string();
    }
    let suffixed = format!("{name}{suffix}");
    if is_free(&suffixed) {
        return suffixed;
    }
    (2..)
        .map(|n| format!("{suffixed}{n}"))
        .find(|candidate| is_free(candidate))
        .unwrap_or(suffixed)
}

fn row_key(row: &[Value], keys: &[Option<usize>]) -> Option<Vec<String>> {
    keys.iter()
        .map(|k| k.and_then(|i| key_part(&row[i])))
        .collect()
}

/// Canonical text for a key cell so `2021`, `2021.0` and `"2021"` all meet.
fn key_part(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(i.to_string()),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => Some((f as i64).to_string()),
            _ => Some(n.to_string()),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<Number>().ok() {
                Some(n) => key_part(&Value::Number(n)),
                None => Some(s.to_string()),
            }
        }
        other => Some(other.to_string()),
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a JSON response body into a table.
///
/// Accepts an array of records, a lone record, or a single `data` field
/// wrapping either of those. `null` or an empty array decode to an empty
/// table.
pub fn decode_json_table(body: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(body)?;
    table_from_json(value)
}

fn table_from_json(value: Value) -> Result<Table> {
    match value {
        Value::Null => Ok(Table::default()),
        Value::Array(items) => records_from_items(items),
        Value::Object(mut map) => {
            if map.len() == 1 && map.contains_key("data") {
                match map.remove("data") {
                    Some(Value::Object(record)) => Ok(Table::from_records(vec![record])),
                    Some(Value::Array(items)) => records_from_items(items),
                    Some(Value::Null) | None => Ok(Table::default()),
                    Some(other) => Err(FeedError::Decode {
                        message: format!("unexpected data wrapper content: {other}"),
                    }),
                }
            } else {
                Ok(Table::from_records(vec![map]))
            }
        }
        other => Err(FeedError::Decode {
            message: format!("expected records, got {other}"),
        }),
    }
}

fn records_from_items(items: Vec<Value>) -> Result<Table> {
    let records = items
        .into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            other => Err(FeedError::Decode {
                message: format!("expected a record, got {other}"),
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Table::from_records(records))
}

/// Decode a delimited text body with a header row.
///
/// Short rows are padded with nulls and empty trailing fields are ignored. A
/// row with extra non-empty fields is a [`FeedError::Decode`].
pub fn decode_csv_table(body: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Ok(Table::default());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().skip(columns.len()).any(|field| !field.is_empty()) {
            let line = record.position().map_or(0, |p| p.line());
            return Err(FeedError::Decode {
                message: format!(
                    "expected {} fields on line {}, saw {}",
                    columns.len(),
                    line,
                    record.len()
                ),
            });
        }
        rows.push(record.iter().take(columns.len()).map(infer_cell).collect());
    }

    Ok(Table::new(columns, rows))
}

/// Type a CSV field: empty is null, then integer, then float, else text.
fn infer_cell(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = field.parse::<f64>() {
        return Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null);
    }
    Value::String(field.to_string())
}
