//! Named-column audit table
//!
//! Rows are stored column-wise. Every column has the same length and
//! columns keep their insertion order; replacing a column keeps its slot.

use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column names used across the audit.
pub mod columns {
    pub const USER_ID: &str = "UserID";
    pub const TEST_GROUP: &str = "Test_Group";
    pub const PLATFORM_GOAL_ACHIEVED: &str = "Platform_Goal_Achieved";
    pub const USER_COMPREHENSION_SCORE: &str = "User_Comprehension_Score";
    pub const OPT_OUT_DIFFICULTY_SCORE: &str = "OptOut_Difficulty_Score";
    pub const URGENCY_MESSAGING_SCORE: &str = "Urgency_Messaging_Score";
    pub const NAD_SCORE: &str = "NAD_Score";
    pub const NAD_SCORE_NORMALIZED: &str = "NAD_Score_Normalized";
}

/// A/B test arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestGroup {
    /// Control
    A,
    /// Nudge variant
    B,
}

impl TestGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestGroup::A => "A",
            TestGroup::B => "B",
        }
    }
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed column storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values as f64, `None` for text columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Int(v) => Some(v.iter().map(|&x| x as f64).collect()),
            Column::Float(v) => Some(v.clone()),
            Column::Text(_) => None,
        }
    }
}

/// In-memory audit table with named, row-uniform columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditFrame {
    columns: Vec<(String, Column)>,
    rows: usize,
}

impl AuditFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Add a column, or overwrite it in place if the name already exists.
    ///
    /// The first column fixes the row count; later ones must match it.
    pub fn insert(&mut self, name: &str, column: Column) -> Result<(), AuditError> {
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(AuditError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows,
                actual: column.len(),
            });
        }
        self.rows = column.len();

        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = column,
            None => self.columns.push((name.to_string(), column)),
        }
        Ok(())
    }

    /// Builder form of `insert`.
    pub fn with_column(mut self, name: &str, column: Column) -> Result<Self, AuditError> {
        self.insert(name, column)?;
        Ok(self)
    }

    /// Drop a column, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Column> {
        let pos = self.columns.iter().position(|(n, _)| n == name)?;
        let (_, column) = self.columns.remove(pos);
        if self.columns.is_empty() {
            self.rows = 0;
        }
        Some(column)
    }

    pub fn column(&self, name: &str) -> Result<&Column, AuditError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| AuditError::missing_column(name))
    }

    pub fn ints(&self, name: &str) -> Result<&[i64], AuditError> {
        match self.column(name)? {
            Column::Int(v) => Ok(v),
            _ => Err(wrong_type(name, "integer")),
        }
    }

    pub fn floats(&self, name: &str) -> Result<&[f64], AuditError> {
        match self.column(name)? {
            Column::Float(v) => Ok(v),
            _ => Err(wrong_type(name, "float")),
        }
    }

    pub fn texts(&self, name: &str) -> Result<&[String], AuditError> {
        match self.column(name)? {
            Column::Text(v) => Ok(v),
            _ => Err(wrong_type(name, "text")),
        }
    }

    /// Any numeric column widened to f64.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, AuditError> {
        self.column(name)?
            .to_f64()
            .ok_or_else(|| wrong_type(name, "numeric"))
    }

    /// Row indices per distinct value of a text column, keys sorted.
    pub fn group_indices(&self, key: &str) -> Result<BTreeMap<String, Vec<usize>>, AuditError> {
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, value) in self.texts(key)?.iter().enumerate() {
            groups.entry(value.clone()).or_default().push(i);
        }
        Ok(groups)
    }

    /// Mean of a numeric column per distinct value of `key`.
    pub fn group_mean(&self, key: &str, value: &str) -> Result<BTreeMap<String, f64>, AuditError> {
        let values = self.numeric(value)?;
        let groups = self.group_indices(key)?;

        Ok(groups
            .into_iter()
            .map(|(group, idx)| {
                let sum: f64 = idx.iter().map(|&i| values[i]).sum();
                (group, sum / idx.len() as f64)
            })
            .collect())
    }
}

fn wrong_type(column: &str, expected: &'static str) -> AuditError {
    AuditError::ColumnType {
        column: column.to_string(),
        expected,
    }
}
