//! Per-leaf descriptor carrying everything a column chunk reader/writer
//! needs: its path in the schema, its physical type, and its derived
//! def/rep level ceilings.

use crate::types::{LogicalType, PhysicalType};

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    path: Vec<String>,
    physical_type: PhysicalType,
    logical_type: Option<LogicalType>,
    max_def_level: i16,
    max_rep_level: i16,
}

impl ColumnDescriptor {
    pub fn new(
        path: Vec<String>,
        physical_type: PhysicalType,
        logical_type: Option<LogicalType>,
        max_def_level: i16,
        max_rep_level: i16,
    ) -> Self {
        Self {
            path,
            physical_type,
            logical_type,
            max_def_level,
            max_rep_level,
        }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    pub fn physical_type(&self) -> PhysicalType {
        self.physical_type
    }

    pub fn logical_type(&self) -> Option<LogicalType> {
        self.logical_type
    }

    pub fn max_def_level(&self) -> i16 {
        self.max_def_level
    }

    pub fn max_rep_level(&self) -> i16 {
        self.max_rep_level
    }
}
