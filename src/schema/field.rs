//! The field tree's node types.

use crate::types::{LogicalType, PhysicalType};

/// Parquet's three repetition kinds, determining how def/rep levels
/// propagate down through the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Required,
    Optional,
    Repeated,
}

/// One node of the schema tree.
#[derive(Debug, Clone)]
pub enum Field {
    /// A primitive leaf column.
    Data {
        name: String,
        repetition: Repetition,
        physical_type: PhysicalType,
        /// Narrows how `physical_type`'s raw bytes should be interpreted
        /// (UTF-8 text, a date, a timestamp, ...); `None` means the
        /// physical type's own representation is the logical one.
        logical_type: Option<LogicalType>,
        /// The original field name in whatever system this schema was
        /// derived from, when it differs from `name` (e.g. a
        /// case-normalized or de-duplicated column name).
        property_name: Option<String>,
    },
    /// A repeated group wrapping a single item field (Parquet's
    /// 3-level list convention collapsed to its logical shape).
    List {
        name: String,
        repetition: Repetition,
        item: Box<Field>,
    },
    /// A repeated group of (key, value) pairs.
    Map {
        name: String,
        repetition: Repetition,
        key: Box<Field>,
        value: Box<Field>,
    },
    /// A group of named children, none of which repeats on its own.
    Struct {
        name: String,
        repetition: Repetition,
        children: Vec<Field>,
    },
}

impl Field {
    pub fn name(&self) -> &str {
        match self {
            Field::Data { name, .. } => name,
            Field::List { name, .. } => name,
            Field::Map { name, .. } => name,
            Field::Struct { name, .. } => name,
        }
    }

    pub fn repetition(&self) -> Repetition {
        match self {
            Field::Data { repetition, .. } => *repetition,
            Field::List { repetition, .. } => *repetition,
            Field::Map { repetition, .. } => *repetition,
            Field::Struct { repetition, .. } => *repetition,
        }
    }

    /// The logical annotation on a `Data` field, if any. Always `None` for
    /// group nodes (`List`/`Map`/`Struct`), which carry no physical
    /// representation of their own to annotate.
    pub fn logical_type(&self) -> Option<LogicalType> {
        match self {
            Field::Data { logical_type, .. } => *logical_type,
            _ => None,
        }
    }
}
