//! Schema model: the typed tree of fields a Parquet file's columns are
//! described by, plus the descriptors derived from it for each leaf.

mod builder;
mod descriptor;
mod field;

pub use builder::{ListBuilder, MapBuilder, StructBuilder};
pub use descriptor::ColumnDescriptor;
pub use field::{Field, Repetition};

use crate::error::Result;
use crate::types::{LogicalType, PhysicalType};

/// A fully built schema: the field tree plus the flattened, order-stable
/// list of leaf descriptors used to drive column chunk reads and writes.
#[derive(Debug, Clone)]
pub struct Schema {
    root: Field,
    leaves: Vec<ColumnDescriptor>,
}

impl Schema {
    /// Builds a `Schema` from a root struct field, computing `maxDefLevel`
    /// and `maxRepLevel` for every leaf in one top-down pass.
    pub fn new(root: Field) -> Result<Self> {
        let mut leaves = Vec::new();
        build_tree(&root, Vec::new(), 0, 0, &mut leaves)?;
        Ok(Self { root, leaves })
    }

    pub fn root(&self) -> &Field {
        &self.root
    }

    pub fn leaves(&self) -> &[ColumnDescriptor] {
        &self.leaves
    }

    pub fn leaf(&self, index: usize) -> &ColumnDescriptor {
        &self.leaves[index]
    }
}

fn build_tree(
    field: &Field,
    mut path: Vec<String>,
    mut max_def_level: i16,
    mut max_rep_level: i16,
    leaves: &mut Vec<ColumnDescriptor>,
) -> Result<()> {
    path.push(field.name().to_string());

    match field.repetition() {
        Repetition::Optional => max_def_level += 1,
        Repetition::Repeated => {
            max_def_level += 1;
            max_rep_level += 1;
        }
        Repetition::Required => {}
    }

    match field {
        Field::Data {
            physical_type,
            logical_type,
            ..
        } => {
            leaves.push(ColumnDescriptor::new(
                path,
                *physical_type,
                *logical_type,
                max_def_level,
                max_rep_level,
            ));
        }
        Field::List { item, .. } => {
            build_tree(item, path, max_def_level, max_rep_level, leaves)?;
        }
        Field::Map { key, value, .. } => {
            build_tree(key, path.clone(), max_def_level, max_rep_level, leaves)?;
            build_tree(value, path, max_def_level, max_rep_level, leaves)?;
        }
        Field::Struct { children, .. } => {
            for child in children {
                build_tree(child, path.clone(), max_def_level, max_rep_level, leaves)?;
            }
        }
    }
    Ok(())
}

/// Convenience: a primitive leaf field with no logical annotation.
pub fn data(name: &str, repetition: Repetition, physical_type: PhysicalType) -> Field {
    Field::Data {
        name: name.to_string(),
        repetition,
        physical_type,
        logical_type: None,
        property_name: None,
    }
}

/// A primitive leaf field annotated with a logical type (date, timestamp,
/// UTF-8 text, ...).
pub fn data_annotated(
    name: &str,
    repetition: Repetition,
    physical_type: PhysicalType,
    logical_type: LogicalType,
) -> Field {
    Field::Data {
        name: name.to_string(),
        repetition,
        physical_type,
        logical_type: Some(logical_type),
        property_name: None,
    }
}
