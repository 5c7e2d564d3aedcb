//! Fallible builders for the group field variants, mirroring the
//! imperative, error-returning construction style this lineage uses for
//! schema assembly instead of a declarative macro or derive.

use super::field::{Field, Repetition};
use crate::error::{Error, Result};

/// Builds a `Field::List`, which has exactly one item slot.
pub struct ListBuilder {
    name: String,
    repetition: Repetition,
    item: Option<Field>,
}

impl ListBuilder {
    pub fn new(name: &str, repetition: Repetition) -> Self {
        Self {
            name: name.to_string(),
            repetition,
            item: None,
        }
    }

    /// Assigns the list's item field. Errors if called twice.
    pub fn item(&mut self, item: Field) -> Result<&mut Self> {
        if self.item.is_some() {
            return Err(malformed_schema_err(&self.name, "item"));
        }
        self.item = Some(item);
        Ok(self)
    }

    pub fn build(self) -> Result<Field> {
        let item = self
            .item
            .ok_or_else(|| Error::SchemaAssignConflict(format!("list '{}' has no item", self.name)))?;
        Ok(Field::List {
            name: self.name,
            repetition: self.repetition,
            item: Box::new(item),
        })
    }
}

/// Builds a `Field::Map`, which has exactly one key slot and one value slot.
pub struct MapBuilder {
    name: String,
    repetition: Repetition,
    key: Option<Field>,
    value: Option<Field>,
}

impl MapBuilder {
    pub fn new(name: &str, repetition: Repetition) -> Self {
        Self {
            name: name.to_string(),
            repetition,
            key: None,
            value: None,
        }
    }

    pub fn key(&mut self, key: Field) -> Result<&mut Self> {
        if self.key.is_some() {
            return Err(malformed_schema_err(&self.name, "key"));
        }
        self.key = Some(key);
        Ok(self)
    }

    pub fn value(&mut self, value: Field) -> Result<&mut Self> {
        if self.value.is_some() {
            return Err(malformed_schema_err(&self.name, "value"));
        }
        self.value = Some(value);
        Ok(self)
    }

    pub fn build(self) -> Result<Field> {
        let key = self
            .key
            .ok_or_else(|| Error::SchemaAssignConflict(format!("map '{}' has no key", self.name)))?;
        let value = self
            .value
            .ok_or_else(|| Error::SchemaAssignConflict(format!("map '{}' has no value", self.name)))?;
        Ok(Field::Map {
            name: self.name,
            repetition: self.repetition,
            key: Box::new(key),
            value: Box::new(value),
        })
    }
}

/// Builds a `Field::Struct`, which has any number of uniquely-named children.
pub struct StructBuilder {
    name: String,
    repetition: Repetition,
    children: Vec<Field>,
}

impl StructBuilder {
    pub fn new(name: &str, repetition: Repetition) -> Self {
        Self {
            name: name.to_string(),
            repetition,
            children: Vec::new(),
        }
    }

    /// Appends a child field. Errors if a child with the same name was
    /// already added.
    pub fn child(&mut self, child: Field) -> Result<&mut Self> {
        if self.children.iter().any(|c| c.name() == child.name()) {
            return Err(Error::SchemaAssignConflict(format!(
                "struct '{}' already has a child named '{}'",
                self.name,
                child.name()
            )));
        }
        self.children.push(child);
        Ok(self)
    }

    pub fn build(self) -> Result<Field> {
        if self.children.is_empty() {
            return Err(Error::SchemaAssignConflict(format!(
                "struct '{}' has no children",
                self.name
            )));
        }
        Ok(Field::Struct {
            name: self.name,
            repetition: self.repetition,
            children: self.children,
        })
    }
}

fn malformed_schema_err(name: &str, slot: &str) -> Error {
    Error::SchemaAssignConflict(format!("'{}' already has a {} assigned", name, slot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::data;
    use crate::types::PhysicalType;

    #[test]
    fn list_rejects_second_item() {
        let mut b = ListBuilder::new("items", Repetition::Repeated);
        b.item(data("item", Repetition::Required, PhysicalType::Int32))
            .unwrap();
        let err = b
            .item(data("item2", Repetition::Required, PhysicalType::Int32))
            .unwrap_err();
        assert!(matches!(err, Error::SchemaAssignConflict(_)));
    }

    #[test]
    fn struct_rejects_duplicate_child_name() {
        let mut b = StructBuilder::new("s", Repetition::Required);
        b.child(data("a", Repetition::Required, PhysicalType::Int32))
            .unwrap();
        let err = b
            .child(data("a", Repetition::Optional, PhysicalType::Int64))
            .unwrap_err();
        assert!(matches!(err, Error::SchemaAssignConflict(_)));
    }

    #[test]
    fn map_requires_both_key_and_value() {
        let mut b = MapBuilder::new("m", Repetition::Repeated);
        b.key(data("key", Repetition::Required, PhysicalType::ByteArray))
            .unwrap();
        assert!(b.build().is_err());
    }
}
