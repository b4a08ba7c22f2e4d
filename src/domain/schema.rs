// src/domain/schema.rs
use crate::domain::document::{Document, FieldName};
use crate::domain::errors::{DomainError, DomainResult};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    String,
    Number,
    Boolean,
    Any,
}

impl AttributeKind {
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (AttributeKind::Any, _) => true,
            (AttributeKind::String, Value::String(_)) => true,
            (AttributeKind::Number, Value::Number(_)) => true,
            (AttributeKind::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub kind: AttributeKind,
    pub required: bool,
    pub indexed: bool,
    pub unique: bool,
}

impl AttributeSpec {
    pub fn of(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            indexed: false,
            unique: false,
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeKind::String)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Indexed and unique among non-empty values.
    pub fn unique(mut self) -> Self {
        self.indexed = true;
        self.unique = true;
        self
    }
}

/// Attribute layout of one collection, fixed once the model is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    collection: FieldName,
    attributes: Vec<(FieldName, AttributeSpec)>,
}

impl Schema {
    pub fn new(collection: FieldName) -> Self {
        Self {
            collection,
            attributes: Vec::new(),
        }
    }

    /// Builder form of [`Schema::declare_attribute`].
    pub fn attribute(mut self, name: FieldName, spec: AttributeSpec) -> DomainResult<Self> {
        self.declare_attribute(name, spec)?;
        Ok(self)
    }

    pub fn collection(&self) -> &FieldName {
        &self.collection
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(n, _)| n.as_str() == name)
    }

    pub fn attribute_spec(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, spec)| spec)
    }

    pub fn declare_attribute(&mut self, name: FieldName, spec: AttributeSpec) -> DomainResult<()> {
        if self.has_attribute(name.as_str()) {
            return Err(DomainError::Conflict(format!(
                "attribute {name} already declared on {}",
                self.collection
            )));
        }
        self.attributes.push((name, spec));
        Ok(())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&FieldName, &AttributeSpec)> {
        self.attributes.iter().map(|(n, s)| (n, s))
    }

    pub fn unique_attributes(&self) -> impl Iterator<Item = &FieldName> {
        self.attributes
            .iter()
            .filter(|(_, spec)| spec.unique)
            .map(|(n, _)| n)
    }

    /// Rejects undeclared attributes, missing required ones and type mismatches.
    pub fn validate(&self, document: &Document) -> DomainResult<()> {
        for (key, value) in document.fields() {
            let spec = self.attribute_spec(key).ok_or_else(|| {
                DomainError::Validation(format!(
                    "attribute {key} is not declared on {}",
                    self.collection
                ))
            })?;
            if !spec.kind.accepts(value) {
                return Err(DomainError::Validation(format!(
                    "attribute {key} expects {:?}",
                    spec.kind
                )));
            }
        }

        for (name, spec) in &self.attributes {
            let present = document.get(name.as_str()).is_some_and(|v| !v.is_null());
            if spec.required && !present {
                return Err(DomainError::Validation(format!(
                    "attribute {name} is required"
                )));
            }
        }

        Ok(())
    }
}
