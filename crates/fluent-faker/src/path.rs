//! Include path resolution
//!
//! An include path is a dotted chain of navigation field accesses starting at
//! the root type, e.g. `company.billing_address`. Resolution checks every
//! segment against the schema of the type reached so far and yields ordered
//! steps, outermost first. A step after a collection field resolves against
//! the collection's item type.

use std::fmt;

use crate::entity::{Entity, EntityRef, EntitySchema};
use crate::error::{FakerError, FakerResult};

/// One resolved field access
#[derive(Debug, Clone, Copy)]
pub struct PathStep {
    /// Type declaring the field
    pub owner: &'static EntitySchema,
    pub field: &'static str,
    /// Declared related type (the item type for collections)
    pub target: EntityRef,
    pub collection: bool,
}

/// A resolved include path
#[derive(Debug, Clone)]
pub struct IncludePath {
    expression: String,
    steps: Vec<PathStep>,
}

impl IncludePath {
    /// Resolve `expression` against the schema of `E`
    pub fn parse<E: Entity>(expression: &str) -> FakerResult<Self> {
        Self::resolve(E::describe(), expression)
    }

    /// Resolve `expression` against `root`
    pub fn resolve(root: &'static EntitySchema, expression: &str) -> FakerResult<Self> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(FakerError::invalid_argument(
                "path",
                "include path must not be empty",
            ));
        }

        let mut steps = Vec::new();
        let mut current = root;

        for (position, segment) in expression.split('.').enumerate() {
            if segment.is_empty() {
                return Err(FakerError::invalid_path(
                    expression,
                    format!("empty segment at position {}", position + 1),
                ));
            }
            if !is_identifier(segment) {
                return Err(FakerError::invalid_path(
                    expression,
                    format!("'{}' is not a field name", segment),
                ));
            }

            let field = current
                .field(segment)
                .ok_or_else(|| FakerError::property_not_found(current.name(), segment))?;

            let target = field.kind.navigation().ok_or_else(|| {
                FakerError::invalid_path(
                    expression,
                    format!(
                        "'{}.{}' is a {} field, not a navigation",
                        current.name(),
                        segment,
                        field.kind.label()
                    ),
                )
            })?;

            steps.push(PathStep {
                owner: current,
                field: field.name,
                target,
                collection: field.kind.is_collection(),
            });
            current = target.schema();
        }

        Ok(Self {
            expression: expression.to_string(),
            steps,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Field on the root type where this path starts
    pub fn root_field(&self) -> &'static str {
        self.steps[0].field
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: resolution rejects empty paths
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for IncludePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
