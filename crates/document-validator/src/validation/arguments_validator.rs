// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{Field, VariableDefinition},
};
use async_graphql_value::{Name, Number, Value, indexmap::IndexMap};

use schema_model::{InputValueDefinition, Schema, TypeDefinitionKind, TypeRef};

use crate::validation::validation_error::ValidationError;

use super::resolve_declared_type;

/// Validates the arguments supplied to one field, and the values inside
/// them, against the declared argument list.
pub struct ArgumentValidator<'a> {
    schema: &'a Schema,
    variable_definitions: &'a HashMap<Name, Positioned<VariableDefinition>>,
    field: &'a Positioned<Field>,
}

impl<'a> ArgumentValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        variable_definitions: &'a HashMap<Name, Positioned<VariableDefinition>>,
        field: &'a Positioned<Field>,
    ) -> Self {
        Self {
            schema,
            variable_definitions,
            field,
        }
    }

    /// Validations performed:
    /// - No argument name is supplied twice (the duplicate is reported at
    ///   its second occurrence)
    /// - Every supplied argument is declared on the field
    /// - Every supplied value type-checks against the declared type
    pub(super) fn validate(
        &self,
        argument_definitions: &[InputValueDefinition],
    ) -> Result<IndexMap<String, Value>, ValidationError> {
        self.validate_arguments(argument_definitions, &self.field.node.arguments)
    }

    /// Shared between field arguments and input-object literals: an
    /// input-object's entries are checked against its input-field list with
    /// the same rules.
    fn validate_arguments(
        &self,
        argument_definitions: &[InputValueDefinition],
        arguments: &[(Positioned<Name>, Positioned<Value>)],
    ) -> Result<IndexMap<String, Value>, ValidationError> {
        let field_name = self.field.node.name.node.as_str();

        let mut validated = IndexMap::new();
        for (name, value) in arguments {
            if validated.contains_key(name.node.as_str()) {
                return Err(ValidationError::DuplicateArgument(
                    name.node.to_string(),
                    name.pos,
                ));
            }

            let argument_definition = argument_definitions
                .iter()
                .find(|def| def.name == name.node.as_str())
                .ok_or_else(|| {
                    ValidationError::StrayArgument(
                        name.node.to_string(),
                        field_name.to_string(),
                        name.pos,
                    )
                })?;

            self.validate_value(value, &argument_definition.ty)?;
            validated.insert(name.node.to_string(), value.node.clone());
        }

        Ok(validated)
    }

    /// The value checker: dispatches on the value variant against the
    /// expected type reference.
    ///
    /// Non-null literals satisfy a `NON_NULL` expectation by checking
    /// against the wrapped type; `null` and variable references see the full
    /// expected type, so nullability is enforced where it matters.
    fn validate_value(
        &self,
        value: &Positioned<Value>,
        expected: &TypeRef,
    ) -> Result<(), ValidationError> {
        match &value.node {
            Value::Variable(name) => self.validate_variable_value(name, expected, value.pos),
            Value::Null => self.validate_null_value(expected, value.pos),
            Value::Number(number) => self.validate_number_value(number, expected, value.pos),
            Value::String(_) => {
                self.validate_builtin_scalar_value("String", "string literal", expected, value.pos)
            }
            Value::Boolean(_) => self.validate_builtin_scalar_value(
                "Boolean",
                "boolean literal",
                expected,
                value.pos,
            ),
            Value::Enum(_) => self.validate_enum_value(expected, value.pos),
            Value::List(elems) => self.validate_list_value(elems, expected, value.pos),
            Value::Object(entries) => self.validate_object_value(entries, expected, value.pos),
            // Unreachable from parsed text; kept so the dispatch stays
            // exhaustive over the value variants.
            Value::Binary(_) => Err(self.mismatch(expected, "binary literal", value.pos)),
        }
    }

    /// A variable use must be assignable to the expected type per the
    /// type-reference algebra: `Int!` may stand where `Int` is expected, but
    /// never the reverse.
    fn validate_variable_value(
        &self,
        name: &Name,
        expected: &TypeRef,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        let definition = self
            .variable_definitions
            .get(name)
            .ok_or_else(|| ValidationError::VariableNotFound(name.to_string(), pos))?;

        let variable_type = resolve_declared_type(
            self.schema,
            &definition.node.var_type.node,
            definition.node.var_type.pos,
        )?;

        if expected.is_assignable_from(&variable_type) {
            Ok(())
        } else {
            Err(ValidationError::IncompatibleVariableType {
                variable: name.to_string(),
                variable_type: variable_type.to_string(),
                expected_type: expected.to_string(),
                pos,
            })
        }
    }

    fn validate_null_value(&self, expected: &TypeRef, pos: Pos) -> Result<(), ValidationError> {
        match expected {
            TypeRef::NonNull { .. } => Err(self.mismatch(expected, "null", pos)),
            _ => Ok(()),
        }
    }

    /// Integer literals require `Int`, float literals require `Float`; an
    /// integer in a `Float` position is a mismatch.
    fn validate_number_value(
        &self,
        number: &Number,
        expected: &TypeRef,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        if number.is_f64() {
            self.validate_builtin_scalar_value("Float", "float literal", expected, pos)
        } else {
            self.validate_builtin_scalar_value("Int", "integer literal", expected, pos)
        }
    }

    fn validate_builtin_scalar_value(
        &self,
        scalar_name: &str,
        literal_kind: &str,
        expected: &TypeRef,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        match expected.unwrap_non_null() {
            TypeRef::Scalar { name } if name == scalar_name => Ok(()),
            _ => Err(self.mismatch(expected, literal_kind, pos)),
        }
    }

    /// Member names are deliberately not checked against the schema's
    /// declared member set; only the kind of the expected type is.
    fn validate_enum_value(&self, expected: &TypeRef, pos: Pos) -> Result<(), ValidationError> {
        match expected.unwrap_non_null() {
            TypeRef::Enum { .. } => Ok(()),
            _ => Err(self.mismatch(expected, "enum literal", pos)),
        }
    }

    fn validate_list_value(
        &self,
        elems: &[Value],
        expected: &TypeRef,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        match expected.unwrap_non_null() {
            TypeRef::List { of_type } => elems.iter().try_for_each(|elem| {
                self.validate_value(&Positioned::new(elem.clone(), pos), of_type)
            }),
            _ => Err(self.mismatch(expected, "list literal", pos)),
        }
    }

    /// Recursively validate an object literal: the expected type must be an
    /// input object, and the supplied entries re-enter argument validation
    /// against its input-field list.
    fn validate_object_value(
        &self,
        entries: &IndexMap<Name, Value>,
        expected: &TypeRef,
        pos: Pos,
    ) -> Result<(), ValidationError> {
        let input_object_name = match expected.unwrap_non_null() {
            TypeRef::InputObject { name } => name,
            _ => return Err(self.mismatch(expected, "object literal", pos)),
        };

        let type_definition = self
            .schema
            .get_type_definition(input_object_name)
            .ok_or_else(|| {
                ValidationError::InvalidFieldType(input_object_name.to_string(), pos)
            })?;

        let input_fields = match &type_definition.kind {
            TypeDefinitionKind::InputObject { input_fields } => input_fields,
            _ => return Err(self.mismatch(expected, "object literal", pos)),
        };

        let entries: Vec<_> = entries
            .iter()
            .map(|(name, value)| {
                (
                    Positioned::new(name.clone(), pos),
                    Positioned::new(value.clone(), pos),
                )
            })
            .collect();

        self.validate_arguments(input_fields, &entries)?;

        Ok(())
    }

    fn mismatch(&self, expected: &TypeRef, actual: &str, pos: Pos) -> ValidationError {
        ValidationError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
            pos,
        }
    }
}
