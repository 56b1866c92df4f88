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
    Positioned,
    types::{
        Field, FragmentDefinition, FragmentSpread, InlineFragment, Selection, SelectionSet,
        VariableDefinition,
    },
};
use async_graphql_value::{Name, indexmap::IndexMap};

use schema_model::{FieldDefinition, Schema, TypeDefinition, TypeDefinitionKind};

use crate::validation::field::ValidatedField;
use crate::validation::validation_error::ValidationError;

use super::{INTROSPECTION_PREFIX, arguments_validator::ArgumentValidator};

/// Context for validating a selection set.
#[derive(Debug)]
pub struct SelectionSetValidator<'a> {
    schema: &'a Schema,
    /// The type the selections are resolved against.
    container_type: &'a TypeDefinition,
    variable_definitions: &'a HashMap<Name, Positioned<VariableDefinition>>,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    /// Names of the fragment spreads currently being expanded, outermost
    /// first. Re-entering one of these is a cycle.
    fragment_trail: Vec<Name>,
}

impl<'a> SelectionSetValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        container_type: &'a TypeDefinition,
        variable_definitions: &'a HashMap<Name, Positioned<VariableDefinition>>,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            container_type,
            variable_definitions,
            fragment_definitions,
            fragment_trail: vec![],
        }
    }

    /// A validator for a nested scope: same pass state, different container
    /// type.
    fn scoped(&self, container_type: &'a TypeDefinition) -> Self {
        Self {
            schema: self.schema,
            container_type,
            variable_definitions: self.variable_definitions,
            fragment_definitions: self.fragment_definitions,
            fragment_trail: self.fragment_trail.clone(),
        }
    }

    /// Validate a selection set.
    ///
    /// Validations performed:
    /// - The selection set is non-empty (defensive; the parser never
    ///   produces an empty one)
    /// - Each field is defined in the container type, with valid arguments
    ///   and a sub-selection exactly when its return type requires one
    /// - Each fragment referred to is defined and acyclic
    ///
    /// # Returns
    ///   A vector of validated fields (any fragment is resolved and inlined,
    ///   thus normalizing the fields)
    pub(super) fn validate(
        &self,
        selection_set: &Positioned<SelectionSet>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        if selection_set.node.items.is_empty() {
            return Err(ValidationError::EmptySelectionSet(selection_set.pos));
        }

        selection_set
            .node
            .items
            .iter()
            .map(|selection| self.validate_selection(selection))
            .collect::<Result<Vec<_>, _>>()
            .map(|f| f.into_iter().flatten().collect())
    }

    fn validate_selection(
        &self,
        selection: &Positioned<Selection>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        match &selection.node {
            Selection::Field(field) => self.validate_field(field).map(|field| vec![field]),
            Selection::FragmentSpread(fragment_spread) => {
                self.validate_fragment_spread(fragment_spread)
            }
            Selection::InlineFragment(inline_fragment) => {
                self.validate_inline_fragment(inline_fragment)
            }
        }
    }

    fn validate_field(&self, field: &Positioned<Field>) -> Result<ValidatedField, ValidationError> {
        // Meta fields (the reserved `__` prefix) are legal wherever they
        // appear and are not declared as ordinary fields of any type, so they
        // bypass resolution entirely.
        if field.node.name.node.starts_with(INTROSPECTION_PREFIX) {
            return Ok(ValidatedField {
                alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
                name: field.node.name.node.clone(),
                arguments: IndexMap::new(),
                subfields: vec![],
            });
        }

        let field_definition = self.get_field_definition(field)?;

        let field_validator =
            ArgumentValidator::new(self.schema, self.variable_definitions, field);
        let arguments = field_validator.validate(&field_definition.arguments)?;

        let return_type_name = field_definition.ty.leaf_name();
        let return_type = self
            .schema
            .get_type_definition(return_type_name)
            .ok_or_else(|| {
                ValidationError::InvalidFieldType(return_type_name.to_string(), field.pos)
            })?;

        let subfields = match &return_type.kind {
            TypeDefinitionKind::Scalar => {
                if !field.node.selection_set.node.items.is_empty() {
                    return Err(ValidationError::ScalarWithField(
                        field.node.name.to_string(),
                        field.pos,
                    ));
                }
                vec![]
            }
            _ => {
                if field.node.selection_set.node.items.is_empty() {
                    return Err(ValidationError::MissingSubSelection(
                        field.node.name.to_string(),
                        return_type.name.clone(),
                        field.pos,
                    ));
                }
                self.scoped(return_type).validate(&field.node.selection_set)?
            }
        };

        Ok(ValidatedField {
            alias: field.node.alias.as_ref().map(|alias| alias.node.clone()),
            name: field.node.name.node.clone(),
            arguments,
            subfields,
        })
    }

    /// Resolves a spread and validates the fragment's selections against the
    /// current container type, inlining the result.
    fn validate_fragment_spread(
        &self,
        fragment_spread: &Positioned<FragmentSpread>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let fragment_name = &fragment_spread.node.fragment_name.node;
        let fragment_definition = self.fragment_definition(fragment_spread)?;

        if self.fragment_trail.contains(fragment_name) {
            return Err(ValidationError::CyclicFragment(
                fragment_name.to_string(),
                fragment_spread.pos,
            ));
        }

        let mut sub_validator = self.scoped(self.container_type);
        sub_validator.fragment_trail.push(fragment_name.clone());
        sub_validator.validate(&fragment_definition.selection_set)
    }

    /// Validates an inline fragment's selections against its type condition,
    /// or against the current container type when no condition is given.
    fn validate_inline_fragment(
        &self,
        inline_fragment: &Positioned<InlineFragment>,
    ) -> Result<Vec<ValidatedField>, ValidationError> {
        let container_type = match &inline_fragment.node.type_condition {
            Some(condition) => {
                let type_name = &condition.node.on.node;
                self.schema
                    .get_type_definition(type_name.as_str())
                    .ok_or_else(|| {
                        ValidationError::UndefinedType(type_name.to_string(), condition.pos)
                    })?
            }
            None => self.container_type,
        };

        self.scoped(container_type)
            .validate(&inline_fragment.node.selection_set)
    }

    fn fragment_definition(
        &self,
        fragment: &Positioned<FragmentSpread>,
    ) -> Result<&'a FragmentDefinition, ValidationError> {
        self.fragment_definitions
            .get(&fragment.node.fragment_name.node)
            .map(|v| &v.node)
            .ok_or_else(|| {
                ValidationError::FragmentDefinitionNotFound(
                    fragment.node.fragment_name.node.as_str().to_string(),
                    fragment.pos,
                )
            })
    }

    fn get_field_definition(
        &self,
        field: &Positioned<Field>,
    ) -> Result<&'a FieldDefinition, ValidationError> {
        let fields = match &self.container_type.kind {
            TypeDefinitionKind::Object { fields } | TypeDefinitionKind::Interface { fields } => {
                fields
            }
            TypeDefinitionKind::Scalar
            | TypeDefinitionKind::Union
            | TypeDefinitionKind::Enum
            | TypeDefinitionKind::InputObject { .. } => {
                return Err(ValidationError::CannotQueryField(
                    field.node.name.node.as_str().to_string(),
                    self.container_type.name.clone(),
                    field.pos,
                ));
            }
        };

        fields
            .iter()
            .find(|f| f.name == field.node.name.node.as_str())
            .ok_or_else(|| {
                ValidationError::InvalidField(
                    field.node.name.node.as_str().to_string(),
                    self.container_type.name.clone(),
                    field.pos,
                )
            })
    }
}
