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
    types::{FragmentDefinition, OperationDefinition, OperationType, VariableDefinition},
};
use async_graphql_value::Name;

use schema_model::Schema;

use crate::validation::validation_error::ValidationError;

use super::{operation::ValidatedOperation, selection_set_validator::SelectionSetValidator};

/// Context for validating one operation.
pub struct OperationValidator<'a> {
    schema: &'a Schema,
    operation_name: String,
    fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
}

impl<'a> OperationValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        operation_name: String,
        fragment_definitions: &'a HashMap<Name, Positioned<FragmentDefinition>>,
    ) -> Self {
        Self {
            schema,
            operation_name,
            fragment_definitions,
        }
    }

    /// Validate an operation such as
    /// ```graphql
    ///    query concertInfo($id: Int!) {
    ///       concert(id: $id) {
    ///          title
    ///       }
    ///    }
    /// ```
    ///
    /// Validations performed:
    /// - The operation keyword maps to a root type the schema declares
    /// - That root type resolves in the type table
    /// - The top-level selection set is valid with the root type in scope
    ///   (see [`SelectionSetValidator`] for details)
    ///
    /// Variable definitions are collected here; their declared types are
    /// resolved at first use, when a value position references them.
    pub(super) fn validate(
        self,
        operation: &Positioned<OperationDefinition>,
    ) -> Result<ValidatedOperation, ValidationError> {
        let operation_type_name = match operation.node.ty {
            OperationType::Query => Some(self.schema.query_type()),
            OperationType::Mutation => self.schema.mutation_type(),
            OperationType::Subscription => self.schema.subscription_type(),
        }
        .ok_or_else(|| {
            ValidationError::UnsupportedOperationType(
                operation_keyword(operation.node.ty).to_string(),
                operation.pos,
            )
        })?;

        let container_type = self
            .schema
            .get_type_definition(operation_type_name)
            .ok_or_else(|| {
                ValidationError::UnresolvedRootType(operation_type_name.to_string(), operation.pos)
            })?;

        let variable_definitions: HashMap<Name, Positioned<VariableDefinition>> = operation
            .node
            .variable_definitions
            .iter()
            .map(|vd| (vd.node.name.node.clone(), vd.clone()))
            .collect();

        let selection_set_validator = SelectionSetValidator::new(
            self.schema,
            container_type,
            &variable_definitions,
            self.fragment_definitions,
        );

        let fields = selection_set_validator.validate(&operation.node.selection_set)?;

        Ok(ValidatedOperation {
            name: self.operation_name,
            typ: operation.node.ty,
            fields,
        })
    }
}

fn operation_keyword(typ: OperationType) -> &'static str {
    match typ {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}
