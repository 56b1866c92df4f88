// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{DocumentOperations, ExecutableDocument};
use tracing::instrument;

use schema_model::Schema;

use crate::validation::validation_error::ValidationError;

use super::{document::ValidatedDocument, operation_validator::OperationValidator};

/// Context for validating a document.
pub struct DocumentValidator<'a> {
    schema: &'a Schema,
}

impl<'a> DocumentValidator<'a> {
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Validate a parsed document.
    ///
    /// Validations performed:
    /// - Every operation carries a name (a lone anonymous operation parses as
    ///   `DocumentOperations::Single` and is rejected here)
    /// - Every operation is valid, checked in document order; the first
    ///   failure aborts the pass (see [`OperationValidator`] for details)
    #[instrument(name = "DocumentValidator::validate", skip(self, document))]
    pub fn validate(
        &self,
        document: &ExecutableDocument,
    ) -> Result<ValidatedDocument, ValidationError> {
        let operations = match &document.operations {
            DocumentOperations::Single(operation) => {
                return Err(ValidationError::AnonymousOperation(operation.pos));
            }
            DocumentOperations::Multiple(operations) => {
                if operations.is_empty() {
                    return Err(ValidationError::NoOperationFound);
                }
                // The parsed operation table is unordered; document order is
                // restored from source positions so that the first failure
                // is deterministic.
                let mut operations: Vec<_> = operations.iter().collect();
                operations.sort_by_key(|(_, operation)| {
                    (operation.pos.line, operation.pos.column)
                });
                operations
            }
        };

        let operations = operations
            .into_iter()
            .map(|(name, operation)| {
                if name.trim().is_empty() {
                    return Err(ValidationError::AnonymousOperation(operation.pos));
                }

                OperationValidator::new(self.schema, name.to_string(), &document.fragments)
                    .validate(operation)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedDocument { operations })
    }
}
