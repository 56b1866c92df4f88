// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validate an executable document against a captured schema.
//!
//! Take a parsed document and transform it into a validated form (in the
//! process, validate every operation it contains).

use async_graphql_parser::{
    Pos,
    types::{BaseType, ExecutableDocument, Type},
};
use tracing::{error, instrument};

use schema_model::{Schema, TypeRef};

use self::validation_error::ValidationError;

pub mod document;
pub mod document_validator;
pub mod field;
pub mod operation;
pub mod validation_error;

mod arguments_validator;
mod operation_validator;
mod selection_set_validator;

/// Field names under this prefix are reserved for introspection and are
/// accepted wherever they appear.
pub(crate) const INTROSPECTION_PREFIX: &str = "__";

/// Parses a document source, mapping parser rejections to
/// [`ValidationError::DocumentParsingFailed`].
///
/// This is the structural gate of a validation pass: the parser only admits
/// operation and fragment definitions, so any other definition kind in the
/// source surfaces here, with its position, before the checker runs.
#[instrument(name = "validation::parse_document", skip(source))]
pub fn parse_document(source: &str) -> Result<ExecutableDocument, ValidationError> {
    async_graphql_parser::parse_query(source).map_err(|error| {
        error!(%error, "Failed to parse document");
        let (message, pos1, pos2) = match error {
            async_graphql_parser::Error::Syntax {
                message,
                start,
                end,
            } => {
                // Error::Syntax's message is formatted with newlines, escape them properly
                let message = message.escape_debug();
                (format!("Syntax error:\\n{message}"), start, end)
            }
            async_graphql_parser::Error::MultipleRoots { root, schema, pos } => {
                (format!("Multiple roots of {root} type"), schema, Some(pos))
            }
            async_graphql_parser::Error::MissingQueryRoot { pos } => {
                ("Missing query root".to_string(), pos, None)
            }
            async_graphql_parser::Error::MultipleOperations {
                anonymous,
                operation,
            } => (
                "Multiple operations".to_string(),
                anonymous,
                Some(operation),
            ),
            async_graphql_parser::Error::OperationDuplicated {
                operation: _,
                first,
                second,
            } => ("Operation duplicated".to_string(), first, Some(second)),
            async_graphql_parser::Error::FragmentDuplicated {
                fragment,
                first,
                second,
            } => (
                format!("Fragment {fragment} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::MissingOperation => {
                ("Missing operation".to_string(), Pos::default(), None)
            }
            _ => ("Unknown error".to_string(), Pos::default(), None),
        };

        ValidationError::DocumentParsingFailed(message, pos1, pos2)
    })
}

/// Resolves a declared AST type (a variable's type or a fragment's type
/// condition) to a [`TypeRef`] against the schema table.
///
/// A non-nullable AST type wraps the resolved inner reference in `NON_NULL`;
/// a list type wraps it in `LIST`; a named type must resolve in the table.
pub(crate) fn resolve_declared_type(
    schema: &Schema,
    typ: &Type,
    pos: Pos,
) -> Result<TypeRef, ValidationError> {
    let base = match &typ.base {
        BaseType::Named(name) => schema
            .type_ref(name.as_str())
            .ok_or_else(|| ValidationError::UndefinedType(name.to_string(), pos))?,
        BaseType::List(inner) => TypeRef::List {
            of_type: Box::new(resolve_declared_type(schema, inner, pos)?),
        },
    };

    Ok(if typ.nullable {
        base
    } else {
        TypeRef::NonNull {
            of_type: Box::new(base),
        }
    })
}
