// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

/// The first violation encountered during a validation pass.
///
/// Every variant carries the source position the diagnostic is anchored to;
/// parse failures may carry a secondary position (e.g. the second of two
/// duplicated definitions). There is no warning tier: a pass either returns
/// the validated document or exactly one of these.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    DocumentParsingFailed(String, Pos, Option<Pos>),

    #[error("No operation found")]
    NoOperationFound,

    #[error("Anonymous operations are not allowed")]
    AnonymousOperation(Pos),

    #[error("Schema does not define a {0} root type")]
    UnsupportedOperationType(String, Pos),

    #[error("Cannot resolve root type '{0}'")]
    UnresolvedRootType(String, Pos),

    #[error("Cannot query field '{0}' on type '{1}'")]
    CannotQueryField(String, String, Pos),

    #[error("Field '{0}' is not valid for type '{1}'")]
    InvalidField(String, String, Pos),

    #[error("Field type '{0}' is not valid")]
    InvalidFieldType(String, Pos),

    #[error("Field '{0}' of type '{1}' must have a selection of sub-fields")]
    MissingSubSelection(String, String, Pos),

    #[error("Field '{0}' is of a scalar type, which should not specify fields")]
    ScalarWithField(String, Pos),

    #[error("Selection set cannot be empty")]
    EmptySelectionSet(Pos),

    #[error("Argument '{0}' is not valid for '{1}'")]
    StrayArgument(String, String, Pos),

    #[error("Duplicate argument '{0}'")]
    DuplicateArgument(String, Pos),

    #[error("Expected value of type '{expected}', got {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        pos: Pos,
    },

    #[error("Undefined schema type '{0}'")]
    UndefinedType(String, Pos),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String, Pos),

    #[error(
        "Variable '{variable}' of type '{variable_type}' cannot be used where '{expected_type}' is expected"
    )]
    IncompatibleVariableType {
        variable: String,
        variable_type: String,
        expected_type: String,
        pos: Pos,
    },

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Fragment '{0}' is part of a cycle")]
    CyclicFragment(String, Pos),
}

impl ValidationError {
    pub fn position(&self) -> Pos {
        match self {
            ValidationError::DocumentParsingFailed(_, pos, _) => *pos,
            ValidationError::NoOperationFound => Pos::default(),
            ValidationError::AnonymousOperation(pos) => *pos,
            ValidationError::UnsupportedOperationType(_, pos) => *pos,
            ValidationError::UnresolvedRootType(_, pos) => *pos,
            ValidationError::CannotQueryField(_, _, pos) => *pos,
            ValidationError::InvalidField(_, _, pos) => *pos,
            ValidationError::InvalidFieldType(_, pos) => *pos,
            ValidationError::MissingSubSelection(_, _, pos) => *pos,
            ValidationError::ScalarWithField(_, pos) => *pos,
            ValidationError::EmptySelectionSet(pos) => *pos,
            ValidationError::StrayArgument(_, _, pos) => *pos,
            ValidationError::DuplicateArgument(_, pos) => *pos,
            ValidationError::TypeMismatch { pos, .. } => *pos,
            ValidationError::UndefinedType(_, pos) => *pos,
            ValidationError::VariableNotFound(_, pos) => *pos,
            ValidationError::IncompatibleVariableType { pos, .. } => *pos,
            ValidationError::FragmentDefinitionNotFound(_, pos) => *pos,
            ValidationError::CyclicFragment(_, pos) => *pos,
        }
    }

    pub fn secondary_position(&self) -> Option<Pos> {
        match self {
            ValidationError::DocumentParsingFailed(_, _, pos) => *pos,
            _ => None,
        }
    }
}
