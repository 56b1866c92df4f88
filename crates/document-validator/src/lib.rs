// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validation of executable GraphQL documents against a captured
//! introspection schema.
//!
//! The entry point is [`validation::document_validator::DocumentValidator`]:
//! it takes a parsed document and either returns it in validated, normalized
//! form or fails fast with the first position-tagged
//! [`validation::validation_error::ValidationError`] encountered. Documents
//! that pass are guaranteed to contain no unresolved type, field, argument,
//! or variable name, so a downstream code generator need not re-check them.

pub mod validation;

pub use validation::document::ValidatedDocument;
pub use validation::document_validator::DocumentValidator;
pub use validation::field::ValidatedField;
pub use validation::operation::ValidatedOperation;
pub use validation::parse_document;
pub use validation::validation_error::ValidationError;
