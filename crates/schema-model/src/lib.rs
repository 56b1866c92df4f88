// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! In-memory model of a captured introspection schema.
//!
//! The model is built once from an introspection response (see
//! [`Schema::from_introspection_json`]) and then serves as the read-only
//! ground truth for document validation: a name-keyed type table, the root
//! operation type names, and the structural type-reference algebra
//! ([`TypeRef`]).

mod introspection;
mod schema;
mod type_ref;

pub use introspection::SchemaLoadError;
pub use schema::{
    FieldDefinition, InputValueDefinition, Schema, TypeDefinition, TypeDefinitionKind,
};
pub use type_ref::TypeRef;
