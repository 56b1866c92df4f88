// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use crate::TypeRef;

/// A captured type system: a name-keyed table of type definitions plus the
/// root operation type names.
///
/// The table is built once per schema (not re-scanned per lookup) and is
/// immutable for the lifetime of every validation pass that borrows it.
#[derive(Debug, Clone)]
pub struct Schema {
    types: HashMap<String, TypeDefinition>,
    query_type: String,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    pub fn new(
        type_definitions: Vec<TypeDefinition>,
        query_type: String,
        mutation_type: Option<String>,
        subscription_type: Option<String>,
    ) -> Self {
        let types = type_definitions
            .into_iter()
            .map(|td| (td.name.clone(), td))
            .collect();

        Self {
            types,
            query_type,
            mutation_type,
            subscription_type,
        }
    }

    pub fn get_type_definition(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.types.get(type_name)
    }

    /// A named [`TypeRef`] leaf for the given type, carrying its kind.
    pub fn type_ref(&self, type_name: &str) -> Option<TypeRef> {
        let td = self.get_type_definition(type_name)?;
        let name = td.name.clone();

        Some(match td.kind {
            TypeDefinitionKind::Scalar => TypeRef::Scalar { name },
            TypeDefinitionKind::Object { .. } => TypeRef::Object { name },
            TypeDefinitionKind::Interface { .. } => TypeRef::Interface { name },
            TypeDefinitionKind::Union => TypeRef::Union { name },
            TypeDefinitionKind::Enum => TypeRef::Enum { name },
            TypeDefinitionKind::InputObject { .. } => TypeRef::InputObject { name },
        })
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    pub fn subscription_type(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }
}

/// A single entry of the type table.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeDefinitionKind,
}

/// The closed set of type kinds a schema can declare. Object and interface
/// types carry their field lists; input objects carry their input fields.
#[derive(Debug, Clone)]
pub enum TypeDefinitionKind {
    Scalar,
    Object { fields: Vec<FieldDefinition> },
    Interface { fields: Vec<FieldDefinition> },
    Union,
    Enum,
    InputObject { input_fields: Vec<InputValueDefinition> },
}

impl TypeDefinition {
    /// The field list for object and interface types.
    pub fn fields(&self) -> Option<&[FieldDefinition]> {
        match &self.kind {
            TypeDefinitionKind::Object { fields } | TypeDefinitionKind::Interface { fields } => {
                Some(fields)
            }
            TypeDefinitionKind::Scalar
            | TypeDefinitionKind::Union
            | TypeDefinitionKind::Enum
            | TypeDefinitionKind::InputObject { .. } => None,
        }
    }

    pub fn field(&self, field_name: &str) -> Option<&FieldDefinition> {
        self.fields()?.iter().find(|f| f.name == field_name)
    }

    pub fn input_fields(&self) -> Option<&[InputValueDefinition]> {
        match &self.kind {
            TypeDefinitionKind::InputObject { input_fields } => Some(input_fields),
            _ => None,
        }
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: TypeRef,
}

/// A declared argument of a field, or a field of an input object.
#[derive(Debug, Clone)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: TypeRef,
}
