// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Ingestion of a captured introspection response into the [`Schema`] model.
//!
//! Accepts both the raw `{"__schema": ...}` object and the usual transport
//! envelope `{"data": {"__schema": ...}}`. Only the parts the checker
//! consults are retained: type names and kinds, field and argument names,
//! and their type references. Descriptions, deprecations, enum member lists,
//! and directive declarations are dropped.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    FieldDefinition, InputValueDefinition, Schema, TypeDefinition, TypeDefinitionKind, TypeRef,
};

#[derive(Error, Debug)]
pub enum SchemaLoadError {
    #[error("Malformed introspection JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Introspection response has no '__schema' object")]
    MissingSchema,

    #[error("Duplicate type name '{0}' in introspection response")]
    DuplicateType(String),
}

#[derive(Deserialize)]
struct IntrospectionEnvelope {
    data: Option<IntrospectionResponse>,
    #[serde(rename = "__schema")]
    schema: Option<IntrospectionSchema>,
}

#[derive(Deserialize)]
struct IntrospectionResponse {
    #[serde(rename = "__schema")]
    schema: Option<IntrospectionSchema>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: IntrospectionRootType,
    mutation_type: Option<IntrospectionRootType>,
    subscription_type: Option<IntrospectionRootType>,
    types: Vec<IntrospectionType>,
}

#[derive(Deserialize)]
struct IntrospectionRootType {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: IntrospectionTypeKind,
    name: String,
    fields: Option<Vec<IntrospectionField>>,
    input_fields: Option<Vec<IntrospectionInputValue>>,
}

/// Kinds a type *declaration* can have. `LIST`/`NON_NULL` appear only inside
/// type references, never as entries of the type table.
#[derive(Deserialize, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum IntrospectionTypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    ty: TypeRef,
}

#[derive(Deserialize)]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    ty: TypeRef,
}

impl Schema {
    /// Builds a schema from a captured introspection response.
    pub fn from_introspection_json(json: &str) -> Result<Schema, SchemaLoadError> {
        let envelope: IntrospectionEnvelope = serde_json::from_str(json)?;

        let schema = envelope
            .schema
            .or(envelope.data.and_then(|data| data.schema))
            .ok_or(SchemaLoadError::MissingSchema)?;

        let mut seen = std::collections::HashSet::new();
        let type_definitions = schema
            .types
            .into_iter()
            .map(|td| {
                if !seen.insert(td.name.clone()) {
                    return Err(SchemaLoadError::DuplicateType(td.name));
                }
                Ok(convert_type(td))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Schema::new(
            type_definitions,
            schema.query_type.name,
            schema.mutation_type.map(|t| t.name),
            schema.subscription_type.map(|t| t.name),
        ))
    }
}

fn convert_type(td: IntrospectionType) -> TypeDefinition {
    let kind = match td.kind {
        IntrospectionTypeKind::Scalar => TypeDefinitionKind::Scalar,
        IntrospectionTypeKind::Object => TypeDefinitionKind::Object {
            fields: convert_fields(td.fields),
        },
        IntrospectionTypeKind::Interface => TypeDefinitionKind::Interface {
            fields: convert_fields(td.fields),
        },
        IntrospectionTypeKind::Union => TypeDefinitionKind::Union,
        IntrospectionTypeKind::Enum => TypeDefinitionKind::Enum,
        IntrospectionTypeKind::InputObject => TypeDefinitionKind::InputObject {
            input_fields: convert_input_values(td.input_fields),
        },
    };

    TypeDefinition {
        name: td.name,
        kind,
    }
}

fn convert_fields(fields: Option<Vec<IntrospectionField>>) -> Vec<FieldDefinition> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| FieldDefinition {
            name: f.name,
            arguments: f
                .args
                .into_iter()
                .map(|arg| InputValueDefinition {
                    name: arg.name,
                    ty: arg.ty,
                })
                .collect(),
            ty: f.ty,
        })
        .collect()
}

fn convert_input_values(
    input_fields: Option<Vec<IntrospectionInputValue>>,
) -> Vec<InputValueDefinition> {
    input_fields
        .unwrap_or_default()
        .into_iter()
        .map(|f| InputValueDefinition {
            name: f.name,
            ty: f.ty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTROSPECTION_JSON: &str = r#"{
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [
                            {
                                "name": "concerts",
                                "args": [
                                    {
                                        "name": "venueId",
                                        "type": { "kind": "SCALAR", "name": "Int", "ofType": null }
                                    }
                                ],
                                "type": {
                                    "kind": "LIST",
                                    "name": null,
                                    "ofType": { "kind": "OBJECT", "name": "Concert", "ofType": null }
                                }
                            }
                        ],
                        "inputFields": null
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Concert",
                        "fields": [
                            {
                                "name": "id",
                                "args": [],
                                "type": {
                                    "kind": "NON_NULL",
                                    "name": null,
                                    "ofType": { "kind": "SCALAR", "name": "Int", "ofType": null }
                                }
                            }
                        ],
                        "inputFields": null
                    },
                    { "kind": "SCALAR", "name": "Int", "fields": null, "inputFields": null },
                    { "kind": "ENUM", "name": "Genre", "fields": null, "inputFields": null },
                    {
                        "kind": "INPUT_OBJECT",
                        "name": "ConcertFilter",
                        "fields": null,
                        "inputFields": [
                            {
                                "name": "genre",
                                "type": { "kind": "ENUM", "name": "Genre", "ofType": null }
                            }
                        ]
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn loads_enveloped_response() {
        let schema = Schema::from_introspection_json(INTROSPECTION_JSON).unwrap();

        assert_eq!(schema.query_type(), "Query");
        assert_eq!(schema.mutation_type(), None);

        let query = schema.get_type_definition("Query").unwrap();
        let concerts = query.field("concerts").unwrap();
        assert_eq!(concerts.ty.to_string(), "[Concert]");
        assert_eq!(concerts.arguments[0].name, "venueId");

        let filter = schema.get_type_definition("ConcertFilter").unwrap();
        assert_eq!(filter.input_fields().unwrap()[0].ty.to_string(), "Genre");
    }

    #[test]
    fn loads_bare_schema_object() {
        let json = r#"{
            "__schema": {
                "queryType": { "name": "Query" },
                "types": [
                    { "kind": "OBJECT", "name": "Query", "fields": [], "inputFields": null }
                ]
            }
        }"#;
        let schema = Schema::from_introspection_json(json).unwrap();
        assert!(schema.get_type_definition("Query").is_some());
    }

    #[test]
    fn rejects_missing_schema_key() {
        let result = Schema::from_introspection_json(r#"{ "data": {} }"#);
        assert!(matches!(result, Err(SchemaLoadError::MissingSchema)));
    }

    #[test]
    fn rejects_duplicate_type_names() {
        let json = r#"{
            "__schema": {
                "queryType": { "name": "Query" },
                "types": [
                    { "kind": "OBJECT", "name": "Query", "fields": [], "inputFields": null },
                    { "kind": "SCALAR", "name": "Query", "fields": null, "inputFields": null }
                ]
            }
        }"#;
        let result = Schema::from_introspection_json(json);
        assert!(
            matches!(result, Err(SchemaLoadError::DuplicateType(name)) if name == "Query")
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Schema::from_introspection_json("not json"),
            Err(SchemaLoadError::Json(_))
        ));
    }
}
