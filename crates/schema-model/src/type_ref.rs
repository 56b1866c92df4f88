// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt;

use serde::Deserialize;

/// A structural reference to a schema type: either a named leaf tagged with
/// its kind, or a `LIST`/`NON_NULL` wrapper around an inner reference.
///
/// The representation mirrors the introspection wire shape
/// (`{"kind": ..., "name": ..., "ofType": ...}`), so a field or argument type
/// from a captured introspection response deserializes into it directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeRef {
    Scalar {
        name: String,
    },
    Object {
        name: String,
    },
    Interface {
        name: String,
    },
    Union {
        name: String,
    },
    Enum {
        name: String,
    },
    InputObject {
        name: String,
    },
    List {
        #[serde(rename = "ofType")]
        of_type: Box<TypeRef>,
    },
    NonNull {
        #[serde(rename = "ofType")]
        of_type: Box<TypeRef>,
    },
}

impl TypeRef {
    /// The name of a named leaf. `None` for `LIST`/`NON_NULL` wrappers.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeRef::Scalar { name }
            | TypeRef::Object { name }
            | TypeRef::Interface { name }
            | TypeRef::Union { name }
            | TypeRef::Enum { name }
            | TypeRef::InputObject { name } => Some(name),
            TypeRef::List { .. } | TypeRef::NonNull { .. } => None,
        }
    }

    /// The name of the named leaf under any `LIST`/`NON_NULL` wrappers.
    pub fn leaf_name(&self) -> &str {
        match self {
            TypeRef::List { of_type } | TypeRef::NonNull { of_type } => of_type.leaf_name(),
            named => named.name().unwrap_or_default(),
        }
    }

    /// Peels one `NON_NULL` wrapper, if present.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull { of_type } => of_type,
            other => other,
        }
    }

    /// Whether a value of type `source` may be used where `self` is expected.
    ///
    /// A nullable source never satisfies a `NON_NULL` target; a non-null
    /// source satisfies a nullable target. List wrappers must match on both
    /// sides. With all wrappers accounted for, both sides must be the same
    /// named type.
    pub fn is_assignable_from(&self, source: &TypeRef) -> bool {
        match (self, source) {
            (TypeRef::NonNull { of_type: target }, TypeRef::NonNull { of_type: source }) => {
                target.is_assignable_from(source)
            }
            (TypeRef::NonNull { .. }, _) => false,
            (target, TypeRef::NonNull { of_type: source }) => target.is_assignable_from(source),
            (TypeRef::List { of_type: target }, TypeRef::List { of_type: source }) => {
                target.is_assignable_from(source)
            }
            (TypeRef::List { .. }, _) | (_, TypeRef::List { .. }) => false,
            (target, source) => target.name() == source.name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::List { of_type } => write!(f, "[{of_type}]"),
            TypeRef::NonNull { of_type } => write!(f, "{of_type}!"),
            TypeRef::Scalar { name }
            | TypeRef::Object { name }
            | TypeRef::Interface { name }
            | TypeRef::Union { name }
            | TypeRef::Enum { name }
            | TypeRef::InputObject { name } => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypeRef {
        TypeRef::Scalar {
            name: "Int".to_string(),
        }
    }

    fn non_null(inner: TypeRef) -> TypeRef {
        TypeRef::NonNull {
            of_type: Box::new(inner),
        }
    }

    fn list(inner: TypeRef) -> TypeRef {
        TypeRef::List {
            of_type: Box::new(inner),
        }
    }

    #[test]
    fn nullable_source_does_not_satisfy_non_null_target() {
        assert!(!non_null(int()).is_assignable_from(&int()));
    }

    #[test]
    fn non_null_source_satisfies_nullable_target() {
        assert!(int().is_assignable_from(&non_null(int())));
    }

    #[test]
    fn non_null_source_satisfies_non_null_target() {
        assert!(non_null(int()).is_assignable_from(&non_null(int())));
    }

    #[test]
    fn list_wrappers_must_match() {
        assert!(list(int()).is_assignable_from(&list(int())));
        assert!(!list(int()).is_assignable_from(&int()));
        assert!(!int().is_assignable_from(&list(int())));
    }

    #[test]
    fn nested_list_assignability_recurses() {
        let target = list(list(int()));
        assert!(target.is_assignable_from(&list(list(non_null(int())))));
        assert!(!target.is_assignable_from(&list(int())));
    }

    #[test]
    fn named_types_must_match_by_name() {
        let float = TypeRef::Scalar {
            name: "Float".to_string(),
        };
        assert!(!int().is_assignable_from(&float));
        assert!(int().is_assignable_from(&int()));
    }

    #[test]
    fn rendering() {
        assert_eq!(int().to_string(), "Int");
        assert_eq!(non_null(int()).to_string(), "Int!");
        assert_eq!(list(non_null(int())).to_string(), "[Int!]");
        assert_eq!(non_null(list(int())).to_string(), "[Int]!");
    }

    #[test]
    fn leaf_name_sees_through_wrappers() {
        assert_eq!(non_null(list(non_null(int()))).leaf_name(), "Int");
    }

    #[test]
    fn deserializes_from_introspection_wire_shape() {
        let json = r#"{
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": { "kind": "SCALAR", "name": "Int", "ofType": null }
            }
        }"#;
        let parsed: TypeRef = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, non_null(list(int())));
        assert_eq!(parsed.to_string(), "[Int]!");
    }
}
