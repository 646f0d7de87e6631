//! Mapping document validation against the built-in document schema.

use serde_json::{json, Value};

use crate::error::{DocumentError, ValidateError};

/// JSON Schema describing a mapping document.
pub fn document_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Resource mapping document",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "$schema": { "type": "string" },
            "resources": {
                "type": "object",
                "additionalProperties": { "type": "string", "minLength": 1 }
            },
            "classes": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/class" }
            }
        },
        "$defs": {
            "type": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "builtin": {
                        "enum": ["int", "float", "string", "bool", "array", "object", "null"]
                    },
                    "nullable": { "type": "boolean" },
                    "class": { "type": "string", "minLength": 1 },
                    "collection": { "type": "boolean" },
                    "element": { "$ref": "#/$defs/type" }
                }
            },
            "attribute": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "types": { "type": "array", "items": { "$ref": "#/$defs/type" } },
                    "public": { "type": "boolean" }
                }
            },
            "method": {
                "type": "object",
                "additionalProperties": false,
                "required": ["name"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "required_parameters": { "type": "integer", "minimum": 0 }
                }
            },
            "attributeAnnotation": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "iri": { "type": "string" },
                    "description": { "type": "string" },
                    "required": { "type": "boolean" }
                }
            },
            "classAnnotation": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "iri": { "type": "string" },
                    "description": { "type": "string" },
                    "attributes": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/attributeAnnotation" }
                    }
                }
            },
            "class": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "description": { "type": "string" },
                    "iri": { "type": "string" },
                    "attributes": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/attribute" }
                    },
                    "methods": { "type": "array", "items": { "$ref": "#/$defs/method" } },
                    "groups": {
                        "type": "object",
                        "additionalProperties": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "annotations": { "$ref": "#/$defs/classAnnotation" }
                }
            }
        }
    })
}

/// Collect every schema violation in a mapping document.
///
/// Returns an empty list for a valid document.
pub fn document_errors(document: &Value) -> Vec<DocumentError> {
    let schema = document_schema();
    let validator = match jsonschema::validator_for(&schema) {
        Ok(validator) => validator,
        Err(e) => {
            return vec![DocumentError {
                path: String::new(),
                message: format!("invalid document schema: {}", e),
            }]
        }
    };

    validator
        .iter_errors(document)
        .map(|e| DocumentError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect()
}

/// Validate a mapping document.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` listing every violation.
pub fn validate_document(document: &Value) -> Result<(), ValidateError> {
    let errors = document_errors(document);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidateError::Invalid { errors })
    }
}
