//! Declarative argument schemas: one declaration drives both the advertised
//! JSON Schema and the pre-dispatch validation.

use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
}

impl ParamType {
    pub fn json_name(self) -> &'static str {
        match self {
            ParamType::String => "string",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ParamType::String => value.is_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: ParamType,
    pub required: bool,
    pub description: &'static str,
}

/// Declared shape of one tool's arguments, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamSpec>,
}

impl ToolSchema {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            params: Vec::new(),
        }
    }

    pub fn required_string(mut self, name: &'static str, description: &'static str) -> Self {
        self.params.push(ParamSpec {
            name,
            ty: ParamType::String,
            required: true,
            description,
        });
        self
    }

    pub fn optional_string(mut self, name: &'static str, description: &'static str) -> Self {
        self.params.push(ParamSpec {
            name,
            ty: ParamType::String,
            required: false,
            description,
        });
        self
    }

    /// The JSON Schema object advertised through tool listing.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for p in &self.params {
            properties.insert(
                p.name.to_string(),
                json!({ "type": p.ty.json_name(), "description": p.description }),
            );
            if p.required {
                required.push(Value::String(p.name.to_string()));
            }
        }
        let mut schema = Map::new();
        schema.insert("type".into(), Value::String("object".into()));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Check `args` against the declaration before anything else runs.
    /// `null` counts as an empty argument object; unknown keys are ignored.
    /// A declared argument that is present with the wrong type fails even
    /// when optional.
    pub fn validate<'a>(&self, args: &'a Value) -> Result<ValidArgs<'a>, SchemaError> {
        let map = match args {
            Value::Null => None,
            Value::Object(map) => Some(map),
            _ => return Err(SchemaError::NotAnObject),
        };
        for p in &self.params {
            match map.and_then(|m| m.get(p.name)) {
                None | Some(Value::Null) => {
                    if p.required {
                        return Err(SchemaError::MissingRequired(p.name));
                    }
                }
                Some(v) => {
                    if !p.ty.matches(v) {
                        return Err(SchemaError::WrongType {
                            name: p.name,
                            expected: p.ty.json_name(),
                        });
                    }
                }
            }
        }
        Ok(ValidArgs { values: map })
    }
}

/// Arguments that passed [`ToolSchema::validate`]. Borrows the caller's
/// argument object instead of copying values out.
#[derive(Debug, Clone, Copy)]
pub struct ValidArgs<'a> {
    values: Option<&'a Map<String, Value>>,
}

impl<'a> ValidArgs<'a> {
    /// Fetch a string argument. Absent optional arguments read as "".
    pub fn str(&self, name: &str) -> &'a str {
        self.values
            .and_then(|m| m.get(name))
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("arguments must be an object")]
    NotAnObject,
    #[error("missing required argument \"{0}\"")]
    MissingRequired(&'static str),
    #[error("argument \"{name}\" must be a {expected}")]
    WrongType {
        name: &'static str,
        expected: &'static str,
    },
}
