mod builder;
mod format;
mod validate;

pub use builder::SchemaBuilder;
pub use format::format_instructions;
pub use validate::validate_value;

use serde_json::Value;

/// Schema is a representation of a JSON Schema that describes the structure
/// the model should return.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub schema: Value,
}

impl Schema {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    pub fn to_json(&self) -> &Value {
        &self.schema
    }

    /// Schema description, if one was declared
    pub fn description(&self) -> Option<&str> {
        self.schema.get("description").and_then(Value::as_str)
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema)
    }
}

/// SchemaType trait defines a type that can be converted to a JSON Schema
pub trait SchemaType {
    /// Generate a JSON Schema representation of this type
    fn schema() -> Schema;

    /// Optional name for the schema; used as the function name in function-calling mode
    fn schema_name() -> Option<String> {
        None
    }
}
