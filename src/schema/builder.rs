use serde_json::{Map, Value, json};

use super::Schema;

/// SchemaBuilder helps construct an object JSON Schema incrementally
#[derive(Default)]
pub struct SchemaBuilder {
    title: Option<String>,
    description: Option<String>,
    properties: Map<String, Value>,
    required: Vec<String>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        property_schema: Value,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(name.clone(), property_schema);
        if required && !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    pub fn build(self) -> Schema {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(self.properties),
        });

        if let Some(title) = self.title {
            schema["title"] = json!(title);
        }

        if let Some(description) = self.description {
            schema["description"] = json!(description);
        }

        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }

        Schema::new(schema)
    }
}
