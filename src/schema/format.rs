use serde_json::Value;

use super::Schema;

/// Render the textual format instruction embedded in structured-output prompts.
///
/// The model is asked for a single JSON object matching `schema`, optionally inside a
/// ```json fenced block; the parser on the other side accepts both forms.
pub fn format_instructions(schema: &Schema) -> String {
    // The title is a Rust type name and only adds noise for the model.
    let mut shown = schema.to_json().clone();
    if let Value::Object(map) = &mut shown {
        map.remove("title");
    }
    let rendered = serde_json::to_string(&shown).unwrap_or_else(|_| shown.to_string());

    format!(
        "You must format your output as a JSON value that adheres to the \"JSON Schema\" instance below.\n\
\n\
Every property listed under \"required\" must be present, each value must have the declared \"type\", \
and numbers must lie between \"minimum\" and \"maximum\" where those are given. \
Do not wrap the object in another object and do not add trailing commas.\n\
\n\
Your output will be parsed and type-checked against this schema:\n\
```json\n\
{rendered}\n\
```"
    )
}
