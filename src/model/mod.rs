mod output;

pub use output::{ModelOutput, extract_json_from_markdown};
