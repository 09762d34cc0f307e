//! Supervised fine-tuning record

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One instruction/input/output example.
///
/// Field order is fixed and is the order written to JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "text_field")]
    pub instruction: String,
    #[serde(deserialize_with = "text_field")]
    pub input: String,
    #[serde(deserialize_with = "text_field")]
    pub output: String,
}

impl Record {
    pub fn new(
        instruction: impl Into<String>,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Accept strings verbatim, `null` as empty, and any other scalar as its JSON text.
fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
