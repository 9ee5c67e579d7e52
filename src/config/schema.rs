use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "regions": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1
            },
            "include_databases": { "type": "boolean" },
            "deadline_secs": { "type": "integer", "minimum": 1 },
            "bucket_region": { "type": "string" },
            "stats": {
                "type": "object",
                "properties": {
                    "command": { "type": "string" }
                }
            }
        }
    })
});
