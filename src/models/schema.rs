//! Schema Registry
//!
//! JSON Schema of the persisted record shapes, for the database viewer and
//! other external tooling.

use schemars::schema_for;
use serde_json::{json, Value};

use super::types::{Order, Testimonial};

/// `{"order": <schema>, "testimonial": <schema>}`
pub fn schema_document() -> Value {
    json!({
        "order": schema_for!(Order),
        "testimonial": schema_for!(Testimonial),
    })
}
