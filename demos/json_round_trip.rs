//! Converting a JSON document to dotted text and back.
//!
//! Run with: cargo run --example json_round_trip

use serde_dotted::{json_to_text, text_to_json, DottedOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let json = r#"{
        "service": { "name": "api", "replicas": 3 },
        "features": { "beta": true, "regions": ["eu", "us"] }
    }"#;

    let options = DottedOptions::new().with_timestamp_header("service.json");
    let text = json_to_text(json, &options)?;
    println!("{}", text);

    // Leaves come back as strings
    let back = text_to_json(&text, &options)?;
    print!("{}", back);

    Ok(())
}
