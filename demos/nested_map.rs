//! Reading and editing a document through dotted paths.
//!
//! Run with: cargo run --example nested_map

use serde_dotted::{dotted, DottedValue, NestedMap};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut settings = NestedMap::from_value(dotted!({
        "server.host": "localhost",
        "server.port": 8080,
        "log.level": "info"
    }))?;

    println!("server.port = {}", settings.get("server.port")?);
    println!("has log? {}", settings.contains("log"));

    settings.set("server.tls.enabled", true);
    settings.set("log", "off");

    let fallback = DottedValue::from("none");
    println!("log.level = {}", settings.get_or("log.level", &fallback));

    let (key, removed) = settings.pop_item("server.tls")?;
    println!("removed {} = {}", key, removed);

    for line in settings.flatten() {
        println!("{}", line);
    }

    Ok(())
}
