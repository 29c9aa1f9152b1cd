//! Basic dotted-text serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_dotted::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    host: String,
    port: u16,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    database: Database,
    replicas: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "inventory".to_string(),
        database: Database {
            host: "db.internal".to_string(),
            port: 5432,
        },
        replicas: vec!["r1.internal".to_string(), "r2.internal".to_string()],
    };

    // Serialize to dotted text
    let text = to_string(&config)?;
    println!("Dotted text:\n{}", text);

    // Deserialize back
    let config_back: Config = from_str(&text)?;
    assert_eq!(config, config_back);
    println!("Round trip successful");

    Ok(())
}
