//! Bootstrap-time configuration checking example.
//!
//! Demonstrates the full flow a service runs at startup: modules register
//! their configuration requirements, the layered document is loaded and
//! merged, every requirement is checked, and the redacted effective
//! configuration is printed.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p confspec-demos --example bootstrap_check
//! ```
//!
//! This example uses inline YAML layers to stay self-contained.

use confspec_core::{Field, TypeDescriptor, redact};
use confspec_discovery::{RequirementRegistry, check};
use confspec_loader::DocumentBuilder;

fn main() {
    let registry = RequirementRegistry::new();

    // Each module declares its own subtree during bootstrap.
    registry.register(
        "db",
        TypeDescriptor::builder("db.Config")
            .field(Field::string("host").rules("required"))
            .field(Field::int("port").rules("min=1,max=65535"))
            .field(Field::string("password"))
            .field(Field::duration("timeout"))
            .build()
            .unwrap(),
    );
    registry.register(
        "http",
        TypeDescriptor::builder("http.Config")
            .field(Field::string("addr").rules("required"))
            .field(Field::string("mode").rules("oneof=plain tls"))
            .build()
            .unwrap(),
    );

    // Defaults layer, then an environment-specific override layer.
    let document = DocumentBuilder::new()
        .with_inline(concat!(
            "db:\n",
            "  host: localhost\n",
            "  port: 5432\n",
            "  timeout: 250ms\n",
            "http:\n",
            "  addr: \":8080\"\n",
            "  mode: plain\n",
        ))
        .with_inline(concat!(
            "db:\n",
            "  host: db.internal\n",
            "  password: ${DB_PASSWORD:hunter2}\n",
        ))
        .build()
        .unwrap();

    let results = check(&registry, &document);
    for result in &results {
        let verdict = if result.ok { "ok" } else { "FAILED" };
        println!("{} ({}): {}", result.key, result.type_name, verdict);
        for issue in &result.issues {
            println!("  rule {} violated at {}", issue.rule, issue.path);
        }
        for path in &result.unknown {
            println!("  unknown key {path}");
        }
        if let Some(error) = &result.bind_error {
            println!("  bind error: {error}");
        }
    }

    println!();
    println!("effective configuration (secrets masked):");
    let masked = redact(document.root());
    println!("{}", serde_json::to_string_pretty(&masked).unwrap());
}
