//! Requirement discovery example.
//!
//! Demonstrates asking a registry what the binary expects from its
//! configuration: the flattened field specification per requirement, a
//! ready-to-paste skeleton snippet, and typo detection against a live
//! document.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p confspec-demos --example discovery_report
//! ```

use confspec_core::{Field, TypeDescriptor};
use confspec_discovery::{RequirementRegistry, discovery_report};
use confspec_loader::DocumentBuilder;

fn main() {
    let registry = RequirementRegistry::new();

    let limits = TypeDescriptor::builder("db.Limits")
        .field(Field::int("max_conns").rules("min=1"))
        .field(Field::duration("idle_timeout"))
        .build()
        .unwrap();
    registry.register(
        "db",
        TypeDescriptor::builder("db.Config")
            .field(Field::string("host").rules("required"))
            .field(Field::int("port"))
            .field(Field::nested("limits", limits))
            .build()
            .unwrap(),
    );

    // A document with a typo, to show unknown-key reporting.
    let document = DocumentBuilder::new()
        .with_inline("db:\n  hosst: db.internal\n  port: 5432\n")
        .build()
        .unwrap();

    let report = discovery_report(&registry, Some(&document));

    for requirement in &report.requirements {
        println!("requirement {} ({})", requirement.key, requirement.type_name);
        for spec in &requirement.spec {
            let marker = if spec.required { " (required)" } else { "" };
            println!("  {}: {}{}", spec.path, spec.kind, marker);
        }
        println!();
        println!("example snippet:");
        print!("{}", requirement.skeleton);
        println!();
    }

    if !report.unknown.is_empty() {
        println!("unknown keys in the supplied document:");
        for path in &report.unknown {
            println!("  {path}");
        }
    }

    println!();
    println!("as JSON:");
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
