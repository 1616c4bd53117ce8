//! End-to-end exercises of the registry against loader-built documents.

use confspec_core::{Field, TypeDescriptor};
use confspec_discovery::{RequirementRegistry, check, discovery_report};
use confspec_loader::DocumentBuilder;

fn db_registry() -> RequirementRegistry {
    let limits = TypeDescriptor::builder("db.Limits")
        .field(Field::int("max_conns").rules("min=1"))
        .build()
        .unwrap();
    let registry = RequirementRegistry::new();
    registry.register(
        "db",
        TypeDescriptor::builder("db.Config")
            .field(Field::string("host").rules("required"))
            .field(Field::int("port").rules("min=1,max=65535"))
            .field(Field::duration("timeout"))
            .field(Field::nested("limits", limits))
            .build()
            .unwrap(),
    );
    registry
}

#[test]
fn test_layered_document_passes_check() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: placeholder\n  port: 5432\n")
        .with_inline("db:\n  host: db.internal\n  timeout: 250ms\n")
        .build_with(|_| None)
        .unwrap();

    let results = check(&db_registry(), &document);
    assert_eq!(results.len(), 1);
    assert!(results[0].ok, "got {:?}", results[0]);
}

#[test]
fn test_missing_required_and_out_of_range_are_both_reported() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  port: 0\n")
        .build_with(|_| None)
        .unwrap();

    let results = check(&db_registry(), &document);
    let issues = &results[0].issues;
    assert!(issues.iter().any(|i| i.path == "host" && i.rule == "required"));
    assert!(issues.iter().any(|i| i.path == "port" && i.rule == "min"));
}

#[test]
fn test_environment_expansion_feeds_validation() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: ${DB_HOST:fallback}\n  port: ${DB_PORT}\n")
        .build_with(|name| match name {
            "DB_PORT" => Some("5432".to_string()),
            _ => None,
        })
        .unwrap();

    let results = check(&db_registry(), &document);
    assert!(results[0].ok, "got {:?}", results[0]);
}

#[test]
fn test_unknown_key_in_merged_document_is_flagged() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: db.internal\n")
        .with_inline("db:\n  hosst: typo\n")
        .build_with(|_| None)
        .unwrap();

    let results = check(&db_registry(), &document);
    assert!(!results[0].ok);
    assert_eq!(results[0].unknown, vec!["hosst".to_string()]);

    // The aggregated report spans requirements, so its paths keep the key.
    let report = discovery_report(&db_registry(), Some(&document));
    assert_eq!(report.unknown, vec!["db.hosst".to_string()]);
}

#[test]
fn test_overflowing_duration_surfaces_as_bind_error() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: db.internal\n  timeout: 99999999999999999999s\n")
        .build_with(|_| None)
        .unwrap();

    let results = check(&db_registry(), &document);
    assert!(!results[0].ok);
    let error = results[0].bind_error.as_deref().unwrap();
    assert!(error.contains("duration"), "got {error}");
}

#[test]
fn test_later_layers_override_earlier_ones_before_validation() {
    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: db.internal\n  port: 70000\n")
        .with_inline("db:\n  port: 5432\n")
        .build_with(|_| None)
        .unwrap();

    let results = check(&db_registry(), &document);
    assert!(results[0].ok, "got {:?}", results[0]);
}

#[test]
fn test_report_skeleton_matches_registered_shape() {
    let report = discovery_report(&db_registry(), None);
    assert_eq!(report.requirements.len(), 1);
    assert_eq!(
        report.requirements[0].skeleton,
        "db:\n  host: \"\"  # required\n  limits:\n    max_conns: 0\n  port: 0\n  timeout: \"1s\"\n"
    );
}

#[test]
fn test_duplicate_registration_across_modules_is_collapsed() {
    let registry = db_registry();
    let again = db_registry();
    for requirement in again.requirements() {
        registry.register_shared(requirement.key.clone(), requirement.descriptor);
    }
    assert_eq!(registry.requirements().len(), 1);

    let document = DocumentBuilder::new()
        .with_inline("db:\n  host: db.internal\n")
        .build_with(|_| None)
        .unwrap();
    assert_eq!(check(&registry, &document).len(), 1);
}
