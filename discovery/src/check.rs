//! Check and discovery orchestration.
//!
//! [`check`] runs every registered requirement against a merged document
//! and produces one [`CheckResult`] per requirement: bind the subtree,
//! evaluate the rules, scan for unknown keys. A failure in one requirement
//! never stops the others; a bind error is reported in that requirement's
//! result and the walk continues.
//!
//! [`discovery_report`] answers "what does this binary expect from its
//! configuration": the sorted requirement table with each requirement's
//! field specification and a ready-to-paste skeleton snippet, plus the
//! unknown keys of a live document when one is supplied.

use confspec_core::{Document, FieldSpec, field_specs, skeleton};
use serde::Serialize;
use tracing::{debug, warn};

use crate::populate::populate;
use crate::registry::{Requirement, RequirementRegistry};
use crate::unknown::find_unknown;
use crate::validate::{Issue, validate};

/// The outcome of checking one requirement against a document.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// The requirement's subtree key.
    pub key: String,
    /// The requirement's type name.
    pub type_name: String,
    /// True when there are no issues, no unknown keys, and no bind error.
    pub ok: bool,
    /// Rule violations, in descriptor walk order.
    pub issues: Vec<Issue>,
    /// Full paths of keys no declared field accounts for, sorted.
    pub unknown: Vec<String>,
    /// Rendered bind failure, when the subtree could not take the declared
    /// shape at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind_error: Option<String>,
}

/// Checks every registered requirement against `document`.
///
/// Results come back sorted by `(key, type_name)`, matching
/// [`RequirementRegistry::requirements`], so repeated checks of the same
/// registry and document produce identical output.
pub fn check(registry: &RequirementRegistry, document: &Document) -> Vec<CheckResult> {
    registry
        .requirements()
        .into_iter()
        .map(|requirement| check_one(&requirement, document))
        .collect()
}

fn check_one(requirement: &Requirement, document: &Document) -> CheckResult {
    let subtree = document.subtree(&requirement.key);
    debug!(
        key = %requirement.key,
        type_name = %requirement.type_name,
        present = subtree.is_some(),
        "checking requirement"
    );

    let (issues, bind_error) = match populate(subtree, &requirement.descriptor) {
        Ok(bound) => (validate(&bound, &requirement.descriptor), None),
        Err(err) => {
            warn!(
                key = %requirement.key,
                type_name = %requirement.type_name,
                error = %err,
                "subtree does not fit the declared shape"
            );
            (Vec::new(), Some(err.to_string()))
        }
    };

    // Unknown paths are relative to the requirement's key, like issue paths.
    let unknown = match subtree {
        Some(node) => find_unknown(node, &requirement.descriptor, ""),
        None => Vec::new(),
    };
    for issue in &issues {
        warn!(
            key = %requirement.key,
            path = %issue.path,
            rule = %issue.rule,
            "rule violated"
        );
    }
    for path in &unknown {
        warn!(key = %requirement.key, path = %path, "unknown configuration key");
    }

    CheckResult {
        key: requirement.key.clone(),
        type_name: requirement.type_name.clone(),
        ok: issues.is_empty() && unknown.is_empty() && bind_error.is_none(),
        issues,
        unknown,
        bind_error,
    }
}

/// One requirement's documentation entry in a [`DiscoveryReport`].
#[derive(Debug, Clone, Serialize)]
pub struct RequirementDoc {
    /// The requirement's subtree key.
    pub key: String,
    /// The requirement's type name.
    pub type_name: String,
    /// Flattened field specification, one row per leaf.
    pub spec: Vec<FieldSpec>,
    /// Ready-to-paste example snippet with placeholder values.
    pub skeleton: String,
}

/// What a binary expects from its configuration, as data.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    /// All registered requirements, sorted by `(key, type_name)`.
    pub requirements: Vec<RequirementDoc>,
    /// Unknown keys found in the supplied document, across all
    /// requirements, sorted and deduplicated. Empty when no document was
    /// supplied.
    pub unknown: Vec<String>,
}

/// Builds the discovery report for `registry`. When a `document` is given,
/// its subtrees are additionally scanned for unknown keys; rule evaluation
/// is left to [`check`].
pub fn discovery_report(
    registry: &RequirementRegistry,
    document: Option<&Document>,
) -> DiscoveryReport {
    let requirements = registry.requirements();
    let mut unknown = Vec::new();
    if let Some(document) = document {
        for requirement in &requirements {
            if let Some(subtree) = document.subtree(&requirement.key) {
                unknown.extend(find_unknown(
                    subtree,
                    &requirement.descriptor,
                    &requirement.key,
                ));
            }
        }
        unknown.sort();
        unknown.dedup();
    }

    let requirements = requirements
        .into_iter()
        .map(|requirement| RequirementDoc {
            spec: field_specs(&requirement.descriptor),
            skeleton: skeleton(&requirement.key, &requirement.descriptor),
            key: requirement.key,
            type_name: requirement.type_name,
        })
        .collect();

    DiscoveryReport {
        requirements,
        unknown,
    }
}
