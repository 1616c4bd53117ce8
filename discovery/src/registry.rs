//! The process-wide requirement registry.
//!
//! Application modules declare, during bootstrap, which configuration
//! subtree they depend on and what shape they expect it to have. The
//! registry deduplicates those declarations by `(key, signature)` and hands
//! out sorted snapshots to the check and discovery operations.
//!
//! The registry is an explicit object owned by the application's bootstrap
//! sequence and shared by reference — there is no hidden global state.
//!
//! # Examples
//!
//! ```
//! use confspec_core::{Field, TypeDescriptor};
//! use confspec_discovery::RequirementRegistry;
//!
//! let registry = RequirementRegistry::new();
//! let descriptor = TypeDescriptor::builder("db.Config")
//!     .field(Field::string("host").rules("required"))
//!     .build()
//!     .unwrap();
//!
//! registry.register("db", descriptor.clone());
//! registry.register("db", descriptor); // idempotent
//!
//! let requirements = registry.requirements();
//! assert_eq!(requirements.len(), 1);
//! assert_eq!(requirements[0].key, "db");
//! assert_eq!(requirements[0].type_name, "db.Config");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use confspec_core::{FieldSpec, TypeDescriptor, field_specs, skeleton};
use serde::Serialize;
use thiserror::Error;

/// A registered configuration requirement: a subtree key paired with the
/// descriptor of the shape a module expects there.
#[derive(Debug, Clone, Serialize)]
pub struct Requirement {
    /// Dot-separated subtree key; `""` denotes the whole document.
    pub key: String,
    /// Human-readable name of the expected shape.
    pub type_name: String,
    /// Stable textual form of the descriptor, used for deduplication.
    pub signature: String,
    /// The declared shape.
    #[serde(skip)]
    pub descriptor: Arc<TypeDescriptor>,
}

/// Lookup failure for [`RequirementRegistry::spec`] and
/// [`RequirementRegistry::skeleton`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// No requirement with this key and type name is registered.
    #[error("requirement not found for key {key:?} type {type_name:?}")]
    NotFound {
        /// The requested subtree key.
        key: String,
        /// The requested type name.
        type_name: String,
    },
}

#[derive(Debug, Default)]
struct RegistryState {
    seen: HashSet<(String, String)>,
    entries: Vec<Requirement>,
}

/// Deduplicated table of configuration requirements.
///
/// Registrations may occur concurrently during modules' independent
/// initialization; a single mutex guards the table, and snapshot-producing
/// operations copy the entries out before doing any recursive work so the
/// lock is never held across a validation walk.
#[derive(Debug, Default)]
pub struct RequirementRegistry {
    state: Mutex<RegistryState>,
}

impl RequirementRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a requirement for `key`.
    ///
    /// Registration is atomic and idempotent: a second registration with the
    /// same key and an identical descriptor signature is a no-op, while the
    /// same key with a different shape yields a second, distinct entry.
    pub fn register(&self, key: impl Into<String>, descriptor: TypeDescriptor) {
        self.register_shared(key, Arc::new(descriptor));
    }

    /// Registers an already-shared descriptor without cloning it.
    pub fn register_shared(&self, key: impl Into<String>, descriptor: Arc<TypeDescriptor>) {
        let key = key.into();
        let signature = descriptor.signature();
        let mut state = self.lock();
        if state.seen.insert((key.clone(), signature.clone())) {
            state.entries.push(Requirement {
                type_name: descriptor.type_name.clone(),
                key,
                signature,
                descriptor,
            });
        }
    }

    /// Returns a snapshot of all registered requirements, sorted by
    /// `(key, type_name)`. Repeated calls without new registrations return
    /// identical output.
    pub fn requirements(&self) -> Vec<Requirement> {
        let mut out = self.lock().entries.clone();
        out.sort_by(|a, b| (a.key.as_str(), a.type_name.as_str()).cmp(&(b.key.as_str(), b.type_name.as_str())));
        out
    }

    /// Returns the flattened field specification for a requirement.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::NotFound`] when no requirement with this key and
    /// type name is registered.
    pub fn spec(&self, requirement: &Requirement) -> Result<Vec<FieldSpec>, SpecError> {
        let descriptor = self.find(requirement)?;
        Ok(field_specs(&descriptor))
    }

    /// Renders an example document snippet for a requirement.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::NotFound`] when no requirement with this key and
    /// type name is registered.
    pub fn skeleton(&self, requirement: &Requirement) -> Result<String, SpecError> {
        let descriptor = self.find(requirement)?;
        Ok(skeleton(&requirement.key, &descriptor))
    }

    /// Clears all registered requirements. Intended for test isolation only;
    /// application code registers during bootstrap and never resets.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.seen.clear();
        state.entries.clear();
    }

    fn find(&self, requirement: &Requirement) -> Result<Arc<TypeDescriptor>, SpecError> {
        let state = self.lock();
        state
            .entries
            .iter()
            .find(|entry| {
                entry.key == requirement.key && entry.type_name == requirement.type_name
            })
            .map(|entry| Arc::clone(&entry.descriptor))
            .ok_or_else(|| SpecError::NotFound {
                key: requirement.key.clone(),
                type_name: requirement.type_name.clone(),
            })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
