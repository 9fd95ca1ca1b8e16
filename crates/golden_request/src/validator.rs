//! Request linting.
//!
//! The renderer itself is lenient: role references that do not resolve are
//! dropped and unknown resource types are skipped. The validator surfaces
//! those cases up front so a typo in a resource name does not silently
//! produce a role without grants.

use std::collections::HashSet;

use crate::models::{InfraRequest, ResourceDeclaration, ResourceKind};

/// Validation result with details.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for infrastructure requests.
pub struct RequestValidator;

impl RequestValidator {
    /// Validate an entire request.
    pub fn validate(request: &InfraRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.merge(Self::validate_envelope(request));
        result.merge(Self::validate_names(request));
        result.merge(Self::validate_references(request));

        result
    }

    /// Validate the top-level request fields.
    pub fn validate_envelope(request: &InfraRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if request.app.trim().is_empty() {
            result.add_warning("Request app is empty");
        }

        if request.namespace.trim().is_empty() {
            result.add_warning("Request namespace is empty");
        }

        if request.resources.is_empty() {
            result.add_warning("Request declares no resources");
        }

        let roles = request.of_kind(ResourceKind::Role).count();
        if roles > 1 {
            result.add_warning(format!(
                "Request declares {} irsa_role resources; only the last one is rendered",
                roles
            ));
        }

        result
    }

    /// Validate resource names: unique per data kind, warn when empty.
    pub fn validate_names(request: &InfraRequest) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut seen: HashSet<(ResourceKind, &str)> = HashSet::new();

        for (index, resource) in request.resources.iter().enumerate() {
            let Some(kind) = resource.kind() else {
                result.add_warning(format!(
                    "Resource #{} has unknown type '{}' and will be skipped",
                    index + 1,
                    resource.type_name()
                ));
                continue;
            };

            let name = resource.name().unwrap_or_default();
            if name.trim().is_empty() {
                result.add_warning(format!("Resource #{} ({}) has an empty name", index + 1, kind));
            }

            if kind.is_data() && !seen.insert((kind, name)) {
                result.add_error(format!("Duplicate {} name: {}", kind, name));
            }
        }

        result
    }

    /// Check that every role reference points at a resource declared above it.
    pub fn validate_references(request: &InfraRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (index, resource) in request.resources.iter().enumerate() {
            let ResourceDeclaration::Role(role) = resource else {
                continue;
            };

            let (before, after) = request.resources.split_at(index);
            for (kind, name) in role.references() {
                if Self::declares(before, kind, name) {
                    continue;
                }

                if Self::declares(after, kind, name) {
                    result.add_warning(format!(
                        "Role '{}' references {} '{}' declared after it; the grant will be empty",
                        role.name, kind, name
                    ));
                } else {
                    result.add_warning(format!(
                        "Role '{}' references unknown {} '{}'",
                        role.name, kind, name
                    ));
                }
            }
        }

        result
    }

    fn declares(resources: &[ResourceDeclaration], kind: ResourceKind, name: &str) -> bool {
        resources
            .iter()
            .any(|r| r.kind() == Some(kind) && r.name() == Some(name))
    }
}
