//! Render summary and non-fatal findings.

use golden_request::ResourceKind;

/// A role reference that did not resolve to a previously rendered resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub role: String,
    pub kind: ResourceKind,
    pub name: String,
}

impl std::fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "role '{}' -> {} '{}'", self.role, self.kind, self.name)
    }
}

/// What a render produced, plus everything it tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub buckets: usize,
    pub databases: usize,
    pub secrets: usize,
    pub clusters: usize,
    pub roles: usize,
    /// Unknown resource types, in declaration order.
    pub skipped: Vec<String>,
    /// Role references dropped because nothing earlier declared them.
    pub unresolved: Vec<UnresolvedReference>,
    /// SSM parameter paths that overwrote a different path with the same key.
    pub collisions: Vec<String>,
}

impl RenderReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"1 S3, 0 RDS, 2 Secrets"`, with clusters appended when present.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} S3, {} RDS, {} Secrets",
            self.buckets, self.databases, self.secrets
        );
        if self.clusters > 0 {
            summary.push_str(&format!(", {} Clusters", self.clusters));
        }
        summary
    }

    pub fn has_warnings(&self) -> bool {
        !self.skipped.is_empty() || !self.unresolved.is_empty() || !self.collisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let mut report = RenderReport::new();
        report.buckets = 1;
        report.secrets = 2;
        assert_eq!(report.summary(), "1 S3, 0 RDS, 2 Secrets");

        report.clusters = 1;
        assert_eq!(report.summary(), "1 S3, 0 RDS, 2 Secrets, 1 Clusters");
    }

    #[test]
    fn test_has_warnings() {
        let mut report = RenderReport::new();
        assert!(!report.has_warnings());

        report.unresolved.push(UnresolvedReference {
            role: "api".to_string(),
            kind: ResourceKind::Bucket,
            name: "missing".to_string(),
        });
        assert!(report.has_warnings());
        assert_eq!(report.unresolved[0].to_string(), "role 'api' -> s3_bucket 'missing'");
    }
}
