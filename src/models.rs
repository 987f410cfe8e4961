use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::Serialize;

/// One artifact of the inventory, with the license label it declares for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactCoordinate {
    pub title: String,
    pub group_id: String,
    pub artifact_id: String,
    pub declared_license: String,
}

impl ArtifactCoordinate {
    pub fn new(title: &str, group_id: &str, artifact_id: &str, declared_license: &str) -> Self {
        Self {
            title: title.to_string(),
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            declared_license: declared_license.to_string(),
        }
    }

    /// `group:artifact` form used in the notice and in error lines.
    pub fn fqdn(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Orders artifacts by `(group_id, artifact_id)`; title and license do not take part.
    pub fn cmp_coordinates(&self, other: &Self) -> Ordering {
        self.group_id
            .cmp(&other.group_id)
            .then_with(|| self.artifact_id.cmp(&other.artifact_id))
    }
}

/// A license catalog entry.
///
/// A record is either:
/// - **FQDN scoped**: `artifact_id` is set and `group_ids` holds exactly one group;
/// - **group scoped**: `group_ids` is non-empty and `artifact_id` is `None`;
/// - **unscoped**: no group and no artifact, matched by name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRecord {
    pub artifact_id: Option<String>,
    pub group_ids: Vec<String>,
    pub name: String,
    pub aliases: BTreeSet<String>,
    pub content: String,
}

impl LicenseRecord {
    /// The primary name followed by every alias.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn is_unscoped(&self) -> bool {
        self.group_ids.is_empty() && self.artifact_id.is_none()
    }

    /// A record restricting itself to one artifact must name exactly one group.
    pub fn has_valid_scope(&self) -> bool {
        self.artifact_id.is_none() || self.group_ids.len() == 1
    }
}
