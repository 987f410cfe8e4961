use serde::Serialize;

use crate::error::NoticeError;
use crate::models::LicenseRecord;

/// One of the ordered matching strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// The record is scoped to exactly this `group:artifact`.
    Fqdn,
    /// The record is scoped to the artifact's group and carries the declared name.
    GroupAndName,
    /// The record has no scope and carries the declared name.
    UnscopedName,
}

/// Tiers in priority order. The first tier yielding a single record wins.
pub const TIERS: [Tier; 3] = [Tier::Fqdn, Tier::GroupAndName, Tier::UnscopedName];

impl Tier {
    /// Whether `record` is a candidate for the artifact at this tier.
    pub fn accepts(
        &self,
        record: &LicenseRecord,
        group_id: &str,
        artifact_id: &str,
        license_name: &str,
    ) -> bool {
        match self {
            Tier::Fqdn => {
                record.group_ids.len() == 1
                    && record.group_ids[0] == group_id
                    && record.artifact_id.as_deref() == Some(artifact_id)
            }
            Tier::GroupAndName => {
                record.group_ids.iter().any(|g| g == group_id)
                    && has_name_ignore_case(record, license_name)
            }
            // Exact comparison here, unlike the group tier.
            Tier::UnscopedName => {
                record.is_unscoped() && record.all_names().any(|n| n == license_name)
            }
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Fqdn => write!(f, "artifact FQDN"),
            Tier::GroupAndName => write!(f, "groupId and license name"),
            Tier::UnscopedName => write!(f, "license name"),
        }
    }
}

/// A resolved license and the tier that selected it.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub record: &'a LicenseRecord,
    pub tier: Tier,
}

/// Resolve the license of `group_id:artifact_id`, declared as `license_name`.
///
/// Returns `Ok(None)` when no tier yields a candidate, and
/// [`NoticeError::AmbiguousCatalog`] as soon as a tier yields more than one.
pub fn find_license<'a>(
    group_id: &str,
    artifact_id: &str,
    license_name: &str,
    catalog: &'a [LicenseRecord],
) -> Result<Option<Match<'a>>, NoticeError> {
    for tier in TIERS {
        let candidates: Vec<&LicenseRecord> = catalog
            .iter()
            .filter(|r| tier.accepts(r, group_id, artifact_id, license_name))
            .collect();

        match candidates.as_slice() {
            [] => continue,
            [record] => return Ok(Some(Match { record: *record, tier })),
            _ => {
                return Err(NoticeError::AmbiguousCatalog {
                    tier,
                    group_id: group_id.to_string(),
                    artifact_id: artifact_id.to_string(),
                    license: license_name.to_string(),
                    candidates: candidates.into_iter().map(describe).collect(),
                })
            }
        }
    }

    Ok(None)
}

fn has_name_ignore_case(record: &LicenseRecord, license_name: &str) -> bool {
    let wanted = license_name.to_lowercase();
    record.all_names().any(|n| n.to_lowercase() == wanted)
}

/// Short description of a record for diagnostics.
fn describe(record: &LicenseRecord) -> String {
    match &record.artifact_id {
        Some(artifact) => format!("{} [{}:{}]", record.name, record.group_ids.join("|"), artifact),
        None if record.group_ids.is_empty() => record.name.clone(),
        None => format!("{} [{}]", record.name, record.group_ids.join("|")),
    }
}
