use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::NoticeError;
use crate::license::matcher::{find_license, Tier};
use crate::models::{ArtifactCoordinate, LicenseRecord};

/// One artifact of the notice with the license it resolved to.
#[derive(Debug, Clone, Serialize)]
pub struct NoticeEntry<'a> {
    pub artifact: ArtifactCoordinate,
    pub license: &'a LicenseRecord,
    pub tier: Tier,
}

/// Outcome of a generation run, ready to be handed to a report sink.
#[derive(Debug, Clone, Serialize)]
pub struct Notice<'a> {
    /// Matched artifacts, ordered by `(group_id, artifact_id)`.
    pub entries: Vec<NoticeEntry<'a>>,
    /// `NO LICENSE FOUND ...` lines, sorted.
    pub errors: Vec<String>,
    /// Artifacts processed, matched or not.
    pub documented: usize,
    /// Artifacts skipped because they carry an excluded license.
    pub excluded: usize,
}

/// Match every artifact against the catalog.
///
/// Artifacts whose declared license is one of `excluded_licenses` are left out
/// of both the entries and the errors. An artifact without a license becomes an
/// error line; an ambiguous catalog aborts the whole run.
pub fn generate<'a>(
    mut artifacts: Vec<ArtifactCoordinate>,
    catalog: &'a [LicenseRecord],
    excluded_licenses: &[String],
) -> Result<Notice<'a>, NoticeError> {
    artifacts.sort_by(ArtifactCoordinate::cmp_coordinates);

    let total = artifacts.len();
    let mut entries = Vec::new();
    let mut errors = Vec::new();

    let included: Vec<ArtifactCoordinate> = artifacts
        .into_iter()
        .filter(|a| !is_excluded(a, excluded_licenses))
        .collect();
    let documented = included.len();

    for artifact in included {
        match find_license(
            &artifact.group_id,
            &artifact.artifact_id,
            &artifact.declared_license,
            catalog,
        )? {
            Some(m) => entries.push(NoticeEntry {
                artifact,
                license: m.record,
                tier: m.tier,
            }),
            None => errors.push(unmatched_line(&artifact)),
        }
    }

    errors.sort();

    Ok(Notice {
        entries,
        errors,
        documented,
        excluded: total - documented,
    })
}

/// Sorted, distinct license labels declared by the non-excluded artifacts.
pub fn distinct_licenses(
    artifacts: &[ArtifactCoordinate],
    excluded_licenses: &[String],
) -> BTreeSet<String> {
    artifacts
        .iter()
        .filter(|a| !is_excluded(a, excluded_licenses))
        .map(|a| a.declared_license.clone())
        .collect()
}

fn is_excluded(artifact: &ArtifactCoordinate, excluded_licenses: &[String]) -> bool {
    excluded_licenses
        .iter()
        .any(|l| *l == artifact.declared_license)
}

fn unmatched_line(artifact: &ArtifactCoordinate) -> String {
    format!(
        "NO LICENSE FOUND for artifact {} {}",
        artifact.fqdn(),
        artifact.declared_license
    )
}
