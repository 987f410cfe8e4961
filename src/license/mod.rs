//! License resolution against the catalog.
//!
//! - [`matcher`] - three-tier lookup (artifact FQDN, group + name, unscoped name)
//!   that resolves one artifact to at most one catalog record.

pub mod matcher;
