//! Profile resolution
//!
//! Picks the build profile a selector refers to.

use crate::core::manifest::BuildProfile;
use crate::core::selector::Selector;
use crate::error::ResolverError;

/// Find the profile a selector refers to.
///
/// Profiles are scanned in declaration order. The first profile whose
/// architecture matches wins, provided its subtarget equals the requested one
/// (or no subtarget was requested).
pub fn resolve<'a>(
    profiles: &'a [BuildProfile],
    selector: &Selector,
) -> Result<&'a BuildProfile, ResolverError> {
    profiles
        .iter()
        .find(|profile| {
            profile.architecture == selector.architecture
                && selector
                    .subtarget
                    .as_deref()
                    .map_or(true, |sub| profile.subtarget == sub)
        })
        .ok_or_else(|| ResolverError::NoMatch {
            architecture: selector.architecture.clone(),
            subtarget: selector.subtarget.clone(),
            available: profiles.iter().map(BuildProfile::summary).collect(),
        })
}
