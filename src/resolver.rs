//! Classification of a submitted code.
//!
//! Checks run in a fixed order and the first match wins:
//! admin code, then easter eggs of every profile, then access keys.
//! Roster order breaks ties between profiles sharing a code.

use crate::profile::{EasterEgg, Profile};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution<'a> {
    Admin,
    EasterEgg {
        profile: &'a Profile,
        egg: &'a EasterEgg,
    },
    Unlock {
        profile: &'a Profile,
    },
    Denied,
}

impl Resolution<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Admin => "admin",
            Resolution::EasterEgg { .. } => "easter-egg",
            Resolution::Unlock { .. } => "unlock",
            Resolution::Denied => "denied",
        }
    }

    /// Whether this outcome hands over to the reveal sequence
    pub fn reveals(&self) -> bool {
        matches!(self, Resolution::Admin | Resolution::Unlock { .. })
    }
}

/// Resolve raw input against the roster.
///
/// The admin code is compared against the trimmed input verbatim,
/// everything else case-insensitively. Blank input never matches,
/// even when the roster carries blank keys or egg codes.
pub fn resolve<'a>(
    input: &str,
    roster: &'a [Profile],
    admin_code: &str,
) -> Resolution<'a> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        log::debug!("blank input, denied");
        return Resolution::Denied;
    }

    if trimmed == admin_code {
        log::debug!("admin code matched");
        return Resolution::Admin;
    }

    let code = trimmed.to_lowercase();

    if let Some((profile, egg)) = find_egg(&code, roster) {
        log::debug!("easter egg matched on profile {}", profile.id);
        return Resolution::EasterEgg { profile, egg };
    }

    if let Some(profile) = find_profile(&code, roster) {
        log::debug!("access key matched on profile {}", profile.id);
        return Resolution::Unlock { profile };
    }

    log::debug!("no match among {} profiles", roster.len());
    Resolution::Denied
}

fn find_egg<'a>(
    code: &str,
    roster: &'a [Profile],
) -> Option<(&'a Profile, &'a EasterEgg)> {
    roster.iter().find_map(|profile| {
        profile
            .easter_eggs
            .iter()
            .find(|egg| matches(&egg.code, code))
            .map(|egg| (profile, egg))
    })
}

fn find_profile<'a>(code: &str, roster: &'a [Profile]) -> Option<&'a Profile> {
    roster.iter().find(|profile| {
        profile.access_keys.iter().any(|key| matches(key, code))
    })
}

// `code` is already trimmed, lower-cased and non-empty
fn matches(candidate: &str, code: &str) -> bool {
    !candidate.trim().is_empty() && candidate.to_lowercase() == code
}
