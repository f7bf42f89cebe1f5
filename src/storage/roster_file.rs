use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::legacy::RawProfile;
use crate::profile::Profile;
use crate::seed::seed_roster;
use crate::{GateError, Result};

/*
Note on roster versioning:

Version 1 rosters are a bare JSON array of loosely shaped records, the
way the first editor exported them. Starting from version 2 the roster
is a document `{ "version": 2, "profiles": [...] }` holding records in
their normalized shape. Both are read through the same normalization
pass, so a version 2 reader keeps accepting version 1 exports.
*/
const ROSTER_VERSION: i32 = 2;
const LABEL: &str = "roster";

#[derive(Serialize)]
struct RosterDocument<'a> {
    version: i32,
    profiles: &'a [Profile],
}

#[derive(Deserialize)]
struct RawRosterDocument {
    version: i32,
    profiles: Vec<RawProfile>,
}

/// Parse a roster in any supported version
pub fn parse_roster(content: &str) -> Result<Vec<Profile>> {
    let value: Value = serde_json::from_str(content)?;

    let records: Vec<RawProfile> = match value {
        Value::Array(_) => {
            log::info!("reading version 1 roster");
            serde_json::from_value(value)?
        }
        Value::Object(_) => {
            let document: RawRosterDocument = serde_json::from_value(value)?;
            verify_version(document.version)?;
            document.profiles
        }
        _ => {
            return Err(GateError::Storage(
                LABEL.to_owned(),
                "Roster must be an array or a document".to_owned(),
            ))
        }
    };

    Ok(records.into_iter().map(RawProfile::normalize).collect())
}

pub fn load_roster(path: &Path) -> Result<Vec<Profile>> {
    let content = fs::read_to_string(path)?;
    let roster = parse_roster(&content)?;
    log::info!(
        "{} profiles loaded from {}",
        roster.len(),
        path.display()
    );
    Ok(roster)
}

/// Load the roster at `path`, or the built-in one when there is no path
/// or the file can't be used.
pub fn load_roster_or_seed(path: Option<&Path>) -> Vec<Profile> {
    let Some(path) = path else {
        log::info!("no roster configured, using the built-in one");
        return seed_roster();
    };

    match load_roster(path) {
        Ok(roster) => roster,
        Err(e) => {
            log::error!(
                "Error reading roster {}: {}, using the built-in one",
                path.display(),
                e
            );
            seed_roster()
        }
    }
}

/// Serialize the roster as a current-version document
pub fn export_roster(roster: &[Profile]) -> Result<String> {
    let document = RosterDocument {
        version: ROSTER_VERSION,
        profiles: roster,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn save_roster(path: &Path, roster: &[Profile]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, export_roster(roster)?)?;
    log::info!("{} profiles written to {}", roster.len(), path.display());
    Ok(())
}

fn verify_version(version: i32) -> Result<()> {
    if version > ROSTER_VERSION {
        return Err(GateError::Storage(
            LABEL.to_owned(),
            "Roster format is newer than the app".to_owned(),
        ));
    }
    Ok(())
}
