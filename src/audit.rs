//! Non-fatal checks over a roster.
//!
//! Resolution never fails on odd data: blank entries are simply inert and
//! shared codes resolve to the first profile in roster order. The audit
//! spells out which entries end up unreachable so the editor can fix them.

use std::collections::HashMap;
use std::fmt;

use crate::profile::{Profile, ProfileId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    NoAccessKey {
        profile: ProfileId,
    },
    BlankEggCode {
        profile: ProfileId,
        index: usize,
    },
    /// Admin code shadows an access key or egg code of a profile
    AdminCodeShadows {
        profile: ProfileId,
    },
    /// Two profiles share an access key, only the first one is reachable
    SharedAccessKey {
        code: String,
        winner: ProfileId,
        shadowed: ProfileId,
    },
    SharedEggCode {
        code: String,
        winner: ProfileId,
        shadowed: ProfileId,
    },
    /// An egg code equal to an access key makes the key unusable
    EggShadowsKey {
        code: String,
        egg_owner: ProfileId,
        key_owner: ProfileId,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NoAccessKey { profile } => {
                write!(f, "profile {} has no access key", profile)
            }
            Finding::BlankEggCode { profile, index } => {
                write!(f, "egg #{} of profile {} has no code", index, profile)
            }
            Finding::AdminCodeShadows { profile } => write!(
                f,
                "profile {} uses the admin code as a key or egg code",
                profile
            ),
            Finding::SharedAccessKey {
                code,
                winner,
                shadowed,
            } => write!(
                f,
                "access key '{}' of profile {} is taken by profile {}",
                code, shadowed, winner
            ),
            Finding::SharedEggCode {
                code,
                winner,
                shadowed,
            } => write!(
                f,
                "egg '{}' of profile {} is taken by profile {}",
                code, shadowed, winner
            ),
            Finding::EggShadowsKey {
                code,
                egg_owner,
                key_owner,
            } => write!(
                f,
                "access key '{}' of profile {} is taken by an egg of \
                 profile {}",
                code, key_owner, egg_owner
            ),
        }
    }
}

pub fn audit(roster: &[Profile], admin_code: &str) -> Vec<Finding> {
    let mut findings = vec![];
    let mut key_owners: HashMap<String, &ProfileId> = HashMap::new();
    let mut egg_owners: HashMap<String, &ProfileId> = HashMap::new();

    for profile in roster {
        let mut admin_shadowed = false;

        for (index, egg) in profile.easter_eggs.iter().enumerate() {
            let code = egg.code.trim();
            if code.is_empty() {
                findings.push(Finding::BlankEggCode {
                    profile: profile.id.clone(),
                    index,
                });
                continue;
            }
            admin_shadowed |= code == admin_code;

            let code = code.to_lowercase();
            match egg_owners.get(&code) {
                Some(winner) if **winner != profile.id => {
                    findings.push(Finding::SharedEggCode {
                        code,
                        winner: (*winner).clone(),
                        shadowed: profile.id.clone(),
                    })
                }
                Some(_) => {}
                None => {
                    egg_owners.insert(code, &profile.id);
                }
            }
        }

        if !profile.is_reachable() {
            findings.push(Finding::NoAccessKey {
                profile: profile.id.clone(),
            });
        }

        for key in &profile.access_keys {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            admin_shadowed |= key == admin_code;

            let key = key.to_lowercase();
            match key_owners.get(&key) {
                Some(winner) if **winner != profile.id => {
                    findings.push(Finding::SharedAccessKey {
                        code: key,
                        winner: (*winner).clone(),
                        shadowed: profile.id.clone(),
                    })
                }
                Some(_) => {}
                None => {
                    key_owners.insert(key, &profile.id);
                }
            }
        }

        if admin_shadowed {
            findings.push(Finding::AdminCodeShadows {
                profile: profile.id.clone(),
            });
        }
    }

    // Eggs are searched before keys across the whole roster
    for profile in roster {
        for key in &profile.access_keys {
            let key = key.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            if let Some(egg_owner) = egg_owners.get(&key) {
                let finding = Finding::EggShadowsKey {
                    code: key,
                    egg_owner: (*egg_owner).clone(),
                    key_owner: profile.id.clone(),
                };
                if !findings.contains(&finding) {
                    findings.push(finding);
                }
            }
        }
    }

    for finding in &findings {
        log::warn!("roster audit: {}", finding);
    }
    findings
}
