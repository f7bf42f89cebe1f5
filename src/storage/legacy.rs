use serde::Deserialize;

use crate::countdown::parse_target;
use crate::profile::{
    EasterEgg, EggKind, Profile, DEFAULT_BGM_VOLUME, DEFAULT_THEME_COLOR,
};

/// Loosely shaped profile record, as written by every past version of
/// the roster format.
///
/// Older records carry a single `name` instead of `accessKeys` and a
/// single `videoUrl` instead of `videoUrls`; eggs may lack a `type`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawProfile {
    id: Option<String>,
    name: Option<String>,
    access_keys: Option<Vec<String>>,
    display_name: Option<String>,
    message: Option<String>,
    images: Option<Vec<String>>,
    video_url: Option<String>,
    video_urls: Option<Vec<String>>,
    spotify_url: Option<String>,
    spotify_message: Option<String>,
    theme_color: Option<String>,
    bgm_url: Option<String>,
    bgm_volume: Option<f32>,
    easter_eggs: Option<Vec<RawEgg>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEgg {
    code: String,
    response: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    date: Option<String>,
}

impl RawProfile {
    /// Bring the record into the current shape.
    pub(crate) fn normalize(self) -> Profile {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let access_keys = match self.access_keys {
            Some(keys) => keys,
            None => self.name.into_iter().collect(),
        }
        .into_iter()
        .map(|k| k.trim().to_owned())
        .collect::<Vec<_>>();

        if !access_keys.iter().any(|k| !k.is_empty()) {
            log::warn!("profile {} has no access key and is unreachable", id);
        }

        let mut video_urls = non_blank(self.video_urls.unwrap_or_default());
        if video_urls.is_empty() {
            video_urls.extend(present(self.video_url));
        }

        let easter_eggs = self
            .easter_eggs
            .unwrap_or_default()
            .into_iter()
            .map(|egg| egg.normalize(&id))
            .collect();

        Profile {
            access_keys,
            display_name: self.display_name.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            images: non_blank(self.images.unwrap_or_default()),
            video_urls,
            spotify_url: present(self.spotify_url),
            spotify_message: present(self.spotify_message),
            theme_color: present(self.theme_color)
                .unwrap_or_else(|| DEFAULT_THEME_COLOR.to_owned()),
            bgm_url: present(self.bgm_url),
            bgm_volume: self
                .bgm_volume
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(DEFAULT_BGM_VOLUME),
            easter_eggs,
            id,
        }
    }
}

impl RawEgg {
    fn normalize(self, profile_id: &str) -> EasterEgg {
        let code = self.code.trim().to_owned();
        if code.is_empty() {
            log::warn!("profile {} has an egg without code", profile_id);
        }

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some("text") => EggKind::Text,
            Some("audio") => EggKind::Audio,
            Some("countdown") => {
                match self.date.as_deref().map(parse_target) {
                    Some(Ok(date)) => EggKind::Countdown { date },
                    Some(Err(e)) => {
                        log::warn!(
                            "egg {} of profile {} has a bad date ({}), \
                             shown as text",
                            code,
                            profile_id,
                            e
                        );
                        EggKind::Text
                    }
                    None => {
                        log::warn!(
                            "countdown egg {} of profile {} has no date, \
                             shown as text",
                            code,
                            profile_id
                        );
                        EggKind::Text
                    }
                }
            }
            Some(other) => {
                log::warn!(
                    "egg {} of profile {} has unknown type {}, shown as text",
                    code,
                    profile_id,
                    other
                );
                EggKind::Text
            }
        };

        EasterEgg {
            code,
            response: self.response,
            kind,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values.into_iter().filter(|v| !v.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: serde_json::Value) -> Profile {
        serde_json::from_value::<RawProfile>(value)
            .unwrap()
            .normalize()
    }

    #[test]
    fn name_becomes_access_key() {
        let profile = normalize(json!({"id": "7", "name": "Alex"}));
        assert_eq!(profile.access_keys, vec!["Alex"]);
        assert_eq!(profile.theme_color, DEFAULT_THEME_COLOR);
        assert_eq!(profile.bgm_volume, DEFAULT_BGM_VOLUME);
    }

    #[test]
    fn access_keys_win_over_name() {
        let profile = normalize(json!({
            "id": "7",
            "name": "Alex",
            "accessKeys": [" alex ", "sasha"]
        }));
        assert_eq!(profile.access_keys, vec!["alex", "sasha"]);
    }

    #[test]
    fn no_keys_at_all() {
        let profile = normalize(json!({"id": "7"}));
        assert!(profile.access_keys.is_empty());
        assert!(!profile.is_reachable());
    }

    #[test]
    fn single_video_is_migrated() {
        let profile = normalize(json!({
            "id": "1",
            "videoUrl": "https://youtu.be/LXb3EKWsInQ"
        }));
        assert_eq!(profile.video_urls, vec!["https://youtu.be/LXb3EKWsInQ"]);

        let profile = normalize(json!({
            "id": "1",
            "videoUrl": "https://youtu.be/old",
            "videoUrls": ["https://youtu.be/new"]
        }));
        assert_eq!(profile.video_urls, vec!["https://youtu.be/new"]);

        let profile = normalize(json!({"id": "1", "videoUrl": ""}));
        assert!(profile.video_urls.is_empty());
    }

    #[test]
    fn eggs_get_a_kind() {
        let profile = normalize(json!({
            "id": "1",
            "accessKeys": ["guest"],
            "easterEggs": [
                {"code": "help", "response": "none"},
                {"code": "2026", "type": "countdown", "response": "NEW YEAR",
                 "date": "2026-01-01T00:00:00"},
                {"code": "late", "type": "countdown", "response": "x"},
                {"code": "bad", "type": "countdown", "response": "x",
                 "date": "someday"},
                {"code": "song", "type": "audio", "response": "https://a/b.mp3"},
                {"code": "odd", "type": "video", "response": "x"}
            ]
        }));

        let kinds: Vec<&EggKind> =
            profile.easter_eggs.iter().map(|e| &e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &EggKind::Text,
                &EggKind::Countdown {
                    date: "2026-01-01T00:00:00".parse().unwrap()
                },
                &EggKind::Text,
                &EggKind::Text,
                &EggKind::Audio,
                &EggKind::Text,
            ]
        );
    }

    #[test]
    fn missing_id_is_generated() {
        let first = normalize(json!({"accessKeys": ["a"]}));
        let second = normalize(json!({"accessKeys": ["a"]}));
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn volume_is_clamped() {
        assert_eq!(normalize(json!({"id": "1", "bgmVolume": 3.0})).bgm_volume, 1.0);
        assert_eq!(normalize(json!({"id": "1", "bgmVolume": -1.0})).bgm_volume, 0.0);
    }
}
