use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_THEME_COLOR: &str = "#4A463E";
pub const DEFAULT_BGM_VOLUME: f32 = 0.3;

const YOUTUBE_ID_LEN: usize = 11;

pub type ProfileId = String;

/// A person the page was made for.
///
/// Everything except `access_keys` and `easter_eggs` is presentation
/// payload and is never looked at during resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub access_keys: Vec<String>,
    pub display_name: String,
    pub message: String,
    pub images: Vec<String>,
    pub video_urls: Vec<String>,
    pub spotify_url: Option<String>,
    pub spotify_message: Option<String>,
    pub theme_color: String,
    pub bgm_url: Option<String>,
    pub bgm_volume: f32,
    pub easter_eggs: Vec<EasterEgg>,
}

/// A secret code that answers without unlocking anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EasterEgg {
    pub code: String,
    pub response: String,
    #[serde(flatten)]
    pub kind: EggKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EggKind {
    Text,
    Countdown { date: NaiveDateTime },
    /// `response` holds the URL of the audio cue.
    Audio,
}

impl EasterEgg {
    pub fn text(code: &str, response: &str) -> Self {
        Self {
            code: code.to_owned(),
            response: response.to_owned(),
            kind: EggKind::Text,
        }
    }

    pub fn countdown(code: &str, response: &str, date: NaiveDateTime) -> Self {
        Self {
            code: code.to_owned(),
            response: response.to_owned(),
            kind: EggKind::Countdown { date },
        }
    }

    /// Target of a countdown egg, `None` for every other kind
    pub fn countdown_target(&self) -> Option<NaiveDateTime> {
        match self.kind {
            EggKind::Countdown { date } => Some(date),
            _ => None,
        }
    }
}

/// Parts of the content view, in the order they are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Intro,
    Message,
    Gallery,
    Video,
    Music,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Intro => "Inicio",
            Section::Message => "Mensaje",
            Section::Gallery => "Recuerdos",
            Section::Video => "Video",
            Section::Music => "Música",
        }
    }
}

impl Profile {
    pub fn new(id: &str, access_keys: &[&str], display_name: &str) -> Self {
        Self {
            id: id.to_owned(),
            access_keys: access_keys.iter().map(|k| k.to_string()).collect(),
            display_name: display_name.to_owned(),
            message: String::new(),
            images: vec![],
            video_urls: vec![],
            spotify_url: None,
            spotify_message: None,
            theme_color: DEFAULT_THEME_COLOR.to_owned(),
            bgm_url: None,
            bgm_volume: DEFAULT_BGM_VOLUME,
            easter_eggs: vec![],
        }
    }

    pub fn with_egg(mut self, egg: EasterEgg) -> Self {
        self.easter_eggs.push(egg);
        self
    }

    /// A profile without any non-blank key can never be unlocked.
    pub fn is_reachable(&self) -> bool {
        self.access_keys.iter().any(|k| !k.trim().is_empty())
    }

    /// Sections that have something to show
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = vec![Section::Intro, Section::Message];
        if !self.images.is_empty() {
            sections.push(Section::Gallery);
        }
        if !self.video_urls.is_empty() {
            sections.push(Section::Video);
        }
        if self.spotify_url.as_deref().is_some_and(|u| !u.is_empty()) {
            sections.push(Section::Music);
        }
        sections
    }

    /// Message split into paragraphs on blank lines
    pub fn paragraphs(&self) -> Vec<&str> {
        self.message
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Extract the video id out of the usual YouTube link shapes.
///
/// Handles `watch?v=`, `youtu.be/<id>`, `embed/<id>` and `v/<id>`.
pub fn youtube_id(link: &str) -> Option<String> {
    let url = Url::parse(link.trim()).ok()?;
    let host = url.host_str()?;

    let candidate = if host.ends_with("youtu.be") {
        url.path_segments()?.next().map(str::to_owned)
    } else if host.ends_with("youtube.com") {
        match url.query_pairs().find(|(key, _)| key == "v") {
            Some((_, value)) => Some(value.into_owned()),
            None => {
                let segments: Vec<&str> = url.path_segments()?.collect();
                segments
                    .windows(2)
                    .find(|pair| pair[0] == "embed" || pair[0] == "v")
                    .map(|pair| pair[1].to_owned())
            }
        }
    } else {
        None
    };
    let candidate = candidate?;

    (candidate.len() == YOUTUBE_ID_LEN).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.youtube.com/watch?v=LXb3EKWsInQ", Some("LXb3EKWsInQ"))]
    #[case("https://youtu.be/LXb3EKWsInQ", Some("LXb3EKWsInQ"))]
    #[case("https://www.youtube.com/embed/LXb3EKWsInQ", Some("LXb3EKWsInQ"))]
    #[case(
        "https://www.youtube.com/watch?feature=share&v=LXb3EKWsInQ",
        Some("LXb3EKWsInQ")
    )]
    #[case("https://www.youtube.com/watch?v=short", None)]
    #[case("https://vimeo.com/12345678901", None)]
    #[case("not a url", None)]
    fn youtube_ids(#[case] link: &str, #[case] expected: Option<&str>) {
        assert_eq!(youtube_id(link).as_deref(), expected);
    }

    #[test]
    fn sections_follow_payload() {
        let mut profile = Profile::new("1", &["guest"], "Visitante");
        assert_eq!(profile.sections(), vec![Section::Intro, Section::Message]);

        profile.images.push("https://picsum.photos/600/800".into());
        profile.spotify_url = Some(String::new());
        assert_eq!(
            profile.sections(),
            vec![Section::Intro, Section::Message, Section::Gallery]
        );

        profile.video_urls.push("https://youtu.be/LXb3EKWsInQ".into());
        profile.spotify_url = Some("https://open.spotify.com/track/x".into());
        assert_eq!(
            profile.sections(),
            vec![
                Section::Intro,
                Section::Message,
                Section::Gallery,
                Section::Video,
                Section::Music
            ]
        );
    }

    #[test]
    fn egg_serializes_flat() {
        let date = "2026-01-01T00:00:00".parse().unwrap();
        let egg = EasterEgg::countdown("2026", "NEW YEAR", date);
        let json = serde_json::to_value(&egg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "2026",
                "response": "NEW YEAR",
                "type": "countdown",
                "date": "2026-01-01T00:00:00"
            })
        );
        assert_eq!(egg.countdown_target(), Some(date));
        assert_eq!(EasterEgg::text("help", "no").countdown_target(), None);
    }

    #[test]
    fn blank_keys_are_unreachable() {
        assert!(!Profile::new("1", &[], "x").is_reachable());
        assert!(!Profile::new("1", &["", "  "], "x").is_reachable());
        assert!(Profile::new("1", &["", "guest"], "x").is_reachable());
    }
}
