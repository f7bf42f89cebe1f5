use chrono::NaiveDate;

use crate::profile::{EasterEgg, Profile};

pub const ADMIN_CODE: &str = "admin4126";

const SPOTIFY_TRACK: &str =
    "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC";

/// Roster shipped with the binary, used when no roster file is configured
/// or the configured one cannot be read.
pub fn seed_roster() -> Vec<Profile> {
    let new_year = NaiveDate::from_ymd_opt(2026, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    let mut guest = Profile::new(
        "1",
        &["guest", "invitado", "visitante"],
        "Querido Visitante",
    )
    .with_egg(EasterEgg::text("help", "NO HELP AVAILABLE. FIGURE IT OUT."))
    .with_egg(EasterEgg::text(
        "love",
        "ERROR 404: EMOTION NOT FOUND IN KERNEL.",
    ))
    .with_egg(EasterEgg::countdown("2026", "NEW YEAR", new_year));

    guest.message = "Gracias por llegar hasta aquí.\n\n\
        Este es un espacio diseñado para la honestidad y la introspección. \
        A veces, el ruido del mundo nos impide decir lo que realmente \
        sentimos.\n\n\
        Espero que encuentres calma en estas palabras."
        .to_owned();
    guest.images = vec![
        "https://picsum.photos/600/800".to_owned(),
        "https://picsum.photos/600/400".to_owned(),
        "https://picsum.photos/500/700".to_owned(),
    ];
    guest.video_urls =
        vec!["https://www.youtube.com/watch?v=LXb3EKWsInQ".to_owned()];
    guest.spotify_url = Some(SPOTIFY_TRACK.to_owned());
    guest.spotify_message = Some(
        "Esta canción suena a como se siente una tarde tranquila de \
         domingo. Me recuerda a nuestra paz."
            .to_owned(),
    );
    guest.bgm_url = Some(
        "https://cdn.pixabay.com/download/audio/2022/05/27/\
         audio_1808fbf07a.mp3?filename=lofi-study-112191.mp3"
            .to_owned(),
    );

    vec![guest]
}
