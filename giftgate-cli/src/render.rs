use std::io::{self, Write};

use giftgate::profile::youtube_id;
use giftgate::{ActiveEgg, EggKind, Gate, Profile, Section, View};

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

pub fn prompt(gate: &Gate) {
    match gate.view() {
        View::Landing => print!("código> "),
        View::Content => print!("(exit)> "),
        View::Admin => print!("admin> "),
    }
    let _ = io::stdout().flush();
}

pub fn print_profile(profile: &Profile) {
    for section in profile.sections() {
        println!("\n== {} ==", section.label());
        match section {
            Section::Intro => println!("{}", profile.display_name),
            Section::Message => {
                for paragraph in profile.paragraphs() {
                    println!("{}\n", paragraph);
                }
            }
            Section::Gallery => {
                for image in &profile.images {
                    println!("  {}", image);
                }
            }
            Section::Video => {
                for link in &profile.video_urls {
                    match youtube_id(link) {
                        Some(id) => println!("  {}{}", YOUTUBE_EMBED, id),
                        None => println!("  {}", link),
                    }
                }
            }
            Section::Music => {
                if let Some(url) = &profile.spotify_url {
                    println!("  {}", url);
                }
                if let Some(message) = &profile.spotify_message {
                    println!("  {}", message);
                }
            }
        }
    }

    if let Some(bgm) = &profile.bgm_url {
        println!(
            "\n(music {} at {:.0}%)",
            bgm,
            profile.bgm_volume * 100.0
        );
    }
}

pub fn print_egg(active: &ActiveEgg) {
    let response = &active.egg.response;
    match &active.egg.kind {
        EggKind::Text => println!("{}", response),
        EggKind::Countdown { date } => println!("{} [{}]", response, date),
        EggKind::Audio => println!("(audio) {}", response),
    }
}

pub fn print_roster(roster: &[Profile]) {
    for profile in roster {
        println!(
            "{}\t{}\tkeys: {}\teggs: {}",
            profile.id,
            profile.display_name,
            profile.access_keys.join(", "),
            profile.easter_eggs.len()
        );
    }
}

pub fn print_admin_help() {
    println!(
        "commands: list | add | delete <id> | keys <id> <a, b> | \
         export [path] | close"
    );
}

pub fn print_system_log(gate: &Gate) {
    for entry in gate.system_log() {
        println!("  {}", entry);
    }
}
