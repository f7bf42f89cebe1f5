use std::io::{self, Write};
use std::path::Path;

use giftgate::storage::{export_roster, save_roster};
use giftgate::{
    CountdownTick, Gate, GateConfig, Profile, RevealEvent, RosterEditor,
    Submission, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::render;

const EXIT_COMMAND: &str = "exit";

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "open", about = "Interactive session at the gate")]
pub struct Open {}

impl Open {
    pub async fn run(
        &self,
        config: &GateConfig,
        roster: Vec<Profile>,
    ) -> Result<(), AppError> {
        let (reveal_tx, mut reveal_rx) = mpsc::unbounded_channel();
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
        let mut gate = Gate::from_config(config, roster)?;
        gate.attach_countdown(tick_tx);
        let mut session = Session {
            gate,
            editor: None,
            reveals: reveal_tx,
        };
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        render::prompt(&session.gate);
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if let Err(err) = session.handle_line(&line) {
                        eprintln!("{}", err);
                    }
                    if !session.gate.is_revealing() {
                        render::prompt(&session.gate);
                    }
                }
                Some(event) = reveal_rx.recv() => session.handle_reveal(event),
                Some(tick) = tick_rx.recv() => session.show_tick(tick),
            }
        }

        println!();
        Ok(())
    }
}

struct Session {
    gate: Gate,
    /// Present while the admin view is open
    editor: Option<RosterEditor>,
    reveals: mpsc::UnboundedSender<RevealEvent>,
}

impl Session {
    fn handle_line(&mut self, line: &str) -> Result<(), AppError> {
        match self.gate.view() {
            View::Landing => self.submit(line),
            View::Content => {
                if line.trim() == EXIT_COMMAND {
                    self.gate.exit_content();
                }
                Ok(())
            }
            View::Admin => self.admin(line),
        }
    }

    fn submit(&mut self, line: &str) -> Result<(), AppError> {
        match self.gate.submit(line) {
            Submission::Ignored => return Ok(()),
            Submission::LogsToggled(true) => {
                render::print_system_log(&self.gate);
                return Ok(());
            }
            Submission::LogsToggled(false) => return Ok(()),
            Submission::Denied => println!("ACCESS DENIED"),
            Submission::Egg(active) => render::print_egg(&active),
            Submission::Reveal(reveal) => {
                tokio::spawn(reveal.play(self.reveals.clone()));
            }
        }

        if self.gate.show_logs() {
            if let Some(entry) = self.gate.system_log().last() {
                println!("  {}", entry);
            }
        }
        Ok(())
    }

    fn handle_reveal(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::Line { text, .. } => println!("{}", text),
            RevealEvent::Complete(_) => {
                match self.gate.finish_reveal() {
                    View::Content => {
                        if let Some(profile) = self.gate.active_profile() {
                            render::print_profile(profile);
                        }
                    }
                    View::Admin => {
                        let editor = RosterEditor::new(self.gate.roster());
                        render::print_roster(editor.profiles());
                        render::print_admin_help();
                        self.editor = Some(editor);
                    }
                    View::Landing => {}
                }
                render::prompt(&self.gate);
            }
        }
    }

    fn show_tick(&self, tick: CountdownTick) {
        // queued by a countdown that was replaced or stopped since
        if !self.gate.is_current_tick(&tick) {
            return;
        }
        print!("\r{}  ", tick.reading);
        let _ = io::stdout().flush();
    }

    fn admin(&mut self, line: &str) -> Result<(), AppError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(());
        };
        let editor = self
            .editor
            .get_or_insert_with(|| RosterEditor::new(self.gate.roster()));

        match command {
            "list" => render::print_roster(editor.profiles()),
            "add" => println!("added profile {}", editor.add_profile()),
            "delete" => {
                let id = words.next().ok_or(AppError::MissingArgument("id"))?;
                editor.remove_profile(id)?;
                println!("deleted profile {}", id);
            }
            "keys" => {
                let id = words.next().ok_or(AppError::MissingArgument("id"))?;
                let csv = words.collect::<Vec<_>>().join(" ");
                editor.set_access_keys_csv(id, &csv)?;
                let keys = editor.get(id)?.access_keys.join(", ");
                println!("keys of {}: {}", id, keys);
            }
            "export" => {
                let roster = editor.roster();
                match words.next() {
                    Some(path) => {
                        save_roster(Path::new(path), &roster)?;
                        println!("roster written to {}", path);
                    }
                    None => println!("{}", export_roster(&roster)?),
                }
            }
            "close" => {
                let roster = editor.roster();
                self.editor = None;
                self.gate.replace_roster(roster);
                self.gate.close_admin();
            }
            "help" => render::print_admin_help(),
            other => return Err(AppError::UnknownCommand(other.to_owned())),
        }
        Ok(())
    }
}
