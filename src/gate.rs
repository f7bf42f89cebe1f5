use std::collections::VecDeque;

use chrono::Local;
use tokio::sync::mpsc;

use crate::config::{GateConfig, DEFAULT_LOG_KEYWORD};
use crate::countdown::{CountdownTick, CountdownTicker};
use crate::profile::{EasterEgg, Profile, ProfileId};
use crate::resolver::{resolve, Resolution};
use crate::reveal::{RevealScript, RevealSequencer, RevealTarget};
use crate::Result;

const SYSTEM_LOG_CAPACITY: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Landing,
    Content,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveEgg {
    pub profile_id: ProfileId,
    pub egg: EasterEgg,
}

/// What the front-end has to do after a submission
#[derive(Debug)]
pub enum Submission {
    /// Blank input, input outside the landing view, or a reveal in flight
    Ignored,
    Denied,
    LogsToggled(bool),
    Egg(ActiveEgg),
    /// Play the sequence, then call [`Gate::finish_reveal`]
    Reveal(RevealSequencer),
}

/// Application state owned by the front-end.
///
/// Every submission goes through [`Gate::submit`], which keeps at most
/// one reveal in flight. The countdown of the active egg lives and dies
/// with it.
#[derive(Debug)]
pub struct Gate {
    view: View,
    roster: Vec<Profile>,
    admin_code: String,
    log_keyword: Option<String>,
    script: RevealScript,
    active_profile: Option<Profile>,
    pending_profile: Option<Profile>,
    active_egg: Option<ActiveEgg>,
    ticker: CountdownTicker,
    ticks: Option<mpsc::UnboundedSender<CountdownTick>>,
    revealing: bool,
    show_logs: bool,
    system_log: VecDeque<String>,
}

impl Gate {
    pub fn new(roster: Vec<Profile>, admin_code: &str) -> Self {
        Self {
            view: View::Landing,
            roster,
            admin_code: admin_code.to_owned(),
            log_keyword: Some(DEFAULT_LOG_KEYWORD.to_owned()),
            script: RevealScript::default(),
            active_profile: None,
            pending_profile: None,
            active_egg: None,
            ticker: CountdownTicker::new(),
            ticks: None,
            revealing: false,
            show_logs: false,
            system_log: VecDeque::with_capacity(SYSTEM_LOG_CAPACITY),
        }
    }

    pub fn from_config(
        config: &GateConfig,
        roster: Vec<Profile>,
    ) -> Result<Self> {
        config.validate()?;
        let mut gate = Self::new(roster, &config.admin_code);
        gate.log_keyword = config.log_keyword().map(str::to_owned);
        gate.script = config.reveal.script()?;
        Ok(gate)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn roster(&self) -> &[Profile] {
        &self.roster
    }

    pub fn admin_code(&self) -> &str {
        &self.admin_code
    }

    pub fn active_profile(&self) -> Option<&Profile> {
        self.active_profile.as_ref()
    }

    pub fn active_egg(&self) -> Option<&ActiveEgg> {
        self.active_egg.as_ref()
    }

    /// Send countdown ticks of countdown eggs to `ticks`.
    ///
    /// Without it countdown eggs still become active, only no ticker
    /// runs. Needs a tokio runtime.
    pub fn attach_countdown(
        &mut self,
        ticks: mpsc::UnboundedSender<CountdownTick>,
    ) {
        self.ticks = Some(ticks);
    }

    pub fn countdown(&self) -> &CountdownTicker {
        &self.ticker
    }

    /// Whether `tick` belongs to the countdown of the current egg
    pub fn is_current_tick(&self, tick: &CountdownTick) -> bool {
        self.ticker.is_current(tick)
    }

    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    pub fn show_logs(&self) -> bool {
        self.show_logs
    }

    pub fn system_log(&self) -> impl Iterator<Item = &str> {
        self.system_log.iter().map(String::as_str)
    }

    pub fn submit(&mut self, input: &str) -> Submission {
        if self.revealing {
            log::debug!("reveal in flight, submission ignored");
            return Submission::Ignored;
        }
        if self.view != View::Landing {
            log::debug!("not on the landing view, submission ignored");
            return Submission::Ignored;
        }

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Submission::Ignored;
        }

        let resolution = resolve(trimmed, &self.roster, &self.admin_code);

        // Only input nothing else claims toggles the log
        if resolution == Resolution::Denied && self.is_log_keyword(trimmed) {
            self.show_logs = !self.show_logs;
            log::debug!("system log display toggled to {}", self.show_logs);
            return Submission::LogsToggled(self.show_logs);
        }

        let (submission, entry) = match resolution {
            Resolution::Denied => {
                self.set_active_egg(None);
                (Submission::Denied, "ACCESS DENIED".to_owned())
            }
            Resolution::EasterEgg { profile, egg } => {
                let active = ActiveEgg {
                    profile_id: profile.id.clone(),
                    egg: egg.clone(),
                };
                let entry =
                    format!("SECRET FOUND IN PROFILE {}", profile.id);
                self.set_active_egg(Some(active.clone()));
                (Submission::Egg(active), entry)
            }
            Resolution::Unlock { profile } => {
                let entry =
                    format!("ACCESS GRANTED TO PROFILE {}", profile.id);
                self.pending_profile = Some(profile.clone());
                (self.begin_reveal(RevealTarget::Content), entry)
            }
            Resolution::Admin => (
                self.begin_reveal(RevealTarget::Admin),
                "ADMIN ACCESS GRANTED".to_owned(),
            ),
        };

        self.record(entry);
        submission
    }

    fn begin_reveal(&mut self, target: RevealTarget) -> Submission {
        self.revealing = true;
        self.set_active_egg(None);
        log::info!("reveal started towards {:?}", target);
        Submission::Reveal(RevealSequencer::new(self.script.clone(), target))
    }

    /// Switch views once the reveal sequence completed
    pub fn finish_reveal(&mut self) -> View {
        if !self.revealing {
            return self.view;
        }
        self.revealing = false;

        self.view = match self.pending_profile.take() {
            Some(profile) => {
                self.active_profile = Some(profile);
                View::Content
            }
            None => View::Admin,
        };
        log::info!("switched to {:?} view", self.view);
        self.view
    }

    pub fn exit_content(&mut self) {
        self.active_profile = None;
        self.return_to_landing();
    }

    pub fn close_admin(&mut self) {
        self.return_to_landing();
    }

    fn return_to_landing(&mut self) {
        self.set_active_egg(None);
        self.view = View::Landing;
        log::info!("back to the landing view");
    }

    /// Take a roster handed back by the editor
    pub fn replace_roster(&mut self, roster: Vec<Profile>) {
        log::info!("roster replaced, {} profiles", roster.len());
        self.record(format!("ROSTER UPDATED, {} PROFILES", roster.len()));
        self.roster = roster;
    }

    /// Replace the active egg, restarting or stopping the countdown
    fn set_active_egg(&mut self, active: Option<ActiveEgg>) {
        self.ticker.stop();

        let target = active.as_ref().and_then(|a| a.egg.countdown_target());
        if let (Some(target), Some(ticks)) = (target, &self.ticks) {
            self.ticker.start(target, ticks.clone());
        }
        self.active_egg = active;
    }

    fn is_log_keyword(&self, trimmed: &str) -> bool {
        self.log_keyword
            .as_deref()
            .is_some_and(|k| k.to_lowercase() == trimmed.to_lowercase())
    }

    fn record(&mut self, entry: String) {
        if self.system_log.len() == SYSTEM_LOG_CAPACITY {
            self.system_log.pop_front();
        }
        let stamp = Local::now().format("%H:%M:%S");
        self.system_log.push_back(format!("[{}] {}", stamp, entry));
    }
}
