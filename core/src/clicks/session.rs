use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::*;

/// Valid transitions:
/// - Idle -> Armed (start)
/// - Armed -> Running (first click)
/// - Running -> Ended (countdown over or click target reached)
/// - any -> Armed (restart)
/// - any -> Idle (mode change)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    /// Game active, waiting for the first click to start the clock
    Armed,
    Running,
    Ended,
}

impl SessionState {
    /// Whether clicks are counted in this state
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::Armed | Self::Running)
    }
}

/// Generation number of an armed one-second timer. Ticks carrying any other token are stale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u32);

/// What the host must do with its single timer handle after a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave the current handle alone
    Keep,
    /// Replace any handle with a one-shot firing [`ClickSession::tick`] with this token after one second
    Arm(TimerToken),
    /// Drop the current handle
    Disarm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionUpdate {
    /// Whether anything observable changed
    pub changed: bool,
    pub timer: TimerCommand,
    /// Set when this transition recorded a new score
    pub recorded: Option<ScoreId>,
}

impl SessionUpdate {
    pub const NO_CHANGE: Self = Self {
        changed: false,
        timer: TimerCommand::Keep,
        recorded: None,
    };

    const fn changed(timer: TimerCommand) -> Self {
        Self {
            changed: true,
            timer,
            recorded: None,
        }
    }

    pub const fn has_update(self) -> bool {
        self.changed
    }
}

/// One click test, from mode selection through any number of rounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickSession {
    config: ClickTestConfig,
    mode: ClickMode,
    state: SessionState,
    clicks: u32,
    remaining_secs: u32,
    elapsed_secs: u32,
    armed_timer: Option<TimerToken>,
    next_token: u32,
    history: ScoreHistory,
    last_score_id: Option<ScoreId>,
}

impl ClickSession {
    pub fn new(config: ClickTestConfig) -> Self {
        Self {
            config,
            mode: ClickMode::default(),
            state: SessionState::default(),
            clicks: 0,
            remaining_secs: config.time_limit,
            elapsed_secs: 0,
            armed_timer: None,
            next_token: 0,
            history: ScoreHistory::new(config.history_len),
            last_score_id: None,
        }
    }

    pub fn config(&self) -> ClickTestConfig {
        self.config
    }

    pub fn mode(&self) -> ClickMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Countdown value in [`ClickMode::Time`]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Count-up value in [`ClickMode::Clicks`]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Seconds spent so far in the current mode.
    pub fn used_secs(&self) -> u32 {
        match self.mode {
            ClickMode::Time => self.config.time_limit.saturating_sub(self.remaining_secs),
            ClickMode::Clicks => self.elapsed_secs,
        }
    }

    pub fn clicks_per_second(&self) -> f64 {
        clicks_per_second(self.clicks, self.used_secs())
    }

    pub fn armed_timer(&self) -> Option<TimerToken> {
        self.armed_timer
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn last_score_id(&self) -> Option<ScoreId> {
        self.last_score_id
    }

    /// The most recently recorded score, if it is still in the history.
    pub fn last_score(&self) -> Option<&Score> {
        self.last_score_id.and_then(|id| self.history.find(id))
    }

    pub fn is_last_score(&self, score: &Score) -> bool {
        self.last_score_id == Some(score.id)
    }

    /// Starts (or restarts) a round and waits for the first click.
    pub fn start_game(&mut self) -> SessionUpdate {
        self.reset_counters();
        self.state = SessionState::Armed;
        log::debug!("Click test armed in {:?} mode", self.mode);
        SessionUpdate::changed(self.disarm())
    }

    pub fn handle_click(&mut self, now: DateTime<Utc>) -> SessionUpdate {
        let timer = match self.state {
            SessionState::Armed => {
                self.state = SessionState::Running;
                log::debug!("Click test running");
                self.arm()
            }
            SessionState::Running => TimerCommand::Keep,
            SessionState::Idle | SessionState::Ended => return SessionUpdate::NO_CHANGE,
        };

        self.clicks = self.clicks.saturating_add(1);
        log::trace!("Click {}", self.clicks);

        if self.mode == ClickMode::Clicks && self.clicks >= self.config.click_target {
            return self.end_game(now);
        }

        SessionUpdate::changed(timer)
    }

    /// Advances the clock by one second if `token` is the armed timer.
    pub fn tick(&mut self, token: TimerToken, now: DateTime<Utc>) -> SessionUpdate {
        if self.state != SessionState::Running || self.armed_timer != Some(token) {
            log::trace!("Stale tick {:?} ignored", token);
            return SessionUpdate::NO_CHANGE;
        }
        self.armed_timer = None;

        match self.mode {
            ClickMode::Time => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                log::trace!("Tick, {}s remaining", self.remaining_secs);
                if self.remaining_secs == 0 {
                    return self.end_game(now);
                }
            }
            ClickMode::Clicks => {
                self.elapsed_secs = self.elapsed_secs.saturating_add(1);
                log::trace!("Tick, {}s elapsed", self.elapsed_secs);
            }
        }

        SessionUpdate::changed(self.arm())
    }

    /// Finishes a running round and records its score.
    pub fn end_game(&mut self, now: DateTime<Utc>) -> SessionUpdate {
        if self.state != SessionState::Running {
            return SessionUpdate::NO_CHANGE;
        }

        self.state = SessionState::Ended;
        let score = Score {
            id: ScoreId::from_timestamp(now),
            clicks: self.clicks,
            time: self.used_secs(),
            created_at: now,
            mode: self.mode,
        };
        if let Some(evicted) = self.history.push(score) {
            log::trace!("Evicted score {:?}", evicted.id);
        }
        self.last_score_id = Some(score.id);
        log::debug!(
            "Click test ended: {} clicks in {}s ({:?})",
            score.clicks,
            score.time,
            score.speed_tier()
        );

        SessionUpdate {
            changed: true,
            timer: self.disarm(),
            recorded: Some(score.id),
        }
    }

    /// Switches mode from any state, abandoning a round in progress.
    pub fn change_mode(&mut self, mode: ClickMode) -> SessionUpdate {
        let was_idle = self.state == SessionState::Idle && self.mode == mode;
        self.mode = mode;
        self.reset_counters();
        self.state = SessionState::Idle;
        let timer = self.disarm();
        if was_idle {
            SessionUpdate {
                changed: false,
                timer,
                recorded: None,
            }
        } else {
            log::debug!("Click test mode changed to {:?}", mode);
            SessionUpdate::changed(timer)
        }
    }

    pub fn reset_history(&mut self) -> SessionUpdate {
        if self.history.is_empty() && self.last_score_id.is_none() {
            return SessionUpdate::NO_CHANGE;
        }
        self.history.clear();
        self.last_score_id = None;
        SessionUpdate::changed(TimerCommand::Keep)
    }

    fn reset_counters(&mut self) {
        self.clicks = 0;
        self.remaining_secs = self.config.time_limit;
        self.elapsed_secs = 0;
    }

    fn arm(&mut self) -> TimerCommand {
        let token = TimerToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.armed_timer = Some(token);
        TimerCommand::Arm(token)
    }

    fn disarm(&mut self) -> TimerCommand {
        self.armed_timer = None;
        TimerCommand::Disarm
    }
}

impl Default for ClickSession {
    fn default() -> Self {
        Self::new(ClickTestConfig::default())
    }
}
