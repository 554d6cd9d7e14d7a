//! Game director
//!
//! Owns one session and drives it through Start → Running → End. The host
//! forwards key, click and clock events; the director decides which of them
//! matter in the current phase and pushes every visible change to the view.

use glam::DVec2;

use crate::platform::{FixedTicker, Timeouts, apply_key};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, ShotOutcome, TickReport, resolve_shot, tick};
use crate::view::{SegmentId, ViewSink};

pub struct Director<V: ViewSink> {
    settings: Settings,
    state: GameState,
    ticker: FixedTicker,
    /// Drawn shots waiting to be cleared
    shot_clears: Timeouts<SegmentId>,
    view: V,
}

impl<V: ViewSink> Director<V> {
    pub fn new(settings: Settings, seed: u64, view: V) -> Self {
        let ticker = FixedTicker::new(settings.tick_period_ms, settings.max_substeps);
        Self {
            settings,
            state: GameState::new(seed),
            ticker,
            shot_clears: Timeouts::new(),
            view,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that script or restore a session
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Whether the tick scheduler is active
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Whether a drawn shot is still waiting to be cleared
    pub fn shot_in_flight(&self) -> bool {
        !self.shot_clears.is_empty()
    }

    /// Start the first run. Ignored once a run has begun; use `restart`.
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Start {
            log::warn!("start() ignored in {:?}", self.state.phase);
            return;
        }
        self.begin_run();
    }

    /// Throw away the current run and begin a new one
    pub fn restart(&mut self) {
        if self.state.phase == GamePhase::Running {
            self.ticker.stop();
            self.state.clear_view(&mut self.view);
        }
        // Keys released while input was ignored must not stay held
        self.state.input.clear();
        self.begin_run();
    }

    pub fn on_key_down(&mut self, key: &str) {
        if self.state.phase == GamePhase::Running {
            apply_key(&mut self.state.input, key, true);
        }
    }

    pub fn on_key_up(&mut self, key: &str) {
        if self.state.phase == GamePhase::Running {
            apply_key(&mut self.state.input, key, false);
        }
    }

    /// Fire toward `point` (field coordinates, origin bottom-left)
    ///
    /// Returns `None` when the click was ignored: not running, or a shot is
    /// still on screen while the cooldown is enabled.
    pub fn on_click(&mut self, point: DVec2) -> Option<ShotOutcome> {
        if self.settings.shot.cooldown && self.shot_in_flight() {
            log::trace!("Shot ignored, previous shot still in flight");
            return None;
        }
        let (origin, outcome) = resolve_shot(&mut self.state, &self.settings, point, &mut self.view)?;

        let segment = self.state.next_entity_id();
        let delay = self.settings.shot.clear_delay_ms;
        self.view.draw_segment(segment, origin, outcome.endpoint(), delay);
        self.shot_clears.schedule(delay, segment);
        Some(outcome)
    }

    /// Run exactly one tick, regardless of the scheduler
    pub fn tick(&mut self) -> TickReport {
        let report = tick(&mut self.state, &self.settings, &mut self.view);
        if report.avatar_dead && self.state.phase == GamePhase::Running {
            self.end_run();
        }
        report
    }

    /// Report host time; fires due shot clears and runs due ticks.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        for segment in self.shot_clears.advance(elapsed_ms) {
            self.view.clear_segment(segment);
        }

        let due = self.ticker.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if !self.ticker.is_running() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    fn begin_run(&mut self) {
        self.state.begin_run(&self.settings, &mut self.view);
        self.state.phase = GamePhase::Running;
        self.ticker.start();
        self.view.show_score(self.state.score);
        self.view.show_phase(GamePhase::Running);
        log::info!("Run started (seed {})", self.state.seed);
    }

    fn end_run(&mut self) {
        self.ticker.stop();
        self.state.phase = GamePhase::End;
        self.state.clear_view(&mut self.view);
        self.view.show_phase(GamePhase::End);
        log::info!(
            "Run ended after {} ms with score {}",
            self.state.elapsed_ms,
            self.state.score
        );
    }
}
