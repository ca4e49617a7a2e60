//! Host-facing wheel session
//!
//! Wires the spin scheduler, selection machine, roster and picker together.
//! The host feeds it two clocks: `frame` once per animation frame and
//! `countdown_tick` once per countdown period while a winner is pending.

use super::error::WheelError;
use super::geometry::{angle_for_index, index_at_angle};
use super::picker::TargetPicker;
use super::roster::{Participant, Roster};
use super::scheduler::{SpinEvent, SpinHandle, SpinScheduler};
use super::selection::{CountdownToken, Outcome, Phase, SelectionMachine, WheelEvent};
use crate::settings::{SpinPreset, WheelSettings};

/// Result of one animation frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Wheel orientation to draw, in [0, 2π)
    pub angle: f64,
    pub events: Vec<WheelEvent>,
}

#[derive(Debug, Clone)]
pub struct Session {
    settings: WheelSettings,
    roster: Roster,
    scheduler: SpinScheduler,
    selection: SelectionMachine,
    picker: TargetPicker,
}

impl Session {
    pub fn new(settings: WheelSettings, picker: TargetPicker) -> Self {
        let settings = settings.sanitized();
        let selection = SelectionMachine::new(settings.countdown_ticks);
        Self {
            settings,
            roster: Roster::new(),
            scheduler: SpinScheduler::default(),
            selection,
            picker,
        }
    }

    pub fn settings(&self) -> &WheelSettings {
        &self.settings
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    pub fn angle(&self) -> f64 {
        self.scheduler.angle()
    }

    pub fn is_spinning(&self) -> bool {
        self.scheduler.is_spinning()
    }

    /// Winner awaiting confirmation
    pub fn pending_outcome(&self) -> Option<&Outcome> {
        self.selection.pending()
    }

    /// Live countdown, if a winner is pending
    pub fn countdown(&self) -> Option<(CountdownToken, u32)> {
        self.selection.countdown()
    }

    /// Participant currently under the needle
    pub fn participant_under_needle(&self) -> Option<&Participant> {
        let index = index_at_angle(self.scheduler.angle(), self.roster.len()).ok()?;
        self.roster.get(index)
    }

    /// Replace settings; takes effect from the next spin
    pub fn update_settings(&mut self, settings: WheelSettings) {
        let settings = settings.sanitized();
        self.selection.set_countdown_ticks(settings.countdown_ticks);
        self.settings = settings;
    }

    /// Switch the spin feel; the caller persists the returned settings
    pub fn apply_preset(&mut self, preset: SpinPreset) -> &WheelSettings {
        let mut settings = self.settings.clone();
        settings.apply_preset(preset);
        log::info!("Spin preset: {}", preset.as_str());
        self.update_settings(settings);
        &self.settings
    }

    /// Re-parse the participant text. Returns whether the pool changed.
    pub fn set_participants_text(&mut self, text: &str) -> Result<bool, WheelError> {
        self.selection.ensure_idle()?;
        let changed = self.roster.set_text(text);
        if changed {
            self.on_pool_changed();
        }
        Ok(changed)
    }

    pub fn clear_participants(&mut self) -> Result<(), WheelError> {
        self.selection.ensure_idle()?;
        self.roster.clear();
        log::info!("Participants cleared");
        Ok(())
    }

    pub fn load_example(&mut self) -> Result<bool, WheelError> {
        self.selection.ensure_idle()?;
        let changed = self.roster.load_example();
        if changed {
            self.on_pool_changed();
        }
        Ok(changed)
    }

    /// Rest the wheel centered on a random segment
    fn on_pool_changed(&mut self) {
        let count = self.roster.len();
        log::info!("Pool now has {count} participants");
        let Ok(index) = self.picker.pick_index(count) else {
            return;
        };
        if let Ok(angle) = angle_for_index(index, count, 0.5) {
            // Only reachable while idle, so the scheduler is never mid-spin here
            let _ = self.scheduler.set_resting_angle(angle);
        }
    }

    /// Pick a uniformly random participant and spin toward them
    pub fn request_spin(&mut self) -> Result<(SpinHandle, WheelEvent), WheelError> {
        self.selection.ensure_idle()?;
        let index = self.picker.pick_index(self.roster.len())?;
        self.spin_to(index)
    }

    /// Spin toward a chosen segment
    pub fn spin_to(&mut self, index: usize) -> Result<(SpinHandle, WheelEvent), WheelError> {
        self.selection.ensure_idle()?;
        let count = self.roster.len();
        if count == 0 {
            return Err(WheelError::InvalidWheelState);
        }
        let participant = self
            .roster
            .get(index)
            .cloned()
            .ok_or(WheelError::InvalidTarget { index, count })?;

        let jitter = self.picker.unit();
        let rotations = self
            .picker
            .rotations(self.settings.extra_rotations, self.settings.rotation_spread);
        let options = self.settings.spin_options(jitter, rotations);

        let handle = self.scheduler.start_spin(index, count, &options)?;
        log::info!("Spinning toward {} (segment {index} of {count})", participant.name);
        match self.selection.begin_spin(handle.id, index, participant) {
            Ok(event) => Ok((handle, event)),
            Err(e) => {
                // Keep "spin fully runs or never starts"
                self.scheduler.cancel_spin();
                Err(e)
            }
        }
    }

    /// Advance the spin by `delta_ms`
    pub fn frame(&mut self, delta_ms: f64) -> FrameOutput {
        let tick = self.scheduler.tick(delta_ms);
        let mut events = Vec::new();
        if let Some(SpinEvent::Landed { spin_id, index }) = tick.event
            && let Some(event) = self.selection.land(spin_id, index)
        {
            if let WheelEvent::Landed { name, .. } = &event {
                log::info!("Landed on {name}");
            }
            events.push(event);
        }
        FrameOutput {
            angle: tick.angle,
            events,
        }
    }

    /// One countdown period elapsed for the countdown identified by `token`
    pub fn countdown_tick(&mut self, token: CountdownToken) -> Option<WheelEvent> {
        let event = self.selection.countdown_tick(token)?;
        self.apply(event)
    }

    /// Mark the pending winner as present
    pub fn confirm_present(&mut self) -> Option<WheelEvent> {
        let event = self.selection.confirm_present()?;
        self.apply(event)
    }

    /// Mark the pending winner as absent
    pub fn mark_absent(&mut self) -> Option<WheelEvent> {
        let event = self.selection.mark_absent()?;
        self.apply(event)
    }

    /// File resolutions into the roster
    fn apply(&mut self, event: WheelEvent) -> Option<WheelEvent> {
        if let WheelEvent::Resolved { outcome, cause } = &event {
            log::info!("{} resolved as {:?} ({:?})", outcome.name, outcome.status, cause);
            self.roster.record(outcome);
        }
        Some(event)
    }

    /// Stop everything in flight without emitting events
    pub fn teardown(&mut self) {
        if self.scheduler.cancel_spin() {
            log::info!("Spin cancelled on teardown");
        }
        self.selection.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::selection::{OutcomeStatus, ResolveCause};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session(text: &str) -> Session {
        let mut s = Session::new(WheelSettings::default(), TargetPicker::seeded(2024));
        s.set_participants_text(text).unwrap();
        s
    }

    fn pool_names(s: &Session) -> Vec<&str> {
        s.roster().pool().iter().map(|p| p.name.as_str()).collect()
    }

    /// Run frames until the spin stops; returns all emitted events
    fn spin_out(s: &mut Session) -> Vec<WheelEvent> {
        let mut events = Vec::new();
        for _ in 0..10_000 {
            events.extend(s.frame(FRAME_MS).events);
            if !s.is_spinning() {
                break;
            }
        }
        events
    }

    #[test]
    fn test_confirm_present_scenario() {
        let mut s = session("Ana\nBeto\nCaro");
        s.spin_to(1).unwrap();
        assert_eq!(s.phase(), Phase::Spinning);

        let events = spin_out(&mut s);
        let landed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, WheelEvent::Landed { .. }))
            .collect();
        assert_eq!(landed.len(), 1);
        assert!(matches!(landed[0], WheelEvent::Landed { index: 1, name, .. } if name == "Beto"));
        assert_eq!(s.phase(), Phase::Landed);
        assert_eq!(s.participant_under_needle().map(|p| p.name.as_str()), Some("Beto"));

        // A few countdown ticks, then confirmation
        let (token, _) = s.countdown().unwrap();
        s.countdown_tick(token);
        s.countdown_tick(token);
        let resolved = s.confirm_present().unwrap();
        assert!(matches!(
            resolved,
            WheelEvent::Resolved {
                cause: ResolveCause::Confirmed,
                ..
            }
        ));

        let results: Vec<_> = s.roster().results().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(results, vec!["Beto"]);
        assert!(s.roster().absentees().is_empty());
        assert_eq!(pool_names(&s), vec!["Ana", "Caro"]);
        assert_eq!(s.phase(), Phase::Idle);

        // The old timer firing late does nothing
        for _ in 0..15 {
            assert_eq!(s.countdown_tick(token), None);
        }
        assert!(s.roster().absentees().is_empty());
    }

    #[test]
    fn test_timeout_absent_scenario() {
        let mut s = session("Ana\nBeto");
        s.spin_to(0).unwrap();
        let events = spin_out(&mut s);
        assert!(matches!(events[..], [WheelEvent::Landed { index: 0, .. }]));

        let (token, remaining) = s.countdown().unwrap();
        assert_eq!(remaining, 10);
        let mut resolutions = Vec::new();
        for _ in 0..10 {
            if let Some(WheelEvent::Resolved { outcome, cause }) = s.countdown_tick(token) {
                resolutions.push((outcome, cause));
            }
        }
        assert_eq!(resolutions.len(), 1);
        assert_eq!(resolutions[0].0.status, OutcomeStatus::Absent);
        assert_eq!(resolutions[0].1, ResolveCause::TimedOut);

        let absentees: Vec<_> = s.roster().absentees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(absentees, vec!["Ana"]);
        assert_eq!(pool_names(&s), vec!["Beto"]);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_explicit_absent() {
        let mut s = session("Ana\nBeto");
        s.spin_to(1).unwrap();
        spin_out(&mut s);
        assert!(s.mark_absent().is_some());
        assert_eq!(s.roster().absentees()[0].name, "Beto");
        assert_eq!(s.mark_absent(), None);
        assert_eq!(s.confirm_present(), None);
    }

    #[test]
    fn test_spin_errors() {
        let mut s = Session::new(WheelSettings::default(), TargetPicker::seeded(1));
        assert_eq!(s.request_spin().unwrap_err(), WheelError::InvalidWheelState);

        s.set_participants_text("Ana\nBeto").unwrap();
        assert_eq!(
            s.spin_to(2).unwrap_err(),
            WheelError::InvalidTarget { index: 2, count: 2 }
        );
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.is_spinning());

        s.spin_to(0).unwrap();
        assert_eq!(s.request_spin().unwrap_err(), WheelError::AlreadySpinning);
        spin_out(&mut s);
        assert_eq!(
            s.request_spin().unwrap_err(),
            WheelError::NotIdle {
                phase: Phase::Landed
            }
        );
        assert_eq!(
            s.set_participants_text("Zoe").unwrap_err(),
            WheelError::NotIdle {
                phase: Phase::Landed
            }
        );
    }

    #[test]
    fn test_request_spin_targets_pool_member() {
        let mut s = session("Ana\nBeto\nCaro\nDani");
        let (handle, event) = s.request_spin().unwrap();
        let WheelEvent::SpinStarted { index, .. } = event else {
            panic!("expected SpinStarted");
        };
        assert_eq!(handle.target_index, index);
        let events = spin_out(&mut s);
        let expected = s.roster().get(index).unwrap().name.clone();
        assert!(matches!(&events[..], [WheelEvent::Landed { name, .. }] if *name == expected));
    }

    #[test]
    fn test_rounds_drain_the_pool() {
        let mut s = session("Ana\nBeto\nCaro");
        for _ in 0..3 {
            s.request_spin().unwrap();
            spin_out(&mut s);
            s.confirm_present().unwrap();
        }
        assert!(s.roster().is_empty());
        assert_eq!(s.roster().results().len(), 3);
        assert_eq!(s.request_spin().unwrap_err(), WheelError::InvalidWheelState);
    }

    #[test]
    fn test_teardown_mid_spin_emits_nothing() {
        let mut s = session("Ana\nBeto");
        s.spin_to(1).unwrap();
        for _ in 0..10 {
            s.frame(FRAME_MS);
        }
        s.teardown();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(spin_out(&mut s).is_empty());
        // Able to spin again afterwards
        assert!(s.spin_to(0).is_ok());
    }

    #[test]
    fn test_teardown_while_landed_stops_countdown() {
        let mut s = session("Ana\nBeto");
        s.spin_to(0).unwrap();
        spin_out(&mut s);
        let (token, _) = s.countdown().unwrap();
        s.teardown();
        for _ in 0..20 {
            assert_eq!(s.countdown_tick(token), None);
        }
        assert_eq!(s.roster().len(), 2);
    }

    #[test]
    fn test_pool_change_rests_on_segment_center() {
        let s = session("Ana\nBeto\nCaro");
        let count = s.roster().len();
        let index = index_at_angle(s.angle(), count).unwrap();
        let center = angle_for_index(index, count, 0.5).unwrap();
        assert!((s.angle() - center).abs() < 1e-12);
    }

    #[test]
    fn test_update_settings_changes_countdown() {
        let mut s = session("Ana");
        let settings = WheelSettings {
            countdown_ticks: 3,
            ..WheelSettings::default()
        };
        s.update_settings(settings);
        s.spin_to(0).unwrap();
        spin_out(&mut s);
        assert_eq!(s.countdown().map(|(_, r)| r), Some(3));
    }

    #[test]
    fn test_resolved_pool_round_trips_through_text() {
        let mut s = session("Ana\nBeto\nCaro");
        s.spin_to(1).unwrap();
        spin_out(&mut s);
        s.confirm_present().unwrap();

        // The textarea is rewritten from the pool after a resolution
        let text = s.roster().text();
        assert_eq!(s.set_participants_text(&format!("{text}\n")), Ok(false));
        assert_eq!(pool_names(&s), vec!["Ana", "Caro"]);
        let results: Vec<_> = s.roster().results().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(results, vec!["Beto"]);

        // Typing a new name after that does not bring the winner back
        s.set_participants_text(&format!("{text}\nDani")).unwrap();
        assert_eq!(pool_names(&s), vec!["Ana", "Caro", "Dani"]);

        // Re-submitting the text from before the spin would
        s.set_participants_text("Ana\nBeto\nCaro\nDani").unwrap();
        assert!(pool_names(&s).contains(&"Beto"));
    }

    #[test]
    fn test_oversized_rotation_settings_still_spin() {
        let settings = WheelSettings {
            extra_rotations: u32::MAX,
            rotation_spread: u32::MAX,
            ..WheelSettings::default()
        };
        let mut s = Session::new(settings, TargetPicker::seeded(5));
        s.set_participants_text("Ana\nBeto").unwrap();
        assert!(s.settings().extra_rotations <= crate::consts::MAX_EXTRA_ROTATIONS);
        for _ in 0..5 {
            let (handle, _) = s.request_spin().unwrap();
            let events = spin_out(&mut s);
            assert!(matches!(
                &events[..],
                [WheelEvent::Landed { index, .. }] if *index == handle.target_index
            ));
            s.confirm_present().unwrap();
            if s.roster().is_empty() {
                s.set_participants_text("Ana\nBeto").unwrap();
            }
        }
    }

    #[test]
    fn test_apply_preset_updates_next_spin() {
        let mut s = session("Ana\nBeto");
        let settings = s.apply_preset(SpinPreset::Quick).clone();
        assert_eq!(settings.preset, SpinPreset::Quick);
        assert_eq!(s.settings().spin_duration_ms, 4_000.0);
        let (handle, _) = s.spin_to(0).unwrap();
        assert!((handle.duration_ms - 4_000.0).abs() < 1e-9);
    }
}
