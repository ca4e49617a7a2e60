//! Selection/outcome state machine
//!
//! `Idle -> Spinning -> Landed -> (Present | Absent) -> Idle`
//!
//! Present and Absent are resolutions, not resting states: resolving hands
//! back the finished [`Outcome`] and the machine is Idle again. The countdown
//! only exists inside `Landed`, so leaving `Landed` by any path drops it.

use serde::{Deserialize, Serialize};

use super::error::WheelError;
use super::roster::{Participant, ParticipantId};

/// Observable phase of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Spinning,
    Landed,
}

/// Disposition of a landed participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Pending,
    Present,
    Absent,
}

/// Record of one spin's winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub participant: ParticipantId,
    pub name: String,
    pub status: OutcomeStatus,
}

/// Why an outcome was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveCause {
    Confirmed,
    MarkedAbsent,
    TimedOut,
}

/// Identifies one countdown. Ticks carrying any other token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

/// Everything the host UI needs to react to
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    SpinStarted {
        spin_id: u64,
        index: usize,
    },
    Landed {
        index: usize,
        participant: ParticipantId,
        name: String,
        token: CountdownToken,
        remaining: u32,
    },
    CountdownTick {
        remaining: u32,
    },
    Resolved {
        outcome: Outcome,
        cause: ResolveCause,
    },
}

#[derive(Debug, Clone)]
struct Countdown {
    token: CountdownToken,
    remaining: u32,
}

#[derive(Debug, Clone)]
enum MachineState {
    Idle,
    Spinning {
        spin_id: u64,
        index: usize,
        participant: Participant,
    },
    Landed {
        outcome: Outcome,
        countdown: Countdown,
    },
}

#[derive(Debug, Clone)]
pub struct SelectionMachine {
    state: MachineState,
    countdown_ticks: u32,
    next_token: u64,
}

impl SelectionMachine {
    /// `countdown_ticks` is the number of ticks a landed outcome waits before
    /// auto-resolving as Absent (at least 1)
    pub fn new(countdown_ticks: u32) -> Self {
        Self {
            state: MachineState::Idle,
            countdown_ticks: countdown_ticks.max(1),
            next_token: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            MachineState::Idle => Phase::Idle,
            MachineState::Spinning { .. } => Phase::Spinning,
            MachineState::Landed { .. } => Phase::Landed,
        }
    }

    pub fn set_countdown_ticks(&mut self, ticks: u32) {
        self.countdown_ticks = ticks.max(1);
    }

    /// Pending outcome while `Landed`
    pub fn pending(&self) -> Option<&Outcome> {
        match &self.state {
            MachineState::Landed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Token and remaining ticks of the live countdown
    pub fn countdown(&self) -> Option<(CountdownToken, u32)> {
        match &self.state {
            MachineState::Landed { countdown, .. } => Some((countdown.token, countdown.remaining)),
            _ => None,
        }
    }

    /// Refuse unless a new round may start
    pub fn ensure_idle(&self) -> Result<(), WheelError> {
        match self.phase() {
            Phase::Idle => Ok(()),
            Phase::Spinning => Err(WheelError::AlreadySpinning),
            phase => Err(WheelError::NotIdle { phase }),
        }
    }

    /// Idle -> Spinning
    pub fn begin_spin(
        &mut self,
        spin_id: u64,
        index: usize,
        participant: Participant,
    ) -> Result<WheelEvent, WheelError> {
        self.ensure_idle()?;
        self.state = MachineState::Spinning {
            spin_id,
            index,
            participant,
        };
        Ok(WheelEvent::SpinStarted { spin_id, index })
    }

    /// Spinning -> Landed, on the scheduler's landed event for the active spin
    pub fn land(&mut self, spin_id: u64, index: usize) -> Option<WheelEvent> {
        let MachineState::Spinning {
            spin_id: active,
            index: expected,
            participant,
        } = &self.state
        else {
            log::warn!("Ignoring landed event for spin {spin_id}: not spinning");
            return None;
        };
        if *active != spin_id || *expected != index {
            log::warn!("Ignoring landed event for spin {spin_id} (active spin {active})");
            return None;
        }

        let outcome = Outcome {
            participant: participant.id,
            name: participant.name.clone(),
            status: OutcomeStatus::Pending,
        };
        let token = CountdownToken(self.next_token);
        self.next_token += 1;

        let event = WheelEvent::Landed {
            index,
            participant: outcome.participant,
            name: outcome.name.clone(),
            token,
            remaining: self.countdown_ticks,
        };
        self.state = MachineState::Landed {
            outcome,
            countdown: Countdown {
                token,
                remaining: self.countdown_ticks,
            },
        };
        Some(event)
    }

    /// One countdown period elapsed. Reaching zero resolves as Absent.
    pub fn countdown_tick(&mut self, token: CountdownToken) -> Option<WheelEvent> {
        let MachineState::Landed { countdown, .. } = &mut self.state else {
            return None;
        };
        if countdown.token != token {
            return None;
        }
        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining > 0 {
            return Some(WheelEvent::CountdownTick {
                remaining: countdown.remaining,
            });
        }
        self.resolve(OutcomeStatus::Absent, ResolveCause::TimedOut)
    }

    /// Landed -> Present -> Idle
    pub fn confirm_present(&mut self) -> Option<WheelEvent> {
        self.resolve(OutcomeStatus::Present, ResolveCause::Confirmed)
    }

    /// Landed -> Absent -> Idle
    pub fn mark_absent(&mut self) -> Option<WheelEvent> {
        self.resolve(OutcomeStatus::Absent, ResolveCause::MarkedAbsent)
    }

    fn resolve(&mut self, status: OutcomeStatus, cause: ResolveCause) -> Option<WheelEvent> {
        match std::mem::replace(&mut self.state, MachineState::Idle) {
            MachineState::Landed { mut outcome, .. } => {
                outcome.status = status;
                Some(WheelEvent::Resolved { outcome, cause })
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drop whatever is in flight (teardown or cancelled spin)
    pub fn reset(&mut self) {
        self.state = MachineState::Idle;
    }
}
