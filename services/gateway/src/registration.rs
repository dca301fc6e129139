//! Match-registration wizard
//!
//! A linear four-step selection: mode, team size, time slot, entry tier.
//! Each step requires the previous one; selecting an earlier step again
//! (or navigating back to it) clears only the steps after it. The wizard
//! is ephemeral client state and is never persisted — the gateway replays
//! a submitted selection through it to enforce the gating before any
//! wallet mutation happens.

use thiserror::Error;

use crate::catalog::{
    self, EntryTier, GameMode, SlotTime, TeamSize, TierId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Mode,
    TeamSize,
    TimeSlot,
    EntryTier,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Select a game mode first")]
    ModeNotSelected,

    #[error("Select a team size first")]
    TeamSizeNotSelected,

    #[error("Select a time slot first")]
    SlotNotSelected,

    #[error("Team size {team_size:?} is not offered for {mode:?}")]
    TeamSizeUnavailable { mode: GameMode, team_size: TeamSize },

    #[error("No match slot starts at {0}")]
    UnknownSlot(SlotTime),

    #[error("Selection is incomplete")]
    Incomplete,
}

/// A fully confirmed selection, ready to charge
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSelection {
    pub mode: GameMode,
    pub team_size: TeamSize,
    pub slot: SlotTime,
    pub tier: EntryTier,
    pub max_players: u32,
}

impl MatchSelection {
    /// Ledger description for the entry-fee transaction
    pub fn description(&self) -> String {
        format!(
            "Match entry: {} {} at {} ({:?} tier)",
            self.mode.label(),
            self.team_size.label(),
            self.slot,
            self.tier.id,
        )
    }
}

#[derive(Debug, Default, Clone)]
pub struct RegistrationWizard {
    mode: Option<GameMode>,
    team_size: Option<TeamSize>,
    slot: Option<SlotTime>,
    tier: Option<TierId>,
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next step waiting for input
    pub fn current_step(&self) -> WizardStep {
        if self.mode.is_none() {
            WizardStep::Mode
        } else if self.team_size.is_none() {
            WizardStep::TeamSize
        } else if self.slot.is_none() {
            WizardStep::TimeSlot
        } else {
            WizardStep::EntryTier
        }
    }

    /// Step 1. Choosing a mode discards every later selection, since the
    /// team-size menu depends on it.
    pub fn select_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.team_size = None;
        self.slot = None;
        self.tier = None;
    }

    /// Step 2. Only team sizes offered for the chosen mode are accepted.
    pub fn select_team_size(&mut self, team_size: TeamSize) -> Result<(), WizardError> {
        let mode = self.mode.ok_or(WizardError::ModeNotSelected)?;
        if catalog::max_players(mode, team_size).is_none() {
            return Err(WizardError::TeamSizeUnavailable { mode, team_size });
        }
        self.team_size = Some(team_size);
        self.slot = None;
        self.tier = None;
        Ok(())
    }

    /// Step 3. The slot must sit on the daily grid.
    pub fn select_slot(&mut self, slot: SlotTime) -> Result<(), WizardError> {
        if self.mode.is_none() {
            return Err(WizardError::ModeNotSelected);
        }
        if self.team_size.is_none() {
            return Err(WizardError::TeamSizeNotSelected);
        }
        if !catalog::is_valid_slot(slot) {
            return Err(WizardError::UnknownSlot(slot));
        }
        self.slot = Some(slot);
        self.tier = None;
        Ok(())
    }

    /// Step 4.
    pub fn select_tier(&mut self, tier: TierId) -> Result<(), WizardError> {
        if self.slot.is_none() {
            return Err(WizardError::SlotNotSelected);
        }
        self.tier = Some(tier);
        Ok(())
    }

    /// Navigate back: keep the returned-to step's selection, clear later
    /// ones.
    pub fn back_to(&mut self, step: WizardStep) {
        match step {
            WizardStep::Mode => {
                self.team_size = None;
                self.slot = None;
                self.tier = None;
            }
            WizardStep::TeamSize => {
                self.slot = None;
                self.tier = None;
            }
            WizardStep::TimeSlot => {
                self.tier = None;
            }
            WizardStep::EntryTier => {}
        }
    }

    /// Discard everything (cancel, or after a successful registration)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The confirmed selection, once all four steps are filled
    pub fn selection(&self) -> Result<MatchSelection, WizardError> {
        let mode = self.mode.ok_or(WizardError::ModeNotSelected)?;
        let team_size = self.team_size.ok_or(WizardError::TeamSizeNotSelected)?;
        let slot = self.slot.ok_or(WizardError::SlotNotSelected)?;
        let tier_id = self.tier.ok_or(WizardError::Incomplete)?;
        let max_players =
            catalog::max_players(mode, team_size).ok_or(WizardError::TeamSizeUnavailable {
                mode,
                team_size,
            })?;

        Ok(MatchSelection {
            mode,
            team_size,
            slot,
            tier: catalog::tier(tier_id),
            max_players,
        })
    }
}

/// Replay a submitted selection through the wizard, enforcing the same
/// gating an interactive client would have gone through.
pub fn validate_selection(
    mode: GameMode,
    team_size: TeamSize,
    slot: SlotTime,
    tier: TierId,
) -> Result<MatchSelection, WizardError> {
    let mut wizard = RegistrationWizard::new();
    wizard.select_mode(mode);
    wizard.select_team_size(team_size)?;
    wizard.select_slot(slot)?;
    wizard.select_tier(tier)?;
    wizard.selection()
}
