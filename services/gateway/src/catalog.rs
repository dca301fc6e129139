//! Fixed match-product tables
//!
//! Game modes, the mode x team-size capacity table, entry tiers and the
//! daily time-slot grid. These are product rules baked into the build, not
//! configuration.

use serde::{Deserialize, Serialize};
use shared::constants::{SLOT_FIRST_HOUR, SLOT_INTERVAL_MINUTES, SLOT_LAST_HOUR};
use shared::types::Credits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    BattleRoyale,
    ClashSquad,
    LoneWolf,
}

impl GameMode {
    pub fn all() -> [GameMode; 3] {
        [GameMode::BattleRoyale, GameMode::ClashSquad, GameMode::LoneWolf]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::BattleRoyale => "Battle Royale",
            GameMode::ClashSquad => "Clash Squad",
            GameMode::LoneWolf => "Lone Wolf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSize {
    Solo,
    Duo,
    Squad,
}

impl TeamSize {
    pub fn label(&self) -> &'static str {
        match self {
            TeamSize::Solo => "solo",
            TeamSize::Duo => "duo",
            TeamSize::Squad => "squad",
        }
    }
}

/// Team sizes available per mode, with the slot player capacity each
/// implies. Battle royale fills a full lobby regardless of grouping;
/// clash squad and lone wolf are small fixed-size arenas.
pub fn team_sizes(mode: GameMode) -> &'static [(TeamSize, u32)] {
    match mode {
        GameMode::BattleRoyale => &[
            (TeamSize::Solo, 48),
            (TeamSize::Duo, 48),
            (TeamSize::Squad, 48),
        ],
        GameMode::ClashSquad => &[(TeamSize::Duo, 4), (TeamSize::Squad, 8)],
        GameMode::LoneWolf => &[(TeamSize::Solo, 2), (TeamSize::Duo, 4)],
    }
}

/// Max players per slot for a mode/team-size pair, `None` when the pair
/// is not offered
pub fn max_players(mode: GameMode, team_size: TeamSize) -> Option<u32> {
    team_sizes(mode)
        .iter()
        .find(|(size, _)| *size == team_size)
        .map(|(_, players)| *players)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierId {
    Rookie,
    Contender,
    Elite,
    Legend,
}

/// One entry tier: fee paid on registration, advertised prize pool and
/// the number of paid slots in the bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTier {
    pub id: TierId,
    pub entry_fee: Credits,
    pub prize_pool: Credits,
    pub slots: u32,
}

pub fn entry_tiers() -> [EntryTier; 4] {
    [
        EntryTier {
            id: TierId::Rookie,
            entry_fee: Credits::new(50),
            prize_pool: Credits::new(200),
            slots: 48,
        },
        EntryTier {
            id: TierId::Contender,
            entry_fee: Credits::new(100),
            prize_pool: Credits::new(500),
            slots: 32,
        },
        EntryTier {
            id: TierId::Elite,
            entry_fee: Credits::new(250),
            prize_pool: Credits::new(1_500),
            slots: 16,
        },
        EntryTier {
            id: TierId::Legend,
            entry_fee: Credits::new(500),
            prize_pool: Credits::new(4_000),
            slots: 8,
        },
    ]
}

pub fn tier(id: TierId) -> EntryTier {
    entry_tiers()
        .into_iter()
        .find(|tier| tier.id == id)
        .expect("tier table covers every TierId")
}

/// A slot start time, minutes since midnight, shown as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(u16);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid slot time: {0}")]
pub struct SlotTimeParseError(String);

impl SlotTime {
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, SlotTimeParseError> {
        if hour > 23 || minute > 59 {
            return Err(SlotTimeParseError(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self(hour * 60 + minute))
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl TryFrom<&str> for SlotTime {
    type Error = SlotTimeParseError;

    /// Accepts "HH:MM" and "HH:MM:SS" (seconds must be zero)
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = value.split(':');
        let hour = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(|| SlotTimeParseError(value.to_string()))?;
        let minute = parts
            .next()
            .and_then(|p| p.parse::<u16>().ok())
            .ok_or_else(|| SlotTimeParseError(value.to_string()))?;
        if let Some(seconds) = parts.next() {
            if seconds.parse::<u16>() != Ok(0) {
                return Err(SlotTimeParseError(value.to_string()));
            }
        }
        if parts.next().is_some() {
            return Err(SlotTimeParseError(value.to_string()));
        }
        Self::from_hm(hour, minute).map_err(|_| SlotTimeParseError(value.to_string()))
    }
}

impl TryFrom<String> for SlotTime {
    type Error = SlotTimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SlotTime::try_from(value.as_str())
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// The daily slot grid: 20-minute increments from 10:00 until 22:00
pub fn time_slots() -> Vec<SlotTime> {
    let mut slots = Vec::new();
    let mut minutes = SLOT_FIRST_HOUR * 60;
    while minutes < SLOT_LAST_HOUR * 60 {
        slots.push(SlotTime(minutes));
        minutes += SLOT_INTERVAL_MINUTES;
    }
    slots
}

pub fn is_valid_slot(slot: SlotTime) -> bool {
    let minutes = slot.0;
    minutes >= SLOT_FIRST_HOUR * 60
        && minutes < SLOT_LAST_HOUR * 60
        && (minutes - SLOT_FIRST_HOUR * 60) % SLOT_INTERVAL_MINUTES == 0
}

/// One bookable slot as shown to the player
///
/// `registered_players` is not tracked server-side; it is always reported
/// as 0 and capacity is display-only.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSlotInfo {
    pub start: SlotTime,
    pub registered_players: u32,
    pub max_players: u32,
}

/// The slot board for a mode/team-size pair; `None` when the pair is not
/// offered
pub fn slot_board(mode: GameMode, team_size: TeamSize) -> Option<Vec<TimeSlotInfo>> {
    let capacity = max_players(mode, team_size)?;
    Some(
        time_slots()
            .into_iter()
            .map(|start| TimeSlotInfo {
                start,
                registered_players: 0,
                max_players: capacity,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_grid_shape() {
        let slots = time_slots();
        assert_eq!(slots.len(), 36);
        assert_eq!(slots[0].to_string(), "10:00");
        assert_eq!(slots[1].to_string(), "10:20");
        assert_eq!(slots.last().unwrap().to_string(), "21:40");
    }

    #[test]
    fn test_slot_validity() {
        assert!(is_valid_slot(SlotTime::try_from("10:00").unwrap()));
        assert!(is_valid_slot(SlotTime::try_from("21:40").unwrap()));
        assert!(!is_valid_slot(SlotTime::try_from("22:00").unwrap()));
        assert!(!is_valid_slot(SlotTime::try_from("09:40").unwrap()));
        assert!(!is_valid_slot(SlotTime::try_from("10:10").unwrap()));
    }

    #[test]
    fn test_slot_time_parsing() {
        assert_eq!(SlotTime::try_from("18:20").unwrap().to_string(), "18:20");
        assert_eq!(SlotTime::try_from("18:20:00").unwrap().to_string(), "18:20");
        assert!(SlotTime::try_from("25:00").is_err());
        assert!(SlotTime::try_from("18:61").is_err());
        assert!(SlotTime::try_from("18:20:30").is_err());
        assert!(SlotTime::try_from("noon").is_err());
    }

    #[test]
    fn test_team_size_table() {
        assert_eq!(max_players(GameMode::BattleRoyale, TeamSize::Squad), Some(48));
        assert_eq!(max_players(GameMode::ClashSquad, TeamSize::Squad), Some(8));
        assert_eq!(max_players(GameMode::ClashSquad, TeamSize::Solo), None);
        assert_eq!(max_players(GameMode::LoneWolf, TeamSize::Solo), Some(2));
        assert_eq!(max_players(GameMode::LoneWolf, TeamSize::Squad), None);
    }

    #[test]
    fn test_entry_tiers() {
        let tiers = entry_tiers();
        assert_eq!(tiers.len(), 4);
        let fees: Vec<u64> = tiers.iter().map(|t| t.entry_fee.as_u64()).collect();
        assert_eq!(fees, vec![50, 100, 250, 500]);
        assert_eq!(tier(TierId::Elite).prize_pool.as_u64(), 1_500);
    }

    #[test]
    fn test_slot_board_reports_zero_occupancy() {
        let board = slot_board(GameMode::ClashSquad, TeamSize::Squad).unwrap();
        assert_eq!(board.len(), 36);
        assert!(board.iter().all(|s| s.registered_players == 0));
        assert!(board.iter().all(|s| s.max_players == 8));
        assert!(slot_board(GameMode::ClashSquad, TeamSize::Solo).is_none());
    }
}
