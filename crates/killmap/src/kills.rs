//! Kill events and the two factions they are attributed to.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a recorded round.
pub type RoundId = u64;

/// One of the two opposing sides. Positive advantage values mean [`Faction::A`] dominates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Faction {
    A,
    B,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::A, Faction::B];

    /// Team number used by the game's round statistics.
    pub fn team_number(self) -> u8 {
        match self {
            Faction::A => 1,
            Faction::B => 2,
        }
    }

    pub fn from_team_number(team: u8) -> Option<Self> {
        match team {
            1 => Some(Faction::A),
            2 => Some(Faction::B),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Faction::A => Faction::B,
            Faction::B => Faction::A,
        }
    }
}

/// A kill scored at a world position by a faction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KillEvent {
    pub position: Vec3,
    pub faction: Faction,
}

impl KillEvent {
    pub fn new(position: Vec3, faction: Faction) -> Self {
        Self { position, faction }
    }
}

/// Kill positions grouped by faction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FactionKills {
    pub a: Vec<Vec3>,
    pub b: Vec<Vec3>,
}

impl FactionKills {
    pub fn new(a: Vec<Vec3>, b: Vec<Vec3>) -> Self {
        Self { a, b }
    }

    /// Splits a stream of events by faction, keeping the order within each faction.
    pub fn from_events<I: IntoIterator<Item = KillEvent>>(events: I) -> Self {
        let mut kills = Self::default();
        for event in events {
            kills.get_mut(event.faction).push(event.position);
        }
        kills
    }

    pub fn get(&self, faction: Faction) -> &[Vec3] {
        match faction {
            Faction::A => &self.a,
            Faction::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, faction: Faction) -> &mut Vec<Vec3> {
        match faction {
            Faction::A => &mut self.a,
            Faction::B => &mut self.b,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_numbers_roundtrip() {
        for f in Faction::ALL {
            assert_eq!(Faction::from_team_number(f.team_number()), Some(f));
        }
        assert_eq!(Faction::from_team_number(0), None);
        assert_eq!(Faction::from_team_number(3), None);
    }

    #[test]
    fn opponent_swaps_sides() {
        assert_eq!(Faction::A.opponent(), Faction::B);
        assert_eq!(Faction::B.opponent().opponent(), Faction::B);
    }

    #[test]
    fn from_events_groups_by_faction_in_order() {
        let kills = FactionKills::from_events([
            KillEvent::new(Vec3::X, Faction::B),
            KillEvent::new(Vec3::Y, Faction::A),
            KillEvent::new(Vec3::Z, Faction::B),
        ]);
        assert_eq!(kills.get(Faction::A), &[Vec3::Y]);
        assert_eq!(kills.get(Faction::B), &[Vec3::X, Vec3::Z]);
        assert!(!kills.is_empty());
        assert!(FactionKills::default().is_empty());
    }
}
