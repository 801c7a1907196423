use crate::config::BattleConfig;

use super::{Position, Team, UnitId};

const COLUMNS: usize = BattleConfig::COLUMNS as usize;
const ROWS: usize = BattleConfig::ROWS as usize;

/// One team's 2×3 formation grid, indexed `[row][col]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formation {
    slots: [[Option<UnitId>; COLUMNS]; ROWS],
}

impl Formation {
    pub fn get(&self, position: Position) -> Option<&UnitId> {
        if !position.is_valid() {
            return None;
        }
        self.slots[position.row as usize][position.col as usize].as_ref()
    }

    /// Places a unit. Returns the previous occupant on collision and leaves
    /// the grid unchanged.
    pub fn place(&mut self, position: Position, id: UnitId) -> Result<(), UnitId> {
        let slot = &mut self.slots[position.row as usize][position.col as usize];
        if let Some(occupant) = slot {
            return Err(occupant.clone());
        }
        *slot = Some(id);
        Ok(())
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, &UnitId)> {
        self.slots.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter().enumerate().filter_map(move |(col, slot)| {
                slot.as_ref()
                    .map(|id| (Position::new(row as u8, col as u8), id))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Formation grids of both teams.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formations {
    pub player: Formation,
    pub enemy: Formation,
}

impl Formations {
    pub fn team(&self, team: Team) -> &Formation {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    pub fn team_mut(&mut self, team: Team) -> &mut Formation {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }
}
