use std::fmt;

use crate::config::BattleConfig;

/// Unique identifier of a unit on the battlefield.
///
/// Ordering is lexicographic, which is the last-resort tie-break for turn
/// order and the iteration order of [`crate::state::BattlefieldState::units`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Formation row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row {
    Back,
    Front,
}

impl Row {
    pub const fn index(self) -> u8 {
        match self {
            Self::Back => Position::BACK_ROW,
            Self::Front => Position::FRONT_ROW,
        }
    }
}

/// Slot in a team's 2×3 formation grid.
///
/// Row 1 is the front row and row 0 the back row; columns run 0..3 left to
/// right from the team's own point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const BACK_ROW: u8 = 0;
    pub const FRONT_ROW: u8 = 1;

    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn front(col: u8) -> Self {
        Self::new(Self::FRONT_ROW, col)
    }

    pub const fn back(col: u8) -> Self {
        Self::new(Self::BACK_ROW, col)
    }

    pub const fn is_valid(self) -> bool {
        self.row < BattleConfig::ROWS && self.col < BattleConfig::COLUMNS
    }

    pub const fn is_front_row(self) -> bool {
        self.row == Self::FRONT_ROW
    }

    pub const fn row_kind(self) -> Row {
        if self.is_front_row() { Row::Front } else { Row::Back }
    }

    /// Board-position priority used by turn order: front row 0, 1, 2 then
    /// back row 3, 4, 5. Lower acts first.
    pub const fn priority(self) -> u8 {
        if self.is_front_row() {
            self.col
        } else {
            BattleConfig::COLUMNS + self.col
        }
    }

    /// Coordinates on the shared battlefield grid.
    ///
    /// The player's back row is line 0 and front row line 1; the enemy's
    /// front row is line 2 and back row line 3, so the two front rows face
    /// each other.
    pub const fn battlefield_coords(self, team: Team) -> (i32, i32) {
        let line = match team {
            Team::Player => self.row as i32,
            Team::Enemy => 3 - self.row as i32,
        };
        (self.col as i32, line)
    }

    /// Manhattan distance between two units on the shared grid.
    pub const fn distance(team: Team, from: Position, other_team: Team, to: Position) -> u32 {
        let (ax, ay) = from.battlefield_coords(team);
        let (bx, by) = to.battlefield_coords(other_team);
        ax.abs_diff(bx) + ay.abs_diff(by)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_front_row_first() {
        assert_eq!(Position::front(0).priority(), 0);
        assert_eq!(Position::front(2).priority(), 2);
        assert_eq!(Position::back(0).priority(), 3);
        assert_eq!(Position::back(2).priority(), 5);
    }

    #[test]
    fn front_rows_face_each_other() {
        let player_front = Position::front(1);
        let enemy_front = Position::front(1);
        let enemy_back = Position::back(1);
        assert_eq!(Position::distance(Team::Player, player_front, Team::Enemy, enemy_front), 1);
        assert_eq!(Position::distance(Team::Player, player_front, Team::Enemy, enemy_back), 2);
        assert_eq!(
            Position::distance(Team::Player, Position::back(0), Team::Enemy, Position::front(2)),
            4
        );
    }

    #[test]
    fn validity() {
        assert!(Position::new(1, 2).is_valid());
        assert!(!Position::new(2, 0).is_valid());
        assert!(!Position::new(0, 3).is_valid());
    }
}
