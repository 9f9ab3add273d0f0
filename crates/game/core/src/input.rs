//! Abstract commands produced by the input layer.
use crate::grid::Direction;

/// Device-independent command.
///
/// The planning core reacts to the four directions and [`Command::A`]
/// (confirm). The remaining buttons are reserved for other subsystems and
/// are ignored by the cursor.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    L,
    R,
    Start,
    Select,
}

impl Command {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }

    pub const fn is_confirm(self) -> bool {
        matches!(self, Command::A)
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Command::Up,
            Direction::Down => Command::Down,
            Direction::Left => Command::Left,
            Direction::Right => Command::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn only_arrows_carry_a_direction() {
        let directional: Vec<_> = Command::iter().filter_map(Command::direction).collect();
        assert_eq!(directional, Direction::ALL);
        for direction in Direction::ALL {
            assert_eq!(Command::from(direction).direction(), Some(direction));
        }
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("start".parse::<Command>(), Ok(Command::Start));
        assert_eq!("a".parse::<Command>(), Ok(Command::A));
        assert!("jump".parse::<Command>().is_err());
        assert!(Command::A.is_confirm());
        assert!(!Command::B.is_confirm());
    }
}
