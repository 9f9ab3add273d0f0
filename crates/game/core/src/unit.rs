//! Placeable units and the classes that determine how they move.
use crate::error::{ErrorCategory, GameError};
use crate::grid::Position;
use crate::map::{Map, MapHandle, MapId};
use crate::movement::MoveProfile;

/// Unique identifier for a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Trait tags used by effectiveness rules (e.g. bows against flyers).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitType {
    LightSwordsman,
    Horse,
    Armor,
    Flyer,
    Dragon,
}

/// Unit class: selects the movement profile and the type tags of a unit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    #[default]
    Mercenary,
    Cavalier,
    Knight,
    Fighter,
    Brigand,
    Pirate,
    Berserker,
    Mage,
    Nomad,
    PegasusKnight,
    WyvernKnight,
}

impl UnitClass {
    pub const fn move_profile(self) -> MoveProfile {
        match self {
            UnitClass::Mercenary => MoveProfile::Foot,
            UnitClass::Cavalier => MoveProfile::KnightA,
            UnitClass::Knight => MoveProfile::Armor,
            UnitClass::Fighter => MoveProfile::Fighter,
            UnitClass::Brigand => MoveProfile::Bandit,
            UnitClass::Pirate => MoveProfile::Pirate,
            UnitClass::Berserker => MoveProfile::Berserker,
            UnitClass::Mage => MoveProfile::Mage,
            UnitClass::Nomad => MoveProfile::NomadA,
            UnitClass::PegasusKnight | UnitClass::WyvernKnight => MoveProfile::Flyer,
        }
    }

    pub const fn unit_types(self) -> &'static [UnitType] {
        match self {
            UnitClass::Cavalier | UnitClass::Nomad => &[UnitType::Horse],
            UnitClass::Knight => &[UnitType::Armor],
            UnitClass::PegasusKnight => &[UnitType::Flyer],
            UnitClass::WyvernKnight => &[UnitType::Flyer, UnitType::Dragon],
            _ => &[],
        }
    }

    pub fn has_type(self, unit_type: UnitType) -> bool {
        self.unit_types().contains(&unit_type)
    }
}

/// A placeable entity.
///
/// The [`Map`] owns the authoritative placement index. A unit only remembers
/// which map (if any) it is currently on. That handle is set and cleared by
/// the map's placement operations, and lapses when the map is dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct Unit {
    id: UnitId,
    class: UnitClass,
    map: Option<MapHandle>,
}

impl Unit {
    pub fn new(id: UnitId, class: UnitClass) -> Self {
        Self {
            id,
            class,
            map: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn class(&self) -> UnitClass {
        self.class
    }

    pub fn move_profile(&self) -> MoveProfile {
        self.class.move_profile()
    }

    /// Map this unit is currently placed on.
    pub fn map_id(&self) -> Option<MapId> {
        self.map.as_ref().and_then(MapHandle::live_id)
    }

    pub fn is_on_map(&self) -> bool {
        self.map_id().is_some()
    }

    /// Position of this unit on `map`.
    ///
    /// Asking an unplaced unit, or passing a map other than the one it is
    /// placed on, is a sequencing error.
    pub fn position(&self, map: &Map) -> Result<Position, UnitError> {
        match self.map_id() {
            None => Err(UnitError::NotPlaced { unit: self.id }),
            Some(id) if id != map.id() => Err(UnitError::WrongMap {
                unit: self.id,
                placed_on: id,
                queried: map.id(),
            }),
            Some(_) => map
                .position_of(self.id)
                .map_err(|_| UnitError::NotPlaced { unit: self.id }),
        }
    }

    pub(crate) fn attach(&mut self, map: MapHandle) -> Result<(), UnitError> {
        match self.map_id() {
            Some(current) => Err(UnitError::AlreadyPlaced {
                unit: self.id,
                map: current,
            }),
            None => {
                self.map = Some(map);
                Ok(())
            }
        }
    }

    pub(crate) fn detach(&mut self) {
        self.map = None;
    }
}

/// Errors raised by unit placement bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("{unit} is not placed on any map")]
    NotPlaced { unit: UnitId },

    #[error("{unit} is already placed on {map}")]
    AlreadyPlaced { unit: UnitId, map: MapId },

    #[error("{unit} is placed on {placed_on}, not {queried}")]
    WrongMap {
        unit: UnitId,
        placed_on: MapId,
        queried: MapId,
    },
}

impl GameError for UnitError {
    fn category(&self) -> ErrorCategory {
        ErrorCategory::PreconditionViolation
    }

    fn error_code(&self) -> &'static str {
        match self {
            UnitError::NotPlaced { .. } => "UNIT_NOT_PLACED",
            UnitError::AlreadyPlaced { .. } => "UNIT_ALREADY_PLACED",
            UnitError::WrongMap { .. } => "UNIT_WRONG_MAP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wyvern_knights_fly_and_are_dragons() {
        let class = UnitClass::WyvernKnight;
        assert_eq!(class.move_profile(), MoveProfile::Flyer);
        assert!(class.has_type(UnitType::Flyer));
        assert!(class.has_type(UnitType::Dragon));
        assert!(!class.has_type(UnitType::Horse));
    }

    #[test]
    fn mercenaries_walk() {
        let unit = Unit::new(UnitId(1), UnitClass::Mercenary);
        assert_eq!(unit.move_profile(), MoveProfile::Foot);
        assert!(unit.class().unit_types().is_empty());
    }

    #[test]
    fn unplaced_units_have_no_position() {
        let map = Map::new(3, 3).unwrap();
        let unit = Unit::new(UnitId(7), UnitClass::Mage);
        let err = unit.position(&map).unwrap_err();
        assert_eq!(err, UnitError::NotPlaced { unit: UnitId(7) });
        assert!(err.category().is_caller_bug());
    }

    #[test]
    fn attach_refuses_a_second_map() {
        let mut unit = Unit::new(UnitId(2), UnitClass::Fighter);
        let first = Map::new(2, 2).unwrap();
        let second = Map::new(2, 2).unwrap();

        unit.attach(first.handle()).unwrap();
        assert_eq!(
            unit.attach(second.handle()),
            Err(UnitError::AlreadyPlaced {
                unit: UnitId(2),
                map: first.id(),
            })
        );

        unit.detach();
        assert!(!unit.is_on_map());
        assert!(unit.attach(second.handle()).is_ok());
    }

    #[test]
    fn dropping_a_map_releases_its_units() {
        let mut unit = Unit::new(UnitId(1), UnitClass::Mercenary);
        let mut first = Map::new(3, 3).unwrap();
        first.add_unit(Position::new(0, 0), &mut unit).unwrap();
        assert!(unit.is_on_map());

        drop(first);
        assert!(!unit.is_on_map());
        assert_eq!(unit.map_id(), None);

        let mut second = Map::new(3, 3).unwrap();
        second.add_unit(Position::new(2, 2), &mut unit).unwrap();
        assert_eq!(unit.map_id(), Some(second.id()));
        assert_eq!(unit.position(&second), Ok(Position::new(2, 2)));
    }

    #[test]
    fn position_on_another_map_is_rejected() {
        let mut home = Map::new(4, 4).unwrap();
        let other = Map::new(4, 4).unwrap();
        let mut unit = Unit::new(UnitId(3), UnitClass::Knight);
        home.add_unit(Position::new(1, 2), &mut unit).unwrap();

        assert_eq!(unit.position(&home), Ok(Position::new(1, 2)));
        assert!(matches!(
            unit.position(&other),
            Err(UnitError::WrongMap { .. })
        ));
    }

    #[test]
    fn class_names_parse_from_snake_case() {
        assert_eq!(
            "pegasus_knight".parse::<UnitClass>(),
            Ok(UnitClass::PegasusKnight)
        );
        assert_eq!(UnitClass::WyvernKnight.to_string(), "wyvern_knight");
    }
}
