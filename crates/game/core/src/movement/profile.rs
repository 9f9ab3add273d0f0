/// Movement archetype of a unit, selecting one row of the move cost table.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveProfile {
    /// Infantry on foot (mercenaries, myrmidons, lords)
    #[default]
    Foot,
    /// Heavily armored infantry
    Armor,
    /// Mounted, lighter barding (cavaliers)
    KnightA,
    /// Mounted, promoted (paladins)
    KnightB,
    /// Horse archers
    NomadA,
    /// Promoted horse archers
    NomadB,
    /// Axe infantry
    Fighter,
    /// Mountain raiders
    Bandit,
    /// Sea raiders
    Pirate,
    /// Berserkers cross both mountains and water
    Berserker,
    /// Robed casters
    Mage,
    /// Pegasus and wyvern riders
    Flyer,
}

impl MoveProfile {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
