//! Movement cost table keyed by movement profile and terrain behavior.
//!
//! The table is an explicitly constructed value: the composition root builds
//! it once (usually from [`MoveCostTableBuilder::standard`], optionally with
//! data-driven overrides) and shares it with whoever scores paths.
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{ErrorCategory, GameError};
use crate::terrain::TerrainBehavior;

use super::MoveProfile;

/// Cost of entering a cell, or of a whole path.
///
/// [`MoveCost::IMPASSABLE`] is a sentinel at the top of the range. Addition
/// saturates, so any sum that includes an impassable step stays impassable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveCost(u32);

impl MoveCost {
    pub const ZERO: Self = Self(0);
    pub const IMPASSABLE: Self = Self(u32::MAX);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn is_passable(self) -> bool {
        self.0 != u32::MAX
    }

    /// Finite cost, or `None` when impassable.
    pub const fn value(self) -> Option<u32> {
        if self.is_passable() { Some(self.0) } else { None }
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// True if this cost is passable and does not exceed `budget`.
    pub fn within(self, budget: u32) -> bool {
        self.value().is_some_and(|cost| cost <= budget)
    }
}

impl Add for MoveCost {
    type Output = MoveCost;

    fn add(self, rhs: MoveCost) -> MoveCost {
        self.saturating_add(rhs)
    }
}

impl Sum for MoveCost {
    fn sum<I: Iterator<Item = MoveCost>>(iter: I) -> Self {
        iter.fold(MoveCost::ZERO, Add::add)
    }
}

impl fmt::Display for MoveCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(cost) => write!(f, "{cost}"),
            None => f.write_str("impassable"),
        }
    }
}

type CostRow<T> = [T; TerrainBehavior::COUNT];

/// Total mapping from (movement profile, terrain behavior) to a move cost.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveCostTable {
    costs: [CostRow<MoveCost>; MoveProfile::COUNT],
}

impl MoveCostTable {
    pub fn builder() -> MoveCostTableBuilder {
        MoveCostTableBuilder::new()
    }

    /// The built-in cost table.
    pub fn standard() -> Result<Self, MoveCostError> {
        MoveCostTableBuilder::standard().build()
    }

    /// Cost for `profile` to enter a cell with `behavior`.
    pub fn cost_of(&self, profile: MoveProfile, behavior: TerrainBehavior) -> MoveCost {
        self.costs[profile.index()][behavior.index()]
    }

    /// Total cost of walking a sequence of cells.
    ///
    /// The first cell is where the unit already stands and is free, so a
    /// single-cell (or empty) sequence costs zero.
    pub fn path_cost<I>(&self, profile: MoveProfile, behaviors: I) -> MoveCost
    where
        I: IntoIterator<Item = TerrainBehavior>,
    {
        behaviors
            .into_iter()
            .skip(1)
            .map(|behavior| self.cost_of(profile, behavior))
            .sum()
    }

    /// Returns a builder pre-filled with this table, for layering overrides.
    pub fn to_builder(&self) -> MoveCostTableBuilder {
        MoveCostTableBuilder {
            entries: self.costs.map(|row| row.map(Some)),
        }
    }
}

/// Incremental constructor for [`MoveCostTable`].
///
/// Assignments are last-write-wins, which supports the pattern of setting a
/// default for every profile and then overriding specific ones.
#[derive(Clone, Debug)]
pub struct MoveCostTableBuilder {
    entries: [CostRow<Option<MoveCost>>; MoveProfile::COUNT],
}

impl Default for MoveCostTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveCostTableBuilder {
    /// Creates a builder with no assigned entries.
    pub fn new() -> Self {
        Self {
            entries: [[None; TerrainBehavior::COUNT]; MoveProfile::COUNT],
        }
    }

    /// Assigns `cost` to every (profile, behavior) pair.
    pub fn fill(&mut self, cost: MoveCost) -> &mut Self {
        for row in &mut self.entries {
            row.fill(Some(cost));
        }
        self
    }

    /// Assigns `cost` for `behavior` under every profile.
    pub fn set_all(&mut self, behavior: TerrainBehavior, cost: MoveCost) -> &mut Self {
        for row in &mut self.entries {
            row[behavior.index()] = Some(cost);
        }
        self
    }

    /// Assigns `cost` for `behavior` under each of `profiles`.
    pub fn set(
        &mut self,
        behavior: TerrainBehavior,
        cost: MoveCost,
        profiles: &[MoveProfile],
    ) -> &mut Self {
        for profile in profiles {
            self.entries[profile.index()][behavior.index()] = Some(cost);
        }
        self
    }

    /// Assigns `cost` for every behavior under `profile`.
    pub fn set_profile(&mut self, profile: MoveProfile, cost: MoveCost) -> &mut Self {
        self.entries[profile.index()].fill(Some(cost));
        self
    }

    /// Validates totality and finite costs, producing the table.
    pub fn build(&self) -> Result<MoveCostTable, MoveCostError> {
        let mut costs = [[MoveCost::IMPASSABLE; TerrainBehavior::COUNT]; MoveProfile::COUNT];

        for profile in MoveProfile::iter() {
            for behavior in TerrainBehavior::iter() {
                let cost = self.entries[profile.index()][behavior.index()]
                    .ok_or(MoveCostError::MissingEntry { profile, behavior })?;
                if cost == MoveCost::ZERO {
                    return Err(MoveCostError::ZeroCost { profile, behavior });
                }
                costs[profile.index()][behavior.index()] = cost;
            }
        }

        Ok(MoveCostTable { costs })
    }

    /// Builder holding the built-in costs.
    pub fn standard() -> Self {
        use MoveProfile::*;
        use TerrainBehavior as T;

        let step = MoveCost::new;
        let mut builder = Self::new();
        builder.fill(MoveCost::IMPASSABLE);

        // Open terrain: everyone pays 1 or 2.
        builder
            .set_all(T::Flat, step(1))
            .set_all(T::House, step(1))
            .set_all(T::Sand, step(1))
            .set_all(T::Throne, step(1))
            .set_all(T::Ruins, step(2))
            .set_all(T::Fort, step(2));

        // Rough terrain.
        builder
            .set_all(T::Desert, step(2))
            .set(T::Desert, step(3), &[Armor, Fighter, NomadA, NomadB])
            .set(T::Desert, step(4), &[KnightA, KnightB])
            .set(T::Desert, step(1), &[Mage]);
        builder
            .set_all(T::Forest, step(2))
            .set(T::Forest, step(3), &[KnightA, KnightB]);
        builder
            .set_all(T::Pillar, step(2))
            .set(T::Pillar, step(3), &[KnightA, KnightB, NomadA, NomadB]);
        builder
            .set_all(T::Mountain, step(4))
            .set(T::Mountain, step(3), &[Fighter, Bandit, Pirate, Berserker])
            .set(T::Mountain, step(5), &[NomadB])
            .set(T::Mountain, step(6), &[KnightB])
            .set(T::Mountain, MoveCost::IMPASSABLE, &[KnightA, NomadA, Armor]);
        builder
            .set_all(T::River, step(5))
            .set(T::River, step(2), &[Pirate, Berserker])
            .set(
                T::River,
                MoveCost::IMPASSABLE,
                &[Armor, Fighter, Mage, KnightA, KnightB, NomadA],
            );

        // Impassable unless specialised.
        builder
            .set_all(T::Peak, MoveCost::IMPASSABLE)
            .set(T::Peak, step(4), &[Bandit, Berserker]);
        builder
            .set_all(T::Sea, MoveCost::IMPASSABLE)
            .set(T::Sea, step(2), &[Pirate, Berserker]);
        builder
            .set_all(T::Lake, MoveCost::IMPASSABLE)
            .set(T::Lake, step(3), &[Pirate, Berserker]);
        builder.set_all(T::Fence, MoveCost::IMPASSABLE);

        // Flyers pay 1 everywhere, walls stop everyone.
        builder
            .set_profile(Flyer, step(1))
            .set_all(T::Wall, MoveCost::IMPASSABLE);

        builder
    }
}

/// Errors raised while building a [`MoveCostTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveCostError {
    #[error("no move cost registered for {profile} on {behavior}")]
    MissingEntry {
        profile: MoveProfile,
        behavior: TerrainBehavior,
    },

    #[error("move cost for {profile} on {behavior} must be at least 1")]
    ZeroCost {
        profile: MoveProfile,
        behavior: TerrainBehavior,
    },
}

impl GameError for MoveCostError {
    fn category(&self) -> ErrorCategory {
        match self {
            MoveCostError::MissingEntry { .. } => ErrorCategory::NotFound,
            MoveCostError::ZeroCost { .. } => ErrorCategory::InvalidArgument,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveCostError::MissingEntry { .. } => "MOVE_COST_MISSING_ENTRY",
            MoveCostError::ZeroCost { .. } => "MOVE_COST_ZERO",
        }
    }
}
