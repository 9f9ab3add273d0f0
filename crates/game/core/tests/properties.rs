//! Property tests for grid geometry, paths and cost totaling.
use proptest::prelude::*;
use strum::IntoEnumIterator;
use tactics_core::{
    Direction, Map, MoveCost, MoveCostTable, MoveProfile, Path, Position, TerrainBehavior, Unit,
    UnitClass, UnitId,
};

fn position() -> impl Strategy<Value = Position> {
    (-1_000i32..1_000, -1_000i32..1_000).prop_map(|(x, y)| Position::new(x, y))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn behavior() -> impl Strategy<Value = TerrainBehavior> {
    prop::sample::select(TerrainBehavior::iter().collect::<Vec<_>>())
}

fn profile() -> impl Strategy<Value = MoveProfile> {
    prop::sample::select(MoveProfile::iter().collect::<Vec<_>>())
}

/// A random walk of adjacent steps that never revisits a cell.
fn walk() -> impl Strategy<Value = Vec<Position>> {
    (position(), prop::collection::vec(direction(), 0..40)).prop_map(|(start, steps)| {
        let mut points = vec![start];
        for direction in steps {
            let Some(end) = points.last().copied() else {
                break;
            };
            let next = end.translated(direction);
            if !points.contains(&next) {
                points.push(next);
            }
        }
        points
    })
}

proptest! {
    #[test]
    fn adjacency_matches_unit_euclidean_distance(a in position(), b in position()) {
        prop_assert_eq!(a.is_adjacent_to(b), a.distance(b) == 1.0);
    }

    #[test]
    fn translate_then_opposite_is_identity(
        p in position(),
        d in direction(),
        magnitude in -50i32..50,
    ) {
        prop_assert_eq!(p.translated_by(d, magnitude).translated_by(d.opposite(), magnitude), p);
    }

    #[test]
    fn adjacent_points_are_all_adjacent(p in position()) {
        for neighbour in p.adjacent_points() {
            prop_assert!(p.is_adjacent_to(neighbour));
        }
    }

    #[test]
    fn random_walks_round_trip_through_path(points in walk()) {
        let path = Path::new(points.clone()).unwrap();
        prop_assert_eq!(path.to_vec(), points);
    }

    #[test]
    fn path_creation_fails_iff_some_pair_is_detached(
        points in prop::collection::vec((-3i32..3, -3i32..3), 0..8)
    ) {
        let points: Vec<Position> = points.into_iter().map(Position::from).collect();
        let broken = points.windows(2).any(|pair| !pair[0].is_adjacent_to(pair[1]));
        prop_assert_eq!(Path::new(points).is_err(), broken);
    }

    #[test]
    fn revisiting_truncates_idempotently(points in walk(), pick in any::<prop::sample::Index>()) {
        let path = Path::new(points.clone()).unwrap();
        let index = pick.index(points.len());
        let revisit = points[index];

        let once = path.concat(revisit).unwrap();
        prop_assert_eq!(once.as_slice(), &points[..=index]);

        let twice = once.concat(revisit).unwrap();
        prop_assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn path_cost_ignores_the_first_cell(
        profile in profile(),
        first in behavior(),
        rest in prop::collection::vec(behavior(), 0..6),
    ) {
        let table = MoveCostTable::standard().unwrap();
        prop_assert_eq!(table.path_cost(profile, [first]), MoveCost::ZERO);

        let expected: MoveCost = rest.iter().map(|b| table.cost_of(profile, *b)).sum();
        let sequence = std::iter::once(first).chain(rest.iter().copied());
        prop_assert_eq!(table.path_cost(profile, sequence), expected);
    }

    #[test]
    fn a_unit_occupies_at_most_one_cell(
        targets in prop::collection::vec((0i32..4, 0i32..4), 1..10)
    ) {
        let mut map = Map::new(4, 4).unwrap();
        let mut unit = Unit::new(UnitId(1), UnitClass::Mercenary);

        for (x, y) in targets {
            let _ = map.add_unit(Position::new(x, y), &mut unit);
            let occupied = (0..4)
                .flat_map(|y| (0..4).map(move |x| Position::new(x, y)))
                .filter(|cell| map.unit_at(*cell).unwrap() == Some(UnitId(1)))
                .count();
            prop_assert_eq!(occupied, 1);
        }
    }
}
