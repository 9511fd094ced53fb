use std::cmp;

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::cells::CellCoordinate;
use crate::layout::MazeLayout;
use crate::units::NodesCount;

/// Flood-fill distances from a start cell to every cell reachable from it
/// through open passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: CellCoordinate,
    distances: FnvHashMap<CellCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Breadth-first flood of the layout from `start_coordinate`.
    /// `None` if the start is outside the grid.
    pub fn new(layout: &MazeLayout, start_coordinate: CellCoordinate) -> Option<Distances> {
        if !layout.grid_size().is_valid_coordinate(start_coordinate) {
            return None;
        }

        let NodesCount(cells_count) = layout.grid_size().cells_count();
        let mut distances: FnvHashMap<CellCoordinate, u32> =
            FnvHashMap::with_capacity_and_hasher(cells_count, Default::default());
        distances.insert(start_coordinate, 0);
        let mut max_distance = 0;

        // Every step crosses exactly one passage, so the first distance
        // written to a cell is already the shortest and the map doubles as
        // the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {
            let mut new_frontier = Vec::new();
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                max_distance = cmp::max(max_distance, distance_to_cell);

                for link_coordinate in &*layout.links(*cell_coord) {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + 1);
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> CellCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline]
    pub fn distance_from_start_to(&self, coord: CellCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// The number of cells the flood reached, the start included.
    #[inline]
    pub fn cells_counted(&self) -> usize {
        self.distances.len()
    }

    /// The reachable cells furthest from the start.
    pub fn furthest_points(&self) -> SmallVec<[CellCoordinate; 8]> {
        self.distances
            .iter()
            .filter(|&(_, &distance)| distance == self.max_distance)
            .map(|(&coord, _)| coord)
            .collect()
    }
}

/// The cells of a shortest route from the distances' start cell to
/// `end_point`, the start first.
pub fn shortest_path(layout: &MazeLayout,
                     distances_from_start: &Distances,
                     end_point: CellCoordinate)
                     -> Option<Vec<CellCoordinate>> {

    // The end point is not reachable from the start.
    if distances_from_start.distance_from_start_to(end_point).is_none() {
        return None;
    }

    // Walk from the end back to the start, always stepping to a linked cell
    // strictly closer to the start.
    let start = distances_from_start.start();
    let mut path = vec![end_point];
    let mut current_coord = end_point;
    while current_coord != start {
        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)
            .expect("path cells must have a distance from the start");

        let closest_to_start =
            layout.links(current_coord)
                .iter()
                .filter_map(|&coord| {
                    distances_from_start.distance_from_start_to(coord).map(|d| (coord, d))
                })
                .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance <
                                                     current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::cells::Direction;
    use crate::dimensions::GridSize;
    use crate::generators;
    use crate::units::{ColumnsCount, RowsCount};

    static OUT_OF_GRID_COORDINATE: CellCoordinate = CellCoordinate {
        row: u32::MAX,
        column: u32::MAX,
    };

    fn cc(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate::new(row, column)
    }

    fn walled(rows: usize, columns: usize) -> MazeLayout {
        let size = GridSize::new(RowsCount(rows), ColumnsCount(columns))
            .expect("valid grid dimensions");
        MazeLayout::fully_walled(size, cc(0, 0))
    }

    // A 1 x 4 layout carved into a single west-east corridor.
    fn corridor() -> MazeLayout {
        let mut layout = walled(1, 4);
        layout.open_passage(cc(0, 0), Direction::East);
        layout.open_passage(cc(0, 1), Direction::East);
        layout.open_passage(cc(0, 2), Direction::East);
        layout
    }

    #[test]
    fn construction_requires_a_start_inside_the_grid() {
        let layout = walled(2, 3);
        assert!(Distances::new(&layout, OUT_OF_GRID_COORDINATE).is_none());
        assert!(Distances::new(&layout, cc(1, 2)).is_some());
    }

    #[test]
    fn start_coordinate_is_remembered() {
        let layout = walled(2, 3);
        let distances = Distances::new(&layout, cc(1, 1)).unwrap();
        assert_eq!(distances.start(), cc(1, 1));
    }

    #[test]
    fn walled_up_layout_reaches_only_the_start() {
        let layout = walled(3, 3);
        let distances = Distances::new(&layout, cc(1, 1)).unwrap();
        assert_eq!(distances.cells_counted(), 1);
        assert_eq!(distances.max(), 0);
        assert_eq!(distances.distance_from_start_to(cc(1, 1)), Some(0));
        assert_eq!(distances.distance_from_start_to(cc(0, 0)), None);
        assert_eq!(&*distances.furthest_points(), &[cc(1, 1)]);
        assert_eq!(shortest_path(&layout, &distances, cc(0, 0)), None);
    }

    #[test]
    fn corridor_distances() {
        let layout = corridor();
        let distances = Distances::new(&layout, cc(0, 0)).unwrap();
        assert_eq!(distances.cells_counted(), 4);
        assert_eq!(distances.max(), 3);
        for column in 0..4 {
            assert_eq!(distances.distance_from_start_to(cc(0, column)), Some(column));
        }
        assert_eq!(&*distances.furthest_points(), &[cc(0, 3)]);
    }

    #[test]
    fn corridor_shortest_path_visits_every_cell() {
        let layout = corridor();
        let distances = Distances::new(&layout, cc(0, 0)).unwrap();
        let path = shortest_path(&layout, &distances, cc(0, 3)).unwrap();
        assert_eq!(path, vec![cc(0, 0), cc(0, 1), cc(0, 2), cc(0, 3)]);

        // Degenerate route: the end is the start.
        let trivial = shortest_path(&layout, &distances, cc(0, 0)).unwrap();
        assert_eq!(trivial, vec![cc(0, 0)]);
    }

    #[test]
    fn furthest_points_can_tie() {
        let mut layout = walled(1, 3);
        layout.open_passage(cc(0, 0), Direction::East);
        layout.open_passage(cc(0, 1), Direction::East);
        let distances = Distances::new(&layout, cc(0, 1)).unwrap();
        assert_eq!(distances.max(), 1);
        let furthest: Vec<CellCoordinate> =
            distances.furthest_points().iter().cloned().sorted().collect();
        assert_eq!(furthest, vec![cc(0, 0), cc(0, 2)]);
    }

    #[test]
    fn distances_cover_every_cell_of_a_generated_maze() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            if rows == 0 || columns == 0 || rows > 16 || columns > 16 {
                return TestResult::discard();
            }
            let maze = generators::generate(RowsCount(rows as usize),
                                            ColumnsCount(columns as usize),
                                            Some(seed))
                .expect("non-zero dimensions");
            let distances = Distances::new(&maze, maze.start()).expect("start is in the grid");

            if distances.cells_counted() != maze.cells_count() {
                return TestResult::failed();
            }
            TestResult::from_bool(maze.iter()
                .all(|coord| distances.distance_from_start_to(coord).is_some()))
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn route_from_start_to_goal_is_stepwise_linked_and_shortest() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            if rows == 0 || columns == 0 || rows > 16 || columns > 16 {
                return TestResult::discard();
            }
            let maze = generators::generate(RowsCount(rows as usize),
                                            ColumnsCount(columns as usize),
                                            Some(seed))
                .expect("non-zero dimensions");
            let distances = Distances::new(&maze, maze.start()).expect("start is in the grid");
            let path = match shortest_path(&maze, &distances, maze.goal()) {
                Some(path) => path,
                None => return TestResult::failed(),
            };

            let endpoints_ok = path.first() == Some(&maze.start()) &&
                               path.last() == Some(&maze.goal());
            let steps_linked = path.windows(2).all(|pair| maze.is_linked(pair[0], pair[1]));
            let length_ok = distances.distance_from_start_to(maze.goal())
                .map_or(false, |d| path.len() == d as usize + 1);
            TestResult::from_bool(endpoints_ok && steps_linked && length_ok)
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
