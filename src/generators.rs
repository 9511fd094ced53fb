use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CellCoordinate, DirectionSmallVec, DIRECTIONS};
use crate::dimensions::{GridSize, GridSizeError};
use crate::layout::MazeLayout;
use crate::units::{ColumnsCount, RowsCount};

/// The random number generator driving a carve. A fixed seed reproduces a
/// layout exactly; without one the generator is seeded from the system.
pub fn carving_rng(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    }
}

/// Fisher-Yates shuffle: swap each slot, last to first, with a randomly
/// chosen slot at or before it.
pub fn shuffle<T>(items: &mut [T], rng: &mut XorShiftRng) {
    let mut counter = items.len();
    while counter > 0 {
        let index = rng.gen_range(0..counter);
        counter -= 1;
        items.swap(counter, index);
    }
}

// One level of the carve: a cell, the random order its exit directions are
// tried in, and how many have been tried so far.
#[derive(Debug)]
struct Frame {
    cell: CellCoordinate,
    candidates: DirectionSmallVec,
    next_candidate: usize,
}

impl Frame {
    /// Entering a cell marks it visited and fixes the random order its
    /// candidate directions will be tried in.
    fn enter(cell: CellCoordinate, layout: &mut MazeLayout, rng: &mut XorShiftRng) -> Frame {
        layout.mark_visited(cell);
        let mut candidates: DirectionSmallVec = DIRECTIONS.iter().cloned().collect();
        shuffle(&mut candidates, rng);
        Frame {
            cell,
            candidates,
            next_candidate: 0,
        }
    }
}

/// Carve a maze with the recursive backtracker algorithm, run as an explicit
/// work stack rather than by recursing.
///
/// From a random start cell the carve walks to unvisited neighbours in
/// shuffled direction order, opening the shared wall on each step, and
/// backtracks whenever the cell on top of the stack has no unvisited
/// neighbour left. Each cell is entered exactly once, so the opened passages
/// form a spanning tree of the grid and the layout is a perfect maze.
pub fn recursive_backtracker(size: GridSize, rng: &mut XorShiftRng) -> MazeLayout {
    let start = size.random_cell(rng);
    let mut layout = MazeLayout::fully_walled(size, start);

    let mut stack = vec![Frame::enter(start, &mut layout, rng)];
    loop {
        let next_step = match stack.last_mut() {
            None => break,
            Some(frame) => {
                let mut carve = None;
                while frame.next_candidate < frame.candidates.len() {
                    let direction = frame.candidates[frame.next_candidate];
                    frame.next_candidate += 1;

                    // A neighbour claimed since this frame was entered is
                    // skipped just like one never in the grid.
                    if let Some(neighbour) = layout.neighbour_at_direction(frame.cell,
                                                                           direction) {
                        if !layout.is_visited(neighbour) {
                            carve = Some((frame.cell, direction, neighbour));
                            break;
                        }
                    }
                }
                carve
            }
        };

        match next_step {
            Some((cell, direction, neighbour)) => {
                layout.open_passage(cell, direction);
                stack.push(Frame::enter(neighbour, &mut layout, rng));
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    debug_assert!(layout.visited().all_set(), "carving must reach every cell");
    layout
}

/// Generate a maze with the given dimensions, optionally fixing the seed of
/// the carving generator.
pub fn generate(rows: RowsCount,
                columns: ColumnsCount,
                seed: Option<u64>)
                -> Result<MazeLayout, GridSizeError> {
    let size = GridSize::new(rows, columns)?;
    let mut rng = carving_rng(seed);
    Ok(recursive_backtracker(size, &mut rng))
}
