use std::fmt;
use std::rc::Rc;

use petgraph::graph::NodeIndex;
use petgraph::{algo, Graph, Undirected};

use crate::bitgrid::BitGrid;
use crate::cells::{CellCoordinate, CoordinateSmallVec, Direction, DIRECTIONS};
use crate::dimensions::{CellIter, GridSize, RowIter};
use crate::displays::LayoutDisplay;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// The wall layout of a generated maze.
///
/// Openings are held in two bit matrices sharing the grid's dimensions:
/// a `rows x (columns - 1)` matrix for the walls standing between
/// side-by-side cells and a `(rows - 1) x columns` matrix for the walls
/// lying between stacked cells. A set bit is an open passage. The visited
/// matrix records which cells the carving traversal entered; a finished
/// layout always has every cell visited.
pub struct MazeLayout {
    size: GridSize,
    visited: BitGrid,
    vertical_openings: BitGrid,
    horizontal_openings: BitGrid,
    start: CellCoordinate,
    goal: CellCoordinate,
    cell_display: Option<Rc<dyn LayoutDisplay>>,
}

impl fmt::Debug for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "MazeLayout :: rows: {:?}, columns: {:?}, start: {:?}, goal: {:?}, passages: {:?}",
               self.rows(),
               self.columns(),
               self.start,
               self.goal,
               self.passages_count())
    }
}

impl MazeLayout {
    /// A layout with every wall in place and no cell visited, ready for the
    /// generator to carve. The goal is the bottom-right cell regardless of
    /// where the carve starts.
    pub(crate) fn fully_walled(size: GridSize, start: CellCoordinate) -> MazeLayout {
        let (vertical_rows, vertical_columns) = size.vertical_openings_shape();
        let (horizontal_rows, horizontal_columns) = size.horizontal_openings_shape();
        let goal = CellCoordinate::new(size.rows().0 as u32 - 1, size.columns().0 as u32 - 1);

        MazeLayout {
            size,
            visited: BitGrid::new(size.rows(), size.columns()),
            vertical_openings: BitGrid::new(vertical_rows, vertical_columns),
            horizontal_openings: BitGrid::new(horizontal_rows, horizontal_columns),
            start,
            goal,
            cell_display: None,
        }
    }

    pub(crate) fn mark_visited(&mut self, coord: CellCoordinate) {
        self.visited.set(coord.row as usize, coord.column as usize);
    }

    /// Open the wall shared by a cell and its neighbour in the given
    /// direction.
    ///
    /// Panics if that neighbour is outside the grid.
    pub(crate) fn open_passage(&mut self, coord: CellCoordinate, dir: Direction) {
        let (row, column) = (coord.row as usize, coord.column as usize);
        match dir {
            Direction::West => self.vertical_openings.set(row, column - 1),
            Direction::East => self.vertical_openings.set(row, column),
            Direction::North => self.horizontal_openings.set(row - 1, column),
            Direction::South => self.horizontal_openings.set(row, column),
        }
    }

    #[inline]
    pub fn grid_size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.size.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.size.columns()
    }

    #[inline]
    pub fn cells_count(&self) -> usize {
        self.size.cells_count().0
    }

    #[inline]
    pub fn start(&self) -> CellCoordinate {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> CellCoordinate {
        self.goal
    }

    #[inline]
    pub fn visited(&self) -> &BitGrid {
        &self.visited
    }

    #[inline]
    pub fn vertical_openings(&self) -> &BitGrid {
        &self.vertical_openings
    }

    #[inline]
    pub fn horizontal_openings(&self) -> &BitGrid {
        &self.horizontal_openings
    }

    #[inline]
    pub fn is_visited(&self, coord: CellCoordinate) -> bool {
        self.visited.is_set(coord.row as usize, coord.column as usize)
    }

    #[inline]
    pub fn set_cell_display(&mut self, cell_display: Option<Rc<dyn LayoutDisplay>>) {
        self.cell_display = cell_display;
    }

    #[inline]
    pub fn cell_display(&self) -> &Option<Rc<dyn LayoutDisplay>> {
        &self.cell_display
    }

    /// Is the wall between a cell and its neighbour in the given direction
    /// open? Walls on the grid boundary are never open.
    pub fn is_open(&self, coord: CellCoordinate, dir: Direction) -> bool {
        if !self.size.is_valid_coordinate(coord) {
            return false;
        }
        let (row, column) = (coord.row as usize, coord.column as usize);
        match dir {
            Direction::West => column > 0 && self.vertical_openings.is_set(row, column - 1),
            Direction::East => self.vertical_openings.is_set(row, column),
            Direction::North => row > 0 && self.horizontal_openings.is_set(row - 1, column),
            Direction::South => self.horizontal_openings.is_set(row, column),
        }
    }

    /// Are two adjacent cells joined by an open passage?
    pub fn is_linked(&self, a: CellCoordinate, b: CellCoordinate) -> bool {
        DIRECTIONS.iter().any(|&dir| a.offset(dir) == Some(b) && self.is_open(a, dir))
    }

    pub fn neighbour_at_direction(&self,
                                  coord: CellCoordinate,
                                  direction: Direction)
                                  -> Option<CellCoordinate> {
        coord.offset(direction).filter(|&neighbour| self.size.is_valid_coordinate(neighbour))
    }

    /// Cells to the north, south, east or west of a cell, inside the grid but
    /// not necessarily joined to it by a passage.
    pub fn neighbours(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        DIRECTIONS.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Cells joined to a cell by an open passage.
    pub fn links(&self, coord: CellCoordinate) -> CoordinateSmallVec {
        DIRECTIONS.iter()
            .filter(|&&dir| self.is_open(coord, dir))
            .filter_map(|&dir| coord.offset(dir))
            .collect()
    }

    /// The number of open passages in the layout.
    #[inline]
    pub fn passages_count(&self) -> usize {
        self.vertical_openings.count_set() + self.horizontal_openings.count_set()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        self.size.iter()
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        self.size.iter_row()
    }

    /// The open passages as cell pairs, walls standing between side-by-side
    /// cells first, row-major within each matrix.
    pub fn iter_passages(&self) -> PassagesIter {
        let vertical_bits = self.vertical_openings.rows().0 * self.vertical_openings.columns().0;
        let horizontal_bits = self.horizontal_openings.rows().0 *
                              self.horizontal_openings.columns().0;
        PassagesIter {
            layout: self,
            cursor: 0,
            vertical_bits,
            total_bits: vertical_bits + horizontal_bits,
            remaining: self.passages_count(),
        }
    }

    /// The interior wall segments still standing, one per closed adjacent
    /// cell pair. The boundary walls around the grid are implicit and never
    /// part of the openings matrices.
    pub fn iter_walls(&self) -> WallsIter {
        let vertical_bits = self.vertical_openings.rows().0 * self.vertical_openings.columns().0;
        let horizontal_bits = self.horizontal_openings.rows().0 *
                              self.horizontal_openings.columns().0;
        let total_bits = vertical_bits + horizontal_bits;
        WallsIter {
            layout: self,
            cursor: 0,
            vertical_bits,
            total_bits,
            remaining: total_bits - self.passages_count(),
        }
    }

    /// A petgraph view of the layout: one node per cell in row-major order,
    /// one undirected edge per open passage.
    pub fn passage_graph(&self) -> Graph<(), (), Undirected, u32> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.size.graph_size();
        let mut graph = Graph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = graph.add_node(());
        }

        for (a, b) in self.iter_passages() {
            let a_index = self.size
                .coordinate_to_index(a)
                .expect("passage endpoints are valid cells");
            let b_index = self.size
                .coordinate_to_index(b)
                .expect("passage endpoints are valid cells");
            let _ = graph.update_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
        }

        graph
    }

    /// A perfect maze's passages form a spanning tree over the cells: every
    /// cell reachable from every other and no loops. Passage count and
    /// connectivity together establish exactly that.
    pub fn spans_all_cells(&self) -> bool {
        let NodesCount(cells) = self.size.cells_count();
        self.passages_count() == cells - 1 &&
        algo::connected_components(&self.passage_graph()) == 1
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallOrientation {
    /// A wall standing between two cells in the same row.
    Vertical,
    /// A wall lying between two cells in the same column.
    Horizontal,
}

/// One standing interior wall, named by the cell on its north-west side:
/// a `Vertical` wall separates `cell` from its east neighbour, a
/// `Horizontal` wall separates `cell` from its south neighbour.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallSegment {
    pub orientation: WallOrientation,
    pub cell: CellCoordinate,
}

pub struct PassagesIter<'a> {
    layout: &'a MazeLayout,
    cursor: usize,
    vertical_bits: usize,
    total_bits: usize,
    remaining: usize,
}

impl<'a> Iterator for PassagesIter<'a> {
    type Item = (CellCoordinate, CellCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.total_bits {
            let index = self.cursor;
            self.cursor += 1;

            let pair = if index < self.vertical_bits {
                let ColumnsCount(width) = self.layout.vertical_openings.columns();
                let (row, column) = (index / width, index % width);
                if self.layout.vertical_openings.is_set(row, column) {
                    Some((CellCoordinate::new(row as u32, column as u32),
                          CellCoordinate::new(row as u32, column as u32 + 1)))
                } else {
                    None
                }
            } else {
                let horizontal_index = index - self.vertical_bits;
                let ColumnsCount(width) = self.layout.horizontal_openings.columns();
                let (row, column) = (horizontal_index / width, horizontal_index % width);
                if self.layout.horizontal_openings.is_set(row, column) {
                    Some((CellCoordinate::new(row as u32, column as u32),
                          CellCoordinate::new(row as u32 + 1, column as u32)))
                } else {
                    None
                }
            };

            if pair.is_some() {
                self.remaining -= 1;
                return pair;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<'a> ExactSizeIterator for PassagesIter<'a> {} // default impl using size_hint()

impl<'a> fmt::Debug for PassagesIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "PassagesIter :: cursor: {:?}, remaining: {:?}",
               self.cursor,
               self.remaining)
    }
}

pub struct WallsIter<'a> {
    layout: &'a MazeLayout,
    cursor: usize,
    vertical_bits: usize,
    total_bits: usize,
    remaining: usize,
}

impl<'a> Iterator for WallsIter<'a> {
    type Item = WallSegment;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.total_bits {
            let index = self.cursor;
            self.cursor += 1;

            let segment = if index < self.vertical_bits {
                let ColumnsCount(width) = self.layout.vertical_openings.columns();
                let (row, column) = (index / width, index % width);
                if self.layout.vertical_openings.is_set(row, column) {
                    None
                } else {
                    Some(WallSegment {
                        orientation: WallOrientation::Vertical,
                        cell: CellCoordinate::new(row as u32, column as u32),
                    })
                }
            } else {
                let horizontal_index = index - self.vertical_bits;
                let ColumnsCount(width) = self.layout.horizontal_openings.columns();
                let (row, column) = (horizontal_index / width, horizontal_index % width);
                if self.layout.horizontal_openings.is_set(row, column) {
                    None
                } else {
                    Some(WallSegment {
                        orientation: WallOrientation::Horizontal,
                        cell: CellCoordinate::new(row as u32, column as u32),
                    })
                }
            };

            if segment.is_some() {
                self.remaining -= 1;
                return segment;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<'a> ExactSizeIterator for WallsIter<'a> {} // default impl using size_hint()

impl<'a> fmt::Debug for WallsIter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "WallsIter :: cursor: {:?}, remaining: {:?}",
               self.cursor,
               self.remaining)
    }
}

impl fmt::Display for MazeLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        let default_cell_body = String::from("   ");

        let ColumnsCount(columns_count) = self.columns();
        let RowsCount(rows_count) = self.rows();

        // Start by special case rendering the text for the north most boundary
        let first_grid_row: &Vec<CellCoordinate> =
            &self.iter_row().take(1).collect::<Vec<Vec<_>>>()[0];
        let mut output = String::from(WALL_RD);
        for (index, coord) in first_grid_row.iter().enumerate() {
            output.push_str(WALL_LR_3);
            let is_east_open = self.is_open(*coord, Direction::East);
            if is_east_open {
                output.push_str(WALL_LR);
            } else {
                let is_last_cell = index == (columns_count - 1);
                if is_last_cell {
                    output.push_str(WALL_LD);
                } else {
                    output.push_str(WALL_LRD);
                }
            }
        }
        output.push_str("\n");

        for (index_row, row) in self.iter_row().enumerate() {

            let is_last_row = index_row == (rows_count - 1);

            // Starts of by special case rendering the west most boundary of the row
            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::from("");

            for (index_column, cell_coord) in row.into_iter().enumerate() {

                let render_cell_side = |direction, passage_clear_text, blocking_wall_text| {
                    if self.is_open(cell_coord, direction) {
                        passage_clear_text
                    } else {
                        blocking_wall_text
                    }
                };
                let is_first_column = index_column == 0;
                let is_last_column = index_column == (columns_count - 1);
                let east_open = self.is_open(cell_coord, Direction::East);
                let south_open = self.is_open(cell_coord, Direction::South);

                // Each cell will simply use the southern wall of the cell above
                // it as its own northern wall, so we only need to worry about the cell’s body (room space),
                // its eastern boundary ('|'), and its southern boundary ('---+') minus the south west corner.
                let east_boundary = render_cell_side(Direction::East, " ", WALL_UD);

                // Cell Body
                if let Some(ref displayer) = *self.cell_display() {
                    row_middle_section_render.push_str(displayer.render_cell_body(cell_coord)
                        .as_str());
                } else {
                    row_middle_section_render.push_str(default_cell_body.as_str());
                }

                row_middle_section_render.push_str(east_boundary);

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                let south_boundary = render_cell_side(Direction::South, "   ", WALL_LR_3);
                row_bottom_section_render.push_str(south_boundary);

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            self.neighbour_at_direction(cell_coord, Direction::East)
                                .map_or(false, |c| self.is_open(c, Direction::South));
                        let access_se_from_south =
                            self.neighbour_at_direction(cell_coord, Direction::South)
                                .map_or(false, |c| self.is_open(c, Direction::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner.as_ref());
            }

            output.push_str(row_middle_section_render.as_ref());
            output.push_str("\n");
            output.push_str(row_bottom_section_render.as_ref());
            output.push_str("\n");
        }

        write!(f, "{}", output)
    }
}
