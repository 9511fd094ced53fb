use fnv::FnvHashSet;

use crate::cells::CellCoordinate;
use crate::pathing::Distances;

/// Renders the contents of a maze cell as text.
pub trait LayoutDisplay {
    /// Render the contents of a cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: CellCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks the start cell with an `S` and the goal cell with a `G`.
#[derive(Debug)]
pub struct StartGoalDisplay {
    start: CellCoordinate,
    goal: CellCoordinate,
}

impl StartGoalDisplay {
    pub fn new(start: CellCoordinate, goal: CellCoordinate) -> StartGoalDisplay {
        StartGoalDisplay { start, goal }
    }
}

impl LayoutDisplay for StartGoalDisplay {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.goal {
            String::from(" G ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks every cell on a route with a dot.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<CellCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[CellCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl LayoutDisplay for PathDisplay {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

impl LayoutDisplay for Distances {
    fn render_cell_body(&self, coord: CellCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    struct BlankDisplay;
    impl LayoutDisplay for BlankDisplay {}

    fn cc(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate::new(row, column)
    }

    #[test]
    fn default_cell_body_is_blank() {
        let display = BlankDisplay;
        assert_eq!(display.render_cell_body(cc(0, 0)), "   ");
    }

    #[test]
    fn start_and_goal_markers() {
        let display = StartGoalDisplay::new(cc(0, 0), cc(2, 2));
        assert_eq!(display.render_cell_body(cc(0, 0)), " S ");
        assert_eq!(display.render_cell_body(cc(2, 2)), " G ");
        assert_eq!(display.render_cell_body(cc(1, 1)), "   ");
    }

    #[test]
    fn start_marker_wins_when_start_is_the_goal() {
        let display = StartGoalDisplay::new(cc(0, 0), cc(0, 0));
        assert_eq!(display.render_cell_body(cc(0, 0)), " S ");
    }

    #[test]
    fn path_markers() {
        let display = PathDisplay::new(&[cc(0, 0), cc(0, 1)]);
        assert_eq!(display.render_cell_body(cc(0, 0)), " . ");
        assert_eq!(display.render_cell_body(cc(0, 1)), " . ");
        assert_eq!(display.render_cell_body(cc(1, 0)), "   ");
    }

    #[test]
    fn distance_body_is_centred_lowercase_hex() {
        assert_eq!(format!("{:^3x}", 2), " 2 ");
        assert_eq!(format!("{:^3x}", 0xff), "ff ");
    }
}
