use crate::entities::Position;
use crate::error::{SimulationError, SimulationResult};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static SIZE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)$").expect("grid size pattern is valid"));

/// The bounded world robots move on.
///
/// The grid spans `0..=x_max` by `0..=y_max`. Each cell records whether a robot
/// was lost from it before (its scent). Unscented cells are the default and are
/// not stored, so the size of the grid does not cost memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    x_max: i64,
    y_max: i64,
    // Keyed by (y, x) so iteration runs row by row
    scents: BTreeSet<(i64, i64)>,
}

impl Grid {
    /// Parses a `<maxX> <maxY>` size line.
    ///
    /// # Arguments
    /// * `size_line` - The first line of the input.
    /// * `line` - The line number, used in error reports.
    pub fn parse(size_line: &str, line: usize) -> SimulationResult<Grid> {
        let invalid = || SimulationError::InvalidGridSize {
            line,
            content: size_line.to_string(),
        };

        let captures = SIZE_LINE.captures(size_line.trim()).ok_or_else(invalid)?;
        let x_max: u32 = captures[1].parse().map_err(|_| invalid())?;
        let y_max: u32 = captures[2].parse().map_err(|_| invalid())?;

        Ok(Grid::new(x_max, y_max))
    }

    pub fn new(x_max: u32, y_max: u32) -> Grid {
        Grid {
            x_max: x_max.into(),
            y_max: y_max.into(),
            scents: BTreeSet::new(),
        }
    }

    pub fn x_max(&self) -> i64 {
        self.x_max
    }

    pub fn y_max(&self) -> i64 {
        self.y_max
    }

    /// Number of columns, including both edges.
    pub fn width(&self) -> u64 {
        self.x_max as u64 + 1
    }

    /// Number of rows, including both edges.
    pub fn height(&self) -> u64 {
        self.y_max as u64 + 1
    }

    pub fn is_out_of_bounds(&self, position: Position) -> bool {
        position.x < 0 || position.x > self.x_max || position.y < 0 || position.y > self.y_max
    }

    /// Whether a robot was lost from this cell before. Always false off the grid.
    pub fn has_scent(&self, position: Position) -> bool {
        self.cell(position)
            .is_some_and(|cell| self.scents.contains(&cell))
    }

    /// Marks the cell of `position` as scented.
    ///
    /// Returns `true` if the cell was not scented before. Positions off the grid
    /// have no cell and are ignored.
    pub fn apply_scent(&mut self, position: Position) -> bool {
        match self.cell(position) {
            Some(cell) => self.scents.insert(cell),
            None => false,
        }
    }

    /// All scented cells as `(x, y)` pairs, ordered by row then column.
    pub fn scents(&self) -> Vec<(i64, i64)> {
        self.scents.iter().map(|&(y, x)| (x, y)).collect()
    }

    fn cell(&self, position: Position) -> Option<(i64, i64)> {
        if self.is_out_of_bounds(position) {
            return None;
        }

        Some((position.y, position.x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Bearing;

    fn at(x: i64, y: i64) -> Position {
        Position::new(x, y, Bearing::N)
    }

    #[test]
    fn when_parsing_a_size_line_the_grid_bounds_are_inclusive() {
        let grid = Grid::parse("5 3", 1).unwrap();

        assert_eq!(grid.x_max(), 5);
        assert_eq!(grid.y_max(), 3);
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 4);
        assert!(grid.scents().is_empty());
    }

    #[test]
    fn when_parsing_the_same_size_line_twice_the_grids_are_equal() {
        assert_eq!(Grid::parse("7 2", 1).unwrap(), Grid::parse("7 2", 1).unwrap());
    }

    #[test]
    fn when_parsing_a_zero_by_zero_size_line_the_grid_has_a_single_cell() {
        let grid = Grid::parse("0 0", 1).unwrap();

        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
        assert!(!grid.is_out_of_bounds(at(0, 0)));
    }

    #[test]
    fn when_parsing_a_malformed_size_line_an_error_with_the_line_number_is_returned() {
        for line in ["5", "5 3 1", "five 3", "-1 3", ""] {
            match Grid::parse(line, 2) {
                Err(SimulationError::InvalidGridSize { line: 2, content }) => {
                    assert_eq!(content, line)
                }
                other => panic!("Expected InvalidGridSize for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn when_parsing_a_size_that_overflows_an_error_is_returned() {
        assert!(Grid::parse("99999999999 1", 1).is_err());
    }

    #[test]
    fn when_checking_bounds_the_edges_are_inside_and_beyond_them_is_outside() {
        let grid = Grid::new(5, 3);

        assert!(!grid.is_out_of_bounds(at(0, 0)));
        assert!(!grid.is_out_of_bounds(at(5, 3)));
        assert!(!grid.is_out_of_bounds(at(5, 0)));
        assert!(grid.is_out_of_bounds(at(-1, 0)));
        assert!(grid.is_out_of_bounds(at(0, -1)));
        assert!(grid.is_out_of_bounds(at(6, 3)));
        assert!(grid.is_out_of_bounds(at(5, 4)));
    }

    #[test]
    fn when_applying_a_scent_only_that_cell_is_scented() {
        let mut grid = Grid::new(5, 3);

        assert!(grid.apply_scent(at(3, 3)));

        assert!(grid.has_scent(at(3, 3)));
        assert!(!grid.has_scent(at(3, 2)));
        assert!(!grid.has_scent(at(2, 3)));
        assert_eq!(grid.scents(), vec![(3, 3)]);
    }

    #[test]
    fn when_applying_a_scent_twice_the_second_call_reports_no_change() {
        let mut grid = Grid::new(2, 2);

        assert!(grid.apply_scent(at(1, 2)));
        assert!(!grid.apply_scent(at(1, 2)));
        assert_eq!(grid.scents(), vec![(1, 2)]);
    }

    #[test]
    fn when_a_scent_is_applied_it_ignores_the_bearing() {
        let mut grid = Grid::new(2, 2);
        grid.apply_scent(Position::new(2, 0, Bearing::E));

        assert!(grid.has_scent(Position::new(2, 0, Bearing::S)));
    }

    #[test]
    fn when_checking_scent_off_the_grid_it_is_never_scented() {
        let mut grid = Grid::new(2, 2);

        assert!(!grid.apply_scent(at(3, 0)));
        assert!(!grid.has_scent(at(3, 0)));
        assert!(!grid.has_scent(at(-1, -1)));
        assert!(grid.scents().is_empty());
    }
}
