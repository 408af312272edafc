use crate::entities::{Bearing, Instruction, Position};
use crate::error::{SimulationError, SimulationResult};
use crate::map::Grid;
use crate::replay::{create_replay_logger, ReplayLogger};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info};

static POSITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(\d+)\s+(\S+)$").expect("position pattern is valid")
});

/// The outcome of driving one robot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Report {
    /// The final position, or the last cell on the grid if the robot was lost.
    pub position: Position,
    pub lost: bool,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lost {
            write!(f, "{} LOST", self.position)
        } else {
            write!(f, "{}", self.position)
        }
    }
}

/// A run of robots over one shared grid.
///
/// Robots are driven strictly one after the other: a robot lost from a cell leaves
/// a scent there that every later robot sees.
pub struct Simulation {
    grid: Grid,
    robots: usize,
    replay_logger: Box<dyn ReplayLogger>,
}

impl Simulation {
    /// Creates a new simulation on a fresh grid.
    ///
    /// # Arguments
    /// * `grid` - The grid every robot of the run moves on.
    /// * `replay_filename` - The file to save a JSON replay to. If `None`, no replay is kept.
    pub fn new(grid: Grid, replay_filename: Option<String>) -> Simulation {
        let replay_logger = create_replay_logger(replay_filename, &grid);

        Simulation {
            grid,
            robots: 0,
            replay_logger,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of robots driven so far.
    pub fn robots(&self) -> usize {
        self.robots
    }

    /// Drives a single robot and applies its scent if it gets lost.
    ///
    /// # Arguments
    /// * `position_line` - The line number and text of the `<x> <y> <bearing>` start line.
    /// * `instruction_line` - The line number and text of the robot's instructions.
    pub fn drive(
        &mut self,
        position_line: (usize, &str),
        instruction_line: (usize, &str),
    ) -> SimulationResult<Report> {
        let start = parse_start_position(&self.grid, position_line.1, position_line.0)?;
        let instructions = parse_instructions(instruction_line.1, instruction_line.0)?;

        self.robots += 1;
        let robot = self.robots;
        debug!(robot, %start, instructions = instructions.len(), "Driving robot");
        self.replay_logger.log_robot(robot, start);
        self.log_path(robot, start, &instructions);

        let end = get_end_position(&self.grid, start, &instructions);
        let report = if self.grid.is_out_of_bounds(end) {
            // Lost robots stop as soon as they leave the grid, so one step back is the
            // cell they fell from
            let last = end.move_unchecked(-1);
            self.grid.apply_scent(last);
            info!(robot, position = %last, "Robot lost, scent applied");
            Report {
                position: last,
                lost: true,
            }
        } else {
            Report {
                position: end,
                lost: false,
            }
        };

        debug!(robot, %report, "Robot finished");
        self.replay_logger
            .log_end(robot, report.position, report.lost);

        Ok(report)
    }

    /// Drives every robot block of `lines`, in order, handing each report to
    /// `on_report` as soon as it is known.
    ///
    /// Blocks are separated by blank lines. Inside a block, lines pair up as a start
    /// position followed by its instructions; a start line left without a partner
    /// fails with [`SimulationError::MissingInstructions`].
    ///
    /// # Arguments
    /// * `lines` - `(line number, line)` pairs following the grid size line.
    /// * `on_report` - Called with every report, in input order.
    pub fn run<'a>(
        &mut self,
        lines: impl IntoIterator<Item = (usize, &'a str)>,
        mut on_report: impl FnMut(&Report),
    ) -> SimulationResult<Vec<Report>> {
        let mut reports = Vec::new();
        let mut pending: Option<(usize, &'a str)> = None;

        for (number, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                // A blank line closes the block, so no start line may be left open
                if let Some((start, _)) = pending {
                    return Err(SimulationError::MissingInstructions { line: start });
                }
                continue;
            }

            match pending.take() {
                None => pending = Some((number, line)),
                Some(position_line) => {
                    let report = self.drive(position_line, (number, line))?;
                    on_report(&report);
                    reports.push(report);
                }
            }
        }

        match pending {
            Some((start, _)) => Err(SimulationError::MissingInstructions { line: start }),
            None => Ok(reports),
        }
    }

    /// Saves the replay, if one was requested.
    pub fn save_replay(&self) -> SimulationResult<()> {
        self.replay_logger.save(&self.grid.scents())
    }

    fn log_path(&mut self, robot: usize, start: Position, instructions: &[Instruction]) {
        let mut current = start;
        for (instruction, next) in get_path(&self.grid, start, instructions) {
            match instruction {
                Instruction::Turn(_) => self.replay_logger.log_turn(robot, current, next),
                Instruction::Forward if next == current => {
                    debug!(robot, position = %current, "Scent kept robot on the grid");
                    self.replay_logger.log_blocked(robot, current);
                }
                Instruction::Forward if self.grid.is_out_of_bounds(next) => {
                    self.replay_logger.log_lost(robot, current, next)
                }
                Instruction::Forward => self.replay_logger.log_move(robot, current, next),
            }
            current = next;
        }
    }
}

/// Runs a whole input and returns one report line per robot, newline separated.
///
/// The first non-empty line is the grid size; the rest are robot blocks.
pub fn drive_robots(input: &str) -> SimulationResult<String> {
    let (simulation, reports) = start_simulation(input, None, |_| {})?;
    debug!(robots = simulation.robots(), "Simulation finished");

    Ok(reports
        .iter()
        .map(Report::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Builds a simulation from the input's size line and drives every robot in it.
///
/// # Arguments
/// * `input` - The whole input.
/// * `replay_filename` - The file to save a JSON replay to. If `None`, no replay is kept.
/// * `on_report` - Called with every report as soon as its robot has been driven.
pub fn start_simulation(
    input: &str,
    replay_filename: Option<String>,
    on_report: impl FnMut(&Report),
) -> SimulationResult<(Simulation, Vec<Report>)> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .skip_while(|(_, line)| line.trim().is_empty());

    let (number, size_line) = lines.next().ok_or(SimulationError::EmptyInput)?;
    let grid = Grid::parse(size_line, number)?;
    let mut simulation = Simulation::new(grid, replay_filename);

    let reports = simulation.run(lines, on_report)?;
    Ok((simulation, reports))
}

/// Moves one cell forward unless that would leave the grid from a scented cell.
///
/// The scent is checked on the cell the robot is leaving, not the one it is entering.
/// Moving off an unscented edge is allowed and returns the out-of-bounds position.
pub fn go_forwards(grid: &Grid, position: Position) -> Position {
    let new_position = position.move_unchecked(1);
    if grid.is_out_of_bounds(new_position) && grid.has_scent(position) {
        return position;
    }

    new_position
}

pub fn get_next_position(grid: &Grid, position: Position, instruction: Instruction) -> Position {
    // Lost robots ignore the rest of their script
    if grid.is_out_of_bounds(position) {
        return position;
    }

    match instruction {
        Instruction::Turn(rotation) => position.turn(rotation),
        Instruction::Forward => go_forwards(grid, position),
    }
}

/// Every position a robot passes through, one per executed instruction.
///
/// The path ends with the step that takes the robot off the grid, if any.
pub fn get_path<'a>(
    grid: &'a Grid,
    start: Position,
    instructions: &'a [Instruction],
) -> impl Iterator<Item = (Instruction, Position)> + 'a {
    instructions
        .iter()
        .scan(start, move |current, &instruction| {
            if grid.is_out_of_bounds(*current) {
                return None;
            }
            *current = get_next_position(grid, *current, instruction);
            Some((instruction, *current))
        })
}

/// The position after all instructions, or the first out-of-bounds position if the
/// robot got lost on the way.
pub fn get_end_position(grid: &Grid, start: Position, instructions: &[Instruction]) -> Position {
    get_path(grid, start, instructions)
        .last()
        .map_or(start, |(_, position)| position)
}

fn parse_start_position(grid: &Grid, position_line: &str, line: usize) -> SimulationResult<Position> {
    let captures = POSITION_LINE
        .captures(position_line.trim())
        .ok_or_else(|| SimulationError::InvalidPosition {
            line,
            content: position_line.to_string(),
        })?;

    let coordinate = |index: usize| {
        captures[index]
            .parse::<u32>()
            .map(i64::from)
            .map_err(|_| SimulationError::InvalidPosition {
                line,
                content: position_line.to_string(),
            })
    };
    let x = coordinate(1)?;
    let y = coordinate(2)?;
    let bearing = captures[3]
        .parse::<Bearing>()
        .map_err(|_| SimulationError::InvalidBearing {
            line,
            bearing: captures[3].to_string(),
        })?;

    let position = Position::new(x, y, bearing);
    if grid.is_out_of_bounds(position) {
        return Err(SimulationError::StartOutOfBounds { line, x, y });
    }

    Ok(position)
}

fn parse_instructions(instruction_line: &str, line: usize) -> SimulationResult<Vec<Instruction>> {
    instruction_line
        .trim()
        .chars()
        .map(|value| {
            Instruction::from_char(value).ok_or(SimulationError::InvalidInstruction {
                line,
                instruction: value,
            })
        })
        .collect()
}
