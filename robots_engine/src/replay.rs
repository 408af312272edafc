use crate::entities::Position;
use crate::error::SimulationResult;
use crate::map::Grid;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter, io::Write};
use uuid::Uuid;

pub fn create_replay_logger(filename: Option<String>, grid: &Grid) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, grid.x_max(), grid.y_max())),
    }
}

pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_robot(&mut self, robot: usize, start: Position) {}

    #[allow(unused_variables)]
    fn log_end(&mut self, robot: usize, end: Position, lost: bool) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, robot: usize, event: Event) {}

    fn save(&self, scents: &[(i64, i64)]) -> SimulationResult<()> {
        let _ = scents;
        Ok(())
    }

    fn log_turn(&mut self, robot: usize, location: Position, destination: Position) {
        self.log_step(robot, EventType::Turn, location, destination);
    }

    fn log_move(&mut self, robot: usize, location: Position, destination: Position) {
        self.log_step(robot, EventType::Move, location, destination);
    }

    fn log_blocked(&mut self, robot: usize, location: Position) {
        self.log_step(robot, EventType::Blocked, location, location);
    }

    fn log_lost(&mut self, robot: usize, location: Position, destination: Position) {
        self.log_step(robot, EventType::Lost, location, destination);
    }

    fn log_step(
        &mut self,
        robot: usize,
        event_type: EventType,
        location: Position,
        destination: Position,
    ) {
        self.log_event(
            robot,
            Event {
                event_type,
                location,
                destination,
            },
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum EventType {
    Turn,
    Move,
    /// A scent kept the robot from stepping off the grid.
    Blocked,
    Lost,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Event {
    event_type: EventType,
    location: Position,
    destination: Position,
}

struct Robot {
    robot: usize,
    id: String,
    start: Position,
    end: Option<Position>,
    lost: bool,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    x_max: i64,
    y_max: i64,
    robots: Vec<Robot>,
    events: HashMap<usize, Vec<Event>>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, x_max: i64, y_max: i64) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            x_max,
            y_max,
            robots: Vec::new(),
            events: HashMap::new(),
        }
    }

    fn to_json(&self, scents: &[(i64, i64)]) -> serde_json::Value {
        let robots: Vec<_> = self
            .robots
            .iter()
            .map(|robot| {
                json!({
                    "robot": robot.robot,
                    "id": robot.id,
                    "start": robot.start,
                    "end": robot.end,
                    "lost": robot.lost,
                    "events": self.events.get(&robot.robot).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        json!({
            "grid": {
                "x_max": self.x_max,
                "y_max": self.y_max,
                "width": self.x_max + 1,
                "height": self.y_max + 1,
            },
            "robots": robots,
            "scents": scents,
        })
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_robot(&mut self, robot: usize, start: Position) {
        self.robots.push(Robot {
            robot,
            id: Uuid::new_v4().to_string(),
            start,
            end: None,
            lost: false,
        });
    }

    fn log_end(&mut self, robot: usize, end: Position, lost: bool) {
        if let Some(entry) = self.robots.iter_mut().find(|entry| entry.robot == robot) {
            entry.end = Some(end);
            entry.lost = lost;
        }
    }

    fn log_event(&mut self, robot: usize, event: Event) {
        self.events.entry(robot).or_default().push(event);
    }

    fn save(&self, scents: &[(i64, i64)]) -> SimulationResult<()> {
        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json(scents))?;
        writer.flush()?;
        Ok(())
    }
}
