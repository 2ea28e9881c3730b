//! Contribution grid input and the grid-to-brick mapping
//!
//! The grid is a list of week columns, each holding up to seven day cells.
//! Days that don't exist (before the first or after the last day of the
//! range) are `None` and never become bricks.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::sim::{Brick, Geometry};

/// Days per week column
pub const ROWS: usize = 7;

/// Highest intensity bucket
pub const MAX_LEVEL: u8 = 4;

/// One day of activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Intensity bucket 0..=4
    pub level: u8,
    /// Number of contributions that day
    pub count: u32,
    /// Color the data source assigned to this day, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Cell {
    pub fn new(level: u8, count: u32) -> Self {
        Self {
            level: level.min(MAX_LEVEL),
            count,
            color: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

/// On-disk form: `{ "weeks": [[cell | null, ...], ...] }`
#[derive(Deserialize)]
struct GridFile {
    weeks: Vec<Vec<Option<Cell>>>,
}

/// Columns of seven optional day cells
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "GridFile")]
pub struct CalendarGrid {
    pub weeks: Vec<[Option<Cell>; ROWS]>,
}

impl From<GridFile> for CalendarGrid {
    fn from(file: GridFile) -> Self {
        Self::from_weeks(file.weeks)
    }
}

impl CalendarGrid {
    /// Short weeks are padded with empty days, long ones truncated, and
    /// levels clamped to the top bucket
    pub fn from_weeks(weeks: Vec<Vec<Option<Cell>>>) -> Self {
        let weeks = weeks
            .into_iter()
            .enumerate()
            .map(|(col, days)| {
                if days.len() > ROWS {
                    log::warn!("week {} has {} days, dropping the extra", col, days.len());
                }
                let mut column: [Option<Cell>; ROWS] = Default::default();
                for (slot, day) in column.iter_mut().zip(days) {
                    *slot = day.map(|mut cell| {
                        cell.level = cell.level.min(MAX_LEVEL);
                        cell
                    });
                }
                column
            })
            .collect();
        Self { weeks }
    }

    pub fn columns(&self) -> usize {
        self.weeks.len()
    }

    /// Present cells in column-major, then row order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.weeks.iter().flat_map(|week| week.iter().flatten())
    }
}

/// Map every present cell to a brick, column-major then row-major.
///
/// This order is also the collision scan order, so it decides which brick
/// breaks when the ball touches several at once.
pub fn bricks_from_grid(grid: &CalendarGrid, config: &Config) -> Vec<Brick> {
    let pitch = config.cell_pitch();
    let mut bricks = Vec::new();
    for (col, week) in grid.weeks.iter().enumerate() {
        for (row, day) in week.iter().enumerate() {
            if let Some(cell) = day {
                bricks.push(Brick::new(
                    config.padding + col as f32 * pitch,
                    config.padding + row as f32 * pitch,
                    cell.level,
                    cell.count > 0,
                ));
            }
        }
    }
    bricks
}

/// Canvas sized to fit `columns` week columns, the brick clearance and the
/// paddle lane.
pub fn layout_for_columns(columns: usize, config: &Config) -> Geometry {
    let pitch = config.cell_pitch();
    let bricks_width = (columns as f32 * pitch - config.cell_gap).max(0.0);
    let bricks_height = ROWS as f32 * pitch - config.cell_gap;

    let canvas_width = 2.0 * config.padding + bricks_width.max(config.paddle_width);
    let canvas_height = 2.0 * config.padding
        + bricks_height
        + config.brick_clearance
        + config.paddle_height
        + config.paddle_margin;
    let paddle_y = canvas_height - config.padding - config.paddle_margin - config.paddle_height;

    Geometry {
        canvas_width,
        canvas_height,
        paddle_y,
    }
}
