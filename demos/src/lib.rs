//! Animated A* maze shared by the terminal demo.
//!
//! Shows a maze with the start in green and the goal in red. Running the
//! search reveals the path in blue one cell at a time, then labels every
//! cell the search reached with the cost it was reached at. Restarting
//! clears the labels and redraws the maze.

use std::time::Duration;

use maze_core::{Cell, Color, Effect, Glyph, Grid, Key, Model, Msg, Screen};
use maze_paths::{Agent, Environment};

/// The maze the demo opens with. `0` is floor, `1` is wall.
pub const DEFAULT_MAZE: [[i32; 10]; 10] = [
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 0, 1, 0, 1, 1, 1, 1, 0],
    [0, 0, 0, 1, 0, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 0, 1, 1, 0, 1, 0],
    [0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    [1, 1, 1, 1, 1, 0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 0],
];

const HELP: &str = "Enter: run A*  r: restart  q: quit";

// Colours
const COL_FLOOR: Color = Color::WHITE;
const COL_WALL: Color = Color::BLACK;
const COL_START: Color = Color::GREEN;
const COL_GOAL: Color = Color::RED;
const COL_PATH: Color = Color::BLUE;
const COL_LABEL: Color = Color::BLACK;
const COL_TEXT: Color = Color::GRAY;

// ---------------------------------------------------------------------------
// MazeConfig
// ---------------------------------------------------------------------------

/// Settings for a [`MazeModel`].
#[derive(Debug, Clone)]
pub struct MazeConfig {
    pub grid: Grid,
    pub start: Cell,
    pub goal: Cell,
    /// Pause between two revealed path cells.
    pub step_delay: Duration,
    /// Terminal columns per maze cell. Wide enough for two-digit labels.
    pub cell_width: i32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grid: Grid::from(DEFAULT_MAZE),
            start: Cell::new(0, 0),
            goal: Cell::new(9, 9),
            step_delay: Duration::from_millis(100),
            cell_width: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// MazeModel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Animating,
    Found { steps: usize },
    NoPath,
}

/// The maze application model.
pub struct MazeModel {
    agent: Agent,
    step_delay: Duration,
    cell_width: i32,
    path: Vec<Cell>,
    revealed: usize,
    show_costs: bool,
    // Bumped on every run and restart so stale ticks are ignored.
    anim: u64,
    status: Status,
}

impl MazeModel {
    pub fn new(config: MazeConfig) -> Self {
        let env = Environment::new(config.grid);
        Self {
            agent: Agent::new(env, config.start, config.goal),
            step_delay: config.step_delay,
            cell_width: config.cell_width.max(1),
            path: Vec::new(),
            revealed: 0,
            show_costs: false,
            anim: 0,
            status: Status::Idle,
        }
    }

    /// Screen size needed to draw the maze plus the status and help lines.
    pub fn screen_size(&self) -> (i32, i32) {
        let env = self.agent.environment();
        let width = (env.cols() * self.cell_width).max(HELP.len() as i32);
        (width, env.rows() + 3)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Path cells drawn so far.
    pub fn revealed(&self) -> &[Cell] {
        &self.path[..self.revealed]
    }

    fn run_search(&mut self) -> Option<Effect> {
        if self.status == Status::Animating {
            return None;
        }
        self.anim += 1;
        self.revealed = 0;
        self.show_costs = false;

        match self.agent.find_path() {
            Some(path) => {
                log::info!("maze: path of {} steps found", path.len());
                self.path = path;
                self.status = Status::Animating;
                self.advance()
            }
            None => {
                log::info!("maze: no path found");
                self.path.clear();
                self.status = Status::NoPath;
                None
            }
        }
    }

    /// Reveal the next path cell, or finish the animation.
    fn advance(&mut self) -> Option<Effect> {
        if self.revealed < self.path.len() {
            self.revealed += 1;
        }
        if self.revealed == self.path.len() {
            self.show_costs = true;
            self.status = Status::Found {
                steps: self.path.len(),
            };
            return None;
        }
        Some(Effect::After(self.step_delay, Msg::Tick { id: self.anim }))
    }

    fn restart(&mut self) {
        self.agent.reset();
        self.anim += 1;
        self.path.clear();
        self.revealed = 0;
        self.show_costs = false;
        self.status = Status::Idle;
    }

    fn status_line(&self) -> String {
        match self.status {
            Status::Idle => "Press Enter to search.".to_string(),
            Status::Animating => format!("Walking {}/{}", self.revealed, self.path.len()),
            Status::Found { steps } => format!(
                "Path: {steps} steps, {} cells costed.",
                self.agent.costs().len()
            ),
            Status::NoPath => "No path found.".to_string(),
        }
    }

    fn cell_color(&self, c: Cell, value: i32) -> Color {
        if c == self.agent.start() {
            COL_START
        } else if c == self.agent.goal() {
            COL_GOAL
        } else if value == 0 {
            COL_FLOOR
        } else {
            COL_WALL
        }
    }
}

impl Default for MazeModel {
    fn default() -> Self {
        Self::new(MazeConfig::default())
    }
}

impl Model for MazeModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, .. } => match key {
                Key::Enter | Key::Space | Key::Char('s') => self.run_search(),
                Key::Char('r') => {
                    self.restart();
                    None
                }
                Key::Char('q') | Key::Escape => Some(Effect::End),
                _ => None,
            },
            Msg::Tick { id } if id == self.anim && self.status == Status::Animating => {
                self.advance()
            }
            Msg::Quit => Some(Effect::End),
            _ => None,
        }
    }

    fn draw(&self, screen: &mut Screen) {
        screen.fill(Glyph::default());
        let w = self.cell_width;
        let env = self.agent.environment();

        for (c, value) in env.grid().iter() {
            let bg = self.cell_color(c, value);
            screen.fill_rect(c.col * w, c.row, w, 1, Glyph::blank(bg));
        }
        for &c in self.revealed() {
            screen.fill_rect(c.col * w, c.row, w, 1, Glyph::blank(COL_PATH));
        }
        if self.show_costs {
            for node in self.agent.cost_nodes() {
                let label: String = node.cost.to_string().chars().take(w as usize).collect();
                let pad = (w - label.len() as i32) / 2;
                screen.print(node.pos.col * w + pad, node.pos.row, &label, COL_LABEL);
            }
        }

        let rows = env.rows();
        screen.print(0, rows + 1, &self.status_line(), COL_TEXT);
        screen.print(0, rows + 2, HELP, COL_TEXT);
    }
}
