//! Terminal A* maze demo using crossterm.
//!
//! Run: cargo run --bin maze

use maze_core::{App, AppConfig};
use maze_crossterm::CrosstermDriver;
use maze_demos::{MazeConfig, MazeModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = MazeModel::new(MazeConfig::default());
    let (width, height) = model.screen_size();
    let mut app = App::new(AppConfig {
        model,
        driver: CrosstermDriver::new(),
        width,
        height,
    });
    app.run()?;
    Ok(())
}
