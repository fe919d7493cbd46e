//! Terminal rendering.

pub mod game_common;
pub mod runner_scene;
pub mod sprites;

use crate::runner::Runner;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal the play field is readable in.
const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 16;

/// Draw one frame of the whole screen.
pub fn draw_ui(frame: &mut Frame, runner: &Runner) {
    let size = frame.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            size.width, size.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
        frame.render_widget(warning, Rect { height: 1, ..size });
        return;
    }
    runner_scene::render_runner_scene(frame, size, runner);
}
