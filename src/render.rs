//! Draw commands published by the simulation.
//!
//! The core never touches pixels. Each frame, [`crate::runner::Runner::draw`]
//! walks its state and hands a sequence of [`DrawCommand`]s to a [`Canvas`],
//! back to front. Coordinates are world pixels (600x150 by default).

use crate::collision::CollisionBox;
use crate::entities::ObstacleKind;
use crate::meters::MeterKind;
use crate::player::PlayerStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Start of a frame. `night` selects the inverted palette.
    Clear { night: bool },
    HorizonStrip { x: f64, y: f64, width: f64, bumpy: bool },
    Lake { x: f64, y: f64, width: f64 },
    Cloud { x: f64, y: f64 },
    Moon { x: f64, y: f64, phase: usize, opacity: f64 },
    Star { x: f64, y: f64, opacity: f64 },
    Obstacle {
        kind: ObstacleKind,
        x: f64,
        y: f64,
        size: u32,
        frame: usize,
    },
    Coin { x: f64, y: f64, frame: usize },
    Player {
        x: f64,
        y: f64,
        status: PlayerStatus,
        frame: usize,
        rotation: f64,
    },
    Digits {
        meter: MeterKind,
        x: f64,
        y: f64,
        text: String,
        high_score: bool,
    },
    GameOverPanel { won: bool },
    Hitbox(CollisionBox),
}

pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);
}

/// Collects commands as-is.
impl Canvas for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_canvas_records_in_order() {
        let mut canvas: Vec<DrawCommand> = Vec::new();
        canvas.draw(DrawCommand::Clear { night: false });
        canvas.draw(DrawCommand::GameOverPanel { won: true });
        assert_eq!(
            canvas,
            vec![
                DrawCommand::Clear { night: false },
                DrawCommand::GameOverPanel { won: true }
            ]
        );
    }
}
