//! The ground: two strips scrolled end to end, plus the lakes at either end of a run.

use crate::core::constants::{
    BUMP_THRESHOLD, GOAL_LAKE_OFFSET, GOAL_LAKE_TARGET_DIVISOR, HORIZON_LINE_WIDTH,
    HORIZON_LINE_Y, LAKE_WIDTH, START_LAKE_X,
};
use crate::entities::scroll_increment;
use crate::render::{Canvas, DrawCommand};
use rand::Rng;

/// Lake revealed when the win sequence starts. Slides in from the right and
/// parks at `container_width / 2.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalLake {
    pub x_pos: f64,
    pub revealing: bool,
    pub fully_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizonLine {
    pub x_pos: [f64; 2],
    pub y_pos: f64,
    pub bumpy: [bool; 2],
    /// Lake the player starts beside. `None` once it scrolls off.
    pub start_lake_x: Option<f64>,
    pub goal_lake: GoalLake,
    container_width: f64,
}

impl HorizonLine {
    pub fn new(container_width: f64) -> Self {
        Self {
            x_pos: [0.0, HORIZON_LINE_WIDTH],
            y_pos: HORIZON_LINE_Y,
            bumpy: [false, false],
            start_lake_x: Some(START_LAKE_X),
            goal_lake: GoalLake {
                x_pos: container_width + GOAL_LAKE_OFFSET,
                revealing: false,
                fully_visible: false,
            },
            container_width,
        }
    }

    /// Scroll the strips and lakes. A frozen ground keeps the goal lake moving
    /// so an in-progress reveal can finish.
    pub fn update<R: Rng>(&mut self, delta: f64, speed: f64, frozen: bool, rng: &mut R) {
        let increment = scroll_increment(speed, delta);

        if !frozen {
            if self.x_pos[0] <= 0.0 {
                self.update_x_pos(0, increment, rng);
            } else {
                self.update_x_pos(1, increment, rng);
            }

            if let Some(x) = self.start_lake_x {
                let x = x - increment;
                self.start_lake_x = if x + LAKE_WIDTH < 0.0 { None } else { Some(x) };
            }
        }

        if self.goal_lake.revealing {
            let target = self.container_width / GOAL_LAKE_TARGET_DIVISOR;
            if self.goal_lake.x_pos > target {
                self.goal_lake.x_pos -= increment;
                if self.goal_lake.x_pos <= target {
                    self.goal_lake.x_pos = target;
                    self.goal_lake.fully_visible = true;
                }
            } else {
                self.goal_lake.fully_visible = true;
            }
        }
    }

    /// Move the leading strip; the other follows it. When the leader is fully
    /// off screen it jumps behind the follower with a fresh flat/bumpy roll.
    fn update_x_pos<R: Rng>(&mut self, leader: usize, increment: f64, rng: &mut R) {
        let follower = 1 - leader;

        self.x_pos[leader] -= increment;
        self.x_pos[follower] = self.x_pos[leader] + HORIZON_LINE_WIDTH;

        if self.x_pos[leader] <= -HORIZON_LINE_WIDTH {
            self.x_pos[leader] += HORIZON_LINE_WIDTH * 2.0;
            self.x_pos[follower] = self.x_pos[leader] - HORIZON_LINE_WIDTH;
            self.bumpy[leader] = rng.gen::<f64>() > BUMP_THRESHOLD;
        }
    }

    pub fn start_goal_lake_reveal(&mut self) {
        self.goal_lake.revealing = true;
        self.goal_lake.fully_visible = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.container_width);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(x) = self.start_lake_x {
            canvas.draw(DrawCommand::Lake {
                x,
                y: self.y_pos,
                width: LAKE_WIDTH,
            });
        }
        if self.goal_lake.revealing {
            canvas.draw(DrawCommand::Lake {
                x: self.goal_lake.x_pos,
                y: self.y_pos,
                width: LAKE_WIDTH,
            });
        }
        for i in 0..2 {
            canvas.draw(DrawCommand::HorizonStrip {
                x: self.x_pos[i],
                y: self.y_pos,
                width: HORIZON_LINE_WIDTH,
                bumpy: self.bumpy[i],
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_strips_stay_adjacent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        for _ in 0..500 {
            line.update(16.7, 13.0, false, &mut rng);
            assert_eq!((line.x_pos[0] - line.x_pos[1]).abs(), HORIZON_LINE_WIDTH);
            assert!(line.x_pos[0] > -HORIZON_LINE_WIDTH && line.x_pos[0] <= HORIZON_LINE_WIDTH);
        }
    }

    #[test]
    fn test_wraparound_moves_leader_behind() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        line.x_pos = [-595.0, 5.0];
        line.update(100.0, 6.0, false, &mut rng);
        // -595 - 36 = -631 wraps to 569, follower at -31
        assert_eq!(line.x_pos, [569.0, -31.0]);
    }

    #[test]
    fn test_frozen_strips_do_not_move() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        line.update(16.7, 6.0, true, &mut rng);
        assert_eq!(line.x_pos, [0.0, 600.0]);
        assert_eq!(line.start_lake_x, Some(START_LAKE_X));
    }

    #[test]
    fn test_start_lake_scrolls_away() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        for _ in 0..200 {
            line.update(16.7, 6.0, false, &mut rng);
        }
        assert_eq!(line.start_lake_x, None);
    }

    #[test]
    fn test_goal_lake_parks_at_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        line.start_goal_lake_reveal();
        let mut ticks = 0;
        while !line.goal_lake.fully_visible {
            line.update(16.7, 6.0, false, &mut rng);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(line.goal_lake.x_pos, 240.0);
        // Keeps reporting visible once parked, even while frozen
        line.update(16.7, 6.0, true, &mut rng);
        assert!(line.goal_lake.fully_visible);
        assert_eq!(line.goal_lake.x_pos, 240.0);
    }

    #[test]
    fn test_reset_restores_lakes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut line = HorizonLine::new(600.0);
        line.start_goal_lake_reveal();
        for _ in 0..300 {
            line.update(16.7, 6.0, false, &mut rng);
        }
        line.reset();
        assert_eq!(line, HorizonLine::new(600.0));
    }
}
