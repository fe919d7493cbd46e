//! Obstacles: the static type catalog and live instances.

use super::{random_between, scroll_increment, Scrolling};
use crate::collision::{Collidable, CollisionBox};
use crate::core::constants::MAX_GAP_COEFFICIENT;
use crate::render::{Canvas, DrawCommand};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    SmallCactus,
    Car,
    Bird,
}

impl ObstacleKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SmallCactus => "small cactus",
            Self::Car => "car",
            Self::Bird => "bird",
        }
    }
}

/// Catalog entry. Instances copy the hitbox template so composite resizing
/// never touches the shared definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleType {
    pub kind: ObstacleKind,
    pub width: f64,
    pub height: f64,
    /// Allowed heights; one is picked per instance.
    pub y_pos: &'static [f64],
    /// Groups of more than one are only allowed above this speed.
    pub multiple_speed: f64,
    pub min_gap: f64,
    /// Not spawned below this speed.
    pub min_speed: f64,
    /// Extra speed relative to the ground, randomly signed per instance.
    pub speed_offset: f64,
    pub num_frames: usize,
    pub frame_rate: f64,
    pub collision_boxes: &'static [CollisionBox],
}

pub static OBSTACLE_TYPES: [ObstacleType; 3] = [
    ObstacleType {
        kind: ObstacleKind::SmallCactus,
        width: 17.0,
        height: 35.0,
        y_pos: &[105.0],
        multiple_speed: 4.0,
        min_gap: 120.0,
        min_speed: 0.0,
        speed_offset: 0.0,
        num_frames: 1,
        frame_rate: 0.0,
        collision_boxes: &[
            CollisionBox::new(0.0, 7.0, 5.0, 27.0),
            CollisionBox::new(4.0, 0.0, 6.0, 34.0),
            CollisionBox::new(10.0, 4.0, 7.0, 14.0),
        ],
    },
    ObstacleType {
        kind: ObstacleKind::Car,
        width: 120.0,
        height: 75.0,
        y_pos: &[65.0],
        multiple_speed: 7.0,
        min_gap: 120.0,
        min_speed: 0.0,
        speed_offset: 0.0,
        num_frames: 1,
        frame_rate: 0.0,
        collision_boxes: &[
            CollisionBox::new(25.0, 45.0, 55.0, 23.0),
            CollisionBox::new(25.0, 25.0, 50.0, 7.0),
            CollisionBox::new(45.0, 10.0, 10.0, 38.0),
        ],
    },
    ObstacleType {
        kind: ObstacleKind::Bird,
        width: 80.0,
        height: 50.0,
        y_pos: &[100.0, 75.0, 50.0],
        multiple_speed: 999.0,
        min_gap: 150.0,
        min_speed: 8.5,
        speed_offset: 0.8,
        num_frames: 2,
        frame_rate: 1000.0 / 6.0,
        collision_boxes: &[
            CollisionBox::new(25.0, 15.0, 16.0, 5.0),
            CollisionBox::new(20.0, 21.0, 30.0, 6.0),
            CollisionBox::new(25.0, 27.0, 14.0, 3.0),
        ],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    def: &'static ObstacleType,
    /// Number of sprites grouped side by side.
    pub size: u32,
    pub x_pos: f64,
    pub y_pos: f64,
    pub width: f64,
    pub gap: f64,
    pub speed_offset: f64,
    pub remove: bool,
    pub current_frame: usize,
    timer: f64,
    collision_boxes: Vec<CollisionBox>,
}

impl Obstacle {
    /// Spawn one sprite-width past the right edge.
    pub fn new<R: Rng>(
        def: &'static ObstacleType,
        container_width: f64,
        gap_coefficient: f64,
        speed: f64,
        max_length: u32,
        rng: &mut R,
    ) -> Self {
        let mut size = rng.gen_range(1..=max_length.max(1));
        if size > 1 && def.multiple_speed > speed {
            size = 1;
        }
        let width = def.width * size as f64;
        let y_pos = def.y_pos[rng.gen_range(0..def.y_pos.len())];

        let mut collision_boxes = def.collision_boxes.to_vec();
        // Composite: stretch the middle box and push the last to the far edge
        if size > 1 && collision_boxes.len() >= 3 {
            collision_boxes[1].width =
                width - collision_boxes[0].width - collision_boxes[2].width;
            collision_boxes[2].x = width - collision_boxes[2].width;
        }

        let speed_offset = if def.speed_offset != 0.0 && rng.gen::<f64>() > 0.5 {
            def.speed_offset
        } else {
            -def.speed_offset
        };

        let gap = Self::random_gap(width, def.min_gap, gap_coefficient, speed, rng);

        Self {
            kind: def.kind,
            def,
            size,
            x_pos: container_width + def.width,
            y_pos,
            width,
            gap,
            speed_offset,
            remove: false,
            current_frame: 0,
            timer: 0.0,
            collision_boxes,
        }
    }

    /// Minimum gap grows with speed; the maximum is 1.5x the minimum.
    pub fn random_gap<R: Rng>(
        width: f64,
        min_gap: f64,
        gap_coefficient: f64,
        speed: f64,
        rng: &mut R,
    ) -> f64 {
        let min = (width * speed + min_gap * gap_coefficient).round();
        let max = (min * MAX_GAP_COEFFICIENT).round();
        random_between(rng, min as i64, max as i64)
    }

    pub fn definition(&self) -> &'static ObstacleType {
        self.def
    }

    pub fn update(&mut self, delta: f64, speed: f64) {
        if self.remove {
            return;
        }
        self.x_pos -= scroll_increment(speed + self.speed_offset, delta);

        if self.def.num_frames > 1 {
            self.timer += delta;
            if self.timer >= self.def.frame_rate {
                self.current_frame = (self.current_frame + 1) % self.def.num_frames;
                self.timer = 0.0;
            }
        }

        if !self.is_visible() {
            self.remove = true;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.x_pos + self.width > 0.0
    }
}

impl Collidable for Obstacle {
    fn bounds(&self) -> CollisionBox {
        CollisionBox::new(self.x_pos, self.y_pos, self.width, self.def.height)
    }

    fn collision_boxes(&self) -> &[CollisionBox] {
        &self.collision_boxes
    }
}

impl Scrolling for Obstacle {
    fn x_pos(&self) -> f64 {
        self.x_pos
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn is_removable(&self) -> bool {
        self.remove
    }

    /// The next obstacle waits for the trailing edge of this one.
    fn spawn_anchor(&self) -> f64 {
        self.x_pos + self.width
    }

    fn draw(&self, canvas: &mut dyn Canvas, show_hitboxes: bool) {
        canvas.draw(DrawCommand::Obstacle {
            kind: self.kind,
            x: self.x_pos,
            y: self.y_pos,
            size: self.size,
            frame: self.current_frame,
        });
        if show_hitboxes {
            let origin = self.bounds();
            for hitbox in &self.collision_boxes {
                canvas.draw(DrawCommand::Hitbox(hitbox.offset_by(&origin)));
            }
        }
    }
}
