//! ASCII art for every drawable. Rows are top to bottom; spaces are transparent.

use crate::entities::ObstacleKind;
use crate::player::PlayerStatus;

pub type Sprite = &'static [&'static str];

// ── Player ──────────────────────────────────────────────────────────

const SHARK_RUN: [Sprite; 3] = [
    &["    |\\    ", "\\__/  \\__>", "/ ~~o__/  "],
    &["    |\\    ", "___/  \\__>", "  ~~o__/  "],
    &["    |\\    ", "/__/  \\__>", "\\ ~~o__/  "],
];
const SHARK_WAIT: [Sprite; 2] = [
    &["    |\\    ", "\\__/  \\__>", "/ ~~o__/  "],
    &["    |\\    ", "\\__/  \\__>", "/ ~~-__/  "],
];
const SHARK_CRASHED: Sprite = &["    |\\    ", "\\__/  \\__>", "/ ~~x__/  "];
/// Nose up, leaving the water.
const SHARK_RISING: Sprite = &["       __>", "   |\\_/ o ", "\\_/  /    "];
/// Nose down, diving in.
const SHARK_DIVING: Sprite = &["\\_   |\\   ", "  \\_/  \\_ ", "     o__\\>"];

pub fn player(status: PlayerStatus, frame: usize, rotation: f64) -> Sprite {
    if rotation <= -20.0 {
        return SHARK_RISING;
    }
    if rotation >= 20.0 {
        return SHARK_DIVING;
    }
    match status {
        PlayerStatus::Waiting => SHARK_WAIT[frame % SHARK_WAIT.len()],
        PlayerStatus::Running => SHARK_RUN[frame % SHARK_RUN.len()],
        PlayerStatus::Crashed => SHARK_CRASHED,
        _ => SHARK_RUN[0],
    }
}

// ── Obstacles ───────────────────────────────────────────────────────

const CACTUS: Sprite = &[" | ", "(|)", " | "];
const CAR: Sprite = &["  ______    ", " /|_||_\\`.__", "(   _    _ _\\", "=`-(_)--(_)-'"];
const BIRD: [Sprite; 2] = [&["\\ v /"], &["_ v _"]];

/// One unit of an obstacle group. Groups repeat it side by side.
pub fn obstacle(kind: ObstacleKind, frame: usize) -> Sprite {
    match kind {
        ObstacleKind::SmallCactus => CACTUS,
        ObstacleKind::Car => CAR,
        ObstacleKind::Bird => BIRD[frame % BIRD.len()],
    }
}

// ── Pickups and sky ─────────────────────────────────────────────────

const COIN: [Sprite; 4] = [&["(o)"], &["(O)"], &[" | "], &["(O)"]];
pub const CLOUD: Sprite = &[" .--. ", "(____)"];
pub const STAR: char = '*';
const MOON_PHASES: [char; 7] = [')', 'D', 'O', 'O', 'O', 'C', '('];

pub fn coin(frame: usize) -> Sprite {
    COIN[frame % COIN.len()]
}

pub fn moon(phase: usize) -> char {
    MOON_PHASES[phase % MOON_PHASES.len()]
}

// ── Ground ──────────────────────────────────────────────────────────

pub const GROUND_FLAT: char = '_';
pub const GROUND_BUMP: char = '^';
pub const WATER: char = '~';

/// Rows a sprite occupies.
pub fn height(sprite: Sprite) -> usize {
    sprite.len()
}

/// Widest row.
pub fn width(sprite: Sprite) -> usize {
    sprite.iter().map(|row| row.chars().count()).max().unwrap_or(0)
}
