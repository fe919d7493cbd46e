// Frame timing
pub const FPS: f64 = 60.0;
pub const MS_PER_FRAME: f64 = 1000.0 / FPS;

// World dimensions (pixels)
pub const DEFAULT_WIDTH: f64 = 600.0;
pub const DEFAULT_HEIGHT: f64 = 150.0;

// Horizon
pub const HORIZON_HEIGHT: f64 = 50.0;
pub const MAX_GAP_COEFFICIENT: f64 = 1.5;

// Ground strips
pub const HORIZON_LINE_WIDTH: f64 = 600.0;
pub const HORIZON_LINE_HEIGHT: f64 = 12.0;
pub const HORIZON_LINE_Y: f64 = 127.0;
pub const BUMP_THRESHOLD: f64 = 0.5;

// Lakes: the start lake the player leaves behind, and the goal lake revealed on a win
pub const LAKE_WIDTH: f64 = 413.6;
pub const LAKE_HEIGHT: f64 = 23.0;
pub const START_LAKE_X: f64 = -40.0;
pub const GOAL_LAKE_OFFSET: f64 = 100.0;
pub const GOAL_LAKE_TARGET_DIVISOR: f64 = 2.5;

// Scripted intro jump
pub const INTRO_JUMP_FRAMES: u32 = 90;
pub const INTRO_JUMP_HEIGHT: f64 = 150.0;
pub const INTRO_START_DEPTH: f64 = 30.0;
pub const INTRO_ROTATION: f64 = -45.0;
pub const INTRO_ROTATION_HOLD: f64 = 0.3;
pub const INTRO_END_X_DIVISOR: f64 = 15.0;

// Win sequence
pub const LAKE_APPROACH_STEP: f64 = 2.0;
pub const LAKE_APPROACH_OFFSET: f64 = 300.0;
pub const WIN_JUMP_FRAMES: u32 = 90;
pub const WIN_JUMP_HEIGHT: f64 = 110.0;
pub const WIN_JUMP_DISTANCE: f64 = 160.0;
pub const WIN_ROTATION: f64 = 90.0;

// Meters
pub const DIGIT_WIDTH: f64 = 10.0;
pub const DIGIT_DEST_WIDTH: f64 = 11.0;
pub const DIGIT_HEIGHT: f64 = 13.0;
pub const MAX_DISTANCE_UNITS: usize = 5;
pub const MAX_COIN_UNITS: usize = 5;
pub const DISTANCE_COEFFICIENT: f64 = 0.025;
pub const FLASH_DURATION_MS: f64 = 250.0;
pub const FLASH_ITERATIONS: u32 = 3;
pub const DISTANCE_METER_Y: f64 = 5.0;
pub const COIN_COUNTER_Y: f64 = 28.0;

// Terminal host
pub const LOG_FILE_NAME: &str = "shark-runner.log";
