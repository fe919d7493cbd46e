//! Shark Runner play field.
//!
//! The runner emits draw commands in world pixels. [`CellCanvas`] scales them
//! onto a grid of terminal cells with per-cell colors, then the grid is
//! stamped row by row as Paragraph widgets.

use super::game_common::{render_result_banner, render_status_bar, split_scene, titled_panel};
use super::sprites::{self, Sprite};
use crate::core::constants::{DIGIT_DEST_WIDTH, MAX_DISTANCE_UNITS};
use crate::core::Dimensions;
use crate::entities::{ObstacleKind, OBSTACLE_TYPES};
use crate::meters::MeterKind;
use crate::player::PLAYER_HEIGHT;
use crate::render::{Canvas, DrawCommand};
use crate::runner::{Runner, Transition};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Day and night colors for each layer.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    ground: Color,
    water: Color,
    cloud: Color,
    player: Color,
    cactus: Color,
    car: Color,
    bird: Color,
    coin: Color,
    digits: Color,
    high_score: Color,
    hitbox: Color,
}

const DAY: Palette = Palette {
    background: Color::Reset,
    ground: Color::Rgb(83, 83, 83),
    water: Color::Rgb(70, 130, 200),
    cloud: Color::Rgb(200, 200, 200),
    player: Color::Rgb(90, 110, 130),
    cactus: Color::Rgb(60, 140, 60),
    car: Color::Rgb(180, 60, 50),
    bird: Color::Rgb(120, 90, 160),
    coin: Color::Rgb(230, 190, 40),
    digits: Color::Rgb(83, 83, 83),
    high_score: Color::DarkGray,
    hitbox: Color::Magenta,
};

const NIGHT: Palette = Palette {
    background: Color::Rgb(20, 20, 36),
    ground: Color::Rgb(172, 172, 172),
    water: Color::Rgb(90, 150, 220),
    cloud: Color::Rgb(90, 90, 110),
    player: Color::Rgb(180, 200, 220),
    cactus: Color::Rgb(110, 190, 110),
    car: Color::Rgb(220, 110, 100),
    bird: Color::Rgb(180, 150, 220),
    coin: Color::Rgb(250, 220, 90),
    digits: Color::Rgb(200, 200, 200),
    high_score: Color::Gray,
    hitbox: Color::LightMagenta,
};

/// A grid of cells covering the whole world.
pub struct CellCanvas {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<Vec<Cell>>,
    x_scale: f64,
    y_scale: f64,
    palette: Palette,
    /// Set when the runner asks for the game over panel. `Some(won)`.
    pub game_over: Option<bool>,
}

impl CellCanvas {
    pub fn new(cols: usize, rows: usize, world: Dimensions) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![Cell::default(); cols]; rows],
            x_scale: cols as f64 / world.width,
            y_scale: rows as f64 / world.height,
            palette: DAY,
            game_over: None,
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x * self.x_scale).round() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.y_scale).round() as i32
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        let bg = self.palette.background;
        self.cells[row as usize][col as usize] = Cell { ch, fg, bg };
    }

    fn text(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg);
        }
    }

    /// Stamp with the sprite's top-left at `(col, row)`. Spaces are skipped.
    fn sprite(&mut self, col: i32, row: i32, sprite: Sprite, fg: Color) {
        for (dy, line) in sprite.iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch != ' ' {
                    self.put(col + dx as i32, row + dy as i32, ch, fg);
                }
            }
        }
    }

    /// Stamp with the sprite's bottom row on the row containing world `bottom_y`.
    fn sprite_on(&mut self, col: i32, bottom_y: f64, sprite: Sprite, fg: Color) {
        let bottom = self.row(bottom_y) - 1;
        let top = bottom - sprites::height(sprite) as i32 + 1;
        self.sprite(col, top, sprite, fg);
    }

    fn fill_background(&mut self) {
        let bg = self.palette.background;
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg,
                };
            }
        }
    }
}

/// Dim a color toward the background by `opacity` in [0, 1].
fn faded(color: Color, opacity: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (c as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

impl Canvas for CellCanvas {
    fn draw(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear { night } => {
                self.palette = if night { NIGHT } else { DAY };
                self.game_over = None;
                self.fill_background();
            }
            DrawCommand::HorizonStrip { x, y, width, bumpy } => {
                let row = self.row(y);
                let start = self.col(x);
                let end = self.col(x + width);
                for col in start..end {
                    let ch = if bumpy && col.rem_euclid(9) == 4 {
                        sprites::GROUND_BUMP
                    } else {
                        sprites::GROUND_FLAT
                    };
                    self.put(col, row, ch, self.palette.ground);
                }
            }
            DrawCommand::Lake { x, y, width } => {
                let row = self.row(y);
                for col in self.col(x)..self.col(x + width) {
                    self.put(col, row, sprites::WATER, self.palette.water);
                }
            }
            DrawCommand::Cloud { x, y } => {
                let (col, row) = (self.col(x), self.row(y));
                self.sprite(col, row, sprites::CLOUD, self.palette.cloud);
            }
            DrawCommand::Moon {
                x,
                y,
                phase,
                opacity,
            } => {
                if opacity > 0.0 {
                    let fg = faded(Color::Rgb(240, 240, 200), opacity);
                    self.put(self.col(x), self.row(y), sprites::moon(phase), fg);
                }
            }
            DrawCommand::Star { x, y, opacity } => {
                if opacity > 0.0 {
                    let fg = faded(Color::Rgb(255, 255, 255), opacity);
                    self.put(self.col(x), self.row(y), sprites::STAR, fg);
                }
            }
            DrawCommand::Obstacle {
                kind,
                x,
                y,
                size,
                frame,
            } => {
                let Some(def) = OBSTACLE_TYPES.iter().find(|t| t.kind == kind) else {
                    return;
                };
                let sprite = sprites::obstacle(kind, frame);
                let fg = match kind {
                    ObstacleKind::SmallCactus => self.palette.cactus,
                    ObstacleKind::Car => self.palette.car,
                    ObstacleKind::Bird => self.palette.bird,
                };
                let step = (def.width * self.x_scale).round().max(sprites::width(sprite) as f64) as i32;
                let col = self.col(x);
                for unit in 0..size.max(1) as i32 {
                    self.sprite_on(col + unit * step, y + def.height, sprite, fg);
                }
            }
            DrawCommand::Coin { x, y, frame } => {
                let (col, row) = (self.col(x), self.row(y));
                self.sprite(col, row, sprites::coin(frame), self.palette.coin);
            }
            DrawCommand::Player {
                x,
                y,
                status,
                frame,
                rotation,
            } => {
                let sprite = sprites::player(status, frame, rotation);
                let col = self.col(x);
                self.sprite_on(col, y + PLAYER_HEIGHT, sprite, self.palette.player);
            }
            DrawCommand::Digits {
                meter,
                x,
                y,
                text,
                high_score,
            } => {
                let fg = if high_score {
                    self.palette.high_score
                } else {
                    self.palette.digits
                };
                let label = match meter {
                    MeterKind::Distance => "",
                    MeterKind::Coins => "$ ",
                };
                let text = format!("{label}{text}");
                // Right-align so the text ends where the pixel meter would
                let col = self.col(x + 6.0 * DIGIT_DEST_WIDTH)
                    - text.chars().count() as i32;
                let col = if high_score {
                    col - MAX_DISTANCE_UNITS as i32 - 4
                } else {
                    col
                };
                self.text(col, self.row(y), &text, fg);
            }
            DrawCommand::GameOverPanel { won } => {
                self.game_over = Some(won);
            }
            DrawCommand::Hitbox(hitbox) => {
                let (left, right) = (self.col(hitbox.x), self.col(hitbox.right()));
                let (top, bottom) = (self.row(hitbox.y), self.row(hitbox.bottom()));
                for col in left..=right {
                    self.put(col, top, '.', self.palette.hitbox);
                    self.put(col, bottom, '.', self.palette.hitbox);
                }
                for row in top..=bottom {
                    self.put(left, row, ':', self.palette.hitbox);
                    self.put(right, row, ':', self.palette.hitbox);
                }
            }
        }
    }
}

/// Render the whole game screen for `runner`.
pub fn render_runner_scene(frame: &mut Frame, area: Rect, runner: &Runner) {
    let border = if runner.inverted {
        Color::LightBlue
    } else {
        Color::Cyan
    };
    let layout = split_scene(frame, area, " Shark Runner ", border, 22);

    let content = layout.field;
    if content.width >= 10 && content.height >= 4 {
        let mut canvas = CellCanvas::new(
            content.width as usize,
            content.height as usize,
            runner.dimensions,
        );
        runner.draw(&mut canvas);
        stamp(frame, content, &canvas);

        if !runner.activated && !runner.playing {
            render_start_prompt(frame, content);
        }
        if let Some(won) = canvas.game_over {
            render_outcome(frame, content, runner, won);
        }
    }

    render_status_bar_content(frame, layout.status, runner);
    render_info_panel(frame, layout.side, runner);
}

/// Copy the cell grid into the frame, merging same-colored runs into spans.
fn stamp(frame: &mut Frame, area: Rect, canvas: &CellCanvas) {
    for (row_idx, row_data) in canvas.cells.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        if row_area.y < area.y + area.height {
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    let prompt = "[ Press Space/Up to Jump ]";
    if area.width < prompt.len() as u16 {
        return;
    }
    let x = area.x + (area.width - prompt.len() as u16) / 2;
    let y = area.y + area.height / 3;
    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, prompt.len() as u16, 1));
}

fn render_outcome(frame: &mut Frame, area: Rect, runner: &Runner, won: bool) {
    let distance = runner
        .distance_meter
        .actual_distance(runner.distance_ran.ceil());
    let (headline, summary) = if won {
        (
            "HOME AT LAST",
            format!("Back in the water with {} coins", runner.coin_count),
        )
    } else {
        (
            "GAME OVER",
            format!("Ran {} with {} coins", distance, runner.coin_count),
        )
    };
    let best = format!(
        "Best {} / {} coins",
        runner
            .distance_meter
            .actual_distance(runner.highest_score as f64),
        runner.coins_high_score
    );
    render_result_banner(frame, area, won, headline, &[summary, best]);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, runner: &Runner) {
    if runner.crashed {
        render_status_bar(
            frame,
            area,
            if runner.won { "You made it!" } else { "Crashed" },
            if runner.won { Color::Green } else { Color::Red },
            &[("[Space/Enter]", "Restart"), ("[Q]", "Quit")],
        );
        return;
    }

    let status = match (&runner.transition, runner.paused) {
        (_, true) => "Paused",
        (Transition::IntroJump(_), _) => "Here we go!",
        (Transition::LakeReveal, _) | (Transition::MoveToLake { .. }, _) => "The lake!",
        (Transition::WinJump(_), _) => "Splash!",
        (Transition::None, _) if !runner.activated => "Ready",
        (Transition::None, _) => "Run!",
    };
    render_status_bar(
        frame,
        area,
        status,
        Color::Cyan,
        &[
            ("[Space/Up]", "Jump"),
            ("[Down]", "Drop"),
            ("[Q]", "Quit"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, runner: &Runner) {
    let inner = titled_panel(frame, area, " Info ");
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
    let value = |text: String| {
        Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines: Vec<Line> = vec![
        Line::from(vec![label("Distance: "), value(runner.distance_meter.digits.clone())]),
        Line::from(vec![
            label("Coins: "),
            value(format!(
                "{}/{}",
                runner.coin_count, runner.config.win_coin_target
            )),
        ]),
        Line::from(vec![
            label("Speed: "),
            value(format!("{:.1}", runner.current_speed)),
        ]),
        Line::from(vec![
            label("Best: "),
            value(format!(
                "{} / {}",
                runner
                    .distance_meter
                    .actual_distance(runner.highest_score as f64),
                runner.coins_high_score
            )),
        ]),
        Line::from(vec![label("Runs: "), value(runner.play_count.to_string())]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" (o) ", Style::default().fg(DAY.coin)),
            label("Coin"),
        ]),
        Line::from(vec![
            Span::styled(" (|) ", Style::default().fg(DAY.cactus)),
            label("Cactus"),
        ]),
        Line::from(vec![
            Span::styled(" (_) ", Style::default().fg(DAY.car)),
            label("Car"),
        ]),
        Line::from(vec![
            Span::styled(" \\v/ ", Style::default().fg(DAY.bird)),
            label("Bird"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RunnerConfig;
    use crate::player::PlayerStatus;

    fn canvas() -> CellCanvas {
        // One cell per 6x6 world pixels
        CellCanvas::new(100, 25, Dimensions::default())
    }

    fn row_text(canvas: &CellCanvas, row: usize) -> String {
        canvas.cells[row].iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_night_clear_paints_background() {
        let mut c = canvas();
        c.draw(DrawCommand::Clear { night: true });
        assert!(c.cells.iter().flatten().all(|cell| cell.bg == NIGHT.background));
        c.draw(DrawCommand::Clear { night: false });
        assert!(c.cells.iter().flatten().all(|cell| cell.bg == Color::Reset));
    }

    #[test]
    fn test_player_sits_on_its_bottom_edge() {
        let mut c = canvas();
        c.draw(DrawCommand::Player {
            x: 60.0,
            y: 90.0,
            status: PlayerStatus::Running,
            frame: 0,
            rotation: 0.0,
        });
        // Feet at world y 140 land on row 22
        assert!(row_text(&c, 22).contains("~~o"));
        assert!(row_text(&c, 20).contains("|\\"));
    }

    #[test]
    fn test_offscreen_commands_are_clipped() {
        let mut c = canvas();
        c.draw(DrawCommand::Cloud { x: -500.0, y: -40.0 });
        c.draw(DrawCommand::Coin {
            x: 5000.0,
            y: 50.0,
            frame: 0,
        });
        assert!(c.cells.iter().flatten().all(|cell| cell.ch == ' '));
    }

    #[test]
    fn test_obstacle_group_repeats_sprite() {
        let mut c = canvas();
        c.draw(DrawCommand::Obstacle {
            kind: ObstacleKind::SmallCactus,
            x: 300.0,
            y: 105.0,
            size: 2,
            frame: 0,
        });
        // Base on row 22, so the arms sit one row up
        let row = row_text(&c, 21);
        assert_eq!(row.matches("(|)").count(), 2);
    }

    #[test]
    fn test_game_over_panel_is_recorded() {
        let mut c = canvas();
        c.draw(DrawCommand::GameOverPanel { won: true });
        assert_eq!(c.game_over, Some(true));
        c.draw(DrawCommand::Clear { night: false });
        assert_eq!(c.game_over, None);
    }

    #[test]
    fn test_faded_scales_rgb() {
        assert_eq!(faded(Color::Rgb(200, 100, 0), 0.5), Color::Rgb(100, 50, 0));
        assert_eq!(faded(Color::White, 0.5), Color::White);
    }

    #[test]
    fn test_runner_frame_renders_ground() {
        let runner = Runner::new(RunnerConfig::default(), Dimensions::default(), Some(5));
        let mut c = canvas();
        runner.draw(&mut c);
        // Ground at world y 127 maps to row 21
        assert!(row_text(&c, 21).contains(sprites::GROUND_FLAT));
    }
}
