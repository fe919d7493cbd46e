//! The per-tick update, input handling and game lifecycle.

use super::types::*;
use crate::collision::{check_for_collision, check_pickup};
use crate::core::constants::{
    DEFAULT_WIDTH, LAKE_APPROACH_OFFSET, LAKE_APPROACH_STEP, MS_PER_FRAME,
};
use crate::core::ConfigSetting;
use crate::player::PlayerStatus;
use crate::render::{Canvas, DrawCommand};
use tracing::{debug, info};

impl Runner {
    /// Service one frame at host time `now_ms`.
    ///
    /// Order within a tick is fixed: jump physics, running time, intro check,
    /// horizon, coin pickups, scripted transitions, obstacle collision and
    /// distance, win check, meters, night mode, then the next frame request.
    pub fn update(&mut self, now_ms: f64) {
        self.scheduler.begin_frame();

        let mut delta = now_ms - self.time.unwrap_or(now_ms);
        self.time = Some(now_ms);

        if self.playing {
            if self.player.jumping && !self.transition.is_scripted_jump() {
                self.player.update_jump(delta);
            }

            self.running_time += delta;
            let has_obstacles =
                self.running_time > self.config.clear_time && !self.stop_spawning_obstacles;

            if self.player.jump_count >= 1 && !self.activated && !self.playing_intro {
                self.play_intro();
            }

            if self.playing_intro {
                self.horizon
                    .update(0.0, self.current_speed, has_obstacles, false, &mut self.rng);
            } else {
                if !self.activated {
                    delta = 0.0;
                }
                self.horizon.update(
                    delta,
                    self.current_speed,
                    has_obstacles,
                    self.inverted,
                    &mut self.rng,
                );
            }

            self.collect_coins();
            self.update_transition();

            let collision = has_obstacles
                && self
                    .horizon
                    .obstacles
                    .front()
                    .is_some_and(|obstacle| check_for_collision(obstacle, &self.player).is_some());

            if self.crashed {
                // The win jump ended the game this tick
            } else if collision {
                self.game_over();
            } else {
                self.distance_ran += self.current_speed * delta / MS_PER_FRAME;
                if self.current_speed < self.config.max_speed {
                    self.current_speed =
                        (self.current_speed + self.config.acceleration).min(self.config.max_speed);
                }
            }

            if !self.crashed
                && !self.won
                && self.coin_count >= self.config.win_coin_target
                && self.transition == Transition::None
            {
                self.start_calm_down_sequence();
            }

            let play_achievement_sound =
                self.distance_meter.update(delta, self.distance_ran.ceil());
            self.coin_counter.update(delta, self.coin_count as f64);
            if play_achievement_sound {
                let distance = self.distance_meter.actual_distance(self.distance_ran.ceil());
                debug!(distance, "achievement");
                self.events.push(RunnerEvent::Sound(SoundEvent::Score));
                self.events.push(RunnerEvent::Achievement { distance });
            }

            self.update_night_mode(delta);
        }

        if self.playing
            || (!self.activated && self.player.blink_count < self.config.max_blink_count)
        {
            self.player.update(delta, &mut self.rng);
            self.scheduler.schedule();
        }
    }

    /// Every coin is tested, not just the leading one.
    fn collect_coins(&mut self) {
        let tolerance = self.config.coin_vertical_tolerance;
        for coin in self.horizon.coins.iter_mut() {
            if !coin.collected && check_pickup(&*coin, &self.player, tolerance) {
                coin.collect();
                self.coin_count += 1;
                debug!(total = self.coin_count, "coin collected");
                self.events.push(RunnerEvent::CoinCollected {
                    total: self.coin_count,
                });
            }
        }
    }

    fn update_night_mode(&mut self, delta: f64) {
        if self.invert_timer > self.config.invert_fade_duration {
            self.invert_timer = 0.0;
            self.invert_trigger = false;
            self.invert(false);
        } else if self.invert_timer > 0.0 {
            self.invert_timer += delta;
        } else {
            let actual = self.distance_meter.actual_distance(self.distance_ran.ceil());
            if actual > 0 && self.config.invert_distance > 0 {
                self.invert_trigger = actual % self.config.invert_distance == 0;
                if self.invert_trigger && self.invert_timer == 0.0 {
                    self.invert_timer += delta;
                    self.invert(false);
                }
            }
        }
    }

    /// Follow the trigger, or force day when `reset`.
    pub fn invert(&mut self, reset: bool) {
        let inverted = if reset {
            self.invert_timer = 0.0;
            false
        } else {
            self.invert_trigger
        };
        if inverted != self.inverted {
            self.inverted = inverted;
            debug!(inverted, "night mode toggled");
            self.events
                .push(RunnerEvent::NightModeChanged { inverted });
        }
    }

    // ── Scripted transitions ──────────────────────────────────────

    fn play_intro(&mut self) {
        if self.activated || self.crashed {
            return;
        }
        self.playing_intro = true;
        self.playing = true;
        self.activated = true;
        self.disable_controls = true;

        self.player.cancel_jump();
        self.player.set_status(PlayerStatus::IntroJump);
        self.player.visible = true;
        self.transition = Transition::IntroJump(ScriptedJump::intro(
            self.player.x_pos,
            self.player.ground_y_pos,
            self.dimensions,
        ));
        info!("intro started");
    }

    /// Intro done: controls back, warm-up clock restarts.
    fn start_game(&mut self) {
        self.running_time = 0.0;
        self.playing_intro = false;
        self.disable_controls = false;
        self.play_count += 1;
        info!(play_count = self.play_count, "game started");
        self.events.push(RunnerEvent::IntroFinished);
    }

    /// Coin target reached. Obstacles stop and the goal lake slides in.
    fn start_calm_down_sequence(&mut self) {
        self.won = true;
        self.stop_spawning_obstacles = true;
        self.horizon.horizon_line.start_goal_lake_reveal();
        if self.player.status == PlayerStatus::Jumping {
            self.player.end_jump();
        }
        self.transition = Transition::LakeReveal;
        info!(coins = self.coin_count, "win sequence started");
        self.events.push(RunnerEvent::WinSequenceStarted);
    }

    fn update_transition(&mut self) {
        let transition = std::mem::replace(&mut self.transition, Transition::None);
        self.transition = match transition {
            Transition::None => Transition::None,
            Transition::IntroJump(mut jump) => {
                let pose = jump.step();
                self.apply_pose(pose);
                if jump.is_finished() {
                    self.player.y_pos = self.player.ground_y_pos;
                    self.player.rotation = 0.0;
                    self.player.set_status(PlayerStatus::Running);
                    self.start_game();
                    Transition::None
                } else {
                    Transition::IntroJump(jump)
                }
            }
            Transition::LakeReveal => {
                if self.horizon.horizon_line.goal_lake.fully_visible {
                    self.horizon.frozen = true;
                    self.disable_controls = true;
                    debug!("horizon frozen");
                    Transition::MoveToLake {
                        target_x: self.dimensions.width - LAKE_APPROACH_OFFSET,
                    }
                } else {
                    Transition::LakeReveal
                }
            }
            Transition::MoveToLake { target_x } => {
                if self.player.x_pos < target_x {
                    self.player.x_pos = (self.player.x_pos + LAKE_APPROACH_STEP).min(target_x);
                    Transition::MoveToLake { target_x }
                } else {
                    self.player.x_pos = target_x;
                    self.player.cancel_jump();
                    self.player.y_pos = self.player.ground_y_pos;
                    self.player.set_status(PlayerStatus::WinJump);
                    self.player.visible = true;
                    Transition::WinJump(ScriptedJump::win(self.player.x_pos, self.player.y_pos))
                }
            }
            Transition::WinJump(mut jump) => {
                let pose = jump.step();
                self.apply_pose(pose);
                if jump.is_finished() {
                    self.player.rotation = 90.0;
                    self.player.set_status(PlayerStatus::InLake);
                    self.player.y_pos = jump.start_y;
                    self.player.visible = false;
                    self.game_over();
                    Transition::None
                } else {
                    Transition::WinJump(jump)
                }
            }
        };
    }

    fn apply_pose(&mut self, pose: Pose) {
        self.player.x_pos = pose.x;
        self.player.y_pos = pose.y;
        self.player.rotation = pose.rotation;
    }

    // ── Input ─────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent, now_ms: f64) {
        match event {
            InputEvent::JumpPressed => self.on_jump_pressed(now_ms),
            InputEvent::JumpReleased => self.on_jump_released(now_ms),
            InputEvent::DropPressed => {
                if self.playing && !self.crashed && !self.disable_controls && self.player.jumping {
                    self.player.set_speed_drop();
                }
            }
            InputEvent::RestartRequested => {
                if self.crashed {
                    self.restart(now_ms);
                }
            }
            InputEvent::Typed(c) => self.check_secret_code(c),
            InputEvent::FocusLost => {
                if self.activated && self.playing {
                    self.stop();
                }
            }
            InputEvent::FocusGained => {
                if self.activated && self.paused && !self.crashed {
                    self.resume(now_ms);
                }
            }
        }
    }

    fn on_jump_pressed(&mut self, now_ms: f64) {
        if self.disable_controls || self.crashed {
            return;
        }
        if self.paused {
            self.resume(now_ms);
        } else if !self.playing {
            self.playing = true;
            if self.player.status == PlayerStatus::Waiting {
                self.player.set_status(PlayerStatus::Running);
            }
            self.update(now_ms);
        }
        if !self.player.jumping {
            self.events.push(RunnerEvent::Sound(SoundEvent::ButtonPress));
            self.player.start_jump(self.current_speed);
        }
    }

    fn on_jump_released(&mut self, now_ms: f64) {
        if self.is_running() {
            self.player.end_jump();
        } else if self.crashed {
            let since_crash = now_ms - self.time.unwrap_or(now_ms);
            if since_crash >= self.config.gameover_clear_time {
                self.restart(now_ms);
            }
        } else if self.paused {
            self.resume(now_ms);
        }
    }

    /// Leave a pause. The player is regrounded unless a scripted sequence owns it.
    fn resume(&mut self, now_ms: f64) {
        if self.transition == Transition::None {
            self.player.reset();
        }
        self.play(now_ms);
    }

    /// Rolling buffer of typed characters; a full match pays out bonus coins.
    fn check_secret_code(&mut self, c: char) {
        if !self.playing || self.crashed || self.disable_controls {
            return;
        }
        let code_len = self.config.secret_code.chars().count();
        if code_len == 0 {
            return;
        }
        self.secret_buffer.push(c.to_ascii_lowercase());
        let excess = self.secret_buffer.chars().count().saturating_sub(code_len);
        if excess > 0 {
            self.secret_buffer = self.secret_buffer.chars().skip(excess).collect();
        }
        if self.secret_buffer == self.config.secret_code.to_ascii_lowercase() {
            self.secret_buffer.clear();
            self.coin_count += self.config.secret_code_bonus;
            self.coin_counter.update(0.0, self.coin_count as f64);
            info!(total = self.coin_count, "secret code unlocked");
            self.events.push(RunnerEvent::SecretUnlocked {
                total: self.coin_count,
            });
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────

    /// Pause the loop.
    pub fn stop(&mut self) {
        self.playing = false;
        self.paused = true;
        self.scheduler.cancel();
        debug!("loop stopped");
    }

    /// Resume after a pause.
    pub fn play(&mut self, now_ms: f64) {
        if self.crashed {
            return;
        }
        self.playing = true;
        self.paused = false;
        if self.transition == Transition::None {
            self.player.set_status(PlayerStatus::Running);
        }
        self.time = Some(now_ms);
        self.update(now_ms);
        debug!("loop resumed");
    }

    pub fn game_over(&mut self) {
        if !self.won {
            self.events.push(RunnerEvent::Sound(SoundEvent::Hit));
        }
        self.stop();
        self.crashed = true;
        self.distance_meter.achievement = false;

        if !self.won {
            self.player.crash();
        }

        if self.distance_ran > self.highest_score as f64 {
            self.highest_score = self.distance_ran.ceil() as u64;
            self.distance_meter.set_high_score(self.highest_score as f64);
        }
        if self.coin_count > self.coins_high_score {
            self.coins_high_score = self.coin_count;
            self.coin_counter.set_high_score(self.coins_high_score as f64);
        }

        let distance = self.distance_meter.actual_distance(self.distance_ran.ceil());
        info!(
            won = self.won,
            distance,
            coins = self.coin_count,
            "game over"
        );
        self.events.push(RunnerEvent::GameOver {
            won: self.won,
            distance,
            coins: self.coin_count,
        });
    }

    /// New run. Ignored while a frame is still held.
    pub fn restart(&mut self, now_ms: f64) {
        if self.is_running() {
            return;
        }
        self.play_count += 1;
        self.running_time = 0.0;
        self.playing = true;
        self.paused = false;
        self.crashed = false;
        self.won = false;
        self.stop_spawning_obstacles = false;
        self.disable_controls = false;
        self.distance_ran = 0.0;
        self.coin_count = 0;
        self.secret_buffer.clear();
        self.transition = Transition::None;
        self.set_speed(Some(self.config.speed));
        self.time = Some(now_ms);

        self.distance_meter.reset();
        self.coin_counter.reset();
        self.horizon.reset();
        let x = self.running_x();
        self.player.restart(x);

        info!(play_count = self.play_count, "restarted");
        self.events.push(RunnerEvent::Sound(SoundEvent::ButtonPress));
        self.events.push(RunnerEvent::Restarted {
            play_count: self.play_count,
        });
        self.invert(true);
        self.update(now_ms);
    }

    /// Narrow fields run faster. `Some` also resets the base speed.
    pub fn set_speed(&mut self, speed: Option<f64>) {
        let base = speed.unwrap_or(self.current_speed);
        if self.dimensions.width < DEFAULT_WIDTH {
            let mobile_speed = base * self.dimensions.width / DEFAULT_WIDTH
                * self.config.mobile_speed_coefficient;
            self.current_speed = mobile_speed.max(base);
        } else if let Some(speed) = speed {
            self.current_speed = speed;
        }
    }

    /// Change one tunable on the live runner and re-derive what depends on it.
    pub fn update_config_setting(&mut self, setting: ConfigSetting) {
        self.config.apply(setting);
        match setting {
            ConfigSetting::Gravity(_)
            | ConfigSetting::MinJumpHeight(_)
            | ConfigSetting::SpeedDropCoefficient(_)
            | ConfigSetting::InitialJumpVelocity(_) => {
                self.player.apply_config(&self.config.player);
            }
            ConfigSetting::Speed(speed) => self.set_speed(Some(speed)),
            ConfigSetting::GapCoefficient(_)
            | ConfigSetting::CloudFrequency(_)
            | ConfigSetting::CoinFrequency(_) => self.horizon.apply_config(&self.config),
            ConfigSetting::Acceleration(_)
            | ConfigSetting::MaxSpeed(_)
            | ConfigSetting::ClearTime(_)
            | ConfigSetting::WinCoinTarget(_) => {}
        }
        debug!(setting = setting.name(), "config updated");
    }

    // ── Output ────────────────────────────────────────────────────

    /// Emit the frame back to front.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let show_hitboxes = self.config.show_hitboxes;
        canvas.draw(DrawCommand::Clear {
            night: self.inverted,
        });
        self.horizon.draw(canvas, show_hitboxes);
        self.player.draw(canvas, show_hitboxes);
        self.distance_meter.draw(canvas);
        self.coin_counter.draw(canvas);
        if self.crashed {
            canvas.draw(DrawCommand::GameOverPanel { won: self.won });
        }
    }
}
