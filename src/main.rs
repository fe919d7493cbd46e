use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use shark_runner::build_info;
use shark_runner::core::constants::MS_PER_FRAME;
use shark_runner::core::{ConfigSetting, Dimensions, RunnerConfig};
use shark_runner::input::{map_event, HostAction};
use shark_runner::runner::{InputEvent, Runner, RunnerEvent, Session};
use shark_runner::ui::draw_ui;
use shark_runner::utils::{default_log_path, init_logging};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Without key-release reporting a jump is held this long before it is released.
const SYNTHETIC_RELEASE_MS: f64 = 180.0;

struct CliOptions {
    config_path: Option<PathBuf>,
    settings: Vec<ConfigSetting>,
    seed: Option<u64>,
    log_path: PathBuf,
}

fn print_help() {
    println!("Shark Runner - terminal endless runner\n");
    println!("Usage: shark-runner [options]\n");
    println!("Options:");
    println!("  --config <file>     Load tunables from a JSON file");
    println!("  --set NAME=VALUE    Override one tunable (repeatable)");
    println!("  --seed <n>          Fix the random seed");
    println!("  --log <file>        Log file (default: {})", default_log_path().display());
    println!("  --version           Show version information");
    println!("  --help              Show this help message\n");
    println!("Settings: {}", ConfigSetting::NAMES.join(", "));
    println!("\nControls: Space/Up jump, Down drop, Enter restart, Q/Esc quit");
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        config_path: None,
        settings: Vec::new(),
        seed: None,
        log_path: default_log_path(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--config" => options.config_path = Some(PathBuf::from(value("--config")?)),
            "--set" => {
                let assignment = value("--set")?;
                let setting = ConfigSetting::parse(&assignment).map_err(|e| e.to_string())?;
                options.settings.push(setting);
            }
            "--seed" => {
                let raw = value("--seed")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed: {}", raw))?;
                options.seed = Some(seed);
            }
            "--log" => options.log_path = PathBuf::from(value("--log")?),
            other => return Err(format!("Unknown option: {}", other)),
        }
    }
    Ok(options)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_line());
            std::process::exit(0);
        }
        Some("--help") | Some("-h") => {
            print_help();
            std::process::exit(0);
        }
        _ => {}
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'shark-runner --help' for usage.");
            std::process::exit(1);
        }
    };

    init_logging(&options.log_path)?;
    info!(version = %build_info::version_line(), "starting");

    let config = match &options.config_path {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    let mut session = Session::new();
    let runner = session.launch(config, Dimensions::default(), options.seed)?;
    for setting in options.settings {
        runner.update_config_setting(setting);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let key_release = supports_keyboard_enhancement().unwrap_or(false);
    if key_release {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, runner, key_release);

    // Restore terminal even if the loop failed
    if key_release {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    terminal.backend_mut().execute(DisableFocusChange)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runner: &mut Runner,
    key_release: bool,
) -> io::Result<()> {
    let start = Instant::now();
    let now_ms = || start.elapsed().as_secs_f64() * 1000.0;
    let mut last_frame = f64::NEG_INFINITY;
    let mut pending_release: Option<f64> = None;

    loop {
        let now = now_ms();
        if runner.frame_pending() && now - last_frame >= MS_PER_FRAME {
            runner.update(now);
            last_frame = now;
        }

        if let Some(at) = pending_release {
            if now >= at {
                runner.handle_input(InputEvent::JumpReleased, now);
                pending_release = None;
            }
        }

        for event in runner.drain_events() {
            match event {
                RunnerEvent::Sound(sound) => debug!(?sound, "sound"),
                other => debug!(event = ?other, "runner event"),
            }
        }

        terminal.draw(|frame| draw_ui(frame, runner))?;

        let wait = (last_frame + MS_PER_FRAME - now_ms()).clamp(1.0, MS_PER_FRAME);
        if event::poll(Duration::from_micros((wait * 1000.0) as u64))? {
            let terminal_event = event::read()?;
            match map_event(&terminal_event) {
                HostAction::Quit => {
                    info!(distance = runner.distance_ran, "quit");
                    return Ok(());
                }
                HostAction::Game(input) => {
                    let now = now_ms();
                    runner.handle_input(input, now);
                    if !key_release && input == InputEvent::JumpPressed {
                        pending_release = Some(now + SYNTHETIC_RELEASE_MS);
                    }
                }
                HostAction::Ignore => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = parse_args(&[]).unwrap();
        assert!(options.config_path.is_none());
        assert!(options.settings.is_empty());
        assert_eq!(options.seed, None);
        assert_eq!(options.log_path, default_log_path());
    }

    #[test]
    fn test_parse_repeated_settings_and_seed() {
        let options = parse_args(&args(&[
            "--set",
            "GRAVITY=0.4",
            "--set",
            "speed=8",
            "--seed",
            "42",
        ]))
        .unwrap();
        assert_eq!(
            options.settings,
            vec![ConfigSetting::Gravity(0.4), ConfigSetting::Speed(8.0)]
        );
        assert_eq!(options.seed, Some(42));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--set", "NOPE=1"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
