//! Sky Runner entry point
//!
//! Native builds run a headless demo: the autopilot plays a few runs against
//! a recording renderer and silent audio, and the best score is kept on disk.
//! The browser build enters through `web::wasm_start` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use sky_runner::audio::NullAudio;
    use sky_runner::consts::{HIGH_SCORE_FILE, SETTINGS_FILE};
    use sky_runner::highscores::JsonFileStore;
    use sky_runner::renderer::CommandBuffer;
    use sky_runner::sim::{GamePhase, autopilot};
    use sky_runner::{Action, InputState, Session, Settings, Tuning};

    /// 60 Hz host
    const HOST_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a run after ten minutes of game time
    const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 10;

    struct Options {
        tuning: Option<PathBuf>,
        runs: u32,
        seed: u64,
    }

    fn parse_args() -> Result<Options, String> {
        let mut options = Options {
            tuning: None,
            runs: 3,
            seed: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--runs" => {
                    let value = args.next().ok_or("--runs needs a value")?;
                    options.runs = value.parse().map_err(|_| format!("bad run count {value:?}"))?;
                }
                "--seed" => {
                    let value = args.next().ok_or("--seed needs a value")?;
                    options.seed = value.parse().map_err(|_| format!("bad seed {value:?}"))?;
                }
                "-h" | "--help" => {
                    return Err("usage: sky-runner [TUNING.json] [--runs N] [--seed N]".into());
                }
                path => options.tuning = Some(PathBuf::from(path)),
            }
        }
        Ok(options)
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let tuning = Tuning::from_json(&json).map_err(|e| e.to_string())?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Sky Runner (native, headless) starting...");

        let options = match parse_args() {
            Ok(options) => options,
            Err(msg) => {
                eprintln!("{msg}");
                return ExitCode::from(2);
            }
        };
        let tuning = match load_tuning(options.tuning.as_ref()) {
            Ok(tuning) => tuning,
            Err(msg) => {
                eprintln!("error: {msg}");
                return ExitCode::FAILURE;
            }
        };

        let store = JsonFileStore::new(HIGH_SCORE_FILE);
        let mut session = match Session::new(tuning, Box::new(NullAudio::new()), Box::new(store), options.seed) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("error: invalid tuning: {err}");
                return ExitCode::FAILURE;
            }
        };
        session.apply_settings(&Settings::load_from(Path::new(SETTINGS_FILE)));

        let mut now = 0.0;
        let mut frame = CommandBuffer::new();
        let confirm = InputState::default().with(Action::Confirm);

        for run in 1..=options.runs {
            // Release, then press Enter to leave the menu
            session.tick(now, &InputState::default());
            now += HOST_FRAME_MS;
            session.tick(now, &confirm);

            let mut frames = 0;
            let mut commands = 0;
            while session.phase() == GamePhase::Playing && frames < MAX_FRAMES_PER_RUN {
                now += HOST_FRAME_MS;
                let input = session.world().map(autopilot).unwrap_or_default();
                session.tick(now, &input);

                frame.clear();
                session.render(&mut frame);
                commands += frame.len();
                frames += 1;
            }
            if session.phase() == GamePhase::Playing {
                log::warn!("Run {} still going after {} frames, stopping", run, frames);
                break;
            }

            println!(
                "run {}: score {} after {:.1}s ({} draw commands/frame)",
                run,
                session.score(),
                f64::from(frames) * HOST_FRAME_MS / 1000.0,
                commands / frames.max(1) as usize
            );

            // Back to the menu for the next run
            now += HOST_FRAME_MS;
            session.tick(now, &InputState::default());
            now += HOST_FRAME_MS;
            session.tick(now, &confirm);
        }

        println!("high score: {}", session.high_score());
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
