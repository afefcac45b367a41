//! Drift Rocks entry point
//!
//! Runs one session against the headless platform with a scripted pilot and
//! logs the final snapshot. A windowed backend plugs in through the same
//! `Platform` trait.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use drift_rocks::platform::{HeadlessPlatform, KeyState};

/// Demo session length (one minute at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u64 = 3600;

/// Circle slowly, thrust in short bursts, keep the trigger held
#[cfg(not(target_arch = "wasm32"))]
fn demo_pilot(frame: u64) -> KeyState {
    KeyState {
        left: false,
        right: frame % 4 == 0,
        thrust: frame % 120 < 20,
        fire: true,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    use drift_rocks::sim::GameState;
    use drift_rocks::{Tuning, runner};

    env_logger::init();

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64);
    let tuning = Tuning::default();
    log::info!("Drift Rocks (native, headless) starting with seed {}", seed);

    let mut platform = match HeadlessPlatform::new(tuning.viewport_size()) {
        Ok(platform) => platform.with_pilot(demo_pilot).with_frame_limit(DEMO_FRAMES),
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut state = match GameState::try_with_tuning(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match runner::run(&mut platform, &mut state) {
        Ok(outcome) => {
            match serde_json::to_string(&outcome) {
                Ok(json) => log::info!("Session ended: {}", json),
                Err(e) => log::warn!("Could not serialize session outcome: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser backend; the library is used directly from a host page
}
