//! Number guessing game entry point
//!
//! Wires stdin/stdout, the settings file and the score record into the
//! menu loop.

use std::io;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use number_guess::{Console, ScoreStore, Settings, menu};

fn main() {
    env_logger::init();
    log::info!("Number guessing game starting...");

    let settings = Settings::load();
    let mut store = ScoreStore::new(settings.record_path.clone());

    let seed: u64 = rand::random();
    log::info!("Started session with seed: {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if let Err(e) = menu::run(&mut console, &mut store, &mut rng) {
        log::error!("Session aborted: {}", e);
    }

    if settings.pause_on_exit {
        // EOF here just means nobody is waiting
        let _ = console.prompt("\nPress Enter to exit...");
    }
}
