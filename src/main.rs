use dodge::build_info;
use dodge::config::{self, GameConfig};
use dodge::game::GameLoop;
use dodge::logging;
use dodge::platform::{SteadyClock, TerminalGuard, TerminalInput};
use dodge::ui::TerminalSurface;
use log::{error, info};
use std::io;

fn print_help() {
    println!("Dodge - steer the car, avoid the falling blocks\n");
    println!("Usage: dodge [option]\n");
    println!("Controls:");
    println!("  Left/Right, A/D   Steer");
    println!("  Mouse button      Steer toward the pressed half of the screen");
    println!("  R                 Restart after a crash");
    println!("  Q, Esc, Ctrl+C    Quit\n");
    println!("Options:");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
    if let Some(path) = config::config_path() {
        println!("\nConfig file (optional): {}", path.display());
    }
}

fn play(config: GameConfig) -> io::Result<()> {
    let (mut guard, terminal) = TerminalGuard::enter()?;

    let mut surface = TerminalSurface::new(terminal, &config)?;
    let columns = surface.terminal().size()?.width;
    let mut input = TerminalInput::new(&config, columns, guard.key_release_reporting());
    let mut clock = SteadyClock::new(config.frame_duration());
    let mut game = GameLoop::new(config, rand::thread_rng());

    let result = game.run(&mut input, &mut surface, &mut clock);
    let restored = guard.restore();
    first_failure(result, restored)
}

/// Loop error first; a restore error is returned only when the loop succeeded.
fn first_failure(result: io::Result<()>, restored: io::Result<()>) -> io::Result<()> {
    if let (Err(_), Err(e)) = (&result, &restored) {
        error!("Failed to restore terminal: {}", e);
    }
    result.and(restored)
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'dodge --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let log_path = logging::init();
    let config = GameConfig::load()?;
    info!(
        "Starting dodge {} ({}), log: {:?}",
        build_info::BUILD_DATE,
        build_info::BUILD_COMMIT,
        log_path
    );
    info!("{:?}", config);

    if let Err(e) = play(config) {
        error!("Exiting on error: {}", e);
        return Err(e);
    }

    info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(msg: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, msg.to_string()))
    }

    #[test]
    fn test_loop_error_survives_restore_error() {
        let err = first_failure(failed("render"), failed("restore")).unwrap_err();
        assert_eq!(err.to_string(), "render");
    }

    #[test]
    fn test_restore_error_reported_after_clean_loop() {
        let err = first_failure(Ok(()), failed("restore")).unwrap_err();
        assert_eq!(err.to_string(), "restore");
        assert!(first_failure(Ok(()), Ok(())).is_ok());
    }
}
