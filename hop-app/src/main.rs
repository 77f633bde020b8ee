//! HOP - repeat-accelerated seek jumps
//!
//! Terminal demo: tap left/right to jump, tap faster to jump further.

mod config;
mod playhead;

use std::fs::{self, File};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{unbounded, Sender};
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hop_input::{Command, InputHandler};
use hop_repeat::{Direction, JumpError, JumpRepeater, RepeatEvent, ThreadTimers};

use crate::config::Config;
use crate::playhead::{format_time, Playhead, Seek};

/// Length of the simulated media item
const DEMO_MEDIA_SECS: f64 = 2.0 * 60.0 * 60.0;

fn main() -> anyhow::Result<()> {
    let log_path = init_logging()?;
    tracing::info!("Starting HOP - logging to {}", log_path.display());

    let config = Config::load();
    if !Config::config_path().exists() {
        // Write defaults so there is a file to edit
        if let Err(e) = config.save() {
            tracing::warn!("Failed to write default config: {}", e);
        }
    }
    tracing::info!(
        window = ?config.repeat_window,
        forward_secs = config.jump_forward_secs,
        backward_secs = config.jump_backward_secs,
        "config loaded"
    );

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        Print("HOP - left/right (h/l) to jump, tap repeatedly to jump further, q to quit\r\n")
    )?;

    let result = run_app(&config);

    disable_raw_mode()?;
    execute!(out, Print("\r\n"))?;

    result
}

/// Log to a file; the terminal is in raw mode
fn init_logging() -> anyhow::Result<PathBuf> {
    let log_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hop");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("hop.log");
    let file = File::create(&log_path)?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hop=info,hop_repeat=debug,warn".into()),
        )
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();

    Ok(log_path)
}

fn run_app(config: &Config) -> anyhow::Result<()> {
    // Key presses and timer expiries share one queue, so the repeater sees a
    // single ordered event stream
    let (event_tx, event_rx) = unbounded::<RepeatEvent>();
    let timers = ThreadTimers::spawn(event_tx.clone())?;

    let mut playhead = Playhead::new(config.jump_forward_secs, config.jump_backward_secs);
    playhead.load(DEMO_MEDIA_SECS);

    let jump = move |direction: Direction, magnitude: u32| -> Result<(), JumpError> {
        let seek = playhead.seek(direction, magnitude)?;
        if let Err(e) = draw_status(&seek) {
            tracing::warn!("Failed to draw status: {}", e);
        }
        Ok(())
    };

    let mut repeater = JumpRepeater::with_window(config.repeat_window, timers, jump);

    let input_handle = thread::Builder::new()
        .name("hop-input".into())
        .spawn(move || run_input_thread(event_tx))?;

    repeater.run(&event_rx);

    let _ = input_handle.join();
    Ok(())
}

fn run_input_thread(events: Sender<RepeatEvent>) {
    let mut input_handler = InputHandler::new();

    loop {
        let (key, at) = match event::read() {
            Ok(Event::Key(key)) => (key, Instant::now()),
            Ok(_) => continue,
            Err(e) => {
                tracing::error!("Input error: {}", e);
                let _ = events.send(RepeatEvent::Shutdown);
                return;
            }
        };

        match input_handler.handle_key(key) {
            Some(Command::Jump(direction)) => {
                if events.send(RepeatEvent::Press(direction, at)).is_err() {
                    return;
                }
            }
            Some(Command::Quit) => {
                let _ = events.send(RepeatEvent::Shutdown);
                return;
            }
            None => {}
        }
    }
}

fn draw_status(seek: &Seek) -> io::Result<()> {
    let arrow = match seek.direction {
        Direction::Forward => ">>",
        Direction::Backward => "<<",
    };

    let mut out = stdout();
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!(
            "{} {:+}s (x{})  {} / {}",
            arrow,
            seek.offset,
            seek.magnitude,
            format_time(seek.position),
            format_time(seek.length)
        ))
    )?;
    out.flush()
}
