use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::debug;

pub enum AppEvent {
    Key(KeyEvent),
    /// No input arrived within one tick; time to refresh the clock.
    Tick,
}

/// Reads terminal input on a background thread so the drill loop can block
/// on a channel and still wake up once per tick.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            AppEvent::Key(key)
                        }
                        Ok(_) => continue,
                        Err(err) => {
                            debug!("input reader stopped: {err}");
                            return;
                        }
                    },
                    Ok(false) => AppEvent::Tick,
                    Err(err) => {
                        debug!("input poll failed: {err}");
                        return;
                    }
                };
                // The receiver is gone once the drill loop returns.
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
