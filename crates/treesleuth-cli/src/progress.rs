//! Live "Directories found: N" line on stderr while a scan runs.

use crossbeam_channel::{select, tick, Sender};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use treesleuth_core::scanner::ScanHandle;

/// How often the progress line is redrawn.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Wide enough to blank any progress message we draw.
const CLEAR_WIDTH: usize = 40;

pub fn progress_message(directories: u64) -> String {
    format!("Directories found: {directories}")
}

/// A background thread redrawing the progress line until the scan finishes
/// or [`ProgressLine::finish`] is called.
pub struct ProgressLine {
    done_tx: Sender<()>,
    thread: thread::JoinHandle<()>,
}

impl ProgressLine {
    pub fn start(handle: ScanHandle, interval: Duration) -> io::Result<Self> {
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
        let thread = thread::Builder::new()
            .name("treesleuth-progress".into())
            .spawn(move || {
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            if handle.is_finished() {
                                break;
                            }
                            draw(&progress_message(handle.snapshot_progress()));
                        }
                        recv(done_rx) -> _ => break,
                    }
                }
                clear();
            })?;
        Ok(Self { done_tx, thread })
    }

    /// Stop redrawing and erase the line.
    pub fn finish(self) {
        let _ = self.done_tx.send(());
        let _ = self.thread.join();
    }
}

fn draw(message: &str) {
    let mut err = io::stderr().lock();
    let _ = write!(err, "\r{message}");
    let _ = err.flush();
}

fn clear() {
    let mut err = io::stderr().lock();
    let _ = write!(err, "\r{}\r", " ".repeat(CLEAR_WIDTH));
    let _ = err.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        assert_eq!(progress_message(42), "Directories found: 42");
    }
}
