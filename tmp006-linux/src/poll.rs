use std::{
    io::Write,
    sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

const WATCH_TICK: Duration = Duration::from_millis(100);

/// Print one reading per `interval` until `stop` fires or its sender goes away.
///
/// A stop request is observed within one interval. A read in progress is
/// not interrupted. Returns the number of readings printed.
pub fn run<R, W>(
    mut read: R,
    out: &mut W,
    interval: Duration,
    precision: usize,
    stop: &Receiver<()>,
) -> usize
where
    R: FnMut() -> f64,
    W: Write,
{
    let mut readings = 0;
    loop {
        match stop.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(()) | Err(TryRecvError::Disconnected) => break,
        }
        let temp = read();
        if let Err(e) = writeln!(out, "Temp. = {:.*}", precision, temp) {
            log::error!("Failed to write reading: {}", e);
            break;
        }
        readings += 1;
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    log::debug!("Poll loop stopped after {} readings", readings);
    readings
}

/// Send `stop` once `duration` has passed, unless `poller` exits first.
///
/// Returns whether the stop signal was sent.
pub fn stop_after<T>(poller: &JoinHandle<T>, duration: Duration, stop: &Sender<()>) -> bool {
    let deadline = Instant::now() + duration;
    while !poller.is_finished() {
        let now = Instant::now();
        if now >= deadline {
            let _ = stop.send(());
            return true;
        }
        thread::sleep((deadline - now).min(WATCH_TICK));
    }
    false
}
