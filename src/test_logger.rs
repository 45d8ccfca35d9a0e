//! Captures log records emitted on the current thread.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub level: Level,
    pub target: String,
    pub message: String,
}

std::thread_local! {
    static RECORDS: RefCell<Vec<Captured>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let captured = Captured {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        RECORDS.with(|records| records.borrow_mut().push(captured));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Installs the capturing logger and drops anything this thread logged so far.
pub fn init() {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    take();
}

/// Returns and clears the records logged on this thread.
pub fn take() -> Vec<Captured> {
    RECORDS.with(|records| records.borrow_mut().drain(..).collect())
}
