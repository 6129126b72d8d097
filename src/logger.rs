use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the game, so
/// without a file the lines go nowhere.
pub struct Logger {
    sink: Option<Mutex<File>>,
}

impl Logger {
    fn new(sink: Option<File>) -> Self {
        Self { sink: sink.map(Mutex::new) }
    }

    pub fn log(&self, message: &str) {
        let Some(sink) = &self.sink else { return };

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Ok(mut file) = sink.lock() {
            let _ = writeln!(file, "[{}] {}", timestamp, message);
        }
    }
}

pub fn init_logger(path: Option<&Path>) -> io::Result<()> {
    let sink = match path {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    LOGGER.get_or_init(|| Logger::new(sink));
    Ok(())
}

pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_timestamped() {
        let path = std::env::temp_dir().join(format!("grid_snake_log_{}.txt", std::process::id()));
        let file = OpenOptions::new().create(true).write(true).truncate(true).open(&path).unwrap();
        let logger = Logger::new(Some(file));

        logger.log("snake ate food at (3, 2)");

        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(written.starts_with('['));
        assert!(written.trim_end().ends_with("] snake ate food at (3, 2)"));
    }

    #[test]
    fn logging_without_a_sink_is_silent() {
        Logger::new(None).log("nothing to see");
        log("before or after init, never panics");
    }
}
