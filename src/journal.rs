//! Order journal, written directly rather than through `tracing` so that a
//! stricter `RUST_LOG` never drops the INFO confirmation lines.

use std::{
    fs::OpenOptions,
    io::Write,
    path::Path,
    sync::Mutex,
};

use chrono::{SecondsFormat, Utc};

use crate::{
    error::{TradingError, TradingResult},
    models::OrderConfirmation,
};

/// Append-only order log: one line per submission attempt.
pub struct OrderJournal {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl OrderJournal {
    pub fn open(path: &Path) -> TradingResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                TradingError::Configuration(format!(
                    "Failed to open order log {}: {}",
                    path.display(),
                    e
                ))
            })?;
        Ok(Self::from_writer(file))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }

    pub fn record_confirmation(&self, confirmation: &OrderConfirmation) {
        self.append("INFO", &format!("Order response: {}", confirmation));
    }

    pub fn record_failure(&self, error: &TradingError) {
        self.append("ERROR", &format!("Error placing order: {}", error));
    }

    fn append(&self, level: &str, message: &str) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        // Keep one entry per line even if the message carries newlines.
        let message = message.replace('\n', " ");

        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };

        let written = writeln!(sink, "{} {} {}", timestamp, level, message).and_then(|_| sink.flush());
        if let Err(e) = written {
            tracing::warn!("Failed to append to order log: {}", e);
        }
    }
}
