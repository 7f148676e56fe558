//! Event logger for shot sessions
//!
//! Writes one `.evlog` file per app launch under `logs/`.

use bevy::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::format::{parse_event, serialize_event};
use super::types::GameEvent;
use crate::tuning::GameplayTuning;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
    /// Sample rate for tick events (every N ms, 0 = disabled)
    pub tick_sample_ms: u32,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
            tick_sample_ms: 100,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    session_id: String,
    last_tick_ms: Option<u32>,
    config: EventLogConfig,
}

/// Local wall-clock stamp used in log file names
pub fn session_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            path: None,
            session_id: String::new(),
            last_tick_ms: None,
            config,
        }
    }

    /// Open a new log file and write the SessionStart line
    pub fn start_session(&mut self, timestamp: &str) -> Result<(), String> {
        if !self.config.enabled {
            return Ok(());
        }

        self.session_id = Uuid::new_v4().to_string();

        std::fs::create_dir_all(&self.config.log_dir).map_err(|e| {
            format!(
                "Failed to create log directory {}: {}",
                self.config.log_dir.display(),
                e
            )
        })?;

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| format!("Failed to open event log {}: {}", path.display(), e))?;

        self.writer = Some(BufWriter::new(file));
        self.last_tick_ms = None;
        info!(
            "Event logging started: {} (session: {})",
            path.display(),
            &self.session_id[..8]
        );
        self.path = Some(path);

        self.log(
            0,
            &GameEvent::SessionStart {
                session_id: self.session_id.clone(),
                timestamp: timestamp.to_string(),
            },
        );
        Ok(())
    }

    /// Log the active tuning (after start_session or a hot reload)
    pub fn log_config(&mut self, time_ms: u32, tuning: GameplayTuning) {
        self.log(time_ms, &GameEvent::Config(tuning));
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and close the current log
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    /// Append one event line
    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        let line = serialize_event(time_ms, event);
        if let Err(e) = writeln!(writer, "{}", line) {
            warn!("Failed to write event: {}", e);
        }
    }

    /// Check if a tick sample is due (based on sample rate)
    pub fn should_log_tick(&mut self, time_ms: u32) -> bool {
        if self.config.tick_sample_ms == 0 {
            return false;
        }
        match self.last_tick_ms {
            Some(last) if time_ms.saturating_sub(last) < self.config.tick_sample_ms => false,
            _ => {
                self.last_tick_ms = Some(time_ms);
                true
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

/// Parse the contents of an `.evlog` file, skipping unreadable lines
pub fn parse_evlog_content(content: &str) -> Vec<(u32, GameEvent)> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_event)
        .collect()
}

pub fn read_evlog(path: &Path) -> Result<Vec<(u32, GameEvent)>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(parse_evlog_content(&content))
}
