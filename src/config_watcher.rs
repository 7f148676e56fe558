//! Config file auto-reload system
//!
//! Polls the gameplay tuning file every few seconds and reloads
//! `PhysicsTweaks` when its modification time changes. The ball radius stays
//! at its startup value until the next launch.

use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::events::{EventBus, EventLogger};
use crate::tuning::{GAMEPLAY_TUNING_FILE, GameplayTuning, PhysicsTweaks, load_gameplay_tuning_from_file};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks the tuning file's modification time for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub path: PathBuf,
    /// Last known modification time
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::new(GAMEPLAY_TUNING_FILE)
    }
}

impl ConfigWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            timer: 0.0,
            tuning_mtime: get_mtime(&path),
            path,
        }
    }

    /// Advance the poll timer; true when a check is due
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer < CHECK_INTERVAL {
            return false;
        }
        self.timer = 0.0;
        true
    }

    /// True when the file's mtime differs from the last one seen
    pub fn file_changed(&mut self) -> bool {
        let mtime = get_mtime(&self.path);
        if mtime == self.tuning_mtime {
            return false;
        }
        self.tuning_mtime = mtime;
        // Deleted file: keep the current tweaks
        mtime.is_some()
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &PathBuf) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check for tuning changes and reload. A file that fails to parse leaves
/// the current tweaks in place.
pub fn check_config_changes(
    time: Res<Time>,
    bus: Res<EventBus>,
    mut watcher: ResMut<ConfigWatcher>,
    mut tweaks: ResMut<PhysicsTweaks>,
    mut logger: ResMut<EventLogger>,
) {
    if !watcher.tick(time.delta_secs()) || !watcher.file_changed() {
        return;
    }

    let path = watcher.path.display().to_string();
    match load_gameplay_tuning_from_file(&path) {
        Ok(tuning) => {
            if tuning.apply_live(&mut tweaks) {
                warn!(
                    "ball_radius {} takes effect after a restart; keeping {}",
                    tuning.ball_radius, tweaks.ball_radius
                );
            }
            let in_effect = GameplayTuning {
                ball_radius: tweaks.ball_radius,
                ..tuning
            };
            logger.log_config(bus.elapsed_ms(), in_effect);
            info!("Auto-reloaded gameplay tuning from {}", path);
        }
        Err(err) => warn!("Tuning reload skipped: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval() {
        let mut watcher = ConfigWatcher::new("does/not/exist.json");
        assert!(!watcher.tick(1.0));
        assert!(watcher.tick(1.5));
        assert_eq!(watcher.timer, 0.0);
    }

    #[test]
    fn test_detects_new_file() {
        let path = std::env::temp_dir().join(format!("hoopshot_tuning_{}.json", uuid::Uuid::new_v4()));
        let mut watcher = ConfigWatcher::new(path.clone());
        assert!(watcher.tuning_mtime.is_none());
        assert!(!watcher.file_changed());

        fs::write(&path, r#"{ "gravity": -12.0 }"#).unwrap();
        assert!(watcher.file_changed());
        assert!(!watcher.file_changed());

        let tuning = load_gameplay_tuning_from_file(&path.display().to_string()).unwrap();
        let mut tweaks = PhysicsTweaks::default();
        tuning.apply_to(&mut tweaks);
        assert_eq!(tweaks.gravity, -12.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reload_keeps_startup_radius() {
        let path = std::env::temp_dir().join(format!("hoopshot_tuning_{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{ "gravity": -11.0, "ball_radius": 0.5 }"#).unwrap();

        let tuning = load_gameplay_tuning_from_file(&path.display().to_string()).unwrap();
        let mut tweaks = PhysicsTweaks::default();
        let startup_radius = tweaks.ball_radius;
        assert!(tuning.apply_live(&mut tweaks));
        assert_eq!(tweaks.gravity, -11.0);
        assert_eq!(tweaks.ball_radius, startup_radius);

        // Same file again: nothing left to warn about for other fields
        let mut same = tuning;
        same.ball_radius = startup_radius;
        assert!(!same.apply_live(&mut tweaks));
        let _ = fs::remove_file(&path);
    }
}
