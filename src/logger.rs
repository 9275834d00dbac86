use indicatif::{ProgressBar, ProgressStyle};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::record::TrackedRecord;
use crate::sources::SourceOutcome;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum VerbosityLevel {
    Silent = 0,   // Only the progress bar and final summaries
    Summary = 1,  // High-level pipeline progress (default)
    Detailed = 2, // Per-source results and warnings
    Debug = 3,    // Everything, including per-request detail
}

impl VerbosityLevel {
    pub fn from_verbose_count(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Summary,
            1 => VerbosityLevel::Detailed,
            2.. => VerbosityLevel::Debug,
        }
    }
}

/// User-facing status logger for the tracking pipeline.
///
/// Emits timestamped leveled lines, buffers them for optional export to a
/// log file, and manages the progress bar shown during live polling.
#[derive(Clone)]
pub struct StatusLogger {
    verbosity: VerbosityLevel,
    progress_bar: Arc<RwLock<Option<ProgressBar>>>,
    log_buffer: Arc<Mutex<Vec<String>>>,
    log_file_path: Option<String>,
}

impl StatusLogger {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            progress_bar: Arc::new(RwLock::new(None)),
            log_buffer: Arc::new(Mutex::new(Vec::new())),
            log_file_path: None,
        }
    }

    pub fn with_log_file(verbosity: VerbosityLevel, log_file_path: String) -> Self {
        Self {
            verbosity,
            progress_bar: Arc::new(RwLock::new(None)),
            log_buffer: Arc::new(Mutex::new(Vec::new())),
            log_file_path: Some(log_file_path),
        }
    }

    pub fn info(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Summary {
            self.print_message("INFO", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Detailed {
            self.print_message("WARN", message);
        }
    }

    pub fn error(&self, message: &str) {
        // Errors are always shown regardless of verbosity
        self.print_message("ERROR", message);
    }

    pub fn debug(&self, message: &str) {
        if self.verbosity >= VerbosityLevel::Debug {
            self.print_message("DEBUG", message);
        }
    }

    fn print_message(&self, level: &str, message: &str) {
        let msg = format!("[{}] {}: {}", self.timestamp(), level, message);

        if self.log_file_path.is_some() {
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg.clone());
            }
        }

        // Route through the progress bar when one is active so lines do
        // not tear the bar apart
        if let Ok(guard) = self.progress_bar.try_read() {
            if let Some(pb) = guard.as_ref() {
                pb.println(msg);
                return;
            }
        }

        eprintln!("{}", msg);
    }

    fn timestamp(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let secs = now.as_secs();
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            (secs / 3600) % 24,
            (secs % 3600) / 60,
            secs % 60,
            now.subsec_millis()
        )
    }

    // Progress bar management for the live-polling loop

    pub async fn start_progress(&self, total_ticks: u64) {
        let pb = ProgressBar::new(total_ticks);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] tick {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        pb.set_message("polling live location...");

        let mut guard = self.progress_bar.write().await;
        *guard = Some(pb);
    }

    pub async fn advance_progress(&self, message: &str) {
        if let Some(pb) = self.progress_bar.read().await.as_ref() {
            pb.inc(1);
            pb.set_message(message.to_string());
        }
    }

    pub async fn finish_progress(&self, final_message: &str) {
        let mut guard = self.progress_bar.write().await;
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
        if self.verbosity >= VerbosityLevel::Summary {
            self.print_message("INFO", final_message);
        }
    }

    // Specialized helpers per pipeline phase

    pub fn log_track_start(&self, display: &str) {
        self.info(&format!("Attempting to track the location of {}...", display));
    }

    pub fn log_source_result<T>(&self, source: &str, outcome: &SourceOutcome<T>, detail: &str) {
        match outcome {
            SourceOutcome::Found(_) => self.info(&format!("{}: {}", source, detail)),
            SourceOutcome::Unavailable => {
                self.warn(&format!("{}: source unavailable, continuing without it", source))
            }
            SourceOutcome::Unconfigured => {
                self.info(&format!("{}: no credential configured, skipped", source))
            }
        }
    }

    pub fn log_geocode_result(&self, region: Option<&str>, coords: Option<&str>) {
        match (region, coords) {
            (Some(region), Some(coords)) => {
                self.info(&format!("Approximate location '{}' resolved to {}", region, coords))
            }
            (Some(region), None) => {
                self.warn(&format!("Could not get coordinates for region '{}'", region))
            }
            (None, _) => self.info("Region unknown, geocoding skipped"),
        }
    }

    pub fn log_render_success(&self, path: &str) {
        self.info(&format!("See the map at: {}", path));
    }

    pub fn log_poll_tick(&self, tick: u32, coords: &str) {
        self.debug(&format!("tick {}: live location {}", tick, coords));
    }

    /// Field-by-field summary of a freshly tracked record.
    pub fn print_track_summary(&self, record: &TrackedRecord) {
        println!("\n=== TRACKING SUMMARY ===");
        println!("Number: {}", record.identifier.display());
        if record.timezones.is_empty() {
            println!("Time Zones: Unknown");
        } else {
            println!("Time Zones: {}", record.timezones.join(", "));
        }
        println!("Region: {}", record.region_display());
        println!("Service Provider: {}", record.carrier_display());
        if record.social_profiles.is_empty() {
            println!("Social Profiles: none");
        } else {
            for profile in &record.social_profiles {
                println!("Social Profile: {}", profile);
            }
        }
        if record.associated_numbers.is_empty() {
            println!("Associated Numbers: none");
        } else {
            for number in &record.associated_numbers {
                println!("Associated Number: {}", number);
            }
        }
        println!("Last Network Tower: {}", record.last_tower_display());
        println!("Profile Photo URL: {}", record.photo_url_display());
        match &record.coordinates {
            Some(coords) => println!("Coordinates: {}", coords),
            None => println!("Coordinates: unavailable"),
        }
        println!("========================\n");
    }

    /// Export all buffered lines to the configured log file.
    pub fn export_logs(&self) -> std::io::Result<()> {
        if let Some(ref log_file_path) = self.log_file_path {
            if let Ok(buffer) = self.log_buffer.lock() {
                if let Some(parent) = Path::new(log_file_path).parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let mut file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(log_file_path)?;
                for entry in buffer.iter() {
                    writeln!(file, "{}", entry)?;
                }
                file.flush()?;
            }
        }
        Ok(())
    }

    pub fn is_log_export_enabled(&self) -> bool {
        self.log_file_path.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(VerbosityLevel::from_verbose_count(0), VerbosityLevel::Summary);
        assert_eq!(VerbosityLevel::from_verbose_count(1), VerbosityLevel::Detailed);
        assert_eq!(VerbosityLevel::from_verbose_count(2), VerbosityLevel::Debug);
        assert_eq!(VerbosityLevel::from_verbose_count(9), VerbosityLevel::Debug);
    }

    #[test]
    fn test_log_export_writes_buffered_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numintel.log");
        let logger = StatusLogger::with_log_file(
            VerbosityLevel::Summary,
            path.to_string_lossy().to_string(),
        );
        logger.info("first line");
        logger.error("second line");
        logger.export_logs().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first line"));
        assert!(contents.contains("second line"));
    }
}
