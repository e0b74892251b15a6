//! Progress reporting utilities using indicatif.
//!
//! The pipeline reports through the [`ProgressCallback`] trait. [`Progress`]
//! implements it with one terminal bar per phase, drawn on stderr so that
//! reports written to stdout stay clean.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytesize::ByteSize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Progress callback for duplicate finding phases.
///
/// Implement this trait to receive progress updates during
/// the duplicate detection pipeline. Phases are reported in order:
/// `"scanning"` (once per root), `"prehash"`, `"fullhash"`, `"verify"`.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "prehash", "fullhash")
    /// * `total` - Total number of items to process, or 0 if unknown
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called for each item processed.
    ///
    /// Hashing and verification run in parallel, so `current` values may
    /// arrive out of order.
    ///
    /// # Arguments
    ///
    /// * `current` - Current item number (1-based)
    /// * `path` - Path being processed
    fn on_progress(&self, current: usize, path: &str);

    /// Called when a file has been hashed, with the bytes read.
    fn on_item_completed(&self, _bytes: u64) {}

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);

    /// Called to update the progress message.
    fn on_message(&self, _message: &str) {}
}

/// Progress reporter using indicatif.
pub struct Progress {
    active: Mutex<Option<ProgressBar>>,
    bytes_read: AtomicU64,
    prefix: Mutex<String>,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// Callers that want no bars simply do not install one.
    ///
    /// # Examples
    ///
    /// ```
    /// use crossdupe::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
            bytes_read: AtomicU64::new(0),
            prefix: Mutex::new(String::new()),
        }
    }

    fn active(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scanning_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn bar_style(color: &str) -> ProgressStyle {
        let template = format!(
            "[{{elapsed_precise}}] [{{bar:40.{color}/blue}}] {{pos}}/{{len}} ({{percent}}%) {{msg}} (ETA: {{eta}})"
        );
        ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█>-")
    }

    fn new_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        let pb = match phase {
            "scanning" => {
                let pb = ProgressBar::new_spinner();
                pb.set_draw_target(ProgressDrawTarget::stderr());
                pb.set_style(Self::scanning_style());
                pb.set_message("Scanning");
                pb.enable_steady_tick(Duration::from_millis(100));
                pb
            }
            "prehash" => {
                let pb = self.new_bar(total);
                pb.set_style(Self::bar_style("cyan"));
                pb.set_message("Prehashing");
                pb
            }
            "fullhash" => {
                self.bytes_read.store(0, Ordering::Relaxed);
                let pb = self.new_bar(total);
                pb.set_style(Self::bar_style("green"));
                pb.set_message("Full hashing");
                pb
            }
            "verify" => {
                let pb = self.new_bar(total);
                pb.set_style(Self::bar_style("yellow"));
                pb.set_message("Verifying");
                pb
            }
            other => {
                let pb = self.new_bar(total);
                pb.set_style(Self::bar_style("white"));
                pb.set_message(other.to_string());
                pb
            }
        };

        if let Some(previous) = self.active().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        let prefix = self.prefix.lock().unwrap_or_else(PoisonError::into_inner);
        let display_msg = if prefix.is_empty() {
            truncate_path(path, 30)
        } else {
            format!("{}: {}", *prefix, truncate_path(path, 30))
        };

        if let Some(ref pb) = *self.active() {
            if pb.length().is_some() {
                pb.inc(1);
            } else {
                pb.set_position(current as u64);
            }
            pb.set_message(display_msg);
        }
    }

    fn on_item_completed(&self, bytes: u64) {
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
    }

    fn on_phase_end(&self, phase: &str) {
        self.prefix
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let message = match phase {
            "scanning" => "Scanning complete".to_string(),
            "prehash" => "Prehashing complete".to_string(),
            "fullhash" => format!(
                "Full hashing complete ({} read)",
                ByteSize::b(self.bytes_read.load(Ordering::Relaxed))
            ),
            "verify" => "Verification complete".to_string(),
            other => format!("{other} complete"),
        };

        if let Some(pb) = self.active().take() {
            pb.finish_with_message(message);
        }
    }

    fn on_message(&self, message: &str) {
        *self.prefix.lock().unwrap_or_else(PoisonError::into_inner) = message.to_string();

        if let Some(ref pb) = *self.active() {
            pb.set_message(message.to_string());
        }
    }
}

/// Truncate a path for display in the progress bar.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
