/// Soft Backend Validation - tracks strict-check findings with colored reporting
///
/// When validation is enabled in the device Config, the soft device performs
/// strict resource checks and counts what it finds here. The counters are
/// process-wide so a test run or demo shutdown can print one summary report.

use colored::*;
use std::sync::atomic::{AtomicU32, Ordering};

/// Validation statistics counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationStats {
    /// Checks that rejected an operation
    pub errors: u32,
    /// Suspicious but allowed operations
    pub warnings: u32,
}

impl ValidationStats {
    /// Total number of validation messages
    pub fn total(&self) -> u32 {
        self.errors + self.warnings
    }
}

/// Thread-safe validation statistics tracker
struct ValidationStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
}

impl ValidationStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
        }
    }

    fn increment_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn increment_warning(&self) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> ValidationStats {
        ValidationStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
    }
}

/// Global validation statistics (thread-safe atomic counters)
static VALIDATION_STATS: ValidationStatsTracker = ValidationStatsTracker::new();

/// Record a rejected operation (called by the soft device when a strict check fails)
pub(crate) fn record_error() {
    VALIDATION_STATS.increment_error();
}

/// Record a suspicious but allowed operation
pub(crate) fn record_warning() {
    VALIDATION_STATS.increment_warning();
}

/// Get current validation statistics
pub fn get_validation_stats() -> ValidationStats {
    VALIDATION_STATS.get_stats()
}

/// Reset validation statistics to zero
pub fn reset_validation_stats() {
    VALIDATION_STATS.reset();
}

/// Print validation statistics report
pub fn print_validation_stats_report() {
    let stats = get_validation_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No validation messages".green().bold());
        return;
    }

    println!("\n{}", "=== Validation Statistics Report ===".bright_blue().bold());

    if stats.errors > 0 {
        println!("  {} {}", "Errors:".red().bold(), stats.errors);
    }
    if stats.warnings > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), stats.warnings);
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());
    println!("{}\n", "====================================".bright_blue().bold());
}
