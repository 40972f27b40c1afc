#![deny(missing_docs)]
//! Core library for Hoist.
//!
//! Turns performance-audit report files into score badges: report parsing
//! and loading, percentage extraction, color tier classification, badge
//! rendering, and destination key derivation for uploads.

pub mod badge;
pub mod error;
pub mod fs;
pub mod keys;
pub mod report;
pub mod score;

pub use badge::{badge_file_name, render_badge};
pub use error::{HoistError, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use keys::{badge_key, report_key, url_path};
pub use report::{
    AuditReport, CategoryScore, REPORT_SUFFIX, ReportBatch, ReportFile, is_report_file,
    load_reports,
};
pub use score::{Tier, percentage, status_text};
