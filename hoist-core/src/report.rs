//! Performance-audit report parsing and directory loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::FileSystem;

/// File name suffix that marks a file as an audit report.
pub const REPORT_SUFFIX: &str = ".report.json";

/// Score entry for one audit category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    /// Raw score in the `[0, 1]` range.
    pub score: f64,
}

/// The slice of an audit report this tool consumes.
///
/// Real report files carry far more data; unknown fields are ignored during
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// URL the audit finally resolved to, when recorded.
    pub final_url: Option<String>,
    /// Category scores keyed by category label.
    pub categories: Option<BTreeMap<String, CategoryScore>>,
}

/// A report file that parsed and carries category scores.
#[derive(Debug, Clone)]
pub struct ReportFile {
    /// Path the report was read from.
    pub path: PathBuf,
    /// File name component of [`ReportFile::path`].
    pub file_name: String,
    /// URL the audit finally resolved to, when recorded.
    pub final_url: Option<String>,
    /// Category scores keyed by category label.
    pub categories: BTreeMap<String, CategoryScore>,
}

/// Everything found in one pass over the reports directory.
#[derive(Debug, Default)]
pub struct ReportBatch {
    /// Usable reports, ordered by file name.
    pub reports: Vec<ReportFile>,
    /// File names of reports that parsed but carry no `categories` field.
    pub invalid: Vec<String>,
}

impl ReportBatch {
    /// True when the directory held no report files at all.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty() && self.invalid.is_empty()
    }
}

/// True when `path` names an audit report file.
pub fn is_report_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(REPORT_SUFFIX))
}

/// Load every report file directly inside `dir`.
///
/// All matching files are parsed before any is returned, so a malformed
/// report fails the whole batch. Reports without a `categories` field are
/// collected into [`ReportBatch::invalid`] instead of failing.
pub fn load_reports<F: FileSystem>(fs: &F, dir: &Path) -> Result<ReportBatch> {
    let mut paths: Vec<PathBuf> = fs
        .list_dir(dir)?
        .into_iter()
        .filter(|path| is_report_file(path))
        .collect();
    paths.sort();

    let mut batch = ReportBatch::default();
    for path in paths {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let contents = fs.read_to_string(&path)?;
        let report: AuditReport = serde_json::from_str(&contents)?;
        let Some(categories) = report.categories else {
            batch.invalid.push(file_name);
            continue;
        };
        batch.reports.push(ReportFile {
            path,
            file_name,
            final_url: report.final_url,
            categories,
        });
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::{AuditReport, is_report_file, load_reports};
    use crate::error::HoistError;
    use crate::fs::MockFileSystem;
    use std::path::{Path, PathBuf};

    const HOME_REPORT: &str = r#"{
        "finalUrl": "https://app.example.com/",
        "categories": {
            "performance": { "score": 0.93 },
            "seo": { "score": 0.42 }
        }
    }"#;

    #[test]
    fn audit_report_parses_camel_case_fields() {
        let report: AuditReport = serde_json::from_str(HOME_REPORT).expect("parse report");
        assert_eq!(report.final_url.as_deref(), Some("https://app.example.com/"));
        let categories = report.categories.expect("categories present");
        assert_eq!(categories["performance"].score, 0.93);
    }

    #[test]
    fn audit_report_tolerates_extra_fields() {
        let raw = r#"{"finalUrl":"https://a.com/x","categories":{},"auditVersion":"11.0"}"#;
        let report: AuditReport = serde_json::from_str(raw).expect("parse report");
        assert_eq!(report.final_url.as_deref(), Some("https://a.com/x"));
    }

    #[test]
    fn is_report_file_matches_suffix_only() {
        assert!(is_report_file(Path::new("/tmp/home.report.json")));
        assert!(!is_report_file(Path::new("/tmp/home.report.json.bak")));
        assert!(!is_report_file(Path::new("/tmp/notes.txt")));
    }

    #[test]
    fn load_reports_filters_and_orders_by_file_name() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_dir().returning(|_| {
            Ok(vec![
                PathBuf::from("/reports/b.report.json"),
                PathBuf::from("/reports/notes.txt"),
                PathBuf::from("/reports/a.report.json"),
            ])
        });
        fs.expect_read_to_string()
            .returning(|_| Ok(String::from(r#"{"categories":{}}"#)));

        let batch = load_reports(&fs, Path::new("/reports")).expect("load reports");
        let names: Vec<&str> = batch
            .reports
            .iter()
            .map(|report| report.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.report.json", "b.report.json"]);
        assert!(batch.invalid.is_empty());
    }

    #[test]
    fn load_reports_collects_reports_without_categories() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_dir().returning(|_| {
            Ok(vec![
                PathBuf::from("/reports/bad.report.json"),
                PathBuf::from("/reports/good.report.json"),
            ])
        });
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/reports/bad.report.json"))
            .returning(|_| Ok(String::from(r#"{"finalUrl":"https://a.com/"}"#)));
        fs.expect_read_to_string()
            .withf(|path| path == Path::new("/reports/good.report.json"))
            .returning(|_| Ok(String::from(HOME_REPORT)));

        let batch = load_reports(&fs, Path::new("/reports")).expect("load reports");
        assert_eq!(batch.invalid, vec![String::from("bad.report.json")]);
        assert_eq!(batch.reports.len(), 1);
        assert_eq!(batch.reports[0].file_name, "good.report.json");
        assert!(!batch.is_empty());
    }

    #[test]
    fn load_reports_fails_on_malformed_json() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_dir()
            .returning(|_| Ok(vec![PathBuf::from("/reports/broken.report.json")]));
        fs.expect_read_to_string()
            .returning(|_| Ok(String::from("{ not json")));

        let err = load_reports(&fs, Path::new("/reports")).unwrap_err();
        assert!(matches!(err, HoistError::Json(_)));
    }

    #[test]
    fn load_reports_on_empty_directory_is_empty() {
        let mut fs = MockFileSystem::new();
        fs.expect_list_dir().returning(|_| Ok(Vec::new()));

        let batch = load_reports(&fs, Path::new("/reports")).expect("load reports");
        assert!(batch.is_empty());
    }
}
