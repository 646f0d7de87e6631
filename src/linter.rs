//! Mapping linting - static analysis of mapping documents.
//!
//! Checks mapping files for:
//! - JSON syntax errors
//! - Document schema violations
//! - Dangling references between resources, classes, groups and annotations

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::loader::load_document;
use crate::mapping::{ClassDefinition, Mapping};
use crate::strategy::convention_attribute;
use crate::validator::document_errors;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic message from linting.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub file: PathBuf,
    /// JSON path to the issue (e.g., "/classes/Article/groups/title")
    pub path: String,
    pub message: String,
}

/// Result of linting a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub file: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// Status of a linted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Error,
    Warning,
}

/// Result of linting a directory or set of files.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub path: PathBuf,
    pub files_checked: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub results: Vec<FileResult>,
}

impl LintResult {
    /// Returns true if no file produced an error.
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }
}

/// Lint a file or directory.
///
/// If path is a directory, recursively finds all .json files.
/// If `strict` is true, files with warnings count as failed.
pub fn lint(path: &Path, strict: bool) -> LintResult {
    let files = collect_mapping_files(path);
    let results: Vec<FileResult> = files.iter().map(|file| lint_file(file, path)).collect();

    let count = |severity: Severity| {
        results
            .iter()
            .flat_map(|r| &r.diagnostics)
            .filter(|d| d.severity == severity)
            .count()
    };
    let errors = count(Severity::Error);
    let warnings = count(Severity::Warning);

    let failed = results
        .iter()
        .filter(|r| match r.status {
            FileStatus::Ok => false,
            FileStatus::Warning => strict,
            FileStatus::Error => true,
        })
        .count();

    debug!(path = %path.display(), files = files.len(), errors, warnings, "lint finished");

    LintResult {
        path: path.to_path_buf(),
        files_checked: files.len(),
        passed: files.len() - failed,
        failed,
        errors,
        warnings,
        results,
    }
}

/// Lint a single mapping file.
///
/// The reported file path is relative to `base_path` when possible.
pub fn lint_file(file: &Path, base_path: &Path) -> FileResult {
    let display = file.strip_prefix(base_path).unwrap_or(file).to_path_buf();
    let mut diagnostics = Diagnostics {
        file: file.to_path_buf(),
        items: Vec::new(),
    };

    let document = match load_document(file) {
        Ok(document) => document,
        Err(e) => {
            diagnostics.error("E001", "/", format!("syntax error: {}", e));
            return diagnostics.finish(display);
        }
    };

    let violations = document_errors(&document);
    if !violations.is_empty() {
        for violation in violations {
            let path = if violation.path.is_empty() {
                "/".to_string()
            } else {
                violation.path
            };
            diagnostics.error("E002", path, violation.message);
        }
        return diagnostics.finish(display);
    }

    match serde_json::from_value::<Mapping>(document) {
        Ok(mapping) => check_references(&mapping, &mut diagnostics),
        Err(e) => diagnostics.error("E002", "/", format!("invalid mapping document: {}", e)),
    }

    diagnostics.finish(display)
}

struct Diagnostics {
    file: PathBuf,
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    fn push(&mut self, severity: Severity, code: &str, path: impl Into<String>, message: String) {
        self.items.push(Diagnostic {
            severity,
            code: code.to_string(),
            file: self.file.clone(),
            path: path.into(),
            message,
        });
    }

    fn error(&mut self, code: &str, path: impl Into<String>, message: String) {
        self.push(Severity::Error, code, path, message);
    }

    fn warning(&mut self, code: &str, path: impl Into<String>, message: String) {
        self.push(Severity::Warning, code, path, message);
    }

    fn finish(self, file: PathBuf) -> FileResult {
        let has_errors = self.items.iter().any(|d| d.severity == Severity::Error);
        let status = if has_errors {
            FileStatus::Error
        } else if !self.items.is_empty() {
            FileStatus::Warning
        } else {
            FileStatus::Ok
        };

        FileResult {
            file,
            status,
            diagnostics: self.items,
        }
    }
}

fn check_references(mapping: &Mapping, diagnostics: &mut Diagnostics) {
    for class in mapping.resources.keys() {
        if !mapping.classes.contains_key(class) {
            diagnostics.warning(
                "W001",
                format!("/resources/{}", escape_pointer(class)),
                format!("resource registered for undefined class \"{}\"", class),
            );
        }
    }

    for (class, attribute, referenced) in mapping.referenced_classes() {
        if !mapping.classes.contains_key(referenced) {
            diagnostics.warning(
                "W003",
                format!(
                    "/classes/{}/attributes/{}/types",
                    escape_pointer(class),
                    escape_pointer(attribute)
                ),
                format!("type references undefined class \"{}\"", referenced),
            );
        }
    }

    for (class, definition) in &mapping.classes {
        let declared = declared_attributes(definition);
        let class_path = format!("/classes/{}", escape_pointer(class));

        for attribute in definition.groups.iter().flat_map(|groups| groups.keys()) {
            if !declared.contains(attribute.as_str()) {
                diagnostics.warning(
                    "W002",
                    format!("{}/groups/{}", class_path, escape_pointer(attribute)),
                    format!("group entry for undeclared attribute \"{}\"", attribute),
                );
            }
        }

        let annotated = definition
            .annotations
            .iter()
            .flat_map(|annotations| annotations.attributes.keys());
        for attribute in annotated {
            if !declared.contains(attribute.as_str()) {
                diagnostics.warning(
                    "W004",
                    format!(
                        "{}/annotations/attributes/{}",
                        class_path,
                        escape_pointer(attribute)
                    ),
                    format!("annotation for undeclared attribute \"{}\"", attribute),
                );
            }
        }
    }
}

/// Attributes a class declares directly or exposes through accessor conventions.
fn declared_attributes(definition: &ClassDefinition) -> BTreeSet<String> {
    definition
        .attributes
        .keys()
        .cloned()
        .chain(definition.methods.iter().filter_map(convention_attribute))
        .collect()
}

/// Escape a map key for use as a JSON Pointer segment.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Collect all .json files in a path (file or directory).
fn collect_mapping_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            return vec![path.to_path_buf()];
        }
        return vec![];
    }

    let mut files = Vec::new();
    collect_files_recursive(path, &mut files);
    files.sort();
    files
}

fn collect_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files_recursive(&path, files);
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            files.push(path);
        }
    }
}
