//! Marquee Style Consistency Enforcement
//!
//! Walks every crate's `src/` tree and fails on structural problems that
//! reviewers kept flagging by hand.

use std::fs;
use std::path::{Path, PathBuf};

/// Module size limit
const MAX_MODULE_LINES: usize = 500;

/// Anti-pattern module names
const BANNED_MODULE_NAMES: &[&str] = &[
    "utils", "util", "helpers", "helper", "common", "shared", "misc", "tools",
];

const WORKSPACE_CRATES: &[&str] = &["marquee-core", "marquee-web", "marquee-search", "marquee-cli"];

#[derive(Debug)]
struct StyleViolation {
    file: String,
    line: usize,
    rule: &'static str,
    message: String,
}

struct StyleChecker {
    violations: Vec<StyleViolation>,
}

impl StyleChecker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    fn check_file(&mut self, file_path: &Path) -> Result<(), std::io::Error> {
        let content = fs::read_to_string(file_path)?;
        let lines: Vec<&str> = content.lines().collect();

        self.check_module_size(file_path, &lines);
        self.check_banned_module_names(file_path);
        self.check_production_unwraps(file_path, &lines);

        Ok(())
    }

    fn add_violation(&mut self, file: &Path, line: usize, rule: &'static str, message: String) {
        self.violations.push(StyleViolation {
            file: file.to_string_lossy().to_string(),
            line,
            rule,
            message,
        });
    }

    fn check_module_size(&mut self, file: &Path, lines: &[&str]) {
        if lines.len() > MAX_MODULE_LINES {
            self.add_violation(
                file,
                1,
                "MODULE_SIZE_LIMIT",
                format!(
                    "Module has {} lines, exceeding {MAX_MODULE_LINES} line limit",
                    lines.len()
                ),
            );
        }
    }

    fn check_banned_module_names(&mut self, file: &Path) {
        let Some(stem) = file.file_stem().and_then(|s| s.to_str()) else {
            return;
        };
        if BANNED_MODULE_NAMES.contains(&stem) {
            self.add_violation(
                file,
                1,
                "BANNED_MODULE_NAME",
                format!("Module name '{stem}' says nothing about its contents"),
            );
        }
    }

    /// Production code propagates errors; only the trailing test module may unwrap.
    fn check_production_unwraps(&mut self, file: &Path, lines: &[&str]) {
        for (index, line) in lines.iter().enumerate() {
            let is_test_module_start = line.trim() == "#[cfg(test)]"
                && lines
                    .get(index + 1)
                    .is_some_and(|next| next.trim_start().starts_with("mod tests"));
            if is_test_module_start {
                return;
            }

            let code = line.split("//").next().unwrap_or("");
            if code.contains(".unwrap()") || code.contains(".expect(") {
                self.add_violation(
                    file,
                    index + 1,
                    "UNWRAP_IN_PRODUCTION",
                    "Use `?` or an explicit fallback outside tests".to_string(),
                );
            }
        }
    }
}

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

/// Collect all Rust source files in the workspace crates
fn collect_workspace_files() -> Vec<PathBuf> {
    let root = workspace_root();
    let mut files = Vec::new();

    for crate_name in WORKSPACE_CRATES {
        let src_path = root.join(crate_name).join("src");
        if src_path.exists() {
            collect_rust_files_in_dir(&src_path, &mut files);
        }
    }

    files.sort();
    files
}

fn collect_rust_files_in_dir(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            } else if path.is_dir() {
                collect_rust_files_in_dir(&path, files);
            }
        }
    }
}

#[test]
fn enforce_marquee_style_consistency() {
    let files = collect_workspace_files();
    assert!(!files.is_empty(), "no workspace sources found");

    let mut checker = StyleChecker::new();
    for file_path in &files {
        if let Err(e) = checker.check_file(file_path) {
            eprintln!("Failed to check {}: {e}", file_path.display());
        }
    }

    for violation in &checker.violations {
        println!(
            "[{}] {}:{} - {}",
            violation.rule, violation.file, violation.line, violation.message
        );
    }

    println!("\n--- Marquee Style Consistency Summary ---");
    println!("Files analyzed: {}", files.len());
    println!("Violations: {}", checker.violations.len());

    assert!(
        checker.violations.is_empty(),
        "Found {} style violations that must be fixed",
        checker.violations.len()
    );
}

#[test]
fn test_checker_flags_unwrap_outside_tests_only() {
    let mut checker = StyleChecker::new();
    let lines = [
        "fn parse() -> u8 {",
        "    \"1\".parse().unwrap()",
        "}",
        "#[cfg(test)]",
        "mod tests {",
        "    fn t() { Some(1).unwrap(); }",
        "}",
    ];

    checker.check_production_unwraps(Path::new("lib.rs"), &lines);

    assert_eq!(checker.violations.len(), 1);
    assert_eq!(checker.violations[0].line, 2);
}
