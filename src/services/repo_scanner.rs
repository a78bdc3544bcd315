use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::constants::{MAX_FILE_SIZE_BYTES, SOURCE_EXTENSIONS};
use crate::structs::file_info::FileInfo;

/// Walks a checkout and admits the Python/TypeScript files worth sending to
/// the model. Inadmissible files (too large, empty, not UTF-8) are logged
/// and skipped; admission is only fatal in single-file mode, which lives in
/// `repository_manager`.
pub struct RepoScanner {
    repo_root: PathBuf,
}

impl RepoScanner {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    fn default_ignore_patterns() -> HashSet<String> {
        [
            ".git/",
            "node_modules/",
            "dist/",
            "build/",
            "coverage/",
            "venv/",
            ".venv/",
            "env/",
            "__pycache__/",
            ".mypy_cache/",
            ".pytest_cache/",
            ".tox/",
            ".eggs/",
            "*.egg-info",
            ".DS_Store",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    fn load_ignore_patterns(&self) -> HashSet<String> {
        let mut patterns = Self::default_ignore_patterns();

        match fs::read_to_string(self.repo_root.join(".gitignore")) {
            Ok(content) => {
                patterns.extend(
                    content
                        .lines()
                        .map(|line| line.trim())
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(|line| line.to_string()),
                );
            }
            Err(_) => {
                log::debug!("No .gitignore found, using built-in ignore patterns only");
            }
        }

        patterns
    }

    pub fn scan_files(&self) -> Vec<FileInfo> {
        let patterns = self.load_ignore_patterns();
        let mut files = Vec::new();
        self.collect_files(&self.repo_root, &patterns, &mut files);
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    fn collect_files(&self, dir: &Path, patterns: &HashSet<String>, files: &mut Vec<FileInfo>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Error reading directory {:?}: {}", dir, e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let relative_path = path
                .strip_prefix(&self.repo_root)
                .map(|rel| rel.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|_| path.to_string_lossy().to_string());

            if self.should_ignore_path(&relative_path, &path, patterns) {
                continue;
            }

            if path.is_dir() {
                self.collect_files(&path, patterns, files);
            } else if path.is_file() && has_source_extension(&path) {
                if let Some(content) = admit_file(&path) {
                    files.push(FileInfo {
                        path: relative_path,
                        content,
                    });
                }
            }
        }
    }

    fn should_ignore_path(&self, relative_path: &str, full_path: &Path, patterns: &HashSet<String>) -> bool {
        let file_name = full_path.file_name().unwrap_or_default().to_string_lossy();

        if patterns.contains(relative_path) || patterns.contains(&*file_name) {
            return true;
        }

        patterns
            .iter()
            .any(|pattern| matches_ignore_pattern(relative_path, &file_name, full_path, pattern))
    }
}

/// Lenient admission for whole-repo scans: size cap, UTF-8, non-empty.
/// Returns the content when the file qualifies.
fn admit_file(path: &Path) -> Option<String> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_FILE_SIZE_BYTES => {
            log::warn!(
                "Skipping {:?}: file size exceeds {} bytes",
                path,
                MAX_FILE_SIZE_BYTES
            );
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("Skipping {:?}: {}", path, e);
            return None;
        }
    }

    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => {
            log::warn!("Skipping {:?}: file is empty", path);
            None
        }
        Ok(content) => Some(content),
        Err(_) => {
            log::warn!("Skipping {:?}: unable to decode file as UTF-8", path);
            None
        }
    }
}

pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn matches_ignore_pattern(relative_path: &str, file_name: &str, full_path: &Path, pattern: &str) -> bool {
    // Directory patterns ending with /
    if let Some(dir_pattern) = pattern.strip_suffix('/') {
        if full_path.is_dir() {
            return matches_glob(relative_path, dir_pattern) || matches_glob(file_name, dir_pattern);
        }
        // A file under an ignored directory
        return relative_path
            .split('/')
            .any(|segment| matches_glob(segment, dir_pattern));
    }

    if pattern.contains('*') {
        return matches_glob(relative_path, pattern) || matches_glob(file_name, pattern);
    }

    relative_path == pattern || file_name == pattern
}

fn matches_glob(text: &str, pattern: &str) -> bool {
    if pattern == "*" || pattern == text {
        return true;
    }

    if let Some(ext) = pattern.strip_prefix("*.") {
        return text.ends_with(&format!(".{}", ext));
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return text.starts_with(prefix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return text.ends_with(suffix);
    }

    if let Some(star_pos) = pattern.find('*') {
        let prefix = &pattern[..star_pos];
        let suffix = &pattern[star_pos + 1..];
        return text.starts_with(prefix)
            && text.ends_with(suffix)
            && text.len() >= prefix.len() + suffix.len();
    }

    false
}
