use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::config::constants::MAX_FILE_SIZE_BYTES;
use crate::errors::{PredguardError, PredguardResult};
use crate::services::repo_scanner::{has_source_extension, RepoScanner};
use crate::structs::file_info::FileInfo;

/// Source acquisition: clones remote repositories into a temporary
/// directory and applies the strict admission rules for single-file runs.
pub struct RepositoryManager;

impl RepositoryManager {
    /// Shallow-clones `repo_url` under a fresh temp dir. The returned
    /// `TempDir` owns the checkout; dropping it removes the clone.
    pub fn clone_repository(repo_url: &str) -> PredguardResult<(TempDir, PathBuf)> {
        let temp_dir = TempDir::new().map_err(|e| {
            PredguardError::repo_error(repo_url, "workspace setup", &e.to_string())
        })?;

        let repo_name = Self::repo_name_from_url(repo_url);
        let clone_path = temp_dir.path().join(&repo_name);

        log::info!("📥 Cloning {} ...", repo_url);

        let output = Command::new("git")
            .args(["clone", "--depth", "1", repo_url])
            .arg(&clone_path)
            .output()
            .map_err(|e| PredguardError::repo_error(repo_url, "clone", &e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PredguardError::repo_error(repo_url, "clone", stderr.trim()));
        }

        Ok((temp_dir, clone_path))
    }

    pub fn repo_name_from_url(repo_url: &str) -> String {
        let trimmed = repo_url.trim_end_matches('/');
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() {
            "repository".to_string()
        } else {
            name.to_string()
        }
    }

    /// Collects the sources for a cloned repository. `specific_file`
    /// narrows the run to one repo-relative path, with strict admission.
    pub fn gather_repository_sources(
        repo_root: &Path,
        specific_file: Option<&str>,
    ) -> PredguardResult<Vec<FileInfo>> {
        match specific_file {
            Some(rel_path) => {
                let full_path = repo_root.join(rel_path);
                if !full_path.exists() {
                    return Err(PredguardError::file_error(
                        rel_path,
                        "lookup",
                        "file not found in repository",
                    ));
                }
                let content = Self::admit_strict(&full_path, rel_path)?;
                Ok(vec![FileInfo {
                    path: rel_path.to_string(),
                    content,
                }])
            }
            None => Ok(RepoScanner::new(repo_root).scan_files()),
        }
    }

    /// Reads one local file with the strict admission rules.
    pub fn read_local_file(file_path: &str) -> PredguardResult<FileInfo> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(PredguardError::file_error(
                file_path,
                "lookup",
                "local file not found",
            ));
        }
        let content = Self::admit_strict(path, file_path)?;
        Ok(FileInfo {
            path: file_path.to_string(),
            content,
        })
    }

    fn admit_strict(path: &Path, display_path: &str) -> PredguardResult<String> {
        if !has_source_extension(path) {
            return Err(PredguardError::file_error(
                display_path,
                "admission",
                "must be a .py or .ts file",
            ));
        }

        let metadata = fs::metadata(path)
            .map_err(|e| PredguardError::file_error(display_path, "stat", &e.to_string()))?;
        if metadata.len() > MAX_FILE_SIZE_BYTES {
            return Err(PredguardError::file_error(
                display_path,
                "admission",
                &format!("exceeds size limit of {} bytes", MAX_FILE_SIZE_BYTES),
            ));
        }

        let content = fs::read_to_string(path).map_err(|_| {
            PredguardError::file_error(display_path, "read", "unable to decode file as UTF-8")
        })?;
        if content.trim().is_empty() {
            return Err(PredguardError::file_error(
                display_path,
                "admission",
                "file is empty",
            ));
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn derives_repo_name_from_url() {
        assert_eq!(
            RepositoryManager::repo_name_from_url("https://github.com/user/repo.git"),
            "repo"
        );
        assert_eq!(
            RepositoryManager::repo_name_from_url("https://github.com/user/repo"),
            "repo"
        );
        assert_eq!(
            RepositoryManager::repo_name_from_url("https://github.com/user/repo/"),
            "repo"
        );
    }

    #[test]
    fn rejects_non_source_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let err = RepositoryManager::read_local_file(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains(".py or .ts"));
    }

    #[test]
    fn rejects_empty_and_missing_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.py");
        fs::File::create(&path).unwrap().write_all(b"  \n").unwrap();

        assert!(RepositoryManager::read_local_file(path.to_str().unwrap()).is_err());
        assert!(RepositoryManager::read_local_file("no/such/file.py").is_err());
    }

    #[test]
    fn gathers_a_specific_file_from_a_checkout() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("pkg");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("guards.py"), "def ok() -> bool:\n    return True\n").unwrap();

        let files =
            RepositoryManager::gather_repository_sources(dir.path(), Some("pkg/guards.py"))
                .unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "pkg/guards.py");

        assert!(
            RepositoryManager::gather_repository_sources(dir.path(), Some("pkg/missing.py"))
                .is_err()
        );
    }
}
