//! Glob-style input file discovery.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ConsolidationError, Result};

/// Find the input files matching `pattern` under `root`.
///
/// `pattern` is a '/'-separated relative glob; `*` and `?` match within a
/// single path component. Results are lexicographically sorted, which for
/// forecast output corresponds to ascending lead time. A missing root or
/// an unmatched pattern yields an empty list — the caller decides whether
/// that is fatal.
pub fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() || !root.exists() {
        return Ok(Vec::new());
    }

    let depth = segments.len();
    let mut matches = Vec::new();
    for entry in WalkDir::new(root).min_depth(depth).max_depth(depth) {
        let entry = entry.map_err(|e| ConsolidationError::Discovery(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let components: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if components.len() != segments.len() {
            continue;
        }

        if components
            .iter()
            .zip(&segments)
            .all(|(name, pat)| glob_match(pat, name))
        {
            matches.push(entry.into_path());
        }
    }

    matches.sort();
    debug!(root = %root.display(), pattern = %pattern, count = matches.len(), "discovered input files");
    Ok(matches)
}

/// Match a single path component against a pattern with `*`/`?`
/// wildcards.
fn glob_match(pattern: &str, name: &str) -> bool {
    let p = pattern.as_bytes();
    let n = name.as_bytes();
    let (mut pi, mut ni) = (0usize, 0usize);
    let mut star: Option<usize> = None;
    let mut mark = 0usize;

    while ni < n.len() {
        if pi < p.len() && (p[pi] == b'?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == b'*' {
            star = Some(pi);
            mark = ni;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ni = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == b'*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.grib2", "gfswave.t00z.f000.grib2"));
        assert!(glob_match("gfs.*", "gfs.20240101"));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("f???", "f024"));
        assert!(!glob_match("*.grib2", "file.grib2.idx"));
        assert!(!glob_match("f???", "f0024"));
        assert!(!glob_match("exact", "other"));
    }

    #[test]
    fn test_discover_sorted_matches() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let dir = temp_dir.path().join("gfs.20240101/00/wave/gridded");
        std::fs::create_dir_all(&dir).expect("mkdir");
        for name in ["f006.grib2", "f000.grib2", "f003.grib2", "f000.grib2.idx"] {
            std::fs::write(dir.join(name), b"").expect("write");
        }

        let files = discover_files(
            temp_dir.path(),
            "gfs.20240101/00/wave/gridded/*.grib2",
        )
        .expect("discover");

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        assert_eq!(
            names,
            vec![
                Some("f000.grib2".to_string()),
                Some("f003.grib2".to_string()),
                Some("f006.grib2".to_string())
            ]
        );
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let files = discover_files(Path::new("/nonexistent/root"), "gfs.*/x/*.grib2")
            .expect("discover");
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_unmatched_pattern_is_empty() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let files = discover_files(temp_dir.path(), "gfs.19990101/00/wave/gridded/*.grib2")
            .expect("discover");
        assert!(files.is_empty());
    }
}
