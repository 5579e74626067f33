use std::{
    collections::BTreeMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Find source files under `root`.
///
/// Directories whose name equals one of `skip_folders` are pruned (full segment
/// match below `root`, never a prefix match). Files are kept when their name ends
/// with one of `extensions`. Returned paths are `root` joined with the relative
/// path, sorted.
pub fn find_source_files<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    skip_folders: &[S],
    verbose: bool,
) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry, skip_folders));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if extensions.iter().any(|ext| name.ends_with(ext.as_ref())) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    files
}

fn is_skipped_dir<S: AsRef<str>>(entry: &DirEntry, skip_folders: &[S]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && skip_folders
            .iter()
            .any(|skip| entry.file_name() == OsStr::new(skip.as_ref()))
}

/// Find source files grouped by the top-level entries of `root`, ordered by name.
///
/// Entries without any matching file are left out.
pub fn find_packages_source_files<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
    skip_folders: &[S],
    verbose: bool,
) -> BTreeMap<String, Vec<PathBuf>> {
    let mut package_files = BTreeMap::new();
    let Ok(entries) = fs::read_dir(root) else {
        return package_files;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if !path.is_dir()
            || skip_folders
                .iter()
                .any(|skip| skip.as_ref() == name.as_str())
        {
            continue;
        }

        let files = find_source_files(&path, extensions, skip_folders, verbose);
        if !files.is_empty() {
            package_files.insert(name, files);
        }
    }

    package_files
}

/// A file selected by [`find_glob_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
}

/// Find files under `root` whose root-relative path matches one of `patterns`
/// and none of `ignore`. Directories named in `skip_folders` are pruned.
pub fn find_glob_files<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    ignore: &[S],
    skip_folders: &[S],
    verbose: bool,
) -> Vec<MatchedFile> {
    let includes = compile_patterns(patterns, verbose);
    let excludes = compile_patterns(ignore, verbose);
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry, skip_folders));

    for entry in walker.flatten() {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let included = includes.iter().any(|p| p.matches_with(&relative, GLOB_OPTIONS));
        let excluded = excludes.iter().any(|p| p.matches_with(&relative, GLOB_OPTIONS));
        if included && !excluded {
            files.push(MatchedFile {
                path: entry.into_path(),
                relative,
            });
        }
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    files
}

fn compile_patterns<S: AsRef<str>>(patterns: &[S], verbose: bool) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p.as_ref()) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid glob pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p.as_ref(),
                        e
                    );
                }
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_finds_matching_extension() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "pkg/foo.py");

        let files = find_source_files::<&str>(dir.path(), &[".py"], &[], false);
        assert_eq!(files, vec![dir.path().join("pkg/foo.py")]);
    }

    #[test]
    fn test_skip_folder_excludes_nested_files() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "pkg/tests/bar.py");

        let files = find_source_files(dir.path(), &[".py"], &["tests"], false);
        assert!(files.is_empty());
    }

    #[test]
    fn test_skip_folder_is_full_segment_match() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "pkg/testsuite/a.py");
        touch(dir.path(), "pkg/libs/b.py");
        touch(dir.path(), "pkg/lib/c.py");
        touch(dir.path(), "pkg/lib.py");

        let files = find_source_files(dir.path(), &[".py"], &["tests", "lib"], false);
        assert_eq!(
            files,
            vec![
                dir.path().join("pkg/lib.py"),
                dir.path().join("pkg/libs/b.py"),
                dir.path().join("pkg/testsuite/a.py"),
            ]
        );
    }

    #[test]
    fn test_skip_folder_does_not_apply_above_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("tests").join("repo");
        touch(&root, "pkg/a.py");

        let files = find_source_files(&root, &[".py"], &["tests"], false);
        assert_eq!(files, vec![root.join("pkg/a.py")]);
    }

    #[test]
    fn test_suffix_match_on_file_name() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "app/package.json");
        touch(dir.path(), "app/tsconfig.json");
        touch(dir.path(), "app/index.ts");

        let files = find_source_files::<&str>(dir.path(), &["package.json"], &[], false);
        assert_eq!(files, vec![dir.path().join("app/package.json")]);
    }

    #[test]
    fn test_find_packages_source_files_groups_by_top_level() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "beta/x.ts");
        touch(dir.path(), "alpha/y.py");
        touch(dir.path(), "alpha/z.py");
        touch(dir.path(), "empty/readme.md");
        touch(dir.path(), "node_modules/dep/index.ts");
        touch(dir.path(), "top.py");

        let packages =
            find_packages_source_files(dir.path(), &[".ts", ".py"], &["node_modules"], false);
        let names: Vec<&String> = packages.keys().collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(packages["alpha"].len(), 2);
        assert_eq!(packages["beta"], vec![dir.path().join("beta/x.ts")]);
    }

    #[test]
    fn test_find_glob_files_applies_patterns_and_ignore() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "packages/app/src/index.ts");
        touch(dir.path(), "packages/app/src/widget.tsx");
        touch(dir.path(), "packages/app/src/index.spec.ts");
        touch(dir.path(), "packages/app/node_modules/dep/index.ts");
        touch(dir.path(), "scripts/build.ts");

        let files = find_glob_files(
            dir.path(),
            &["packages/**/*.ts", "packages/**/*.tsx"],
            &["packages/**/*.spec.ts"],
            &["node_modules"],
            false,
        );
        let relative: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(
            relative,
            vec!["packages/app/src/index.ts", "packages/app/src/widget.tsx"]
        );
        assert_eq!(files[0].path, dir.path().join("packages/app/src/index.ts"));
    }
}
