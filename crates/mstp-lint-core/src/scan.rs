//! Folder-tree scanning.
//!
//! Enumerates topic files under a root folder and feeds each one through
//! the document processor. Batch mode mirrors the input tree under an
//! output directory and writes every processed file; review mode rewrites
//! a file in place only when at least one change was accepted.
//!
//! Files are processed strictly sequentially. There is no per-file error
//! isolation: the first read, decode, or parse failure aborts the run,
//! and files already written stay written.

use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

use crate::document::{self, TopicReport};
use crate::engine::{RuleEngine, RuleToggles};
use crate::error::{ScanError, ScanResult};
use crate::grammar::GrammarCorrector;
use crate::review::{AcceptAll, Reviewer};

/// Default output directory name for batch mode.
pub const DEFAULT_OUTPUT_DIR: &str = "cleaned_output";

/// Topic file extensions the walker picks up.
const TOPIC_EXTENSIONS: &[&str] = &["htm", "html"];

/// Enumerate topic files under `root`, sorted for determinism.
///
/// `exclude` names a directory subtree left out of the walk; batch mode
/// passes its output directory so a re-scan never ingests a prior run's
/// cleaned copies. A missing or unreadable root yields an empty list —
/// the scan then completes as a no-op, per contract. Unreadable entries
/// below the root are skipped with a warning; a non-UTF-8 path is fatal.
#[tracing::instrument]
pub fn topic_files(root: &Utf8Path, exclude: Option<&Utf8Path>) -> ScanResult<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root.as_std_path())
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let (Some(excluded), Some(path)) = (exclude, Utf8Path::from_path(entry.path()))
            else {
                return true;
            };
            trimmed(path) != trimmed(excluded)
        });
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(?error, %root, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.path().to_path_buf())
            .map_err(|p| ScanError::NonUtf8Path(p.display().to_string()))?;
        if path
            .extension()
            .is_some_and(|ext| TOPIC_EXTENSIONS.contains(&ext))
        {
            files.push(path);
        }
    }
    Ok(files)
}

/// Strip a leading `./` so "cleaned_output" and "./cleaned_output"
/// compare equal.
fn trimmed(path: &Utf8Path) -> &Utf8Path {
    path.strip_prefix(".").unwrap_or(path)
}

/// Where a file lands in the mirrored output tree.
pub fn mirror_path(file: &Utf8Path, root: &Utf8Path, out_root: &Utf8Path) -> Utf8PathBuf {
    match file.strip_prefix(root) {
        Ok(rel) => out_root.join(rel),
        // File outside the root (shouldn't happen from the walker);
        // fall back to its file name.
        Err(_) => out_root.join(file.file_name().unwrap_or(file.as_str())),
    }
}

/// Batch-process one topic file: apply every suggestion and write the
/// result to the mirrored location under `out_root`, creating parent
/// directories as needed. The file is written whether or not anything
/// changed.
#[tracing::instrument(skip(engine, toggles), fields(file = %file))]
pub fn batch_file<C: GrammarCorrector>(
    file: &Utf8Path,
    root: &Utf8Path,
    out_root: &Utf8Path,
    engine: &RuleEngine<C>,
    toggles: &RuleToggles,
) -> ScanResult<TopicReport> {
    let html = read_topic(file)?;
    let report = document::process_topic(&html, engine, toggles, &mut AcceptAll)
        .map_err(|source| ScanError::Parse {
            path: file.to_path_buf(),
            source,
        })?;

    let out_path = mirror_path(file, root, out_root);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent.as_std_path())
            .map_err(|e| ScanError::io(parent, e))?;
    }
    std::fs::write(out_path.as_std_path(), &report.html)
        .map_err(|e| ScanError::io(out_path.clone(), e))?;

    Ok(report)
}

/// Review one topic file: stage each concrete suggestion through the
/// reviewer and rewrite the file in place only when at least one change
/// was accepted.
#[tracing::instrument(skip(engine, toggles, reviewer), fields(file = %file))]
pub fn review_file<C: GrammarCorrector, R: Reviewer>(
    file: &Utf8Path,
    engine: &RuleEngine<C>,
    toggles: &RuleToggles,
    reviewer: &mut R,
) -> ScanResult<TopicReport> {
    let html = read_topic(file)?;
    let report = document::process_topic(&html, engine, toggles, reviewer)
        .map_err(|source| ScanError::Parse {
            path: file.to_path_buf(),
            source,
        })?;

    if report.changed {
        std::fs::write(file.as_std_path(), &report.html)
            .map_err(|e| ScanError::io(file, e))?;
    }

    Ok(report)
}

fn read_topic(file: &Utf8Path) -> ScanResult<String> {
    std::fs::read_to_string(file.as_std_path()).map_err(|e| ScanError::io(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::RejectAll;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    fn write(dir: &Utf8Path, rel: &str, content: &str) -> Utf8PathBuf {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap().as_std_path()).unwrap();
        std::fs::write(path.as_std_path(), content).unwrap();
        path
    }

    #[test]
    fn missing_root_is_a_no_op() {
        assert!(topic_files(Utf8Path::new("/no/such/folder"), None).unwrap().is_empty());
    }

    #[test]
    fn walker_finds_only_topic_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path());
        write(&root, "a.htm", "<p>x</p>");
        write(&root, "sub/b.html", "<p>y</p>");
        write(&root, "sub/notes.txt", "skip me");

        let files = topic_files(&root, None).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension() == Some("htm") || f.extension() == Some("html")));
    }

    #[test]
    fn rescan_skips_the_output_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path());
        let file = write(&root, "topic.htm", "<p>Click OK now.</p>");
        let out = root.join(DEFAULT_OUTPUT_DIR);
        let engine = RuleEngine::new();
        batch_file(&file, &root, &out, &engine, &RuleToggles::all()).unwrap();

        // The cleaned copy under the root must not be picked up again.
        let files = topic_files(&root, Some(&out)).unwrap();
        assert_eq!(files, vec![file.clone()]);

        for file in &files {
            batch_file(file, &root, &out, &engine, &RuleToggles::all()).unwrap();
        }
        assert!(!out.join(DEFAULT_OUTPUT_DIR).as_std_path().exists());
        let cleaned = std::fs::read_to_string(out.join("topic.htm").as_std_path()).unwrap();
        assert!(cleaned.contains("Click &lt;b&gt;OK&lt;/b&gt; now."));
        assert!(!cleaned.contains("&lt;b&gt;&lt;b&gt;"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path_is_fatal() {
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path());
        let name = std::ffi::OsStr::from_bytes(b"bad\xff.htm");
        std::fs::write(tmp.path().join(name), "<p>x</p>").unwrap();

        let result = topic_files(&root, None);
        assert!(matches!(result, Err(ScanError::NonUtf8Path(_))));
    }

    #[test]
    fn batch_mirrors_relative_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path()).join("src");
        let out = utf8(tmp.path()).join("cleaned_output");
        let file = write(&root, "guide/topic.htm", "<p>Click OK now.</p>");

        let engine = RuleEngine::new();
        let report = batch_file(&file, &root, &out, &engine, &RuleToggles::all()).unwrap();
        assert!(report.changed);

        let mirrored = out.join("guide/topic.htm");
        let written = std::fs::read_to_string(mirrored.as_std_path()).unwrap();
        assert!(written.contains("&lt;b&gt;OK&lt;/b&gt;"));
    }

    #[test]
    fn batch_writes_even_unchanged_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path()).join("src");
        let out = utf8(tmp.path()).join("out");
        let file = write(&root, "plain.htm", "<p>Nothing to fix here.</p>");

        let engine = RuleEngine::new();
        let report = batch_file(&file, &root, &out, &engine, &RuleToggles::none()).unwrap();
        assert!(!report.changed);
        assert!(out.join("plain.htm").as_std_path().exists());
    }

    #[test]
    fn review_rewrites_in_place_only_on_accept() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path());
        let file = write(&root, "topic.htm", "<p>Click OK now.</p>");
        let engine = RuleEngine::new();

        let report = review_file(&file, &engine, &RuleToggles::all(), &mut RejectAll).unwrap();
        assert!(!report.changed);
        let content = std::fs::read_to_string(file.as_std_path()).unwrap();
        assert_eq!(content, "<p>Click OK now.</p>");

        let report = review_file(&file, &engine, &RuleToggles::all(), &mut AcceptAll).unwrap();
        assert!(report.changed);
        let content = std::fs::read_to_string(file.as_std_path()).unwrap();
        assert!(content.contains("&lt;b&gt;OK&lt;/b&gt;"));
    }

    #[test]
    fn unparsable_topic_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let root = utf8(tmp.path());
        let file = write(&root, "bad.htm", "<p>oops</div>");
        let engine = RuleEngine::new();
        let out = root.join("out");
        let result = batch_file(&file, &root, &out, &engine, &RuleToggles::all());
        assert!(matches!(result, Err(ScanError::Parse { .. })));
    }
}
