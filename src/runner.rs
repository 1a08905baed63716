use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::BlockswapResult;
use crate::patch::{Patch, PatchOutcome};
use crate::utils::fs::{collect_files, normalize_extension, read_text, write_text, LineEnding};

/// Where to look and which files to touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub target_dir: PathBuf,
    pub extension: String,
}

impl RunOptions {
    pub fn new(target_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            target_dir: target_dir.into(),
            extension: extension.into(),
        }
    }
}

/// What happened to a single scanned file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Updated { occurrences: usize },
    NoMatch,
    SkippedEncoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            FileStatus::Updated { occurrences } => write!(
                f,
                "updated  {} ({} occurrence{})",
                self.path.display(),
                occurrences,
                if occurrences == 1 { "" } else { "s" }
            ),
            FileStatus::NoMatch => write!(f, "no match {}", self.path.display()),
            FileStatus::SkippedEncoding => write!(
                f,
                "skipped  {} (not valid UTF-8; try re-encoding it from latin1 or gb2312)",
                self.path.display()
            ),
        }
    }
}

/// Outcome of one patch over one directory tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub patch: String,
    pub target_dir: PathBuf,
    pub files: Vec<FileReport>,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.status)).count()
    }

    pub fn scanned(&self) -> usize {
        self.files.len()
    }

    pub fn updated(&self) -> usize {
        self.count(|s| matches!(s, FileStatus::Updated { .. }))
    }

    pub fn unmatched(&self) -> usize {
        self.count(|s| *s == FileStatus::NoMatch)
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| *s == FileStatus::SkippedEncoding)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} scanned, {} updated, {} unmatched, {} skipped",
            self.patch,
            self.scanned(),
            self.updated(),
            self.unmatched(),
            self.skipped()
        )
    }
}

/// Apply `patch` to one file and write it back if anything changed
///
/// CRLF files are matched with `\n` line endings and written back as CRLF.
pub fn patch_file(patch: &Patch, path: &Path) -> BlockswapResult<FileStatus> {
    let Some(content) = read_text(path)? else {
        warn!("Encoding error, skipping: {}", path.display());
        return Ok(FileStatus::SkippedEncoding);
    };

    let ending = LineEnding::detect(&content);
    match patch.apply(&ending.to_lf(&content)) {
        PatchOutcome::Replaced {
            content,
            occurrences,
        } => {
            write_text(path, &ending.restore(&content))?;
            debug!("Patched {} ({} occurrences)", path.display(), occurrences);
            Ok(FileStatus::Updated { occurrences })
        }
        PatchOutcome::NoMatch => Ok(FileStatus::NoMatch),
    }
}

/// Run one patch over every matching file under the target directory
///
/// `sink` sees each file report as soon as it is produced. A missing target
/// directory is fatal and nothing is touched.
pub fn run_patch<F>(patch: &Patch, options: &RunOptions, mut sink: F) -> BlockswapResult<RunReport>
where
    F: FnMut(&FileReport),
{
    info!(
        "Applying '{}' to *.{} under {}",
        patch.name,
        normalize_extension(&options.extension),
        options.target_dir.display()
    );

    let files = collect_files(&options.target_dir, &options.extension)?;
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
        debug!("Checking file: {}", path.display());
        let status = patch_file(patch, &path)?;
        let report = FileReport { path, status };
        sink(&report);
        reports.push(report);
    }

    let report = RunReport {
        patch: patch.name.clone(),
        target_dir: options.target_dir.clone(),
        files: reports,
    };
    info!("{}", report);
    Ok(report)
}

/// Run patches one after another, each over the whole tree
///
/// `on_file` sees every file report tagged with its patch, `on_done` sees
/// each patch's report as soon as that patch has finished.
pub fn run_chain<F, D>(
    patches: &[Patch],
    options: &RunOptions,
    mut on_file: F,
    mut on_done: D,
) -> BlockswapResult<Vec<RunReport>>
where
    F: FnMut(&Patch, &FileReport),
    D: FnMut(&RunReport),
{
    let mut reports = Vec::with_capacity(patches.len());
    for patch in patches {
        let report = run_patch(patch, options, |r| on_file(patch, r))?;
        on_done(&report);
        reports.push(report);
    }
    Ok(reports)
}
