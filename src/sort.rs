use filetime::FileTime;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::FOLDER_ID_SEPARATOR;
use crate::error::{Error, Result};
use crate::photo::{capture_time, is_photo};
use crate::session::{sessions_covering, Session};

/// How the per-client destination folder is named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderNaming {
    /// `"{name} -- {personal code}"`
    #[default]
    NameAndId,
    /// `"{name}"`
    NameOnly,
}

impl FolderNaming {
    pub fn from_name_only(name_only: bool) -> Self {
        if name_only {
            FolderNaming::NameOnly
        } else {
            FolderNaming::NameAndId
        }
    }

    pub fn folder_name(&self, session: &Session) -> String {
        match self {
            FolderNaming::NameAndId => format!(
                "{}{}{}",
                session.client_name, FOLDER_ID_SEPARATOR, session.client_id
            ),
            FolderNaming::NameOnly => session.client_name.clone(),
        }
    }
}

/// Why a photo was not filed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotAPhoto,
    NoCaptureTime,
    NoMatchingSession,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NotAPhoto => "Non-photo file",
            SkipReason::NoCaptureTime => "No EXIF datetime found",
            SkipReason::NoMatchingSession => "No matching session in past appointments",
        };
        f.write_str(reason)
    }
}

/// A photo resolved to a client folder and date subfolder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub photo_name: String,
    pub folder_name: String,
    pub date_folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPhoto {
    pub photo_name: String,
    pub reason: SkipReason,
}

/// Outcome of a sorting run
///
/// A photo matching several sessions has one entry per session across
/// `copied` and `already_exists`.
#[derive(Debug, Default)]
pub struct SortReport {
    pub copied: Vec<Placement>,
    pub skipped: Vec<SkippedPhoto>,
    pub already_exists: Vec<Placement>,
}

impl SortReport {
    pub fn total(&self) -> usize {
        self.copied.len() + self.skipped.len() + self.already_exists.len()
    }

    fn skip(&mut self, photo_name: &str, reason: SkipReason) {
        debug!("Skipping {}: {}", photo_name, reason);
        self.skipped.push(SkippedPhoto {
            photo_name: photo_name.to_string(),
            reason,
        });
    }
}

/// Copy a file, carrying over its access and modification times
pub fn copy_preserving_times(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::copy(from, to)?;
    let metadata = std::fs::metadata(from)?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(to, atime, mtime)
}

/// Copy every photo under `photo_dir` into
/// `output_dir/<folder>/<YYYY-MM-DD>/<photo name>` for each session whose
/// time range contains the photo's capture time
///
/// Existing destination files are left untouched and reported in
/// `already_exists`, so repeated runs are safe.
pub fn sort_photos(
    photo_dir: &Path,
    sessions: &[Session],
    output_dir: &Path,
    naming: FolderNaming,
) -> Result<SortReport> {
    if !photo_dir.is_dir() {
        return Err(Error::MissingDirectory(photo_dir.to_path_buf()));
    }
    std::fs::create_dir_all(output_dir)
        .map_err(|e| Error::CreateDir(output_dir.to_path_buf(), e))?;

    let mut report = SortReport::default();

    for entry in WalkDir::new(photo_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry under {}: {}", photo_dir.display(), e);
                continue;
            }
        };
        let photo_path = entry.path();
        // Directories, including symlinked ones, are walked but not classified
        if photo_path.is_dir() {
            continue;
        }

        let photo_name = entry.file_name().to_string_lossy().into_owned();

        if !is_photo(photo_path) {
            report.skip(&photo_name, SkipReason::NotAPhoto);
            continue;
        }

        // Follows symlinks; broken links are dropped without a report entry
        if !photo_path.is_file() {
            continue;
        }

        let Some(taken_at) = capture_time(photo_path) else {
            report.skip(&photo_name, SkipReason::NoCaptureTime);
            continue;
        };

        let mut matched = false;
        for session in sessions_covering(sessions, taken_at) {
            matched = true;
            let placement = Placement {
                photo_name: photo_name.clone(),
                folder_name: naming.folder_name(session),
                date_folder: session.date_folder(),
            };

            let folder_path = output_dir
                .join(&placement.folder_name)
                .join(&placement.date_folder);
            std::fs::create_dir_all(&folder_path)
                .map_err(|e| Error::CreateDir(folder_path.clone(), e))?;

            let destination = folder_path.join(&photo_name);
            if destination.exists() {
                debug!("{} already exists", destination.display());
                report.already_exists.push(placement);
                continue;
            }

            copy_preserving_times(photo_path, &destination).map_err(|e| Error::Copy {
                from: photo_path.to_path_buf(),
                to: destination.clone(),
                source: e,
            })?;
            info!(
                "Copied {} -> {}/{}",
                photo_name, placement.folder_name, placement.date_folder
            );
            report.copied.push(placement);
        }

        if !matched {
            report.skip(&photo_name, SkipReason::NoMatchingSession);
        }
    }

    Ok(report)
}
