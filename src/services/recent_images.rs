//! Recent-image discovery across date/hour capture buckets.
//!
//! The capture daemon stores images under `{base}/{YYYYMMDD}/{session}/{DD_HH}`
//! where `session` is `day` or `night`, `DD` the day-of-month and `HH` the
//! hour of capture. To find "recent" images the scanner looks at four such
//! buckets: the current and previous hour, each split into a day and a night
//! variant. Night buckets shift the date component by a 12-hour lookback
//! while the hour component stays at the (current or previous) reference
//! hour — that asymmetry matches the upstream storage convention and is
//! pinned by tests; do not "correct" it here without checking the archive
//! layout first.
//!
//! The scan consults filesystem metadata only: files are never opened, and
//! every failure (missing bucket, unreadable entry, missing mtime) is logged
//! and skipped rather than surfaced to the caller.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Capture session classification, fixed by the storage convention of the
/// upstream capture daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Day,
    Night,
}

impl Session {
    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Day => "day",
            Session::Night => "night",
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (date, session, hour) directory target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub date: NaiveDate,
    pub session: Session,
    pub hour: u32,
}

impl TimeBucket {
    /// The four scan targets for a reference time, in scan order:
    /// current-hour day, current-hour night, previous-hour day,
    /// previous-hour night. Night dates come from a 12-hour lookback; the
    /// hour is always the one of the (unshifted) current or previous
    /// reference.
    pub fn targets(reference: NaiveDateTime) -> [TimeBucket; 4] {
        let previous = reference - Duration::hours(1);
        [
            TimeBucket {
                date: reference.date(),
                session: Session::Day,
                hour: reference.hour(),
            },
            TimeBucket {
                date: (reference - Duration::hours(12)).date(),
                session: Session::Night,
                hour: reference.hour(),
            },
            TimeBucket {
                date: previous.date(),
                session: Session::Day,
                hour: previous.hour(),
            },
            TimeBucket {
                date: (reference - Duration::hours(13)).date(),
                session: Session::Night,
                hour: previous.hour(),
            },
        ]
    }

    /// Relative bucket directory: `YYYYMMDD/{session}/DD_HH`.
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}/{}/{:02}_{:02}",
            self.date.format("%Y%m%d"),
            self.session,
            self.date.day(),
            self.hour
        ))
    }
}

/// Immutable scan parameters.
///
/// The reference time is passed to [`find_recent_images`] separately so that
/// tests can pin a fixed clock.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the capture tree.
    pub base_dir: PathBuf,
    /// Accepted extensions without the leading dot, matched case-sensitively
    /// as filename suffixes.
    pub extensions: Vec<String>,
    /// When set, only the newest `max_images` entries are kept.
    pub max_images: Option<usize>,
}

/// Locate image files in the four recent capture buckets, merged and sorted
/// ascending by file modification time (stable for ties).
///
/// Missing or unreadable bucket directories contribute zero files; the scan
/// never fails and always returns a (possibly empty) list.
pub fn find_recent_images(scan: &ScanConfig, reference: NaiveDateTime) -> Vec<PathBuf> {
    let suffixes: Vec<String> = scan.extensions.iter().map(|ext| format!(".{ext}")).collect();
    let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();

    for bucket in TimeBucket::targets(reference) {
        let dir = scan.base_dir.join(bucket.relative_dir());
        if !dir.is_dir() {
            warn!(directory = %dir.display(), "capture directory not found, skipping bucket");
            continue;
        }

        debug!(directory = %dir.display(), "scanning capture bucket");
        for entry in WalkDir::new(&dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(directory = %dir.display(), error = %err, "unreadable path during scan, skipping");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !suffixes.iter().any(|suffix| name.ends_with(suffix.as_str())) {
                continue;
            }
            let modified = match entry.metadata().map_err(std::io::Error::from).and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "failed to read modification time, skipping");
                    continue;
                }
            };
            found.push((modified, entry.into_path()));
        }
    }

    // Stable sort keeps discovery order for equal timestamps.
    found.sort_by_key(|(modified, _)| *modified);

    if let Some(cap) = scan.max_images {
        if found.len() > cap {
            found.drain(..found.len() - cap);
        }
    }

    found.into_iter().map(|(_, path)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn dirs(reference: NaiveDateTime) -> Vec<String> {
        TimeBucket::targets(reference)
            .iter()
            .map(|b| b.relative_dir().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_targets_mid_afternoon() {
        assert_eq!(
            dirs(at(2024, 1, 15, 14, 30)),
            vec![
                "20240115/day/15_14",
                "20240115/night/15_14",
                "20240115/day/15_13",
                "20240115/night/15_13",
            ]
        );
    }

    #[test]
    fn test_targets_early_morning_shift_date_keep_hour() {
        // The 12h lookback lands on the previous calendar day, but the hour
        // component stays at the reference hour.
        assert_eq!(
            dirs(at(2024, 1, 15, 5, 0)),
            vec![
                "20240115/day/15_05",
                "20240114/night/14_05",
                "20240115/day/15_04",
                "20240114/night/14_04",
            ]
        );
    }

    #[test]
    fn test_targets_just_after_midnight() {
        assert_eq!(
            dirs(at(2024, 1, 15, 0, 30)),
            vec![
                "20240115/day/15_00",
                "20240114/night/14_00",
                "20240114/day/14_23",
                "20240114/night/14_23",
            ]
        );
    }

    #[test]
    fn test_targets_cross_month_boundary() {
        assert_eq!(
            dirs(at(2024, 3, 1, 0, 10)),
            vec![
                "20240301/day/01_00",
                "20240229/night/29_00",
                "20240229/day/29_23",
                "20240229/night/29_23",
            ]
        );
    }

    #[test]
    fn test_session_display() {
        assert_eq!(Session::Day.to_string(), "day");
        assert_eq!(Session::Night.to_string(), "night");
    }

    #[test]
    fn test_missing_base_dir_yields_empty_list() {
        let scan = ScanConfig {
            base_dir: PathBuf::from("/nonexistent/skycam-archive"),
            extensions: vec!["jpg".to_string()],
            max_images: None,
        };
        assert!(find_recent_images(&scan, at(2024, 1, 15, 14, 30)).is_empty());
    }
}
