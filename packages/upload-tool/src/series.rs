//! Discovery of article series on disk.
//!
//! A series is a directory under `articles/` whose children are article
//! units. A unit is any directory with a `drafts/pages` folder; it counts as
//! an article once that folder holds one of the recognized draft files.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use derive_more::Display;
use itertools::Itertools;
use tap::TapFallible;
use walkdir::{DirEntry, WalkDir};

/// Directory under `articles/` that holds templates rather than a series.
pub const RESERVED_SERIES: &str = "shared-templates";

/// A discovered series with the number of articles ready for upload.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{name} ({articles} articles)")]
pub struct SeriesEntry {
    pub name: String,
    pub articles: usize,
}

/// List the series under `articles_dir`, sorted by name.
///
/// Hidden directories and [`RESERVED_SERIES`] are skipped, as are
/// directories without at least one unit containing `drafts/pages`. A
/// missing `articles_dir` has no series.
#[tracing::instrument]
pub fn discover_series(articles_dir: &Path) -> Result<Vec<String>> {
    if !articles_dir.is_dir() {
        tracing::debug!("series.discover.no_articles_dir");
        return Ok(Vec::new());
    }

    let mut series = Vec::new();
    for entry in child_dirs(articles_dir)? {
        let name = entry_name(&entry);
        if name.starts_with('.') || name == RESERVED_SERIES {
            continue;
        }

        let units = child_dirs(entry.path())?;
        if units.iter().any(|unit| drafts_dir(unit.path()).is_dir()) {
            series.push(name);
        }
    }

    tracing::debug!(?series, "series.discover.done");
    Ok(series)
}

/// Count the article units in `series_dir` that contain a recognized draft.
#[tracing::instrument]
pub fn count_articles(series_dir: &Path) -> Result<usize> {
    let units = child_dirs(series_dir)?;
    Ok(units.iter().filter(|unit| has_draft(unit.path())).count())
}

/// Discover every series together with its article count.
pub fn catalog(articles_dir: &Path) -> Result<Vec<SeriesEntry>> {
    discover_series(articles_dir)?
        .into_iter()
        .map(|name| {
            let articles = count_articles(&articles_dir.join(&name))
                .with_context(|| format!("count articles in series: {name}"))?;
            Ok(SeriesEntry { name, articles })
        })
        .collect::<Result<Vec<_>>>()
        .tap_ok(|catalog| tracing::debug!(?catalog, "series.catalog"))
}

/// Whether `unit` has `article.md`, `main.md`, or `<unit name>.md` under
/// `drafts/pages`.
pub fn has_draft(unit: &Path) -> bool {
    let pages = drafts_dir(unit);
    let own = unit
        .file_name()
        .map(|name| format!("{}.md", name.to_string_lossy()));

    ["article.md".to_string(), "main.md".to_string()]
        .into_iter()
        .chain(own)
        .any(|draft| pages.join(draft).is_file())
}

fn drafts_dir(unit: &Path) -> PathBuf {
    unit.join("drafts").join("pages")
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

/// Immediate subdirectories of `dir`, sorted by name.
fn child_dirs(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_ok(|entry| entry.file_type().is_dir())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("list directory: {dir:?}"))
}
