// ============================================================================
// tumvol-core/src/loader.rs
// ============================================================================
//
// ANNOTATION LOADER: Reading Annotation Sources into an AnnotationSet
//
// This module turns persisted per-frame annotation records into the ordered
// AnnotationSet consumed by the rest of the pipeline.
//
// KEY COMPONENTS:
// - AnnotationSource: Trait exposing a frame index and a record per source
// - FileAnnotationSource: JSON files named `frame_<index>.json`
// - InMemorySource: Already-decoded records (sessions, tests)
// - load_annotations: Builds the AnnotationSet, applying the duplicate policy
// - find_annotation_files / write_annotation: Directory-level helpers
//
// The frame index comes from an explicit accessor on the source. Only the
// file-backed source derives it from a naming convention.
//
// AI-ASSISTANT-INFO: Annotation loading and persistence helpers

// ---- Internal crate imports ----
use crate::annotation::{
    Annotation, AnnotationRecord, AnnotationSet, DuplicateFramePolicy, parse_frame_index,
};
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::debug;
use serde_json::error::Category;

// ---- Standard library imports ----
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the optional per-sweep calibration record. Never treated as
/// an annotation.
pub const CALIBRATION_FILE_NAME: &str = "calibration.json";

// ============================================================================
// SOURCES
// ============================================================================

/// A single persisted annotation.
pub trait AnnotationSource {
    /// Human-readable name used in logs and errors.
    fn identifier(&self) -> String;

    /// Frame index this annotation belongs to.
    fn frame_index(&self) -> CoreResult<u32>;

    /// Reads and decodes the annotation record.
    fn read_record(&self) -> CoreResult<AnnotationRecord>;
}

/// Annotation stored as a JSON file whose name carries the frame index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnnotationSource {
    path: PathBuf,
}

impl FileAnnotationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> CoreResult<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "Failed to get filename for {}",
                    self.path.display()
                ))
            })
    }
}

impl AnnotationSource for FileAnnotationSource {
    fn identifier(&self) -> String {
        self.path.display().to_string()
    }

    fn frame_index(&self) -> CoreResult<u32> {
        parse_frame_index(&self.file_name()?)
    }

    fn read_record(&self) -> CoreResult<AnnotationRecord> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| decode_error(&self.identifier(), &e))
    }
}

/// Annotation already held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemorySource {
    pub identifier: String,
    pub frame_index: u32,
    pub record: AnnotationRecord,
}

impl AnnotationSource for InMemorySource {
    fn identifier(&self) -> String {
        self.identifier.clone()
    }

    fn frame_index(&self) -> CoreResult<u32> {
        Ok(self.frame_index)
    }

    fn read_record(&self) -> CoreResult<AnnotationRecord> {
        Ok(self.record.clone())
    }
}

/// Shape problems (wrong types, missing `points`) are malformed annotations;
/// anything that is not JSON at all is a parse failure.
fn decode_error(identifier: &str, err: &serde_json::Error) -> CoreError {
    match err.classify() {
        Category::Data => CoreError::MalformedAnnotation {
            identifier: identifier.to_string(),
            reason: err.to_string(),
        },
        _ => CoreError::Parse(format!("{identifier}: {err}")),
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Reads every source into an [`AnnotationSet`].
///
/// Sources are read in the given order, so under
/// [`DuplicateFramePolicy::Overwrite`] the later source wins.
pub fn load_annotations<S: AnnotationSource>(
    sources: &[S],
    policy: DuplicateFramePolicy,
) -> CoreResult<AnnotationSet> {
    let mut set = AnnotationSet::new();
    for source in sources {
        let identifier = source.identifier();
        let frame_index = source.frame_index()?;
        let record = source.read_record()?;
        let annotation = Annotation::from_record(&identifier, frame_index, record)?;
        debug!(
            "Loaded {} points for frame {} from {}",
            annotation.points().len(),
            frame_index,
            identifier
        );
        set.insert(annotation, policy)?;
    }
    Ok(set)
}

/// Discovers and loads every annotation file in `dir`.
pub fn load_annotation_dir(dir: &Path, policy: DuplicateFramePolicy) -> CoreResult<AnnotationSet> {
    let sources: Vec<FileAnnotationSource> = find_annotation_files(dir)?
        .into_iter()
        .map(FileAnnotationSource::new)
        .collect();
    load_annotations(&sources, policy)
}

/// Finds annotation files (`.json`, case-insensitive) in the top level of `dir`.
///
/// The calibration record is skipped. Paths are returned sorted so that the
/// read order, and with it duplicate resolution, is deterministic.
pub fn find_annotation_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if !path.is_file() || is_calibration_file(&path) {
                return None;
            }
            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext| ext.eq_ignore_ascii_case("json"))
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}

fn is_calibration_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case(CALIBRATION_FILE_NAME))
}

/// Writes the closed polygon of `annotation` to `dir/frame_<index:05>.json`.
pub fn write_annotation(dir: &Path, annotation: &Annotation) -> CoreResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("frame_{:05}.json", annotation.frame_index()));
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, &annotation.to_closed_record())?;
    writer.flush()?;
    debug!("Annotation for frame {} saved to {}", annotation.frame_index(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn record(points: &[(f64, f64)]) -> AnnotationRecord {
        AnnotationRecord {
            points: points.iter().copied().map(Point::from).collect(),
        }
    }

    #[test]
    fn test_in_memory_sources_load_in_frame_order() {
        let sources = vec![
            InMemorySource {
                identifier: "b".into(),
                frame_index: 8,
                record: record(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            },
            InMemorySource {
                identifier: "a".into(),
                frame_index: 1,
                record: record(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]),
            },
        ];
        let set = load_annotations(&sources, DuplicateFramePolicy::Reject).unwrap();
        assert_eq!(set.frame_indices(), vec![1, 8]);
    }

    #[test]
    fn test_short_record_is_malformed() {
        let sources = vec![InMemorySource {
            identifier: "short".into(),
            frame_index: 0,
            record: record(&[(0.0, 0.0), (1.0, 1.0)]),
        }];
        match load_annotations(&sources, DuplicateFramePolicy::Overwrite) {
            Err(CoreError::MalformedAnnotation { identifier, .. }) => assert_eq!(identifier, "short"),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_classification() {
        let syntax = serde_json::from_str::<AnnotationRecord>("{ points: ").unwrap_err();
        assert!(matches!(decode_error("x", &syntax), CoreError::Parse(_)));

        let data = serde_json::from_str::<AnnotationRecord>(r#"{"points": [["a", 1]]}"#).unwrap_err();
        assert!(matches!(decode_error("x", &data), CoreError::MalformedAnnotation { .. }));

        let missing = serde_json::from_str::<AnnotationRecord>(r#"{"pts": []}"#).unwrap_err();
        assert!(matches!(decode_error("x", &missing), CoreError::MalformedAnnotation { .. }));
    }
}
