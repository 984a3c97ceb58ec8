use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    indentation::Indentation, line_ending::LineEnding, path_segment::Path,
    transform_step::TransformStep,
};

/// Provenance of a single node of the expanded document: the steps that
/// turned `original_value` into what the editor shows at `path`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathTransformRecord {
    pub path: Path,

    /// Steps in the order they were applied while decoding.
    pub steps: Vec<TransformStep>,

    /// The string found at `path` before any step was applied.
    pub original_value: String,

    /// What inverting the unedited expansion produces when that differs from
    /// `original_value`, e.g. because the embedded JSON had insignificant
    /// whitespace. `None` if inverting yields `original_value` already.
    #[serde(default)]
    pub canonical_encoding: Option<String>,
}

/// Everything needed to turn an edited expansion back into the encoded
/// document it came from.
///
/// A context belongs to one document. It is never updated: decoding the
/// document again produces a new context that replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformContext {
    #[serde(with = "records_as_list")]
    records: BTreeMap<Path, PathTransformRecord>,
    original_indentation: Indentation,
    #[serde(default)]
    line_ending: LineEnding,
    trailing_newline: bool,
    timestamp: DateTime<Utc>,
}

impl TransformContext {
    pub(crate) fn new(
        records: BTreeMap<Path, PathTransformRecord>,
        original_indentation: Indentation,
        line_ending: LineEnding,
        trailing_newline: bool,
    ) -> Self {
        debug_assert!(
            records.iter().all(|(path, record)| *path == record.path),
            "Records must be keyed by their own path"
        );
        debug_assert!(
            records.values().all(|record| !record.steps.is_empty()),
            "Records must only exist for paths where at least one step was applied"
        );

        Self {
            records,
            original_indentation,
            line_ending,
            trailing_newline,
            timestamp: Utc::now(),
        }
    }

    /// A context without any records, used when the document could not be
    /// parsed at all.
    #[must_use]
    pub fn empty(
        original_indentation: Indentation,
        line_ending: LineEnding,
        trailing_newline: bool,
    ) -> Self {
        Self::new(
            BTreeMap::new(),
            original_indentation,
            line_ending,
            trailing_newline,
        )
    }

    #[must_use]
    pub fn record(&self, path: &Path) -> Option<&PathTransformRecord> { self.records.get(path) }

    pub(crate) fn record_map(&self) -> &BTreeMap<Path, PathTransformRecord> { &self.records }

    /// All records ordered by path.
    pub fn records(&self) -> impl Iterator<Item = &PathTransformRecord> { self.records.values() }

    #[must_use]
    pub fn len(&self) -> usize { self.records.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    #[must_use]
    pub fn original_indentation(&self) -> &Indentation { &self.original_indentation }

    #[must_use]
    pub fn line_ending(&self) -> LineEnding { self.line_ending }

    #[must_use]
    pub fn trailing_newline(&self) -> bool { self.trailing_newline }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
}

/// JSON object keys must be strings, so the records are stored as a list and
/// re-keyed by their path when deserialising.
mod records_as_list {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::PathTransformRecord;
    use crate::types::path_segment::Path;

    pub fn serialize<S>(
        records: &BTreeMap<Path, PathTransformRecord>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(records.values())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<Path, PathTransformRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<PathTransformRecord>::deserialize(deserializer)?;
        Ok(records
            .into_iter()
            .map(|record| (record.path.clone(), record))
            .collect())
    }
}
