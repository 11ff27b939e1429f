//! Show name extraction for paths rooted at a `tv/` directory.
//!
//! Supported layouts, relative to the `tv/` marker:
//! ```text
//! Show                          -> Show
//! Show/ep01.mkv                 -> Show
//! Show/第一季/ep01.mkv           -> Show
//! Group/Show/ep01.mkv           -> Show
//! Group/Show/Season/ep01.mkv    -> Show
//! ```
//! Anything deeper is rejected rather than guessed at.

use crate::error::ExtractError;
use crate::name_parser::{PathParser, query_unescape};

const TV_MARKER: &str = "tv/";

/// How a directory segment below `tv/` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    /// A known season phrase such as "第一季".
    SeasonLabel,
    /// Anything else; a candidate show name.
    ShowName,
}

impl PathParser {
    /// Classify one path segment against the season phrase table.
    pub fn classify_segment(&self, segment: &str) -> SegmentRole {
        if self.numerals.is_season_phrase(segment) {
            SegmentRole::SeasonLabel
        } else {
            SegmentRole::ShowName
        }
    }

    /// Pick the index of the show-name segment among the segments after `tv/`.
    pub fn show_name_index(&self, segments: &[&str]) -> Result<usize, ExtractError> {
        match segments.len() {
            0 => Err(ExtractError::pattern_mismatch("path segments after 'tv/'")),
            1 | 2 => Ok(0),
            3 => match self.classify_segment(segments[1]) {
                SegmentRole::SeasonLabel => Ok(0),
                SegmentRole::ShowName => Ok(1),
            },
            4 => Ok(1),
            n => Err(ExtractError::pattern_mismatch(format!(
                "recognized show layout ({n} segments after 'tv/')"
            ))),
        }
    }

    /// Isolate the show name from a (possibly URL-encoded) path.
    pub fn show_name(&self, file_path: &str) -> Result<String, ExtractError> {
        let decoded = query_unescape(file_path)?;
        let start = decoded
            .find(TV_MARKER)
            .ok_or_else(|| ExtractError::pattern_mismatch("'tv/' segment"))?;

        let segments: Vec<&str> = decoded[start + TV_MARKER.len()..].split('/').collect();
        let index = self.show_name_index(&segments)?;
        Ok(segments[index].to_string())
    }
}
