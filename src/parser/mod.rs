pub mod courses;
pub mod metadata;
pub mod text;

use crate::model::ExtractionResult;
use text::DocumentText;

/// Two independent passes over the same text: curriculum metadata, then course blocks.
pub fn parse_document(text: &DocumentText) -> ExtractionResult {
    let metadata = metadata::extract(text);
    let courses = courses::classify(text);
    ExtractionResult { courses, metadata }
}
