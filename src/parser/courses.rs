use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CourseBuckets, CourseRecord, CourseType};

use super::text::DocumentText;

/// Course code, then everything up to the nearest Ob/Op marker.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<code>[A-Z]{2,}[A-Z]?\d{4}).*?(?P<kind>Ob|Op)\b").unwrap());
/// Term (2021/1) followed by a grade (7.5).
static TERM_GRADE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}/\d\s+\d+\.\d").unwrap());

const IN_PROGRESS_MARKERS: &[&str] = &["Cursando"];
const EXEMPTED_MARKERS: &[&str] = &["Cursou Eqv", "Equivalência"];
const NOT_TAKEN_MARKERS: &[&str] = &["Não Cursou", "Reprovado"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    InProgress,
    Exempted,
    NotTaken,
    Completed,
    Unrecognized,
}

/// One course record as it appears in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseBlock<'t> {
    pub code: &'t str,
    pub kind: CourseType,
    pub span: &'t str,
}

impl CourseBlock<'_> {
    /// First matching rule wins.
    pub fn status(&self) -> BlockStatus {
        let has_any = |markers: &[&str]| markers.iter().any(|m| self.span.contains(m));
        if has_any(IN_PROGRESS_MARKERS) {
            BlockStatus::InProgress
        } else if has_any(EXEMPTED_MARKERS) {
            BlockStatus::Exempted
        } else if has_any(NOT_TAKEN_MARKERS) {
            BlockStatus::NotTaken
        } else if TERM_GRADE_RE.is_match(self.span) {
            BlockStatus::Completed
        } else {
            BlockStatus::Unrecognized
        }
    }

    fn record(&self) -> CourseRecord {
        CourseRecord {
            code: self.code.to_string(),
            kind: self.kind,
        }
    }
}

/// All non-overlapping course blocks on one line, left to right.
pub fn find_blocks(line: &str) -> Vec<CourseBlock<'_>> {
    BLOCK_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let span = caps.get(0)?.as_str();
            let code = caps.name("code")?.as_str();
            let kind = CourseType::from_marker(caps.name("kind")?.as_str())?;
            Some(CourseBlock { code, kind, span })
        })
        .collect()
}

/// Classify every course block in the document. A code is decided by its first
/// block only, even when that block ends up dropped.
pub fn classify(text: &DocumentText) -> CourseBuckets {
    let mut buckets = CourseBuckets::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        for block in find_blocks(line) {
            if !seen.insert(block.code) {
                continue;
            }

            match block.status() {
                BlockStatus::InProgress => buckets.andamento.push(block.record()),
                BlockStatus::Exempted => buckets.dispensadas.push(block.record()),
                BlockStatus::Completed => buckets.cursadas.push(block.record()),
                BlockStatus::NotTaken | BlockStatus::Unrecognized => {
                    tracing::trace!(code = block.code, span = block.span, "course block dropped");
                    dropped += 1;
                }
            }
        }
    }

    tracing::debug!(
        cursadas = buckets.cursadas.len(),
        andamento = buckets.andamento.len(),
        dispensadas = buckets.dispensadas.len(),
        dropped,
        "courses classified"
    );
    buckets
}
