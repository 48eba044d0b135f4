use serde::Serialize;

/// Two-letter marker closing every course block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CourseType {
    #[serde(rename = "Ob")]
    Mandatory,
    #[serde(rename = "Op")]
    Elective,
}

impl CourseType {
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "Ob" => Some(CourseType::Mandatory),
            "Op" => Some(CourseType::Elective),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "tipo")]
    pub kind: CourseType,
}

/// Class-count statistic. Integer unless the source token carried a decimal part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassCount {
    Integer(i64),
    Decimal(f64),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curriculum_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_classes: Option<ClassCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_classes: Option<ClassCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_classes: Option<ClassCount>,
}

/// Buckets produced by the course classifier, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseBuckets {
    pub cursadas: Vec<CourseRecord>,
    pub andamento: Vec<CourseRecord>,
    pub dispensadas: Vec<CourseRecord>,
}

/// The single output artifact for one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub courses: CourseBuckets,
    #[serde(flatten)]
    pub metadata: CurriculumMetadata,
}

/// Values supplied by the caller that take precedence over (or fill in for)
/// what the document yielded.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub curriculum_id: Option<String>,
    pub course_code: Option<String>,
    pub default_curriculum_id: Option<String>,
    pub default_course_code: Option<String>,
}

impl ExtractionResult {
    /// Blank values count as absent on both sides: a blank override changes
    /// nothing and a blank extracted field can still take the default.
    pub fn apply_overrides(&mut self, overrides: &MetadataOverrides) {
        if let Some(id) = present(&overrides.curriculum_id) {
            self.metadata.curriculum_id = Some(id.to_string());
        }
        if let Some(code) = present(&overrides.course_code) {
            self.metadata.course_code = Some(code.to_string());
        }

        if present(&self.metadata.curriculum_id).is_none() {
            if let Some(id) = present(&overrides.default_curriculum_id) {
                tracing::warn!(default = %id, "curriculum id not found in document, using default");
                self.metadata.curriculum_id = Some(id.to_string());
            }
        }
        if present(&self.metadata.course_code).is_none() {
            if let Some(code) = present(&overrides.default_course_code) {
                tracing::warn!(default = %code, "course code not found in document, using default");
                self.metadata.course_code = Some(code.to_string());
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
