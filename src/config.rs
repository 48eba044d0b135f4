use std::path::PathBuf;

use ::config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;
use crate::model::MetadataOverrides;

/// Runtime settings, read from `TRANSCRIPT_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: String,
    /// Directory for path-mode JSON output instead of next to the PDF.
    pub output_dir: Option<PathBuf>,
    pub default_curriculum_id: Option<String>,
    pub default_course_code: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix("TRANSCRIPT"))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .set_default("log_level", "info")?
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn overrides(&self, curriculum_id: Option<String>, course_code: Option<String>) -> MetadataOverrides {
        MetadataOverrides {
            curriculum_id,
            course_code,
            default_curriculum_id: self.default_curriculum_id.clone(),
            default_course_code: self.default_course_code.clone(),
        }
    }
}
