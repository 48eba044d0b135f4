use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gag::Gag;
use rayon::prelude::*;
use tracing::{error, info};

use crate::error::ParseError;
use crate::model::{ExtractionResult, MetadataOverrides};
use crate::output;
use crate::parser;
use crate::pdf::TextSource;

/// How the process receives its document, decided once from the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationMode {
    /// PDF bytes on stdin, one JSON line on stdout.
    StreamedBytes,
    /// PDF files on disk, a JSON file written next to each.
    PathInput(Vec<PathBuf>),
}

impl InvocationMode {
    pub fn from_args(paths: Vec<PathBuf>) -> Self {
        if paths.is_empty() {
            InvocationMode::StreamedBytes
        } else {
            InvocationMode::PathInput(paths)
        }
    }
}

pub struct Runner<'a, T: TextSource> {
    source: &'a T,
    overrides: MetadataOverrides,
    output_dir: Option<PathBuf>,
    quiet_stdout: bool,
}

impl<'a, T: TextSource> Runner<'a, T> {
    pub fn new(source: &'a T, overrides: MetadataOverrides, output_dir: Option<PathBuf>) -> Self {
        Runner {
            source,
            overrides,
            output_dir,
            quiet_stdout: false,
        }
    }

    /// Discard anything written to fd 1 while the text source runs in
    /// streamed mode. pdf-extract prints font diagnostics with `println!`.
    /// Only one process-wide redirect can exist, so leave this off in tests
    /// and in path mode.
    pub fn quiet_stdout(mut self, quiet: bool) -> Self {
        self.quiet_stdout = quiet;
        self
    }

    /// Text extraction, both parser passes, then caller overrides.
    pub fn process_bytes(&self, bytes: &[u8], source_name: &str) -> Result<ExtractionResult> {
        let text = self.source.document_text(bytes, source_name)?;
        let mut result = parser::parse_document(&text);
        result.apply_overrides(&self.overrides);
        info!(
            source = source_name,
            chars = text.char_len(),
            cursadas = result.courses.cursadas.len(),
            andamento = result.courses.andamento.len(),
            dispensadas = result.courses.dispensadas.len(),
            "document parsed"
        );
        Ok(result)
    }

    /// Nothing reaches `writer` unless the whole document parsed.
    pub fn run_streamed<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<()> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ParseError::io("<stdin>", e))?;
        if bytes.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let result = if self.quiet_stdout {
            let gag = Gag::stdout().map_err(|e| ParseError::io("<stdout>", e))?;
            let parsed = self.process_bytes(&bytes, "stdin");
            // flush buffered library output while fd 1 still points at the sink
            let _ = io::stdout().flush();
            drop(gag);
            parsed?
        } else {
            self.process_bytes(&bytes, "stdin")?
        };
        output::write_line(writer, &result)?;
        Ok(())
    }

    /// Returns the written JSON paths, in input order.
    pub fn run_paths(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if let [single] = paths {
            return Ok(vec![self.process_path(single)?]);
        }

        let outcomes: Vec<Result<PathBuf>> = paths.par_iter().map(|p| self.process_path(p)).collect();

        let mut written = Vec::with_capacity(outcomes.len());
        let mut first_err = None;
        for (path, outcome) in paths.iter().zip(outcomes) {
            match outcome {
                Ok(out) => written.push(out),
                Err(e) => {
                    error!(path = %path.display(), error = %e, "document failed");
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e.context(format!("{} of {} documents failed", paths.len() - written.len(), paths.len()))),
            None => Ok(written),
        }
    }

    fn process_path(&self, path: &Path) -> Result<PathBuf> {
        info!("Processing PDF: {}", path.display());
        let bytes = fs::read(path).map_err(|e| ParseError::io(path, e))?;
        let source_name = path.display().to_string();
        let result = self
            .process_bytes(&bytes, &source_name)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let out_path = output::json_path_for(path, self.output_dir.as_deref());
        info!("Output will be saved to: {}", out_path.display());
        let rendered = output::render_pretty(&result)?;
        fs::write(&out_path, rendered).map_err(|e| ParseError::io(&out_path, e))?;
        info!("saved to: {}", out_path.display());
        Ok(out_path)
    }
}
