use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, Result};
use crate::model::ExtractionResult;

/// Single JSON line, for stdout.
pub fn write_line<W: Write>(mut writer: W, result: &ExtractionResult) -> Result<()> {
    let mut line = serde_json::to_vec(result)?;
    line.push(b'\n');
    writer.write_all(&line).map_err(|e| ParseError::io("<stdout>", e))?;
    writer.flush().map_err(|e| ParseError::io("<stdout>", e))?;
    Ok(())
}

/// Two-space indented JSON, for files.
pub fn render_pretty(result: &ExtractionResult) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(result)?)
}

/// `transcript.pdf` / `transcript.PDF` become `transcript.json`. Inputs without a
/// pdf extension get `.json` appended so the input is never overwritten.
pub fn json_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let is_pdf = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let file_name = if is_pdf {
        input.with_extension("json").file_name().map(OsString::from)
    } else {
        input.file_name().map(|name| {
            let mut name = name.to_os_string();
            name.push(".json");
            name
        })
    }
    .unwrap_or_else(|| OsString::from("output.json"));

    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
