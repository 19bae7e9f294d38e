use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use crate::sonic::sessions::error::{Result, ToolError};
use crate::sonic::sessions::generate::{LabCache, generate_sessions};
use crate::sonic::sessions::io::template::{TemplateSource, render_sessions};

/// Generates the sessions of `testbed_file`, renders them through `template`
/// and writes the result to `output`, replacing any existing file.
///
/// Returns the number of sessions rendered.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %testbed_file.display(), output = %output.display())
)]
pub fn dump(testbed_file: &Path, template: &TemplateSource, output: &Path) -> Result<usize> {
    if !testbed_file.exists() {
        return Err(ToolError::MissingInput(testbed_file.to_path_buf()));
    }

    let mut labs = LabCache::new();
    let sessions = generate_sessions(testbed_file, &mut labs)?;
    let rendered = render_sessions(template, &sessions)?;
    fs::write(output, rendered)?;
    info!(session_count = sessions.len(), "session file written");
    Ok(sessions.len())
}
