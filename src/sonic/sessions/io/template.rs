use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::{debug, instrument};

use crate::sonic::sessions::error::{Result, ToolError};
use crate::sonic::sessions::model::SessionRecord;

/// Name under which the session list is exposed to templates.
pub const SESSIONS_VARIABLE: &str = "sessions";
/// Name of the template compiled into the binary.
pub const BUNDLED_TEMPLATE_NAME: &str = "sample.securecrt.tera";

const BUNDLED_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/templates/sample.securecrt.tera"
));

/// Where the template text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// The SecureCRT bulk-import template shipped with the tool.
    #[default]
    Bundled,
    /// A template file on disk.
    File(PathBuf),
}

impl TemplateSource {
    fn name(&self) -> String {
        match self {
            TemplateSource::Bundled => BUNDLED_TEMPLATE_NAME.to_string(),
            TemplateSource::File(path) => path.display().to_string(),
        }
    }

    fn load(&self) -> Result<String> {
        match self {
            TemplateSource::Bundled => Ok(BUNDLED_TEMPLATE.to_string()),
            TemplateSource::File(path) => read_template(path),
        }
    }
}

impl From<Option<PathBuf>> for TemplateSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map(TemplateSource::File).unwrap_or_default()
    }
}

/// Renders `sessions` through the template, binding them to `sessions`.
///
/// Output is not HTML, so autoescaping is disabled.
#[instrument(level = "info", skip_all, fields(template = %source.name(), session_count = sessions.len()))]
pub fn render_sessions(source: &TemplateSource, sessions: &[SessionRecord]) -> Result<String> {
    let name = source.name();
    let text = source.load()?;

    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(&name, &text)?;

    let mut context = Context::new();
    context.insert(SESSIONS_VARIABLE, sessions);

    let rendered = tera.render(&name, &context)?;
    debug!(bytes = rendered.len(), "template rendered");
    Ok(rendered)
}

fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ToolError::MissingTemplate(path.to_path_buf()),
        _ => ToolError::Io(err),
    })
}
