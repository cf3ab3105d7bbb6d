//! Invocation of the external Marp renderer.
//!
//! Runs `npx @marp-team/marp-cli <markdown> --pdf|--pptx --output <file>`.
//! The Markdown input is never touched, whatever the outcome.

use deck_core::ExportFormat;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// npm package providing the renderer.
pub const MARP_PACKAGE: &str = "@marp-team/marp-cli";

#[cfg(windows)]
const NPX: &str = "npx.cmd";
#[cfg(not(windows))]
const NPX: &str = "npx";

/// Errors from running the external renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The renderer (or the runtime it needs) could not be located.
    #[error("Marp renderer not found: {program} ({reason}). Install Node.js and make `npx` available, or pass --node-path")]
    NotFound { program: PathBuf, reason: String },

    /// The renderer ran and reported failure.
    #[error("Marp renderer failed ({status}): {diagnostics}")]
    Failed { status: String, diagnostics: String },

    /// Any other failure to start the renderer.
    #[error("Failed to start Marp renderer: {0}")]
    Spawn(#[from] io::Error),
}

/// Runs the Marp CLI through `npx`.
#[derive(Debug, Clone)]
pub struct MarpRenderer {
    program: PathBuf,
    leading_args: Vec<OsString>,

    /// Node executable; `npx` is then taken from the same directory.
    node_path: Option<PathBuf>,

    /// Directory for exported files instead of the Markdown's own.
    output_dir: Option<PathBuf>,
}

impl Default for MarpRenderer {
    fn default() -> Self {
        Self {
            program: PathBuf::from(NPX),
            leading_args: vec![OsString::from(MARP_PACKAGE)],
            node_path: None,
            output_dir: None,
        }
    }
}

impl MarpRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_path(mut self, node_path: Option<PathBuf>) -> Self {
        self.node_path = node_path;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// Replace the launcher and the arguments placed before the Markdown path.
    #[cfg(test)]
    pub fn with_program<I, S>(mut self, program: impl Into<PathBuf>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.program = program.into();
        self.leading_args = leading_args.into_iter().map(Into::into).collect();
        self
    }

    /// Where an export of `markdown` lands: same stem, format extension, in
    /// the output directory or next to the Markdown file.
    pub fn output_path(&self, markdown: &Path, format: ExportFormat) -> PathBuf {
        let exported = markdown.with_extension(format.extension());
        match (&self.output_dir, exported.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => exported,
        }
    }

    /// The launcher to execute. A node override that does not exist is
    /// reported instead of falling back to the search path.
    fn resolve_program(&self) -> Result<PathBuf, RenderError> {
        match &self.node_path {
            Some(node) if !node.exists() => Err(RenderError::NotFound {
                program: node.clone(),
                reason: "node path does not exist".to_string(),
            }),
            Some(node) => Ok(node
                .parent()
                .map(|dir| dir.join(NPX))
                .unwrap_or_else(|| PathBuf::from(NPX))),
            None => Ok(self.program.clone()),
        }
    }

    /// Build the renderer command for one export.
    pub fn command(&self, markdown: &Path, format: ExportFormat) -> Result<Command, RenderError> {
        let program = self.resolve_program()?;
        let mut command = Command::new(program);
        if self.node_path.is_some() {
            command.arg(MARP_PACKAGE);
        } else {
            command.args(&self.leading_args);
        }
        command
            .arg(markdown)
            .arg(format.flag())
            .arg("--output")
            .arg(self.output_path(markdown, format));
        Ok(command)
    }

    /// Export `markdown` and return the produced file's path.
    pub fn render(&self, markdown: &Path, format: ExportFormat) -> Result<PathBuf, RenderError> {
        let output_path = self.output_path(markdown, format);
        let mut command = self.command(markdown, format)?;
        log::debug!("Running {:?}", command);

        let output = command.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RenderError::NotFound {
                program: PathBuf::from(command.get_program()),
                reason: e.to_string(),
            },
            _ => RenderError::Spawn(e),
        })?;

        if !output.status.success() {
            let mut diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.trim().is_empty() {
                if !diagnostics.is_empty() {
                    diagnostics.push('\n');
                }
                diagnostics.push_str(stdout.trim());
            }
            return Err(RenderError::Failed {
                status: output.status.to_string(),
                diagnostics,
            });
        }

        log::info!("Exported {}", output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(command: &Command) -> Vec<String> {
        command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_output_path_next_to_markdown() {
        let renderer = MarpRenderer::new();
        assert_eq!(
            renderer.output_path(Path::new("talks/intro.md"), ExportFormat::Pdf),
            PathBuf::from("talks/intro.pdf")
        );
        assert_eq!(
            renderer.output_path(Path::new("intro.md"), ExportFormat::Pptx),
            PathBuf::from("intro.pptx")
        );
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let renderer = MarpRenderer::new().with_output_dir(Some(PathBuf::from("out")));
        assert_eq!(
            renderer.output_path(Path::new("talks/intro.md"), ExportFormat::Pdf),
            PathBuf::from("out/intro.pdf")
        );
    }

    #[test]
    fn test_default_command_line() {
        let command = MarpRenderer::new()
            .command(Path::new("deck.md"), ExportFormat::Pdf)
            .unwrap();

        assert_eq!(command.get_program(), NPX);
        assert_eq!(
            args(&command),
            vec![MARP_PACKAGE, "deck.md", "--pdf", "--output", "deck.pdf"]
        );
    }

    #[test]
    fn test_node_path_resolves_sibling_npx() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("node");
        std::fs::write(&node, b"").unwrap();

        let command = MarpRenderer::new()
            .with_node_path(Some(node))
            .command(Path::new("deck.md"), ExportFormat::Pptx)
            .unwrap();

        assert_eq!(command.get_program(), dir.path().join(NPX).as_os_str());
        assert_eq!(
            args(&command),
            vec![MARP_PACKAGE, "deck.md", "--pptx", "--output", "deck.pptx"]
        );
    }

    #[test]
    fn test_missing_node_path_is_not_found() {
        let renderer = MarpRenderer::new().with_node_path(Some(PathBuf::from("/nonexistent/node")));
        let result = renderer.render(Path::new("deck.md"), ExportFormat::Pdf);
        assert!(matches!(result, Err(RenderError::NotFound { .. })));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let renderer =
            MarpRenderer::new().with_program("/nonexistent/txt2slides-renderer", Vec::<String>::new());
        let result = renderer.render(Path::new("deck.md"), ExportFormat::Pdf);
        assert!(matches!(result, Err(RenderError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_render_returns_output_path() {
        let renderer = MarpRenderer::new().with_program("true", Vec::<String>::new());
        let output = renderer
            .render(Path::new("slides/deck.md"), ExportFormat::Pdf)
            .unwrap();
        assert_eq!(output, PathBuf::from("slides/deck.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_reports_diagnostics() {
        let renderer = MarpRenderer::new()
            .with_program("sh", ["-c", "echo 'theme not found' >&2; exit 3", "sh"]);

        match renderer.render(Path::new("deck.md"), ExportFormat::Pptx) {
            Err(RenderError::Failed {
                status,
                diagnostics,
            }) => {
                assert!(status.contains('3'), "status: {}", status);
                assert_eq!(diagnostics, "theme not found");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
