use std::{
    io::{BufRead as _, BufReader},
    path::{Path, PathBuf},
    process::{Child, ChildStdout, Command, ExitStatus, Stdio},
};

use crate::{
    foundation::error::{LayoutError, LayoutResult},
    page::model::Page,
    report::size_report::read_size_report,
};

/// How to invoke the document-composition tool.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TypesetterConfig {
    pub program: String,
    pub output_dir: PathBuf,
    pub document_class: String,
}

impl Default for TypesetterConfig {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            output_dir: PathBuf::from("."),
            document_class: "rjlnewsp4".to_string(),
        }
    }
}

/// The two runs of the document class: one that reports article sizes, one that
/// sets the page from a layout file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Sizing,
    Final,
}

impl Pass {
    pub fn class_option(self) -> &'static str {
        match self {
            Pass::Sizing => "sizing",
            Pass::Final => "layoutnews",
        }
    }
}

pub struct Typesetter {
    cfg: TypesetterConfig,
}

impl Typesetter {
    pub fn new(cfg: TypesetterConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &TypesetterConfig {
        &self.cfg
    }

    /// The command line for one pass over `file`. Nothing is spawned.
    pub fn command(&self, pass: Pass, file: &Path) -> Command {
        let mut output_dir = std::ffi::OsString::from("-output-directory=");
        output_dir.push(&self.cfg.output_dir);

        let mut cmd = Command::new(&self.cfg.program);
        cmd.arg("-interaction=nonstopmode")
            .arg(output_dir)
            .arg(format!(
                "\\PassOptionsToClass{{{}}}{{{}}} \\input{{{}}}",
                pass.class_option(),
                self.cfg.document_class,
                file.display()
            ));
        cmd
    }

    fn spawn(&self, pass: Pass, file: &Path) -> LayoutResult<(Child, ChildStdout)> {
        let mut cmd = self.command(pass, file);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        tracing::info!(
            program = %self.cfg.program,
            ?pass,
            file = %file.display(),
            "running typesetter"
        );

        let mut child = cmd.spawn().map_err(|e| {
            LayoutError::typesetter(format!(
                "failed to spawn '{}' (is it installed and on PATH?): {e}",
                self.cfg.program
            ))
        })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LayoutError::typesetter("failed to open typesetter stdout"))?;
        Ok((child, stdout))
    }

    fn wait(&self, child: &mut Child) -> LayoutResult<ExitStatus> {
        child.wait().map_err(|e| {
            LayoutError::typesetter(format!("failed to wait for '{}': {e}", self.cfg.program))
        })
    }

    /// Run the sizing pass and read back the page it reports.
    ///
    /// A non-zero exit is tolerated once a complete report has been read.
    pub fn sizing(&self, file: &Path) -> LayoutResult<Page> {
        let (mut child, stdout) = self.spawn(Pass::Sizing, file)?;
        let report = read_size_report(BufReader::new(stdout));
        // A child still running after a bad report is stopped here; its exit status
        // then says nothing about the typesetter.
        let killed = report.is_err()
            && matches!(child.try_wait(), Ok(None))
            && child.kill().is_ok();
        let status = self.wait(&mut child)?;

        match report {
            Ok(page) => {
                if !status.success() {
                    tracing::warn!(%status, "sizing pass exited unsuccessfully; using its report");
                }
                Ok(page)
            }
            Err(e) if killed || status.success() => Err(e),
            Err(e) => Err(LayoutError::typesetter(format!(
                "sizing pass of '{}' exited with {status}: {e}",
                self.cfg.program
            ))),
        }
    }

    /// Run the final pass that sets the page from its layout file.
    pub fn typeset(&self, file: &Path) -> LayoutResult<()> {
        let (mut child, stdout) = self.spawn(Pass::Final, file)?;
        for line in BufReader::new(stdout).split(b'\n') {
            match line {
                Ok(line) => tracing::debug!("{}", String::from_utf8_lossy(&line).trim_end()),
                Err(e) => {
                    tracing::warn!(%e, "lost typesetter output");
                    break;
                }
            }
        }
        let status = self.wait(&mut child)?;
        if !status.success() {
            return Err(LayoutError::typesetter(format!(
                "'{}' exited with {status} while setting '{}'",
                self.cfg.program,
                file.display()
            )));
        }
        tracing::info!(file = %file.display(), "page typeset");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/typeset/latex.rs"]
mod tests;
