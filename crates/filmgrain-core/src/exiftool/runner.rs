use std::io;
use std::path::Path;
use std::process::Command;

/// Raw result of one tool invocation, before any interpretation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Seam between the engine and the operating system. Tests substitute a
/// recording fake so no real binary is needed.
pub trait ToolRunner {
    fn run(&self, binary: &Path, args: &[String]) -> io::Result<ToolOutput>;
}

/// Runs the binary as a child process and captures both streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, binary: &Path, args: &[String]) -> io::Result<ToolOutput> {
        let output = Command::new(binary).args(args).output()?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
