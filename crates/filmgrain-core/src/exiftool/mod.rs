//! The engine around the external `exiftool` binary: argument synthesis,
//! invocation, and result interpretation.

mod args;
mod runner;

pub use args::FLASH_VALUES;
pub use runner::{SystemRunner, ToolOutput, ToolRunner};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ExecutionError, Result, ValidationError};
use crate::types::{MetadataRecord, RunOutcome};

pub struct ExifTool {
    binary: PathBuf,
    runner: Box<dyn ToolRunner>,
}

impl ExifTool {
    pub fn new(binary: impl Into<PathBuf>) -> ExifTool {
        ExifTool {
            binary: binary.into(),
            runner: Box::new(SystemRunner),
        }
    }

    pub fn with_runner(binary: impl Into<PathBuf>, runner: Box<dyn ToolRunner>) -> ExifTool {
        ExifTool {
            binary: binary.into(),
            runner,
        }
    }

    /// Writes every populated field of `record` to the given images. The
    /// whole record is validated before the tool is started.
    pub fn add_metadata(&self, images: &[String], record: &MetadataRecord) -> Result<RunOutcome> {
        require_images(images)?;
        let mut arguments = args::build_write_args(record)?;
        arguments.extend(images.iter().cloned());
        self.run(arguments, parse_standard)
    }

    /// Clears the named tags on the given images.
    pub fn remove_metadata(&self, images: &[String], tags: &[String]) -> Result<RunOutcome> {
        require_images(images)?;
        if tags.is_empty() {
            return Err(ValidationError::NoTags.into());
        }
        let mut arguments: Vec<String> = tags.iter().map(|tag| format!("-{tag}=")).collect();
        arguments.extend(images.iter().cloned());
        self.run(arguments, parse_standard)
    }

    /// Reads all metadata from the given images; the outcome message is the
    /// tool's JSON report.
    pub fn get_metadata(&self, images: &[String]) -> Result<RunOutcome> {
        require_images(images)?;
        let mut arguments: Vec<String> =
            ["-G1", "-json", "-api", "structformat=jsonq", "-a", "-s", "-q"]
                .iter()
                .map(ToString::to_string)
                .collect();
        arguments.extend(images.iter().cloned());
        self.run(arguments, parse_standard)
    }

    /// Dumps metadata (minus the ICC profile payload) as JSON into
    /// `output_file`, in the shape `import_metadata` accepts.
    pub fn export_metadata(&self, images: &[String], output_file: &Path) -> Result<RunOutcome> {
        require_images(images)?;
        let mut arguments: Vec<String> =
            ["-G", "-json", "-api", "structformat=jsonq", "--icc_profile:all"]
                .iter()
                .map(ToString::to_string)
                .collect();
        arguments.extend(images.iter().cloned());

        let outcome = self.run(arguments, parse_export)?;
        fs::write(output_file, &outcome.raw_stdout).map_err(|source| {
            ExecutionError::ExportFile {
                path: output_file.to_path_buf(),
                source,
            }
        })?;
        Ok(outcome)
    }

    /// Applies tags from a previously exported JSON file to the given images.
    pub fn import_metadata(&self, images: &[String], input_file: &Path) -> Result<RunOutcome> {
        require_images(images)?;
        let mut arguments = vec![format!("-json={}", input_file.display())];
        arguments.extend(images.iter().cloned());
        self.run(arguments, parse_import)
    }

    fn run(
        &self,
        arguments: Vec<String>,
        parse: fn(ToolOutput) -> RunOutcome,
    ) -> Result<RunOutcome> {
        tracing::debug!(
            "Running {} with {} arguments",
            self.binary.display(),
            arguments.len()
        );
        let output = self
            .runner
            .run(&self.binary, &arguments)
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => ExecutionError::MissingBinary(self.binary.clone()),
                _ => ExecutionError::Spawn {
                    binary: self.binary.clone(),
                    source: err,
                },
            })?;

        let outcome = parse(output);
        if !outcome.succeeded {
            return Err(ExecutionError::Tool {
                stderr: outcome.raw_stderr,
            }
            .into());
        }
        Ok(outcome)
    }
}

fn require_images(images: &[String]) -> std::result::Result<(), ValidationError> {
    if images.is_empty() {
        return Err(ValidationError::NoImages);
    }
    Ok(())
}

fn parse_standard(output: ToolOutput) -> RunOutcome {
    RunOutcome {
        succeeded: output.code == Some(0),
        message: output.stdout.trim().to_string(),
        raw_stdout: output.stdout.trim().to_string(),
        raw_stderr: output.stderr.trim().to_string(),
    }
}

fn parse_export(output: ToolOutput) -> RunOutcome {
    RunOutcome {
        succeeded: output.code == Some(0),
        message: output.stderr.trim().to_string(),
        raw_stdout: output.stdout.trim().to_string(),
        raw_stderr: output.stderr.trim().to_string(),
    }
}

// Heuristic: on imports covering several files the tool can exit 0 while
// leaving some files untouched, and the only signal is one diagnostic line
// per problem. More than one non-blank line is treated as failure whatever
// the exit code says.
fn parse_import(output: ToolOutput) -> RunOutcome {
    if output.code != Some(0) {
        return parse_standard(output);
    }

    let lines: Vec<&str> = output
        .stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() > 1 {
        return RunOutcome {
            succeeded: false,
            message: String::new(),
            raw_stdout: String::new(),
            raw_stderr: output.stderr.trim().to_string(),
        };
    }

    let info = lines.last().copied().unwrap_or_default().to_string();
    RunOutcome {
        succeeded: true,
        message: info.clone(),
        raw_stdout: info,
        raw_stderr: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeRunner {
        calls: Arc<Mutex<Vec<Vec<String>>>>,
        output: ToolOutput,
    }

    impl ToolRunner for FakeRunner {
        fn run(&self, _binary: &Path, args: &[String]) -> io::Result<ToolOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.clone())
        }
    }

    type Calls = Arc<Mutex<Vec<Vec<String>>>>;

    fn engine(output: ToolOutput) -> (ExifTool, Calls) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let runner = FakeRunner {
            calls: Arc::clone(&calls),
            output,
        };
        (ExifTool::with_runner("exiftool", Box::new(runner)), calls)
    }

    fn exit_zero(stdout: &str, stderr: &str) -> ToolOutput {
        ToolOutput {
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn write_appends_images_after_tags() {
        let (tool, calls) = engine(exit_zero("1 image files updated", ""));
        let record = MetadataRecord {
            origin_city: Some("Wellington".to_string()),
            ..MetadataRecord::default()
        };
        tool.add_metadata(&strings(&["a.jpg", "b.jpg"]), &record)
            .unwrap();

        let calls = calls.lock().unwrap();
        let args = &calls[0];
        assert_eq!(args[0], "-iptc:CodedCharacterSet=UTF8");
        assert_eq!(&args[args.len() - 2..], ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn empty_record_never_spawns() {
        let (tool, calls) = engine(exit_zero("", ""));
        let err = tool
            .add_metadata(&strings(&["a.jpg"]), &MetadataRecord::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::NothingToWrite)
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn invalid_field_never_spawns() {
        let (tool, calls) = engine(exit_zero("", ""));
        let record = MetadataRecord {
            exposure_iso: Some("abc".to_string()),
            ..MetadataRecord::default()
        };
        let err = tool.add_metadata(&strings(&["a.jpg"]), &record).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn no_images_rejected() {
        let (tool, calls) = engine(exit_zero("", ""));
        let record = MetadataRecord {
            origin_city: Some("Wellington".to_string()),
            ..MetadataRecord::default()
        };
        assert!(matches!(
            tool.add_metadata(&[], &record),
            Err(Error::Validation(ValidationError::NoImages))
        ));
        assert!(matches!(
            tool.get_metadata(&[]),
            Err(Error::Validation(ValidationError::NoImages))
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn remove_requires_tags() {
        let (tool, _) = engine(exit_zero("", ""));
        assert!(matches!(
            tool.remove_metadata(&strings(&["a.jpg"]), &[]),
            Err(Error::Validation(ValidationError::NoTags))
        ));
    }

    #[test]
    fn remove_emits_clearing_assignments() {
        let (tool, calls) = engine(exit_zero("1 image files updated", ""));
        tool.remove_metadata(
            &strings(&["a.jpg"]),
            &strings(&["EXIF:Artist", "IPTC:By-line"]),
        )
        .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], ["-EXIF:Artist=", "-IPTC:By-line=", "a.jpg"]);
    }

    #[test]
    fn get_uses_report_flags() {
        let (tool, calls) = engine(exit_zero("[{}]", ""));
        let outcome = tool.get_metadata(&strings(&["a.jpg"])).unwrap();
        assert_eq!(outcome.message, "[{}]");

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0],
            [
                "-G1",
                "-json",
                "-api",
                "structformat=jsonq",
                "-a",
                "-s",
                "-q",
                "a.jpg"
            ]
        );
    }

    #[test]
    fn tool_failure_carries_diagnostics() {
        let (tool, _) = engine(ToolOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "Error: File not found - a.jpg\n".to_string(),
        });
        let err = tool.get_metadata(&strings(&["a.jpg"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ExifTool error: Error: File not found - a.jpg"
        );
    }

    #[test]
    fn export_writes_report_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export.json");

        let (tool, calls) = engine(exit_zero("[{\"SourceFile\": \"a.jpg\"}]\n", "1 image files read\n"));
        let outcome = tool.export_metadata(&strings(&["a.jpg"]), &out).unwrap();

        assert_eq!(outcome.message, "1 image files read");
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "[{\"SourceFile\": \"a.jpg\"}]"
        );
        let calls = calls.lock().unwrap();
        assert_eq!(
            &calls[0][..5],
            ["-G", "-json", "-api", "structformat=jsonq", "--icc_profile:all"]
        );
    }

    #[test]
    fn export_write_failure_is_execution_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("export.json");

        let (tool, _) = engine(exit_zero("[]", ""));
        let err = tool.export_metadata(&strings(&["a.jpg"]), &out).unwrap_err();
        assert!(matches!(
            err,
            Error::Execution(ExecutionError::ExportFile { .. })
        ));
    }

    #[test]
    fn import_points_tool_at_input_file() {
        let (tool, calls) = engine(exit_zero("", "1 image files updated\n"));
        let outcome = tool
            .import_metadata(&strings(&["a.jpg"]), Path::new("export.json"))
            .unwrap();
        assert_eq!(outcome.message, "1 image files updated");

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], ["-json=export.json", "a.jpg"]);
    }

    #[test]
    fn import_with_second_diagnostic_line_fails() {
        let (tool, _) = engine(exit_zero(
            "",
            "1 image files updated\n1 files weren't updated\n",
        ));
        let err = tool
            .import_metadata(&strings(&["a.jpg", "b.jpg"]), Path::new("export.json"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ExifTool error: 1 image files updated\n1 files weren't updated"
        );
    }

    #[test]
    fn import_with_silent_tool_succeeds() {
        let (tool, _) = engine(exit_zero("", ""));
        let outcome = tool
            .import_metadata(&strings(&["a.jpg"]), Path::new("export.json"))
            .unwrap();
        assert_eq!(outcome.message, "");
    }

    #[test]
    fn missing_binary_is_distinct() {
        let tool = ExifTool::new("/nonexistent/exiftool-binary");
        let err = tool.get_metadata(&strings(&["a.jpg"])).unwrap_err();
        assert!(matches!(
            err,
            Error::Execution(ExecutionError::MissingBinary(_))
        ));
    }
}
