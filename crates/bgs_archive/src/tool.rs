//! External archiving tool invocation.

use crate::error::ToolError;
use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

/// One archive creation call.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    /// Directory whose contents (relative layout preserved) go into the archive.
    pub staging_dir: &'a Utf8Path,
    /// Path of the archive to create, including extension.
    pub output_path: &'a Utf8Path,
    pub game: GameType,
    /// Number of files below `staging_dir`, for logging.
    pub file_count: usize,
    /// Upper bound on the tool's run time.
    pub timeout: Duration,
}

/// Something that turns a directory into a game archive.
///
/// Implementations must be callable from several threads; a call either
/// produces `output_path` or returns an error.
pub trait ArchiveTool: Send + Sync {
    /// Create the archive and return the tool's combined output.
    fn create_archive(&self, request: &ArchiveRequest<'_>) -> Result<String, ToolError>;
}

/// Runs the BSArch command line tool.
///
/// Invoked as `<program> pack <dir> <archive> <game flag> -mt [-z]`, optionally
/// through a launcher such as `wine` on non-Windows hosts.
#[derive(Debug, Clone)]
pub struct BsarchTool {
    program: Utf8PathBuf,
    launcher: Option<String>,
    compress: bool,
}

impl BsarchTool {
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
            launcher: None,
            compress: false,
        }
    }

    /// Run the tool through `launcher` (e.g. `wine`).
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = Some(launcher.into());
        self
    }

    /// Ask the tool to compress archive contents.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    fn arguments(&self, request: &ArchiveRequest<'_>) -> Vec<String> {
        let mut args = vec![
            "pack".to_string(),
            request.staging_dir.to_string(),
            request.output_path.to_string(),
            request.game.archive_flag().to_string(),
            "-mt".to_string(),
        ];
        if self.compress {
            args.push("-z".to_string());
        }
        args
    }

    fn command(&self, request: &ArchiveRequest<'_>) -> (String, Command) {
        let args = self.arguments(request);
        match &self.launcher {
            Some(launcher) => {
                let mut command = Command::new(launcher);
                command.arg(self.program.as_str()).args(&args);
                (launcher.clone(), command)
            }
            None => {
                let mut command = Command::new(self.program.as_std_path());
                command.args(&args);
                (self.program.to_string(), command)
            }
        }
    }
}

impl ArchiveTool for BsarchTool {
    fn create_archive(&self, request: &ArchiveRequest<'_>) -> Result<String, ToolError> {
        if !self.program.as_std_path().is_file() {
            return Err(ToolError::NotFound(self.program.clone()));
        }

        tracing::info!(
            "Creating {} ({} files) with {}",
            request.output_path,
            request.file_count,
            self.program
        );

        let (program, command) = self.command(request);
        let output = run_with_timeout(&program, command, request.timeout)?;

        let produced = std::fs::metadata(request.output_path.as_std_path())
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false);
        if !produced {
            return Err(ToolError::MissingOutput(request.output_path.to_path_buf()));
        }

        Ok(output)
    }
}

/// Run `command`, capturing stdout and stderr, and kill it after `timeout`.
///
/// Returns the combined output on a zero exit status.
pub(crate) fn run_with_timeout(
    program: &str,
    mut command: Command,
    timeout: Duration,
) -> Result<String, ToolError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ToolError::NotFound(Utf8PathBuf::from(program))
        } else {
            ToolError::Spawn {
                program: program.to_string(),
                source,
            }
        }
    })?;

    let (stdout, stderr) = spawn_readers(&mut child);

    let status = match child.wait_timeout(timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            tracing::warn!("{} exceeded {}s, killing it", program, timeout.as_secs());
            let _ = child.kill();
            let _ = child.wait();
            // Grandchildren may still hold the pipes open, so the readers are not joined
            return Err(ToolError::TimedOut {
                program: program.to_string(),
                after: timeout,
            });
        }
        Err(source) => {
            let _ = child.kill();
            return Err(ToolError::Spawn {
                program: program.to_string(),
                source,
            });
        }
    };

    let mut output = join_reader(stdout);
    let errors = join_reader(stderr);
    if !errors.trim().is_empty() {
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(&errors);
    }

    if status.success() {
        tracing::debug!("{} finished: {}", program, output.trim());
        Ok(output)
    } else {
        Err(ToolError::Exit {
            program: program.to_string(),
            status: status.to_string(),
            output: output.trim().to_string(),
        })
    }
}

type Reader = Option<JoinHandle<Vec<u8>>>;

fn spawn_readers(child: &mut Child) -> (Reader, Reader) {
    fn spawn<R: Read + Send + 'static>(stream: Option<R>) -> Reader {
        stream.map(|mut stream| {
            std::thread::spawn(move || {
                let mut buffer = Vec::new();
                let _ = stream.read_to_end(&mut buffer);
                buffer
            })
        })
    }

    (spawn(child.stdout.take()), spawn(child.stderr.take()))
}

fn join_reader(reader: Reader) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, root)
    }

    fn request<'a>(
        staging: &'a Utf8Path,
        output: &'a Utf8Path,
        timeout: Duration,
    ) -> ArchiveRequest<'a> {
        ArchiveRequest {
            staging_dir: staging,
            output_path: output,
            game: GameType::SkyrimSpecialEdition,
            file_count: 1,
            timeout,
        }
    }

    #[test]
    fn test_arguments() {
        let tool = BsarchTool::new("/tools/bsarch.exe");
        let staging = Utf8Path::new("/stage");
        let output = Utf8Path::new("/out/MyMod.bsa");
        let args = tool.arguments(&request(staging, output, Duration::from_secs(1)));
        assert_eq!(args, vec!["pack", "/stage", "/out/MyMod.bsa", "-sse", "-mt"]);

        let args = tool
            .with_compression(true)
            .arguments(&request(staging, output, Duration::from_secs(1)));
        assert_eq!(args.last().map(String::as_str), Some("-z"));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let (_temp, root) = temp_root();
        let tool = BsarchTool::new(root.join("missing.exe"));
        let output = root.join("out.bsa");
        let err = tool
            .create_archive(&request(&root, &output, Duration::from_secs(5)))
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_missing_launcher_is_not_found() {
        let (_temp, root) = temp_root();
        let program = root.join("bsarch.exe");
        std::fs::write(&program, b"").unwrap();
        let tool = BsarchTool::new(program.clone()).with_launcher("definitely-not-a-launcher-xyz");
        let output = root.join("out.bsa");
        let err = tool
            .create_archive(&request(&root, &output, Duration::from_secs(5)))
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        fn script_tool(root: &Utf8Path, body: &str) -> BsarchTool {
            let script = root.join("fake_bsarch.sh");
            std::fs::write(&script, body).unwrap();
            BsarchTool::new(script).with_launcher("sh")
        }

        #[test]
        fn test_successful_run_captures_output() {
            let (_temp, root) = temp_root();
            let tool = script_tool(&root, "echo \"packing $2\"\nprintf data > \"$3\"\n");
            let output = root.join("MyMod.bsa");

            let text = tool
                .create_archive(&request(&root, &output, Duration::from_secs(30)))
                .unwrap();
            assert!(text.contains("packing"));
            assert_eq!(std::fs::read(&output).unwrap(), b"data");
        }

        #[test]
        fn test_nonzero_exit_is_reported() {
            let (_temp, root) = temp_root();
            let tool = script_tool(&root, "echo broken >&2\nexit 3\n");
            let output = root.join("MyMod.bsa");

            let err = tool
                .create_archive(&request(&root, &output, Duration::from_secs(30)))
                .unwrap_err();
            match err {
                ToolError::Exit { output, .. } => assert!(output.contains("broken")),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_success_without_output_is_missing_output() {
            let (_temp, root) = temp_root();
            let tool = script_tool(&root, "exit 0\n");
            let output = root.join("MyMod.bsa");

            let err = tool
                .create_archive(&request(&root, &output, Duration::from_secs(30)))
                .unwrap_err();
            assert!(matches!(err, ToolError::MissingOutput(_)));
        }

        #[test]
        fn test_timeout_kills_tool() {
            let (_temp, root) = temp_root();
            let tool = script_tool(&root, "exec sleep 30\n");
            let output = root.join("MyMod.bsa");

            let started = std::time::Instant::now();
            let err = tool
                .create_archive(&request(&root, &output, Duration::from_millis(300)))
                .unwrap_err();
            assert!(matches!(err, ToolError::TimedOut { .. }));
            assert!(started.elapsed() < Duration::from_secs(20));
        }
    }
}
