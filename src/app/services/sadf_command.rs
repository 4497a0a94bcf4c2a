//! sadf command construction and execution
//!
//! Builds command lines of the form
//!
//! ```text
//! sadf <sadf opts> [-- <sar opts>] <target>
//! ```
//!
//! and runs them as a subprocess whose standard output is read line by line.
//! The device I/O recipe is `sadf -d -- -dp <target>`.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::str::FromStr;
use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, info};

use crate::app::services::line_source::read_raw_line;
use crate::constants::{
    DEFAULT_SADF_BINARY, DEFAULT_TARGET, DEVIO_SADF_OPTS, DEVIO_SAR_OPTS, SAR_OPTS_SEPARATOR,
};
use crate::{Error, Result};

// =============================================================================
// Target
// =============================================================================

/// What sadf should read: a data file or a day relative to today
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Path to a binary `saDD` file
    File(PathBuf),
    /// Non-positive day offset (`0` today, `-1` yesterday, ...)
    DayOffset(i32),
}

impl Target {
    /// Today's data file
    pub fn today() -> Self {
        Target::DayOffset(0)
    }

    /// Create a day offset target, rejecting days in the future
    pub fn day_offset(offset: i32) -> Result<Self> {
        if offset > 0 {
            return Err(Error::invalid_target(
                offset.to_string(),
                "day offsets must be zero or negative",
            ));
        }
        Ok(Target::DayOffset(offset))
    }

    /// Render the target as a single sadf argument
    ///
    /// Offset zero is written `-0`, the same form used when no target is
    /// given at all.
    pub fn to_arg(&self) -> OsString {
        match self {
            Target::File(path) => path.as_os_str().to_owned(),
            Target::DayOffset(0) => OsString::from(DEFAULT_TARGET),
            Target::DayOffset(offset) => OsString::from(offset.to_string()),
        }
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::today()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::File(path) => write!(f, "{}", path.display()),
            Target::DayOffset(0) => f.write_str(DEFAULT_TARGET),
            Target::DayOffset(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    /// Parse a target; empty input means today, integers are day offsets,
    /// anything else is a data file path
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Target::today());
        }

        match trimmed.parse::<i32>() {
            Ok(offset) => Target::day_offset(offset),
            Err(_) if trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'-') => Err(
                Error::invalid_target(trimmed, "day offset is not a valid integer"),
            ),
            Err(_) => Ok(Target::File(PathBuf::from(trimmed))),
        }
    }
}

// =============================================================================
// Command Builder
// =============================================================================

/// A sadf recipe: formatter options plus the underlying sar options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SadfCommand {
    binary: PathBuf,
    opts: Vec<String>,
    sar_opts: Vec<String>,
}

impl SadfCommand {
    /// Create a recipe from sadf options and sar options
    pub fn new<S: Into<String>>(
        opts: impl IntoIterator<Item = S>,
        sar_opts: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_SADF_BINARY),
            opts: opts.into_iter().map(Into::into).collect(),
            sar_opts: sar_opts.into_iter().map(Into::into).collect(),
        }
    }

    /// The device I/O recipe (`sadf -d -- -dp`)
    pub fn device_io() -> Self {
        Self::new(
            DEVIO_SADF_OPTS.iter().copied(),
            DEVIO_SAR_OPTS.iter().copied(),
        )
    }

    /// Use a specific sadf executable
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Arguments passed to sadf, excluding the executable itself
    ///
    /// The `--` separator is only emitted when there are sar options. A
    /// missing target becomes `-0`.
    pub fn args(&self, target: Option<&Target>) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.opts.iter().map(OsString::from).collect();

        if !self.sar_opts.is_empty() {
            args.push(OsString::from(SAR_OPTS_SEPARATOR));
            args.extend(self.sar_opts.iter().map(OsString::from));
        }

        args.push(
            target
                .map(Target::to_arg)
                .unwrap_or_else(|| OsString::from(DEFAULT_TARGET)),
        );
        args
    }

    /// Full command line as a display string
    pub fn command_line(&self, target: Option<&Target>) -> String {
        std::iter::once(self.binary.as_os_str().to_owned())
            .chain(self.args(target))
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Start sadf with stdout piped
    pub fn spawn(&self, target: Option<&Target>) -> Result<SadfOutput> {
        let command_line = self.command_line(target);
        info!("Running {}", command_line);

        let mut child = Command::new(&self.binary)
            .args(self.args(target))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::sadf_command(&command_line, format!("failed to start: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::sadf_command(&command_line, "stdout was not captured"))?;

        Ok(SadfOutput {
            command_line,
            child,
            stdout: BufReader::new(stdout),
        })
    }
}

impl Default for SadfCommand {
    fn default() -> Self {
        Self::device_io()
    }
}

// =============================================================================
// Running Process
// =============================================================================

/// Standard output of a running sadf process
#[derive(Debug)]
pub struct SadfOutput {
    command_line: String,
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl SadfOutput {
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// Next raw output line with its terminator stripped, `None` at end of output
    pub async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        read_raw_line(&mut self.stdout).await.map_err(|e| {
            Error::io(format!("Failed to read output of {}", self.command_line), e)
        })
    }

    /// Wait for sadf to exit and check its status
    pub async fn finish(mut self) -> Result<()> {
        let status = self.child.wait().await.map_err(|e| {
            Error::io(format!("Failed to wait for {}", self.command_line), e)
        })?;
        debug!("{} exited with {}", self.command_line, status);
        check_status(&self.command_line, status)
    }
}

fn check_status(command_line: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::sadf_command(
            command_line,
            format!("exited with {}", status),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(args: Vec<OsString>) -> String {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_args_with_sar_opts() {
        let command = SadfCommand::new(["-d"], ["-dp"]);
        let target = Target::File(PathBuf::from("datafile"));
        assert_eq!(joined(command.args(Some(&target))), "-d -- -dp datafile");
    }

    #[test]
    fn test_args_without_sar_opts() {
        let command = SadfCommand::new(["-h"], Vec::<&str>::new());
        let target: Target = "-1".parse().unwrap();
        assert_eq!(command.command_line(Some(&target)), "sadf -h -1");
    }

    #[test]
    fn test_missing_target_renders_minus_zero() {
        let command = SadfCommand::device_io();
        assert_eq!(command.command_line(None), "sadf -d -- -dp -0");
        assert_eq!(
            command.command_line(Some(&Target::today())),
            "sadf -d -- -dp -0"
        );
    }

    #[test]
    fn test_with_binary() {
        let command = SadfCommand::device_io().with_binary("/usr/lib/sysstat/sadf");
        assert_eq!(
            command.command_line(Some(&Target::DayOffset(-2))),
            "/usr/lib/sysstat/sadf -d -- -dp -2"
        );
    }

    #[test]
    fn test_target_from_str() {
        assert_eq!("".parse::<Target>().unwrap(), Target::DayOffset(0));
        assert_eq!("0".parse::<Target>().unwrap(), Target::DayOffset(0));
        assert_eq!("-0".parse::<Target>().unwrap(), Target::DayOffset(0));
        assert_eq!("-7".parse::<Target>().unwrap(), Target::DayOffset(-7));
        assert_eq!(
            "/var/log/sysstat/sa20".parse::<Target>().unwrap(),
            Target::File(PathBuf::from("/var/log/sysstat/sa20"))
        );
    }

    #[test]
    fn test_target_rejects_future_offsets() {
        assert!(matches!(
            "3".parse::<Target>(),
            Err(Error::InvalidTarget { .. })
        ));
        assert!(matches!(
            "--1".parse::<Target>(),
            Err(Error::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::DayOffset(0).to_string(), "-0");
        assert_eq!(Target::DayOffset(-1).to_string(), "-1");
        assert_eq!(
            Target::File(PathBuf::from("/var/log/sysstat/sa01")).to_string(),
            "/var/log/sysstat/sa01"
        );
    }

    #[tokio::test]
    async fn test_spawn_missing_binary() {
        let command = SadfCommand::device_io().with_binary("/nonexistent/sadf-reader-test");
        let result = command.spawn(None);
        assert!(matches!(result, Err(Error::SadfCommand { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_reads_lines_in_order() {
        // `echo` stands in for sadf and prints its arguments back
        let command = SadfCommand::new(["first"], Vec::<&str>::new()).with_binary("echo");
        let mut output = command.spawn(Some(&Target::DayOffset(-1))).unwrap();

        assert_eq!(output.next_line().await.unwrap(), Some(b"first -1".to_vec()));
        assert_eq!(output.next_line().await.unwrap(), None);
        assert!(output.finish().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_finish_reports_failure_status() {
        let command = SadfCommand::new(Vec::<String>::new(), Vec::<String>::new())
            .with_binary("false");
        let mut output = command.spawn(None).unwrap();
        while output.next_line().await.unwrap().is_some() {}
        assert!(matches!(
            output.finish().await,
            Err(Error::SadfCommand { .. })
        ));
    }
}
