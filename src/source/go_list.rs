//! `go list` backed package source.

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, ChildStderr, Command, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use super::{line_set, PackageSource};
use crate::error::SourceError;
use crate::parser::SelfIdentity;

/// Template producing one import record per package.
pub const RECORD_FORMAT: &str =
    r#"{{.ImportPath}} {{if .Module }}{{.Module.Path}}{{else}}_{{end}} {{join .Imports " "}}"#;

/// Template producing the self-identification line.
pub const SELF_FORMAT: &str = "{{.ImportPath}}{{if .Module }} {{.Module.Path}}{{end}}";

/// Runs the `go` tool in a working directory.
#[derive(Debug)]
pub struct GoListSource {
    go: String,
    dir: PathBuf,
    child: Option<Child>,
    stderr: Option<JoinHandle<String>>,
}

impl GoListSource {
    /// Creates a source running `go` in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_binary("go", dir)
    }

    /// Creates a source with an explicit `go` binary.
    pub fn with_binary(go: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            go: go.into(),
            dir: dir.into(),
            child: None,
            stderr: None,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.go);
        cmd.args(args).current_dir(&self.dir);
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.go, args.join(" "))
    }

    /// Runs a short `go list` query and returns its stdout.
    fn query(&self, args: &[&str]) -> Result<String, SourceError> {
        let command = self.describe(args);
        debug!(%command, "running query");

        let output = self
            .command(args)
            .output()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::Exited {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn record_args() -> [&'static str; 6] {
        ["list", "-deps", "-e", "-f", RECORD_FORMAT, "./..."]
    }
}

fn drain_stderr(mut stderr: ChildStderr) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = stderr.read_to_string(&mut buf);
        buf
    })
}

impl PackageSource for GoListSource {
    fn records(&mut self) -> Result<Box<dyn BufRead + Send>, SourceError> {
        if self.child.is_some() {
            return Err(SourceError::StreamConsumed);
        }

        let args = Self::record_args();
        let command = self.describe(&args);
        info!(%command, dir = %self.dir.display(), "starting record stream");

        let mut child = self
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| SourceError::Spawn {
            command,
            source: std::io::Error::other("stdout was not captured"),
        })?;
        self.stderr = child.stderr.take().map(drain_stderr);
        self.child = Some(child);

        Ok(Box::new(BufReader::new(stdout)))
    }

    fn self_identity(&mut self) -> Result<SelfIdentity, SourceError> {
        let out = self.query(&["list", "-f", SELF_FORMAT])?;
        Ok(SelfIdentity::parse(&out))
    }

    fn standard_packages(&mut self) -> Result<HashSet<String>, SourceError> {
        let out = self.query(&["list", "std"])?;
        Ok(line_set(&out))
    }

    fn finish(&mut self) -> Result<(), SourceError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let command = self.describe(&Self::record_args());

        let status = child.wait().map_err(|source| SourceError::Spawn {
            command: command.clone(),
            source,
        })?;
        let stderr = self
            .stderr
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        if !status.success() {
            return Err(SourceError::Exited {
                command,
                status,
                stderr: stderr.trim().to_string(),
            });
        }
        debug!(%command, "record stream finished");
        Ok(())
    }
}

impl Drop for GoListSource {
    fn drop(&mut self) {
        // a load aborted mid-stream leaves the producer running
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format_fields() {
        assert!(RECORD_FORMAT.starts_with("{{.ImportPath}} "));
        assert!(RECORD_FORMAT.contains("{{else}}_{{end}}"));
        assert!(SELF_FORMAT.contains("{{.Module.Path}}"));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let mut source = GoListSource::with_binary("showdeps-no-such-go-binary", ".");
        match source.records() {
            Err(SourceError::Spawn { command, .. }) => {
                assert!(command.starts_with("showdeps-no-such-go-binary list -deps"));
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected spawn failure"),
        }
        assert!(matches!(
            source.self_identity(),
            Err(SourceError::Spawn { .. })
        ));
    }

    #[test]
    fn test_finish_without_stream_is_ok() {
        let mut source = GoListSource::new(".");
        assert!(source.finish().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_producer_exits_after_drain() {
        let mut source = GoListSource::with_binary("false", ".");
        let mut out = String::new();
        source.records().unwrap().read_to_string(&mut out).unwrap();
        assert!(out.is_empty());

        match source.finish() {
            Err(SourceError::Exited { command, status, .. }) => {
                assert!(command.starts_with("false list -deps -e -f"), "{command}");
                assert_eq!(status.code(), Some(1));
            }
            other => panic!("expected exit failure, got {other:?}"),
        }
        // the child is reaped, a second finish has nothing to check
        assert!(source.finish().is_ok());
    }
}
