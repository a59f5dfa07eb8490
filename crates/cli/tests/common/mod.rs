//! CLI execution helpers for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Builder around the `icowatch` binary
pub struct IcowatchCommand {
    args: Vec<String>,
    stdin_data: Option<String>,
}

impl IcowatchCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin_data: None,
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Add a path argument
    pub fn dir(&mut self, dir: &Path) -> &mut Self {
        self.args.push(dir.display().to_string());
        self
    }

    /// Provide stdin data
    pub fn stdin(&mut self, data: &str) -> &mut Self {
        self.stdin_data = Some(data.to_string());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(binary_path());
        command
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    /// Run to completion
    pub fn output(&self) -> Output {
        let mut command = self.command();

        match &self.stdin_data {
            Some(data) => {
                use std::io::Write;

                command.stdin(Stdio::piped());
                let mut child = command.spawn().expect("failed to spawn icowatch");
                child
                    .stdin
                    .take()
                    .expect("stdin piped")
                    .write_all(data.as_bytes())
                    .expect("failed to write stdin");
                child.wait_with_output().expect("failed to wait for icowatch")
            }
            None => command
                .stdin(Stdio::null())
                .output()
                .expect("failed to run icowatch"),
        }
    }

    /// Start as a long-running watcher; killed when the guard drops
    pub fn spawn(&self) -> RunningWatcher {
        let child = self
            .command()
            .stdin(Stdio::null())
            .spawn()
            .expect("failed to spawn icowatch");
        RunningWatcher { child: Some(child) }
    }
}

/// A running `icowatch` process
pub struct RunningWatcher {
    child: Option<Child>,
}

impl RunningWatcher {
    /// Send SIGINT, as Ctrl+C would, and collect the exit status and output
    #[cfg(unix)]
    pub fn interrupt(mut self) -> Output {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let child = self.child.take().expect("watcher already stopped");
        kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).expect("failed to send SIGINT");
        child.wait_with_output().expect("failed to wait for icowatch")
    }
}

impl Drop for RunningWatcher {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_icowatch"))
}

/// Poll until `path` exists or `timeout` passes
pub fn wait_for_file(path: &Path, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    path.exists()
}
