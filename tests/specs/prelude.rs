//! Shared helpers for driving the `tsh` binary.

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(10);

/// A `tsh` invocation under construction.
pub struct Tsh {
    cmd: assert_cmd::Command,
}

/// `tsh -p` (no prompt), ready for a script.
pub fn tsh() -> Tsh {
    let mut tsh = cli();
    tsh.cmd.arg("-p");
    tsh
}

/// Bare `tsh` with no arguments.
pub fn cli() -> Tsh {
    let mut cmd = assert_cmd::Command::cargo_bin("tsh").unwrap();
    cmd.timeout(Duration::from_secs(30)).env_remove("TSH_LOG");
    Tsh { cmd }
}

impl Tsh {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Feed `lines` to stdin, one per line.
    pub fn script(mut self, lines: &[&str]) -> Self {
        let mut input = lines.join("\n");
        input.push('\n');
        self.cmd.write_stdin(input);
        self
    }

    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run::from(output);
        assert_eq!(run.code, Some(0), "tsh failed:\n{}", run.describe());
        run
    }
}

/// Captured result of one invocation.
pub struct Run {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
}

impl From<std::process::Output> for Run {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        }
    }
}

impl Run {
    fn describe(&self) -> String {
        format!("stdout:\n{}\nstderr:\n{}", self.stdout, self.stderr)
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "expected stdout to contain {needle:?}\n{}",
            self.describe()
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout.contains(needle),
            "expected stdout not to contain {needle:?}\n{}",
            self.describe()
        );
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    /// Stdout lines, in order.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Extract the pid from a `[jid] (pid) ...` or `Job [jid] (pid) ...` line.
pub fn pid_in(line: &str) -> i32 {
    let start = line.find('(').unwrap() + 1;
    let end = line[start..].find(')').unwrap() + start;
    line[start..end].parse().unwrap()
}

/// A live `tsh -p -v` process driven one line at a time.
///
/// Stdout and stderr are read on background threads so the test can wait
/// for a specific line with a deadline.
pub struct Session {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Receiver<String>,
    stderr: Receiver<String>,
}

impl Session {
    /// Start the interpreter and wait until it is reading commands.
    pub fn start() -> Self {
        let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("tsh"))
            .args(["-p", "-v"])
            .env_remove("TSH_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let stdin = child.stdin.take();
        let stdout = lines_of(child.stdout.take().unwrap());
        let stderr = lines_of(child.stderr.take().unwrap());

        let mut session = Self {
            child,
            stdin,
            stdout,
            stderr,
        };
        // Signal streams are registered before the first line is read.
        session.send("/bin/echo ready");
        session.expect_stdout("ready");
        session
    }

    pub fn send(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().unwrap();
        writeln!(stdin, "{line}").unwrap();
        stdin.flush().unwrap();
    }

    /// Deliver `sig` to the interpreter itself.
    pub fn signal(&self, sig: Signal) {
        kill(Pid::from_raw(self.child.id() as i32), sig).unwrap();
    }

    /// Next stdout line; fails if it does not contain `needle`.
    pub fn expect_stdout(&self, needle: &str) -> String {
        let line = self
            .stdout
            .recv_timeout(WAIT)
            .unwrap_or_else(|_| panic!("no stdout line while waiting for {needle:?}"));
        assert!(line.contains(needle), "expected {needle:?}, got {line:?}");
        line
    }

    /// Skip diagnostics until one contains `needle`.
    pub fn expect_log(&self, needle: &str) {
        let deadline = Instant::now() + WAIT;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = self
                .stderr
                .recv_timeout(remaining)
                .unwrap_or_else(|_| panic!("no log line containing {needle:?}"));
            if line.contains(needle) {
                return;
            }
        }
    }

    /// Close stdin and return the exit code once the interpreter exits.
    pub fn finish(mut self) -> Option<i32> {
        drop(self.stdin.take());
        self.wait()
    }

    /// Exit code once the interpreter exits on its own.
    pub fn wait(mut self) -> Option<i32> {
        let deadline = Instant::now() + WAIT;
        loop {
            if let Some(status) = self.child.try_wait().unwrap() {
                return status.code();
            }
            if Instant::now() > deadline {
                let _ = self.child.kill();
                panic!("tsh did not exit");
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn lines_of(stream: impl Read + Send + 'static) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stream).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
