// Engine sessions: where generated command lines are sent

use std::io::{self, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use tracing::debug;

/// Receiver of fully formed gnuplot command lines.
///
/// Implementations report transport failures only; engine-side errors are
/// never inspected.
pub trait Session {
    fn issue_command(&mut self, command: &str) -> io::Result<()>;

    /// End the session. Calling it more than once is harmless.
    fn terminate(&mut self);
}

/// A running `gnuplot` process fed through its stdin
pub struct GnuplotProcess {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
}

impl GnuplotProcess {
    /// Spawn `gnuplot`. With `persist` the plot window outlives the process.
    pub fn spawn(persist: bool) -> io::Result<Self> {
        Self::spawn_program("gnuplot", persist)
    }

    /// Spawn a specific gnuplot executable
    pub fn spawn_program(program: &str, persist: bool) -> io::Result<Self> {
        let mut command = Command::new(program);
        if persist {
            command.arg("-persist");
        }
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()?;
        let stdin = child.stdin.take();
        debug!(program, persist, pid = child.id(), "spawned plotting engine");
        Ok(Self {
            child: Some(child),
            stdin,
        })
    }
}

impl Session for GnuplotProcess {
    fn issue_command(&mut self, command: &str) -> io::Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "gnuplot session already terminated")
        })?;
        writeln!(stdin, "{}", command)?;
        stdin.flush()
    }

    fn terminate(&mut self) {
        if let Some(mut stdin) = self.stdin.take() {
            let _ = writeln!(stdin, "quit");
        }
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
            debug!("plotting engine exited");
        }
    }
}

impl Drop for GnuplotProcess {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Session that keeps every command instead of running an engine.
///
/// Used for dry runs (the recorded lines form a complete gnuplot script) and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptRecorder {
    commands: Vec<String>,
    terminated: bool,
}

impl ScriptRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn last(&self) -> Option<&str> {
        self.commands.last().map(String::as_str)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The recorded commands as one newline-terminated script
    pub fn script(&self) -> String {
        self.commands.iter().map(|c| format!("{}\n", c)).collect()
    }
}

impl Session for ScriptRecorder {
    fn issue_command(&mut self, command: &str) -> io::Result<()> {
        if self.terminated {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "recorder already terminated",
            ));
        }
        self.commands.push(command.to_string());
        Ok(())
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }
}
