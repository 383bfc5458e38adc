// Command emission: turns point groups into plot/replot lines

use crate::artifact::ArtifactStore;
use crate::error::Result;
use crate::group::PointGroup;
use crate::session::Session;
use crate::style::join_specs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Verb for every curve after the first one
pub const OVERLAY_VERB: &str = "replot";

/// Command that wipes the engine's current view
pub const CLEAR_COMMAND: &str = "clear";

/// First-command verb for a plot of the given dimensionality
pub fn default_verb(dimensions: usize) -> &'static str {
    if dimensions == 3 {
        "splot"
    } else {
        "plot"
    }
}

/// Builds and dispatches the command for each point group.
///
/// Whether a command starts a new plot or overlays an existing one depends
/// only on the caller's active-group count, never on how many groups are
/// stored. After a clear the count is zero again and the next group gets the
/// first-command verb.
#[derive(Debug, Clone)]
pub struct CommandEmitter {
    dimensions: usize,
    echo: bool,
}

impl CommandEmitter {
    /// `echo` raises command logging from debug to info level
    pub fn new(dimensions: usize, echo: bool) -> Self {
        Self { dimensions, echo }
    }

    pub fn verb(&self, active_count: usize) -> &'static str {
        if active_count == 0 {
            default_verb(self.dimensions)
        } else {
            OVERLAY_VERB
        }
    }

    /// Full command text for `group` reading its data from `path`
    pub fn render(&self, verb: &str, path: &Path, group: &PointGroup) -> String {
        let mut parts = vec![verb.to_string(), format!("\"{}\"", path.display())];
        if !group.name().is_empty() {
            parts.push(format!("title \"{}\"", group.name()));
        }
        let attrs = join_specs(group.specs());
        if !attrs.is_empty() {
            parts.push(attrs);
        }
        parts.push(format!("with {}", group.style()));
        parts.join(" ")
    }

    /// Write the group's data file if it has none yet, then send its command.
    ///
    /// Returns the command that was issued. The caller owns the active count
    /// and increments it on success.
    pub fn emit<S: Session, A: ArtifactStore>(
        &self,
        group: &mut PointGroup,
        active_count: usize,
        session: &mut S,
        store: &mut A,
    ) -> Result<String> {
        let path = match group.artifact() {
            Some(path) => path.to_path_buf(),
            None => {
                let path = write_artifact(group, store)?;
                group.set_artifact(path.clone());
                path
            }
        };
        let command = self.render(self.verb(active_count), &path, group);
        self.issue(session, &command)?;
        Ok(command)
    }

    /// Send one raw line to the session, logging it
    pub fn issue<S: Session>(&self, session: &mut S, command: &str) -> Result<()> {
        if self.echo {
            info!(command, "gnuplot");
        } else {
            debug!(command, "gnuplot");
        }
        session.issue_command(command)?;
        Ok(())
    }
}

fn write_artifact<A: ArtifactStore>(group: &PointGroup, store: &mut A) -> Result<PathBuf> {
    let (path, handle) = store.create_artifact()?;
    let mut out = BufWriter::new(handle);
    group.normalized().write_rows(&mut out)?;
    out.flush()?;
    debug!(
        group = group.name(),
        path = %path.display(),
        rows = group.normalized().row_count(),
        "wrote data file"
    );
    Ok(path)
}
