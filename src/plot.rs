// Plot model: owns the point groups and keeps the engine's view in sync

use crate::artifact::{ArtifactStore, TempFileStore};
use crate::data::PointData;
use crate::emitter::{CommandEmitter, CLEAR_COMMAND};
use crate::error::{PlotError, Result};
use crate::group::PointGroup;
use crate::session::{GnuplotProcess, Session};
use crate::style::StyleSpec;
use crate::{OutputFormat, PlotOptions};
use std::path::Path;
use tracing::{debug, warn};

/// A 1, 2 or 3 dimensional plot backed by a gnuplot session.
///
/// The dimensionality is fixed at construction and every point group added
/// later must match it. Groups can be added, removed and restyled at any
/// time; each change is reflected in the engine immediately.
///
/// Legend order follows insertion order. A restyled group moves to the end.
///
/// ```no_run
/// use gplot::Plot;
///
/// let mut plot = Plot::new(2, false, false)?;
/// plot.add_point_group("Sample 1", "points", [vec![1i32, 2, 3], vec![4, 8, 6]], vec![])?;
/// plot.set_title("Test Results")?;
/// plot.save_plot("results.png")?;
/// # Ok::<(), gplot::PlotError>(())
/// ```
pub struct Plot<S: Session = GnuplotProcess, A: ArtifactStore = TempFileStore> {
    session: S,
    store: A,
    emitter: CommandEmitter,
    dimensions: usize,
    active_count: usize,
    groups: Vec<PointGroup>,
    format: OutputFormat,
}

impl Plot {
    /// Start gnuplot and create an empty plot.
    ///
    /// `persist` keeps the gnuplot window open after the process exits;
    /// `debug` logs every command at info level.
    pub fn new(dimensions: usize, persist: bool, debug: bool) -> Result<Self> {
        check_dimensions(dimensions)?;
        let session = GnuplotProcess::spawn(persist)?;
        Self::with_session(dimensions, session, TempFileStore::new(), debug)
    }

    /// Start gnuplot and apply every setting in `options`
    pub fn with_options(options: &PlotOptions) -> Result<Self> {
        let mut plot = Self::new(options.dimensions, options.persist, options.debug)?;
        plot.apply_options(options)?;
        Ok(plot)
    }
}

impl<S: Session, A: ArtifactStore> Plot<S, A> {
    /// Create a plot on top of an existing session and artifact store
    pub fn with_session(dimensions: usize, session: S, store: A, debug: bool) -> Result<Self> {
        check_dimensions(dimensions)?;
        Ok(Self {
            session,
            store,
            emitter: CommandEmitter::new(dimensions, debug),
            dimensions,
            active_count: 0,
            groups: Vec::new(),
            format: OutputFormat::default(),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of groups currently drawn by the engine
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn group(&self, name: &str) -> Option<&PointGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn groups(&self) -> &[PointGroup] {
        &self.groups
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(PointGroup::name).collect()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn store(&self) -> &A {
        &self.store
    }

    /// Add a named group of points drawn with `style`.
    ///
    /// 1-d plots take a flat series; 2-d and 3-d plots take columns, at least
    /// as many as the style needs. Nothing changes if validation fails.
    ///
    /// ```no_run
    /// # use gplot::Plot;
    /// let mut plot = Plot::new(1, false, false)?;
    /// plot.add_point_group("Sample1", "points", vec![51i32, 8, 4, 11], vec![])?;
    /// # Ok::<(), gplot::PlotError>(())
    /// ```
    pub fn add_point_group(
        &mut self,
        name: &str,
        style: &str,
        data: impl Into<PointData>,
        specs: Vec<StyleSpec>,
    ) -> Result<()> {
        if self.group(name).is_some() {
            return Err(PlotError::DuplicateName {
                name: name.to_string(),
            });
        }
        let mut group = PointGroup::new(name, style, data.into(), specs, self.dimensions)?;
        self.emitter
            .emit(&mut group, self.active_count, &mut self.session, &mut self.store)?;
        self.active_count += 1;
        self.groups.push(group);
        Ok(())
    }

    /// Remove a group and redraw the remaining ones from scratch
    pub fn remove_point_group(&mut self, name: &str) -> Result<()> {
        let index = self.position(name)?;
        self.groups.remove(index);
        debug!(group = name, remaining = self.groups.len(), "removed point group");
        self.replay()
    }

    /// Draw an existing group with a different style, keeping its data.
    ///
    /// The new style is checked against the group's data before anything is
    /// removed. The group stays in the plot even if redrawing fails.
    pub fn reset_point_group_style(&mut self, name: &str, style: &str) -> Result<()> {
        let index = self.position(name)?;
        self.groups[index].validate_restyle(style)?;

        let mut group = self.groups.remove(index);
        group.set_style(style);
        self.groups.push(group);
        self.replay()
    }

    /// Send a raw gnuplot command
    pub fn cmd(&mut self, command: &str) -> Result<()> {
        self.emitter.issue(&mut self.session, command)
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        self.cmd(&format!("set title \"{}\"", title))
    }

    pub fn set_x_label(&mut self, label: &str) -> Result<()> {
        self.cmd(&format!("set xlabel '{}'", label))
    }

    pub fn set_y_label(&mut self, label: &str) -> Result<()> {
        self.cmd(&format!("set ylabel '{}'", label))
    }

    pub fn set_z_label(&mut self, label: &str) -> Result<()> {
        self.cmd(&format!("set zlabel '{}'", label))
    }

    /// Set up to three axis labels at once, in x, y, z order
    pub fn set_labels(&mut self, labels: &[&str]) -> Result<()> {
        if labels.is_empty() || labels.len() > 3 {
            return Err(PlotError::InvalidConfigValue(format!(
                "expected 1 to 3 axis labels, got {}",
                labels.len()
            )));
        }
        for (axis, label) in ["x", "y", "z"].iter().zip(labels) {
            self.cmd(&format!("set {}label '{}'", axis, label))?;
        }
        Ok(())
    }

    pub fn set_xrange(&mut self, start: i64, end: i64) -> Result<()> {
        self.cmd(&format!("set xrange [{}:{}]", start, end))
    }

    pub fn set_yrange(&mut self, start: i64, end: i64) -> Result<()> {
        self.cmd(&format!("set yrange [{}:{}]", start, end))
    }

    pub fn set_zrange(&mut self, start: i64, end: i64) -> Result<()> {
        self.cmd(&format!("set zrange [{}:{}]", start, end))
    }

    /// Switch `axis` (e.g. "x", "xy") to a logarithmic scale with `base`
    pub fn set_logscale(&mut self, axis: &str, base: i32) -> Result<()> {
        self.cmd(&format!("set logscale {} {}", axis, base))
    }

    pub fn set_mxtics(&mut self, n: u32) -> Result<()> {
        self.cmd(&format!("set mxtics {}", n))
    }

    pub fn set_mytics(&mut self, n: u32) -> Result<()> {
        self.cmd(&format!("set mytics {}", n))
    }

    pub fn set_mztics(&mut self, n: u32) -> Result<()> {
        self.cmd(&format!("set mztics {}", n))
    }

    /// Show a grid; an empty style selects `lt 1 lc rgb "grey"`
    pub fn set_grid(&mut self, style: &str) -> Result<()> {
        let style = if style.is_empty() {
            DEFAULT_GRID_STYLE
        } else {
            style
        };
        self.cmd(&format!("set grid {}", style))
    }

    /// Choose the format used by [`save_plot`](Self::save_plot). Unknown
    /// formats are rejected and the previous format is kept.
    pub fn set_format(&mut self, format: &str) -> Result<()> {
        match format.parse::<OutputFormat>() {
            Ok(parsed) => {
                self.format = parsed;
                Ok(())
            }
            Err(err) => {
                warn!(format, current = %self.format, "unsupported output format");
                Err(err)
            }
        }
    }

    /// Render the current plot to `path` in the configured format
    pub fn save_plot(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.active_count == 0 {
            return Err(PlotError::EmptyPlot);
        }
        self.cmd(&format!("set terminal {}", self.format))?;
        self.cmd(&format!("set output '{}'", path.as_ref().display()))?;
        self.cmd("replot")
    }

    /// Apply every configured one-line setting from `options`
    pub fn apply_options(&mut self, options: &PlotOptions) -> Result<()> {
        self.format = options.format;
        if let Some(title) = &options.title {
            self.set_title(title)?;
        }
        if !options.labels.is_empty() {
            let labels: Vec<&str> = options.labels.iter().map(String::as_str).collect();
            self.set_labels(&labels)?;
        }
        if let Some((start, end)) = options.xrange {
            self.set_xrange(start, end)?;
        }
        if let Some((start, end)) = options.yrange {
            self.set_yrange(start, end)?;
        }
        if let Some((start, end)) = options.zrange {
            self.set_zrange(start, end)?;
        }
        if let Some(log) = &options.logscale {
            self.set_logscale(&log.axis, log.base)?;
        }
        if let Some(grid) = &options.grid {
            self.set_grid(grid)?;
        }
        Ok(())
    }

    /// End the engine session
    pub fn close(&mut self) {
        self.session.terminate();
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.name() == name)
            .ok_or_else(|| PlotError::GroupNotFound {
                name: name.to_string(),
            })
    }

    /// Clear the engine's view and redraw every stored group in order
    fn replay(&mut self) -> Result<()> {
        self.emitter.issue(&mut self.session, CLEAR_COMMAND)?;
        self.active_count = 0;
        for group in &mut self.groups {
            self.emitter
                .emit(group, self.active_count, &mut self.session, &mut self.store)?;
            self.active_count += 1;
        }
        Ok(())
    }
}

pub const DEFAULT_GRID_STYLE: &str = "lt 1 lc rgb \"grey\"";

fn check_dimensions(dimensions: usize) -> Result<()> {
    if (1..=3).contains(&dimensions) {
        Ok(())
    } else {
        Err(PlotError::InvalidConfigValue(format!(
            "plots have 1, 2 or 3 dimensions, got {}",
            dimensions
        )))
    }
}
