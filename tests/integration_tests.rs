use gplot::style::{line_color, point_size, point_type};
use gplot::{MemoryStore, Plot, PlotError, PlotOptions, PointData, ScriptRecorder, StyleSpec};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

fn recorded_plot(dimensions: usize) -> Plot<ScriptRecorder, MemoryStore> {
    Plot::with_session(dimensions, ScriptRecorder::new(), MemoryStore::new(), false)
        .expect("valid dimensions")
}

/// Extract the quoted data file path from a plot/replot command
fn data_path(command: &str) -> &Path {
    let start = command.find('"').expect("opening quote") + 1;
    let end = start + command[start..].find('"').expect("closing quote");
    Path::new(&command[start..end])
}

#[test]
fn test_end_to_end_2d_points() {
    let mut plot = recorded_plot(2);
    plot.add_point_group(
        "A",
        "points",
        [vec![1i32, 2, 3, 4], vec![10, 20, 30, 40]],
        vec![],
    )
    .unwrap();

    assert_eq!(plot.active_count(), 1);
    let cmd = plot.session().last().unwrap();
    assert!(cmd.starts_with("plot \""));
    assert!(cmd.contains("title \"A\""));

    let contents = plot.store().contents(data_path(cmd)).unwrap();
    assert_eq!(contents, "1 10\n2 20\n3 30\n4 40\n");
}

#[test]
fn test_end_to_end_1d_unsupported_style() {
    let mut plot = recorded_plot(1);
    let err = plot
        .add_point_group("c", "circles", vec![1.0f64, 2.0, 3.0], vec![])
        .unwrap_err();
    assert!(matches!(err, PlotError::UnsupportedStyle { .. }));
    assert!(plot.groups().is_empty());
}

#[test]
fn test_1d_command_grammar() {
    let mut plot = recorded_plot(1);
    plot.add_point_group("", "lines", vec![2i16, 3, 4, 1], vec![])
        .unwrap();
    let untitled = plot.session().last().unwrap().to_string();
    let path = data_path(&untitled).display().to_string();
    assert_eq!(untitled, format!("plot \"{}\" with lines", path));

    let spec = StyleSpec::new([point_size(1.5), line_color("rgb", "grey")]);
    plot.add_point_group("Sample 1", "points", vec![5i64, 6], vec![spec])
        .unwrap();
    let titled = plot.session().last().unwrap().to_string();
    let path = data_path(&titled).display().to_string();
    assert_eq!(
        titled,
        format!(
            "replot \"{}\" title \"Sample 1\" ps 1.5 lc rgb \"grey\" with points",
            path
        )
    );
}

#[test]
fn test_specs_concatenate_in_declaration_order() {
    let mut plot = recorded_plot(2);
    let specs = vec![
        StyleSpec::new([point_type(7), point_size(0.7)]),
        StyleSpec::new([point_type(6), point_size(1.5), line_color("rgb", "grey")]),
    ];
    plot.add_point_group("Sample1", "points", [vec![51i32, 8], vec![4, 11]], specs)
        .unwrap();
    assert!(plot
        .session()
        .last()
        .unwrap()
        .ends_with("pt 7 ps 0.7 pt 6 ps 1.5 lc rgb \"grey\" with points"));
}

#[test]
fn test_unequal_columns_truncate_to_shortest() {
    let mut plot = recorded_plot(3);
    plot.add_point_group(
        "xyz",
        "points",
        [
            vec![1.0f32, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 2.0, 3.0],
            vec![1.0, 2.0, 3.0, 4.0],
        ],
        vec![],
    )
    .unwrap();
    let cmd = plot.session().last().unwrap();
    assert!(cmd.starts_with("splot \""));
    let contents = plot.store().contents(data_path(cmd)).unwrap();
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_support_matrix_matches_compatibility_table() {
    for dims in 1..=3 {
        for style in ["points", "lines", "circles", "yerrorbars", "vectors", "bogus"] {
            let data: PointData = if dims == 1 {
                vec![1.0f64, 2.0].into()
            } else {
                PointData::from(vec![vec![1.0f64, 2.0]; 7])
            };
            let mut plot = recorded_plot(dims);
            let result = plot.add_point_group("g", style, data, vec![]);
            let supported = gplot::compat::is_supported(style, dims).is_some();
            assert_eq!(result.is_ok(), supported, "{style} at {dims}-d");
            assert_eq!(plot.groups().len(), usize::from(supported));
        }
    }
}

#[test]
fn test_column_count_below_minimum() {
    let mut plot = recorded_plot(2);
    let err = plot
        .add_point_group("c", "circles", [vec![1.0f64], vec![2.0], vec![3.0]], vec![])
        .unwrap_err();
    match err {
        PlotError::DimensionMismatch { dimensions, .. } => assert_eq!(dimensions, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(plot.groups().is_empty());
}

#[test]
fn test_remove_and_readd_cycle() {
    let mut plot = recorded_plot(2);
    let data = || [vec![1i8, 2, 3], vec![3, 2, 1]];

    plot.add_point_group("A", "points", data(), vec![]).unwrap();
    plot.add_point_group("B", "lines", data(), vec![]).unwrap();
    plot.remove_point_group("B").unwrap();
    plot.remove_point_group("A").unwrap();
    assert_eq!(plot.active_count(), 0);
    assert_eq!(plot.session().last(), Some("clear"));

    plot.add_point_group("A", "points", data(), vec![]).unwrap();
    assert!(plot.session().last().unwrap().starts_with("plot "));

    assert!(matches!(
        plot.remove_point_group("B"),
        Err(PlotError::GroupNotFound { .. })
    ));
    assert_eq!(plot.active_count(), 1);
}

#[test]
fn test_options_applied_in_order() {
    let options = PlotOptions::from_json(
        r#"{"title": "Rates", "labels": ["time", "rate"], "yrange": [-2, 18], "grid": ""}"#,
    )
    .unwrap();
    let mut plot = recorded_plot(2);
    plot.apply_options(&options).unwrap();
    assert_eq!(
        plot.session().commands(),
        &[
            "set title \"Rates\"",
            "set xlabel 'time'",
            "set ylabel 'rate'",
            "set yrange [-2:18]",
            "set grid lt 1 lc rgb \"grey\"",
        ]
    );
}

#[test]
fn test_cli_dry_run_prints_script() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gplot"))
        .args([
            "--dry-run",
            "--dims",
            "2",
            "--name",
            "temps",
            "--columns",
            "time,temp",
            "--spec",
            "pt 7 lc rgb \"red\"",
            "--title",
            "Weather",
            "--output",
            "weather.pdf",
            "--format",
            "pdf",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gplot");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"time,temp,rate\n1,20.5,3\n2,21,4\n")
        .expect("Failed to write CSV");

    let output = child.wait_with_output().expect("Failed to wait for gplot");
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let script = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines[0], "set title \"Weather\"");
    assert!(lines[1].starts_with("plot \""));
    assert!(lines[1].ends_with("title \"temps\" pt 7 lc rgb \"red\" with points"));
    assert_eq!(&lines[2..], &["set terminal pdf", "set output 'weather.pdf'", "replot"]);
}

#[test]
fn test_cli_rejects_unsupported_style() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gplot"))
        .args(["--dry-run", "--dims", "1", "--style", "circles"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn gplot");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"v\n1\n2\n")
        .expect("Failed to write CSV");

    let output = child.wait_with_output().expect("Failed to wait for gplot");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("circles"));
}
