// Which gnuplot styles are legal at which plot dimensionality

/// Style name -> (dimensionality, minimum number of data columns)
static PLOTTING_STYLES: &[(&str, &[(usize, usize)])] = &[
    ("lines", &[(1, 1), (2, 2), (3, 3)]),
    ("points", &[(1, 1), (2, 2), (3, 3)]),
    ("linepoints", &[(1, 1), (2, 2), (3, 3)]),
    ("linespoints", &[(1, 1), (2, 2), (3, 3)]),
    ("dots", &[(1, 1), (2, 2), (3, 3)]),
    ("impulses", &[(1, 1), (2, 3)]),
    ("boxes", &[(1, 1), (2, 3), (3, 5)]),
    ("steps", &[(1, 1), (2, 2)]),
    ("fsteps", &[(1, 1), (2, 2)]),
    ("histeps", &[(1, 1), (2, 2)]),
    ("circles", &[(2, 6)]),
    ("boxerrorbars", &[(2, 5)]),
    ("boxxyerrorbars", &[(2, 6)]),
    ("candlesticks", &[(2, 7)]),
    ("filledcurves", &[(2, 3)]),
    ("financebars", &[(2, 5)]),
    ("histograms", &[(2, 3)]),
    ("hsteps", &[(2, 3)]),
    ("image", &[(2, 3), (3, 4)]),
    ("labels", &[(2, 3), (3, 4)]),
    ("rgbimage", &[(2, 3), (3, 4)]),
    ("vectors", &[(2, 5), (3, 7)]),
    ("xerrorbars", &[(2, 4)]),
    ("xyerrorbars", &[(2, 6)]),
    ("yerrorbars", &[(2, 4)]),
    ("xyerrorlines", &[(2, 6)]),
    ("xerrorlines", &[(2, 4)]),
    ("yerrorlines", &[(2, 4)]),
];

/// Style used when a caller does not name one
pub const DEFAULT_STYLE: &str = "points";

/// Minimum column count for `style` at `dimensions`, or `None` when the
/// combination is not supported
pub fn is_supported(style: &str, dimensions: usize) -> Option<usize> {
    PLOTTING_STYLES
        .iter()
        .find(|(name, _)| *name == style)
        .and_then(|(_, dims)| dims.iter().find(|(d, _)| *d == dimensions))
        .map(|(_, min_cols)| *min_cols)
}

/// All style names usable at `dimensions`, in table order
pub fn supported_styles(dimensions: usize) -> Vec<&'static str> {
    PLOTTING_STYLES
        .iter()
        .filter(|(_, dims)| dims.iter().any(|(d, _)| *d == dimensions))
        .map(|(name, _)| *name)
        .collect()
}
