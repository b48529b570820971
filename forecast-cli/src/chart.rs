use chrono::NaiveDate;
use forecast_core::{ForecastRow, Units};

const BAR_WIDTH: usize = 40;
const RESET: &str = "\u{1b}[0m";

/// Colors for the three temperature series.
///
/// One RGB triple recolors all three series at once: the current and
/// maximum series reuse the same channels in a different order, so the
/// group stays visually related however the channels are set.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub minimum: (u8, u8, u8),
    pub current: (u8, u8, u8),
    pub maximum: (u8, u8, u8),
}

impl SeriesColors {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            minimum: (red, green, blue),
            current: (green, red, blue),
            maximum: (blue, green, red),
        }
    }
}

/// Render grouped minimum/current/maximum bars for the rows of one day.
///
/// `rows` are (hour-of-day, row) pairs in provider order, as produced by
/// `ForecastTable::rows_for_day`. A day without rows renders a note
/// instead of an empty axis.
pub fn render(
    city: &str,
    day: NaiveDate,
    units: Units,
    rows: &[(u32, &ForecastRow)],
    colors: SeriesColors,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Current, Minimum, and Maximum Temperature - {city}, {day}\n"
    ));
    out.push_str(&format!(
        "Hours (24 hr) vs Temperature ({})\n\n",
        units.temperature_label()
    ));

    if rows.is_empty() {
        out.push_str(&format!("No forecast entries for {day}.\n"));
        return out;
    }

    let (axis_min, axis_max) = axis_bounds(rows);

    for (hour, row) in rows {
        out.push_str(&format!("{hour:02}:00\n"));
        out.push_str(&bar_line("min", row.temp_min, axis_min, axis_max, colors.minimum));
        out.push_str(&bar_line("cur", row.temp, axis_min, axis_max, colors.current));
        out.push_str(&bar_line("max", row.temp_max, axis_min, axis_max, colors.maximum));
        out.push('\n');
    }

    out
}

/// Shared axis over every plotted value, so the three series compare
/// across hours.
fn axis_bounds(rows: &[(u32, &ForecastRow)]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;

    for (_, row) in rows {
        for value in [row.temp_min, row.temp, row.temp_max] {
            lo = lo.min(value);
            hi = hi.max(value);
        }
    }

    (lo, hi)
}

fn bar_line(label: &str, value: f64, axis_min: f64, axis_max: f64, rgb: (u8, u8, u8)) -> String {
    let (r, g, b) = rgb;
    let filled = bar_cells(value, axis_min, axis_max);

    format!(
        "  {label}  \u{1b}[38;2;{r};{g};{b}m{}{RESET} {value:.1}\n",
        "\u{2588}".repeat(filled)
    )
}

/// Map a value onto 1..=BAR_WIDTH cells; the axis minimum still shows one
/// cell so every bar is visible.
fn bar_cells(value: f64, axis_min: f64, axis_max: f64) -> usize {
    let span = axis_max - axis_min;
    if span <= f64::EPSILON {
        return 1;
    }

    let scaled = (value - axis_min) / span * (BAR_WIDTH as f64 - 1.0);
    scaled.round() as usize + 1
}
