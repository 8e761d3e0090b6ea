//! Reporting of a finished run: text summary, convergence chart and JSON export

use crate::config::RunConfig;
use serde::{Deserialize, Serialize};
use swarm_optimization::OptimizationResult;

pub const CHART_TITLE: &str = "Best value per iteration";
pub const X_LABEL: &str = "Iteration";
pub const Y_LABEL: &str = "Best f(x) value";

const LABEL_WIDTH: usize = 11;
const GRID_SPACING: usize = 5;

/// Outcome of a run together with the configuration that produced it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub config: RunConfig,
    pub result: OptimizationResult,
}

impl Report {
    pub fn new(config: RunConfig, result: OptimizationResult) -> Self {
        Self { config, result }
    }

    pub fn summary(&self) -> String {
        format!(
            "Minimum value: {}\nBest x position: {}",
            self.result.best_value, self.result.best_position
        )
    }

    /// Exact minimizer of the configured quadratic within the search bounds.
    pub fn analytic_minimizer(&self) -> f64 {
        self.config.objective.minimizer(&self.config.swarm.bounds)
    }

    /// Distance between the swarm's best position and the exact minimizer.
    pub fn position_error(&self) -> f64 {
        (self.result.best_position - self.analytic_minimizer()).abs()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the history as a text line chart, `width` columns by
    /// `height` rows of plot area, with a dotted grid.
    pub fn render_chart(&self, width: usize, height: usize) -> String {
        render_history(&self.result.history, width, height)
    }
}

/// Line chart of `history` against 1-based iteration numbers.
pub fn render_history(history: &[f64], width: usize, height: usize) -> String {
    let width = width.max(2);
    let height = height.max(2);
    let mut out = String::new();

    let total = LABEL_WIDTH + 2 + width;
    out.push_str(&format!("{:^total$}\n", CHART_TITLE, total = total));
    out.push_str(Y_LABEL);
    out.push('\n');

    if history.is_empty() {
        out.push_str("(no iterations)\n");
        return out;
    }

    let max = history.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = history.iter().copied().fold(f64::INFINITY, f64::min);
    let span = max - min;

    let row_of = |v: f64| -> usize {
        if span <= 0.0 {
            (height - 1) / 2
        } else {
            (((max - v) / span) * (height - 1) as f64).round() as usize
        }
    };

    // value at each column by linear interpolation along the iterations
    let last = (history.len() - 1) as f64;
    let rows: Vec<usize> = (0..width)
        .map(|col| {
            let t = col as f64 * last / (width - 1) as f64;
            let lo = t.floor() as usize;
            let hi = (lo + 1).min(history.len() - 1);
            let frac = t - lo as f64;
            row_of(history[lo] + (history[hi] - history[lo]) * frac)
        })
        .collect();

    let mut grid = vec![vec![' '; width]; height];
    for (r, line) in grid.iter_mut().enumerate() {
        for (c, cell) in line.iter_mut().enumerate() {
            if r % GRID_SPACING == 0 || c % (GRID_SPACING * 2) == 0 {
                *cell = '.';
            }
        }
    }
    for col in 0..width {
        let row = rows[col];
        let prev = if col == 0 { row } else { rows[col - 1] };
        for r in row.min(prev)..=row.max(prev) {
            grid[r][col] = '*';
        }
    }

    for (r, line) in grid.iter().enumerate() {
        let label = if r == 0 {
            format!("{:.3e}", max)
        } else if r == height - 1 {
            format!("{:.3e}", min)
        } else {
            String::new()
        };
        let line: String = line.iter().collect();
        out.push_str(&format!("{:>w$} |{}\n", label, line, w = LABEL_WIDTH));
    }

    out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(width), w = LABEL_WIDTH));
    let first = "1";
    let last_label = history.len().to_string();
    let gap = width.saturating_sub(first.len() + last_label.len());
    out.push_str(&format!(
        "{:>w$}  {}{}{}\n",
        "",
        first,
        " ".repeat(gap),
        last_label,
        w = LABEL_WIDTH
    ));
    out.push_str(&format!("{:>w$}  {:^width$}\n", "", X_LABEL, w = LABEL_WIDTH, width = width));
    out
}
