//! Column statistics used by the readiness report and the data description.
//!
//! Columns are `Option<f64>` so missing values are skipped the same way for
//! every statistic: correlations use pairwise-complete observations, and
//! summaries only count present values.

use std::fmt::Display;

pub struct Column<'a> {
    pub name: &'a str,
    pub values: Vec<Option<f64>>,
}

impl<'a> Column<'a> {
    pub fn new(name: &'a str, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            name,
            values: values.into_iter().collect(),
        }
    }
}

/// Pearson correlation over the pairs where both values are present.
/// `None` with fewer than two pairs or when either side has no variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs = x
        .iter()
        .zip(y)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect::<Vec<_>>();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (cov, var_x, var_y) = pairs.iter().fold((0.0, 0.0, 0.0), |(cov, vx, vy), (x, y)| {
        let dx = x - mean_x;
        let dy = y - mean_y;
        (cov + dx * dy, vx + dx * dx, vy + dy * dy)
    });

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let row = self.labels.iter().position(|l| l == row)?;
        let col = self.labels.iter().position(|l| l == col)?;
        self.values[row][col]
    }
}

pub fn correlation_matrix(columns: &[Column<'_>]) -> CorrelationMatrix {
    let values = columns
        .iter()
        .enumerate()
        .map(|(i, a)| {
            columns
                .iter()
                .enumerate()
                .map(|(j, b)| {
                    let r = pearson(&a.values, &b.values);
                    if i == j { r.map(|_| 1.0) } else { r }
                })
                .collect()
        })
        .collect();

    CorrelationMatrix {
        labels: columns.iter().map(|c| c.name.to_string()).collect(),
        values,
    }
}

impl Display for CorrelationMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .values
            .iter()
            .map(|row| row.iter().map(|v| format_cell(*v)).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        write_table(f, &self.labels, &self.labels, &cells)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl Summary {
    /// Sample standard deviation; quantiles interpolate linearly between
    /// the closest ranks.
    pub fn of(values: &[Option<f64>]) -> Self {
        let mut present = values.iter().flatten().copied().collect::<Vec<_>>();
        if present.is_empty() {
            return Self::default();
        }
        present.sort_by(f64::total_cmp);

        let count = present.len();
        let n = count as f64;
        let mean = present.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            (present.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        });

        Self {
            count,
            mean: Some(mean),
            std,
            min: present.first().copied(),
            q25: Some(quantile(&present, 0.25)),
            q50: Some(quantile(&present, 0.5)),
            q75: Some(quantile(&present, 0.75)),
            max: present.last().copied(),
        }
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Per-column summaries laid out with one statistic per line.
#[derive(Debug, Clone)]
pub struct Description {
    pub labels: Vec<String>,
    pub summaries: Vec<Summary>,
}

pub fn describe(columns: &[Column<'_>]) -> Description {
    Description {
        labels: columns.iter().map(|c| c.name.to_string()).collect(),
        summaries: columns.iter().map(|c| Summary::of(&c.values)).collect(),
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
        let cells = rows
            .iter()
            .map(|stat| {
                self.summaries
                    .iter()
                    .map(|s| match *stat {
                        "count" => format!("{:.6}", s.count as f64),
                        "mean" => format_cell(s.mean),
                        "std" => format_cell(s.std),
                        "min" => format_cell(s.min),
                        "25%" => format_cell(s.q25),
                        "50%" => format_cell(s.q50),
                        "75%" => format_cell(s.q75),
                        _ => format_cell(s.max),
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let row_labels = rows.map(String::from);
        write_table(f, &row_labels, &self.labels, &cells)
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.6}"))
}

fn write_table(
    f: &mut std::fmt::Formatter<'_>,
    rows: &[String],
    cols: &[String],
    cells: &[Vec<String>],
) -> std::fmt::Result {
    let label_width = rows.iter().map(String::len).max().unwrap_or_default();
    let widths = cols
        .iter()
        .enumerate()
        .map(|(j, name)| {
            cells
                .iter()
                .filter_map(|row| row.get(j))
                .map(String::len)
                .chain([name.len()])
                .max()
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    write!(f, "{:label_width$}", "")?;
    for (name, width) in cols.iter().zip(&widths) {
        write!(f, "  {name:>width$}")?;
    }

    for (label, row) in rows.iter().zip(cells) {
        write!(f, "\n{label:<label_width$}")?;
        for (cell, width) in row.iter().zip(&widths) {
            write!(f, "  {cell:>width$}")?;
        }
    }

    Ok(())
}
