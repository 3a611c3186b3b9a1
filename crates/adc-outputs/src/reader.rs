//! ASCII global output reader.
//!
//! # File Format
//!
//! ```text
//! <title>
//! NDSETS NP DT NSPOOL IRTYPE
//! TIME IT                     full record, NP value lines follow
//! TIME IT NNONDEF DEFVAL      sparse record, NNONDEF value lines follow
//! <node> <v1> [<v2> ...]      IRTYPE values, 1-based node index
//! ```
//!
//! Blank lines are ignored. Fortran `D` exponents are accepted.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use adc_core::{Tolerances, ensure_finite, nearly_equal};
use tracing::debug;

use crate::{DatasetSlot, OutputError, OutputKind, OutputResult};

/// Value ADCIRC writes at dry nodes.
pub const DRY_VALUE: f64 = -99999.0;

/// Upper bound on NP x IRTYPE accepted from a header.
pub const MAX_DATASET_VALUES: usize = 1 << 26;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputHeader {
    pub title: String,
    /// Number of datasets announced by the header (may exceed what was written)
    pub n_datasets: usize,
    /// Nodes or stations per dataset
    pub n_points: usize,
    /// Output interval in seconds
    pub dt_s: f64,
    /// Time steps between records
    pub spool: usize,
    /// Values per point (1 scalar, 2 vector)
    pub values_per_point: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub time_s: f64,
    pub iteration: i64,
    stride: usize,
    values: Vec<f64>,
}

impl Dataset {
    pub fn n_points(&self) -> usize {
        self.values.len() / self.stride
    }

    /// Values at a 0-based point.
    pub fn point(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.stride)?;
        self.values.get(start..start.checked_add(self.stride)?)
    }

    /// First component at every point.
    pub fn scalars(&self) -> Vec<f64> {
        self.values.iter().step_by(self.stride).copied().collect()
    }

    /// Euclidean norm of the components at every point; dry points stay dry.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.values
            .chunks(self.stride)
            .map(|components| {
                if components.iter().any(|&v| is_dry(v)) {
                    DRY_VALUE
                } else {
                    components.iter().map(|v| v * v).sum::<f64>().sqrt()
                }
            })
            .collect()
    }

    /// Smallest and largest wet magnitude, `None` when every point is dry.
    pub fn extrema(&self) -> Option<(f64, f64)> {
        let values = if self.stride == 1 {
            self.scalars()
        } else {
            self.magnitudes()
        };
        values
            .into_iter()
            .filter(|&v| v.is_finite() && !is_dry(v))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn dry_count(&self) -> usize {
        self.values
            .chunks(self.stride)
            .filter(|components| components.iter().any(|&v| is_dry(v)))
            .count()
    }
}

pub fn is_dry(v: f64) -> bool {
    nearly_equal(v, DRY_VALUE, Tolerances::default())
}

/// One ADCIRC output file read through the lens of an [`OutputKind`].
#[derive(Debug, Clone)]
pub struct SurfaceOutput {
    kind: OutputKind,
    path: Option<PathBuf>,
    header: OutputHeader,
    datasets: Vec<Dataset>,
}

impl SurfaceOutput {
    /// Read the file for `kind` from an ADCIRC run directory.
    pub fn open(run_dir: &Path, kind: OutputKind) -> OutputResult<Self> {
        Self::from_path(&run_dir.join(kind.file_name()), kind)
    }

    pub fn from_path(path: &Path, kind: OutputKind) -> OutputResult<Self> {
        if !path.exists() {
            return Err(OutputError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), kind = kind.tag(), "reading output file");
        let file = File::open(path)?;
        let mut output = Self::parse(BufReader::new(file), kind)?;
        output.path = Some(path.to_path_buf());
        Ok(output)
    }

    pub fn parse<R: BufRead>(reader: R, kind: OutputKind) -> OutputResult<Self> {
        let mut lines = Lines::new(reader);

        let (_, title) = lines.next_line()?.ok_or(OutputError::Parse {
            line: 1,
            message: "missing title line".to_string(),
        })?;
        let header = parse_header(title.trim().to_string(), &mut lines)?;

        let mut datasets = Vec::new();
        while let Some((line_no, record)) = lines.next_nonblank()? {
            datasets.push(parse_dataset(&header, line_no, &record, &mut lines)?);
        }

        if datasets.len() < header.n_datasets {
            debug!(
                kind = kind.tag(),
                announced = header.n_datasets,
                found = datasets.len(),
                "output file holds fewer datasets than announced"
            );
        }

        Ok(Self {
            kind,
            path: None,
            header,
            datasets,
        })
    }

    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn header(&self) -> &OutputHeader {
        &self.header
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, index: usize) -> OutputResult<&Dataset> {
        self.datasets
            .get(index)
            .ok_or(OutputError::MissingDataset {
                kind: self.kind,
                index,
                available: self.datasets.len(),
            })
    }

    /// The dataset this kind exposes. Time series yield their last record.
    pub fn values(&self) -> OutputResult<&Dataset> {
        match self.kind.slot() {
            DatasetSlot::Index(index) => self.dataset(index),
            DatasetSlot::All => self.dataset(self.datasets.len().saturating_sub(1)),
        }
    }

    pub fn times(&self) -> Vec<f64> {
        self.datasets.iter().map(|d| d.time_s).collect()
    }
}

struct Lines<R> {
    inner: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> OutputResult<Option<(usize, String)>> {
        match self.inner.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some((self.line_no, line?)))
            }
            None => Ok(None),
        }
    }

    fn next_nonblank(&mut self) -> OutputResult<Option<(usize, String)>> {
        while let Some((line_no, line)) = self.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some((line_no, line)));
            }
        }
        Ok(None)
    }

    fn expect_nonblank(&mut self, what: &str) -> OutputResult<(usize, String)> {
        self.next_nonblank()?.ok_or_else(|| OutputError::Parse {
            line: self.line_no + 1,
            message: format!("unexpected end of file, expected {what}"),
        })
    }
}

fn parse_header<R: BufRead>(title: String, lines: &mut Lines<R>) -> OutputResult<OutputHeader> {
    let (line_no, line) = lines.expect_nonblank("header line")?;
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return Err(OutputError::Parse {
            line: line_no,
            message: format!("header needs 5 fields, found {}", fields.len()),
        });
    }

    let n_datasets = parse_count(fields[0], line_no, "NDSETS")?;
    let n_points = parse_count(fields[1], line_no, "NP")?;
    let dt_s = ensure_finite(parse_real(fields[2], line_no)?, "output interval")?;
    let spool = parse_count(fields[3], line_no, "NSPOOL")?;
    let values_per_point = parse_count(fields[4], line_no, "IRTYPE")?;
    if values_per_point == 0 {
        return Err(OutputError::Parse {
            line: line_no,
            message: "IRTYPE must be at least 1".to_string(),
        });
    }
    match n_points.checked_mul(values_per_point) {
        Some(total) if total <= MAX_DATASET_VALUES => {}
        _ => {
            return Err(OutputError::Parse {
                line: line_no,
                message: format!(
                    "{n_points} points x {values_per_point} values exceeds {MAX_DATASET_VALUES}"
                ),
            });
        }
    }

    Ok(OutputHeader {
        title,
        n_datasets,
        n_points,
        dt_s,
        spool,
        values_per_point,
    })
}

fn parse_dataset<R: BufRead>(
    header: &OutputHeader,
    line_no: usize,
    record: &str,
    lines: &mut Lines<R>,
) -> OutputResult<Dataset> {
    let fields: Vec<&str> = record.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(OutputError::Parse {
            line: line_no,
            message: "record header needs TIME and IT".to_string(),
        });
    }
    let time_s = parse_real(fields[0], line_no)?;
    let iteration = fields[1].parse::<i64>().map_err(|e| OutputError::Parse {
        line: line_no,
        message: format!("invalid iteration '{}': {e}", fields[1]),
    })?;

    let stride = header.values_per_point;
    let (n_lines, default) = match fields.len() {
        2 => (header.n_points, DRY_VALUE),
        4 => (
            parse_count(fields[2], line_no, "NNONDEF")?,
            parse_real(fields[3], line_no)?,
        ),
        n => {
            return Err(OutputError::Parse {
                line: line_no,
                message: format!("record header needs 2 or 4 fields, found {n}"),
            });
        }
    };
    if n_lines > header.n_points {
        return Err(OutputError::Parse {
            line: line_no,
            message: format!("{n_lines} values announced for {} points", header.n_points),
        });
    }

    // Value lines are read before the dataset is allocated.
    let mut entries = Vec::new();
    for _ in 0..n_lines {
        let (value_line_no, line) = lines.expect_nonblank("point values")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < stride + 1 {
            return Err(OutputError::Parse {
                line: value_line_no,
                message: format!("expected node and {stride} values"),
            });
        }
        let node = parse_count(fields[0], value_line_no, "node")?;
        if node == 0 || node > header.n_points {
            return Err(OutputError::Parse {
                line: value_line_no,
                message: format!("node {node} outside 1..={}", header.n_points),
            });
        }
        let point = fields[1..=stride]
            .iter()
            .map(|field| parse_real(field, value_line_no))
            .collect::<OutputResult<Vec<f64>>>()?;
        entries.push((value_line_no, node, point));
    }

    let mut values = vec![default; header.n_points * stride];
    let mut seen = vec![false; header.n_points];
    for (value_line_no, node, point) in entries {
        if std::mem::replace(&mut seen[node - 1], true) {
            return Err(OutputError::Parse {
                line: value_line_no,
                message: format!("node {node} listed twice"),
            });
        }
        let start = (node - 1) * stride;
        values[start..start + stride].copy_from_slice(&point);
    }

    Ok(Dataset {
        time_s,
        iteration,
        stride,
        values,
    })
}

fn parse_real(field: &str, line: usize) -> OutputResult<f64> {
    field
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|e| OutputError::Parse {
            line,
            message: format!("invalid number '{field}': {e}"),
        })
}

fn parse_count(field: &str, line: usize, what: &str) -> OutputResult<usize> {
    field.parse::<usize>().map_err(|e| OutputError::Parse {
        line,
        message: format!("invalid {what} '{field}': {e}"),
    })
}
