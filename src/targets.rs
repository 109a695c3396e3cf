use crate::error::{TemperError, TfResult};
use crate::ratio::{normalize_ratio_to_boundary, parse_ratio_text, BoundaryRatio, Fraction};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// A just-intonation interval the solver should approximate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalTarget {
    pub id: u64,
    pub degree: usize,
    pub n: u64,
    pub d: u64,
    pub tolerance_cents: f64,
    pub priority: f64,
    pub max_error_cents: Option<f64>,
}

impl IntervalTarget {
    pub fn fraction(&self) -> Fraction {
        Fraction {
            n: self.n,
            d: self.d,
        }
    }

    pub fn ideal_cents(&self) -> f64 {
        self.fraction().cents()
    }
}

/// Partial update for [`IntervalTargetStore::update_interval`].
/// `max_error_cents: Some(None)` clears the hard cap.
#[derive(Debug, Clone, Default)]
pub struct TargetPatch {
    pub degree: Option<usize>,
    pub ratio: Option<(u64, u64)>,
    pub tolerance_cents: Option<f64>,
    pub priority: Option<f64>,
    pub max_error_cents: Option<Option<f64>>,
}

/// Owns the target list, the boundary ratio and the scale size, and keeps
/// every target inside `[1, boundary)` with a degree inside `[0, N)`.
#[derive(Debug, Clone)]
pub struct IntervalTargetStore {
    targets: Vec<IntervalTarget>,
    boundary: BoundaryRatio,
    scale_size: usize,
    next_id: u64,
}

impl Default for IntervalTargetStore {
    fn default() -> Self {
        Self::new(12)
    }
}

impl IntervalTargetStore {
    pub fn new(scale_size: usize) -> Self {
        Self {
            targets: Vec::new(),
            boundary: BoundaryRatio::OCTAVE,
            scale_size: scale_size.max(1),
            next_id: 1,
        }
    }

    pub fn targets(&self) -> &[IntervalTarget] {
        &self.targets
    }

    pub fn boundary(&self) -> BoundaryRatio {
        self.boundary
    }

    pub fn scale_size(&self) -> usize {
        self.scale_size
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&IntervalTarget> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Replaces the boundary and renormalizes every target against it.
    ///
    /// The new list is built off to the side and swapped in only when every
    /// target succeeded, so a failure leaves the store untouched.
    pub fn set_boundary_ratio(&mut self, numerator: u64, denominator: u64) -> TfResult<()> {
        let boundary = BoundaryRatio::new(numerator, denominator);

        let mut renormalized = Vec::with_capacity(self.targets.len());
        for t in &self.targets {
            let norm = normalize_ratio_to_boundary(t.n, t.d, &boundary)?;
            renormalized.push(IntervalTarget {
                n: norm.fraction.n,
                d: norm.fraction.d,
                degree: clamp_degree(t.degree, self.scale_size),
                ..t.clone()
            });
        }

        info!(
            "Boundary set to {} ({:.3} cents), {} targets renormalized",
            boundary,
            boundary.cents(),
            renormalized.len()
        );
        self.boundary = boundary;
        self.targets = renormalized;
        Ok(())
    }

    pub fn set_scale_size(&mut self, scale_size: usize) {
        self.scale_size = scale_size.max(1);
        for t in &mut self.targets {
            let clamped = clamp_degree(t.degree, self.scale_size);
            if clamped != t.degree {
                debug!("Target {} degree {} clamped to {}", t.id, t.degree, clamped);
                t.degree = clamped;
            }
        }
    }

    /// Parses and appends a target. Any error leaves the list unchanged.
    pub fn add_interval(
        &mut self,
        raw_ratio_text: &str,
        degree: usize,
        tolerance_cents: f64,
        priority: f64,
        max_error_cents_text: &str,
    ) -> TfResult<u64> {
        let (n, d) = parse_ratio_text(raw_ratio_text)?;
        validate_weights(tolerance_cents, priority)?;
        let norm = normalize_ratio_to_boundary(n, d, &self.boundary)?;

        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(IntervalTarget {
            id,
            degree: clamp_degree(degree, self.scale_size),
            n: norm.fraction.n,
            d: norm.fraction.d,
            tolerance_cents,
            priority,
            max_error_cents: parse_max_error(max_error_cents_text),
        });
        Ok(id)
    }

    /// Applies a partial update. Unknown ids are ignored.
    pub fn update_interval(&mut self, id: u64, patch: TargetPatch) -> TfResult<()> {
        let Some(idx) = self.targets.iter().position(|t| t.id == id) else {
            return Ok(());
        };

        let mut updated = self.targets[idx].clone();
        if let Some(degree) = patch.degree {
            updated.degree = clamp_degree(degree, self.scale_size);
        }
        if let Some((n, d)) = patch.ratio {
            let norm = normalize_ratio_to_boundary(n, d, &self.boundary)?;
            updated.n = norm.fraction.n;
            updated.d = norm.fraction.d;
        }
        if let Some(tol) = patch.tolerance_cents {
            updated.tolerance_cents = tol;
        }
        if let Some(priority) = patch.priority {
            updated.priority = priority;
        }
        if let Some(cap) = patch.max_error_cents {
            updated.max_error_cents = cap.filter(|c| c.is_finite() && *c > 0.0);
        }
        validate_weights(updated.tolerance_cents, updated.priority)?;

        self.targets[idx] = updated;
        Ok(())
    }

    /// Removes a target. Unknown ids are ignored.
    pub fn remove_interval(&mut self, id: u64) {
        self.targets.retain(|t| t.id != id);
    }

    /// Loads targets from CSV with header `degree,ratio,tolerance,priority,max_error`.
    /// Rows with malformed ratio text are skipped, like rejected UI input.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> TfResult<usize> {
        let file = File::open(path)?;
        self.load_csv_from_reader(file)
    }

    /// Rows land in a staged copy that replaces the store only when every row
    /// loaded, so a failing row leaves the store untouched.
    pub fn load_csv_from_reader<R: Read>(&mut self, reader: R) -> TfResult<usize> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut staged = self.clone();
        let mut added = 0;
        for (line, result) in rdr.deserialize::<TargetRow>().enumerate() {
            let row = result?;
            match staged.add_interval(
                &row.ratio,
                row.degree,
                row.tolerance,
                row.priority,
                row.max_error.as_deref().unwrap_or(""),
            ) {
                Ok(_) => added += 1,
                Err(TemperError::InvalidRatioSyntax(text)) => {
                    warn!("Skipping target row {}: bad ratio '{}'", line + 2, text);
                }
                Err(e) => return Err(e),
            }
        }
        *self = staged;
        info!("Loaded {} interval targets", added);
        Ok(added)
    }
}

#[derive(Debug, Deserialize)]
struct TargetRow {
    degree: usize,
    ratio: String,
    tolerance: f64,
    priority: f64,
    #[serde(default)]
    max_error: Option<String>,
}

fn clamp_degree(degree: usize, scale_size: usize) -> usize {
    degree.min(scale_size.saturating_sub(1))
}

fn validate_weights(tolerance_cents: f64, priority: f64) -> TfResult<()> {
    if !tolerance_cents.is_finite() || tolerance_cents <= 0.0 {
        return Err(TemperError::Validation(format!(
            "tolerance must be positive, got {}",
            tolerance_cents
        )));
    }
    if !priority.is_finite() || priority < 0.0 {
        return Err(TemperError::Validation(format!(
            "priority must be non-negative, got {}",
            priority
        )));
    }
    Ok(())
}

fn parse_max_error(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            warn!("Ignoring hard cap '{}': not a positive number", text);
            None
        }
    }
}
