//! Parameter sweeps over mode ratio and Mach number: sizes the sampling
//! window from each solution, picks the snapshot time and reduces every
//! sampled field to the bounds a contour plot needs.
use ndarray::{Array, Array1, Array2, ArrayD, Dimension, arr0};
use ndarray_stats::{QuantileExt, errors::MinMaxError};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    error::{ConfigurationError, DomainError},
    solution::SingleModeSolution,
};

#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("cannot bound field {field}")]
    Summary {
        field: &'static str,
        #[source]
        source: MinMaxError,
    },
}

/// Which set of fields a sweep samples.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Snapshot {
    /// Pressure, density and velocity with the shock two thirds across.
    Perturbations,
    /// Kinetic and total energy once the shock has left the window, next to
    /// the incoming density pattern.
    Energy,
}

#[derive(Debug, Clone)]
pub struct SweepParameters {
    pub ny: f64,
    pub ratios: Vec<f64>,
    pub mach_numbers: Vec<f64>,
    pub epsilon_k: f64,
    pub gamma: f64,
    pub cells: usize,
    pub shock_fraction: f64,
    pub normalize: bool,
    pub snapshot: Snapshot,
}

/// Sampling window covering two mode periods, measured in units of
/// `1 / Ny` (`1 / Nx` when `Ny == 0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotWindow {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    /// Mode number the axes are scaled by.
    pub scale: f64,
}
impl PlotWindow {
    pub fn for_solution(sol: &SingleModeSolution) -> Self {
        let scale = if sol.ny() == 0.0 { sol.nx() } else { sol.ny() };
        Self {
            x0: 0.0,
            x1: 2.0 * sol.lx() / scale.abs(),
            y0: 0.0,
            y1: 2.0 * sol.ly() / scale.abs(),
            scale,
        }
    }
    /// Node coordinates of a `cells x cells` grid, indexed `[ix, iy]`.
    pub fn node_grid(&self, cells: usize) -> (Array2<f64>, Array2<f64>) {
        let n = cells.max(1);
        let dx = (self.x1 - self.x0) / n as f64;
        let dy = (self.y1 - self.y0) / n as f64;
        let x = Array2::from_shape_fn((n + 1, n + 1), |(i, _)| self.x0 + i as f64 * dx);
        let y = Array2::from_shape_fn((n + 1, n + 1), |(_, j)| self.y0 + j as f64 * dy);
        (x, y)
    }
    /// Time at which the unperturbed shock sits at `fraction` of the width.
    pub fn shock_midpoint_time(&self, sol: &SingleModeSolution, fraction: f64) -> f64 {
        fraction * self.x1 / (sol.m2() * sol.a2())
    }
    /// Time after which no part of the perturbed front is inside the window.
    pub fn shock_exit_time(&self, sol: &SingleModeSolution) -> Result<f64, DomainError> {
        let max_delta_xs = sol.max_delta_xs()?;
        Ok((self.x1 + max_delta_xs) / (sol.m2() * sol.a2()))
    }
    /// Perturbed shock front `x = xs0 + Re delta_xs(t, y)` across the window.
    pub fn shock_front(
        &self,
        sol: &SingleModeSolution,
        t: f64,
        samples: usize,
    ) -> Result<(ArrayD<f64>, Array1<f64>), DomainError> {
        let y = Array1::linspace(self.y0, self.y1, samples);
        let xs = sol.shock_position(t);
        let x = sol.delta_xs_front(&arr0(t), &y)?.mapv(|d| xs + d.re);
        Ok((x, y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}
pub fn summarize<D: Dimension>(
    field: &'static str,
    values: &Array<f64, D>,
) -> Result<FieldSummary, SweepError> {
    let bound = |source| SweepError::Summary { field, source };
    Ok(FieldSummary {
        field,
        min: *values.min().map_err(bound)?,
        max: *values.max().map_err(bound)?,
    })
}

#[derive(Debug, Clone)]
pub struct SweepRecord {
    pub nx: f64,
    pub ny: f64,
    pub m1: f64,
    pub longwavelength: bool,
    pub t: f64,
    pub window: PlotWindow,
    pub fields: Vec<FieldSummary>,
}

/// Samples one solution according to `params.snapshot`.
pub fn sample_solution(
    sol: &SingleModeSolution,
    params: &SweepParameters,
) -> Result<SweepRecord, SweepError> {
    let window = PlotWindow::for_solution(sol);
    let (x, y) = window.node_grid(params.cells);
    let (t, fields) = match params.snapshot {
        Snapshot::Perturbations => {
            let time = window.shock_midpoint_time(sol, params.shock_fraction);
            let t = arr0(time);
            let fields = if params.normalize {
                vec![
                    summarize("p", &sol.tilde_p(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("rho", &sol.tilde_rho(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("vx", &sol.tilde_vx(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("vy", &sol.tilde_vy(&t, &x, &y)?.mapv(|v| v.re))?,
                ]
            } else {
                vec![
                    summarize("p", &sol.delta_p(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("rho", &sol.delta_rho(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("vx", &sol.delta_vx(&t, &x, &y)?.mapv(|v| v.re))?,
                    summarize("vy", &sol.delta_vy(&t, &x, &y)?.mapv(|v| v.re))?,
                ]
            };
            (time, fields)
        }
        Snapshot::Energy => {
            let time = window.shock_exit_time(sol)?;
            let t = arr0(time);
            let rho1 = sol.rho1();
            let preshock = sol.delta_rho_rho1(&t, &x, &y)?.mapv(|v| rho1 * v.re);
            let fields = vec![
                summarize("ke", &sol.delta_ke(&t, &x, &y)?)?,
                summarize("te", &sol.delta_te(&t, &x, &y)?)?,
                summarize("preshock_rho", &preshock)?,
            ];
            (time, fields)
        }
    };
    Ok(SweepRecord {
        nx: sol.nx(),
        ny: sol.ny(),
        m1: sol.m1(),
        longwavelength: sol.longwavelength(),
        t,
        window,
        fields,
    })
}

pub fn run_sweep(params: &SweepParameters) -> Result<Vec<SweepRecord>, SweepError> {
    let mut records = Vec::with_capacity(params.ratios.len() * params.mach_numbers.len());
    for &ratio in &params.ratios {
        let nx = ratio * params.ny;
        for &m1 in &params.mach_numbers {
            let sol = SingleModeSolution::new(nx, params.ny, m1, params.epsilon_k, params.gamma)?;
            debug!(nx, m1, m2 = sol.m2(), "sampling solution");
            let record = sample_solution(&sol, params)?;
            for summary in &record.fields {
                info!(
                    nx,
                    ny = params.ny,
                    m1,
                    t = record.t,
                    longwavelength = record.longwavelength,
                    field = summary.field,
                    min = summary.min,
                    max = summary.max,
                    "field bounds"
                );
            }
            records.push(record);
        }
    }
    Ok(records)
}
