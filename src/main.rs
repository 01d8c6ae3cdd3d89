use std::error::Error;

use single_mode_shock::{initialization, sweep};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let file_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inputs/sweepparam.json".to_string());
    let sweep_params = initialization::initialize_params_by_file(&file_path)?;
    info!(
        file = file_path.as_str(),
        snapshot = ?sweep_params.snapshot,
        cases = sweep_params.ratios.len() * sweep_params.mach_numbers.len(),
        "running sweep"
    );
    let records = sweep::run_sweep(&sweep_params)?;
    let evanescent = records.iter().filter(|r| r.longwavelength).count();
    info!(records = records.len(), evanescent, "sweep finished");
    Ok(())
}
