use crate::{
    io::param_parser::{ParamError, SweepParamParser},
    sweep::SweepParameters,
};

pub fn initialize_params(parser: SweepParamParser) -> SweepParameters {
    SweepParameters {
        ny: parser.ny,
        ratios: parser.ratios,
        mach_numbers: parser.mach_numbers,
        epsilon_k: parser.epsilon_k,
        gamma: parser.gamma,
        cells: parser.cells.max(1),
        shock_fraction: parser.shock_fraction,
        normalize: parser.normalize,
        snapshot: parser.snapshot,
    }
}
pub fn initialize_params_by_file(file_path: &str) -> Result<SweepParameters, ParamError> {
    let sweep_param_parser = SweepParamParser::parse(file_path)?;
    Ok(initialize_params(sweep_param_parser))
}
