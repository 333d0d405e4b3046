use crate::constants::{MAX_DAILY_RUNTIME_HOURS, MIN_DAILY_RUNTIME_HOURS};
use crate::types::{PumpDrive, PumpSpecs};

/// Daily runtime in hours needed to hit the required turnovers, rounded to
/// the nearest half hour. Slower drives run longer: they move less water
/// per hour but cost far less per gallon.
pub fn calculate_optimal_runtime(
    pool_volume: u32,
    flow_rate_gpm: u32,
    required_turnovers: f64,
    pump: &PumpSpecs,
) -> f64 {
    let minutes_per_turnover = f64::from(pool_volume) / f64::from(flow_rate_gpm);
    let base_runtime = minutes_per_turnover * required_turnovers / 60.0;

    let runtime_multiplier = match pump.drive {
        PumpDrive::VariableSpeed { .. } => 1.4,
        PumpDrive::TwoSpeed { .. } => 1.2,
        PumpDrive::SingleSpeed => 1.0,
    };

    let optimal = base_runtime * runtime_multiplier;

    (optimal * 2.0).round() / 2.0
}

/// Pin a runtime into the practical daily window.
pub fn clamp_runtime(runtime: f64) -> f64 {
    runtime.clamp(MIN_DAILY_RUNTIME_HOURS, MAX_DAILY_RUNTIME_HOURS)
}
