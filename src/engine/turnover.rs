use crate::engine::round2;
use crate::types::{LandscapingDensity, LocationData, Month, UsageFactors, UsageLevel, WaterClarity};

/// Required pool-water turnovers per day for the given climate, usage, and
/// month. Warmer water grows algae faster and burns through chemicals, so
/// the temperature band sets the baseline and every usage factor scales it.
pub fn calculate_required_turnovers(
    location: &LocationData,
    usage: &UsageFactors,
    month: Month,
) -> f64 {
    let temperature = location.avg_temperatures.for_month(month);

    let mut turnovers = if temperature >= 85.0 {
        2.5
    } else if temperature >= 75.0 {
        2.0
    } else if temperature >= 65.0 {
        1.75
    } else if temperature >= 50.0 {
        1.5
    } else {
        1.25
    };

    turnovers *= match usage.usage_level {
        UsageLevel::Light => 0.9,
        UsageLevel::Moderate => 1.0,
        UsageLevel::Heavy => 1.2,
    };

    // Swimmer contaminant load, saturating at 10 swimmers.
    let swimmers = usage.average_swimmers.min(10) as f64;
    turnovers *= 1.0 + swimmers * 0.03;

    turnovers *= match usage.landscaping {
        LandscapingDensity::Minimal => 0.95,
        LandscapingDensity::Moderate => 1.0,
        LandscapingDensity::Heavy => 1.15,
    };

    if usage.screen_enclosure {
        turnovers *= 0.90;
    }
    if usage.has_waterfall {
        turnovers *= 1.1;
    }
    if usage.has_salt_system {
        turnovers *= 0.95;
    }

    turnovers *= match usage.water_clarity {
        WaterClarity::CrystalClear => 0.95,
        WaterClarity::SlightlyCloudy => 1.0,
        WaterClarity::Cloudy => 1.2,
    };

    round2(turnovers)
}
