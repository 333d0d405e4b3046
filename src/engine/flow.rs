use crate::constants::{
    AGE_EFFICIENCY_LOSS_PER_YEAR, FLOW_RPM_EXPONENT, MAX_AGE_EFFICIENCY_LOSS, MAX_PUMP_RPM,
    MOTOR_INEFFICIENCY_FACTOR, VS_LOW_POWER_FRACTION, VS_MEDIUM_POWER_FRACTION,
    WATTS_PER_HORSEPOWER,
};
use crate::types::{PumpDrive, PumpSpecs, SpeedSetting};

const BASE_FLOW_RATES_GPM: [(f64, f64); 7] = [
    (0.5, 30.0),
    (0.75, 40.0),
    (1.0, 50.0),
    (1.5, 65.0),
    (2.0, 80.0),
    (2.5, 95.0),
    (3.0, 110.0),
];

fn base_flow_rate_gpm(horsepower: f64) -> f64 {
    BASE_FLOW_RATES_GPM
        .iter()
        .find(|(hp, _)| (*hp - horsepower).abs() < f64::EPSILON)
        .map(|(_, gpm)| *gpm)
        .unwrap_or(50.0)
}

/// Effective flow rate in GPM. An explicit nameplate override wins over
/// every adjustment.
pub fn calculate_pump_flow_rate(pump: &PumpSpecs) -> u32 {
    if let Some(gpm) = pump.flow_rate_gpm {
        return gpm.round() as u32;
    }

    let mut flow_rate = base_flow_rate_gpm(pump.horsepower);

    if let PumpDrive::VariableSpeed { medium_rpm, .. } = pump.drive {
        // Variable-speed pumps spend most of their runtime at medium speed.
        let speed_ratio = medium_rpm / MAX_PUMP_RPM;
        flow_rate *= speed_ratio.powf(FLOW_RPM_EXPONENT);
    }

    let efficiency_loss =
        (pump.age_years * AGE_EFFICIENCY_LOSS_PER_YEAR).min(MAX_AGE_EFFICIENCY_LOSS);
    flow_rate *= 1.0 - efficiency_loss;

    flow_rate.round() as u32
}

/// Electrical draw in watts for a pump at a given speed setting.
pub fn calculate_wattage(pump: &PumpSpecs, speed: Option<SpeedSetting>) -> f64 {
    let base_wattage = pump.horsepower * WATTS_PER_HORSEPOWER * MOTOR_INEFFICIENCY_FACTOR;

    match &pump.drive {
        PumpDrive::VariableSpeed { .. } => match speed {
            Some(SpeedSetting::Low) => base_wattage * VS_LOW_POWER_FRACTION,
            Some(SpeedSetting::Medium) => base_wattage * VS_MEDIUM_POWER_FRACTION,
            Some(SpeedSetting::High) | None => base_wattage,
        },
        PumpDrive::TwoSpeed { low_hp, high_hp } => match speed {
            Some(SpeedSetting::Low) => low_hp * WATTS_PER_HORSEPOWER * MOTOR_INEFFICIENCY_FACTOR,
            Some(SpeedSetting::High) => high_hp * WATTS_PER_HORSEPOWER * MOTOR_INEFFICIENCY_FACTOR,
            Some(SpeedSetting::Medium) | None => base_wattage,
        },
        PumpDrive::SingleSpeed => base_wattage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(medium_rpm: f64, age_years: f64) -> PumpSpecs {
        PumpSpecs {
            drive: PumpDrive::VariableSpeed {
                low_rpm: 1500.0,
                medium_rpm,
                high_rpm: 3450.0,
            },
            horsepower: 1.5,
            age_years,
            flow_rate_gpm: None,
        }
    }

    #[test]
    fn new_single_speed_matches_the_base_table() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        assert_eq!(calculate_pump_flow_rate(&pump), 65);

        let small = PumpSpecs::single_speed(0.5, 0.0);
        assert_eq!(calculate_pump_flow_rate(&small), 30);

        let big = PumpSpecs::single_speed(3.0, 0.0);
        assert_eq!(calculate_pump_flow_rate(&big), 110);
    }

    #[test]
    fn unknown_horsepower_falls_back_to_50_gpm() {
        let pump = PumpSpecs::single_speed(1.25, 0.0);
        assert_eq!(calculate_pump_flow_rate(&pump), 50);
    }

    #[test]
    fn explicit_override_bypasses_all_adjustments() {
        let mut pump = PumpSpecs::single_speed(1.5, 20.0);
        pump.flow_rate_gpm = Some(72.0);
        assert_eq!(calculate_pump_flow_rate(&pump), 72);
    }

    #[test]
    fn flow_never_increases_with_age() {
        let mut previous = u32::MAX;
        for age in 0..15 {
            let rate = calculate_pump_flow_rate(&PumpSpecs::single_speed(1.5, age as f64));
            assert!(rate <= previous, "flow rose at age {age}");
            previous = rate;
        }
    }

    #[test]
    fn age_loss_caps_at_20_percent() {
        let old = calculate_pump_flow_rate(&PumpSpecs::single_speed(1.5, 10.0));
        let ancient = calculate_pump_flow_rate(&PumpSpecs::single_speed(1.5, 30.0));
        assert_eq!(old, ancient);
        assert_eq!(old, 52); // 65 * 0.8
    }

    #[test]
    fn variable_speed_scales_with_medium_rpm() {
        let full = calculate_pump_flow_rate(&variable(3450.0, 0.0));
        assert_eq!(full, 65);

        let derated = calculate_pump_flow_rate(&variable(2600.0, 0.0));
        let expected = (65.0 * (2600.0_f64 / 3450.0).powf(0.85)).round() as u32;
        assert_eq!(derated, expected);
        assert!(derated < full);
    }

    #[test]
    fn single_speed_wattage_is_flat() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        let expected = 1.5 * 746.0 * 1.15;
        assert_eq!(calculate_wattage(&pump, None), expected);
        assert_eq!(calculate_wattage(&pump, Some(SpeedSetting::Low)), expected);
    }

    #[test]
    fn variable_speed_wattage_fractions() {
        let pump = variable(2600.0, 0.0);
        let base = 1.5 * 746.0 * 1.15;
        assert_eq!(calculate_wattage(&pump, Some(SpeedSetting::Low)), base * 0.125);
        assert_eq!(
            calculate_wattage(&pump, Some(SpeedSetting::Medium)),
            base * 0.40
        );
        assert_eq!(calculate_wattage(&pump, Some(SpeedSetting::High)), base);
        assert_eq!(calculate_wattage(&pump, None), base);
    }

    #[test]
    fn two_speed_wattage_uses_per_speed_horsepower() {
        let pump = PumpSpecs {
            drive: PumpDrive::TwoSpeed {
                low_hp: 0.75,
                high_hp: 1.5,
            },
            horsepower: 1.5,
            age_years: 0.0,
            flow_rate_gpm: None,
        };
        assert_eq!(
            calculate_wattage(&pump, Some(SpeedSetting::Low)),
            0.75 * 746.0 * 1.15
        );
        assert_eq!(
            calculate_wattage(&pump, Some(SpeedSetting::High)),
            1.5 * 746.0 * 1.15
        );
        // No named speed falls back to the nameplate rating.
        assert_eq!(calculate_wattage(&pump, None), 1.5 * 746.0 * 1.15);
    }
}
