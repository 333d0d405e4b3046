use crate::constants::{
    VARIABLE_SPEED_EXTRA_SAVINGS_FACTOR, VARIABLE_SPEED_UPGRADE_COST_USD,
};
use crate::engine::costs::{calculate_baseline_costs, calculate_energy_costs};
use crate::engine::{round1, round2, RoiMetrics, SavingsBreakdown, SavingsResult, ScheduleBlock};
use crate::types::{EnergyCostData, PumpSpecs};

/// Compare the owner's current operation against the optimized schedule
/// and, for pumps that could still be upgraded, project the return on a
/// variable-speed conversion.
pub fn calculate_savings(
    current_runtime: f64,
    pump: &PumpSpecs,
    energy: &EnergyCostData,
    optimized_schedule: &[ScheduleBlock],
) -> SavingsResult {
    let current_costs = calculate_baseline_costs(current_runtime, pump, energy);
    let optimized_costs = calculate_energy_costs(pump, energy, optimized_schedule);

    let annual_savings = current_costs.annual_cost - optimized_costs.annual_cost;
    let percent_reduction = if current_costs.annual_cost > 0.0 {
        (current_costs.annual_cost - optimized_costs.annual_cost) / current_costs.annual_cost
            * 100.0
    } else {
        0.0
    };

    let savings = SavingsBreakdown {
        daily_savings: round2(current_costs.daily_cost - optimized_costs.daily_cost),
        monthly_savings: round2(current_costs.monthly_cost - optimized_costs.monthly_cost),
        annual_savings: round2(annual_savings),
        daily_kwh_saved: round2(current_costs.daily_kwh - optimized_costs.daily_kwh),
        monthly_kwh_saved: round2(current_costs.monthly_kwh - optimized_costs.monthly_kwh),
        annual_kwh_saved: round2(current_costs.annual_kwh - optimized_costs.annual_kwh),
        percent_reduction: round1(percent_reduction),
    };

    let roi_metrics = if pump.drive.is_variable_speed() {
        None
    } else {
        Some(upgrade_roi(annual_savings))
    };

    SavingsResult {
        current_costs,
        optimized_costs,
        savings,
        roi_metrics,
    }
}

fn upgrade_roi(annual_savings: f64) -> RoiMetrics {
    // A variable-speed conversion compounds the schedule savings.
    let total_annual_savings = annual_savings * (1.0 + VARIABLE_SPEED_EXTRA_SAVINGS_FACTOR);
    let payback_months = if total_annual_savings > 0.0 {
        VARIABLE_SPEED_UPGRADE_COST_USD / total_annual_savings * 12.0
    } else {
        0.0
    };
    let five_year_savings = total_annual_savings * 5.0 - VARIABLE_SPEED_UPGRADE_COST_USD;

    RoiMetrics {
        variable_speed_upgrade_cost: VARIABLE_SPEED_UPGRADE_COST_USD,
        payback_months: round1(payback_months),
        five_year_savings: round2(five_year_savings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PumpDrive, SpeedSetting};

    fn variable_pump() -> PumpSpecs {
        PumpSpecs {
            drive: PumpDrive::VariableSpeed {
                low_rpm: 1500.0,
                medium_rpm: 2600.0,
                high_rpm: 3450.0,
            },
            horsepower: 1.5,
            age_years: 0.0,
            flow_rate_gpm: None,
        }
    }

    #[test]
    fn shorter_optimized_runtime_always_saves() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        let energy = EnergyCostData::flat_rate(0.14, 12.0);
        let schedule = [
            ScheduleBlock::new(8.0, 13.0),
            ScheduleBlock::new(18.0, 23.0),
        ];

        let result = calculate_savings(12.0, &pump, &energy, &schedule);
        assert!(result.savings.annual_savings > 0.0);
        assert!(result.savings.daily_kwh_saved > 0.0);
        assert!(result.savings.percent_reduction > 0.0);
    }

    #[test]
    fn roi_present_exactly_when_not_variable_speed() {
        let energy = EnergyCostData::flat_rate(0.14, 12.0);
        let schedule = [ScheduleBlock::new(8.0, 18.0)];

        let single = calculate_savings(12.0, &PumpSpecs::single_speed(1.5, 0.0), &energy, &schedule);
        assert!(single.roi_metrics.is_some());

        let two_speed_pump = PumpSpecs {
            drive: PumpDrive::TwoSpeed {
                low_hp: 0.75,
                high_hp: 1.5,
            },
            horsepower: 1.5,
            age_years: 0.0,
            flow_rate_gpm: None,
        };
        let two = calculate_savings(12.0, &two_speed_pump, &energy, &schedule);
        assert!(two.roi_metrics.is_some());

        let variable = calculate_savings(12.0, &variable_pump(), &energy, &schedule);
        assert!(variable.roi_metrics.is_none());
    }

    #[test]
    fn payback_math_follows_the_upgrade_model() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        let energy = EnergyCostData::flat_rate(0.14, 12.0);
        let schedule = [ScheduleBlock::new(8.0, 16.0)];

        let result = calculate_savings(12.0, &pump, &energy, &schedule);
        let roi = result.roi_metrics.unwrap();

        let annual = result.current_costs.annual_cost - result.optimized_costs.annual_cost;
        let total = annual * 1.30;
        assert_eq!(roi.variable_speed_upgrade_cost, 1500.0);
        assert_eq!(roi.payback_months, round1(1500.0 / total * 12.0));
        assert_eq!(roi.five_year_savings, round2(total * 5.0 - 1500.0));
    }

    #[test]
    fn zero_savings_yields_zero_payback_not_infinity() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        let energy = EnergyCostData::flat_rate(0.14, 12.0);
        // Same single block as the baseline: no savings at all.
        let schedule = [ScheduleBlock::new(8.0, 20.0)];

        let result = calculate_savings(12.0, &pump, &energy, &schedule);
        assert_eq!(result.savings.annual_savings, 0.0);
        let roi = result.roi_metrics.unwrap();
        assert_eq!(roi.payback_months, 0.0);
        assert_eq!(roi.five_year_savings, -1500.0);
    }

    #[test]
    fn zero_rate_avoids_division_by_zero() {
        let pump = PumpSpecs::single_speed(1.5, 0.0);
        let energy = EnergyCostData::flat_rate(0.0, 12.0);
        let schedule = [ScheduleBlock::new(8.0, 14.0)];

        let result = calculate_savings(12.0, &pump, &energy, &schedule);
        assert_eq!(result.savings.percent_reduction, 0.0);
    }

    #[test]
    fn variable_speed_low_blocks_beat_the_single_speed_baseline() {
        let energy = EnergyCostData::flat_rate(0.14, 12.0);
        // 14h at low speed still draws far less than 12h at full power.
        let schedule = [
            ScheduleBlock::at_speed(0.0, 7.0, SpeedSetting::Low),
            ScheduleBlock::at_speed(10.0, 17.0, SpeedSetting::Low),
        ];
        let result = calculate_savings(12.0, &variable_pump(), &energy, &schedule);
        assert!(result.savings.percent_reduction > 50.0);
    }
}
