use crate::constants::{DAYS_PER_MONTH, DAYS_PER_YEAR};
use crate::engine::flow::calculate_wattage;
use crate::engine::{round2, EnergyCosts, ScheduleBlock};
use crate::types::{EnergyCostData, PumpSpecs};

/// Price a schedule for one day, then project to monthly and annual
/// figures using 30-day and 365-day billing conventions.
pub fn calculate_energy_costs(
    pump: &PumpSpecs,
    energy: &EnergyCostData,
    schedule: &[ScheduleBlock],
) -> EnergyCosts {
    let mut daily_kwh = 0.0;
    let mut daily_cost = 0.0;

    for block in schedule {
        let block_hours = block.duration_hours();
        if block_hours <= 0.0 {
            continue;
        }
        let wattage = calculate_wattage(pump, block.speed_setting);
        let block_kwh = wattage / 1000.0 * block_hours;
        daily_kwh += block_kwh;

        if let Some(tou) = &energy.time_of_use {
            // Split the block's energy between peak and off-peak pricing by
            // hours of overlap with each peak window.
            let mut peak_hours = 0.0;
            for window in &tou.peak_hours {
                let overlap_start = block.start_hour.max(window.start);
                let overlap_end = block.end_hour.min(window.end);
                if overlap_start < overlap_end {
                    peak_hours += overlap_end - overlap_start;
                }
            }
            let off_peak_hours = block_hours - peak_hours;
            let peak_ratio = peak_hours / block_hours;
            let off_peak_ratio = off_peak_hours / block_hours;

            daily_cost += block_kwh * peak_ratio * tou.peak_rate
                + block_kwh * off_peak_ratio * tou.off_peak_rate;
        } else {
            daily_cost += block_kwh * energy.electricity_rate;
        }
    }

    EnergyCosts {
        daily_cost: round2(daily_cost),
        monthly_cost: round2(daily_cost * DAYS_PER_MONTH),
        annual_cost: round2(daily_cost * DAYS_PER_YEAR),
        daily_kwh: round2(daily_kwh),
        monthly_kwh: round2(daily_kwh * DAYS_PER_MONTH),
        annual_kwh: round2(daily_kwh * DAYS_PER_YEAR),
    }
}

/// Cost of the owner's current habits: one continuous block from 08:00,
/// priced as single-speed hardware. Every "before" figure in a savings
/// comparison uses this worst-case convention.
pub fn calculate_baseline_costs(
    current_runtime: f64,
    pump: &PumpSpecs,
    energy: &EnergyCostData,
) -> EnergyCosts {
    let baseline_schedule = [ScheduleBlock::new(8.0, 8.0 + current_runtime)];
    calculate_energy_costs(&pump.as_single_speed(), energy, &baseline_schedule)
}
