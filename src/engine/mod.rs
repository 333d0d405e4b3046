pub mod costs;
pub mod flow;
pub mod recommendations;
pub mod runtime;
pub mod savings;
pub mod schedule;
pub mod turnover;
pub mod volume;

use serde::{Deserialize, Serialize};

use crate::types::{CalculatorInput, Month, SpeedSetting};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScheduleBlock {
    pub start_hour: f64,
    pub end_hour: f64,
    pub speed_setting: Option<SpeedSetting>,
}

impl ScheduleBlock {
    pub fn new(start_hour: f64, end_hour: f64) -> Self {
        Self {
            start_hour,
            end_hour,
            speed_setting: None,
        }
    }

    pub fn at_speed(start_hour: f64, end_hour: f64, speed: SpeedSetting) -> Self {
        Self {
            start_hour,
            end_hour,
            speed_setting: Some(speed),
        }
    }

    pub fn duration_hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnergyCosts {
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub annual_cost: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub annual_kwh: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SavingsBreakdown {
    pub daily_savings: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub daily_kwh_saved: f64,
    pub monthly_kwh_saved: f64,
    pub annual_kwh_saved: f64,
    pub percent_reduction: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoiMetrics {
    pub variable_speed_upgrade_cost: f64,
    pub payback_months: f64,
    pub five_year_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsResult {
    pub current_costs: EnergyCosts,
    pub optimized_costs: EnergyCosts,
    pub savings: SavingsBreakdown,
    pub roi_metrics: Option<RoiMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub pool_volume: u32,
    pub pump_flow_rate: u32,
    pub required_turnovers: f64,
    pub optimal_runtime: f64,
    pub schedule: Vec<ScheduleBlock>,
    pub costs: SavingsResult,
    pub recommendations: Vec<String>,
}

/// Run the full optimization pipeline for one pool. Pure: the reference
/// month is an explicit input, so identical arguments always produce the
/// identical result.
pub fn calculate_pool_optimization(input: &CalculatorInput, month: Month) -> CalculationResult {
    let pool_volume = volume::calculate_pool_volume(&input.pool);
    let pump_flow_rate = flow::calculate_pump_flow_rate(&input.pump);
    let required_turnovers =
        turnover::calculate_required_turnovers(&input.location, &input.usage, month);

    let optimal_runtime = runtime::clamp_runtime(runtime::calculate_optimal_runtime(
        pool_volume,
        pump_flow_rate,
        required_turnovers,
        &input.pump,
    ));

    let schedule = schedule::generate_schedule(
        optimal_runtime,
        &input.location,
        &input.energy,
        &input.pump,
        month,
    );

    let costs = savings::calculate_savings(
        input.energy.current_daily_runtime,
        &input.pump,
        &input.energy,
        &schedule,
    );

    let recommendations = recommendations::generate_recommendations(
        &input.pump,
        &input.location,
        &input.usage,
        &costs,
        month,
    );

    CalculationResult {
        pool_volume,
        pump_flow_rate,
        required_turnovers,
        optimal_runtime,
        schedule,
        costs,
        recommendations,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
