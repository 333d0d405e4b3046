use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::climate::ClimateRecord;
use crate::engine::{CalculationResult, SavingsResult, ScheduleBlock};
use crate::output::format_hour;
use crate::types::Month;

pub fn render_summary_table(result: &CalculationResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);

    table.add_row(vec![
        "Pool volume".to_string(),
        format!("{} gal", result.pool_volume),
    ]);
    table.add_row(vec![
        "Pump flow rate".to_string(),
        format!("{} GPM", result.pump_flow_rate),
    ]);
    table.add_row(vec![
        "Required turnovers".to_string(),
        format!("{:.2}/day", result.required_turnovers),
    ]);
    table.add_row(vec![
        "Optimal runtime".to_string(),
        format!("{:.1} h/day", result.optimal_runtime),
    ]);
    table.add_row(vec![
        "Annual savings".to_string(),
        format!("${:.2}", result.costs.savings.annual_savings),
    ]);
    table.to_string()
}

pub fn render_schedule_table(schedule: &[ScheduleBlock]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Start", "End", "Hours", "Speed"]);

    for block in schedule {
        table.add_row(vec![
            format_hour(block.start_hour),
            format_hour(block.end_hour),
            format!("{:.1}", block.duration_hours()),
            block
                .speed_setting
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.to_string()
}

pub fn render_costs_table(costs: &SavingsResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Current", "Optimized", "Savings"]);

    let savings_cell = |value: f64, unit: &str| {
        let text = format!("{value:.2} {unit}");
        if value > 0.0 {
            Cell::new(text).fg(Color::Green)
        } else if value < 0.0 {
            Cell::new(text).fg(Color::Red)
        } else {
            Cell::new(text)
        }
    };

    table.add_row(Row::from(vec![
        Cell::new("Daily cost"),
        Cell::new(format!("${:.2}", costs.current_costs.daily_cost)),
        Cell::new(format!("${:.2}", costs.optimized_costs.daily_cost)),
        savings_cell(costs.savings.daily_savings, "$"),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Monthly cost"),
        Cell::new(format!("${:.2}", costs.current_costs.monthly_cost)),
        Cell::new(format!("${:.2}", costs.optimized_costs.monthly_cost)),
        savings_cell(costs.savings.monthly_savings, "$"),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Annual cost"),
        Cell::new(format!("${:.2}", costs.current_costs.annual_cost)),
        Cell::new(format!("${:.2}", costs.optimized_costs.annual_cost)),
        savings_cell(costs.savings.annual_savings, "$"),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Annual energy"),
        Cell::new(format!("{:.2} kWh", costs.current_costs.annual_kwh)),
        Cell::new(format!("{:.2} kWh", costs.optimized_costs.annual_kwh)),
        savings_cell(costs.savings.annual_kwh_saved, "kWh"),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Reduction"),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(format!("{:.1}%", costs.savings.percent_reduction)),
    ]));

    if let Some(roi) = &costs.roi_metrics {
        table.add_row(Row::from(vec![
            Cell::new("VS upgrade payback"),
            Cell::new(format!("${:.0}", roi.variable_speed_upgrade_cost)),
            Cell::new(format!("{:.1} months", roi.payback_months)),
            savings_cell(roi.five_year_savings, "$ over 5y"),
        ]));
    }
    table.to_string()
}

pub fn render_recommendations_table(recommendations: &[String]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Recommendation"]);

    for (idx, recommendation) in recommendations.iter().enumerate() {
        table.add_row(vec![(idx + 1).to_string(), recommendation.clone()]);
    }
    table.to_string()
}

pub fn render_climate_table(state: &str, record: &ClimateRecord) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["State", "Zone", "Month", "Avg Temp (F)"]);

    for month in Month::ALL {
        table.add_row(vec![
            state.to_string(),
            record.climate_zone.to_string(),
            month.to_string(),
            format!("{:.0}", record.avg_temperatures.for_month(month)),
        ]);
    }
    table.to_string()
}
