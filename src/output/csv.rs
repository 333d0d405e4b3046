use anyhow::Result;

use crate::engine::{SavingsResult, ScheduleBlock};
use crate::output::format_hour;

pub fn schedule_to_csv(schedule: &[ScheduleBlock]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["start", "end", "hours", "speed"])?;
    for block in schedule {
        writer.write_record([
            format_hour(block.start_hour),
            format_hour(block.end_hour),
            format!("{:.2}", block.duration_hours()),
            block
                .speed_setting
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn costs_to_csv(costs: &SavingsResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["period", "current_cost", "optimized_cost", "savings", "kwh_saved"])?;
    writer.write_record([
        "daily".to_string(),
        format!("{:.2}", costs.current_costs.daily_cost),
        format!("{:.2}", costs.optimized_costs.daily_cost),
        format!("{:.2}", costs.savings.daily_savings),
        format!("{:.2}", costs.savings.daily_kwh_saved),
    ])?;
    writer.write_record([
        "monthly".to_string(),
        format!("{:.2}", costs.current_costs.monthly_cost),
        format!("{:.2}", costs.optimized_costs.monthly_cost),
        format!("{:.2}", costs.savings.monthly_savings),
        format!("{:.2}", costs.savings.monthly_kwh_saved),
    ])?;
    writer.write_record([
        "annual".to_string(),
        format!("{:.2}", costs.current_costs.annual_cost),
        format!("{:.2}", costs.optimized_costs.annual_cost),
        format!("{:.2}", costs.savings.annual_savings),
        format!("{:.2}", costs.savings.annual_kwh_saved),
    ])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
