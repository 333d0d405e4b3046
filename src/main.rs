use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pump_oracle::climate;
use pump_oracle::config::{Config, ConfigOverrides};
use pump_oracle::engine::{
    self, calculate_pool_optimization, CalculationResult, SavingsResult, ScheduleBlock,
};
use pump_oracle::output::csv::{costs_to_csv, schedule_to_csv};
use pump_oracle::output::json::render_json;
use pump_oracle::output::table::{
    render_climate_table, render_costs_table, render_recommendations_table,
    render_schedule_table, render_summary_table,
};
use pump_oracle::server::run_server;
use pump_oracle::types::{
    CalculatorInput, DepthProfile, EnergyCostData, HourRange, LandscapingDensity, Month,
    PoolShape, PoolSpecs, PoolType, PumpDrive, PumpSpecs, TimeOfUseRates, UsageFactors,
    UsageLevel, WaterClarity,
};
use pump_oracle::validate::validate_input;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PumpKind {
    SingleSpeed,
    TwoSpeed,
    VariableSpeed,
}

#[derive(Debug, Parser)]
#[command(name = "pump-oracle", about = "Pool pump energy optimization")]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Load a full calculator input from a JSON file instead of flags.
    #[arg(short, long)]
    input: Option<PathBuf>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zip: Option<String>,
    /// Reference month for seasonal calculations; defaults to the current
    /// calendar month.
    #[arg(short, long)]
    month: Option<Month>,
    #[command(flatten)]
    pool: PoolArgs,
    #[command(flatten)]
    pump: PumpArgs,
    #[command(flatten)]
    usage: UsageArgs,
    #[command(flatten)]
    energy: EnergyArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
struct PoolArgs {
    #[arg(long, default_value_t = 30.0)]
    length: f64,
    #[arg(long, default_value_t = 15.0)]
    width: f64,
    #[arg(long = "shallow-depth", default_value_t = 4.0)]
    shallow_depth: f64,
    #[arg(long = "deep-depth", default_value_t = 8.0)]
    deep_depth: f64,
    #[arg(long, default_value = "rectangular")]
    shape: PoolShape,
    #[arg(long = "pool-type", default_value = "in-ground")]
    pool_type: PoolType,
}

#[derive(Debug, clap::Args, Clone)]
struct PumpArgs {
    #[arg(long = "pump-type", value_enum, default_value_t = PumpKind::SingleSpeed)]
    pump_type: PumpKind,
    #[arg(long, default_value_t = 1.5)]
    horsepower: f64,
    #[arg(long = "pump-age", default_value_t = 0.0)]
    pump_age: f64,
    /// Nameplate flow rate override in GPM.
    #[arg(long = "flow-rate")]
    flow_rate: Option<f64>,
    #[arg(long = "low-rpm", default_value_t = 1500.0)]
    low_rpm: f64,
    #[arg(long = "medium-rpm", default_value_t = 2600.0)]
    medium_rpm: f64,
    #[arg(long = "high-rpm", default_value_t = 3450.0)]
    high_rpm: f64,
    #[arg(long = "low-hp")]
    low_hp: Option<f64>,
    #[arg(long = "high-hp")]
    high_hp: Option<f64>,
}

impl PumpArgs {
    fn to_specs(&self) -> PumpSpecs {
        let drive = match self.pump_type {
            PumpKind::SingleSpeed => PumpDrive::SingleSpeed,
            PumpKind::TwoSpeed => PumpDrive::TwoSpeed {
                low_hp: self.low_hp.unwrap_or(self.horsepower / 2.0),
                high_hp: self.high_hp.unwrap_or(self.horsepower),
            },
            PumpKind::VariableSpeed => PumpDrive::VariableSpeed {
                low_rpm: self.low_rpm,
                medium_rpm: self.medium_rpm,
                high_rpm: self.high_rpm,
            },
        };
        PumpSpecs {
            drive,
            horsepower: self.horsepower,
            age_years: self.pump_age,
            flow_rate_gpm: self.flow_rate,
        }
    }
}

#[derive(Debug, clap::Args, Clone)]
struct UsageArgs {
    #[arg(long = "usage-level", default_value = "moderate")]
    usage_level: UsageLevel,
    #[arg(long, default_value_t = 2)]
    swimmers: u32,
    #[arg(long, default_value = "moderate")]
    landscaping: LandscapingDensity,
    #[arg(long = "screen-enclosure")]
    screen_enclosure: bool,
    #[arg(long)]
    waterfall: bool,
    #[arg(long)]
    heater: bool,
    #[arg(long = "salt-system")]
    salt_system: bool,
    #[arg(long = "water-clarity", default_value = "slightly-cloudy")]
    water_clarity: WaterClarity,
}

impl UsageArgs {
    fn to_factors(&self) -> UsageFactors {
        UsageFactors {
            usage_level: self.usage_level,
            average_swimmers: self.swimmers,
            landscaping: self.landscaping,
            screen_enclosure: self.screen_enclosure,
            has_waterfall: self.waterfall,
            has_heater: self.heater,
            has_salt_system: self.salt_system,
            water_clarity: self.water_clarity,
        }
    }
}

#[derive(Debug, clap::Args, Clone)]
struct EnergyArgs {
    /// Flat electricity rate in $/kWh; defaults to the state average.
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long = "current-runtime")]
    current_runtime: Option<f64>,
    #[arg(long = "peak-rate")]
    peak_rate: Option<f64>,
    #[arg(long = "off-peak-rate")]
    off_peak_rate: Option<f64>,
    /// Peak pricing windows, e.g. "14-20" or "7-9,17-21".
    #[arg(long = "peak-hours")]
    peak_hours: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full optimization pipeline.
    Optimize,
    /// Pool volume and surface area only.
    Volume,
    /// Daily operating schedule for the optimal runtime.
    Schedule,
    /// Cost and savings breakdown.
    Costs,
    /// Show the climate profile used for a state.
    Climate {
        state: Option<String>,
    },
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Serialize)]
struct VolumeReport {
    gallons: u32,
    surface_area_sq_ft: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        state: cli.state.clone(),
        zip_code: cli.zip.clone(),
        electricity_rate: cli.energy.rate,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }
    if let Commands::Climate { state } = &cli.command {
        let state = state
            .clone()
            .unwrap_or_else(|| config.location.state.clone())
            .to_ascii_uppercase();
        let record = climate::climate_for_state(&state);
        match cli.output {
            OutputFormat::Table => println!("{}", render_climate_table(&state, &record)),
            OutputFormat::Json => println!("{}", render_json(&record)?),
            OutputFormat::Csv => {
                warn!("CSV output for climate not implemented, using JSON");
                println!("{}", render_json(&record)?);
            }
        }
        return Ok(());
    }

    let month = cli.month.unwrap_or_else(Month::current);
    let input = resolve_calculator_input(&cli, &config)?;
    validate_input(&input).context("invalid calculator input")?;

    match &cli.command {
        Commands::Optimize => {
            let mut result = calculate_pool_optimization(&input, month);
            result
                .recommendations
                .truncate(config.optimizer.max_recommendations);
            print_result(&result, cli.output)?;
        }
        Commands::Volume => {
            let report = VolumeReport {
                gallons: engine::volume::calculate_pool_volume(&input.pool),
                surface_area_sq_ft: engine::volume::calculate_surface_area(&input.pool),
            };
            match cli.output {
                OutputFormat::Table => {
                    println!(
                        "Pool volume: {} gal ({} sq ft surface)",
                        report.gallons, report.surface_area_sq_ft
                    );
                }
                OutputFormat::Json => println!("{}", render_json(&report)?),
                OutputFormat::Csv => {
                    warn!("CSV output for volume not implemented, using JSON");
                    println!("{}", render_json(&report)?);
                }
            }
        }
        Commands::Schedule => {
            let result = calculate_pool_optimization(&input, month);
            print_schedule(&result.schedule, result.optimal_runtime, cli.output)?;
        }
        Commands::Costs => {
            let result = calculate_pool_optimization(&input, month);
            print_costs(&result.costs, cli.output)?;
        }
        Commands::Climate { .. } | Commands::Config { .. } | Commands::Serve { .. } => {
            unreachable!("handled before dispatch")
        }
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn resolve_calculator_input(cli: &Cli, config: &Config) -> Result<CalculatorInput> {
    if let Some(path) = &cli.input {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed reading input file: {}", path.display()))?;
        let input: CalculatorInput = serde_json::from_str(&data)
            .with_context(|| format!("failed parsing input file: {}", path.display()))?;
        return Ok(input);
    }

    let location = if !config.location.zip_code.trim().is_empty() {
        climate::location_for_zip(config.location.zip_code.trim())
    } else {
        climate::location_for_state(&config.location.state)
    };

    let electricity_rate = config
        .energy
        .electricity_rate
        .unwrap_or_else(|| climate::electricity_rate_for_state(&location.state));
    let current_runtime = cli
        .energy
        .current_runtime
        .unwrap_or(config.energy.current_daily_runtime);

    let time_of_use = match (cli.energy.peak_rate, cli.energy.off_peak_rate) {
        (Some(peak_rate), Some(off_peak_rate)) => {
            let peak_hours = match &cli.energy.peak_hours {
                Some(raw) => parse_peak_hours(raw)?,
                None => vec![HourRange {
                    start: 14.0,
                    end: 20.0,
                }],
            };
            Some(TimeOfUseRates {
                peak_rate,
                off_peak_rate,
                peak_hours,
            })
        }
        (None, None) => None,
        _ => {
            return Err(anyhow!(
                "time-of-use pricing needs both --peak-rate and --off-peak-rate"
            ));
        }
    };

    Ok(CalculatorInput {
        pool: PoolSpecs {
            length: cli.pool.length,
            width: cli.pool.width,
            depth: DepthProfile {
                shallow: cli.pool.shallow_depth,
                deep: cli.pool.deep_depth,
            },
            shape: cli.pool.shape,
            pool_type: cli.pool.pool_type,
        },
        pump: cli.pump.to_specs(),
        location,
        usage: cli.usage.to_factors(),
        energy: EnergyCostData {
            electricity_rate,
            time_of_use,
            current_daily_runtime: current_runtime,
        },
    })
}

fn parse_peak_hours(raw: &str) -> Result<Vec<HourRange>> {
    let mut out = Vec::new();
    for piece in raw.split(',') {
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            continue;
        }
        let (start, end) = trimmed
            .split_once('-')
            .ok_or_else(|| anyhow!("invalid peak window: {trimmed}"))?;
        let start: f64 = start
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid peak window start: {trimmed}"))?;
        let end: f64 = end
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid peak window end: {trimmed}"))?;
        if start >= end {
            return Err(anyhow!("peak window must start before it ends: {trimmed}"));
        }
        out.push(HourRange { start, end });
    }
    if out.is_empty() {
        return Err(anyhow!("peak hours list is empty"));
    }
    Ok(out)
}

fn print_result(result: &CalculationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_summary_table(result));
            println!("{}", render_schedule_table(&result.schedule));
            println!("{}", render_costs_table(&result.costs));
            println!("{}", render_recommendations_table(&result.recommendations));
        }
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => {
            warn!("CSV output for optimize not implemented, using JSON");
            println!("{}", render_json(result)?);
        }
    }
    Ok(())
}

fn print_schedule(
    schedule: &[ScheduleBlock],
    optimal_runtime: f64,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("Optimal runtime: {optimal_runtime:.1} h/day");
            println!("{}", render_schedule_table(schedule));
        }
        OutputFormat::Json => println!("{}", render_json(schedule)?),
        OutputFormat::Csv => println!("{}", schedule_to_csv(schedule)?),
    }
    Ok(())
}

fn print_costs(costs: &SavingsResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_costs_table(costs)),
        OutputFormat::Json => println!("{}", render_json(costs)?),
        OutputFormat::Csv => println!("{}", costs_to_csv(costs)?),
    }
    Ok(())
}
