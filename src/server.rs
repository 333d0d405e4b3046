use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::climate::{self, ClimateRecord};
use crate::config::Config;
use crate::engine::{
    self, calculate_pool_optimization, CalculationResult, SavingsResult, ScheduleBlock,
};
use crate::types::{
    CalculatorInput, EnergyCostData, LocationData, Month, PoolSpecs, PumpSpecs, UsageFactors,
};
use crate::validate::validate_input;

#[derive(Clone)]
struct ApiState {
    config: Config,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Calculator inputs shared by every POST endpoint. Pool and pump specs
/// are required; location falls back to the configured state's climate
/// profile and energy pricing falls back to state averages.
#[derive(Debug, Clone, Default, Deserialize)]
struct CalculatorRequest {
    pool: Option<PoolSpecs>,
    pump: Option<PumpSpecs>,
    location: Option<LocationData>,
    state: Option<String>,
    zip_code: Option<String>,
    usage: Option<UsageFactors>,
    energy: Option<EnergyCostData>,
    month: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OptimizeRequest {
    #[serde(flatten)]
    context: CalculatorRequest,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ScheduleResponse {
    optimal_runtime: f64,
    schedule: Vec<ScheduleBlock>,
}

#[derive(Debug, Serialize)]
struct ClimateResponse {
    state: String,
    climate: ClimateRecord,
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let state = ApiState { config };

    let app = Router::new()
        .route("/health", get(health))
        .route("/v1/optimize", post(optimize))
        .route("/v1/schedule", post(schedule))
        .route("/v1/costs", post(costs))
        .route("/v1/climate/:state", get(climate_profile))
        .route("/v1/config", get(show_config))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn optimize(
    State(state): State<ApiState>,
    Json(request): Json<OptimizeRequest>,
) -> ApiResult<CalculationResult> {
    let (input, month) = resolve_effective_input(&state.config, &request.context)?;
    Ok(ok(calculate_pool_optimization(&input, month)))
}

async fn schedule(
    State(state): State<ApiState>,
    Json(request): Json<OptimizeRequest>,
) -> ApiResult<ScheduleResponse> {
    let (input, month) = resolve_effective_input(&state.config, &request.context)?;

    let pool_volume = engine::volume::calculate_pool_volume(&input.pool);
    let flow_rate = engine::flow::calculate_pump_flow_rate(&input.pump);
    let turnovers =
        engine::turnover::calculate_required_turnovers(&input.location, &input.usage, month);
    let optimal_runtime = engine::runtime::clamp_runtime(
        engine::runtime::calculate_optimal_runtime(pool_volume, flow_rate, turnovers, &input.pump),
    );
    let schedule = engine::schedule::generate_schedule(
        optimal_runtime,
        &input.location,
        &input.energy,
        &input.pump,
        month,
    );

    Ok(ok(ScheduleResponse {
        optimal_runtime,
        schedule,
    }))
}

async fn costs(
    State(state): State<ApiState>,
    Json(request): Json<OptimizeRequest>,
) -> ApiResult<SavingsResult> {
    let (input, month) = resolve_effective_input(&state.config, &request.context)?;
    let result = calculate_pool_optimization(&input, month);
    Ok(ok(result.costs))
}

async fn climate_profile(Path(state_code): Path<String>) -> ApiResult<ClimateResponse> {
    if state_code.trim().len() != 2 {
        return Err(ApiError::bad_request("state must be a two-letter code"));
    }
    let normalized = state_code.trim().to_ascii_uppercase();
    let climate = climate::climate_for_state(&normalized);
    Ok(ok(ClimateResponse {
        state: normalized,
        climate,
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn resolve_effective_input(
    config: &Config,
    context: &CalculatorRequest,
) -> std::result::Result<(CalculatorInput, Month), ApiError> {
    let pool = context
        .pool
        .clone()
        .ok_or_else(|| ApiError::bad_request("pool specs are required"))?;
    let pump = context
        .pump
        .clone()
        .ok_or_else(|| ApiError::bad_request("pump specs are required"))?;

    let location = if let Some(location) = &context.location {
        location.clone()
    } else if let Some(zip) = context.zip_code.as_deref().filter(|z| !z.trim().is_empty()) {
        climate::location_for_zip(zip.trim())
    } else if let Some(state) = context.state.as_deref().filter(|s| !s.trim().is_empty()) {
        climate::location_for_state(state)
    } else if !config.location.zip_code.trim().is_empty() {
        climate::location_for_zip(&config.location.zip_code)
    } else {
        climate::location_for_state(&config.location.state)
    };

    let usage = context.usage.clone().unwrap_or_else(UsageFactors::moderate);

    let energy = context.energy.clone().unwrap_or_else(|| {
        let rate = config
            .energy
            .electricity_rate
            .unwrap_or_else(|| climate::electricity_rate_for_state(&location.state));
        EnergyCostData::flat_rate(rate, config.energy.current_daily_runtime)
    });

    let month = match &context.month {
        Some(raw) => raw
            .parse::<Month>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => Month::current(),
    };

    let input = CalculatorInput {
        pool,
        pump,
        location,
        usage,
        energy,
    };
    validate_input(&input).map_err(|e| ApiError::bad_request(e.to_string()))?;

    Ok((input, month))
}
