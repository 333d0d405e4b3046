pub mod lookup;

pub use lookup::{
    climate_for_state, electricity_rate_for_state, location_for_state, location_for_zip,
    state_for_zip, ClimateRecord,
};
