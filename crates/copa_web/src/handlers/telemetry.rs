use axum::Json;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Simulated wearable reading for one athlete. A hardware integration
/// would replace this with a read from the device broker; the response
/// shape stays the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryReading {
    pub bpm: u32,
    pub spo2: u32,
    #[serde(rename = "velocityX")]
    pub velocity_x: f64,
    #[serde(rename = "velocityY")]
    pub velocity_y: f64,
    #[serde(rename = "velocityZ")]
    pub velocity_z: f64,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

fn two_decimals(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn sample_reading() -> TelemetryReading {
    let mut rng = rand::thread_rng();
    TelemetryReading {
        bpm: rng.gen_range(70..=140),
        spo2: rng.gen_range(92..=100),
        velocity_x: two_decimals(rng.gen_range(0.0..5.0)),
        velocity_y: two_decimals(rng.gen_range(0.0..5.0)),
        velocity_z: two_decimals(rng.gen_range(0.0..5.0)),
        updated_at: Utc::now(),
    }
}

pub async fn status() -> Json<TelemetryReading> {
    Json(sample_reading())
}
