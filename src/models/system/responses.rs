use serde::Serialize;

use super::entities::AkademikSettings;

#[derive(Debug, Serialize)]
pub struct SystemInfoResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
    pub akademik: AkademikSettings,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
