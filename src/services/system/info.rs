use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::{
    ApiResponse,
    system::{
        entities::{AkademikSettings, AppStartTime},
        responses::SystemInfoResponse,
    },
};

/// 获取系统信息（只读）
pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 测试中可能未注入启动时间
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| start.uptime_seconds())
        .unwrap_or(0);

    let akademik = &config.akademik;
    let response = SystemInfoResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
        akademik: AkademikSettings {
            max_sks: akademik.max_sks,
            bobot_tugas: akademik.bobot_tugas,
            bobot_uts: akademik.bobot_uts,
            bobot_uas: akademik.bobot_uas,
            durasi_presensi_menit: akademik.durasi_presensi_menit,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System info retrieved successfully",
    )))
}
