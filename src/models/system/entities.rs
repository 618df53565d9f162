use serde::Serialize;

/// 程序启动时间（注入到 app_data 中用于计算运行时长）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }

    pub fn uptime_seconds(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.start_datetime)
            .num_seconds()
            .max(0)
    }
}

/// 对外公开的学籍参数
#[derive(Debug, Clone, Serialize)]
pub struct AkademikSettings {
    pub max_sks: i32,
    pub bobot_tugas: f64,
    pub bobot_uts: f64,
    pub bobot_uas: f64,
    pub durasi_presensi_menit: i64,
}
