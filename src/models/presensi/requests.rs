use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::entities::StatusPresensi;

pub const DURASI_MIN: i64 = 1;
pub const DURASI_MAX: i64 = 600;

// 开设考勤场次请求
#[derive(Debug, Clone, Deserialize)]
pub struct BukaSesiRequest {
    pub mata_kuliah_id: i64,
    pub pertemuan_ke: i32,
    pub topik: Option<String>,
    /// 缺省为当前时间
    pub waktu_mulai: Option<DateTime<Utc>>,
    /// 缺省取配置值
    pub durasi_menit: Option<i64>,
}

impl BukaSesiRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.pertemuan_ke < 1 {
            return Err("pertemuan_ke must be at least 1".into());
        }
        if let Some(durasi) = self.durasi_menit
            && !(DURASI_MIN..=DURASI_MAX).contains(&durasi)
        {
            return Err(format!(
                "durasi_menit must be between {DURASI_MIN} and {DURASI_MAX}"
            ));
        }
        Ok(())
    }
}

/// 按课程筛选
#[derive(Debug, Clone, Deserialize)]
pub struct MataKuliahQuery {
    pub mata_kuliah_id: i64,
}

// 学生签到请求
#[derive(Debug, Clone, Deserialize)]
pub struct HadirRequest {
    pub kode: String,
}

// 教师录入考勤状态
#[derive(Debug, Clone, Deserialize)]
pub struct SetPresensiRequest {
    pub status: StatusPresensi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bounds() {
        let mut req = BukaSesiRequest {
            mata_kuliah_id: 1,
            pertemuan_ke: 1,
            topik: None,
            waktu_mulai: None,
            durasi_menit: None,
        };
        assert!(req.validate().is_ok());
        req.durasi_menit = Some(0);
        assert!(req.validate().is_err());
        req.durasi_menit = Some(601);
        assert!(req.validate().is_err());
        req.durasi_menit = Some(600);
        assert!(req.validate().is_ok());
        req.pertemuan_ke = 0;
        assert!(req.validate().is_err());
    }
}
