use serde::Deserialize;

use crate::models::krs::entities::Periode;

// 成绩录入请求
#[derive(Debug, Clone, Deserialize)]
pub struct InputNilaiRequest {
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: Periode,
    pub nilai_tugas: f64,
    pub nilai_uts: f64,
    pub nilai_uas: f64,
}

impl InputNilaiRequest {
    /// 各项分数须在 0..=100
    pub fn validate(&self) -> Result<(), String> {
        for (nama, nilai) in [
            ("nilai_tugas", self.nilai_tugas),
            ("nilai_uts", self.nilai_uts),
            ("nilai_uas", self.nilai_uas),
        ] {
            if !nilai.is_finite() || !(0.0..=100.0).contains(&nilai) {
                return Err(format!("{nama} must be between 0 and 100"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NilaiListParams {
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: Periode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KhsParams {
    pub tahun_ajaran: String,
    pub periode: Periode,
    /// 仅管理员可指定
    pub mahasiswa_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranskripParams {
    /// 仅管理员可指定
    pub mahasiswa_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_range() {
        let mut req = InputNilaiRequest {
            mahasiswa_id: 3,
            mata_kuliah_id: 1,
            tahun_ajaran: "2025/2026".into(),
            periode: Periode::Ganjil,
            nilai_tugas: 100.0,
            nilai_uts: 0.0,
            nilai_uas: 75.5,
        };
        assert!(req.validate().is_ok());
        req.nilai_uas = 100.5;
        assert!(req.validate().is_err());
        req.nilai_uas = -1.0;
        assert!(req.validate().is_err());
    }
}
