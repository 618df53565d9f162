use serde::Deserialize;

use super::entities::{KrsStatus, Periode};

/// 学期查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct SemesterQuery {
    pub tahun_ajaran: String,
    pub periode: Periode,
}

// 选课提交请求
#[derive(Debug, Clone, Deserialize)]
pub struct AjukanKrsRequest {
    pub tahun_ajaran: String,
    pub periode: Periode,
    pub mata_kuliah_ids: Vec<i64>,
}

impl AjukanKrsRequest {
    /// 课程列表非空且无重复
    pub fn validate_ids(&self) -> Result<(), String> {
        if self.mata_kuliah_ids.is_empty() {
            return Err("mata_kuliah_ids cannot be empty".into());
        }
        let mut seen = std::collections::HashSet::new();
        for id in &self.mata_kuliah_ids {
            if !seen.insert(*id) {
                return Err(format!("Duplicate course id in request: {id}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PengajuanListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub mata_kuliah_id: Option<i64>,
}

// 审核请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateKrsStatusRequest {
    pub status: KrsStatus,
    pub catatan: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ids: Vec<i64>) -> AjukanKrsRequest {
        AjukanKrsRequest {
            tahun_ajaran: "2025/2026".into(),
            periode: Periode::Ganjil,
            mata_kuliah_ids: ids,
        }
    }

    #[test]
    fn test_validate_ids() {
        assert!(request(vec![1, 2, 3]).validate_ids().is_ok());
        assert!(request(vec![]).validate_ids().is_err());
        assert!(request(vec![4, 5, 4]).validate_ids().is_err());
    }

    #[test]
    fn test_periode_from_json() {
        let req: AjukanKrsRequest = serde_json::from_str(
            r#"{"tahun_ajaran":"2025/2026","periode":"genap","mata_kuliah_ids":[7]}"#,
        )
        .unwrap();
        assert_eq!(req.periode, Periode::Genap);
    }
}
