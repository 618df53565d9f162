use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const DEFAULT_NILAI_MAKSIMAL: f64 = 100.0;

#[derive(Debug, Clone, Deserialize)]
pub struct TugasListParams {
    pub mata_kuliah_id: i64,
}

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTugasRequest {
    pub mata_kuliah_id: i64,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub tenggat: DateTime<Utc>,
    pub nilai_maksimal: Option<f64>,
    #[serde(default)]
    pub izinkan_terlambat: bool,
}

impl CreateTugasRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.judul.trim().is_empty() {
            return Err("judul cannot be empty".into());
        }
        if let Some(max) = self.nilai_maksimal
            && (max <= 0.0 || !max.is_finite())
        {
            return Err("nilai_maksimal must be greater than 0".into());
        }
        Ok(())
    }
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTugasRequest {
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub tenggat: Option<DateTime<Utc>>,
    pub nilai_maksimal: Option<f64>,
    pub izinkan_terlambat: Option<bool>,
}

impl UpdateTugasRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.judul.as_deref().is_some_and(|j| j.trim().is_empty()) {
            return Err("judul cannot be empty".into());
        }
        if let Some(max) = self.nilai_maksimal
            && (max <= 0.0 || !max.is_finite())
        {
            return Err("nilai_maksimal must be greater than 0".into());
        }
        Ok(())
    }
}

// 学生提交作业
#[derive(Debug, Clone, Deserialize)]
pub struct KumpulkanRequest {
    pub konten: Option<String>,
    pub lampiran_url: Option<String>,
}

impl KumpulkanRequest {
    /// 内容与附件链接至少填写一项
    pub fn validate(&self) -> Result<(), String> {
        let ada_konten = self.konten.as_deref().is_some_and(|k| !k.trim().is_empty());
        let ada_lampiran = self
            .lampiran_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty());
        if !ada_konten && !ada_lampiran {
            return Err("Either konten or lampiran_url is required".into());
        }
        Ok(())
    }
}

// 批改请求
#[derive(Debug, Clone, Deserialize)]
pub struct NilaiPengumpulanRequest {
    pub nilai: f64,
    pub komentar: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_needs_content_or_link() {
        let empty = KumpulkanRequest {
            konten: Some("   ".into()),
            lampiran_url: None,
        };
        assert!(empty.validate().is_err());
        let link = KumpulkanRequest {
            konten: None,
            lampiran_url: Some("https://drive.example/berkas".into()),
        };
        assert!(link.validate().is_ok());
    }

    #[test]
    fn test_max_score_positive() {
        let req: CreateTugasRequest = serde_json::from_str(
            r#"{"mata_kuliah_id":1,"judul":"Kuis","tenggat":"2030-01-01T00:00:00Z","nilai_maksimal":0}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
        assert!(!req.izinkan_terlambat);
    }

    #[test]
    fn test_update_max_score() {
        let mut req = UpdateTugasRequest::default();
        assert!(req.validate().is_ok());
        req.nilai_maksimal = Some(f64::NAN);
        assert!(req.validate().is_err());
        req.nilai_maksimal = Some(-5.0);
        assert!(req.validate().is_err());
        req.nilai_maksimal = Some(50.0);
        assert!(req.validate().is_ok());
    }
}
