use serde::Deserialize;

use crate::models::krs::entities::Periode;

pub const SKS_MIN: i32 = 1;
pub const SKS_MAX: i32 = 6;
pub const SEMESTER_MAX: i32 = 14;

#[derive(Debug, Clone, Deserialize)]
pub struct MataKuliahListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub semester: Option<i32>,
    pub dosen_id: Option<i64>,
    pub search: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct MataKuliahListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub semester: Option<i32>,
    pub dosen_id: Option<i64>,
    pub search: Option<String>,
}

impl From<MataKuliahListParams> for MataKuliahListQuery {
    fn from(params: MataKuliahListParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
            semester: params.semester,
            dosen_id: params.dosen_id,
            search: params.search,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMataKuliahRequest {
    pub kode: String,
    pub nama: String,
    pub sks: i32,
    pub semester: i32,
    pub dosen_id: i64,
    pub kuota: i32,
    pub hari: Option<String>,
    pub jam_mulai: Option<String>,
    pub jam_selesai: Option<String>,
    pub ruangan: Option<String>,
}

impl CreateMataKuliahRequest {
    /// 校验字段范围，返回第一个错误
    pub fn validate(&self) -> Result<(), String> {
        if self.kode.trim().is_empty() {
            return Err("Course code cannot be empty".into());
        }
        if self.nama.trim().is_empty() {
            return Err("Course name cannot be empty".into());
        }
        validate_sks(self.sks)?;
        validate_semester(self.semester)?;
        validate_kuota(self.kuota)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMataKuliahRequest {
    pub kode: Option<String>,
    pub nama: Option<String>,
    pub sks: Option<i32>,
    pub semester: Option<i32>,
    pub dosen_id: Option<i64>,
    pub kuota: Option<i32>,
    pub hari: Option<String>,
    pub jam_mulai: Option<String>,
    pub jam_selesai: Option<String>,
    pub ruangan: Option<String>,
}

impl UpdateMataKuliahRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.kode.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err("Course code cannot be empty".into());
        }
        if self.nama.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("Course name cannot be empty".into());
        }
        if let Some(sks) = self.sks {
            validate_sks(sks)?;
        }
        if let Some(semester) = self.semester {
            validate_semester(semester)?;
        }
        if let Some(kuota) = self.kuota {
            validate_kuota(kuota)?;
        }
        Ok(())
    }
}

/// 课程学生名单查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PesertaQuery {
    pub tahun_ajaran: String,
    pub periode: Periode,
}

fn validate_sks(sks: i32) -> Result<(), String> {
    if !(SKS_MIN..=SKS_MAX).contains(&sks) {
        return Err(format!("SKS must be between {SKS_MIN} and {SKS_MAX}"));
    }
    Ok(())
}

fn validate_semester(semester: i32) -> Result<(), String> {
    if !(1..=SEMESTER_MAX).contains(&semester) {
        return Err(format!("Semester must be between 1 and {SEMESTER_MAX}"));
    }
    Ok(())
}

fn validate_kuota(kuota: i32) -> Result<(), String> {
    if kuota < 1 {
        return Err("Quota must be at least 1".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateMataKuliahRequest {
        CreateMataKuliahRequest {
            kode: "IF101".into(),
            nama: "Algoritma".into(),
            sks: 3,
            semester: 1,
            dosen_id: 2,
            kuota: 40,
            hari: None,
            jam_mulai: None,
            jam_selesai: None,
            ruangan: None,
        }
    }

    #[test]
    fn test_create_request_ranges() {
        assert!(request().validate().is_ok());

        let mut req = request();
        req.sks = 7;
        assert!(req.validate().is_err());

        let mut req = request();
        req.sks = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.semester = 15;
        assert!(req.validate().is_err());

        let mut req = request();
        req.kode = "  ".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_only_checks_present_fields() {
        assert!(UpdateMataKuliahRequest::default().validate().is_ok());
        let req = UpdateMataKuliahRequest {
            kuota: Some(0),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
