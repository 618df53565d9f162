use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::krs::entities::Periode;
use crate::models::mata_kuliah::entities::MataKuliah;
use crate::models::users::entities::MahasiswaRingkas;

// 课程成绩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nilai {
    pub id: i64,
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: Periode,
    pub nilai_tugas: f64,
    pub nilai_uts: f64,
    pub nilai_uas: f64,
    pub nilai_akhir: f64,
    pub nilai_huruf: String,
    pub bobot: f64,
    pub dinilai_oleh: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 成绩单中的一行（附带课程信息）
#[derive(Debug, Clone, Serialize)]
pub struct NilaiMataKuliah {
    #[serde(flatten)]
    pub nilai: Nilai,
    pub mata_kuliah: MataKuliah,
}

/// 教师视图中的一行（附带学生信息）
#[derive(Debug, Clone, Serialize)]
pub struct NilaiMahasiswa {
    #[serde(flatten)]
    pub nilai: Nilai,
    pub mahasiswa: MahasiswaRingkas,
}

/// 写入存储层的成绩
#[derive(Debug, Clone)]
pub struct SimpanNilai {
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: Periode,
    pub nilai_tugas: f64,
    pub nilai_uts: f64,
    pub nilai_uas: f64,
    pub nilai_akhir: f64,
    pub nilai_huruf: String,
    pub bobot: f64,
    pub dinilai_oleh: i64,
}
