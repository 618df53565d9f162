use serde::{Deserialize, Serialize};

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MataKuliah {
    pub id: i64,
    pub kode: String,
    pub nama: String,
    pub sks: i32,
    /// 培养方案中的学期序号
    pub semester: i32,
    pub dosen_id: i64,
    pub kuota: i32,
    pub hari: Option<String>,
    pub jam_mulai: Option<String>,
    pub jam_selesai: Option<String>,
    pub ruangan: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl MataKuliah {
    /// 是否为该课程的授课教师
    pub fn diampu_oleh(&self, user_id: i64) -> bool {
        self.dosen_id == user_id
    }
}

/// 附带授课教师姓名的课程
#[derive(Debug, Clone, Serialize)]
pub struct MataKuliahDetail {
    #[serde(flatten)]
    pub mata_kuliah: MataKuliah,
    pub nama_dosen: Option<String>,
}
