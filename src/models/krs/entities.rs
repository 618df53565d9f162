use serde::{Deserialize, Serialize};

use crate::models::common::string_enum::define_string_enum;
use crate::models::mata_kuliah::entities::MataKuliah;
use crate::models::users::entities::MahasiswaRingkas;

define_string_enum! {
    /// 学期（单/双）
    Periode {
        Ganjil => "ganjil",
        Genap => "genap",
    }
}

define_string_enum! {
    /// 选课状态
    KrsStatus {
        Diajukan => "diajukan",   // 待审核
        Disetujui => "disetujui", // 已批准
        Ditolak => "ditolak",     // 已驳回
    }
}

impl KrsStatus {
    /// 占用学分与名额的状态
    pub fn menempati_kuota(&self) -> bool {
        !matches!(self, KrsStatus::Ditolak)
    }
}

// 选课记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Krs {
    pub id: i64,
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: Periode,
    pub status: KrsStatus,
    pub catatan: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 学年 + 学期
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Semester {
    pub tahun_ajaran: String,
    pub periode: Periode,
}

impl PartialOrd for Periode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Periode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let urutan = |p: &Periode| match p {
            Periode::Ganjil => 0,
            Periode::Genap => 1,
        };
        urutan(self).cmp(&urutan(other))
    }
}

/// 附带课程信息的选课记录
#[derive(Debug, Clone, Serialize)]
pub struct KrsDetail {
    #[serde(flatten)]
    pub krs: Krs,
    pub mata_kuliah: MataKuliah,
}

/// 待审核列表项（附带学生信息）
#[derive(Debug, Clone, Serialize)]
pub struct PengajuanKrs {
    #[serde(flatten)]
    pub krs: Krs,
    pub mata_kuliah: MataKuliah,
    pub mahasiswa: MahasiswaRingkas,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periode_order() {
        let a = Semester {
            tahun_ajaran: "2024/2025".into(),
            periode: Periode::Genap,
        };
        let b = Semester {
            tahun_ajaran: "2025/2026".into(),
            periode: Periode::Ganjil,
        };
        let c = Semester {
            tahun_ajaran: "2024/2025".into(),
            periode: Periode::Ganjil,
        };
        let mut list = vec![a.clone(), b.clone(), c.clone()];
        list.sort();
        assert_eq!(list, vec![c, a, b]);
    }

    #[test]
    fn test_rejected_does_not_hold_quota() {
        assert!(KrsStatus::Diajukan.menempati_kuota());
        assert!(KrsStatus::Disetujui.menempati_kuota());
        assert!(!KrsStatus::Ditolak.menempati_kuota());
    }
}
