use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::string_enum::define_string_enum;
use crate::models::users::entities::MahasiswaRingkas;

define_string_enum! {
    /// 学生视角下的作业提交状态
    StatusPengumpulan {
        BelumDikumpulkan => "belum_dikumpulkan",
        Dikumpulkan => "dikumpulkan",
        Terlambat => "terlambat",
        Dinilai => "dinilai",
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tugas {
    pub id: i64,
    pub mata_kuliah_id: i64,
    pub judul: String,
    pub deskripsi: Option<String>,
    pub tenggat: DateTime<Utc>,
    pub nilai_maksimal: f64,
    pub izinkan_terlambat: bool,
    pub dibuat_oleh: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tugas {
    pub fn lewat_tenggat(&self, now: DateTime<Utc>) -> bool {
        now > self.tenggat
    }
}

// 作业提交
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pengumpulan {
    pub id: i64,
    pub tugas_id: i64,
    pub mahasiswa_id: i64,
    pub konten: Option<String>,
    pub lampiran_url: Option<String>,
    pub terlambat: bool,
    pub nilai: Option<f64>,
    pub komentar: Option<String>,
    pub dinilai_oleh: Option<i64>,
    pub dikumpulkan_pada: DateTime<Utc>,
    pub dinilai_pada: Option<DateTime<Utc>>,
}

impl Pengumpulan {
    pub fn sudah_dinilai(&self) -> bool {
        self.nilai.is_some()
    }

    pub fn status(&self) -> StatusPengumpulan {
        if self.sudah_dinilai() {
            StatusPengumpulan::Dinilai
        } else if self.terlambat {
            StatusPengumpulan::Terlambat
        } else {
            StatusPengumpulan::Dikumpulkan
        }
    }
}

/// 合并后的提交状态，未提交时为 `belum_dikumpulkan`
pub fn status_pengumpulan(pengumpulan: Option<&Pengumpulan>) -> StatusPengumpulan {
    pengumpulan
        .map(Pengumpulan::status)
        .unwrap_or(StatusPengumpulan::BelumDikumpulkan)
}

/// 作业列表项：学生视图带本人提交信息，教师视图带提交数
#[derive(Debug, Clone, Serialize)]
pub struct TugasItem {
    #[serde(flatten)]
    pub tugas: Tugas,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_pengumpulan: Option<StatusPengumpulan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nilai: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dikumpulkan_pada: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jumlah_pengumpulan: Option<i64>,
}

impl TugasItem {
    pub fn untuk_mahasiswa(tugas: Tugas, pengumpulan: Option<&Pengumpulan>) -> Self {
        Self {
            tugas,
            status_pengumpulan: Some(status_pengumpulan(pengumpulan)),
            nilai: pengumpulan.and_then(|p| p.nilai),
            dikumpulkan_pada: pengumpulan.map(|p| p.dikumpulkan_pada),
            jumlah_pengumpulan: None,
        }
    }

    pub fn untuk_dosen(tugas: Tugas, jumlah_pengumpulan: i64) -> Self {
        Self {
            tugas,
            status_pengumpulan: None,
            nilai: None,
            dikumpulkan_pada: None,
            jumlah_pengumpulan: Some(jumlah_pengumpulan),
        }
    }
}

/// 提交记录（附带学生信息）
#[derive(Debug, Clone, Serialize)]
pub struct PengumpulanDetail {
    #[serde(flatten)]
    pub pengumpulan: Pengumpulan,
    pub mahasiswa: MahasiswaRingkas,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn pengumpulan(terlambat: bool, nilai: Option<f64>) -> Pengumpulan {
        Pengumpulan {
            id: 1,
            tugas_id: 1,
            mahasiswa_id: 3,
            konten: Some("jawaban".into()),
            lampiran_url: None,
            terlambat,
            nilai,
            komentar: None,
            dinilai_oleh: None,
            dikumpulkan_pada: Utc::now(),
            dinilai_pada: None,
        }
    }

    #[test]
    fn test_status_merge() {
        assert_eq!(status_pengumpulan(None), StatusPengumpulan::BelumDikumpulkan);
        assert_eq!(
            status_pengumpulan(Some(&pengumpulan(false, None))),
            StatusPengumpulan::Dikumpulkan
        );
        assert_eq!(
            status_pengumpulan(Some(&pengumpulan(true, None))),
            StatusPengumpulan::Terlambat
        );
        assert_eq!(
            status_pengumpulan(Some(&pengumpulan(true, Some(80.0)))),
            StatusPengumpulan::Dinilai
        );
    }

    #[test]
    fn test_deadline() {
        let now = Utc::now();
        let tugas = Tugas {
            id: 1,
            mata_kuliah_id: 1,
            judul: "Tugas 1".into(),
            deskripsi: None,
            tenggat: now,
            nilai_maksimal: 100.0,
            izinkan_terlambat: false,
            dibuat_oleh: 2,
            created_at: now,
            updated_at: now,
        };
        assert!(!tugas.lewat_tenggat(now));
        assert!(tugas.lewat_tenggat(now + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_student_item_serialization() {
        let now = Utc::now();
        let tugas = Tugas {
            id: 1,
            mata_kuliah_id: 1,
            judul: "Tugas 1".into(),
            deskripsi: None,
            tenggat: now,
            nilai_maksimal: 100.0,
            izinkan_terlambat: false,
            dibuat_oleh: 2,
            created_at: now,
            updated_at: now,
        };
        let item = TugasItem::untuk_mahasiswa(tugas, None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status_pengumpulan"], "belum_dikumpulkan");
        assert!(json.get("jumlah_pengumpulan").is_none());
        assert_eq!(json["judul"], "Tugas 1");
    }
}
