use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::string_enum::define_string_enum;
use crate::models::users::entities::MahasiswaRingkas;

define_string_enum! {
    /// 考勤状态
    StatusPresensi {
        Hadir => "hadir", // 出勤
        Izin => "izin",   // 事假
        Sakit => "sakit", // 病假
        Alpa => "alpa",   // 缺勤
    }
}

define_string_enum! {
    /// 签到窗口状态
    StatusSesi {
        BelumDibuka => "belum_dibuka",
        Berlangsung => "berlangsung",
        Ditutup => "ditutup",
    }
}

// 考勤场次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SesiPresensi {
    pub id: i64,
    pub mata_kuliah_id: i64,
    pub pertemuan_ke: i32,
    pub topik: Option<String>,
    /// 学生视图中清空，不输出
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kode: String,
    pub waktu_mulai: DateTime<Utc>,
    pub waktu_selesai: DateTime<Utc>,
    pub dibuat_oleh: i64,
    pub created_at: DateTime<Utc>,
}

impl SesiPresensi {
    /// 按给定时间计算窗口状态，两端均为闭区间
    pub fn status_at(&self, now: DateTime<Utc>) -> StatusSesi {
        if now < self.waktu_mulai {
            StatusSesi::BelumDibuka
        } else if now <= self.waktu_selesai {
            StatusSesi::Berlangsung
        } else {
            StatusSesi::Ditutup
        }
    }

    pub fn bisa_presensi(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == StatusSesi::Berlangsung
    }

    /// 签到码比较，忽略大小写与首尾空白
    pub fn kode_cocok(&self, kode: &str) -> bool {
        self.kode.eq_ignore_ascii_case(kode.trim())
    }

    pub fn sudah_dimulai(&self, now: DateTime<Utc>) -> bool {
        now >= self.waktu_mulai
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Presensi {
    pub id: i64,
    pub sesi_id: i64,
    pub mahasiswa_id: i64,
    pub status: StatusPresensi,
    pub waktu_presensi: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// 场次列表项
#[derive(Debug, Clone, Serialize)]
pub struct SesiItem {
    #[serde(flatten)]
    pub sesi: SesiPresensi,
    pub status_sesi: StatusSesi,
    pub bisa_presensi: bool,
    /// 仅学生视图：本人的考勤状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_presensi: Option<StatusPresensi>,
}

/// 场次内的考勤记录（附带学生信息）
#[derive(Debug, Clone, Serialize)]
pub struct PresensiDetail {
    #[serde(flatten)]
    pub presensi: Presensi,
    pub mahasiswa: MahasiswaRingkas,
}

/// 单个学生的考勤汇总
#[derive(Debug, Clone, Serialize)]
pub struct RekapMahasiswa {
    pub mahasiswa: MahasiswaRingkas,
    pub hadir: i64,
    pub izin: i64,
    pub sakit: i64,
    pub alpa: i64,
    pub total_sesi: i64,
    pub persentase_kehadiran: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sesi(now: DateTime<Utc>) -> SesiPresensi {
        SesiPresensi {
            id: 1,
            mata_kuliah_id: 1,
            pertemuan_ke: 1,
            topik: None,
            kode: "AB12CD".into(),
            waktu_mulai: now,
            waktu_selesai: now + TimeDelta::minutes(15),
            dibuat_oleh: 2,
            created_at: now,
        }
    }

    #[test]
    fn test_window_state() {
        let now = Utc::now();
        let s = sesi(now);
        assert_eq!(s.status_at(now - TimeDelta::seconds(1)), StatusSesi::BelumDibuka);
        assert_eq!(s.status_at(now), StatusSesi::Berlangsung);
        assert_eq!(s.status_at(now + TimeDelta::minutes(15)), StatusSesi::Berlangsung);
        assert_eq!(
            s.status_at(now + TimeDelta::minutes(15) + TimeDelta::seconds(1)),
            StatusSesi::Ditutup
        );
        assert!(s.bisa_presensi(now + TimeDelta::minutes(5)));
        assert!(!s.bisa_presensi(now + TimeDelta::hours(1)));
    }

    #[test]
    fn test_code_match_ignores_case() {
        let s = sesi(Utc::now());
        assert!(s.kode_cocok("ab12cd"));
        assert!(s.kode_cocok(" AB12CD "));
        assert!(!s.kode_cocok("AB12CE"));
    }
}
