use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::collections::HashMap;

use super::PresensiService;
use crate::models::{
    ApiResponse,
    presensi::{
        entities::{Presensi, RekapMahasiswa, SesiPresensi, StatusPresensi},
        requests::MataKuliahQuery,
        responses::RekapResponse,
    },
    users::entities::{MahasiswaRingkas, UserRole},
};
use crate::services::access::{current_user, ensure_anggota, load_mata_kuliah, storage_error};
use crate::utils::akademik::persentase_kehadiran;

/// 已开始的场次中没有记录的算作缺勤
pub(crate) fn hitung_rekap(
    mahasiswa: Vec<MahasiswaRingkas>,
    sesi_dimulai: &[SesiPresensi],
    records: &[Presensi],
) -> Vec<RekapMahasiswa> {
    let status: HashMap<(i64, i64), StatusPresensi> = records
        .iter()
        .map(|p| ((p.mahasiswa_id, p.sesi_id), p.status))
        .collect();
    let total_sesi = sesi_dimulai.len() as i64;

    mahasiswa
        .into_iter()
        .map(|mhs| {
            let mut rekap = RekapMahasiswa {
                hadir: 0,
                izin: 0,
                sakit: 0,
                alpa: 0,
                total_sesi,
                persentase_kehadiran: 0.0,
                mahasiswa: mhs,
            };
            for sesi in sesi_dimulai {
                match status
                    .get(&(rekap.mahasiswa.id, sesi.id))
                    .copied()
                    .unwrap_or(StatusPresensi::Alpa)
                {
                    StatusPresensi::Hadir => rekap.hadir += 1,
                    StatusPresensi::Izin => rekap.izin += 1,
                    StatusPresensi::Sakit => rekap.sakit += 1,
                    StatusPresensi::Alpa => rekap.alpa += 1,
                }
            }
            rekap.persentase_kehadiran = persentase_kehadiran(rekap.hadir, total_sesi);
            rekap
        })
        .collect()
}

pub async fn rekap(
    service: &PresensiService,
    query: MataKuliahQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let mata_kuliah = try_or_respond!(load_mata_kuliah(&storage, query.mata_kuliah_id).await);
    try_or_respond!(ensure_anggota(&storage, &user, &mata_kuliah).await);

    let now = Utc::now();
    let sesi_dimulai: Vec<SesiPresensi> =
        match storage.list_sesi_by_mata_kuliah(mata_kuliah.id).await {
            Ok(list) => list.into_iter().filter(|s| s.sudah_dimulai(now)).collect(),
            Err(e) => return Ok(storage_error("Failed to retrieve attendance sessions", e)),
        };

    // 学生只看到自己的一行
    let (mahasiswa, filter) = if user.role == UserRole::Mahasiswa {
        (vec![user.ringkas()], Some(user.id))
    } else {
        match storage.list_mahasiswa_terdaftar(mata_kuliah.id).await {
            Ok(list) => (list, None),
            Err(e) => return Ok(storage_error("Failed to retrieve enrolled students", e)),
        }
    };

    let records = match storage
        .list_presensi_by_mata_kuliah(mata_kuliah.id, filter)
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(storage_error("Failed to retrieve attendance records", e)),
    };

    let items = hitung_rekap(mahasiswa, &sesi_dimulai, &records);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RekapResponse {
            mata_kuliah_id: mata_kuliah.id,
            total_sesi: sesi_dimulai.len() as i64,
            items,
        },
        "Attendance summary retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta};

    fn sesi(id: i64, mulai: DateTime<Utc>) -> SesiPresensi {
        SesiPresensi {
            id,
            mata_kuliah_id: 1,
            pertemuan_ke: id as i32,
            topik: None,
            kode: "ABC123".into(),
            waktu_mulai: mulai,
            waktu_selesai: mulai + TimeDelta::minutes(15),
            dibuat_oleh: 2,
            created_at: mulai,
        }
    }

    fn record(sesi_id: i64, mahasiswa_id: i64, status: StatusPresensi) -> Presensi {
        let now = Utc::now();
        Presensi {
            id: sesi_id * 100 + mahasiswa_id,
            sesi_id,
            mahasiswa_id,
            status,
            waktu_presensi: now,
            created_at: now,
        }
    }

    fn mahasiswa(id: i64) -> MahasiswaRingkas {
        MahasiswaRingkas {
            id,
            nomor_induk: format!("210100{id}"),
            nama: format!("Mahasiswa {id}"),
            program_studi: None,
        }
    }

    #[test]
    fn test_missing_record_counts_as_alpa() {
        let now = Utc::now();
        let sesi = vec![
            sesi(1, now - TimeDelta::days(14)),
            sesi(2, now - TimeDelta::days(7)),
            sesi(3, now - TimeDelta::hours(1)),
        ];
        let records = vec![
            record(1, 10, StatusPresensi::Hadir),
            record(2, 10, StatusPresensi::Sakit),
            record(1, 11, StatusPresensi::Hadir),
            record(2, 11, StatusPresensi::Hadir),
            record(3, 11, StatusPresensi::Izin),
        ];

        let rekap = hitung_rekap(vec![mahasiswa(10), mahasiswa(11)], &sesi, &records);

        assert_eq!(rekap[0].hadir, 1);
        assert_eq!(rekap[0].sakit, 1);
        assert_eq!(rekap[0].alpa, 1);
        assert_eq!(rekap[0].persentase_kehadiran, 33.33);
        assert_eq!(rekap[1].hadir, 2);
        assert_eq!(rekap[1].izin, 1);
        assert_eq!(rekap[1].alpa, 0);
        assert_eq!(rekap[1].persentase_kehadiran, 66.67);
    }

    #[test]
    fn test_no_sessions_means_zero_percent() {
        let rekap = hitung_rekap(vec![mahasiswa(10)], &[], &[]);
        assert_eq!(rekap[0].total_sesi, 0);
        assert_eq!(rekap[0].persentase_kehadiran, 0.0);
    }
}
