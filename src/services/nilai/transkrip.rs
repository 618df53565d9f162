use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::khs::susun_khs;
use super::{NilaiService, target_mahasiswa};
use crate::models::{
    ApiResponse,
    krs::entities::Semester,
    nilai::{entities::NilaiMataKuliah, requests::TranskripParams, responses::TranskripResponse},
};
use crate::services::access::{current_user, storage_error};
use crate::utils::akademik::indeks_prestasi;

/// 按学期分组（学年、学期升序），IPK 覆盖全部成绩
pub(crate) fn susun_transkrip(
    mahasiswa_id: i64,
    items: Vec<NilaiMataKuliah>,
) -> TranskripResponse {
    let total_sks = items.iter().map(|i| i.mata_kuliah.sks).sum();
    let ipk = indeks_prestasi(items.iter().map(|i| (i.nilai.bobot, i.mata_kuliah.sks)));

    let mut per_semester: BTreeMap<Semester, Vec<NilaiMataKuliah>> = BTreeMap::new();
    for item in items {
        let semester = Semester {
            tahun_ajaran: item.nilai.tahun_ajaran.clone(),
            periode: item.nilai.periode,
        };
        per_semester.entry(semester).or_default().push(item);
    }

    TranskripResponse {
        mahasiswa_id,
        semester: per_semester
            .into_iter()
            .map(|(semester, items)| susun_khs(mahasiswa_id, semester, items))
            .collect(),
        total_sks,
        ipk,
    }
}

pub async fn get_transkrip(
    service: &NilaiService,
    params: TranskripParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;
    let mahasiswa_id =
        try_or_respond!(target_mahasiswa(&storage, &user, params.mahasiswa_id).await);

    match storage.list_nilai_mahasiswa(mahasiswa_id, None).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            susun_transkrip(mahasiswa_id, items),
            "Transcript retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to retrieve transcript", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        krs::entities::Periode, mata_kuliah::entities::MataKuliah, nilai::entities::Nilai,
    };
    use chrono::Utc;

    fn baris(
        id: i64,
        tahun: &str,
        periode: Periode,
        sks: i32,
        huruf: &str,
        bobot: f64,
    ) -> NilaiMataKuliah {
        let now = Utc::now();
        NilaiMataKuliah {
            nilai: Nilai {
                id,
                mahasiswa_id: 7,
                mata_kuliah_id: id,
                tahun_ajaran: tahun.into(),
                periode,
                nilai_tugas: 80.0,
                nilai_uts: 80.0,
                nilai_uas: 80.0,
                nilai_akhir: 80.0,
                nilai_huruf: huruf.into(),
                bobot,
                dinilai_oleh: Some(2),
                created_at: now,
                updated_at: now,
            },
            mata_kuliah: MataKuliah {
                id,
                kode: format!("IF{id:03}"),
                nama: format!("Mata Kuliah {id}"),
                sks,
                semester: 1,
                dosen_id: 2,
                kuota: 40,
                hari: None,
                jam_mulai: None,
                jam_selesai: None,
                ruangan: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    #[test]
    fn test_transkrip_groups_terms_in_order() {
        let items = vec![
            baris(1, "2024/2025", Periode::Genap, 2, "B", 3.0),
            baris(2, "2024/2025", Periode::Ganjil, 3, "A", 4.0),
            baris(3, "2024/2025", Periode::Ganjil, 3, "C", 2.0),
        ];
        let transkrip = susun_transkrip(7, items);

        assert_eq!(transkrip.semester.len(), 2);
        assert_eq!(transkrip.semester[0].periode, "ganjil");
        assert_eq!(transkrip.semester[0].total_sks, 6);
        assert_eq!(transkrip.semester[0].ips, 3.0);
        assert_eq!(transkrip.semester[1].periode, "genap");
        assert_eq!(transkrip.total_sks, 8);
        // (12 + 6 + 6) / 8
        assert_eq!(transkrip.ipk, 3.0);
    }

    #[test]
    fn test_empty_transkrip() {
        let transkrip = susun_transkrip(7, Vec::new());
        assert!(transkrip.semester.is_empty());
        assert_eq!(transkrip.total_sks, 0);
        assert_eq!(transkrip.ipk, 0.0);
    }
}
