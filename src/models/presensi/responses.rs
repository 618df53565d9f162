use serde::Serialize;

use super::entities::{PresensiDetail, RekapMahasiswa, SesiItem, SesiPresensi};

#[derive(Debug, Serialize)]
pub struct SesiListResponse {
    pub items: Vec<SesiItem>,
}

#[derive(Debug, Serialize)]
pub struct SesiDetailResponse {
    #[serde(flatten)]
    pub sesi: SesiPresensi,
    pub status_sesi: super::entities::StatusSesi,
    pub presensi: Vec<PresensiDetail>,
}

#[derive(Debug, Serialize)]
pub struct RekapResponse {
    pub mata_kuliah_id: i64,
    pub total_sesi: i64,
    pub items: Vec<RekapMahasiswa>,
}
