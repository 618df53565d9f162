use serde::Serialize;

use super::entities::{PengumpulanDetail, TugasItem};

#[derive(Debug, Serialize)]
pub struct TugasListResponse {
    pub items: Vec<TugasItem>,
}

#[derive(Debug, Serialize)]
pub struct PengumpulanListResponse {
    pub tugas_id: i64,
    pub items: Vec<PengumpulanDetail>,
}
