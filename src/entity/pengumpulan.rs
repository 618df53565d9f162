//! 作业提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pengumpulan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tugas_id: i64,
    pub mahasiswa_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub konten: Option<String>,
    pub lampiran_url: Option<String>,
    pub terlambat: bool,
    pub nilai: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub komentar: Option<String>,
    pub dinilai_oleh: Option<i64>,
    pub dikumpulkan_pada: i64,
    pub dinilai_pada: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tugas::Entity",
        from = "Column::TugasId",
        to = "super::tugas::Column::Id"
    )]
    Tugas,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MahasiswaId",
        to = "super::users::Column::Id"
    )]
    Mahasiswa,
}

impl Related<super::tugas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tugas.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mahasiswa.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_pengumpulan(self) -> crate::models::tugas::entities::Pengumpulan {
        crate::models::tugas::entities::Pengumpulan {
            id: self.id,
            tugas_id: self.tugas_id,
            mahasiswa_id: self.mahasiswa_id,
            konten: self.konten,
            lampiran_url: self.lampiran_url,
            terlambat: self.terlambat,
            nilai: self.nilai,
            komentar: self.komentar,
            dinilai_oleh: self.dinilai_oleh,
            dikumpulkan_pada: super::to_datetime(self.dikumpulkan_pada),
            dinilai_pada: self.dinilai_pada.map(super::to_datetime),
        }
    }
}
