//! 考勤场次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sesi_presensi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mata_kuliah_id: i64,
    pub pertemuan_ke: i32,
    pub topik: Option<String>,
    pub kode: String,
    pub waktu_mulai: i64,
    pub waktu_selesai: i64,
    pub dibuat_oleh: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mata_kuliah::Entity",
        from = "Column::MataKuliahId",
        to = "super::mata_kuliah::Column::Id"
    )]
    MataKuliah,
    #[sea_orm(has_many = "super::presensi::Entity")]
    Presensi,
}

impl Related<super::mata_kuliah::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MataKuliah.def()
    }
}

impl Related<super::presensi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Presensi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_sesi(self) -> crate::models::presensi::entities::SesiPresensi {
        crate::models::presensi::entities::SesiPresensi {
            id: self.id,
            mata_kuliah_id: self.mata_kuliah_id,
            pertemuan_ke: self.pertemuan_ke,
            topik: self.topik,
            kode: self.kode,
            waktu_mulai: super::to_datetime(self.waktu_mulai),
            waktu_selesai: super::to_datetime(self.waktu_selesai),
            dibuat_oleh: self.dibuat_oleh,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
