//! 考勤记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "presensi")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub sesi_id: i64,
    pub mahasiswa_id: i64,
    pub status: String,
    pub waktu_presensi: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sesi_presensi::Entity",
        from = "Column::SesiId",
        to = "super::sesi_presensi::Column::Id"
    )]
    Sesi,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MahasiswaId",
        to = "super::users::Column::Id"
    )]
    Mahasiswa,
}

impl Related<super::sesi_presensi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sesi.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mahasiswa.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_presensi(self) -> crate::models::presensi::entities::Presensi {
        use crate::models::presensi::entities::{Presensi, StatusPresensi};

        Presensi {
            id: self.id,
            sesi_id: self.sesi_id,
            mahasiswa_id: self.mahasiswa_id,
            status: self
                .status
                .parse::<StatusPresensi>()
                .unwrap_or(StatusPresensi::Alpa),
            waktu_presensi: super::to_datetime(self.waktu_presensi),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
