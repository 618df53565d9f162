//! 选课记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "krs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub catatan: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::MahasiswaId",
        to = "super::users::Column::Id"
    )]
    Mahasiswa,
    #[sea_orm(
        belongs_to = "super::mata_kuliah::Entity",
        from = "Column::MataKuliahId",
        to = "super::mata_kuliah::Column::Id"
    )]
    MataKuliah,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Mahasiswa.def()
    }
}

impl Related<super::mata_kuliah::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MataKuliah.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_krs(self) -> crate::models::krs::entities::Krs {
        use crate::models::krs::entities::{Krs, KrsStatus, Periode};

        Krs {
            id: self.id,
            mahasiswa_id: self.mahasiswa_id,
            mata_kuliah_id: self.mata_kuliah_id,
            tahun_ajaran: self.tahun_ajaran,
            periode: self.periode.parse::<Periode>().unwrap_or(Periode::Ganjil),
            status: self
                .status
                .parse::<KrsStatus>()
                .unwrap_or(KrsStatus::Diajukan),
            catatan: self.catatan,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
