//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tugas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mata_kuliah_id: i64,
    pub judul: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub deskripsi: Option<String>,
    pub tenggat: i64,
    pub nilai_maksimal: f64,
    pub izinkan_terlambat: bool,
    pub dibuat_oleh: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mata_kuliah::Entity",
        from = "Column::MataKuliahId",
        to = "super::mata_kuliah::Column::Id"
    )]
    MataKuliah,
    #[sea_orm(has_many = "super::pengumpulan::Entity")]
    Pengumpulan,
}

impl Related<super::mata_kuliah::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MataKuliah.def()
    }
}

impl Related<super::pengumpulan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pengumpulan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_tugas(self) -> crate::models::tugas::entities::Tugas {
        crate::models::tugas::entities::Tugas {
            id: self.id,
            mata_kuliah_id: self.mata_kuliah_id,
            judul: self.judul,
            deskripsi: self.deskripsi,
            tenggat: super::to_datetime(self.tenggat),
            nilai_maksimal: self.nilai_maksimal,
            izinkan_terlambat: self.izinkan_terlambat,
            dibuat_oleh: self.dibuat_oleh,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
