//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "mata_kuliah")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub kode: String,
    pub nama: String,
    pub sks: i32,
    pub semester: i32,
    pub dosen_id: i64,
    pub kuota: i32,
    pub hari: Option<String>,
    pub jam_mulai: Option<String>,
    pub jam_selesai: Option<String>,
    pub ruangan: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::DosenId",
        to = "super::users::Column::Id"
    )]
    Dosen,
    #[sea_orm(has_many = "super::krs::Entity")]
    Krs,
    #[sea_orm(has_many = "super::sesi_presensi::Entity")]
    SesiPresensi,
    #[sea_orm(has_many = "super::tugas::Entity")]
    Tugas,
    #[sea_orm(has_many = "super::nilai::Entity")]
    Nilai,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dosen.def()
    }
}

impl Related<super::krs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Krs.def()
    }
}

impl Related<super::sesi_presensi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SesiPresensi.def()
    }
}

impl Related<super::tugas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tugas.def()
    }
}

impl Related<super::nilai::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nilai.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mata_kuliah(self) -> crate::models::mata_kuliah::entities::MataKuliah {
        crate::models::mata_kuliah::entities::MataKuliah {
            id: self.id,
            kode: self.kode,
            nama: self.nama,
            sks: self.sks,
            semester: self.semester,
            dosen_id: self.dosen_id,
            kuota: self.kuota,
            hari: self.hari,
            jam_mulai: self.jam_mulai,
            jam_selesai: self.jam_selesai,
            ruangan: self.ruangan,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
