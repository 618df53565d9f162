//! 课程成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "nilai")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub mahasiswa_id: i64,
    pub mata_kuliah_id: i64,
    pub tahun_ajaran: String,
    pub periode: String,
    pub nilai_tugas: f64,
    pub nilai_uts: f64,
    pub nilai_uas: f64,
    pub nilai_akhir: f64,
    pub nilai_huruf: String,
    pub bobot: f64,
    pub dinilai_oleh: Option<i64>,
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
    pub fn into_nilai(self) -> crate::models::nilai::entities::Nilai {
        use crate::models::krs::entities::Periode;

        crate::models::nilai::entities::Nilai {
            id: self.id,
            mahasiswa_id: self.mahasiswa_id,
            mata_kuliah_id: self.mata_kuliah_id,
            tahun_ajaran: self.tahun_ajaran,
            periode: self.periode.parse::<Periode>().unwrap_or(Periode::Ganjil),
            nilai_tugas: self.nilai_tugas,
            nilai_uts: self.nilai_uts,
            nilai_akhir: self.nilai_akhir,
            nilai_uas: self.nilai_uas,
            nilai_huruf: self.nilai_huruf,
            bobot: self.bobot,
            dinilai_oleh: self.dinilai_oleh,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
