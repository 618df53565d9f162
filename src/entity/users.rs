//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub nomor_induk: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub nama: String,
    pub program_studi: Option<String>,
    pub angkatan: Option<i32>,
    pub no_hp: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mata_kuliah::Entity")]
    MataKuliah,
    #[sea_orm(has_many = "super::krs::Entity")]
    Krs,
    #[sea_orm(has_many = "super::presensi::Entity")]
    Presensi,
    #[sea_orm(has_many = "super::pengumpulan::Entity")]
    Pengumpulan,
    #[sea_orm(has_many = "super::nilai::Entity")]
    Nilai,
}

impl Related<super::mata_kuliah::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MataKuliah.def()
    }
}

impl Related<super::krs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Krs.def()
    }
}

impl Related<super::presensi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Presensi.def()
    }
}

impl Related<super::pengumpulan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pengumpulan.def()
    }
}

impl Related<super::nilai::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Nilai.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        User {
            id: self.id,
            email: self.email,
            nomor_induk: self.nomor_induk,
            password_hash: self.password_hash,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Mahasiswa),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Nonaktif),
            nama: self.nama,
            program_studi: self.program_studi,
            angkatan: self.angkatan,
            no_hp: self.no_hp,
            avatar_url: self.avatar_url,
            last_login: self.last_login.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn into_ringkas(self) -> crate::models::users::entities::MahasiswaRingkas {
        crate::models::users::entities::MahasiswaRingkas {
            id: self.id,
            nomor_induk: self.nomor_induk,
            nama: self.nama,
            program_studi: self.program_studi,
        }
    }
}
