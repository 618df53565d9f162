use serde::{Deserialize, Serialize};

use crate::models::common::string_enum::define_string_enum;

define_string_enum! {
    /// 用户角色
    UserRole {
        Mahasiswa => "mahasiswa", // 学生
        Dosen => "dosen",         // 教师
        Admin => "admin",         // 教务管理员
    }
}

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn dosen_roles() -> &'static [&'static UserRole] {
        &[&Self::Dosen, &Self::Admin]
    }
    pub fn mahasiswa_roles() -> &'static [&'static UserRole] {
        &[&Self::Mahasiswa]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Mahasiswa, &Self::Dosen, &Self::Admin]
    }
}

define_string_enum! {
    /// 用户状态
    UserStatus {
        Aktif => "aktif",       // 在读/在职
        Nonaktif => "nonaktif", // 停用
        Cuti => "cuti",         // 休学
    }
}

// 用户实体（包含个人资料字段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// NIM（学生）或 NIP（教师）
    pub nomor_induk: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub nama: String,
    pub program_studi: Option<String>,
    pub angkatan: Option<i32>,
    pub no_hp: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }

    pub fn ringkas(&self) -> MahasiswaRingkas {
        MahasiswaRingkas {
            id: self.id,
            nomor_induk: self.nomor_induk.clone(),
            nama: self.nama.clone(),
            program_studi: self.program_studi.clone(),
        }
    }
}

/// 列表中嵌入的用户摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MahasiswaRingkas {
    pub id: i64,
    pub nomor_induk: String,
    pub nama: String,
    pub program_studi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        assert!(UserRole::dosen_roles().contains(&&UserRole::Admin));
        assert!(!UserRole::dosen_roles().contains(&&UserRole::Mahasiswa));
        assert_eq!(UserRole::all_roles().len(), UserRole::ALL.len());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("dosen".parse::<UserRole>(), Ok(UserRole::Dosen));
        assert!("guru".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            email: "budi@kampus.ac.id".into(),
            nomor_induk: "2101001".into(),
            password_hash: "secret-hash".into(),
            role: UserRole::Mahasiswa,
            status: UserStatus::Aktif,
            nama: "Budi".into(),
            program_studi: None,
            angkatan: Some(2021),
            no_hp: None,
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"mahasiswa\""));
    }
}
