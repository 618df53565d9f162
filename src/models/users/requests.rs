use super::entities::{UserRole, UserStatus};
use serde::Deserialize;

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize)]
pub struct UserListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 用户创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub nomor_induk: String,
    pub password: String,
    pub role: UserRole,
    pub nama: String,
    pub program_studi: Option<String>,
    pub angkatan: Option<i32>,
    pub no_hp: Option<String>,
}

// 学生自助注册请求（角色固定为 mahasiswa）
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub nomor_induk: String,
    pub password: String,
    pub nama: String,
    pub program_studi: Option<String>,
    pub angkatan: Option<i32>,
    pub no_hp: Option<String>,
}

impl From<RegisterRequest> for CreateUserRequest {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            nomor_induk: req.nomor_induk,
            password: req.password,
            role: UserRole::Mahasiswa,
            nama: req.nama,
            program_studi: req.program_studi,
            angkatan: req.angkatan,
            no_hp: req.no_hp,
        }
    }
}

// 用户更新请求（password 在存储层为已哈希值）
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub nama: Option<String>,
    pub program_studi: Option<String>,
    pub angkatan: Option<i32>,
    pub no_hp: Option<String>,
    pub avatar_url: Option<String>,
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        Self {
            page: params.page,
            size: params.size,
            role: params.role,
            status: params.status,
            search: params.search,
        }
    }
}
