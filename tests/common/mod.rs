//! 集成测试公共设施：内存 SQLite、测试用户与令牌

#![allow(dead_code)]

use std::sync::Arc;

use siakad_next::cache::ObjectCache;
use siakad_next::cache::object_cache::moka::MokaCacheWrapper;
use siakad_next::models::krs::entities::{KrsStatus, Periode};
use siakad_next::models::mata_kuliah::entities::MataKuliah;
use siakad_next::models::mata_kuliah::requests::CreateMataKuliahRequest;
use siakad_next::models::users::entities::{User, UserRole};
use siakad_next::models::users::requests::CreateUserRequest;
use siakad_next::storage::Storage;
use siakad_next::storage::sea_orm_storage::SeaOrmStorage;
use siakad_next::utils::jwt::JwtUtils;
use siakad_next::utils::password::hash_password;

pub const PASSWORD: &str = "Rahasia2024";
pub const TAHUN_AJARAN: &str = "2024/2025";

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

pub async fn setup() -> TestContext {
    let storage = SeaOrmStorage::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    let cache = MokaCacheWrapper::with_capacity(1_000, 60).expect("cache");
    TestContext {
        storage: Arc::new(storage),
        cache: Arc::new(cache),
    }
}

/// 按测试上下文构建完整应用
#[macro_export]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(
                    actix_web::web::JsonConfig::default()
                        .error_handler(siakad_next::utils::json_error_handler),
                )
                .app_data(
                    actix_web::web::QueryConfig::default()
                        .error_handler(siakad_next::utils::query_error_handler),
                )
                .app_data(actix_web::web::Data::new($ctx.storage.clone()))
                .app_data(actix_web::web::Data::new($ctx.cache.clone()))
                .app_data(actix_web::web::Data::new(
                    siakad_next::models::AppStartTime::now(),
                ))
                .configure(siakad_next::routes::configure_routes),
        )
        .await
    };
}

pub async fn create_user(
    storage: &Arc<dyn Storage>,
    nomor_induk: &str,
    role: UserRole,
    nama: &str,
) -> User {
    storage
        .create_user(CreateUserRequest {
            email: format!("{nomor_induk}@kampus.ac.id"),
            nomor_induk: nomor_induk.to_string(),
            password: hash_password(PASSWORD).expect("hash"),
            role,
            nama: nama.to_string(),
            program_studi: Some("Informatika".to_string()),
            angkatan: None,
            no_hp: None,
        })
        .await
        .expect("create user")
}

pub async fn create_mata_kuliah(
    storage: &Arc<dyn Storage>,
    kode: &str,
    sks: i32,
    dosen_id: i64,
    kuota: i32,
) -> MataKuliah {
    storage
        .create_mata_kuliah(CreateMataKuliahRequest {
            kode: kode.to_string(),
            nama: format!("Mata Kuliah {kode}"),
            sks,
            semester: 1,
            dosen_id,
            kuota,
            hari: None,
            jam_mulai: None,
            jam_selesai: None,
            ruangan: None,
        })
        .await
        .expect("create mata kuliah")
}

/// 直接写入已批准的选课
pub async fn enroll(storage: &Arc<dyn Storage>, mahasiswa_id: i64, mata_kuliah_id: i64) {
    let rows = storage
        .create_krs_batch(mahasiswa_id, TAHUN_AJARAN, Periode::Ganjil, &[mata_kuliah_id])
        .await
        .expect("create krs");
    for krs in rows {
        storage
            .update_krs_status(krs.id, KrsStatus::Disetujui, None)
            .await
            .expect("approve krs");
    }
}

pub fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, user.role.as_str()).expect("token");
    ("Authorization", format!("Bearer {token}"))
}

/// 为每个用例指定独立的客户端 IP，避免共用限流计数
pub fn client_ip(n: u8) -> (&'static str, String) {
    ("X-Forwarded-For", format!("10.0.0.{n}"))
}

pub fn refresh_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .map(|c| c.value().to_string())
}
