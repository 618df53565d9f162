//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod krs;
mod mata_kuliah;
mod nilai;
mod presensi;
mod tugas;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SiakadError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database.url, config.database.pool_size).await
    }

    /// 连接指定数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32) -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, config.database.timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, config.database.timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SiakadError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SiakadError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(None)
            .connect_with(opt)
            .await
            .map_err(|e| SiakadError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SiakadError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SiakadError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{
    krs::{
        entities::{Krs, KrsDetail, KrsStatus, Periode},
        responses::PengajuanListResponse,
    },
    mata_kuliah::{
        entities::MataKuliah,
        requests::{CreateMataKuliahRequest, MataKuliahListQuery, UpdateMataKuliahRequest},
        responses::{MataKuliahListResponse, PesertaItem},
    },
    nilai::entities::{Nilai, NilaiMahasiswa, NilaiMataKuliah, SimpanNilai},
    presensi::entities::{Presensi, PresensiDetail, SesiPresensi, StatusPresensi},
    tugas::{
        entities::{Pengumpulan, PengumpulanDetail, Tugas},
        requests::{CreateTugasRequest, UpdateTugasRequest},
    },
    users::{
        entities::{MahasiswaRingkas, User},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::{NewPengumpulan, NewSesi, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_nomor_induk(&self, nomor_induk: &str) -> Result<Option<User>> {
        self.get_user_by_nomor_induk_impl(nomor_induk).await
    }

    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_identifier_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 课程模块
    async fn create_mata_kuliah(&self, req: CreateMataKuliahRequest) -> Result<MataKuliah> {
        self.create_mata_kuliah_impl(req).await
    }

    async fn get_mata_kuliah_by_id(&self, id: i64) -> Result<Option<MataKuliah>> {
        self.get_mata_kuliah_by_id_impl(id).await
    }

    async fn get_mata_kuliah_by_ids(&self, ids: &[i64]) -> Result<Vec<MataKuliah>> {
        self.get_mata_kuliah_by_ids_impl(ids).await
    }

    async fn get_mata_kuliah_by_kode(&self, kode: &str) -> Result<Option<MataKuliah>> {
        self.get_mata_kuliah_by_kode_impl(kode).await
    }

    async fn list_mata_kuliah_with_pagination(
        &self,
        query: MataKuliahListQuery,
    ) -> Result<MataKuliahListResponse> {
        self.list_mata_kuliah_with_pagination_impl(query).await
    }

    async fn list_mata_kuliah_by_dosen(&self, dosen_id: i64) -> Result<Vec<MataKuliah>> {
        self.list_mata_kuliah_by_dosen_impl(dosen_id).await
    }

    async fn update_mata_kuliah(
        &self,
        id: i64,
        update: UpdateMataKuliahRequest,
    ) -> Result<Option<MataKuliah>> {
        self.update_mata_kuliah_impl(id, update).await
    }

    async fn delete_mata_kuliah(&self, id: i64) -> Result<bool> {
        self.delete_mata_kuliah_impl(id).await
    }

    // 选课模块
    async fn list_krs_mahasiswa(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<KrsDetail>> {
        self.list_krs_mahasiswa_impl(mahasiswa_id, tahun_ajaran, periode)
            .await
    }

    async fn get_krs_by_id(&self, id: i64) -> Result<Option<Krs>> {
        self.get_krs_by_id_impl(id).await
    }

    async fn count_krs_aktif_by_mata_kuliah(
        &self,
        mata_kuliah_ids: &[i64],
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<HashMap<i64, i64>> {
        self.count_krs_aktif_by_mata_kuliah_impl(mata_kuliah_ids, tahun_ajaran, periode)
            .await
    }

    async fn create_krs_batch(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
        mata_kuliah_ids: &[i64],
    ) -> Result<Vec<Krs>> {
        self.create_krs_batch_impl(mahasiswa_id, tahun_ajaran, periode, mata_kuliah_ids)
            .await
    }

    async fn delete_krs(&self, id: i64) -> Result<bool> {
        self.delete_krs_impl(id).await
    }

    async fn update_krs_status(
        &self,
        id: i64,
        status: KrsStatus,
        catatan: Option<String>,
    ) -> Result<Option<Krs>> {
        self.update_krs_status_impl(id, status, catatan).await
    }

    async fn list_pengajuan_krs(
        &self,
        dosen_id: Option<i64>,
        mata_kuliah_id: Option<i64>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PengajuanListResponse> {
        self.list_pengajuan_krs_impl(dosen_id, mata_kuliah_id, page, size)
            .await
    }

    async fn list_peserta(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<PesertaItem>> {
        self.list_peserta_impl(mata_kuliah_id, tahun_ajaran, periode)
            .await
    }

    async fn list_mahasiswa_terdaftar(&self, mata_kuliah_id: i64) -> Result<Vec<MahasiswaRingkas>> {
        self.list_mahasiswa_terdaftar_impl(mata_kuliah_id).await
    }

    async fn is_mahasiswa_terdaftar(&self, mahasiswa_id: i64, mata_kuliah_id: i64) -> Result<bool> {
        self.is_mahasiswa_terdaftar_impl(mahasiswa_id, mata_kuliah_id)
            .await
    }

    async fn get_krs_disetujui(
        &self,
        mahasiswa_id: i64,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Option<Krs>> {
        self.get_krs_disetujui_impl(mahasiswa_id, mata_kuliah_id, tahun_ajaran, periode)
            .await
    }

    // 考勤模块
    async fn create_sesi(&self, sesi: NewSesi) -> Result<SesiPresensi> {
        self.create_sesi_impl(sesi).await
    }

    async fn get_sesi_by_id(&self, id: i64) -> Result<Option<SesiPresensi>> {
        self.get_sesi_by_id_impl(id).await
    }

    async fn list_sesi_by_mata_kuliah(&self, mata_kuliah_id: i64) -> Result<Vec<SesiPresensi>> {
        self.list_sesi_by_mata_kuliah_impl(mata_kuliah_id).await
    }

    async fn list_presensi_by_sesi(&self, sesi_id: i64) -> Result<Vec<PresensiDetail>> {
        self.list_presensi_by_sesi_impl(sesi_id).await
    }

    async fn list_presensi_by_mata_kuliah(
        &self,
        mata_kuliah_id: i64,
        mahasiswa_id: Option<i64>,
    ) -> Result<Vec<Presensi>> {
        self.list_presensi_by_mata_kuliah_impl(mata_kuliah_id, mahasiswa_id)
            .await
    }

    async fn create_presensi(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
        waktu: DateTime<Utc>,
    ) -> Result<Presensi> {
        self.create_presensi_impl(sesi_id, mahasiswa_id, status, waktu)
            .await
    }

    async fn upsert_presensi(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
    ) -> Result<Presensi> {
        self.upsert_presensi_impl(sesi_id, mahasiswa_id, status)
            .await
    }

    // 作业模块
    async fn create_tugas(&self, dibuat_oleh: i64, req: CreateTugasRequest) -> Result<Tugas> {
        self.create_tugas_impl(dibuat_oleh, req).await
    }

    async fn get_tugas_by_id(&self, id: i64) -> Result<Option<Tugas>> {
        self.get_tugas_by_id_impl(id).await
    }

    async fn list_tugas_by_mata_kuliah(&self, mata_kuliah_id: i64) -> Result<Vec<Tugas>> {
        self.list_tugas_by_mata_kuliah_impl(mata_kuliah_id).await
    }

    async fn update_tugas(&self, id: i64, update: UpdateTugasRequest) -> Result<Option<Tugas>> {
        self.update_tugas_impl(id, update).await
    }

    async fn delete_tugas(&self, id: i64) -> Result<bool> {
        self.delete_tugas_impl(id).await
    }

    async fn count_pengumpulan_by_tugas(&self, tugas_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        self.count_pengumpulan_by_tugas_impl(tugas_ids).await
    }

    async fn list_pengumpulan_mahasiswa(
        &self,
        mahasiswa_id: i64,
        tugas_ids: &[i64],
    ) -> Result<Vec<Pengumpulan>> {
        self.list_pengumpulan_mahasiswa_impl(mahasiswa_id, tugas_ids)
            .await
    }

    async fn get_pengumpulan_by_id(&self, id: i64) -> Result<Option<Pengumpulan>> {
        self.get_pengumpulan_by_id_impl(id).await
    }

    async fn get_pengumpulan(
        &self,
        tugas_id: i64,
        mahasiswa_id: i64,
    ) -> Result<Option<Pengumpulan>> {
        self.get_pengumpulan_impl(tugas_id, mahasiswa_id).await
    }

    async fn simpan_pengumpulan(&self, req: NewPengumpulan) -> Result<Pengumpulan> {
        self.simpan_pengumpulan_impl(req).await
    }

    async fn list_pengumpulan_by_tugas(&self, tugas_id: i64) -> Result<Vec<PengumpulanDetail>> {
        self.list_pengumpulan_by_tugas_impl(tugas_id).await
    }

    async fn nilai_pengumpulan(
        &self,
        id: i64,
        nilai: f64,
        komentar: Option<String>,
        dinilai_oleh: i64,
    ) -> Result<Option<Pengumpulan>> {
        self.nilai_pengumpulan_impl(id, nilai, komentar, dinilai_oleh)
            .await
    }

    // 成绩模块
    async fn simpan_nilai(&self, nilai: SimpanNilai) -> Result<Nilai> {
        self.simpan_nilai_impl(nilai).await
    }

    async fn list_nilai_by_mata_kuliah(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<NilaiMahasiswa>> {
        self.list_nilai_by_mata_kuliah_impl(mata_kuliah_id, tahun_ajaran, periode)
            .await
    }

    async fn list_nilai_mahasiswa(
        &self,
        mahasiswa_id: i64,
        semester: Option<(&str, Periode)>,
    ) -> Result<Vec<NilaiMataKuliah>> {
        self.list_nilai_mahasiswa_impl(mahasiswa_id, semester).await
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SiakadError::db("数据库连通性检查失败", e))
    }
}
