use std::collections::HashMap;
use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 新考勤场次
#[derive(Debug, Clone)]
pub struct NewSesi {
    pub mata_kuliah_id: i64,
    pub pertemuan_ke: i32,
    pub topik: Option<String>,
    pub kode: String,
    pub waktu_mulai: DateTime<Utc>,
    pub waktu_selesai: DateTime<Utc>,
    pub dibuat_oleh: i64,
}

/// 学生提交内容
#[derive(Debug, Clone)]
pub struct NewPengumpulan {
    pub tugas_id: i64,
    pub mahasiswa_id: i64,
    pub konten: Option<String>,
    pub lampiran_url: Option<String>,
    pub terlambat: bool,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须为哈希值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过学号/工号获取用户信息
    async fn get_user_by_nomor_induk(&self, nomor_induk: &str) -> Result<Option<User>>;
    // 通过邮箱或学号/工号获取用户信息
    async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_mata_kuliah(&self, req: CreateMataKuliahRequest) -> Result<MataKuliah>;
    async fn get_mata_kuliah_by_id(&self, id: i64) -> Result<Option<MataKuliah>>;
    async fn get_mata_kuliah_by_ids(&self, ids: &[i64]) -> Result<Vec<MataKuliah>>;
    async fn get_mata_kuliah_by_kode(&self, kode: &str) -> Result<Option<MataKuliah>>;
    async fn list_mata_kuliah_with_pagination(
        &self,
        query: MataKuliahListQuery,
    ) -> Result<MataKuliahListResponse>;
    // 教师讲授的课程
    async fn list_mata_kuliah_by_dosen(&self, dosen_id: i64) -> Result<Vec<MataKuliah>>;
    async fn update_mata_kuliah(
        &self,
        id: i64,
        update: UpdateMataKuliahRequest,
    ) -> Result<Option<MataKuliah>>;
    async fn delete_mata_kuliah(&self, id: i64) -> Result<bool>;

    /// 选课方法
    // 学生某学期的选课（附课程信息）
    async fn list_krs_mahasiswa(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<KrsDetail>>;
    async fn get_krs_by_id(&self, id: i64) -> Result<Option<Krs>>;
    // 各课程某学期未被驳回的选课人数
    async fn count_krs_aktif_by_mata_kuliah(
        &self,
        mata_kuliah_ids: &[i64],
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<HashMap<i64, i64>>;
    // 在同一事务中批量创建选课记录
    async fn create_krs_batch(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
        mata_kuliah_ids: &[i64],
    ) -> Result<Vec<Krs>>;
    async fn delete_krs(&self, id: i64) -> Result<bool>;
    async fn update_krs_status(
        &self,
        id: i64,
        status: KrsStatus,
        catatan: Option<String>,
    ) -> Result<Option<Krs>>;
    // 待审核选课，dosen_id 为 None 时列出全部
    async fn list_pengajuan_krs(
        &self,
        dosen_id: Option<i64>,
        mata_kuliah_id: Option<i64>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PengajuanListResponse>;
    // 课程某学期已批准的学生
    async fn list_peserta(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<PesertaItem>>;
    // 课程所有已批准的学生（跨学期去重）
    async fn list_mahasiswa_terdaftar(&self, mata_kuliah_id: i64) -> Result<Vec<MahasiswaRingkas>>;
    // 学生是否持有该课程已批准的选课
    async fn is_mahasiswa_terdaftar(&self, mahasiswa_id: i64, mata_kuliah_id: i64) -> Result<bool>;
    // 指定学期已批准的选课
    async fn get_krs_disetujui(
        &self,
        mahasiswa_id: i64,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Option<Krs>>;

    /// 考勤方法
    async fn create_sesi(&self, sesi: NewSesi) -> Result<SesiPresensi>;
    async fn get_sesi_by_id(&self, id: i64) -> Result<Option<SesiPresensi>>;
    async fn list_sesi_by_mata_kuliah(&self, mata_kuliah_id: i64) -> Result<Vec<SesiPresensi>>;
    async fn list_presensi_by_sesi(&self, sesi_id: i64) -> Result<Vec<PresensiDetail>>;
    // 课程下的考勤记录，可按学生过滤
    async fn list_presensi_by_mata_kuliah(
        &self,
        mata_kuliah_id: i64,
        mahasiswa_id: Option<i64>,
    ) -> Result<Vec<Presensi>>;
    // 学生签到（已存在时返回 Conflict）
    async fn create_presensi(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
        waktu: DateTime<Utc>,
    ) -> Result<Presensi>;
    // 教师录入（存在则更新）
    async fn upsert_presensi(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
    ) -> Result<Presensi>;

    /// 作业方法
    async fn create_tugas(&self, dibuat_oleh: i64, req: CreateTugasRequest) -> Result<Tugas>;
    async fn get_tugas_by_id(&self, id: i64) -> Result<Option<Tugas>>;
    async fn list_tugas_by_mata_kuliah(&self, mata_kuliah_id: i64) -> Result<Vec<Tugas>>;
    async fn update_tugas(&self, id: i64, update: UpdateTugasRequest) -> Result<Option<Tugas>>;
    async fn delete_tugas(&self, id: i64) -> Result<bool>;
    // 各作业的提交数
    async fn count_pengumpulan_by_tugas(&self, tugas_ids: &[i64]) -> Result<HashMap<i64, i64>>;
    // 学生在这些作业下的提交
    async fn list_pengumpulan_mahasiswa(
        &self,
        mahasiswa_id: i64,
        tugas_ids: &[i64],
    ) -> Result<Vec<Pengumpulan>>;
    async fn get_pengumpulan_by_id(&self, id: i64) -> Result<Option<Pengumpulan>>;
    async fn get_pengumpulan(&self, tugas_id: i64, mahasiswa_id: i64)
    -> Result<Option<Pengumpulan>>;
    // 提交或覆盖提交（清除已有评分）
    async fn simpan_pengumpulan(&self, req: NewPengumpulan) -> Result<Pengumpulan>;
    async fn list_pengumpulan_by_tugas(&self, tugas_id: i64) -> Result<Vec<PengumpulanDetail>>;
    async fn nilai_pengumpulan(
        &self,
        id: i64,
        nilai: f64,
        komentar: Option<String>,
        dinilai_oleh: i64,
    ) -> Result<Option<Pengumpulan>>;

    /// 成绩方法
    // 录入成绩（存在则更新）
    async fn simpan_nilai(&self, nilai: SimpanNilai) -> Result<Nilai>;
    async fn list_nilai_by_mata_kuliah(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<NilaiMahasiswa>>;
    // 学生成绩，semester 为 None 时返回全部学期
    async fn list_nilai_mahasiswa(
        &self,
        mahasiswa_id: i64,
        semester: Option<(&str, Periode)>,
    ) -> Result<Vec<NilaiMataKuliah>>;

    /// 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
