/// 辅助函数返回 `Result<T, HttpResponse>` 时，出错直接把响应返回给客户端
macro_rules! try_or_respond {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}

pub(crate) mod access;
pub mod auth;
pub mod krs;
pub mod mata_kuliah;
pub mod nilai;
pub mod presensi;
pub mod system;
pub mod tugas;
pub mod users;

pub use auth::AuthService;
pub use krs::KrsService;
pub use mata_kuliah::MataKuliahService;
pub use nilai::NilaiService;
pub use presensi::PresensiService;
pub use system::SystemService;
pub use tugas::TugasService;
pub use users::UserService;
