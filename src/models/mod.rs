pub mod auth;
pub mod common;
pub mod krs;
pub mod mata_kuliah;
pub mod nilai;
pub mod presensi;
pub mod system;
pub mod tugas;
pub mod users;

pub use common::{ApiResponse, ErrorCode, PaginationInfo, normalize_page};
pub use system::entities::AppStartTime;
