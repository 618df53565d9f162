pub mod auth;

pub mod profil;

pub mod users;

pub mod mata_kuliah;

pub mod krs;

pub mod presensi;

pub mod tugas;

pub mod nilai;

pub mod system;

pub use auth::configure_auth_routes;
pub use krs::configure_krs_routes;
pub use mata_kuliah::configure_mata_kuliah_routes;
pub use nilai::configure_nilai_routes;
pub use presensi::configure_presensi_routes;
pub use profil::configure_profil_routes;
pub use system::configure_system_routes;
pub use tugas::{configure_pengumpulan_routes, configure_tugas_routes};
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profil_routes)
        .configure(configure_user_routes)
        .configure(configure_mata_kuliah_routes)
        .configure(configure_krs_routes)
        .configure(configure_presensi_routes)
        .configure(configure_tugas_routes)
        .configure(configure_pengumpulan_routes)
        .configure(configure_nilai_routes)
        .configure(configure_system_routes);
}
