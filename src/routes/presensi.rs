use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::presensi::requests::{
    BukaSesiRequest, HadirRequest, MataKuliahQuery, SetPresensiRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PresensiService;
use crate::utils::{SafeIDI64, SafeMahasiswaIdI64};

// 懒加载的全局 PresensiService 实例
static PRESENSI_SERVICE: Lazy<PresensiService> = Lazy::new(PresensiService::new_lazy);

pub async fn buka_sesi(
    req: HttpRequest,
    body: web::Json<BukaSesiRequest>,
) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE.buka_sesi(body.into_inner(), &req).await
}

pub async fn list_sesi(
    req: HttpRequest,
    query: web::Query<MataKuliahQuery>,
) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE.list_sesi(query.into_inner(), &req).await
}

pub async fn get_sesi(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE.get_sesi(path.0, &req).await
}

pub async fn hadir(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<HadirRequest>,
) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE
        .hadir(path.0, body.into_inner(), &req)
        .await
}

pub async fn set_status(
    req: HttpRequest,
    sesi_id: SafeIDI64,
    mahasiswa_id: SafeMahasiswaIdI64,
    body: web::Json<SetPresensiRequest>,
) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE
        .set_status(sesi_id.0, mahasiswa_id.0, body.into_inner(), &req)
        .await
}

pub async fn rekap(
    req: HttpRequest,
    query: web::Query<MataKuliahQuery>,
) -> ActixResult<HttpResponse> {
    PRESENSI_SERVICE.rekap(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_presensi_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/presensi")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/sesi")
                    // 课程成员校验在业务层
                    .route(web::get().to(list_sesi))
                    .route(
                        web::post()
                            .to(buka_sesi)
                            .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
                    ),
            )
            .service(
                web::resource("/sesi/{id}")
                    .route(web::get().to(get_sesi))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            )
            .service(
                web::resource("/sesi/{id}/hadir")
                    .route(web::post().to(hadir))
                    .wrap(middlewares::RequireRole::new_any(UserRole::mahasiswa_roles()))
                    .wrap(RateLimit::presensi()),
            )
            .service(
                web::resource("/sesi/{id}/mahasiswa/{mahasiswa_id}")
                    .route(web::put().to(set_status))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            )
            .service(web::resource("/rekap").route(web::get().to(rekap))),
    );
}
