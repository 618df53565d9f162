use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::krs::requests::{
    AjukanKrsRequest, PengajuanListParams, SemesterQuery, UpdateKrsStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::KrsService;
use crate::utils::SafeIDI64;

// 懒加载的全局 KrsService 实例
static KRS_SERVICE: Lazy<KrsService> = Lazy::new(KrsService::new_lazy);

pub async fn list_krs(
    req: HttpRequest,
    query: web::Query<SemesterQuery>,
) -> ActixResult<HttpResponse> {
    KRS_SERVICE.list_krs(query.into_inner(), &req).await
}

pub async fn ajukan_krs(
    req: HttpRequest,
    body: web::Json<AjukanKrsRequest>,
) -> ActixResult<HttpResponse> {
    KRS_SERVICE.ajukan_krs(body.into_inner(), &req).await
}

pub async fn batal_krs(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    KRS_SERVICE.batal_krs(path.0, &req).await
}

pub async fn list_pengajuan(
    req: HttpRequest,
    query: web::Query<PengajuanListParams>,
) -> ActixResult<HttpResponse> {
    KRS_SERVICE.list_pengajuan(query.into_inner(), &req).await
}

pub async fn update_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateKrsStatusRequest>,
) -> ActixResult<HttpResponse> {
    KRS_SERVICE
        .update_status(path.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_krs_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/krs")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_krs))
                    .route(web::post().to(ajukan_krs))
                    .wrap(middlewares::RequireRole::new_any(UserRole::mahasiswa_roles())),
            )
            .service(
                web::resource("/pengajuan")
                    .route(web::get().to(list_pengajuan))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            )
            .service(
                web::resource("/{id}")
                    .route(web::delete().to(batal_krs))
                    .wrap(middlewares::RequireRole::new_any(UserRole::mahasiswa_roles())),
            )
            .service(
                web::resource("/{id}/status")
                    // 授课教师校验在业务层
                    .route(web::put().to(update_status))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            ),
    );
}
