use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::mata_kuliah::requests::{
    CreateMataKuliahRequest, MataKuliahListParams, PesertaQuery, UpdateMataKuliahRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MataKuliahService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MataKuliahService 实例
static MATA_KULIAH_SERVICE: Lazy<MataKuliahService> = Lazy::new(MataKuliahService::new_lazy);

pub async fn list_mata_kuliah(
    req: HttpRequest,
    query: web::Query<MataKuliahListParams>,
) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE
        .list_mata_kuliah(query.into_inner(), &req)
        .await
}

pub async fn create_mata_kuliah(
    req: HttpRequest,
    body: web::Json<CreateMataKuliahRequest>,
) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE
        .create_mata_kuliah(body.into_inner(), &req)
        .await
}

pub async fn get_mata_kuliah(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE.get_mata_kuliah(path.0, &req).await
}

pub async fn update_mata_kuliah(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateMataKuliahRequest>,
) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE
        .update_mata_kuliah(path.0, body.into_inner(), &req)
        .await
}

pub async fn delete_mata_kuliah(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE.delete_mata_kuliah(path.0, &req).await
}

// 课程某学期的学生名单
pub async fn list_peserta(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<PesertaQuery>,
) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE
        .list_peserta(path.0, query.into_inner(), &req)
        .await
}

pub async fn list_diampu(req: HttpRequest) -> ActixResult<HttpResponse> {
    MATA_KULIAH_SERVICE.list_diampu(&req).await
}

// 配置路由
pub fn configure_mata_kuliah_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/mata-kuliah")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 所有登录用户可浏览课程
                    .route(web::get().to(list_mata_kuliah))
                    .route(
                        web::post()
                            .to(create_mata_kuliah)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 须在 /{id} 之前注册
            .service(
                web::resource("/diampu")
                    .route(web::get().to(list_diampu))
                    .wrap(middlewares::RequireRole::new(&UserRole::Dosen)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_mata_kuliah))
                    .route(
                        web::put()
                            .to(update_mata_kuliah)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_mata_kuliah)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/mahasiswa")
                    // 授课教师校验在业务层
                    .route(web::get().to(list_peserta))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            ),
    );
}
