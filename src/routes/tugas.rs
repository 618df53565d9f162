use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::tugas::requests::{
    CreateTugasRequest, KumpulkanRequest, NilaiPengumpulanRequest, TugasListParams,
    UpdateTugasRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TugasService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TugasService 实例
static TUGAS_SERVICE: Lazy<TugasService> = Lazy::new(TugasService::new_lazy);

// 列出课程作业
pub async fn list_tugas(
    req: HttpRequest,
    query: web::Query<TugasListParams>,
) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.list_tugas(query.into_inner(), &req).await
}

// 创建作业
pub async fn create_tugas(
    req: HttpRequest,
    body: web::Json<CreateTugasRequest>,
) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.create_tugas(body.into_inner(), &req).await
}

// 获取作业详情
pub async fn get_tugas(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.get_tugas(path.0, &req).await
}

// 更新作业
pub async fn update_tugas(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTugasRequest>,
) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE
        .update_tugas(path.0, body.into_inner(), &req)
        .await
}

// 删除作业
pub async fn delete_tugas(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.delete_tugas(path.0, &req).await
}

// 提交作业
pub async fn kumpulkan(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<KumpulkanRequest>,
) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE
        .kumpulkan(path.0, body.into_inner(), &req)
        .await
}

// 作业的全部提交
pub async fn list_pengumpulan(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.list_pengumpulan(path.0, &req).await
}

// 本人的提交
pub async fn pengumpulan_saya(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE.pengumpulan_saya(path.0, &req).await
}

// 批改提交
pub async fn nilai_pengumpulan(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<NilaiPengumpulanRequest>,
) -> ActixResult<HttpResponse> {
    TUGAS_SERVICE
        .nilai_pengumpulan(path.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_tugas_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tugas")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 课程成员（业务层校验）
                    .route(web::get().to(list_tugas))
                    // 创建作业 - 仅授课教师和管理员
                    .route(
                        web::post()
                            .to(create_tugas)
                            .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_tugas))
                    .route(
                        web::put()
                            .to(update_tugas)
                            .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_tugas)
                            .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/pengumpulan")
                    .route(
                        web::get()
                            .to(list_pengumpulan)
                            .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
                    )
                    .route(
                        web::post()
                            .to(kumpulkan)
                            .wrap(middlewares::RequireRole::new_any(UserRole::mahasiswa_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/pengumpulan/saya")
                    .route(web::get().to(pengumpulan_saya))
                    .wrap(middlewares::RequireRole::new_any(UserRole::mahasiswa_roles())),
            ),
    );
}

pub fn configure_pengumpulan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/pengumpulan")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}/nilai")
                    .route(web::put().to(nilai_pengumpulan))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            ),
    );
}
