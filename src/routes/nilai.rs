use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::nilai::requests::{
    InputNilaiRequest, KhsParams, NilaiListParams, TranskripParams,
};
use crate::models::users::entities::UserRole;
use crate::services::NilaiService;

// 懒加载的全局 NilaiService 实例
static NILAI_SERVICE: Lazy<NilaiService> = Lazy::new(NilaiService::new_lazy);

pub async fn input_nilai(
    req: HttpRequest,
    body: web::Json<InputNilaiRequest>,
) -> ActixResult<HttpResponse> {
    NILAI_SERVICE.input_nilai(body.into_inner(), &req).await
}

pub async fn list_nilai(
    req: HttpRequest,
    query: web::Query<NilaiListParams>,
) -> ActixResult<HttpResponse> {
    NILAI_SERVICE.list_nilai(query.into_inner(), &req).await
}

pub async fn khs(req: HttpRequest, query: web::Query<KhsParams>) -> ActixResult<HttpResponse> {
    NILAI_SERVICE.khs(query.into_inner(), &req).await
}

pub async fn transkrip(
    req: HttpRequest,
    query: web::Query<TranskripParams>,
) -> ActixResult<HttpResponse> {
    NILAI_SERVICE.transkrip(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_nilai_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/nilai")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_nilai))
                    .route(web::put().to(input_nilai))
                    .wrap(middlewares::RequireRole::new_any(UserRole::dosen_roles())),
            )
            // 学生查本人，管理员须指定 mahasiswa_id
            .service(web::resource("/khs").route(web::get().to(khs)))
            .service(web::resource("/transkrip").route(web::get().to(transkrip))),
    );
}
