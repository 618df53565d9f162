use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::services::AuthService;

static PROFIL_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn get_profil(request: HttpRequest) -> ActixResult<HttpResponse> {
    PROFIL_SERVICE.get_profile(&request).await
}

pub async fn update_profil(
    request: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    PROFIL_SERVICE
        .update_profile(body.into_inner(), &request)
        .await
}

// 配置路由
pub fn configure_profil_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profil")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_profil))
                    .route(web::put().to(update_profil)),
            ),
    );
}
