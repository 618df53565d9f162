use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, Result as ActixResult};
use tracing::{debug, error};

use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::entities::UserStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn refresh_failed(message: &str) -> HttpResponse {
    clear_cookie(
        HttpResponse::Unauthorized(),
        ErrorCode::Unauthorized,
        message,
    )
}

// 续签失败一律清除 refresh token cookie
fn clear_cookie(mut builder: HttpResponseBuilder, code: ErrorCode, message: &str) -> HttpResponse {
    builder
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(code, message))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(refresh_failed("Unauthorized access, please login"));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Refresh token rejected: {}", e);
            return Ok(refresh_failed("Login expired or invalid, please login again"));
        }
    };
    let Ok(user_id) = claims.user_id() else {
        return Ok(refresh_failed("Login expired or invalid, please login again"));
    };

    // 重新读取用户，角色变化或账号停用后不再续签
    let storage = service.get_storage(request)?;
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.status == UserStatus::Aktif => user,
        Ok(_) => return Ok(refresh_failed("Account is no longer active")),
        Err(e) => {
            error!("Failed to load user for token refresh: {}", e);
            return Ok(clear_cookie(
                HttpResponse::InternalServerError(),
                ErrorCode::InternalServerError,
                "Failed to refresh token",
            ));
        }
    };

    match JwtUtils::generate_access_token(user.id, user.role.as_str()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: JwtUtils::access_token_expires_in(),
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            error!("Failed to generate access token: {}", e);
            Ok(refresh_failed("Failed to refresh token"))
        }
    }
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 能到达这里说明 RequireJWT 已通过
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = try_or_respond!(crate::services::access::current_user(request));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user },
        "User information retrieved successfully",
    )))
}
