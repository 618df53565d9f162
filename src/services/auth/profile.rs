use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{
    bad_request, conflict, current_user, invalidate_user_cache, not_found, storage_error,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_get_profile(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    // 缓存中的用户可能已过时，资料页直接读库
    match storage.get_user_by_id(current.id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Profile retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error("Failed to load profile", e)),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current = try_or_respond!(current_user(request));
    let storage = service.get_storage(request)?;

    if let Some(ref email) = update_data.email {
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        // 邮箱不能与其他用户重复
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != current.id => {
                return Ok(conflict(ErrorCode::UserAlreadyExists, "Email already exists"));
            }
            Ok(_) => {}
            Err(e) => return Ok(storage_error("Failed to check email", e)),
        }
    }

    if update_data
        .nama
        .as_deref()
        .is_some_and(|nama| nama.trim().is_empty())
    {
        return Ok(bad_request(ErrorCode::BadRequest, "nama cannot be empty"));
    }

    let hashed_password = match update_data.password {
        Some(ref password) => {
            if let Err(msg) = validate_password_simple(password) {
                return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
            }
            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(storage_error("Password hashing failed", e)),
            }
        }
        None => None,
    };

    // 角色与状态不在此处修改
    let storage_update = UpdateUserRequest {
        email: update_data.email,
        password: hashed_password,
        nama: update_data.nama,
        program_studi: update_data.program_studi,
        no_hp: update_data.no_hp,
        avatar_url: update_data.avatar_url,
        ..Default::default()
    };

    match storage.update_user(current.id, storage_update).await {
        Ok(Some(user)) => {
            invalidate_user_cache(request).await;
            info!("User {} updated own profile", user.nomor_induk);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(storage_error("Failed to update profile", e)),
    }
}
