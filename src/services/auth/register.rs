use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{CreateUserRequest, RegisterRequest},
};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_nomor_induk, validate_password_simple};

use super::AuthService;
use crate::services::access::{bad_request, conflict, storage_error};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let mut create_request = CreateUserRequest::from(register_request);

    if let Err(response) = validate_new_user(&create_request) {
        return Ok(response);
    }

    if let Err(response) = check_duplicates(&storage, &create_request).await {
        return Ok(response);
    }

    create_request.password = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {}", e.message()),
                )),
            );
        }
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Student {} registered", user.nomor_induk);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Registration successful")))
        }
        Err(e) => Ok(storage_error("Registration failed", e)),
    }
}

/// 邮箱、学号、密码策略与姓名校验（注册与管理员建号共用）
pub(crate) fn validate_new_user(req: &CreateUserRequest) -> Result<(), HttpResponse> {
    validate_email(&req.email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_nomor_induk(&req.nomor_induk)
        .map_err(|msg| bad_request(ErrorCode::UserNomorIndukInvalid, msg))?;
    validate_password_simple(&req.password)
        .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))?;
    if req.nama.trim().is_empty() {
        return Err(bad_request(ErrorCode::BadRequest, "nama cannot be empty"));
    }
    Ok(())
}

/// 邮箱与学号/工号均须唯一
pub(crate) async fn check_duplicates(
    storage: &Arc<dyn Storage>,
    req: &CreateUserRequest,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(&req.email).await {
        Ok(Some(_)) => {
            return Err(conflict(
                ErrorCode::UserAlreadyExists,
                "Email already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => return Err(storage_error("Failed to check email", e)),
    }

    match storage.get_user_by_nomor_induk(&req.nomor_induk).await {
        Ok(Some(_)) => Err(conflict(
            ErrorCode::UserAlreadyExists,
            "Nomor induk already exists",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error("Failed to check nomor induk", e)),
    }
}
