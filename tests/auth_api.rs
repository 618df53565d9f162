mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{PASSWORD, bearer, client_ip, create_user, refresh_cookie, setup};
use siakad_next::models::users::entities::{UserRole, UserStatus};
use siakad_next::models::users::requests::UpdateUserRequest;

#[actix_web::test]
async fn test_login_then_me() {
    let ctx = setup().await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "2101001", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.response()
            .cookies()
            .any(|c| c.name() == "refresh_token" && c.http_only() == Some(true))
    );
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["id"], budi.id);
    assert!(body["data"]["user"].get("password_hash").is_none());

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_wrong_password() {
    let ctx = setup().await;
    create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "identifier": "2101002@kampus.ac.id", "password": "Salah12345" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_register_creates_student() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": "dewi@kampus.ac.id",
            "nomor_induk": "2101003",
            "password": PASSWORD,
            "nama": "Dewi"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["role"], "mahasiswa");
    assert_eq!(body["data"]["status"], "aktif");
}

#[actix_web::test]
async fn test_protected_route_requires_token() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/profil").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_users_admin_only() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let admin = create_user(&ctx.storage, "100001", UserRole::Admin, "Admin").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&dosen))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "email": "bukan-email",
            "nomor_induk": "2101009",
            "password": PASSWORD,
            "role": "mahasiswa",
            "nama": "Rudi"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", admin.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_system_info_and_health_are_public() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/system/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["akademik"]["max_sks"], 24);

    let req = test::TestRequest::get().uri("/api/v1/system/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_rejects_duplicates() {
    let ctx = setup().await;
    create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let app = test_app!(ctx);

    // 邮箱重复
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(client_ip(1))
        .set_json(json!({
            "email": "2101001@kampus.ac.id",
            "nomor_induk": "2101050",
            "password": PASSWORD,
            "nama": "Budi Lain"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 学号重复
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(client_ip(1))
        .set_json(json!({
            "email": "baru@kampus.ac.id",
            "nomor_induk": "2101001",
            "password": PASSWORD,
            "nama": "Budi Lain"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Nomor induk already exists");
}

#[actix_web::test]
async fn test_login_refused_for_inactive_account() {
    let ctx = setup().await;
    let rina = create_user(&ctx.storage, "2101004", UserRole::Mahasiswa, "Rina").await;
    ctx.storage
        .update_user(
            rina.id,
            UpdateUserRequest {
                status: Some(UserStatus::Cuti),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(client_ip(2))
        .set_json(json!({ "identifier": "2101004", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(refresh_cookie(&resp).is_none());
}

#[actix_web::test]
async fn test_refresh_token_flow() {
    let ctx = setup().await;
    create_user(&ctx.storage, "2101005", UserRole::Mahasiswa, "Eka").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(client_ip(3))
        .set_json(json!({ "identifier": "2101005", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let refresh_token = refresh_cookie(&resp).unwrap();
    assert!(!refresh_token.is_empty());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(client_ip(3))
        .cookie(Cookie::new("refresh_token", refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", format!("Bearer {access_token}")))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // 无效 cookie 被清除
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(client_ip(3))
        .cookie(Cookie::new("refresh_token", "bukan-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(refresh_cookie(&resp).as_deref(), Some(""));

    // 缺少 cookie 同样清除
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(client_ip(3))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(refresh_cookie(&resp).as_deref(), Some(""));
}

#[actix_web::test]
async fn test_update_profile() {
    let ctx = setup().await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/v1/profil")
        .insert_header(bearer(&budi))
        .set_json(json!({ "email": "2101002@kampus.ac.id" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // 保留自己的邮箱不算冲突
    let req = test::TestRequest::put()
        .uri("/api/v1/profil")
        .insert_header(bearer(&budi))
        .set_json(json!({ "email": "2101001@kampus.ac.id", "no_hp": "081234567890" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["no_hp"], "081234567890");

    let req = test::TestRequest::put()
        .uri("/api/v1/profil")
        .insert_header(bearer(&budi))
        .set_json(json!({ "password": "pendek" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/profil")
        .insert_header(bearer(&budi))
        .set_json(json!({ "password": "SandiBaru2025" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(client_ip(4))
        .set_json(json!({ "identifier": "2101001", "password": PASSWORD }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(client_ip(4))
        .set_json(json!({ "identifier": "2101001", "password": "SandiBaru2025" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
