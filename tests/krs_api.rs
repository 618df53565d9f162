mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TAHUN_AJARAN, bearer, create_mata_kuliah, create_user, enroll, setup};
use siakad_next::models::krs::entities::Periode;
use siakad_next::models::users::entities::UserRole;

#[actix_web::test]
async fn test_submit_review_and_cancel() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let basis_data = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    let jaringan = create_mata_kuliah(&ctx.storage, "IF202", 2, dosen.id, 40).await;
    let app = test_app!(ctx);

    let ajukan = json!({
        "tahun_ajaran": TAHUN_AJARAN,
        "periode": "ganjil",
        "mata_kuliah_ids": [basis_data.id, jaringan.id]
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(&ajukan)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_sks"], 5);
    let krs_id = body["data"]["items"][0]["id"].as_i64().unwrap();

    // 同一学期重复提交
    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(&ajukan)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // 学生不能审核
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/krs/{krs_id}/status"))
        .insert_header(bearer(&budi))
        .set_json(json!({ "status": "disetujui" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/krs/pengajuan")
        .insert_header(bearer(&dosen))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/krs/{krs_id}/status"))
        .insert_header(bearer(&dosen))
        .set_json(json!({ "status": "disetujui", "catatan": "  ok  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "disetujui");
    assert_eq!(body["data"]["catatan"], "ok");

    // 已批准的选课不能撤回
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/krs/{krs_id}"))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/krs?tahun_ajaran={TAHUN_AJARAN}&periode=ganjil"
        ))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_sks"], 5);
    assert_eq!(body["data"]["max_sks"], 24);
}

#[actix_web::test]
async fn test_credit_limit_rejects_whole_batch() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mut ids = Vec::new();
    for i in 0..5 {
        let mk = create_mata_kuliah(&ctx.storage, &format!("IF30{i}"), 6, dosen.id, 40).await;
        ids.push(mk.id);
    }
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(json!({
            "tahun_ajaran": TAHUN_AJARAN,
            "periode": "ganjil",
            "mata_kuliah_ids": ids
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/krs?tahun_ajaran={TAHUN_AJARAN}&periode=ganjil"
        ))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_quota_full() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let seminar = create_mata_kuliah(&ctx.storage, "IF499", 2, dosen.id, 1).await;
    let app = test_app!(ctx);

    let body = json!({
        "tahun_ajaran": TAHUN_AJARAN,
        "periode": "ganjil",
        "mata_kuliah_ids": [seminar.id]
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&sari))
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_invalid_term_rejected() {
    let ctx = setup().await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(json!({
            "tahun_ajaran": "2024/2026",
            "periode": "ganjil",
            "mata_kuliah_ids": [1]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_only_pending_rows_can_be_cancelled() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let basis_data = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    let jaringan = create_mata_kuliah(&ctx.storage, "IF202", 2, dosen.id, 40).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(json!({
            "tahun_ajaran": TAHUN_AJARAN,
            "periode": "ganjil",
            "mata_kuliah_ids": [basis_data.id, jaringan.id]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    let krs_id = |mata_kuliah_id: i64| {
        items
            .iter()
            .find(|item| item["mata_kuliah_id"] == mata_kuliah_id)
            .and_then(|item| item["id"].as_i64())
            .unwrap()
    };
    let ditolak_id = krs_id(basis_data.id);
    let diajukan_id = krs_id(jaringan.id);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/krs/{ditolak_id}/status"))
        .insert_header(bearer(&dosen))
        .set_json(json!({ "status": "ditolak", "catatan": "Prasyarat belum lulus" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // 被驳回的记录保留，不能撤回
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/krs/{ditolak_id}"))
        .insert_header(bearer(&budi))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // 同学期不能再次提交同一课程
    let req = test::TestRequest::post()
        .uri("/api/v1/krs")
        .insert_header(bearer(&budi))
        .set_json(json!({
            "tahun_ajaran": TAHUN_AJARAN,
            "periode": "ganjil",
            "mata_kuliah_ids": [basis_data.id]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // 其他学生的选课视为不存在
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/krs/{diajukan_id}"))
        .insert_header(bearer(&sari))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/krs/{diajukan_id}"))
        .insert_header(bearer(&budi))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/krs?tahun_ajaran={TAHUN_AJARAN}&periode=ganjil"
        ))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["status"], "ditolak");
}

#[actix_web::test]
async fn test_create_course_checks() {
    let ctx = setup().await;
    let admin = create_user(&ctx.storage, "100001", UserRole::Admin, "Admin").await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    let app = test_app!(ctx);

    let course = |kode: &str, sks: i32, dosen_id: i64| {
        json!({
            "kode": kode,
            "nama": "Sistem Operasi",
            "sks": sks,
            "semester": 3,
            "dosen_id": dosen_id,
            "kuota": 40
        })
    };

    // 只有管理员能开课
    let req = test::TestRequest::post()
        .uri("/api/v1/mata-kuliah")
        .insert_header(bearer(&dosen))
        .set_json(course("IF301", 3, dosen.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    for sks in [0, 7] {
        let req = test::TestRequest::post()
            .uri("/api/v1/mata-kuliah")
            .insert_header(bearer(&admin))
            .set_json(course("IF301", sks, dosen.id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    // dosen_id 指向学生
    let req = test::TestRequest::post()
        .uri("/api/v1/mata-kuliah")
        .insert_header(bearer(&admin))
        .set_json(course("IF301", 3, budi.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // 课程代码不区分大小写
    let req = test::TestRequest::post()
        .uri("/api/v1/mata-kuliah")
        .insert_header(bearer(&admin))
        .set_json(course("if201", 3, dosen.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/mata-kuliah")
        .insert_header(bearer(&admin))
        .set_json(course("if301", 6, dosen.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["kode"], "IF301");
    assert_eq!(body["data"]["sks"], 6);
}

#[actix_web::test]
async fn test_course_participants_and_taught_courses() {
    let ctx = setup().await;
    let andi = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let rina = create_user(&ctx.storage, "198002", UserRole::Dosen, "Bu Rina").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let basis_data = create_mata_kuliah(&ctx.storage, "IF201", 3, andi.id, 40).await;
    create_mata_kuliah(&ctx.storage, "IF202", 2, andi.id, 40).await;
    create_mata_kuliah(&ctx.storage, "IF203", 2, rina.id, 40).await;
    enroll(&ctx.storage, budi.id, basis_data.id).await;
    // 待审核的选课不在名单中
    ctx.storage
        .create_krs_batch(sari.id, TAHUN_AJARAN, Periode::Ganjil, &[basis_data.id])
        .await
        .unwrap();
    let app = test_app!(ctx);

    let peserta_uri = format!(
        "/api/v1/mata-kuliah/{}/mahasiswa?tahun_ajaran={TAHUN_AJARAN}&periode=ganjil",
        basis_data.id
    );
    let req = test::TestRequest::get()
        .uri(&peserta_uri)
        .insert_header(bearer(&andi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["mahasiswa"]["id"], budi.id);
    assert_eq!(items[0]["mahasiswa"]["nomor_induk"], "2101001");

    // 非授课教师
    let req = test::TestRequest::get()
        .uri(&peserta_uri)
        .insert_header(bearer(&rina))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&peserta_uri)
        .insert_header(bearer(&budi))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/api/v1/mata-kuliah/diampu")
        .insert_header(bearer(&andi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let mut kode: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|mk| mk["kode"].as_str())
        .collect();
    kode.sort_unstable();
    assert_eq!(kode, ["IF201", "IF202"]);

    let req = test::TestRequest::get()
        .uri("/api/v1/mata-kuliah/diampu")
        .insert_header(bearer(&budi))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}
