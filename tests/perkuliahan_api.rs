mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};

use common::{TAHUN_AJARAN, bearer, create_mata_kuliah, create_user, enroll, setup};
use siakad_next::models::users::entities::UserRole;

#[actix_web::test]
async fn test_attendance_check_in() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/presensi/sesi")
        .insert_header(bearer(&dosen))
        .set_json(json!({ "mata_kuliah_id": mk.id, "pertemuan_ke": 1, "topik": "Pengantar" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let sesi_id = body["data"]["id"].as_i64().unwrap();
    let kode = body["data"]["kode"].as_str().unwrap().to_string();
    assert_eq!(kode.len(), 6);

    // 学生列表中看不到签到码
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/presensi/sesi?mata_kuliah_id={}", mk.id))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["items"][0].get("kode").is_none());

    let hadir_uri = format!("/api/v1/presensi/sesi/{sesi_id}/hadir");

    let req = test::TestRequest::post()
        .uri(&hadir_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "kode": "ZZZZZZ" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // 未选课学生
    let req = test::TestRequest::post()
        .uri(&hadir_uri)
        .insert_header(bearer(&sari))
        .set_json(json!({ "kode": kode }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&hadir_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "kode": kode.to_lowercase() }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&hadir_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "kode": kode }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/presensi/rekap?mata_kuliah_id={}", mk.id))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["hadir"], 1);
    assert_eq!(items[0]["persentase_kehadiran"], 100.0);
}

#[actix_web::test]
async fn test_late_submission_and_grading() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/tugas")
        .insert_header(bearer(&dosen))
        .set_json(json!({
            "mata_kuliah_id": mk.id,
            "judul": "Normalisasi",
            "tenggat": Utc::now() - TimeDelta::hours(1)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let tugas_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["nilai_maksimal"], 100.0);

    let kumpul_uri = format!("/api/v1/tugas/{tugas_id}/pengumpulan");
    let req = test::TestRequest::post()
        .uri(&kumpul_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "konten": "jawaban" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tugas/{tugas_id}"))
        .insert_header(bearer(&dosen))
        .set_json(json!({ "izinkan_terlambat": true }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&kumpul_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "konten": "jawaban" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let pengumpulan_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["terlambat"], true);

    let nilai_uri = format!("/api/v1/pengumpulan/{pengumpulan_id}/nilai");
    let req = test::TestRequest::put()
        .uri(&nilai_uri)
        .insert_header(bearer(&dosen))
        .set_json(json!({ "nilai": 120.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&nilai_uri)
        .insert_header(bearer(&dosen))
        .set_json(json!({ "nilai": 90.0, "komentar": "Bagus" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // 已批改的提交不能覆盖
    let req = test::TestRequest::post()
        .uri(&kumpul_uri)
        .insert_header(bearer(&budi))
        .set_json(json!({ "konten": "revisi" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // 满分不能压到已给出的 90 分以下
    let tugas_uri = format!("/api/v1/tugas/{tugas_id}");
    let req = test::TestRequest::put()
        .uri(&tugas_uri)
        .insert_header(bearer(&dosen))
        .set_json(json!({ "nilai_maksimal": 80.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&tugas_uri)
        .insert_header(bearer(&dosen))
        .set_json(json!({ "nilai_maksimal": 90.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["nilai_maksimal"], 90.0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tugas?mata_kuliah_id={}", mk.id))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"][0]["status_pengumpulan"], "dinilai");
    assert_eq!(body["data"]["items"][0]["nilai"], 90.0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tugas?mata_kuliah_id={}", mk.id))
        .insert_header(bearer(&dosen))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"][0]["jumlah_pengumpulan"], 1);
}

#[actix_web::test]
async fn test_grade_input_and_transcript() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;
    let app = test_app!(ctx);

    let input = |mahasiswa_id: i64| {
        json!({
            "mahasiswa_id": mahasiswa_id,
            "mata_kuliah_id": mk.id,
            "tahun_ajaran": TAHUN_AJARAN,
            "periode": "ganjil",
            "nilai_tugas": 80.0,
            "nilai_uts": 70.0,
            "nilai_uas": 90.0
        })
    };

    // 没有已批准选课
    let req = test::TestRequest::put()
        .uri("/api/v1/nilai")
        .insert_header(bearer(&dosen))
        .set_json(input(sari.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/nilai")
        .insert_header(bearer(&dosen))
        .set_json(input(budi.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    // 80*0.3 + 70*0.3 + 90*0.4
    assert_eq!(body["data"]["nilai_akhir"], 81.0);
    assert_eq!(body["data"]["nilai_huruf"], "A-");
    assert_eq!(body["data"]["bobot"], 3.7);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/nilai/khs?tahun_ajaran={TAHUN_AJARAN}&periode=ganjil"
        ))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_sks"], 3);
    assert_eq!(body["data"]["ips"], 3.7);

    let req = test::TestRequest::get()
        .uri("/api/v1/nilai/transkrip")
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["ipk"], 3.7);
    assert_eq!(body["data"]["semester"].as_array().unwrap().len(), 1);

    // 教师不能查看成绩单
    let req = test::TestRequest::get()
        .uri("/api/v1/nilai/transkrip")
        .insert_header(bearer(&dosen))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_lecturer_sets_attendance() {
    let ctx = setup().await;
    let andi = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let rina = create_user(&ctx.storage, "198002", UserRole::Dosen, "Bu Rina").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let sari = create_user(&ctx.storage, "2101002", UserRole::Mahasiswa, "Sari").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF201", 3, andi.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/presensi/sesi")
        .insert_header(bearer(&andi))
        .set_json(json!({ "mata_kuliah_id": mk.id, "pertemuan_ke": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let sesi_id = body["data"]["id"].as_i64().unwrap();

    let status_uri = format!("/api/v1/presensi/sesi/{sesi_id}/mahasiswa/{}", budi.id);
    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer(&andi))
        .set_json(json!({ "status": "izin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let presensi_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "izin");

    // 再次录入覆盖同一条记录
    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer(&andi))
        .set_json(json!({ "status": "sakit" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], presensi_id);
    assert_eq!(body["data"]["status"], "sakit");

    // 非授课教师
    let req = test::TestRequest::put()
        .uri(&status_uri)
        .insert_header(bearer(&rina))
        .set_json(json!({ "status": "hadir" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    // 未选课学生
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/presensi/sesi/{sesi_id}/mahasiswa/{}", sari.id))
        .insert_header(bearer(&andi))
        .set_json(json!({ "status": "hadir" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/presensi/rekap?mata_kuliah_id={}", mk.id))
        .insert_header(bearer(&budi))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"][0]["hadir"], 0);
    assert_eq!(body["data"]["items"][0]["sakit"], 1);
}

#[actix_web::test]
async fn test_check_in_before_session_opens() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF201", 3, dosen.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/presensi/sesi")
        .insert_header(bearer(&dosen))
        .set_json(json!({
            "mata_kuliah_id": mk.id,
            "pertemuan_ke": 3,
            "waktu_mulai": Utc::now() + TimeDelta::hours(1),
            "durasi_menit": 30
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let sesi_id = body["data"]["id"].as_i64().unwrap();
    let kode = body["data"]["kode"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/presensi/sesi/{sesi_id}/hadir"))
        .insert_header(bearer(&budi))
        .set_json(json!({ "kode": kode }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Attendance session has not started yet");
}
