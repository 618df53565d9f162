mod common;

use chrono::{TimeDelta, Utc};

use common::{TAHUN_AJARAN, create_mata_kuliah, create_user, enroll, setup};
use siakad_next::models::krs::entities::{KrsStatus, Periode};
use siakad_next::models::presensi::entities::StatusPresensi;
use siakad_next::models::tugas::requests::CreateTugasRequest;
use siakad_next::models::users::entities::UserRole;
use siakad_next::storage::{NewPengumpulan, NewSesi};

#[actix_web::test]
async fn test_krs_batch_is_all_or_nothing() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let a = create_mata_kuliah(&ctx.storage, "IF101", 3, dosen.id, 40).await;
    let b = create_mata_kuliah(&ctx.storage, "IF102", 3, dosen.id, 40).await;

    ctx.storage
        .create_krs_batch(budi.id, TAHUN_AJARAN, Periode::Ganjil, &[a.id])
        .await
        .unwrap();

    // b 可以插入，但 a 违反唯一约束，整批回滚
    let err = ctx
        .storage
        .create_krs_batch(budi.id, TAHUN_AJARAN, Periode::Ganjil, &[b.id, a.id])
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let rows = ctx
        .storage
        .list_krs_mahasiswa(budi.id, TAHUN_AJARAN, Periode::Ganjil)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].mata_kuliah.id, a.id);

    let counts = ctx
        .storage
        .count_krs_aktif_by_mata_kuliah(&[a.id, b.id], TAHUN_AJARAN, Periode::Ganjil)
        .await
        .unwrap();
    assert_eq!(counts.get(&a.id).copied().unwrap_or(0), 1);
    assert_eq!(counts.get(&b.id).copied().unwrap_or(0), 0);
}

#[actix_web::test]
async fn test_enrollment_requires_approval() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF101", 3, dosen.id, 40).await;

    let rows = ctx
        .storage
        .create_krs_batch(budi.id, TAHUN_AJARAN, Periode::Genap, &[mk.id])
        .await
        .unwrap();
    assert!(!ctx.storage.is_mahasiswa_terdaftar(budi.id, mk.id).await.unwrap());

    ctx.storage
        .update_krs_status(rows[0].id, KrsStatus::Disetujui, None)
        .await
        .unwrap();
    assert!(ctx.storage.is_mahasiswa_terdaftar(budi.id, mk.id).await.unwrap());
    assert!(
        ctx.storage
            .get_krs_disetujui(budi.id, mk.id, TAHUN_AJARAN, Periode::Genap)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn test_presensi_unique_and_upsert() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF101", 3, dosen.id, 40).await;
    enroll(&ctx.storage, budi.id, mk.id).await;

    let now = Utc::now();
    let sesi = ctx
        .storage
        .create_sesi(NewSesi {
            mata_kuliah_id: mk.id,
            pertemuan_ke: 1,
            topik: None,
            kode: "AB12CD".to_string(),
            waktu_mulai: now,
            waktu_selesai: now + TimeDelta::minutes(15),
            dibuat_oleh: dosen.id,
        })
        .await
        .unwrap();

    ctx.storage
        .create_presensi(sesi.id, budi.id, StatusPresensi::Hadir, now)
        .await
        .unwrap();
    let err = ctx
        .storage
        .create_presensi(sesi.id, budi.id, StatusPresensi::Hadir, now)
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let updated = ctx
        .storage
        .upsert_presensi(sesi.id, budi.id, StatusPresensi::Sakit)
        .await
        .unwrap();
    assert_eq!(updated.status, StatusPresensi::Sakit);
    assert_eq!(
        ctx.storage.list_presensi_by_sesi(sesi.id).await.unwrap().len(),
        1
    );
}

#[actix_web::test]
async fn test_resubmission_clears_grade() {
    let ctx = setup().await;
    let dosen = create_user(&ctx.storage, "198001", UserRole::Dosen, "Pak Andi").await;
    let budi = create_user(&ctx.storage, "2101001", UserRole::Mahasiswa, "Budi").await;
    let mk = create_mata_kuliah(&ctx.storage, "IF101", 3, dosen.id, 40).await;

    let tugas = ctx
        .storage
        .create_tugas(
            dosen.id,
            CreateTugasRequest {
                mata_kuliah_id: mk.id,
                judul: "Kuis 1".to_string(),
                deskripsi: None,
                tenggat: Utc::now() + TimeDelta::days(1),
                nilai_maksimal: None,
                izinkan_terlambat: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(tugas.nilai_maksimal, 100.0);

    let kirim = |konten: &str| NewPengumpulan {
        tugas_id: tugas.id,
        mahasiswa_id: budi.id,
        konten: Some(konten.to_string()),
        lampiran_url: None,
        terlambat: false,
    };

    let first = ctx.storage.simpan_pengumpulan(kirim("v1")).await.unwrap();
    let graded = ctx
        .storage
        .nilai_pengumpulan(first.id, 80.0, Some("ok".to_string()), dosen.id)
        .await
        .unwrap()
        .unwrap();
    assert!(graded.sudah_dinilai());

    let second = ctx.storage.simpan_pengumpulan(kirim("v2")).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.konten.as_deref(), Some("v2"));
    assert!(second.nilai.is_none());
    assert!(second.dinilai_oleh.is_none());
}
