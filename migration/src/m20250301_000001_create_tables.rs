use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表（同时承载个人资料）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::NomorInduk)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::Nama).string().not_null())
                    .col(ColumnDef::new(Users::ProgramStudi).string().null())
                    .col(ColumnDef::new(Users::Angkatan).integer().null())
                    .col(ColumnDef::new(Users::NoHp).string().null())
                    .col(ColumnDef::new(Users::AvatarUrl).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 课程表
        manager
            .create_table(
                Table::create()
                    .table(MataKuliah::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MataKuliah::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MataKuliah::Kode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MataKuliah::Nama).string().not_null())
                    .col(ColumnDef::new(MataKuliah::Sks).integer().not_null())
                    .col(ColumnDef::new(MataKuliah::Semester).integer().not_null())
                    .col(ColumnDef::new(MataKuliah::DosenId).big_integer().not_null())
                    .col(ColumnDef::new(MataKuliah::Kuota).integer().not_null())
                    .col(ColumnDef::new(MataKuliah::Hari).string().null())
                    .col(ColumnDef::new(MataKuliah::JamMulai).string().null())
                    .col(ColumnDef::new(MataKuliah::JamSelesai).string().null())
                    .col(ColumnDef::new(MataKuliah::Ruangan).string().null())
                    .col(
                        ColumnDef::new(MataKuliah::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MataKuliah::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MataKuliah::Table, MataKuliah::DosenId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // KRS 选课表
        manager
            .create_table(
                Table::create()
                    .table(Krs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Krs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Krs::MahasiswaId).big_integer().not_null())
                    .col(ColumnDef::new(Krs::MataKuliahId).big_integer().not_null())
                    .col(ColumnDef::new(Krs::TahunAjaran).string().not_null())
                    .col(ColumnDef::new(Krs::Periode).string().not_null())
                    .col(ColumnDef::new(Krs::Status).string().not_null())
                    .col(ColumnDef::new(Krs::Catatan).text().null())
                    .col(ColumnDef::new(Krs::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Krs::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Krs::Table, Krs::MahasiswaId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Krs::Table, Krs::MataKuliahId)
                            .to(MataKuliah::Table, MataKuliah::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤场次表
        manager
            .create_table(
                Table::create()
                    .table(SesiPresensi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SesiPresensi::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SesiPresensi::MataKuliahId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SesiPresensi::PertemuanKe)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SesiPresensi::Topik).string().null())
                    .col(ColumnDef::new(SesiPresensi::Kode).string().not_null())
                    .col(
                        ColumnDef::new(SesiPresensi::WaktuMulai)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SesiPresensi::WaktuSelesai)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SesiPresensi::DibuatOleh)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SesiPresensi::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SesiPresensi::Table, SesiPresensi::MataKuliahId)
                            .to(MataKuliah::Table, MataKuliah::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SesiPresensi::Table, SesiPresensi::DibuatOleh)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤记录表
        manager
            .create_table(
                Table::create()
                    .table(Presensi::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Presensi::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Presensi::SesiId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Presensi::MahasiswaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Presensi::Status).string().not_null())
                    .col(
                        ColumnDef::new(Presensi::WaktuPresensi)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Presensi::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Presensi::Table, Presensi::SesiId)
                            .to(SesiPresensi::Table, SesiPresensi::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Presensi::Table, Presensi::MahasiswaId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业表
        manager
            .create_table(
                Table::create()
                    .table(Tugas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tugas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tugas::MataKuliahId).big_integer().not_null())
                    .col(ColumnDef::new(Tugas::Judul).string().not_null())
                    .col(ColumnDef::new(Tugas::Deskripsi).text().null())
                    .col(ColumnDef::new(Tugas::Tenggat).big_integer().not_null())
                    .col(ColumnDef::new(Tugas::NilaiMaksimal).double().not_null())
                    .col(
                        ColumnDef::new(Tugas::IzinkanTerlambat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tugas::DibuatOleh).big_integer().not_null())
                    .col(ColumnDef::new(Tugas::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Tugas::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tugas::Table, Tugas::MataKuliahId)
                            .to(MataKuliah::Table, MataKuliah::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Tugas::Table, Tugas::DibuatOleh)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业提交表
        manager
            .create_table(
                Table::create()
                    .table(Pengumpulan::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pengumpulan::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Pengumpulan::TugasId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Pengumpulan::MahasiswaId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pengumpulan::Konten).text().null())
                    .col(ColumnDef::new(Pengumpulan::LampiranUrl).string().null())
                    .col(
                        ColumnDef::new(Pengumpulan::Terlambat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Pengumpulan::Nilai).double().null())
                    .col(ColumnDef::new(Pengumpulan::Komentar).text().null())
                    .col(ColumnDef::new(Pengumpulan::DinilaiOleh).big_integer().null())
                    .col(
                        ColumnDef::new(Pengumpulan::DikumpulkanPada)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pengumpulan::DinilaiPada).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Pengumpulan::Table, Pengumpulan::TugasId)
                            .to(Tugas::Table, Tugas::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Pengumpulan::Table, Pengumpulan::MahasiswaId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Pengumpulan::Table, Pengumpulan::DinilaiOleh)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 课程成绩表
        manager
            .create_table(
                Table::create()
                    .table(Nilai::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Nilai::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Nilai::MahasiswaId).big_integer().not_null())
                    .col(ColumnDef::new(Nilai::MataKuliahId).big_integer().not_null())
                    .col(ColumnDef::new(Nilai::TahunAjaran).string().not_null())
                    .col(ColumnDef::new(Nilai::Periode).string().not_null())
                    .col(ColumnDef::new(Nilai::NilaiTugas).double().not_null())
                    .col(ColumnDef::new(Nilai::NilaiUts).double().not_null())
                    .col(ColumnDef::new(Nilai::NilaiUas).double().not_null())
                    .col(ColumnDef::new(Nilai::NilaiAkhir).double().not_null())
                    .col(ColumnDef::new(Nilai::NilaiHuruf).string().not_null())
                    .col(ColumnDef::new(Nilai::Bobot).double().not_null())
                    .col(ColumnDef::new(Nilai::DinilaiOleh).big_integer().null())
                    .col(ColumnDef::new(Nilai::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Nilai::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Nilai::Table, Nilai::MahasiswaId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Nilai::Table, Nilai::MataKuliahId)
                            .to(MataKuliah::Table, MataKuliah::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Nilai::Table, Nilai::DinilaiOleh)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一约束
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_krs_mahasiswa_mk_term")
                    .table(Krs::Table)
                    .col(Krs::MahasiswaId)
                    .col(Krs::MataKuliahId)
                    .col(Krs::TahunAjaran)
                    .col(Krs::Periode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_sesi_presensi_mk_pertemuan")
                    .table(SesiPresensi::Table)
                    .col(SesiPresensi::MataKuliahId)
                    .col(SesiPresensi::PertemuanKe)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_presensi_sesi_mahasiswa")
                    .table(Presensi::Table)
                    .col(Presensi::SesiId)
                    .col(Presensi::MahasiswaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_pengumpulan_tugas_mahasiswa")
                    .table(Pengumpulan::Table)
                    .col(Pengumpulan::TugasId)
                    .col(Pengumpulan::MahasiswaId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_nilai_mahasiswa_mk_term")
                    .table(Nilai::Table)
                    .col(Nilai::MahasiswaId)
                    .col(Nilai::MataKuliahId)
                    .col(Nilai::TahunAjaran)
                    .col(Nilai::Periode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_mata_kuliah_dosen_id")
                    .table(MataKuliah::Table)
                    .col(MataKuliah::DosenId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_krs_mata_kuliah_term")
                    .table(Krs::Table)
                    .col(Krs::MataKuliahId)
                    .col(Krs::TahunAjaran)
                    .col(Krs::Periode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tugas_mata_kuliah_id")
                    .table(Tugas::Table)
                    .col(Tugas::MataKuliahId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Nilai::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pengumpulan::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tugas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Presensi::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SesiPresensi::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Krs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MataKuliah::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Email,
    NomorInduk,
    PasswordHash,
    Role,
    Status,
    Nama,
    ProgramStudi,
    Angkatan,
    NoHp,
    AvatarUrl,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MataKuliah {
    #[sea_orm(iden = "mata_kuliah")]
    Table,
    Id,
    Kode,
    Nama,
    Sks,
    Semester,
    DosenId,
    Kuota,
    Hari,
    JamMulai,
    JamSelesai,
    Ruangan,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Krs {
    #[sea_orm(iden = "krs")]
    Table,
    Id,
    MahasiswaId,
    MataKuliahId,
    TahunAjaran,
    Periode,
    Status,
    Catatan,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SesiPresensi {
    #[sea_orm(iden = "sesi_presensi")]
    Table,
    Id,
    MataKuliahId,
    PertemuanKe,
    Topik,
    Kode,
    WaktuMulai,
    WaktuSelesai,
    DibuatOleh,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Presensi {
    #[sea_orm(iden = "presensi")]
    Table,
    Id,
    SesiId,
    MahasiswaId,
    Status,
    WaktuPresensi,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Tugas {
    #[sea_orm(iden = "tugas")]
    Table,
    Id,
    MataKuliahId,
    Judul,
    Deskripsi,
    Tenggat,
    NilaiMaksimal,
    IzinkanTerlambat,
    DibuatOleh,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Pengumpulan {
    #[sea_orm(iden = "pengumpulan")]
    Table,
    Id,
    TugasId,
    MahasiswaId,
    Konten,
    LampiranUrl,
    Terlambat,
    Nilai,
    Komentar,
    DinilaiOleh,
    DikumpulkanPada,
    DinilaiPada,
}

#[derive(DeriveIden)]
enum Nilai {
    #[sea_orm(iden = "nilai")]
    Table,
    Id,
    MahasiswaId,
    MataKuliahId,
    TahunAjaran,
    Periode,
    NilaiTugas,
    NilaiUts,
    NilaiUas,
    NilaiAkhir,
    NilaiHuruf,
    Bobot,
    DinilaiOleh,
    CreatedAt,
    UpdatedAt,
}
