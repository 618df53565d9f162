use chrono::Utc;

use super::SeaOrmStorage;
use crate::entity::nilai::{ActiveModel, Column, Entity as NilaiEntity};
use crate::errors::{Result, SiakadError};
use crate::models::krs::entities::Periode;
use crate::models::nilai::entities::{Nilai, NilaiMahasiswa, NilaiMataKuliah, SimpanNilai};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 录入成绩，同一学生同一课程同一学期只保留一条
    pub async fn simpan_nilai_impl(&self, nilai: SimpanNilai) -> Result<Nilai> {
        let now = Utc::now().timestamp();

        let existing = NilaiEntity::find()
            .filter(Column::MahasiswaId.eq(nilai.mahasiswa_id))
            .filter(Column::MataKuliahId.eq(nilai.mata_kuliah_id))
            .filter(Column::TahunAjaran.eq(nilai.tahun_ajaran.as_str()))
            .filter(Column::Periode.eq(nilai.periode.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询成绩失败", e))?;

        let saved = match existing {
            Some(row) => {
                let mut model: ActiveModel = row.into();
                model.nilai_tugas = Set(nilai.nilai_tugas);
                model.nilai_uts = Set(nilai.nilai_uts);
                model.nilai_uas = Set(nilai.nilai_uas);
                model.nilai_akhir = Set(nilai.nilai_akhir);
                model.nilai_huruf = Set(nilai.nilai_huruf);
                model.bobot = Set(nilai.bobot);
                model.dinilai_oleh = Set(Some(nilai.dinilai_oleh));
                model.updated_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| SiakadError::db("更新成绩失败", e))?
            }
            None => {
                let model = ActiveModel {
                    mahasiswa_id: Set(nilai.mahasiswa_id),
                    mata_kuliah_id: Set(nilai.mata_kuliah_id),
                    tahun_ajaran: Set(nilai.tahun_ajaran),
                    periode: Set(nilai.periode.to_string()),
                    nilai_tugas: Set(nilai.nilai_tugas),
                    nilai_uts: Set(nilai.nilai_uts),
                    nilai_uas: Set(nilai.nilai_uas),
                    nilai_akhir: Set(nilai.nilai_akhir),
                    nilai_huruf: Set(nilai.nilai_huruf),
                    bobot: Set(nilai.bobot),
                    dinilai_oleh: Set(Some(nilai.dinilai_oleh)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| SiakadError::db("保存成绩失败", e))?
            }
        };

        Ok(saved.into_nilai())
    }

    /// 课程某学期的成绩（附带学生信息）
    pub async fn list_nilai_by_mata_kuliah_impl(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<NilaiMahasiswa>> {
        let rows = NilaiEntity::find()
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .filter(Column::TahunAjaran.eq(tahun_ajaran))
            .filter(Column::Periode.eq(periode.as_str()))
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询课程成绩失败", e))?;

        let mahasiswa_ids: Vec<i64> = rows.iter().map(|m| m.mahasiswa_id).collect();
        let mahasiswa_map = self.mahasiswa_map(&mahasiswa_ids).await?;

        let mut items: Vec<NilaiMahasiswa> = rows
            .into_iter()
            .filter_map(|m| {
                let mahasiswa = mahasiswa_map.get(&m.mahasiswa_id)?.clone();
                Some(NilaiMahasiswa {
                    nilai: m.into_nilai(),
                    mahasiswa,
                })
            })
            .collect();
        items.sort_by(|a, b| a.mahasiswa.nomor_induk.cmp(&b.mahasiswa.nomor_induk));

        Ok(items)
    }

    /// 学生成绩（附带课程信息）
    pub async fn list_nilai_mahasiswa_impl(
        &self,
        mahasiswa_id: i64,
        semester: Option<(&str, Periode)>,
    ) -> Result<Vec<NilaiMataKuliah>> {
        let mut select = NilaiEntity::find().filter(Column::MahasiswaId.eq(mahasiswa_id));

        if let Some((tahun_ajaran, periode)) = semester {
            select = select
                .filter(Column::TahunAjaran.eq(tahun_ajaran))
                .filter(Column::Periode.eq(periode.as_str()));
        }

        let rows = select
            .order_by_asc(Column::TahunAjaran)
            .order_by_asc(Column::Periode)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询学生成绩失败", e))?;

        let mata_kuliah_ids: Vec<i64> = rows.iter().map(|m| m.mata_kuliah_id).collect();
        let mata_kuliah_map = self.mata_kuliah_map(&mata_kuliah_ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let mata_kuliah = mata_kuliah_map.get(&m.mata_kuliah_id)?.clone();
                Some(NilaiMataKuliah {
                    nilai: m.into_nilai(),
                    mata_kuliah,
                })
            })
            .collect())
    }
}
