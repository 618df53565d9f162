use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::SeaOrmStorage;
use crate::entity::pengumpulan::{
    ActiveModel as PengumpulanActiveModel, Column as PengumpulanColumn,
    Entity as PengumpulanEntity,
};
use crate::entity::tugas::{ActiveModel, Column, Entity as TugasEntity};
use crate::errors::{Result, SiakadError};
use crate::models::tugas::{
    entities::{Pengumpulan, PengumpulanDetail, Tugas},
    requests::{CreateTugasRequest, DEFAULT_NILAI_MAKSIMAL, UpdateTugasRequest},
};
use crate::storage::NewPengumpulan;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_tugas_impl(&self, dibuat_oleh: i64, req: CreateTugasRequest) -> Result<Tugas> {
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            mata_kuliah_id: Set(req.mata_kuliah_id),
            judul: Set(req.judul.trim().to_string()),
            deskripsi: Set(req.deskripsi),
            tenggat: Set(req.tenggat.timestamp()),
            nilai_maksimal: Set(req.nilai_maksimal.unwrap_or(DEFAULT_NILAI_MAKSIMAL)),
            izinkan_terlambat: Set(req.izinkan_terlambat),
            dibuat_oleh: Set(dibuat_oleh),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiakadError::db("创建作业失败", e))?;

        Ok(result.into_tugas())
    }

    /// 通过 ID 获取作业
    pub async fn get_tugas_by_id_impl(&self, id: i64) -> Result<Option<Tugas>> {
        let result = TugasEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询作业失败", e))?;

        Ok(result.map(|m| m.into_tugas()))
    }

    /// 课程的作业，按截止时间排序
    pub async fn list_tugas_by_mata_kuliah_impl(&self, mata_kuliah_id: i64) -> Result<Vec<Tugas>> {
        let result = TugasEntity::find()
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .order_by_asc(Column::Tenggat)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询作业列表失败", e))?;

        Ok(result.into_iter().map(|m| m.into_tugas()).collect())
    }

    /// 更新作业
    pub async fn update_tugas_impl(
        &self,
        id: i64,
        update: UpdateTugasRequest,
    ) -> Result<Option<Tugas>> {
        if self.get_tugas_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(judul) = update.judul {
            model.judul = Set(judul.trim().to_string());
        }
        if let Some(deskripsi) = update.deskripsi {
            model.deskripsi = Set(Some(deskripsi));
        }
        if let Some(tenggat) = update.tenggat {
            model.tenggat = Set(tenggat.timestamp());
        }
        if let Some(nilai_maksimal) = update.nilai_maksimal {
            model.nilai_maksimal = Set(nilai_maksimal);
        }
        if let Some(izinkan_terlambat) = update.izinkan_terlambat {
            model.izinkan_terlambat = Set(izinkan_terlambat);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SiakadError::db("更新作业失败", e))?;

        self.get_tugas_by_id_impl(id).await
    }

    /// 删除作业（提交记录随外键级联删除）
    pub async fn delete_tugas_impl(&self, id: i64) -> Result<bool> {
        let result = TugasEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SiakadError::db("删除作业失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 各作业的提交数
    pub async fn count_pengumpulan_by_tugas_impl(
        &self,
        tugas_ids: &[i64],
    ) -> Result<HashMap<i64, i64>> {
        let mut counts: HashMap<i64, i64> = tugas_ids.iter().map(|id| (*id, 0)).collect();
        if tugas_ids.is_empty() {
            return Ok(counts);
        }

        let rows = PengumpulanEntity::find()
            .select_only()
            .column(PengumpulanColumn::TugasId)
            .filter(PengumpulanColumn::TugasId.is_in(tugas_ids.to_vec()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("统计提交数失败", e))?;

        for tugas_id in rows {
            *counts.entry(tugas_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// 学生在这些作业下的提交
    pub async fn list_pengumpulan_mahasiswa_impl(
        &self,
        mahasiswa_id: i64,
        tugas_ids: &[i64],
    ) -> Result<Vec<Pengumpulan>> {
        if tugas_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = PengumpulanEntity::find()
            .filter(PengumpulanColumn::MahasiswaId.eq(mahasiswa_id))
            .filter(PengumpulanColumn::TugasId.is_in(tugas_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询学生提交失败", e))?;

        Ok(result.into_iter().map(|m| m.into_pengumpulan()).collect())
    }

    /// 通过 ID 获取提交
    pub async fn get_pengumpulan_by_id_impl(&self, id: i64) -> Result<Option<Pengumpulan>> {
        let result = PengumpulanEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询提交失败", e))?;

        Ok(result.map(|m| m.into_pengumpulan()))
    }

    /// 学生对某作业的提交
    pub async fn get_pengumpulan_impl(
        &self,
        tugas_id: i64,
        mahasiswa_id: i64,
    ) -> Result<Option<Pengumpulan>> {
        let result = PengumpulanEntity::find()
            .filter(PengumpulanColumn::TugasId.eq(tugas_id))
            .filter(PengumpulanColumn::MahasiswaId.eq(mahasiswa_id))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询提交失败", e))?;

        Ok(result.map(|m| m.into_pengumpulan()))
    }

    /// 提交或覆盖提交，覆盖时清除评分
    pub async fn simpan_pengumpulan_impl(&self, req: NewPengumpulan) -> Result<Pengumpulan> {
        let now = Utc::now().timestamp();

        let existing = PengumpulanEntity::find()
            .filter(PengumpulanColumn::TugasId.eq(req.tugas_id))
            .filter(PengumpulanColumn::MahasiswaId.eq(req.mahasiswa_id))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询提交失败", e))?;

        let saved = match existing {
            Some(row) => {
                let mut model: PengumpulanActiveModel = row.into();
                model.konten = Set(req.konten);
                model.lampiran_url = Set(req.lampiran_url);
                model.terlambat = Set(req.terlambat);
                model.nilai = Set(None);
                model.komentar = Set(None);
                model.dinilai_oleh = Set(None);
                model.dinilai_pada = Set(None);
                model.dikumpulkan_pada = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| SiakadError::db("更新提交失败", e))?
            }
            None => {
                let model = PengumpulanActiveModel {
                    tugas_id: Set(req.tugas_id),
                    mahasiswa_id: Set(req.mahasiswa_id),
                    konten: Set(req.konten),
                    lampiran_url: Set(req.lampiran_url),
                    terlambat: Set(req.terlambat),
                    nilai: Set(None),
                    komentar: Set(None),
                    dinilai_oleh: Set(None),
                    dikumpulkan_pada: Set(now),
                    dinilai_pada: Set(None),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| SiakadError::db("创建提交失败", e))?
            }
        };

        Ok(saved.into_pengumpulan())
    }

    /// 作业的全部提交（附带学生信息）
    pub async fn list_pengumpulan_by_tugas_impl(
        &self,
        tugas_id: i64,
    ) -> Result<Vec<PengumpulanDetail>> {
        let rows = PengumpulanEntity::find()
            .filter(PengumpulanColumn::TugasId.eq(tugas_id))
            .order_by_asc(PengumpulanColumn::DikumpulkanPada)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询提交列表失败", e))?;

        let mahasiswa_ids: Vec<i64> = rows.iter().map(|m| m.mahasiswa_id).collect();
        let mahasiswa_map = self.mahasiswa_map(&mahasiswa_ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let mahasiswa = mahasiswa_map.get(&m.mahasiswa_id)?.clone();
                Some(PengumpulanDetail {
                    pengumpulan: m.into_pengumpulan(),
                    mahasiswa,
                })
            })
            .collect())
    }

    /// 批改提交
    pub async fn nilai_pengumpulan_impl(
        &self,
        id: i64,
        nilai: f64,
        komentar: Option<String>,
        dinilai_oleh: i64,
    ) -> Result<Option<Pengumpulan>> {
        let Some(row) = PengumpulanEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询提交失败", e))?
        else {
            return Ok(None);
        };

        let dinilai_pada: DateTime<Utc> = Utc::now();
        let mut model: PengumpulanActiveModel = row.into();
        model.nilai = Set(Some(nilai));
        model.komentar = Set(komentar);
        model.dinilai_oleh = Set(Some(dinilai_oleh));
        model.dinilai_pada = Set(Some(dinilai_pada.timestamp()));

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SiakadError::db("保存评分失败", e))?;

        Ok(Some(updated.into_pengumpulan()))
    }
}
