use chrono::{DateTime, Utc};

use super::SeaOrmStorage;
use crate::entity::presensi::{ActiveModel, Column, Entity as PresensiEntity};
use crate::entity::sesi_presensi::{
    ActiveModel as SesiActiveModel, Column as SesiColumn, Entity as SesiEntity,
};
use crate::errors::{Result, SiakadError};
use crate::models::presensi::entities::{Presensi, PresensiDetail, SesiPresensi, StatusPresensi};
use crate::storage::NewSesi;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 开设考勤场次
    pub async fn create_sesi_impl(&self, sesi: NewSesi) -> Result<SesiPresensi> {
        let model = SesiActiveModel {
            mata_kuliah_id: Set(sesi.mata_kuliah_id),
            pertemuan_ke: Set(sesi.pertemuan_ke),
            topik: Set(sesi.topik),
            kode: Set(sesi.kode),
            waktu_mulai: Set(sesi.waktu_mulai.timestamp()),
            waktu_selesai: Set(sesi.waktu_selesai.timestamp()),
            dibuat_oleh: Set(sesi.dibuat_oleh),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiakadError::db("创建考勤场次失败", e))?;

        Ok(result.into_sesi())
    }

    /// 通过 ID 获取场次
    pub async fn get_sesi_by_id_impl(&self, id: i64) -> Result<Option<SesiPresensi>> {
        let result = SesiEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤场次失败", e))?;

        Ok(result.map(|m| m.into_sesi()))
    }

    /// 课程的全部场次，按课次排序
    pub async fn list_sesi_by_mata_kuliah_impl(
        &self,
        mata_kuliah_id: i64,
    ) -> Result<Vec<SesiPresensi>> {
        let result = SesiEntity::find()
            .filter(SesiColumn::MataKuliahId.eq(mata_kuliah_id))
            .order_by_asc(SesiColumn::PertemuanKe)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤场次失败", e))?;

        Ok(result.into_iter().map(|m| m.into_sesi()).collect())
    }

    /// 场次内的考勤记录（附带学生信息）
    pub async fn list_presensi_by_sesi_impl(&self, sesi_id: i64) -> Result<Vec<PresensiDetail>> {
        let rows = PresensiEntity::find()
            .filter(Column::SesiId.eq(sesi_id))
            .order_by_asc(Column::WaktuPresensi)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤记录失败", e))?;

        let mahasiswa_ids: Vec<i64> = rows.iter().map(|m| m.mahasiswa_id).collect();
        let mahasiswa_map = self.mahasiswa_map(&mahasiswa_ids).await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let mahasiswa = mahasiswa_map.get(&m.mahasiswa_id)?.clone();
                Some(PresensiDetail {
                    presensi: m.into_presensi(),
                    mahasiswa,
                })
            })
            .collect())
    }

    /// 课程下的考勤记录，可按学生过滤
    pub async fn list_presensi_by_mata_kuliah_impl(
        &self,
        mata_kuliah_id: i64,
        mahasiswa_id: Option<i64>,
    ) -> Result<Vec<Presensi>> {
        let sesi_ids: Vec<i64> = SesiEntity::find()
            .select_only()
            .column(SesiColumn::Id)
            .filter(SesiColumn::MataKuliahId.eq(mata_kuliah_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤场次失败", e))?;

        if sesi_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select = PresensiEntity::find().filter(Column::SesiId.is_in(sesi_ids));
        if let Some(mahasiswa_id) = mahasiswa_id {
            select = select.filter(Column::MahasiswaId.eq(mahasiswa_id));
        }

        let result = select
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤记录失败", e))?;

        Ok(result.into_iter().map(|m| m.into_presensi()).collect())
    }

    /// 学生签到，同一场次重复签到由唯一约束拒绝
    pub async fn create_presensi_impl(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
        waktu: DateTime<Utc>,
    ) -> Result<Presensi> {
        let model = ActiveModel {
            sesi_id: Set(sesi_id),
            mahasiswa_id: Set(mahasiswa_id),
            status: Set(status.to_string()),
            waktu_presensi: Set(waktu.timestamp()),
            created_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiakadError::db("保存考勤记录失败", e))?;

        Ok(result.into_presensi())
    }

    /// 教师录入考勤状态（存在则更新）
    pub async fn upsert_presensi_impl(
        &self,
        sesi_id: i64,
        mahasiswa_id: i64,
        status: StatusPresensi,
    ) -> Result<Presensi> {
        let now = Utc::now();

        let existing = PresensiEntity::find()
            .filter(Column::SesiId.eq(sesi_id))
            .filter(Column::MahasiswaId.eq(mahasiswa_id))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询考勤记录失败", e))?;

        match existing {
            Some(row) => {
                let mut model: ActiveModel = row.into();
                model.status = Set(status.to_string());
                model.waktu_presensi = Set(now.timestamp());
                let updated = model
                    .update(&self.db)
                    .await
                    .map_err(|e| SiakadError::db("更新考勤记录失败", e))?;
                Ok(updated.into_presensi())
            }
            None => {
                self.create_presensi_impl(sesi_id, mahasiswa_id, status, now)
                    .await
            }
        }
    }
}
