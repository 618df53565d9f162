use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::entity::krs::{ActiveModel, Column, Entity as KrsEntity};
use crate::entity::mata_kuliah::{Column as MataKuliahColumn, Entity as MataKuliahEntity};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SiakadError};
use crate::models::{
    PaginationInfo, normalize_page,
    krs::{
        entities::{Krs, KrsDetail, KrsStatus, PengajuanKrs, Periode},
        responses::PengajuanListResponse,
    },
    mata_kuliah::{entities::MataKuliah, responses::PesertaItem},
    users::entities::MahasiswaRingkas,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生某学期的选课（附课程信息）
    pub async fn list_krs_mahasiswa_impl(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<KrsDetail>> {
        let rows = KrsEntity::find()
            .filter(Column::MahasiswaId.eq(mahasiswa_id))
            .filter(Column::TahunAjaran.eq(tahun_ajaran))
            .filter(Column::Periode.eq(periode.as_str()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询选课记录失败", e))?;

        let krs: Vec<Krs> = rows.into_iter().map(|m| m.into_krs()).collect();
        self.attach_mata_kuliah(krs).await
    }

    /// 为选课记录附加课程信息
    pub(crate) async fn attach_mata_kuliah(&self, krs: Vec<Krs>) -> Result<Vec<KrsDetail>> {
        let ids: Vec<i64> = krs.iter().map(|k| k.mata_kuliah_id).collect();
        let mata_kuliah_map = self.mata_kuliah_map(&ids).await?;

        Ok(krs
            .into_iter()
            .filter_map(|k| {
                let mata_kuliah = mata_kuliah_map.get(&k.mata_kuliah_id)?.clone();
                Some(KrsDetail { krs: k, mata_kuliah })
            })
            .collect())
    }

    pub(crate) async fn mata_kuliah_map(&self, ids: &[i64]) -> Result<HashMap<i64, MataKuliah>> {
        Ok(self
            .get_mata_kuliah_by_ids_impl(ids)
            .await?
            .into_iter()
            .map(|mk| (mk.id, mk))
            .collect())
    }

    pub(crate) async fn mahasiswa_map(&self, ids: &[i64]) -> Result<HashMap<i64, MahasiswaRingkas>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let users = Users::find()
            .filter(UserColumn::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询学生信息失败", e))?;

        Ok(users.into_iter().map(|u| (u.id, u.into_ringkas())).collect())
    }

    /// 通过 ID 获取选课记录
    pub async fn get_krs_by_id_impl(&self, id: i64) -> Result<Option<Krs>> {
        let result = KrsEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询选课记录失败", e))?;

        Ok(result.map(|m| m.into_krs()))
    }

    /// 各课程某学期未被驳回的选课人数
    pub async fn count_krs_aktif_by_mata_kuliah_impl(
        &self,
        mata_kuliah_ids: &[i64],
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<HashMap<i64, i64>> {
        let mut counts: HashMap<i64, i64> = mata_kuliah_ids.iter().map(|id| (*id, 0)).collect();
        if mata_kuliah_ids.is_empty() {
            return Ok(counts);
        }

        let rows: Vec<i64> = KrsEntity::find()
            .select_only()
            .column(Column::MataKuliahId)
            .filter(Column::MataKuliahId.is_in(mata_kuliah_ids.to_vec()))
            .filter(Column::TahunAjaran.eq(tahun_ajaran))
            .filter(Column::Periode.eq(periode.as_str()))
            .filter(Column::Status.ne(KrsStatus::Ditolak.as_str()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("统计选课人数失败", e))?;

        for mata_kuliah_id in rows {
            *counts.entry(mata_kuliah_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// 在同一事务中批量创建选课记录，任一失败则全部回滚
    pub async fn create_krs_batch_impl(
        &self,
        mahasiswa_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
        mata_kuliah_ids: &[i64],
    ) -> Result<Vec<Krs>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SiakadError::db("开启事务失败", e))?;

        let mut created = Vec::with_capacity(mata_kuliah_ids.len());
        for mata_kuliah_id in mata_kuliah_ids {
            let model = ActiveModel {
                mahasiswa_id: Set(mahasiswa_id),
                mata_kuliah_id: Set(*mata_kuliah_id),
                tahun_ajaran: Set(tahun_ajaran.to_string()),
                periode: Set(periode.to_string()),
                status: Set(KrsStatus::Diajukan.to_string()),
                catatan: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            // 出错时 txn 被丢弃，自动回滚
            let inserted = model
                .insert(&txn)
                .await
                .map_err(|e| SiakadError::db("创建选课记录失败", e))?;
            created.push(inserted.into_krs());
        }

        txn.commit()
            .await
            .map_err(|e| SiakadError::db("提交事务失败", e))?;

        Ok(created)
    }

    /// 删除选课记录
    pub async fn delete_krs_impl(&self, id: i64) -> Result<bool> {
        let result = KrsEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SiakadError::db("删除选课记录失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 审核选课
    pub async fn update_krs_status_impl(
        &self,
        id: i64,
        status: KrsStatus,
        catatan: Option<String>,
    ) -> Result<Option<Krs>> {
        if self.get_krs_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            catatan: Set(catatan),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SiakadError::db("更新选课状态失败", e))?;

        self.get_krs_by_id_impl(id).await
    }

    /// 待审核选课（教师仅能看到自己讲授的课程）
    pub async fn list_pengajuan_krs_impl(
        &self,
        dosen_id: Option<i64>,
        mata_kuliah_id: Option<i64>,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<PengajuanListResponse> {
        let (page, size) = normalize_page(page, size);

        let mut select = KrsEntity::find()
            .filter(Column::Status.eq(KrsStatus::Diajukan.as_str()));

        if let Some(dosen_id) = dosen_id {
            let diampu: Vec<i64> = MataKuliahEntity::find()
                .select_only()
                .column(MataKuliahColumn::Id)
                .filter(MataKuliahColumn::DosenId.eq(dosen_id))
                .into_tuple::<i64>()
                .all(&self.db)
                .await
                .map_err(|e| SiakadError::db("查询教师课程失败", e))?;
            select = select.filter(Column::MataKuliahId.is_in(diampu));
        }

        if let Some(mata_kuliah_id) = mata_kuliah_id {
            select = select.filter(Column::MataKuliahId.eq(mata_kuliah_id));
        }

        select = select.order_by_asc(Column::CreatedAt).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SiakadError::db("查询待审核总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SiakadError::db("查询待审核页数失败", e))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SiakadError::db("查询待审核列表失败", e))?;

        let mata_kuliah_ids: Vec<i64> = rows.iter().map(|m| m.mata_kuliah_id).collect();
        let mahasiswa_ids: Vec<i64> = rows.iter().map(|m| m.mahasiswa_id).collect();
        let mata_kuliah_map = self.mata_kuliah_map(&mata_kuliah_ids).await?;
        let mahasiswa_map = self.mahasiswa_map(&mahasiswa_ids).await?;

        let items = rows
            .into_iter()
            .filter_map(|m| {
                let mata_kuliah = mata_kuliah_map.get(&m.mata_kuliah_id)?.clone();
                let mahasiswa = mahasiswa_map.get(&m.mahasiswa_id)?.clone();
                Some(PengajuanKrs {
                    krs: m.into_krs(),
                    mata_kuliah,
                    mahasiswa,
                })
            })
            .collect();

        Ok(PengajuanListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 课程某学期已批准的学生
    pub async fn list_peserta_impl(
        &self,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Vec<PesertaItem>> {
        let rows = KrsEntity::find()
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .filter(Column::TahunAjaran.eq(tahun_ajaran))
            .filter(Column::Periode.eq(periode.as_str()))
            .filter(Column::Status.eq(KrsStatus::Disetujui.as_str()))
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询课程学生失败", e))?;

        let mahasiswa_ids: Vec<i64> = rows.iter().map(|m| m.mahasiswa_id).collect();
        let mahasiswa_map = self.mahasiswa_map(&mahasiswa_ids).await?;

        let mut items: Vec<PesertaItem> = rows
            .into_iter()
            .filter_map(|m| {
                let mahasiswa = mahasiswa_map.get(&m.mahasiswa_id)?.clone();
                Some(PesertaItem {
                    krs_id: m.id,
                    mahasiswa,
                })
            })
            .collect();
        items.sort_by(|a, b| a.mahasiswa.nomor_induk.cmp(&b.mahasiswa.nomor_induk));

        Ok(items)
    }

    /// 课程所有已批准的学生（跨学期去重）
    pub async fn list_mahasiswa_terdaftar_impl(
        &self,
        mata_kuliah_id: i64,
    ) -> Result<Vec<MahasiswaRingkas>> {
        let ids: BTreeSet<i64> = KrsEntity::find()
            .select_only()
            .column(Column::MahasiswaId)
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .filter(Column::Status.eq(KrsStatus::Disetujui.as_str()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询课程学生失败", e))?
            .into_iter()
            .collect();

        let ids: Vec<i64> = ids.into_iter().collect();
        let mut mahasiswa: Vec<MahasiswaRingkas> =
            self.mahasiswa_map(&ids).await?.into_values().collect();
        mahasiswa.sort_by(|a, b| a.nomor_induk.cmp(&b.nomor_induk));

        Ok(mahasiswa)
    }

    /// 学生是否持有该课程已批准的选课
    pub async fn is_mahasiswa_terdaftar_impl(
        &self,
        mahasiswa_id: i64,
        mata_kuliah_id: i64,
    ) -> Result<bool> {
        let count = KrsEntity::find()
            .filter(Column::MahasiswaId.eq(mahasiswa_id))
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .filter(Column::Status.eq(KrsStatus::Disetujui.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询选课状态失败", e))?;

        Ok(count > 0)
    }

    /// 指定学期已批准的选课
    pub async fn get_krs_disetujui_impl(
        &self,
        mahasiswa_id: i64,
        mata_kuliah_id: i64,
        tahun_ajaran: &str,
        periode: Periode,
    ) -> Result<Option<Krs>> {
        let result = KrsEntity::find()
            .filter(Column::MahasiswaId.eq(mahasiswa_id))
            .filter(Column::MataKuliahId.eq(mata_kuliah_id))
            .filter(Column::TahunAjaran.eq(tahun_ajaran))
            .filter(Column::Periode.eq(periode.as_str()))
            .filter(Column::Status.eq(KrsStatus::Disetujui.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询选课记录失败", e))?;

        Ok(result.map(|m| m.into_krs()))
    }
}
