use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::mata_kuliah::{ActiveModel, Column, Entity as MataKuliahEntity};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SiakadError};
use crate::models::{
    PaginationInfo, normalize_page,
    mata_kuliah::{
        entities::{MataKuliah, MataKuliahDetail},
        requests::{CreateMataKuliahRequest, MataKuliahListQuery, UpdateMataKuliahRequest},
        responses::MataKuliahListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_mata_kuliah_impl(&self, req: CreateMataKuliahRequest) -> Result<MataKuliah> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            kode: Set(req.kode.trim().to_uppercase()),
            nama: Set(req.nama.trim().to_string()),
            sks: Set(req.sks),
            semester: Set(req.semester),
            dosen_id: Set(req.dosen_id),
            kuota: Set(req.kuota),
            hari: Set(req.hari),
            jam_mulai: Set(req.jam_mulai),
            jam_selesai: Set(req.jam_selesai),
            ruangan: Set(req.ruangan),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SiakadError::db("创建课程失败", e))?;

        Ok(result.into_mata_kuliah())
    }

    /// 通过 ID 获取课程
    pub async fn get_mata_kuliah_by_id_impl(&self, id: i64) -> Result<Option<MataKuliah>> {
        let result = MataKuliahEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询课程失败", e))?;

        Ok(result.map(|m| m.into_mata_kuliah()))
    }

    /// 批量获取课程
    pub async fn get_mata_kuliah_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<MataKuliah>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = MataKuliahEntity::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Kode)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("批量查询课程失败", e))?;

        Ok(result.into_iter().map(|m| m.into_mata_kuliah()).collect())
    }

    /// 通过课程代码获取课程
    pub async fn get_mata_kuliah_by_kode_impl(&self, kode: &str) -> Result<Option<MataKuliah>> {
        let result = MataKuliahEntity::find()
            .filter(Column::Kode.eq(kode.trim().to_uppercase()))
            .one(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询课程失败", e))?;

        Ok(result.map(|m| m.into_mata_kuliah()))
    }

    /// 分页列出课程（附带授课教师姓名）
    pub async fn list_mata_kuliah_with_pagination_impl(
        &self,
        query: MataKuliahListQuery,
    ) -> Result<MataKuliahListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = MataKuliahEntity::find();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(Column::Kode.contains(search))
                    .add(Column::Nama.contains(search)),
            );
        }

        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }

        if let Some(dosen_id) = query.dosen_id {
            select = select.filter(Column::DosenId.eq(dosen_id));
        }

        select = select
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Kode);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SiakadError::db("查询课程总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SiakadError::db("查询课程页数失败", e))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SiakadError::db("查询课程列表失败", e))?;

        // 批量查询授课教师
        let dosen_ids: Vec<i64> = rows.iter().map(|m| m.dosen_id).collect();
        let dosen_map: HashMap<i64, String> = if dosen_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(dosen_ids))
                .all(&self.db)
                .await
                .map_err(|e| SiakadError::db("查询授课教师失败", e))?
                .into_iter()
                .map(|u| (u.id, u.nama))
                .collect()
        };

        let items = rows
            .into_iter()
            .map(|m| {
                let nama_dosen = dosen_map.get(&m.dosen_id).cloned();
                MataKuliahDetail {
                    mata_kuliah: m.into_mata_kuliah(),
                    nama_dosen,
                }
            })
            .collect();

        Ok(MataKuliahListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 教师讲授的课程
    pub async fn list_mata_kuliah_by_dosen_impl(&self, dosen_id: i64) -> Result<Vec<MataKuliah>> {
        let result = MataKuliahEntity::find()
            .filter(Column::DosenId.eq(dosen_id))
            .order_by_asc(Column::Semester)
            .order_by_asc(Column::Kode)
            .all(&self.db)
            .await
            .map_err(|e| SiakadError::db("查询教师课程失败", e))?;

        Ok(result.into_iter().map(|m| m.into_mata_kuliah()).collect())
    }

    /// 更新课程
    pub async fn update_mata_kuliah_impl(
        &self,
        id: i64,
        update: UpdateMataKuliahRequest,
    ) -> Result<Option<MataKuliah>> {
        if self.get_mata_kuliah_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(kode) = update.kode {
            model.kode = Set(kode.trim().to_uppercase());
        }
        if let Some(nama) = update.nama {
            model.nama = Set(nama.trim().to_string());
        }
        if let Some(sks) = update.sks {
            model.sks = Set(sks);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }
        if let Some(dosen_id) = update.dosen_id {
            model.dosen_id = Set(dosen_id);
        }
        if let Some(kuota) = update.kuota {
            model.kuota = Set(kuota);
        }
        if let Some(hari) = update.hari {
            model.hari = Set(Some(hari));
        }
        if let Some(jam_mulai) = update.jam_mulai {
            model.jam_mulai = Set(Some(jam_mulai));
        }
        if let Some(jam_selesai) = update.jam_selesai {
            model.jam_selesai = Set(Some(jam_selesai));
        }
        if let Some(ruangan) = update.ruangan {
            model.ruangan = Set(Some(ruangan));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SiakadError::db("更新课程失败", e))?;

        self.get_mata_kuliah_by_id_impl(id).await
    }

    /// 删除课程（选课、考勤、作业、成绩随外键级联删除）
    pub async fn delete_mata_kuliah_impl(&self, id: i64) -> Result<bool> {
        let result = MataKuliahEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SiakadError::db("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
