//! 预导入模块，方便使用

pub use super::krs::{ActiveModel as KrsActiveModel, Entity as KrsEntity, Model as KrsModel};
pub use super::mata_kuliah::{
    ActiveModel as MataKuliahActiveModel, Entity as MataKuliahEntity, Model as MataKuliahModel,
};
pub use super::nilai::{
    ActiveModel as NilaiActiveModel, Entity as NilaiEntity, Model as NilaiModel,
};
pub use super::pengumpulan::{
    ActiveModel as PengumpulanActiveModel, Entity as PengumpulanEntity,
    Model as PengumpulanModel,
};
pub use super::presensi::{
    ActiveModel as PresensiActiveModel, Entity as PresensiEntity, Model as PresensiModel,
};
pub use super::sesi_presensi::{
    ActiveModel as SesiPresensiActiveModel, Entity as SesiPresensiEntity,
    Model as SesiPresensiModel,
};
pub use super::tugas::{ActiveModel as TugasActiveModel, Entity as TugasEntity, Model as TugasModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
