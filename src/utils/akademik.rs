//! 学分与成绩计算
//!
//! 纯函数，不依赖存储层，便于单元测试。

use crate::config::AkademikConfig;
use crate::errors::SiakadError;

/// 字母等级对照表：(最低分, 字母, 绩点)，按分数降序
const SKALA_NILAI: &[(f64, &str, f64)] = &[
    (85.0, "A", 4.0),
    (80.0, "A-", 3.7),
    (75.0, "B+", 3.3),
    (70.0, "B", 3.0),
    (65.0, "B-", 2.7),
    (60.0, "C+", 2.3),
    (55.0, "C", 2.0),
    (40.0, "D", 1.0),
];

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按配置权重计算总评，权重按其总和归一化
pub fn nilai_akhir(config: &AkademikConfig, tugas: f64, uts: f64, uas: f64) -> f64 {
    let total_bobot = config.bobot_tugas + config.bobot_uts + config.bobot_uas;
    if total_bobot <= 0.0 {
        return 0.0;
    }
    let sum = tugas * config.bobot_tugas + uts * config.bobot_uts + uas * config.bobot_uas;
    round2(sum / total_bobot)
}

/// 总评对应的字母等级与绩点
pub fn huruf_mutu(nilai_akhir: f64) -> (&'static str, f64) {
    SKALA_NILAI
        .iter()
        .find(|(min, _, _)| nilai_akhir >= *min)
        .map(|(_, huruf, bobot)| (*huruf, *bobot))
        .unwrap_or(("E", 0.0))
}

/// 加权平均绩点 Σ(bobot × sks) / Σ sks，没有学分时为 0
pub fn indeks_prestasi<I>(items: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let (mutu, sks) = items
        .into_iter()
        .fold((0.0_f64, 0_i32), |(mutu, sks), (bobot, item_sks)| {
            (mutu + bobot * f64::from(item_sks), sks + item_sks)
        });
    if sks <= 0 {
        return 0.0;
    }
    round2(mutu / f64::from(sks))
}

/// 出勤率百分比，没有场次时为 0
pub fn persentase_kehadiran(hadir: i64, total_sesi: i64) -> f64 {
    if total_sesi <= 0 {
        return 0.0;
    }
    round2(hadir as f64 / total_sesi as f64 * 100.0)
}

/// 学期学分上限检查
pub fn cek_batas_sks(total_sks: i32, max_sks: i32) -> Result<(), SiakadError> {
    if total_sks > max_sks {
        return Err(SiakadError::credit_limit(format!(
            "Total SKS {total_sks} exceeds the limit of {max_sks}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AkademikConfig {
        AkademikConfig {
            max_sks: 24,
            bobot_tugas: 30.0,
            bobot_uts: 30.0,
            bobot_uas: 40.0,
            durasi_presensi_menit: 15,
        }
    }

    #[test]
    fn test_nilai_akhir_weighted() {
        // 80*0.3 + 70*0.3 + 90*0.4 = 81
        assert_eq!(nilai_akhir(&config(), 80.0, 70.0, 90.0), 81.0);
        assert_eq!(nilai_akhir(&config(), 77.7, 66.6, 55.5), 65.49);
    }

    #[test]
    fn test_nilai_akhir_zero_weights() {
        let mut cfg = config();
        cfg.bobot_tugas = 0.0;
        cfg.bobot_uts = 0.0;
        cfg.bobot_uas = 0.0;
        assert_eq!(nilai_akhir(&cfg, 100.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_huruf_boundaries() {
        assert_eq!(huruf_mutu(100.0), ("A", 4.0));
        assert_eq!(huruf_mutu(85.0), ("A", 4.0));
        assert_eq!(huruf_mutu(84.99), ("A-", 3.7));
        assert_eq!(huruf_mutu(75.0), ("B+", 3.3));
        assert_eq!(huruf_mutu(65.0), ("B-", 2.7));
        assert_eq!(huruf_mutu(55.0), ("C", 2.0));
        assert_eq!(huruf_mutu(54.9), ("D", 1.0));
        assert_eq!(huruf_mutu(40.0), ("D", 1.0));
        assert_eq!(huruf_mutu(39.99), ("E", 0.0));
        assert_eq!(huruf_mutu(0.0), ("E", 0.0));
    }

    #[test]
    fn test_indeks_prestasi() {
        // (4.0*3 + 3.0*2 + 2.0*3) / 8 = 3.0
        assert_eq!(indeks_prestasi([(4.0, 3), (3.0, 2), (2.0, 3)]), 3.0);
        // (3.7*3 + 3.3*2) / 5 = 3.54
        assert_eq!(indeks_prestasi([(3.7, 3), (3.3, 2)]), 3.54);
        assert_eq!(indeks_prestasi(Vec::<(f64, i32)>::new()), 0.0);
    }

    #[test]
    fn test_persentase_kehadiran() {
        assert_eq!(persentase_kehadiran(2, 3), 66.67);
        assert_eq!(persentase_kehadiran(14, 14), 100.0);
        assert_eq!(persentase_kehadiran(0, 0), 0.0);
    }

    #[test]
    fn test_batas_sks() {
        assert!(cek_batas_sks(24, 24).is_ok());
        let err = cek_batas_sks(26, 24).unwrap_err();
        assert_eq!(err.code(), "E013");
        assert!(err.message().contains("26"));
    }
}
