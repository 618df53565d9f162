use rand::Rng;

const KODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 考勤签到码长度
pub const KODE_PRESENSI_LEN: usize = 6;

/// 生成指定长度的大写字母数字随机码
pub fn generate_random_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| KODE_CHARSET[rng.random_range(0..KODE_CHARSET.len())] as char)
        .collect()
}

/// 考勤签到码
pub fn generate_kode_presensi() -> String {
    generate_random_code(KODE_PRESENSI_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kode_shape() {
        for _ in 0..50 {
            let kode = generate_kode_presensi();
            assert_eq!(kode.len(), KODE_PRESENSI_LEN);
            assert!(
                kode.chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn test_custom_length() {
        assert_eq!(generate_random_code(16).len(), 16);
        assert!(generate_random_code(0).is_empty());
    }
}
