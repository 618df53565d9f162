use once_cell::sync::Lazy;
use regex::Regex;

// NIM / NIP：纯数字，允许中间的点号（部分学校的 NIP 写法）
static NOMOR_INDUK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)*$").expect("Invalid nomor induk regex"));

static TAHUN_AJARAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("Invalid tahun ajaran regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_nomor_induk(nomor_induk: &str) -> Result<(), &'static str> {
    // 长度校验：5 <= x <= 20
    if nomor_induk.len() < 5 || nomor_induk.len() > 20 {
        return Err("Nomor induk length must be between 5 and 20 characters");
    }
    if !NOMOR_INDUK_RE.is_match(nomor_induk) {
        return Err("Nomor induk must contain only digits");
    }
    Ok(())
}

/// 学年格式 `YYYY/YYYY+1`，例如 `2024/2025`
pub fn validate_tahun_ajaran(tahun_ajaran: &str) -> Result<(), &'static str> {
    let caps = TAHUN_AJARAN_RE
        .captures(tahun_ajaran)
        .ok_or("Tahun ajaran must use the YYYY/YYYY format")?;
    let awal: i32 = caps[1].parse().map_err(|_| "Invalid tahun ajaran")?;
    let akhir: i32 = caps[2].parse().map_err(|_| "Invalid tahun ajaran")?;
    if akhir != awal + 1 {
        return Err("Tahun ajaran must span two consecutive years");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "mahasiswa1",
        "Mahasiswa1",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nomor_induk() {
        assert!(validate_nomor_induk("2101001").is_ok());
        assert!(validate_nomor_induk("19800101.2005").is_ok());
        assert!(validate_nomor_induk("123").is_err());
        assert!(validate_nomor_induk("21A1001").is_err());
    }

    #[test]
    fn test_tahun_ajaran() {
        assert!(validate_tahun_ajaran("2024/2025").is_ok());
        assert!(validate_tahun_ajaran("2024/2026").is_err());
        assert!(validate_tahun_ajaran("2024-2025").is_err());
        assert!(validate_tahun_ajaran("24/25").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("budi@kampus.ac.id").is_ok());
        assert!(validate_email("budi@kampus").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
