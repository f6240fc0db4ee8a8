use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 允许 12.345.678-5、12345678-5 与 123456785 三种写法
static RUT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}(?:\.?\d{3}){2})-?([\dkK])$").expect("Invalid RUT regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 计算 RUT 校验位（模 11）
fn rut_check_digit(body: &str) -> char {
    let sum: u32 = body
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .zip([2, 3, 4, 5, 6, 7].into_iter().cycle())
        .map(|(digit, factor)| digit * factor)
        .sum();
    match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10).unwrap_or('0'),
    }
}

/// 校验并规范化智利 RUT
///
/// 成功时返回 `12345678-5` 形式（去掉点号，校验位大写）。
pub fn normalize_rut(rut: &str) -> Result<String, &'static str> {
    let trimmed = rut.trim();
    let captures = RUT_RE.captures(trimmed).ok_or("RUT format is invalid")?;
    let body: String = captures[1].chars().filter(|c| c.is_ascii_digit()).collect();
    let check = captures[2].to_ascii_uppercase();

    if check.chars().next() != Some(rut_check_digit(&body)) {
        return Err("RUT check digit is invalid");
    }
    Ok(format!("{body}-{check}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ruts_are_normalized() {
        assert_eq!(normalize_rut("12.345.678-5").unwrap(), "12345678-5");
        assert_eq!(normalize_rut("12345678-5").unwrap(), "12345678-5");
        assert_eq!(normalize_rut("11.111.111-1").unwrap(), "11111111-1");
        assert_eq!(normalize_rut(" 123456785 ").unwrap(), "12345678-5");
    }

    #[test]
    fn test_check_digit_k_and_zero() {
        assert_eq!(rut_check_digit("10000013"), 'K');
        assert_eq!(normalize_rut("10.000.013-k").unwrap(), "10000013-K");
        assert_eq!(rut_check_digit("10000004"), '0');
    }

    #[test]
    fn test_invalid_ruts() {
        assert_eq!(normalize_rut("12.345.678-4"), Err("RUT check digit is invalid"));
        assert_eq!(normalize_rut("abc"), Err("RUT format is invalid"));
        assert_eq!(normalize_rut(""), Err("RUT format is invalid"));
    }

    #[test]
    fn test_username_and_email() {
        assert!(validate_username("maria.perez").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_email("maria@colegio.cl").is_ok());
        assert!(validate_email("maria@").is_err());
    }
}
