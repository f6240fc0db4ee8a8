/// 转义 LIKE 模式中的通配符，避免用户输入被当作模式解析
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like_pattern;

    #[test]
    fn test_escape_wildcards() {
        assert_eq!(escape_like_pattern("50%_a"), "50\\%\\_a");
        assert_eq!(escape_like_pattern("Kinder A"), "Kinder A");
    }
}
