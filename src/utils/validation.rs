//! 表单输入校验

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// CPF：去掉非数字字符后恰好 11 位（不校验检查位）
pub fn validate_cpf(cpf: &str) -> bool {
    digit_count(cpf) == 11
}

/// 电话：去掉非数字字符后 10 或 11 位（含区号）
pub fn validate_phone(phone: &str) -> bool {
    (10..=11).contains(&digit_count(phone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@furby.com.br"));
        assert!(!validate_email("ana@furby"));
        assert!(!validate_email("ana furby@x.com"));
        assert!(!validate_email("@x.com"));
    }

    #[test]
    fn test_validate_cpf() {
        assert!(validate_cpf("123.456.789-09"));
        assert!(validate_cpf("12345678909"));
        assert!(!validate_cpf("123.456.789"));
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("(11) 98765-4321"));
        assert!(validate_phone("(11) 3456-7890"));
        assert!(!validate_phone("98765-4321"));
        assert!(!validate_phone("+55 (11) 98765-4321"));
    }
}
