//! pt-BR 数字格式化

/// 按 pt-BR 习惯给整数部分加千位分隔符
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// 拆分为整数与小数部分（小数位数固定）
fn split_fixed(value: f64, decimals: usize) -> (String, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    match fixed.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.to_string()),
        None => (fixed, String::new()),
    }
}

fn is_negative_after_rounding(value: f64, decimals: usize) -> bool {
    value < 0.0 && format!("{:.*}", decimals, value.abs()).chars().any(|c| matches!(c, '1'..='9'))
}

/// 格式化为巴西雷亚尔，例如 `R$ 1.234,56`（货币符号后为不换行空格）
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("R$\u{a0}{}", value);
    }

    let (int, frac) = split_fixed(value, 2);
    let sign = if is_negative_after_rounding(value, 2) { "-" } else { "" };
    format!("{}R$\u{a0}{},{}", sign, group_thousands(&int), frac)
}

/// 格式化百分比，保留 1 到 2 位小数，例如 `85,5%`
///
/// 输入为百分数值（85.5 表示 85.5%）。
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}%", value);
    }

    let (int, mut frac) = split_fixed(value, 2);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }
    let sign = if is_negative_after_rounding(value, 2) { "-" } else { "" };
    format!("{}{},{}%", sign, group_thousands(&int), frac)
}
