// ==========================================
// 公司方案目录 - 键归一化
// ==========================================
// 职责: 跨表匹配用的标识归一化
// - norm:   小写 + 去首尾空白（公司 id / 名称）
// - keyify: norm + 引号/标点/连字符/空白规整（问题描述）
// ==========================================

/// 小写 + 去首尾空白
pub fn norm(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 问题描述归一化
///
/// # 规则
/// 1. norm
/// 2. 不间断空格 → 空格，弯引号 → 直引号
/// 3. 去掉字母/数字/空白/`-`/`_` 以外的字符
/// 4. `-` `_` → 空格，连续空白合并为一个空格
///
/// # 性质
/// - 幂等: keyify(keyify(s)) == keyify(s)
pub fn keyify(value: &str) -> String {
    let lowered = norm(value);
    let mut key = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for ch in lowered.chars().map(fold_quote) {
        if ch.is_alphanumeric() {
            if pending_space && !key.is_empty() {
                key.push(' ');
            }
            pending_space = false;
            key.push(ch);
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_space = true;
        }
        // 其余标点直接丢弃，不产生分隔
    }

    key
}

/// 不间断空格与弯引号折叠为 ASCII
fn fold_quote(ch: char) -> char {
    match ch {
        '\u{00A0}' => ' ',
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
        other => other,
    }
}
