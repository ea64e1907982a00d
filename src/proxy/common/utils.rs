// 工具函数

/// 日志中响应预览的最大字符数
pub const PREVIEW_CHARS: usize = 500;

/// 按字符截断，用于日志预览 (不会切断 UTF-8)
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut s: String = text.chars().take(max_chars).collect();
    s.push('…');
    s
}

/// token 只打印前缀
pub fn mask_token(token: &str) -> String {
    let head: String = token.chars().take(8).collect();
    format!("{}...", head)
}
