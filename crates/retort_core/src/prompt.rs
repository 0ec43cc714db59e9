//! System prompt construction.
//!
//! The prompt asks the model for exactly three rebuttals, each on its own
//! line, at the requested tone intensity.

use crate::{ChatMessage, Role};

/// Intensity applied when the caller supplies none or an unmapped value.
pub const DEFAULT_INTENSITY: u8 = 5;

/// Tone label for a 1..=10 intensity level.
///
/// Out-of-range or unmapped values fall back to the medium label.
pub fn intensity_label(intensity: u8) -> &'static str {
    match intensity {
        1 => "轻微",
        2 => "温和",
        3 => "一般",
        4 => "较重",
        5 => "中等",
        6 => "较重",
        7 => "强烈",
        8 => "很强烈",
        9 => "非常强烈",
        10 => "极度强烈",
        _ => "中等",
    }
}

/// Builds the system instruction for the given intensity.
pub fn system_prompt(intensity: u8) -> String {
    format!(
        r#"你是一个专业的辩论助手，专门帮助用户生成有力的吵架回复。请根据用户提供的"对方的话"和指定的语气强度，生成3条具有说服力的回复内容。

要求：
1. 回复内容要符合指定的语气强度（{label}）
2. 内容要有逻辑性和说服力
3. 语言要自然流畅，符合日常对话习惯
4. 每条回复都要独立完整
5. 回复长度适中，一般在50-200字之间
6. 避免使用过分的侮辱性词汇，保持适当的争议性

请直接返回3条回复内容，每条用换行分隔，不要包含任何前缀或说明文字。"#,
        label = intensity_label(intensity)
    )
}

/// Builds the user-role payload carrying the opponent's message.
pub fn user_message(opponent_message: &str) -> String {
    format!("对方的话：{opponent_message}")
}

/// Builds the two-message conversation context for one generation call.
pub fn conversation(opponent_message: &str, intensity: u8) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(Role::System, system_prompt(intensity)),
        ChatMessage::new(Role::User, user_message(opponent_message)),
    ]
}
