//! Prompt building for fallback generation

use super::GenerationStyle;

/// Build the generation prompt for a question.
///
/// The persona and word limit are advisory style only; the generator may
/// ignore them and its output is returned unaltered either way.
pub fn build_prompt(question: &str, style: &GenerationStyle) -> String {
    let mut prompt = String::new();

    if let Some(persona) = &style.persona {
        prompt.push_str(persona);
        prompt.push(' ');
    }

    prompt.push_str("ให้คำแนะนำเกี่ยวกับ: ");
    prompt.push_str(question);

    if let Some(limit) = style.word_limit {
        prompt.push_str(&format!(" โดยคำตอบยาวไม่เกิน {limit} คำ"));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_prompt() {
        let style = GenerationStyle::default();
        assert_eq!(
            build_prompt("ปลูกกล้วยยังไง", &style),
            "ให้คำแนะนำเกี่ยวกับ: ปลูกกล้วยยังไง"
        );
    }

    #[test]
    fn test_prompt_with_persona_and_limit() {
        let style = GenerationStyle {
            persona: Some("ผู้ตอบเป็นชาวสวนกล้วยผู้ชาย".to_string()),
            word_limit: Some(20),
        };
        assert_eq!(
            build_prompt("ปลูกกล้วยยังไง", &style),
            "ผู้ตอบเป็นชาวสวนกล้วยผู้ชาย ให้คำแนะนำเกี่ยวกับ: ปลูกกล้วยยังไง โดยคำตอบยาวไม่เกิน 20 คำ"
        );
    }
}
