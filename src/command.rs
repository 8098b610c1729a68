use crate::menu::MenuKey;

/// Parse one key-script token into the keys it stands for.
///
/// Named keys (`up`, `enter`, `esc`, ...) map to a single key, `type:TEXT`
/// expands to one `Char` per character, and any other single character is
/// taken literally.
pub fn parse_keys(token: &str) -> Result<Vec<MenuKey>, String> {
    match token.to_lowercase().as_str() {
        "up" => return Ok(vec![MenuKey::Up]),
        "down" => return Ok(vec![MenuKey::Down]),
        "enter" | "return" => return Ok(vec![MenuKey::Enter]),
        "esc" | "escape" => return Ok(vec![MenuKey::Escape]),
        "backspace" => return Ok(vec![MenuKey::Backspace]),
        "ctrl+c" | "interrupt" => return Ok(vec![MenuKey::Interrupt]),
        "space" => return Ok(vec![MenuKey::Char(' ')]),
        _ => {}
    }

    if let Some(text) = token.strip_prefix("type:") {
        if text.is_empty() {
            return Err("Empty text in 'type:' key".to_string());
        }
        return Ok(text.chars().map(MenuKey::Char).collect());
    }

    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(vec![MenuKey::Char(c)]),
        _ => Err(format!("Unknown key: {}", token)),
    }
}

/// Parse a whole key script, one token per entry
pub fn parse_key_script<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<MenuKey>, String> {
    let mut keys = Vec::new();
    for token in tokens {
        let token = token.as_ref().trim();
        let parsed = parse_keys(token).map_err(|e| format!("Invalid key '{}': {}", token, e))?;
        keys.extend(parsed);
    }
    Ok(keys)
}
