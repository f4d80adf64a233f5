use std::collections::HashMap;

use crate::error::{Result, TardyError};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Splits words into the employee name and `key:value` fields.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(char::is_whitespace) {
                metadata.insert(key.to_ascii_lowercase(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

/// Resolves a key by exact match, alias, then unique prefix.
pub fn expand_key(key: &str, candidates: &[&str], aliases: &[(&str, &str)]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    if let Some((_, target)) = aliases.iter().find(|(alias, _)| *alias == key) {
        return Ok(target.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(TardyError::validation(format!("Unknown key: '{}'", key))),
        _ => Err(TardyError::validation(format!(
            "Ambiguous key: '{}' matches {:?}",
            key, matches
        ))),
    }
}
