use std::process::Command;

use crate::error::{DexterError, Result};

const KUBECTL: &str = "kubectl";

/// Point the current kubectl context at `namespace`
pub fn set_namespace(namespace: &str) -> Result<String> {
    log::info!("☸️ set_namespace: {}", namespace);
    let output = Command::new(KUBECTL)
        .args(set_namespace_args(namespace))
        .output()?;

    if !output.status.success() {
        return Err(DexterError::Command {
            program: KUBECTL.to_string(),
            message: format!(
                "{}\n{}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            ),
        });
    }
    Ok(format!("Namespace set to: {}", namespace))
}

pub fn set_namespace_args(namespace: &str) -> Vec<String> {
    vec![
        "config".to_string(),
        "set-context".to_string(),
        "--current".to_string(),
        format!("--namespace={}", namespace),
    ]
}

/// Names of all namespaces visible to the current context
pub fn list_namespaces() -> Result<Vec<String>> {
    let output = Command::new(KUBECTL)
        .args([
            "get",
            "namespaces",
            "-o",
            "jsonpath={.items[*].metadata.name}",
        ])
        .output()?;

    if !output.status.success() {
        return Err(DexterError::Command {
            program: KUBECTL.to_string(),
            message: output.status.to_string(),
        });
    }
    Ok(parse_namespaces(&String::from_utf8_lossy(&output.stdout)))
}

pub fn parse_namespaces(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_string).collect()
}
