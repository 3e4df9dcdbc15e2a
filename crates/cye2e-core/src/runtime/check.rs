//! Runtime detection for Node.js and npm

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(f, "{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            write!(f, "{} (not installed)", self.name)
        }
    }
}

/// Run `<program> --version` and report what came back
fn detect_version(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    detect_version("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    // npm ships as a .cmd shim on Windows
    if cfg!(windows) {
        detect_version("npm.cmd", "npm")
    } else {
        detect_version("npm", "npm")
    }
}

/// Detect Node.js and npm; fails listing whichever is missing
pub fn check_runtimes() -> Result<Vec<RuntimeInfo>> {
    let results = vec![check_node(), check_npm()];
    ensure_available(&results)?;
    Ok(results)
}

fn ensure_available(results: &[RuntimeInfo]) -> Result<()> {
    let missing: Vec<String> = results
        .iter()
        .filter(|r| !r.available)
        .map(|r| format!("  - {} (install from https://nodejs.org)", r.name))
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Missing required runtimes:\n{}", missing.join("\n"));
    }
    Ok(())
}
