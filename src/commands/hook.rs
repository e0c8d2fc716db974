use anyhow::{bail, Result};

const BASH_HOOK: &str = include_str!("../hooks/arbor.bash");
const ZSH_HOOK: &str = include_str!("../hooks/arbor.zsh");
const FISH_HOOK: &str = include_str!("../hooks/arbor.fish");

const SUPPORTED_SHELLS: [&str; 3] = ["bash", "zsh", "fish"];

/// `arbor hook <shell>`: print the shell integration function to stdout so
/// it can be eval'd from the user's shell config.
pub fn run(shell: &str) -> Result<()> {
    print!("{}", script_for(shell)?);
    Ok(())
}

fn script_for(shell: &str) -> Result<&'static str> {
    match shell.trim().to_ascii_lowercase().as_str() {
        "bash" => Ok(BASH_HOOK),
        "zsh" => Ok(ZSH_HOOK),
        "fish" => Ok(FISH_HOOK),
        other => bail!(
            "unsupported shell: {other}\nSupported shells: {}",
            SUPPORTED_SHELLS.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_shells_normalize() {
        for shell in ["bash", "BASH", "  zsh  ", "Fish"] {
            assert!(script_for(shell).is_ok(), "should accept {shell:?}");
        }
    }

    #[test]
    fn test_unsupported_shell() {
        assert!(script_for("powershell").is_err());
        assert!(script_for("").is_err());
    }

    #[test]
    fn test_scripts_export_marker_variable() {
        // The binary detects an installed hook through this variable; every
        // script must set it.
        for script in [BASH_HOOK, ZSH_HOOK, FISH_HOOK] {
            assert!(script.contains("ARBOR_SHELL_FUNCTION"));
        }
    }
}
