use std::io::Write;
use std::process::{Command, Stdio};

use super::{InteractivePicker, SelectError};

/// fzf exits with 130 when the user presses Esc or Ctrl-C.
const FZF_EXIT_CANCELLED: i32 = 130;

/// Delegates selection to an external `fzf` process: items go in one per
/// line on stdin, the chosen line comes back on stdout.
pub struct FzfPicker;

impl FzfPicker {
    pub fn available() -> bool {
        which::which("fzf").is_ok()
    }
}

impl InteractivePicker for FzfPicker {
    fn pick(&self, items: &[String], prompt: &str) -> Result<usize, SelectError> {
        if items.is_empty() {
            return Err(SelectError::NoItems);
        }

        let mut child = Command::new("fzf")
            .arg("--height=40%")
            .arg("--reverse")
            .arg(format!("--prompt={prompt}> "))
            .arg("--select-1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Dropping the handle at the end of the block closes the pipe, so
        // fzf sees end-of-input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(items.join("\n").as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            if output.status.code() == Some(FZF_EXIT_CANCELLED) {
                return Err(SelectError::Cancelled);
            }
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SelectError::PickerFailed {
                detail: format!("fzf exited with {}: {stderr}", output.status),
            });
        }

        let chosen = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if chosen.is_empty() {
            return Err(SelectError::PickerFailed {
                detail: "no selection made".to_string(),
            });
        }

        items
            .iter()
            .position(|item| *item == chosen)
            .ok_or(SelectError::PickerFailed {
                detail: "selected item not found in list".to_string(),
            })
    }
}
