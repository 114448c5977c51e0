//! Local storage command construction and execution

use std::process::Command;

use crate::common::error::{Error, Result};

/// Build the command sequence that grows a volume's backing logical volume and
/// filesystem on this node.
///
/// Order is significant: the filesystem can only be grown once the block
/// device underneath it has been extended.
pub fn local_resize_commands(vg_name: &str, volume: &str, size: &str) -> Vec<String> {
    let device = format!("/dev/{}/lv_{}", vg_name, volume);
    vec![
        format!("lvextend -L {} {}", size, device),
        format!("xfs_growfs {}", device),
    ]
}

/// Executes an ordered list of shell-level operations against host storage,
/// stopping at the first failure and leaving later commands unexecuted.
pub trait CommandRunner {
    fn run(&self, commands: &[String]) -> Result<()>;
}

/// Runs each command through `sh -c`
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, commands: &[String]) -> Result<()> {
        for command in commands {
            tracing::info!(%command, "executing local storage command");
            let output = Command::new("sh")
                .arg("-c")
                .arg(command)
                .output()
                .map_err(|e| Error::LocalCommand {
                    command: command.clone(),
                    reason: e.to_string(),
                })?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                let reason = if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                };
                return Err(Error::LocalCommand {
                    command: command.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}
