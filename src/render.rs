//! Text generated or rewritten by a run.
//!
//! Pure functions only; the steps in [`crate::steps::files`] do the I/O.

use crate::config::{InstallConfig, Layout};

/// Seconds the MCR installer waits in automated mode before giving up.
pub const AUTOMATED_MODE_TIMEOUT: u32 = 3000;

/// Flag identifying a launcher line written by [`render_launch_block`].
const LICENSE_SERVER_FLAG: &str = "-smarxserver";

/// Render the MCR installer response file.
pub fn render_response_file(layout: &Layout) -> String {
    let pairs = [
        (
            "destinationFolder",
            layout.mcr_install_dir().display().to_string(),
        ),
        ("agreeToLicense", "yes".to_string()),
        ("outputFile", layout.mcr_install_log().display().to_string()),
        ("mode", "automated".to_string()),
        ("automatedModeTimeout", AUTOMATED_MODE_TIMEOUT.to_string()),
    ];

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

/// Indented, unterminated line that closes every rendered block.
///
/// It becomes the launcher's last line, so a later patch drops only this
/// filler and the previous invocation stays intact.
pub const BLOCK_TRAILER: &str = "    ";

/// Render the COSSAN-X invocation that replaces the launcher's last line.
pub fn render_launch_block(config: &InstallConfig) -> String {
    format!(
        "$WorkDir/cossanx \\\n\
         \x20   {flag} {host} \\\n\
         \x20   -smarxport {port} \\\n\
         \x20   -data /home/$USER \\\n\
         \x20   -consoleLog /eclipse \\\n\
         \x20   -loggingEnabled \\\n\
         \x20   -vmargs\n\
         {trailer}",
        trailer = BLOCK_TRAILER,
        flag = LICENSE_SERVER_FLAG,
        host = config.license_server_host,
        port = config.license_server_port,
    )
}

/// Drop the last line of `script` and append `block`.
///
/// Works on raw bytes: lines keep their terminators and everything before
/// the last line is preserved byte for byte, whatever its encoding. The
/// last line is dropped whatever it holds. On an already-patched script
/// that line is the previous block's [`BLOCK_TRAILER`], so each run appends
/// one more complete invocation.
pub fn patch_launcher(script: &[u8], block: &str) -> Vec<u8> {
    let mut lines: Vec<&[u8]> = script.split_inclusive(|&b| b == b'\n').collect();
    lines.pop();

    let mut patched = lines.concat();
    patched.extend_from_slice(block.as_bytes());
    patched
}

/// Whether `script` already carries a rendered invocation block.
pub fn is_patched(script: &[u8]) -> bool {
    script
        .split(|&b| b == b'\n')
        .map(String::from_utf8_lossy)
        .any(|line| line.trim_start().starts_with(LICENSE_SERVER_FLAG))
}

/// Contents of `mcr.ini`: the MCR install directory, nothing else.
pub fn render_pointer_file(layout: &Layout) -> String {
    layout.mcr_install_dir().display().to_string()
}
