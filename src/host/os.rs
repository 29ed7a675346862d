//! Read-only host identity and hardware probes

use super::OsRelease;

/// Parse /etc/os-release content into an [`OsRelease`].
///
/// Missing fields come back as "unknown" rather than failing; the
/// preflight prompt handles mismatches.
pub fn parse_os_release(content: &str) -> OsRelease {
    let mut id = None;
    let mut version_id = None;
    let mut pretty_name = None;

    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').to_string();
            match key.trim() {
                "ID" => id = Some(value),
                "VERSION_ID" => version_id = Some(value),
                "PRETTY_NAME" => pretty_name = Some(value),
                _ => {}
            }
        }
    }

    OsRelease {
        id: id.unwrap_or_else(|| "unknown".to_string()),
        version_id: version_id.unwrap_or_else(|| "unknown".to_string()),
        pretty_name: pretty_name.unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Whether lspci output shows an AMD display adapter
pub fn lspci_has_amd_adapter(lspci_output: &str) -> bool {
    lspci_output.lines().any(|line| {
        let is_display = line.contains("VGA compatible controller")
            || line.contains("Display controller")
            || line.contains("3D controller");
        is_display
            && (line.contains("Advanced Micro Devices") || line.contains("AMD/ATI"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os_release_ubuntu() {
        let content = "PRETTY_NAME=\"Ubuntu 24.04.1 LTS\"\nNAME=\"Ubuntu\"\nVERSION_ID=\"24.04\"\nID=ubuntu\nID_LIKE=debian\n";
        let os = parse_os_release(content);
        assert_eq!(os.id, "ubuntu");
        assert_eq!(os.version_id, "24.04");
        assert_eq!(os.pretty_name, "Ubuntu 24.04.1 LTS");
    }

    #[test]
    fn test_parse_os_release_missing_fields() {
        let os = parse_os_release("NAME=Something\n");
        assert_eq!(os.id, "unknown");
        assert_eq!(os.version_id, "unknown");
    }

    #[test]
    fn test_lspci_detects_amd_vga() {
        let output = "03:00.0 VGA compatible controller: Advanced Micro Devices, Inc. [AMD/ATI] Navi 31 [Radeon RX 7900 XTX]\n";
        assert!(lspci_has_amd_adapter(output));
    }

    #[test]
    fn test_lspci_ignores_other_vendors() {
        let output = "01:00.0 VGA compatible controller: NVIDIA Corporation GA102\n02:00.0 Ethernet controller: Advanced Micro Devices, Inc. [AMD] whatever\n";
        assert!(!lspci_has_amd_adapter(output));
    }

    #[test]
    fn test_lspci_detects_amd_display_controller() {
        let output = "05:00.0 Display controller: Advanced Micro Devices, Inc. [AMD/ATI] Raphael\n";
        assert!(lspci_has_amd_adapter(output));
    }
}
