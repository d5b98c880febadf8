//! Display helpers for the upload file-info panel

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size in base-1024 units, at most two decimals
///
/// `0` is `"0 Bytes"`. Anything from 1 TiB up is still shown in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold: u64 = 1024;
    while unit < UNITS.len() - 1 && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Document type label from the file extension
///
/// The extension is whatever follows the last dot; a name without a dot is
/// looked up as a whole.
pub fn file_type_of(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "pdf" => "PDF Document",
        "ldt" => "DIALux Project",
        "xlsx" => "Excel Spreadsheet",
        "jpg" | "jpeg" => "JPEG Image",
        "png" => "PNG Image",
        "gif" => "GIF Image",
        "webp" => "WebP Image",
        _ => "Unknown File Type",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn test_format_file_size_rounds_to_two_decimals() {
        // 1234 / 1024 = 1.20507...
        assert_eq!(format_file_size(1234), "1.21 KB");
        // 1025 / 1024 = 1.00097... drops trailing zeros
        assert_eq!(format_file_size(1025), "1 KB");
    }

    #[test]
    fn test_format_file_size_clamps_to_gb() {
        assert_eq!(format_file_size(1024u64.pow(4)), "1024 GB");
        assert!(format_file_size(u64::MAX).ends_with(" GB"));
    }

    #[test]
    fn test_file_type_of() {
        assert_eq!(file_type_of("office.ldt"), "DIALux Project");
        assert_eq!(file_type_of("REPORT.PDF"), "PDF Document");
        assert_eq!(file_type_of("calc.xlsx"), "Excel Spreadsheet");
        assert_eq!(file_type_of("a.jpg"), "JPEG Image");
        assert_eq!(file_type_of("a.jpeg"), "JPEG Image");
        assert_eq!(file_type_of("a.png"), "PNG Image");
        assert_eq!(file_type_of("a.gif"), "GIF Image");
        assert_eq!(file_type_of("a.webp"), "WebP Image");
    }

    #[test]
    fn test_file_type_uses_last_segment() {
        assert_eq!(file_type_of("plan.v2.final.png"), "PNG Image");
        assert_eq!(file_type_of("archive.tar.gz"), "Unknown File Type");
        assert_eq!(file_type_of("notes"), "Unknown File Type");
        assert_eq!(file_type_of("trailing."), "Unknown File Type");
        assert_eq!(file_type_of(""), "Unknown File Type");
    }
}
