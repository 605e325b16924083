use std::path::{Path, PathBuf};
use std::process::Command;

use egui::Color32;

const COMPOUND_SUFFIXES: [&str; 6] = [".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".tbz2", ".txz"];
const FALLBACK_OUTPUT_NAME: &str = "output";

pub fn open_system_file(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        Command::new("explorer").arg(path).spawn()?;
    }
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(path).spawn()?;
    }
    Ok(())
}

/// Locates a file shipped next to the program.
///
/// Checked in order: the macOS bundle `Resources` directory, the directory of
/// the executable, the current working directory. Falls back to the bare name
/// so the caller can report what it tried.
pub fn resolve_resource_path(name: &str) -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            // .../Contents/MacOS/<exe> -> .../Contents/Resources/<name>
            if let Some(contents) = exe_dir.parent() {
                let bundled = contents.join("Resources").join(name);
                if bundled.exists() {
                    return bundled;
                }
            }

            let local = exe_dir.join(name);
            if local.exists() {
                return local;
            }
        }
    }

    let relative = Path::new(name);
    if relative.exists() {
        return std::path::absolute(relative).unwrap_or_else(|_| relative.to_path_buf());
    }

    relative.to_path_buf()
}

/// Archive suffix of `file_name`, lower-cased: a known compound suffix such as
/// `.tar.gz`, otherwise the last extension. `None` when there is no dot.
pub fn detect_archive_suffix(file_name: &str) -> Option<String> {
    let lower = file_name.to_ascii_lowercase();
    if let Some(suffix) = COMPOUND_SUFFIXES.iter().find(|suffix| lower.ends_with(*suffix)) {
        return Some(suffix.to_string());
    }
    lower.rfind('.').map(|idx| lower[idx..].to_string())
}

/// Sibling directory an archive is extracted into: the archive name without
/// its archive suffix, or `output` when nothing usable is left.
pub fn default_output_dir(archive_path: &Path) -> PathBuf {
    let parent = archive_path.parent().unwrap_or_else(|| Path::new(""));
    let base = archive_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = match detect_archive_suffix(&base) {
        Some(suffix) => &base[..base.len() - suffix.len()],
        None => "",
    };
    let name = if stem.is_empty() { FALLBACK_OUTPUT_NAME } else { stem };

    parent.join(name)
}

pub fn format_size(size: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.2}MB", size as f64 / MB)
}

/// Parses `#RRGGBB`. Anything else yields opaque black; bad digits count as 0.
pub fn parse_hex_color(hex: &str) -> Color32 {
    let bytes = hex.as_bytes();
    if bytes.len() != 7 || bytes[0] != b'#' {
        return Color32::BLACK;
    }
    let nibble = |b: u8| (b as char).to_digit(16).unwrap_or(0) as u8;
    let channel = |i: usize| nibble(bytes[i]) << 4 | nibble(bytes[i + 1]);
    Color32::from_rgb(channel(1), channel(3), channel(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_strips_compound_suffix() {
        assert_eq!(
            default_output_dir(Path::new("/a/b/archive.tar.gz")),
            PathBuf::from("/a/b/archive")
        );
        assert_eq!(
            default_output_dir(Path::new("/a/b/Backup.TAR.XZ")),
            PathBuf::from("/a/b/Backup")
        );
        assert_eq!(
            default_output_dir(Path::new("/a/b/logs.tgz")),
            PathBuf::from("/a/b/logs")
        );
    }

    #[test]
    fn output_dir_strips_single_extension() {
        assert_eq!(
            default_output_dir(Path::new("/a/b/data.zip")),
            PathBuf::from("/a/b/data")
        );
        assert_eq!(
            default_output_dir(Path::new("/a/b/my.files.7z")),
            PathBuf::from("/a/b/my.files")
        );
    }

    #[test]
    fn output_dir_falls_back_to_output() {
        assert_eq!(
            default_output_dir(Path::new("/a/b/noext")),
            PathBuf::from("/a/b/output")
        );
        assert_eq!(
            default_output_dir(Path::new("/a/b/.tar.gz")),
            PathBuf::from("/a/b/output")
        );
    }

    #[test]
    fn output_dir_of_relative_archive() {
        assert_eq!(
            default_output_dir(Path::new("sample.7z")),
            PathBuf::from("sample")
        );
    }

    #[test]
    fn suffix_detection() {
        assert_eq!(detect_archive_suffix("x.tar.bz2").as_deref(), Some(".tar.bz2"));
        assert_eq!(detect_archive_suffix("x.RAR").as_deref(), Some(".rar"));
        assert_eq!(detect_archive_suffix("x"), None);
    }

    #[test]
    fn sizes_are_megabytes() {
        assert_eq!(format_size(0), "0.00MB");
        assert_eq!(format_size(1024 * 1024), "1.00MB");
        assert_eq!(format_size(1536 * 1024), "1.50MB");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#F5F5F5"), Color32::from_rgb(0xF5, 0xF5, 0xF5));
        assert_eq!(parse_hex_color("#88aa00"), Color32::from_rgb(0x88, 0xAA, 0x00));
        assert_eq!(parse_hex_color("888888"), Color32::BLACK);
        assert_eq!(parse_hex_color("#zz0000"), Color32::from_rgb(0, 0, 0));
    }

    #[test]
    fn missing_resource_resolves_to_bare_name() {
        let name = "definitely-not-a-bundled-resource.bin";
        assert_eq!(resolve_resource_path(name), PathBuf::from(name));
    }
}
