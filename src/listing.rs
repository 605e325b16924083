//! Parser for the technical listing printed by `7zz l -slt`.
//!
//! The output starts with archive-level properties, then a `----------`
//! separator, then one `Key = Value` block per member. Unknown keys and
//! malformed lines are skipped; a missing or broken field keeps its default.

use crate::models::ArchiveEntry;

const ENTRIES_SEPARATOR: &str = "----------";
const KEY_VALUE_SEPARATOR: &str = " = ";

/// Name 7zz reports for the archive root in some formats.
const ROOT_ENTRY_NAME: &str = ".";

pub fn parse_listing(output: &str) -> Vec<ArchiveEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ArchiveEntry> = None;
    let mut in_entries = false;

    for line in output.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if line == ENTRIES_SEPARATOR {
            in_entries = true;
            continue;
        }
        if !in_entries {
            continue;
        }

        let Some((key, value)) = line.split_once(KEY_VALUE_SEPARATOR) else {
            continue;
        };

        if key == "Path" {
            flush(&mut entries, current.take());
            current = Some(ArchiveEntry {
                name: value.to_string(),
                ..Default::default()
            });
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };
        match key {
            "Folder" => entry.is_directory = value == "+",
            "Size" => entry.size = value.parse().unwrap_or(0),
            "Packed Size" => entry.packed_size = value.parse().unwrap_or(0),
            "Modified" => {
                let end = value.find('.').unwrap_or(value.len());
                entry.modified = value[..end].to_string();
            }
            "Attributes" => entry.attributes = value.to_string(),
            _ => {}
        }
    }
    flush(&mut entries, current);

    entries.retain(|entry| entry.name != ROOT_ENTRY_NAME);
    entries
}

fn flush(entries: &mut Vec<ArchiveEntry>, entry: Option<ArchiveEntry>) {
    if let Some(entry) = entry.filter(|entry| !entry.name.is_empty()) {
        entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
7-Zip (z) 24.08 (x64) : Copyright (c) 1999-2024 Igor Pavlov : 2024-08-11

Scanning the drive for archives:
1 file, 1234 bytes (2 KiB)

Listing archive: sample.7z

--
Path = sample.7z
Type = 7z
Physical Size = 1234
Headers Size = 210
Method = LZMA2:12
Solid = +
Blocks = 1

----------
Path = docs
Size = 0
Packed Size = 0
Modified = 2024-01-02 10:00:00.123456
Attributes = D_ drwxr-xr-x
CRC =
Encrypted = -
Method =
Block =

Path = docs/readme.txt
Size = 5120
Packed Size = 812
Modified = 2024-01-02 10:00:00.5
Attributes = A_ -rw-r--r--
CRC = 3610A686
Encrypted = -
Method = LZMA2:12
Block = 0
";

    #[test]
    fn parses_entries_in_order() {
        let entries = parse_listing(SAMPLE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "docs");
        assert_eq!(entries[1].name, "docs/readme.txt");
        assert_eq!(entries[1].size, 5120);
        assert_eq!(entries[1].packed_size, 812);
        assert_eq!(entries[1].attributes, "A_ -rw-r--r--");
    }

    #[test]
    fn archive_properties_before_separator_are_ignored() {
        let entries = parse_listing(SAMPLE);
        assert!(entries.iter().all(|entry| entry.name != "sample.7z"));
    }

    #[test]
    fn no_separator_yields_nothing() {
        let output = "Path = a.txt\nSize = 10\nPath = b.txt\n";
        assert!(parse_listing(output).is_empty());
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn folder_flag_requires_plus() {
        let output = "----------\nPath = dir\nFolder = +\n\nPath = file\nFolder = -\n";
        let entries = parse_listing(output);
        assert!(entries[0].is_directory);
        assert!(!entries[1].is_directory);
    }

    #[test]
    fn modified_drops_fraction() {
        let output = "----------\nPath = a\nModified = 2024-01-02 10:00:00.123456\n";
        assert_eq!(parse_listing(output)[0].modified, "2024-01-02 10:00:00");

        let output = "----------\nPath = a\nModified = 2024-01-02 10:00:00\n";
        assert_eq!(parse_listing(output)[0].modified, "2024-01-02 10:00:00");
    }

    #[test]
    fn bad_sizes_leave_zero() {
        let output = "----------\nPath = a\nSize = lots\nPacked Size = -3\n\nPath = b\nSize = 7\n";
        let entries = parse_listing(output);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[0].packed_size, 0);
        assert_eq!(entries[1].size, 7);
    }

    #[test]
    fn root_entry_is_filtered() {
        let output = "----------\nPath = .\nFolder = +\n\nPath = x\n\nPath = .\n";
        let entries = parse_listing(output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "x");
    }

    #[test]
    fn fields_before_first_path_are_ignored() {
        let output = "----------\nSize = 99\nFolder = +\nPath = a\n";
        let entries = parse_listing(output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 0);
        assert!(!entries[0].is_directory);
    }

    #[test]
    fn lines_without_separator_and_unknown_keys_are_skipped() {
        let output = "----------\nPath = a\nwhat is this\nColor = blue\nSize = 3\n";
        let entries = parse_listing(output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 3);
    }

    #[test]
    fn value_may_contain_separator() {
        let output = "----------\nPath = a = b.txt\n";
        assert_eq!(parse_listing(output)[0].name, "a = b.txt");
    }

    #[test]
    fn handles_crlf_and_empty_path() {
        let output = "----------\r\nPath = \r\nPath = kept\r\nSize = 4\r\n";
        let entries = parse_listing(output);
        // "Path =" trims to a line without " = ", so only "kept" remains
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "kept");
        assert_eq!(entries[0].size, 4);
    }
}
