use chrono::{TimeZone, Utc};
use ntfind::{
    DirectoryRecord, DirectoryScanner, FileAttributes, FileFinder, FileSystemEntry, FinderBuilder,
    FinderError, FullDirRecord, IntoFoundEntry, MemoryDirectory, MemoryEntry, NtStatus,
    StatusClass,
};
use std::sync::atomic::Ordering;
fn sample_directory() -> MemoryDirectory {
    MemoryDirectory::new([
        MemoryEntry::directory("."),
        MemoryEntry::directory(".."),
        MemoryEntry::file("alpha.txt", 11),
        MemoryEntry::directory("logs"),
        MemoryEntry::file("Beta.TXT", 2048).with_attributes(FileAttributes::HIDDEN),
        MemoryEntry::file("gamma.rs", 7),
    ])
}
fn name_of(entry: &FileSystemEntry<'_>) -> Option<String> {
    Some(entry.file_name().to_string_lossy())
}
#[test]
fn test_find_match_walks_entries_in_order() {
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    let mut names = Vec::new();
    while let Some(name) = finder.find_match("*").unwrap() {
        names.push(name);
    }
    assert_eq!(names, [".", "..", "alpha.txt", "logs", "Beta.TXT", "gamma.rs"]);
    assert!(finder.find_match("*").unwrap().is_none());
}
#[test]
fn test_pattern_is_case_insensitive() {
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    let names: Vec<String> = finder.matches("*.txt").collect::<Result<_, _>>().unwrap();
    assert_eq!(names, ["alpha.txt", "Beta.TXT"]);
}
#[test]
fn test_no_match_is_not_an_error() {
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    assert!(finder.find_match("*.exe").unwrap().is_none());
}
#[test]
fn test_restart_scan_uses_new_pattern() {
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    assert_eq!(finder.find_match("*.rs").unwrap().as_deref(), Some("gamma.rs"));
    assert!(finder.find_match("*.rs").unwrap().is_none());
    let first = finder.find_match_with_restart("?lpha.*", true).unwrap();
    assert_eq!(first.as_deref(), Some("alpha.txt"));
}
#[test]
fn test_rejected_entries_end_find_match_but_not_matches() {
    let options = FinderBuilder::new(r"C:\data").build();
    let files_only = |entry: &FileSystemEntry<'_>| {
        (!entry.is_directory()).then(|| entry.file_name().to_string_lossy())
    };
    let mut finder = FileFinder::with_source(sample_directory(), &options, files_only).unwrap();
    // "." is a directory, so the first match is rejected.
    assert!(finder.find_match("*").unwrap().is_none());

    let mut finder = FileFinder::with_source(sample_directory(), &options, files_only).unwrap();
    let names: Vec<String> = finder.matches("*").collect::<Result<_, _>>().unwrap();
    assert_eq!(names, ["alpha.txt", "Beta.TXT", "gamma.rs"]);
}
#[test]
fn test_entry_exposes_record_fields() {
    let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let accessed = Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap();
    let written = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
    let source = MemoryDirectory::new([MemoryEntry::file("report.pdf", 5000)
        .with_attributes(FileAttributes::HIDDEN | FileAttributes::READONLY)
        .with_times(created, accessed, written)]);
    let options = FinderBuilder::new(r"C:\docs").build();
    let mut finder = FileFinder::with_source(source, &options, |entry: &FileSystemEntry<'_>| {
        Some((
            entry.length(),
            entry.attributes(),
            entry.is_hidden(),
            entry.is_directory(),
            entry.creation_time_utc(),
            entry.last_access_time_utc(),
            entry.last_write_time_utc(),
            entry.change_time_utc(),
            entry.allocation_size(),
            entry.file_index(),
            entry.ea_size(),
        ))
    })
    .unwrap();
    let (length, attributes, hidden, directory, c, a, w, changed, allocated, index, ea) =
        finder.find_match("report.pdf").unwrap().unwrap();
    assert_eq!(length, 5000);
    assert!(attributes.contains(FileAttributes::HIDDEN | FileAttributes::READONLY));
    assert!(hidden);
    assert!(!directory);
    assert_eq!(c, Some(created));
    assert_eq!(a, Some(accessed));
    assert_eq!(w, Some(written));
    assert_eq!(changed, Some(written));
    assert_eq!(allocated, 8192);
    assert_eq!(index, 0);
    assert_eq!(ea, 0);
}
#[test]
fn test_specified_full_path_keeps_original_root() {
    let source = MemoryDirectory::new([MemoryEntry::file("x.txt", 1)]);
    let options = FinderBuilder::new(r"C:\data")
        .original_root_directory(r"C:\data/")
        .build();
    let mut finder = FileFinder::with_source(source, &options, |entry: &FileSystemEntry<'_>| {
        Some((entry.to_full_path(), entry.to_specified_full_path()))
    })
    .unwrap();
    let (full, specified) = finder.find_match("*").unwrap().unwrap();
    assert_eq!(full, r"C:\data\x.txt");
    assert_eq!(specified, r"C:\data/x.txt");
}
#[test]
fn test_directory_with_trailing_separator_is_its_own_root() {
    for (directory, expected) in [
        (r"C:\data/", r"C:\data/x.txt"),
        (r"C:\data\/", r"C:\data\/x.txt"),
        (r"C:\data\", r"C:\data\x.txt"),
    ] {
        let source = MemoryDirectory::new([MemoryEntry::file("x.txt", 1)]);
        let options = FinderBuilder::new(directory).build();
        let mut finder = FileFinder::with_source(source, &options, |entry: &FileSystemEntry<'_>| {
            Some(entry.to_specified_full_path())
        })
        .unwrap();
        assert_eq!(finder.find_match("*").unwrap().unwrap(), expected, "directory {directory:?}");
    }
}
#[test]
fn test_drive_relative_root() {
    let source = MemoryDirectory::new([MemoryEntry::file("x.txt", 1)]);
    let options = FinderBuilder::new("D:").build();
    let mut finder = FileFinder::with_source(source, &options, IntoFoundEntry).unwrap();
    let entry = finder.find_match("*").unwrap().unwrap();
    assert_eq!(entry.path.to_str(), Some("D:x.txt"));
}
#[test]
fn test_buffer_overflow_is_reported() {
    let source = MemoryDirectory::new([MemoryEntry::file("a_rather_long_file_name.txt", 1)]);
    let options = FinderBuilder::new(r"C:\data").buffer_length(80).build();
    let mut finder = FileFinder::with_source(source, &options, name_of).unwrap();
    let err = finder.find_match("*").unwrap_err();
    assert!(matches!(err, FinderError::Query { .. }));
    assert_eq!(err.status(), Some(NtStatus::BUFFER_OVERFLOW));
}
#[test]
fn test_invalid_buffer_lengths() {
    let options = FinderBuilder::new(r"C:\data").buffer_length(0).build();
    let err = FileFinder::with_source(sample_directory(), &options, name_of).err().unwrap();
    assert!(matches!(err, FinderError::InvalidBufferLength { length: 0, .. }));

    let options = FinderBuilder::new(r"C:\data").buffer_length(16).build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    let err = finder.find_match("*").unwrap_err();
    assert!(matches!(err, FinderError::InvalidBufferLength { length: 16, .. }));
}
#[test]
fn test_names_only_query_fits_small_buffer() {
    let source = MemoryDirectory::new([MemoryEntry::file("a", 1)]);
    let mut scanner = DirectoryScanner::new(source, r"C:\data", 16).unwrap();
    let name = scanner.find_next_name("*", false).unwrap().unwrap();
    assert_eq!(name, "a");
    assert!(scanner.find_next_name("*", false).unwrap().is_none());
}
#[test]
fn test_wide_pattern_query() {
    let mut scanner = DirectoryScanner::new(sample_directory(), r"C:\data", 1024).unwrap();
    let pattern: Vec<u16> = "*.rs".encode_utf16().collect();
    let record = scanner
        .find_next_wide::<FullDirRecord<'_>>(&pattern, false)
        .unwrap()
        .unwrap();
    assert_eq!(record.name, "gamma.rs");
    assert_eq!(record.header.end_of_file.get(), 7);
    assert!(scanner.find_next_wide::<FullDirRecord<'_>>(&pattern, false).unwrap().is_none());
}
#[test]
fn test_out_of_range_entry_values_saturate() {
    let far = chrono::DateTime::<Utc>::MAX_UTC;
    let source = MemoryDirectory::new([MemoryEntry::file("huge.bin", u64::MAX).with_times(far, far, far)]);
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(source, &options, |entry: &FileSystemEntry<'_>| {
        Some((entry.length(), entry.allocation_size(), entry.last_write_time_utc()))
    })
    .unwrap();
    let (length, allocated, written) = finder.find_match("*").unwrap().unwrap();
    assert_eq!(length, i64::MAX as u64);
    assert_eq!(allocated, i64::MAX as u64);
    assert!(written.is_some());
}
#[test]
fn test_pattern_too_long() {
    let options = FinderBuilder::new(r"C:\data").build();
    let mut finder = FileFinder::with_source(sample_directory(), &options, name_of).unwrap();
    let pattern = "a".repeat(40_000);
    let err = finder.find_match(&pattern).unwrap_err();
    assert!(matches!(err, FinderError::PatternTooLong { units: 40_000 }));
}
#[test]
fn test_close_releases_once() {
    let options = FinderBuilder::new(r"C:\data").build();
    let source = sample_directory();
    let closes = source.close_counter();
    let finder = FileFinder::with_source(source, &options, name_of).unwrap();
    finder.close().unwrap();
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}
#[test]
fn test_drop_releases_when_not_closed() {
    let options = FinderBuilder::new(r"C:\data").build();
    let source = sample_directory();
    let closes = source.close_counter();
    {
        let mut finder = FileFinder::with_source(source, &options, name_of).unwrap();
        finder.find_match("*").unwrap();
    }
    assert_eq!(closes.load(Ordering::SeqCst), 1);
}
#[test]
fn test_failed_construction_does_not_close_twice() {
    let options = FinderBuilder::new(r"C:\data").buffer_length(0).build();
    let source = sample_directory();
    let closes = source.close_counter();
    assert!(FileFinder::with_source(source, &options, name_of).is_err());
    // The source was never handed to a scanner, so only its own drop ran.
    assert_eq!(closes.load(Ordering::SeqCst), 0);
}
#[test]
fn test_status_classification() {
    assert_eq!(NtStatus::SUCCESS.classify(), StatusClass::Record);
    assert_eq!(NtStatus::NO_MORE_FILES.classify(), StatusClass::Exhausted);
    assert_eq!(NtStatus::NO_SUCH_FILE.classify(), StatusClass::Exhausted);
    assert_eq!(NtStatus(0xE003_1004_u32 as i32).classify(), StatusClass::Exhausted);
    assert_eq!(NtStatus::BUFFER_OVERFLOW.classify(), StatusClass::Failed);
    assert_eq!(NtStatus::INVALID_HANDLE.classify(), StatusClass::Failed);
    assert_eq!(NtStatus::NO_MORE_FILES.to_string(), "0x80000006");
}
#[test]
fn test_malformed_records_are_rejected() {
    let err = FullDirRecord::parse(&[0u8; 10]).unwrap_err();
    assert!(matches!(err, FinderError::MalformedRecord(_)));

    // Header claims a 200 byte name but only 4 bytes follow.
    let mut bytes = vec![0u8; 68 + 4];
    bytes[60..64].copy_from_slice(&200u32.to_le_bytes());
    let err = FullDirRecord::parse(&bytes).unwrap_err();
    assert!(matches!(err, FinderError::MalformedRecord(_)));

    bytes[60..64].copy_from_slice(&3u32.to_le_bytes());
    let err = FullDirRecord::parse(&bytes).unwrap_err();
    assert!(matches!(err, FinderError::MalformedRecord(_)));
}
#[test]
fn test_filetime_conversion() {
    use ntfind::time::{filetime_to_utc, utc_to_filetime};
    assert_eq!(
        filetime_to_utc(116_444_736_000_000_000),
        Some(chrono::DateTime::<Utc>::UNIX_EPOCH)
    );
    assert_eq!(filetime_to_utc(-1), None);
    let t = Utc.with_ymd_and_hms(2001, 9, 9, 1, 46, 40).unwrap();
    assert_eq!(utc_to_filetime(t).and_then(filetime_to_utc), Some(t));
    assert_eq!(utc_to_filetime(chrono::DateTime::<Utc>::MAX_UTC), None);
    assert_eq!(utc_to_filetime(chrono::DateTime::<Utc>::MIN_UTC), None);
}
#[cfg(not(windows))]
#[test]
fn test_native_enumeration_is_unsupported_elsewhere() {
    let options = FinderBuilder::new("/tmp").build();
    let err = FileFinder::open(&options, name_of).err().unwrap();
    assert!(matches!(err, FinderError::Unsupported));
}
