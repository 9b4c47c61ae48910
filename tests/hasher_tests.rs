use anyhow::Result;
use dirhash::hasher::{
    MANIFEST_FILE_NAME, ManifestRecord, ManifestWriter, manifest_path, run, run_from_args,
    run_recursive,
};
use dirhash::utils::{ContentHash, compute_file_hash, hash_bytes, list_candidates};
use dirhash::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHA256_X: &str = "2d711642b726b04401627ca9fbac32f5c8530fb1903cc4db02258717921a4881";
const SHA256_Y: &str = "a1fce4363854ff888cff4b8e7875d600c2682390412a8cf79b37d0b11148b0fa";
const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn write_file(root: &Path, relative: &str, contents: &[u8]) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn manifest_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join(MANIFEST_FILE_NAME))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn compute_file_hash_matches_expected_value() -> Result<()> {
    let dir = TempDir::new()?;
    let file = write_file(dir.path(), "hash.txt", b"hello world");

    let hash = compute_file_hash(&file)?;

    assert_eq!(
        hash.as_str(),
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
    assert_eq!(hash, hash_bytes(b"hello world"));
    Ok(())
}

#[test]
fn hashing_is_deterministic() -> Result<()> {
    let dir = TempDir::new()?;
    let first = write_file(dir.path(), "one.bin", &[7u8; 20_000]);
    let second = write_file(dir.path(), "two.bin", &[7u8; 20_000]);

    assert_eq!(compute_file_hash(&first)?, compute_file_hash(&second)?);
    assert_eq!(compute_file_hash(&first)?, compute_file_hash(&first)?);
    Ok(())
}

#[test]
fn two_csv_files_are_recorded_in_name_order() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "b.csv", b"y");
    write_file(dir.path(), "a.csv", b"x");

    let report = run(dir.path(), "csv")?;

    assert_eq!(report.manifest_path, dir.path().join("01-hashes.txt"));
    assert!(report.skipped.is_empty());
    assert_eq!(
        manifest_lines(dir.path()),
        vec![format!("a.csv {SHA256_X}"), format!("b.csv {SHA256_Y}")]
    );
    Ok(())
}

#[test]
fn files_with_other_extensions_are_ignored() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "a.csv", b"x");
    write_file(dir.path(), "c.txt", b"not hashed");
    write_file(dir.path(), "a.csv.bak", b"not hashed");

    let report = run(dir.path(), "csv")?;

    assert_eq!(report.recorded.len(), 1);
    assert_eq!(manifest_lines(dir.path()), vec![format!("a.csv {SHA256_X}")]);
    Ok(())
}

#[test]
fn zero_byte_file_gets_empty_digest() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "empty.dat", b"");

    run(dir.path(), "dat")?;

    assert_eq!(
        manifest_lines(dir.path()),
        vec![format!("empty.dat {SHA256_EMPTY}")]
    );
    Ok(())
}

#[test]
fn empty_directory_succeeds_without_manifest() -> Result<()> {
    let dir = TempDir::new()?;

    let report = run(dir.path(), "csv")?;

    assert!(report.recorded.is_empty());
    assert!(!dir.path().join(MANIFEST_FILE_NAME).exists());
    Ok(())
}

#[test]
fn second_run_appends_duplicate_records() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "a.csv", b"x");
    write_file(dir.path(), "b.csv", b"y");

    run(dir.path(), "csv")?;
    let first = manifest_lines(dir.path());
    run(dir.path(), "csv")?;
    let second = manifest_lines(dir.path());

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 4);
    assert_eq!(&second[..2], &first[..]);
    assert_eq!(&second[2..], &first[..]);
    Ok(())
}

#[test]
fn manifest_is_never_hashed_itself() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "notes.txt", b"x");
    write_file(dir.path(), MANIFEST_FILE_NAME, b"previous run\n");

    let report = run(dir.path(), "txt")?;

    assert_eq!(report.skipped, vec![MANIFEST_FILE_NAME.to_string()]);
    assert_eq!(report.recorded.len(), 1);
    assert_eq!(
        manifest_lines(dir.path()),
        vec!["previous run".to_string(), format!("notes.txt {SHA256_X}")]
    );
    Ok(())
}

#[test]
fn matching_directory_is_skipped_and_run_continues() -> Result<()> {
    let dir = TempDir::new()?;
    fs::create_dir(dir.path().join("folder.csv"))?;
    write_file(dir.path(), "z.csv", b"y");

    let report = run(dir.path(), "csv")?;

    assert_eq!(report.skipped, vec!["folder.csv".to_string()]);
    assert_eq!(manifest_lines(dir.path()), vec![format!("z.csv {SHA256_Y}")]);
    Ok(())
}

#[test]
fn hidden_files_are_not_candidates() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), ".hidden.csv", b"x");
    write_file(dir.path(), "shown.csv", b"y");
    write_file(dir.path(), "nested/deep.csv", b"x");

    let candidates = list_candidates(dir.path(), "csv")?;

    assert_eq!(candidates, vec![dir.path().join("shown.csv")]);
    Ok(())
}

#[test]
fn records_use_base_name_only() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "with space.csv", b"x");

    let report = run(dir.path(), "csv")?;

    let record = &report.recorded[0];
    assert_eq!(record.file_name, "with space.csv");
    let parsed: ManifestRecord = manifest_lines(dir.path())[0].parse()?;
    assert_eq!(&parsed, record);
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = run(&missing, "csv").unwrap_err();

    assert!(matches!(err, Error::Directory { .. }));
    assert!(!missing.join(MANIFEST_FILE_NAME).exists());
}

#[test]
fn wrong_argument_count_is_a_usage_error_without_io() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.csv", b"x");
    let directory = dir.path().to_string_lossy().to_string();

    for args in [
        vec![],
        vec![directory.clone()],
        vec![directory.clone(), "csv".to_string(), "extra".to_string()],
    ] {
        let err = run_from_args(&args).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }
    assert!(!dir.path().join(MANIFEST_FILE_NAME).exists());

    let report = run_from_args(&[directory, "csv".to_string()]).unwrap();
    assert_eq!(report.recorded.len(), 1);
}

#[test]
fn dotted_or_empty_extension_is_rejected() {
    let dir = TempDir::new().unwrap();

    for extension in [".csv", "", "a/b"] {
        let err = run(dir.path(), extension).unwrap_err();
        assert!(matches!(err, Error::Usage(_)), "{extension:?}");
    }
}

#[test]
fn manifest_record_parsing_rejects_bad_digests() {
    assert!("a.csv".parse::<ManifestRecord>().is_err());
    assert!(format!(" {SHA256_X}").parse::<ManifestRecord>().is_err());
    assert!("a.csv 1234".parse::<ManifestRecord>().is_err());
    assert!(
        format!("a.csv {}", SHA256_X.to_uppercase())
            .parse::<ManifestRecord>()
            .is_err()
    );
    assert!(SHA256_EMPTY.parse::<ContentHash>().is_ok());
}

#[test]
fn manifest_writer_creates_file_lazily() -> Result<()> {
    let dir = TempDir::new()?;
    let path = manifest_path(dir.path());
    let mut writer = ManifestWriter::new(&path);
    assert!(!path.exists());

    writer.append(&ManifestRecord::new("a.csv", SHA256_X.parse()?))?;
    writer.append(&ManifestRecord::new("b.csv", SHA256_Y.parse()?))?;

    assert_eq!(
        fs::read_to_string(&path)?,
        format!("a.csv {SHA256_X}\nb.csv {SHA256_Y}\n")
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_file_names_are_skipped() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new()?;
    fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.csv")), b"x")?;
    write_file(dir.path(), "good.csv", b"y");

    let report = run(dir.path(), "csv")?;

    assert_eq!(report.skipped, vec!["bad\u{fffd}.csv".to_string()]);
    assert_eq!(manifest_lines(dir.path()), vec![format!("good.csv {SHA256_Y}")]);
    Ok(())
}

#[test]
fn recursive_run_writes_one_manifest_per_directory() -> Result<()> {
    let dir = TempDir::new()?;
    write_file(dir.path(), "top.csv", b"x");
    write_file(dir.path(), "sub/inner.csv", b"y");
    fs::create_dir_all(dir.path().join("sub/empty"))?;

    let reports = run_recursive(dir.path(), "csv")?;

    assert_eq!(reports.len(), 3);
    assert_eq!(manifest_lines(dir.path()), vec![format!("top.csv {SHA256_X}")]);
    assert_eq!(
        manifest_lines(&dir.path().join("sub")),
        vec![format!("inner.csv {SHA256_Y}")]
    );
    assert!(!dir.path().join("sub/empty").join(MANIFEST_FILE_NAME).exists());
    Ok(())
}
