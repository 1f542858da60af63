//! Integration tests for combining staged chunk files

use std::path::PathBuf;
use tempfile::TempDir;
use vessel_track_downloader::identifier::Mmsi;
use vessel_track_downloader::output::{Combiner, OutputError, StagingLayout};

struct Staged {
    _temp: TempDir,
    layout: StagingLayout,
    mmsi: Mmsi,
}

impl Staged {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let layout = StagingLayout::new(temp.path().join("temp"), temp.path().join("results"));
        Self {
            _temp: temp,
            layout,
            mmsi: Mmsi::parse("538007475").unwrap(),
        }
    }

    fn with_files(files: &[(&str, &str)]) -> Self {
        let staged = Self::new();
        let dir = staged.layout.staging_dir(&staged.mmsi);
        std::fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            std::fs::write(dir.join(name), content).unwrap();
        }
        staged
    }

    fn combiner(&self) -> Combiner {
        Combiner::new(self.layout.clone())
    }

    fn results_dir(&self) -> PathBuf {
        self.layout.results_dir(&self.mmsi)
    }
}

#[test]
fn test_two_files_one_header_three_rows() {
    let staged = Staged::with_files(&[
        (
            "vessel_track_538007475_2022-01-08_2022-07-07.csv",
            "MMSI,LAT,LON\n538007475,1.0,2.0\n538007475,1.1,2.1\n",
        ),
        (
            "vessel_track_538007475_2022-07-08_2023-01-04.csv",
            "MMSI,LAT,LON\n538007475,1.2,2.2\n",
        ),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();

    assert_eq!(result.files_merged, 2);
    assert_eq!(result.rows_written, 3);
    assert!(result.empty_files.is_empty());
    assert_eq!(
        result.path,
        staged.results_dir().join("vessel_track_538007475_combined.csv")
    );
    assert_eq!(
        std::fs::read_to_string(&result.path).unwrap(),
        "MMSI,LAT,LON\n538007475,1.0,2.0\n538007475,1.1,2.1\n538007475,1.2,2.2\n"
    );
}

#[test]
fn test_files_merged_in_name_order() {
    // Written out of order on purpose; names sort chronologically
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2023-01-05_2023-02-12.csv", "H\nthird\n"),
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", "H\nfirst\n"),
        ("vessel_track_538007475_2022-07-08_2023-01-04.csv", "H\nsecond\n"),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();
    assert_eq!(
        std::fs::read_to_string(&result.path).unwrap(),
        "H\nfirst\nsecond\nthird\n"
    );
}

#[test]
fn test_empty_file_is_skipped_and_reported() {
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", "H1,H2\na,b\n"),
        ("vessel_track_538007475_2022-07-08_2023-01-04.csv", ""),
        ("vessel_track_538007475_2023-01-05_2023-02-12.csv", "H1,H2\nc,d\n"),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();

    assert_eq!(result.files_merged, 2);
    assert_eq!(result.rows_written, 2);
    assert_eq!(
        result.empty_files,
        vec!["vessel_track_538007475_2022-07-08_2023-01-04.csv"]
    );
    assert_eq!(
        std::fs::read_to_string(&result.path).unwrap(),
        "H1,H2\na,b\nc,d\n"
    );
}

#[test]
fn test_header_taken_from_first_non_empty_file() {
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", ""),
        ("vessel_track_538007475_2022-07-08_2023-01-04.csv", "MMSI\n1\n"),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();
    assert_eq!(std::fs::read_to_string(&result.path).unwrap(), "MMSI\n1\n");
}

#[test]
fn test_header_only_files_contribute_no_rows() {
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", "MMSI,LAT\n"),
        ("vessel_track_538007475_2022-07-08_2023-01-04.csv", "MMSI,LAT\n"),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();
    assert_eq!(result.files_merged, 2);
    assert_eq!(result.rows_written, 0);
    assert_eq!(std::fs::read_to_string(&result.path).unwrap(), "MMSI,LAT\n");
}

#[test]
fn test_rows_with_differing_field_counts_are_kept() {
    let staged = Staged::with_files(&[(
        "vessel_track_538007475_2022-01-08_2022-07-07.csv",
        "A,B,C\n1,2,3\n4,5\n",
    )]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();
    assert_eq!(result.rows_written, 2);
    assert_eq!(
        std::fs::read_to_string(&result.path).unwrap(),
        "A,B,C\n1,2,3\n4,5\n"
    );
}

#[test]
fn test_non_csv_files_are_ignored() {
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", "H\nrow\n"),
        ("vessel_track_538007475_2022-07-08_2023-01-04.json", "[{\"x\":1}]"),
    ]);

    let result = staged.combiner().combine(&staged.mmsi).unwrap();
    assert_eq!(result.files_merged, 1);
    assert_eq!(std::fs::read_to_string(&result.path).unwrap(), "H\nrow\n");
}

#[test]
fn test_missing_staging_dir_writes_nothing() {
    let staged = Staged::new();

    let err = staged.combiner().combine(&staged.mmsi).unwrap_err();

    match err {
        OutputError::NoStagingDir(path) => {
            assert_eq!(path, staged.layout.staging_dir(&staged.mmsi));
        }
        other => panic!("expected missing staging dir, got {other:?}"),
    }
    assert!(!staged.results_dir().exists());
}

#[test]
fn test_stale_results_are_cleared() {
    let staged = Staged::with_files(&[(
        "vessel_track_538007475_2022-01-08_2022-07-07.csv",
        "H\nrow\n",
    )]);
    let results = staged.results_dir();
    std::fs::create_dir_all(&results).unwrap();
    std::fs::write(results.join("old_output.csv"), "stale\n").unwrap();

    staged.combiner().combine(&staged.mmsi).unwrap();

    let names: Vec<String> = std::fs::read_dir(&results)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["vessel_track_538007475_combined.csv"]);
}

#[test]
fn test_combining_twice_gives_same_output() {
    let staged = Staged::with_files(&[
        ("vessel_track_538007475_2022-01-08_2022-07-07.csv", "H\n1\n"),
        ("vessel_track_538007475_2022-07-08_2023-01-04.csv", "H\n2\n"),
    ]);

    let first = staged.combiner().combine(&staged.mmsi).unwrap();
    let first_content = std::fs::read_to_string(&first.path).unwrap();
    let second = staged.combiner().combine(&staged.mmsi).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&second.path).unwrap(), first_content);
}

#[test]
fn test_shared_root_is_refused_without_touching_chunks() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("data");
    let layout = StagingLayout::new(&root, &root);
    let mmsi = Mmsi::parse("538007475").unwrap();

    let staging = layout.staging_dir(&mmsi);
    std::fs::create_dir_all(&staging).unwrap();
    let chunk = staging.join("vessel_track_538007475_2022-01-08_2022-01-10.csv");
    std::fs::write(&chunk, "MMSI\n538007475\n").unwrap();

    let err = Combiner::new(layout).combine(&mmsi).unwrap_err();

    assert!(matches!(err, OutputError::OverlappingDirs { .. }), "{err:?}");
    let names: Vec<String> = std::fs::read_dir(&staging)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["vessel_track_538007475_2022-01-08_2022-01-10.csv"]);
    assert_eq!(std::fs::read_to_string(&chunk).unwrap(), "MMSI\n538007475\n");
}
