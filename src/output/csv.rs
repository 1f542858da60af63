//! CSV combiner: merges staged chunk files into one result file

use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::path::{recreate_dir, StagingLayout, CSV_EXTENSION};
use super::{OutputError, OutputResult};
use crate::identifier::Mmsi;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Summary of a combine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedResult {
    /// Combined output file
    pub path: PathBuf,
    /// Staged files whose rows were merged
    pub files_merged: usize,
    /// Staged files skipped because they had no header row
    pub empty_files: Vec<String>,
    /// Data rows written (header excluded)
    pub rows_written: u64,
}

/// Merges the staged CSV chunks of one vessel
///
/// Files are taken in lexicographic name order, which is chronological for
/// staged names. The first non-empty file contributes the header; every
/// file's own header row is dropped.
#[derive(Debug, Clone)]
pub struct Combiner {
    layout: StagingLayout,
}

impl Combiner {
    /// Create a combiner over `layout`
    pub fn new(layout: StagingLayout) -> Self {
        Self { layout }
    }

    /// Combine all staged CSV files for `mmsi`
    ///
    /// # Errors
    /// [`OutputError::NoStagingDir`] if nothing was ever fetched for this
    /// vessel; in that case the results directory is left untouched.
    /// [`OutputError::OverlappingDirs`] if the staging and results
    /// directories nest, before anything is deleted.
    pub fn combine(&self, mmsi: &Mmsi) -> OutputResult<CombinedResult> {
        let staging_dir = self.layout.staging_dir(mmsi);
        if !staging_dir.is_dir() {
            return Err(OutputError::NoStagingDir(staging_dir));
        }
        self.layout.ensure_disjoint(mmsi)?;

        info!("Combining chunk files in {}", staging_dir.display());
        let chunk_files = list_csv_files(&staging_dir)?;
        if chunk_files.is_empty() {
            warn!("No CSV chunk files found in {}", staging_dir.display());
        }

        recreate_dir(&self.layout.results_dir(mmsi))?;
        let output_path = self.layout.combined_file_path(mmsi);
        let file = File::create(&output_path).map_err(|e| OutputError::io(&output_path, e))?;
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_writer(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file));

        let mut header_written = false;
        let mut files_merged = 0;
        let mut empty_files = Vec::new();
        let mut rows_written = 0u64;

        for path in &chunk_files {
            let name = file_name(path);
            info!("Processing chunk: {}", name);

            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(path)
                .map_err(|e| OutputError::csv(path, e))?;
            let mut records = reader.byte_records();

            let header = match records.next() {
                Some(record) => record.map_err(|e| OutputError::csv(path, e))?,
                None => {
                    warn!("Warning: {} is empty, skipping", name);
                    empty_files.push(name);
                    continue;
                }
            };

            if !header_written {
                write_record(&mut writer, &header, &output_path)?;
                header_written = true;
            }

            let mut file_rows = 0u64;
            for record in records {
                let record = record.map_err(|e| OutputError::csv(path, e))?;
                write_record(&mut writer, &record, &output_path)?;
                file_rows += 1;
            }

            debug!(rows = file_rows, "Merged {}", name);
            rows_written += file_rows;
            files_merged += 1;
        }

        writer.flush().map_err(|e| OutputError::io(&output_path, e))?;

        info!(
            files = files_merged,
            rows = rows_written,
            "Successfully combined all files into: {}",
            output_path.display()
        );

        Ok(CombinedResult {
            path: output_path,
            files_merged,
            empty_files,
            rows_written,
        })
    }
}

fn write_record<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    record: &ByteRecord,
    output_path: &Path,
) -> OutputResult<()> {
    writer
        .write_byte_record(record)
        .map_err(|e| OutputError::csv(output_path, e))
}

/// Regular files in `dir` ending in `.csv`, sorted by name
fn list_csv_files(dir: &Path) -> OutputResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| OutputError::io(dir, e))?;

    let suffix = format!(".{CSV_EXTENSION}");
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| OutputError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && file_name(&path).ends_with(&suffix) {
            files.push(path);
        }
    }

    files.sort_by_key(|path| file_name(path));
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
