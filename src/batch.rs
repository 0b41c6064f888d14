use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::parser::parse_cv_bytes;
use crate::record::CvRecord;

/// One JSONL line: the record plus the file it came from.
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    pub file: String,
    #[serde(flatten)]
    pub record: CvRecord,
}

pub struct BatchStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
}

/// `.txt` files directly under `dir`, sorted by name.
pub fn list_inputs(dir: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    if let Some(n) = limit {
        files.truncate(n);
    }
    Ok(files)
}

/// Parse every file in parallel and write one JSON object per line to `out`,
/// in input order. Unreadable files are logged and skipped.
pub fn run<W: Write>(files: &[PathBuf], config: &ParserConfig, out: W) -> Result<BatchStats> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut writer = BufWriter::new(out);
    let mut stats = BatchStats {
        total: files.len(),
        ok: 0,
        errors: 0,
    };

    for chunk in files.chunks(500) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| {
                let bytes = fs::read(path)?;
                Ok::<_, std::io::Error>(BatchRecord {
                    file: file_name(path),
                    record: parse_cv_bytes(&bytes, config),
                })
            })
            .collect();

        for (path, result) in chunk.iter().zip(results) {
            match result {
                Ok(row) => {
                    serde_json::to_writer(&mut writer, &row)?;
                    writer.write_all(b"\n")?;
                    stats.ok += 1;
                }
                Err(e) => {
                    warn!("skipping {}: {}", path.display(), e);
                    stats.errors += 1;
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    writer.flush()?;
    pb.finish_and_clear();
    info!(
        "Parsed {} files ({} ok, {} errors)",
        stats.total, stats.ok, stats.errors
    );
    Ok(stats)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &[u8]) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn lists_only_txt_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.txt", b"");
        write(dir.path(), "a.txt", b"");
        write(dir.path(), "notes.md", b"");
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let files = list_inputs(dir.path(), None).unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(list_inputs(dir.path(), Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn writes_jsonl_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "1.txt", b"Jane Doe\nEXPERIENCE\nACME LTD\nAnalyst");
        write(dir.path(), "2.txt", &[0xff, 0xfe]);
        write(dir.path(), "3.txt", b"John Smith\nSKILLS\nExcel, SQL");

        let files = list_inputs(dir.path(), None).unwrap();
        let mut out = Vec::new();
        let stats = run(&files, &ParserConfig::default(), &mut out).unwrap();
        assert_eq!((stats.total, stats.ok, stats.errors), (3, 3, 0));

        let text = String::from_utf8(out).unwrap();
        let rows: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["file"], "1.txt");
        assert_eq!(rows[0]["name"], "Jane Doe");
        assert_eq!(rows[0]["experience"][0]["company"], "ACME LTD");
        assert_eq!(rows[1]["name"], "Candidate Name");
        assert_eq!(rows[2]["skills"][1], "SQL");
    }

    #[test]
    fn missing_file_is_counted_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("gone.txt")];
        let mut out = Vec::new();
        let stats = run(&files, &ParserConfig::default(), &mut out).unwrap();
        assert_eq!(stats.errors, 1);
        assert!(out.is_empty());
    }
}
