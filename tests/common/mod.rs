#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use csvquery::Dataset;
use tempfile::TempDir;

// Header [NAME, AGE] with rows Ann/15, Bo/20, Cy/abc
pub fn people() -> Dataset {
    dataset(&["NAME", "AGE"], &[&["Ann", "15"], &["Bo", "20"], &["Cy", "abc"]])
}

// Build a dataset from string slices
pub fn dataset(header: &[&str], rows: &[&[&str]]) -> Dataset {
    Dataset::new(
        header.iter().map(|s| s.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect(),
    )
    .expect("test dataset should be well formed")
}

// Write a data file into a fresh temporary directory
pub fn write_data_file(name: &str, contents: &str) -> Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok((dir, path))
}

// Housing listing with digit-grouped prices
pub const HOUSES_CSV: &str = "\
HARGA,LT,KOTA
\"28,000,000,000\",1100,Jakarta Selatan
\"9,500,000,000\",450,Jakarta Selatan
\"7,250,000,000\",600,Depok
\"12,000,000,000\",980,Bogor
n/a,300,Depok
";
