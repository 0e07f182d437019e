//! # Dataset Source
//!
//! Discovers a pack on disk and reads its CSV tables into [`PackTables`].
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── core/
//! │   ├── entities.csv
//! │   └── relationships.csv
//! └── modules/
//!     ├── 01_Module_DarkWeb/
//!     │   ├── entities.csv
//!     │   └── relationships.csv
//!     └── ...
//! ```
//!
//! Headers and cells are trimmed. Short rows are padded with empty cells.
//! A zero-byte file reads as a table without a header, which the pipeline
//! rejects as empty.

use csv::{ReaderBuilder, Trim};
use mkp_core::types::Row;
use mkp_core::{MkpError, PackTables, ScopeTables, Table};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

pub const CORE_DIR: &str = "core";
pub const MODULES_DIR: &str = "modules";
pub const ENTITIES_FILE: &str = "entities.csv";
pub const RELATIONSHIPS_FILE: &str = "relationships.csv";

/// A pack rooted at one directory.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    root: PathBuf,
}

impl DatasetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read Core and every Module directory.
    pub fn read(&self) -> Result<PackTables, MkpError> {
        let core_dir = self.root.join(CORE_DIR);
        if !core_dir.is_dir() {
            return Err(MkpError::load_missing(format!(
                "Core directory not found: {}",
                core_dir.display()
            )));
        }

        let mut pack = PackTables::new(read_scope(&core_dir)?);
        for name in self.module_names()? {
            let tables = read_scope(&self.root.join(MODULES_DIR).join(&name))?;
            pack = pack.with_module(name, tables);
        }

        tracing::debug!(
            root = %self.root.display(),
            modules = pack.modules.len(),
            "dataset read"
        );
        Ok(pack)
    }

    /// Names of the Module directories, sorted. No `modules/` means no Modules.
    pub fn module_names(&self) -> Result<Vec<String>, MkpError> {
        let modules_dir = self.root.join(MODULES_DIR);
        if !modules_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&modules_dir).map_err(|e| {
            MkpError::load_unreadable(format!(
                "Cannot list modules in {}: {}",
                modules_dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                MkpError::load_unreadable(format!(
                    "Cannot list modules in {}: {}",
                    modules_dir.display(),
                    e
                ))
            })?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|raw| {
                MkpError::load_unreadable(format!("Module directory name is not UTF-8: {:?}", raw))
            })?;
            names.push(name);
        }

        names.sort();
        Ok(names)
    }
}

/// Read both tables of one scope directory.
fn read_scope(dir: &Path) -> Result<ScopeTables, MkpError> {
    Ok(ScopeTables::new(
        read_table(&dir.join(ENTITIES_FILE))?,
        read_table(&dir.join(RELATIONSHIPS_FILE))?,
    ))
}

/// Read one CSV file. The table is named after the file.
pub fn read_table(path: &Path) -> Result<Table, MkpError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            MkpError::load_missing(format!("File not found: {}", path.display()))
        }
        _ => MkpError::load_unreadable(format!("Cannot open {}: {}", path.display(), e)),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let table = parse_table(name, file)
        .map_err(|e| MkpError::load_unreadable(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.rows().len(),
        "table read"
    );
    Ok(table)
}

/// Parse CSV text into a [`Table`].
///
/// Unnamed header cells are skipped together with their column. A column
/// name declared twice makes the table unreadable.
pub fn parse_table(name: impl Into<String>, reader: impl Read) -> Result<Table, MkpError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    // (position in the record, column name)
    let mut header: Vec<(usize, String)> = Vec::new();
    let mut seen = BTreeSet::new();
    for (idx, column) in rdr.headers().map_err(unreadable)?.iter().enumerate() {
        if column.is_empty() {
            continue;
        }
        if !seen.insert(column) {
            return Err(MkpError::load_unreadable(format!(
                "duplicate column '{}'",
                column
            )));
        }
        header.push((idx, column.to_string()));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(unreadable)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row: Row = header
            .iter()
            .map(|(idx, column)| (column.clone(), record.get(*idx).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    let columns = header.into_iter().map(|(_, column)| column).collect();
    Ok(Table::new(name, columns, rows))
}

fn unreadable(e: csv::Error) -> MkpError {
    MkpError::load_unreadable(e.to_string())
}

// =============================================================================
// TESTS
// =============================================================================
