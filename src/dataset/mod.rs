//! Dataset import boundary.
//!
//! Reads a tabular file with a header row, folds its rows into a
//! [`Hierarchy`], and publishes the result as the [`ActiveHierarchy`]
//! resource. A successful import replaces the previous tree in a single
//! assignment; a failed one clears it.

pub mod normalize;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy::prelude::*;
use bevy::window::FileDragAndDrop;

use crate::hierarchy::{Counts, Hierarchy, build};
use crate::types::REQUIRED_COLUMNS;

use self::normalize::RawRow;

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("no usable rows found; expected columns: {required}")]
    Empty { required: &'static str },
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Read every record of a CSV source as `(header, value)` pairs.
///
/// Fields that are not valid UTF-8 are decoded lossily, so a file saved in a
/// legacy encoding still imports.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.byte_headers()?.iter().map(decode).collect();
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        if std::str::from_utf8(record.as_slice()).is_err() {
            debug!("Record {} is not valid UTF-8; decoding lossily", rows.len() + 1);
        }
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), decode(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Import a dataset from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Hierarchy, Counts), DatasetError> {
    let rows = read_rows(reader)?;
    let (hierarchy, counts) = build(rows);
    if hierarchy.is_empty() {
        return Err(DatasetError::Empty {
            required: REQUIRED_COLUMNS,
        });
    }
    Ok((hierarchy, counts))
}

/// Import a dataset from a file on disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<(Hierarchy, Counts), DatasetError> {
    let file = File::open(path)?;
    load_from_reader(file)
}

/// Message requesting an import of the file at `path`.
#[derive(Message, Clone, Debug)]
pub struct LoadDataset {
    pub path: PathBuf,
}

/// The hierarchy currently shown, if any import has succeeded.
#[derive(Resource, Default, Clone)]
pub struct ActiveHierarchy(pub Option<Arc<Hierarchy>>);

impl ActiveHierarchy {
    pub fn get(&self) -> Option<&Hierarchy> {
        self.0.as_deref()
    }
}

/// Outcome of the most recent import, for display.
#[derive(Resource, Default, Clone, Debug, PartialEq)]
pub enum ImportStatus {
    #[default]
    Idle,
    Loaded {
        source: PathBuf,
        counts: Counts,
    },
    Failed {
        source: PathBuf,
        message: String,
    },
}

/// Plugin providing dataset import.
pub struct DatasetPlugin;

impl Plugin for DatasetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveHierarchy>()
            .init_resource::<ImportStatus>()
            .add_message::<LoadDataset>()
            .add_message::<FileDragAndDrop>()
            .add_systems(PreUpdate, (queue_dropped_files, handle_load_dataset).chain());
    }
}

/// Turn files dropped onto the window into import requests.
fn queue_dropped_files(
    mut drops: MessageReader<FileDragAndDrop>,
    mut loads: MessageWriter<LoadDataset>,
) {
    for drop in drops.read() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = drop {
            loads.write(LoadDataset {
                path: path_buf.clone(),
            });
        }
    }
}

/// Run requested imports and publish the result.
pub fn handle_load_dataset(
    mut requests: MessageReader<LoadDataset>,
    mut active: ResMut<ActiveHierarchy>,
    mut status: ResMut<ImportStatus>,
) {
    for request in requests.read() {
        match load_from_path(&request.path) {
            Ok((hierarchy, counts)) => {
                info!(
                    "Imported {}: {} entities, {} tenants, {} galaxies, {} stars, {} bodies",
                    request.path.display(),
                    counts.entity_count,
                    counts.tenant_count,
                    counts.galaxy_count,
                    counts.star_count,
                    counts.body_count
                );
                active.0 = Some(Arc::new(hierarchy));
                *status = ImportStatus::Loaded {
                    source: request.path.clone(),
                    counts,
                };
            }
            Err(err) => {
                error!("Import of {} failed: {err}", request.path.display());
                active.0 = None;
                *status = ImportStatus::Failed {
                    source: request.path.clone(),
                    message: err.to_string(),
                };
            }
        }
    }
}
