//! Persisted program documents
//!
//! A program is stored as JSON document mapping the weekday index ("0" is
//! Monday) to the entries of that day. Every entry embeds the complete
//! exercise, so a document can be restored even if the exercise is not part
//! of the current catalog. Unknown fields are ignored when parsing.

use std::{collections::BTreeMap, rc::Rc};

use anyhow::Context;
use chrono::{DateTime, Utc};
use knight_domain as domain;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const VERSION: &str = "1.0";

#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("document contains no program data")]
    MissingProgramData,
    #[error("invalid day \"{0}\"")]
    InvalidDay(String),
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
}

/// Any program document. Used for parsing saved, exported and auto-saved programs.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub program_name: Option<String>,
    #[serde(default)]
    pub program_data: Option<BTreeMap<String, Vec<Entry>>>,
}

impl ProgramDocument {
    /// Restore the program. Exercises found in `catalog` are shared with the catalog.
    pub fn into_program(self, catalog: &domain::Catalog) -> Result<domain::Program, DocumentError> {
        let program_data = self
            .program_data
            .ok_or(DocumentError::MissingProgramData)?;
        let mut program = domain::Program::new();
        for (day, entries) in program_data {
            let weekday = domain::WEEK
                .into_iter()
                .find(|weekday| domain::day_index(*weekday).to_string() == day)
                .ok_or_else(|| DocumentError::InvalidDay(day.clone()))?;
            for entry in entries {
                program.push_entry(weekday, entry.into_entry(catalog)?);
            }
        }
        Ok(program)
    }
}

/// Document kept in the local storage of the browser.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub program_data: BTreeMap<String, Vec<Entry>>,
    /// Ids of all built-in exercises of the catalog.
    pub exercises: Vec<ExerciseID>,
}

impl SavedDocument {
    #[must_use]
    pub fn new(
        program: &domain::Program,
        catalog: &domain::Catalog,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: VERSION.to_string(),
            saved_at,
            program_data: program_data(program),
            exercises: built_in_exercises(catalog).map(|e| e.id.into()).collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub program_name: String,
    pub program_data: BTreeMap<String, Vec<Entry>>,
    pub exercises: Vec<ExerciseRef>,
}

impl ExportedDocument {
    #[must_use]
    pub fn new(
        program: &domain::Program,
        catalog: &domain::Catalog,
        name: Option<&str>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: VERSION.to_string(),
            exported_at,
            program_name: name.unwrap_or("My Program").to_string(),
            program_data: program_data(program),
            exercises: built_in_exercises(catalog)
                .map(|e| ExerciseRef {
                    id: e.id.into(),
                    name: e.name.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutosaveDocument {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub program_data: BTreeMap<String, Vec<Entry>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseRef {
    pub id: ExerciseID,
    pub name: String,
}

/// Content and name of a file offered for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub name: String,
    pub content: String,
}

/// Serialize `program` into the local storage format.
pub fn save(
    program: &domain::Program,
    catalog: &domain::Catalog,
    saved_at: DateTime<Utc>,
) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(&SavedDocument::new(
        program, catalog, saved_at,
    ))?)
}

/// Parse a document created by [`save`].
pub fn load(blob: &str, catalog: &domain::Catalog) -> Result<domain::Program, DocumentError> {
    serde_json::from_str::<ProgramDocument>(blob)?.into_program(catalog)
}

pub fn export(
    program: &domain::Program,
    catalog: &domain::Catalog,
    name: Option<&str>,
    exported_at: DateTime<Utc>,
) -> Result<ExportFile, DocumentError> {
    let name = name.map(str::trim).filter(|name| !name.is_empty());
    Ok(ExportFile {
        name: export_file_name(name, exported_at),
        content: serde_json::to_string_pretty(&ExportedDocument::new(
            program,
            catalog,
            name,
            exported_at,
        ))?,
    })
}

/// Parse an imported file. Any program document is accepted.
pub fn import(bytes: &[u8], catalog: &domain::Catalog) -> Result<domain::Program, DocumentError> {
    let document = serde_json::from_slice::<ProgramDocument>(bytes)?;
    if let Some(ref exported_at) = document.exported_at {
        debug!("importing program exported at {exported_at}");
    }
    document.into_program(catalog)
}

/// Snapshot of the program offered for download after each automatic save.
pub fn autosave(
    program: &domain::Program,
    saved_at: DateTime<Utc>,
) -> Result<ExportFile, DocumentError> {
    Ok(ExportFile {
        name: format!(
            "program-knight-autosave-{}.json",
            saved_at.format("%Y-%m-%d")
        ),
        content: serde_json::to_string_pretty(&AutosaveDocument {
            version: VERSION.to_string(),
            saved_at,
            program_data: program_data(program),
        })?,
    })
}

#[must_use]
pub fn export_file_name(name: Option<&str>, exported_at: DateTime<Utc>) -> String {
    match name {
        Some(name) => format!("{name}.json"),
        None => format!(
            "program-knight-export-{}.json",
            exported_at.format("%Y-%m-%d")
        ),
    }
}

/// Convert stored or received exercise records. Records that are malformed or lack a required
/// field are skipped.
#[must_use]
pub fn parse_exercises(records: Vec<serde_json::Value>) -> Vec<domain::Exercise> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match parse_exercise(record) {
            Ok(exercise) => Some(exercise),
            Err(err) => {
                warn!("skipping exercise record {i}: {err:#}");
                None
            }
        })
        .collect()
}

fn parse_exercise(record: serde_json::Value) -> anyhow::Result<domain::Exercise> {
    let exercise = serde_json::from_value::<Exercise>(record).context("malformed record")?;
    let name = exercise.name.clone();
    domain::Exercise::try_from(exercise).with_context(|| format!("invalid exercise \"{name}\""))
}

fn program_data(program: &domain::Program) -> BTreeMap<String, Vec<Entry>> {
    program
        .days()
        .map(|(weekday, entries)| {
            (
                domain::day_index(weekday).to_string(),
                entries.iter().map(Entry::from).collect(),
            )
        })
        .collect()
}

fn built_in_exercises(catalog: &domain::Catalog) -> impl Iterator<Item = &domain::Exercise> {
    catalog.iter().filter(|e| !e.is_custom())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryID,
    pub exercise: Exercise,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Entry {
    fn into_entry(self, catalog: &domain::Catalog) -> Result<domain::ExerciseEntry, DocumentError> {
        let exercise = match catalog.get(self.exercise.id.into()) {
            Some(exercise) => exercise,
            None => Rc::new(
                domain::Exercise::try_from(self.exercise)
                    .map_err(|err| DocumentError::InvalidEntry(err.to_string()))?,
            ),
        };
        Ok(domain::ExerciseEntry {
            id: self.id.into(),
            exercise,
            sets: self.sets.into_iter().map(domain::SetConfig::from).collect(),
        })
    }
}

impl From<&domain::ExerciseEntry> for Entry {
    fn from(value: &domain::ExerciseEntry) -> Self {
        Self {
            id: EntryID::Generated(*value.id),
            exercise: Exercise::from(value.exercise.as_ref()),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

/// Entry ids are UUIDs. Older documents use millisecond timestamps.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum EntryID {
    Generated(Uuid),
    Legacy(u64),
}

impl From<EntryID> for domain::EntryID {
    fn from(value: EntryID) -> Self {
        match value {
            EntryID::Generated(uuid) => uuid.into(),
            EntryID::Legacy(timestamp) => u128::from(timestamp).into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Set {
    pub set: u32,
    pub reps: u32,
    pub rir: u8,
}

impl From<&domain::SetConfig> for Set {
    fn from(value: &domain::SetConfig) -> Self {
        Self {
            set: value.set_number,
            reps: value.reps.into(),
            rir: value.rir.into(),
        }
    }
}

/// Out-of-range reps and RIR are capped.
impl From<Set> for domain::SetConfig {
    fn from(value: Set) -> Self {
        let reps = domain::Reps::saturating(value.reps);
        if u32::from(reps) != value.reps {
            warn!("reps of set {} capped from {} to {reps}", value.set, value.reps);
        }
        let rir = domain::RIR::saturating(value.rir);
        if u8::from(rir) != value.rir {
            warn!("RIR of set {} capped from {} to {rir}", value.set, value.rir);
        }
        Self {
            set_number: value.set,
            reps,
            rir,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum ExerciseID {
    Numeric(u32),
    Generated(Uuid),
}

impl From<domain::ExerciseID> for ExerciseID {
    fn from(value: domain::ExerciseID) -> Self {
        match value {
            domain::ExerciseID::Numeric(id) => ExerciseID::Numeric(id),
            domain::ExerciseID::Generated(uuid) => ExerciseID::Generated(uuid),
        }
    }
}

impl From<ExerciseID> for domain::ExerciseID {
    fn from(value: ExerciseID) -> Self {
        match value {
            ExerciseID::Numeric(id) => domain::ExerciseID::Numeric(id),
            ExerciseID::Generated(uuid) => domain::ExerciseID::Generated(uuid),
        }
    }
}

/// Exercise as delivered by the catalog endpoint and stored in the custom exercise cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub primary_muscle: String,
    #[serde(default)]
    pub auxiliary_muscles: BTreeMap<String, u32>,
    pub movement_pattern: String,
    pub equipment: String,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.into(),
            name: value.name.to_string(),
            primary_muscle: value.primary_muscle.to_string(),
            auxiliary_muscles: value
                .auxiliary_muscles
                .iter()
                .map(|(muscle, stimulus)| (muscle.to_string(), **stimulus))
                .collect(),
            movement_pattern: value.movement_pattern.to_string(),
            equipment: value.equipment.to_string(),
        }
    }
}

/// Only the presence of the fields is checked. Auxiliary percentages above 100 are capped.
impl TryFrom<Exercise> for domain::Exercise {
    type Error = domain::ExerciseError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            primary_muscle: domain::Muscle::new(&value.primary_muscle)?,
            auxiliary_muscles: value
                .auxiliary_muscles
                .iter()
                .map(|(muscle, percentage)| -> Result<_, Self::Error> {
                    let stimulus = domain::Stimulus::saturating(*percentage);
                    if *stimulus != *percentage {
                        warn!(
                            "stimulus of {muscle} for {} capped from {percentage} to {stimulus}",
                            value.name
                        );
                    }
                    Ok((domain::Muscle::new(muscle)?, stimulus))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?,
            movement_pattern: domain::MovementPattern::new(&value.movement_pattern)?,
            equipment: domain::Equipment::new(&value.equipment)?,
        })
    }
}
