use std::collections::VecDeque;

use chrono::Utc;
use gloo_storage::{LocalStorage as GlooLocalStorage, Storage as _, errors::StorageError};
use knight_domain as domain;
use knight_web_app::{Settings, SettingsRepository, log};
use ::log::debug;
use strum::AsRefStr;

use crate::document::{self, ProgramDocument, SavedDocument};

#[derive(AsRefStr)]
pub enum Key {
    #[strum(serialize = "programKnightProgram")]
    Program,
    #[strum(serialize = "customExercises")]
    CustomExercises,
    #[strum(serialize = "catalog")]
    Catalog,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum LocalStorageError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Document(#[from] document::DocumentError),
}

impl From<LocalStorageError> for domain::ReadError {
    fn from(value: LocalStorageError) -> Self {
        domain::ReadError::Other(Box::new(value))
    }
}

impl From<LocalStorageError> for domain::WriteError {
    fn from(value: LocalStorageError) -> Self {
        domain::WriteError::Other(Box::new(value))
    }
}

#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn read_program(
        &self,
        catalog: &domain::Catalog,
    ) -> Result<Option<domain::Program>, LocalStorageError> {
        match GlooLocalStorage::get::<ProgramDocument>(Key::Program.as_ref()) {
            Ok(document) => {
                if let Some(ref saved_at) = document.saved_at {
                    debug!("loading program saved at {saved_at}");
                }
                Ok(Some(document.into_program(catalog)?))
            }
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn write_program(
        &self,
        program: &domain::Program,
        catalog: &domain::Catalog,
    ) -> Result<(), LocalStorageError> {
        Ok(GlooLocalStorage::set(
            Key::Program.as_ref(),
            SavedDocument::new(program, catalog, Utc::now()),
        )?)
    }

    pub fn read_custom_exercises(&self) -> Result<Vec<domain::Exercise>, LocalStorageError> {
        read_exercises(&Key::CustomExercises)
    }

    pub fn write_custom_exercises(
        &self,
        exercises: &[domain::Exercise],
    ) -> Result<(), LocalStorageError> {
        write_exercises(&Key::CustomExercises, exercises)
    }

    /// Copy of the built-in exercises last received from the server.
    pub fn read_catalog(&self) -> Result<Vec<domain::Exercise>, LocalStorageError> {
        read_exercises(&Key::Catalog)
    }

    pub fn write_catalog(&self, exercises: &[domain::Exercise]) -> Result<(), LocalStorageError> {
        write_exercises(&Key::Catalog, exercises)
    }

    pub fn clear(&self) {
        for key in [Key::Program, Key::CustomExercises, Key::Catalog] {
            GlooLocalStorage::delete(key.as_ref());
        }
    }
}

fn read_exercises(key: &Key) -> Result<Vec<domain::Exercise>, LocalStorageError> {
    match GlooLocalStorage::get::<Vec<serde_json::Value>>(key.as_ref()) {
        Ok(records) => Ok(document::parse_exercises(records)),
        Err(StorageError::KeyNotFound(_)) => Ok(vec![]),
        Err(err) => Err(err.into()),
    }
}

fn write_exercises(key: &Key, exercises: &[domain::Exercise]) -> Result<(), LocalStorageError> {
    Ok(GlooLocalStorage::set(
        key.as_ref(),
        exercises
            .iter()
            .map(document::Exercise::from)
            .collect::<Vec<_>>(),
    )?)
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        match GlooLocalStorage::get(Key::Settings.as_ref()) {
            Ok(settings) => Ok(settings),
            Err(err) => match err {
                StorageError::KeyNotFound(_) => Ok(Settings::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        GlooLocalStorage::set(Key::Settings.as_ref(), settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match GlooLocalStorage::get(Key::Log.as_ref()) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::append(&mut entries, entry);
        GlooLocalStorage::set(Key::Log.as_ref(), entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
