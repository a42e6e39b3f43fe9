use log::{debug, error, warn};

use crate::{
    Catalog, Exercise, ExerciseRepository, ExerciseService, Program, ProgramRepository,
    ProgramService, ReadError, WriteError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    /// Built-in exercises merged with the cached custom exercises.
    ///
    /// The catalog is still usable without the cache, so a failure to read
    /// the custom exercises only results in a warning.
    async fn get_catalog(&self) -> Result<Catalog, ReadError> {
        let built_in = log_on_error!(
            self.repository.read_catalog(),
            ReadError,
            "get",
            "catalog"
        )?;
        let custom = match self.repository.read_custom_exercises().await {
            Ok(custom) => custom,
            Err(err) => {
                warn!("failed to get custom exercises: {err}");
                vec![]
            }
        };
        Ok(Catalog::merge(built_in, custom))
    }

    async fn save_custom_exercises(&self, catalog: &Catalog) -> Result<(), WriteError> {
        let custom = catalog.custom_exercises().cloned().collect::<Vec<Exercise>>();
        log_on_error!(
            self.repository.write_custom_exercises(&custom),
            WriteError,
            "save",
            "custom exercises"
        )
    }
}

impl<R: ProgramRepository> ProgramService for Service<R> {
    async fn get_program(&self, catalog: &Catalog) -> Result<Option<Program>, ReadError> {
        log_on_error!(
            self.repository.read_program(catalog),
            ReadError,
            "get",
            "program"
        )
    }

    async fn save_program(&self, program: &Program, catalog: &Catalog) -> Result<(), WriteError> {
        log_on_error!(
            self.repository.write_program(program, catalog),
            WriteError,
            "save",
            "program"
        )
    }
}
