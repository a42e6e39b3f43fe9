use std::rc::Rc;

use log::{debug, info};

use crate::{
    Exercise, ExerciseError, ExerciseFilter, ExerciseID, NewExercise, ReadError, WriteError,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_catalog(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_custom_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn write_custom_exercises(&self, exercises: &[Exercise]) -> Result<(), WriteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_catalog(&self) -> Result<Catalog, ReadError>;
    async fn save_custom_exercises(&self, catalog: &Catalog) -> Result<(), WriteError>;
}

/// All exercises available for planning.
///
/// Exercises are shared with the program entries that reference them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    exercises: Vec<Rc<Exercise>>,
}

impl Catalog {
    /// Combine the built-in exercises with cached custom exercises.
    ///
    /// A custom exercise whose id is already present is skipped.
    #[must_use]
    pub fn merge(built_in: Vec<Exercise>, custom: Vec<Exercise>) -> Self {
        let mut catalog = Self::default();
        for exercise in built_in.into_iter().chain(custom) {
            if catalog.get(exercise.id).is_some() {
                debug!("skipping duplicate exercise {}", exercise.id);
                continue;
            }
            catalog.exercises.push(Rc::new(exercise));
        }
        catalog
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<Rc<Exercise>> {
        self.exercises.iter().find(|e| e.id == id).cloned()
    }

    pub fn add_exercise(
        &mut self,
        new_exercise: NewExercise,
    ) -> Result<Rc<Exercise>, ExerciseError> {
        let exercise = Rc::new(new_exercise.into_exercise(ExerciseID::generate())?);
        info!("added exercise {}", exercise.name);
        self.exercises.push(exercise.clone());
        Ok(exercise)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().map(Rc::as_ref)
    }

    pub fn custom_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.iter().filter(|e| e.is_custom())
    }

    #[must_use]
    pub fn filter(&self, filter: &ExerciseFilter) -> Vec<&Exercise> {
        filter.exercises(self.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use crate::{Equipment, KeyMovement, Muscle, Name};

    use super::*;

    fn exercise(id: ExerciseID, name: &str) -> Exercise {
        Exercise {
            id,
            name: Name::new(name).unwrap(),
            primary_muscle: Muscle::new("Lats").unwrap(),
            auxiliary_muscles: BTreeMap::new(),
            movement_pattern: KeyMovement::VerticalPull.into(),
            equipment: Equipment::new("Pull Up Bar").unwrap(),
        }
    }

    fn names<'a>(exercises: impl Iterator<Item = &'a Exercise>) -> Vec<String> {
        exercises.map(|e| e.name.to_string()).collect()
    }

    #[test]
    fn test_catalog_merge() {
        let catalog = Catalog::merge(
            vec![exercise(1.into(), "Pull-up"), exercise(2.into(), "Chin-up")],
            vec![
                exercise(2.into(), "Duplicate"),
                exercise(76.into(), "Legacy Custom"),
            ],
        );
        assert_eq!(
            names(catalog.iter()),
            vec!["Pull-up", "Chin-up", "Legacy Custom"]
        );
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_get() {
        let catalog = Catalog::merge(vec![exercise(1.into(), "Pull-up")], vec![]);
        assert_eq!(
            catalog.get(1.into()).map(|e| e.name.to_string()),
            Some("Pull-up".to_string())
        );
        assert_eq!(catalog.get(2.into()), None);
    }

    #[test]
    fn test_catalog_add_exercise() {
        let mut catalog = Catalog::merge(vec![exercise(1.into(), "Pull-up")], vec![]);
        let added = catalog
            .add_exercise(NewExercise {
                name: "Band Pull-apart".to_string(),
                primary_muscle: "Rear Delts".to_string(),
                movement_pattern: "horizontal_pull".to_string(),
                equipment: "Resistance Band".to_string(),
                auxiliary_muscles: vec![],
            })
            .unwrap();

        assert!(added.is_custom());
        assert_eq!(catalog.get(added.id), Some(added));
        assert_eq!(names(catalog.custom_exercises()), vec!["Band Pull-apart"]);
    }

    #[test]
    fn test_catalog_add_invalid_exercise() {
        let mut catalog = Catalog::default();
        assert_eq!(
            catalog.add_exercise(NewExercise::default()),
            Err(ExerciseError::Missing("name"))
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_filter() {
        let catalog = Catalog::merge(
            vec![exercise(1.into(), "Pull-up"), exercise(2.into(), "Chin-up")],
            vec![],
        );
        assert_eq!(
            names(
                catalog
                    .filter(&ExerciseFilter {
                        search: "chin".to_string(),
                        movement_pattern: None,
                    })
                    .into_iter()
            ),
            vec!["Chin-up"]
        );
    }
}
