use std::rc::Rc;

use chrono::Weekday;
use log::debug;

use crate::{
    Card, Catalog, EntryID, Exercise, ExerciseEntry, ExerciseError, ExerciseID, Metric,
    MetricError, MetricRegistry, MovementPatternsMetric, NewExercise, Program, SetConfig, Stimulus,
    TrainingSplitMetric, VolumePerMuscleMetric, VolumeTargets, WeeklyOverviewMetric,
};

/// State of the planner: the exercise catalog, the program being edited and
/// the registered metrics.
///
/// Every mutation of the program re-evaluates all metrics, so [`Planner::cards`]
/// always reflects the current program.
#[derive(Default)]
pub struct Planner {
    catalog: Catalog,
    program: Program,
    registry: MetricRegistry,
    cards: Vec<Card>,
}

impl Planner {
    #[must_use]
    pub fn new(catalog: Catalog, registry: MetricRegistry) -> Self {
        let mut planner = Self {
            catalog,
            program: Program::new(),
            registry,
            cards: vec![],
        };
        planner.recompute();
        planner
    }

    /// Planner with the volume, movement pattern, weekly overview and
    /// training split metrics.
    pub fn with_builtin_metrics(
        catalog: Catalog,
        threshold: Stimulus,
        targets: VolumeTargets,
    ) -> Result<Self, MetricError> {
        let mut registry = MetricRegistry::new();
        registry.register(VolumePerMuscleMetric::new(threshold, targets))?;
        registry.register(MovementPatternsMetric)?;
        registry.register(WeeklyOverviewMetric::new(threshold))?;
        registry.register(TrainingSplitMetric)?;
        Ok(Self::new(catalog, registry))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn program(&self) -> &Program {
        &self.program
    }

    #[must_use]
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Place an exercise of the catalog on a day.
    pub fn add_entry(
        &mut self,
        weekday: Weekday,
        exercise_id: ExerciseID,
        sets: Vec<SetConfig>,
    ) -> Result<EntryID, PlannerError> {
        let exercise = self
            .catalog
            .get(exercise_id)
            .ok_or(PlannerError::UnknownExercise(exercise_id))?;
        if sets.is_empty() || sets.len() > SetConfig::MAX_COUNT {
            return Err(PlannerError::InvalidSetCount(sets.len()));
        }
        let id = self.program.add_entry(weekday, exercise, sets);
        self.recompute();
        Ok(id)
    }

    pub fn remove_entry(&mut self, weekday: Weekday, id: EntryID) -> Option<ExerciseEntry> {
        let entry = self.program.remove_entry(weekday, id);
        if entry.is_some() {
            self.recompute();
        }
        entry
    }

    /// Replace the whole program, e.g. after loading or importing a document.
    pub fn replace_program(&mut self, program: Program) {
        self.program = program;
        self.recompute();
    }

    pub fn clear_program(&mut self) {
        self.program.clear();
        self.recompute();
    }

    /// Add a custom exercise to the catalog. Invalid input leaves the catalog unchanged.
    pub fn add_exercise(
        &mut self,
        new_exercise: NewExercise,
    ) -> Result<Rc<Exercise>, ExerciseError> {
        let exercise = self.catalog.add_exercise(new_exercise)?;
        self.recompute();
        Ok(exercise)
    }

    pub fn register_metric<M: Metric + 'static>(&mut self, metric: M) -> Result<(), MetricError> {
        self.registry.register(metric)?;
        self.recompute();
        Ok(())
    }

    pub fn unregister_metric(&mut self, id: &str) {
        self.registry.unregister(id);
        self.recompute();
    }

    pub fn recompute(&mut self) {
        debug!("recomputing {} metrics", self.registry.len());
        self.cards = self.registry.evaluate(&self.program);
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Exercise {0} does not exist")]
    UnknownExercise(ExerciseID),
    #[error("Number of sets must be between 1 and 10 ({0})")]
    InvalidSetCount(usize),
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        Equipment, KeyMovement, MetricBuilder, Muscle, Name, RIR, Reps, View, WeeklyOverview,
    };

    use super::*;

    fn catalog() -> Catalog {
        Catalog::merge(
            vec![Exercise {
                id: 1.into(),
                name: Name::new("Barbell Bench Press").unwrap(),
                primary_muscle: Muscle::new("Chest").unwrap(),
                auxiliary_muscles: BTreeMap::new(),
                movement_pattern: KeyMovement::HorizontalPush.into(),
                equipment: Equipment::new("Barbell").unwrap(),
            }],
            vec![],
        )
    }

    fn planner() -> Planner {
        Planner::with_builtin_metrics(
            catalog(),
            Stimulus::AUXILIARY_THRESHOLD,
            VolumeTargets::default(),
        )
        .unwrap()
    }

    fn sets(count: usize) -> Vec<SetConfig> {
        SetConfig::series(count, Reps::default(), RIR::default())
    }

    fn content(planner: &Planner, id: &str) -> Result<View, MetricError> {
        planner
            .cards()
            .iter()
            .find(|card| card.id == id)
            .map(|card| card.content.clone())
            .unwrap()
    }

    #[test]
    fn test_with_builtin_metrics() {
        let planner = planner();
        assert_eq!(
            planner
                .cards()
                .iter()
                .map(|card| card.id.as_str())
                .collect::<Vec<_>>(),
            vec![
                "volume_per_muscle",
                "movement_patterns",
                "weekly_overview",
                "training_split"
            ]
        );
        assert_eq!(
            content(&planner, "volume_per_muscle"),
            Ok(View::Placeholder("Add exercises to see volume metrics".to_string()))
        );
    }

    #[test]
    fn test_add_entry_recomputes() {
        let mut planner = planner();
        planner.add_entry(Weekday::Mon, 1.into(), sets(3)).unwrap();
        let View::Table { rows, .. } = content(&planner, "volume_per_muscle").unwrap() else {
            panic!("expected table");
        };
        assert_eq!(rows[0][0].text, "Chest");
        assert_eq!(rows[0][1].text, "3 ↓");
    }

    #[test]
    fn test_add_entry_unknown_exercise() {
        let mut planner = planner();
        let cards = planner.cards().to_vec();
        assert_eq!(
            planner.add_entry(Weekday::Mon, 99.into(), sets(3)),
            Err(PlannerError::UnknownExercise(99.into()))
        );
        assert!(planner.program().is_empty());
        assert_eq!(planner.cards(), cards);
    }

    #[rstest]
    #[case(0)]
    #[case(11)]
    fn test_add_entry_invalid_set_count(#[case] count: usize) {
        let mut planner = planner();
        assert_eq!(
            planner.add_entry(Weekday::Mon, 1.into(), sets(count)),
            Err(PlannerError::InvalidSetCount(count))
        );
        assert!(planner.program().is_empty());
    }

    #[test]
    fn test_remove_entry() {
        let mut planner = planner();
        let id = planner.add_entry(Weekday::Tue, 1.into(), sets(2)).unwrap();
        assert_eq!(planner.remove_entry(Weekday::Mon, id), None);
        assert_eq!(
            planner.remove_entry(Weekday::Tue, id).map(|entry| entry.id),
            Some(id)
        );
        assert_eq!(planner.cards(), self::planner().cards());
    }

    #[test]
    fn test_replace_and_clear_program() {
        let mut planner = planner();
        let mut program = Program::new();
        program.add_entry(Weekday::Sat, catalog().get(1.into()).unwrap(), sets(4));
        planner.replace_program(program.clone());
        assert_eq!(planner.program(), &program);
        assert_ne!(planner.cards(), self::planner().cards());

        planner.clear_program();
        assert!(planner.program().is_empty());
        assert_eq!(planner.cards(), self::planner().cards());
    }

    #[test]
    fn test_add_exercise() {
        let mut planner = planner();
        let exercise = planner
            .add_exercise(NewExercise {
                name: "Farmer's Walk".to_string(),
                primary_muscle: "Forearms".to_string(),
                movement_pattern: "carry".to_string(),
                equipment: "Dumbbell".to_string(),
                auxiliary_muscles: vec![("Traps".to_string(), 50)],
            })
            .unwrap();
        planner.add_entry(Weekday::Fri, exercise.id, sets(2)).unwrap();
        assert_eq!(planner.catalog().len(), 2);
        assert!(matches!(
            planner.add_exercise(NewExercise::default()),
            Err(ExerciseError::Missing("name"))
        ));
        assert_eq!(planner.catalog().len(), 2);
    }

    #[test]
    fn test_register_metric() {
        let mut planner = planner();
        planner
            .register_metric(
                MetricBuilder::new()
                    .id("weekly_overview")
                    .name("Sets")
                    .calculate(|program: &Program| {
                        Ok(WeeklyOverview {
                            total_sets: crate::total_sets(program),
                            ..WeeklyOverview::default()
                        })
                    })
                    .render(|data: &WeeklyOverview| View::Placeholder(data.total_sets.to_string()))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(planner.registry().len(), 4);
        assert_eq!(planner.cards().last().map(|c| c.name.as_str()), Some("Sets"));
        assert_eq!(
            content(&planner, "weekly_overview"),
            Ok(View::Placeholder("0".to_string()))
        );

        planner.unregister_metric("weekly_overview");
        assert_eq!(planner.cards().len(), 3);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut planner = planner();
        planner.add_entry(Weekday::Mon, 1.into(), sets(3)).unwrap();
        let cards = planner.cards().to_vec();
        planner.recompute();
        assert_eq!(planner.cards(), cards);
    }
}
