use chrono::Weekday;

use crate::{
    Cell, ChecklistItem, DayTile, KeyMovement, Metric, MetricError, MovementPattern, Muscle,
    Program, Property, Stimulus, Tile, Tone, View, Volume, VolumeStatus, VolumeTarget,
    VolumeTargets, day_name, movement_patterns, muscle_volume, targeted_muscles, total_sets,
};

pub struct VolumePerMuscleMetric {
    threshold: Stimulus,
    targets: VolumeTargets,
}

impl VolumePerMuscleMetric {
    #[must_use]
    pub fn new(threshold: Stimulus, targets: VolumeTargets) -> Self {
        Self { threshold, targets }
    }
}

impl Default for VolumePerMuscleMetric {
    fn default() -> Self {
        Self::new(Stimulus::AUXILIARY_THRESHOLD, VolumeTargets::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MuscleVolume {
    pub muscle: Muscle,
    pub volume: Volume,
    pub target: Option<VolumeTarget>,
    pub status: VolumeStatus,
}

impl Metric for VolumePerMuscleMetric {
    type Data = Vec<MuscleVolume>;

    fn id(&self) -> &str {
        "volume_per_muscle"
    }

    fn name(&self) -> &str {
        "Volume per Muscle Group"
    }

    fn description(&self) -> Option<&str> {
        Some("Shows weekly sets per muscle with target ranges")
    }

    /// Muscles with nonzero volume, highest volume first. Muscles with equal
    /// volume stay in alphabetical order.
    fn calculate(&self, program: &Program) -> Result<Self::Data, MetricError> {
        let mut data = targeted_muscles(program, self.threshold)
            .into_iter()
            .map(|muscle| {
                let volume = muscle_volume(program, &muscle, self.threshold);
                MuscleVolume {
                    target: self.targets.get(&muscle),
                    status: self.targets.status(&muscle, volume),
                    muscle,
                    volume,
                }
            })
            .filter(|m| !m.volume.is_zero())
            .collect::<Vec<_>>();
        data.sort_by(|a, b| b.volume.cmp(&a.volume));
        Ok(data)
    }

    fn render(&self, data: &Self::Data) -> View {
        if data.is_empty() {
            return View::Placeholder("Add exercises to see volume metrics".to_string());
        }
        View::Table {
            columns: vec![
                "Muscle".to_string(),
                "Sets/Week".to_string(),
                "Target".to_string(),
            ],
            rows: data
                .iter()
                .map(|m| {
                    let (symbol, tone) = match m.status {
                        VolumeStatus::Below => (" ↓", Tone::Warning),
                        VolumeStatus::OnTarget => (" ✓", Tone::Success),
                        VolumeStatus::OverTarget => (" ↑", Tone::Danger),
                        VolumeStatus::Neutral => ("", Tone::Neutral),
                    };
                    vec![
                        Cell::new(m.muscle.to_string(), Tone::Neutral),
                        Cell::new(format!("{}{symbol}", m.volume), tone),
                        Cell::new(
                            m.target.map_or("-".to_string(), |t| t.to_string()),
                            Tone::Muted,
                        ),
                    ]
                })
                .collect(),
        }
    }
}

#[derive(Default)]
pub struct MovementPatternsMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCoverage {
    pub movement: KeyMovement,
    pub covered: bool,
}

impl Metric for MovementPatternsMetric {
    type Data = Vec<PatternCoverage>;

    fn id(&self) -> &str {
        "movement_patterns"
    }

    fn name(&self) -> &str {
        "Movement Patterns"
    }

    fn description(&self) -> Option<&str> {
        Some("Shows which key movement patterns are covered")
    }

    fn calculate(&self, program: &Program) -> Result<Self::Data, MetricError> {
        let patterns = movement_patterns(program);
        Ok(KeyMovement::iter()
            .map(|movement| PatternCoverage {
                movement: *movement,
                covered: patterns.contains(&MovementPattern::from(*movement)),
            })
            .collect())
    }

    fn render(&self, data: &Self::Data) -> View {
        View::Checklist(
            data.iter()
                .map(|p| ChecklistItem {
                    label: p.movement.name().to_string(),
                    checked: p.covered,
                })
                .collect(),
        )
    }
}

pub struct WeeklyOverviewMetric {
    threshold: Stimulus,
}

impl WeeklyOverviewMetric {
    #[must_use]
    pub fn new(threshold: Stimulus) -> Self {
        Self { threshold }
    }
}

impl Default for WeeklyOverviewMetric {
    fn default() -> Self {
        Self::new(Stimulus::AUXILIARY_THRESHOLD)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyOverview {
    pub total_exercises: usize,
    pub total_sets: usize,
    pub total_muscles: usize,
    pub patterns_covered: usize,
    pub days_with_workouts: usize,
    /// Total sets divided by the number of training days, rounded down.
    pub avg_sets_per_day: usize,
}

impl Metric for WeeklyOverviewMetric {
    type Data = WeeklyOverview;

    fn id(&self) -> &str {
        "weekly_overview"
    }

    fn name(&self) -> &str {
        "Weekly Overview"
    }

    fn description(&self) -> Option<&str> {
        Some("Summary statistics for the week")
    }

    fn calculate(&self, program: &Program) -> Result<Self::Data, MetricError> {
        let total_sets = total_sets(program);
        let days_with_workouts = program.active_days();
        Ok(WeeklyOverview {
            total_exercises: program.num_entries(),
            total_sets,
            total_muscles: targeted_muscles(program, self.threshold).len(),
            patterns_covered: movement_patterns(program).len(),
            days_with_workouts,
            avg_sets_per_day: total_sets.checked_div(days_with_workouts).unwrap_or(0),
        })
    }

    fn render(&self, data: &Self::Data) -> View {
        if data.total_exercises == 0 {
            return View::Placeholder("Add exercises to see weekly overview".to_string());
        }
        View::Tiles(
            [
                (data.total_exercises, "Total Exercises"),
                (data.total_sets, "Total Sets"),
                (data.total_muscles, "Muscles Targeted"),
                (data.patterns_covered, "Movement Patterns"),
                (data.days_with_workouts, "Training Days"),
                (data.avg_sets_per_day, "Avg Sets/Day"),
            ]
            .into_iter()
            .map(|(value, label)| Tile {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        )
    }
}

#[derive(Default)]
pub struct TrainingSplitMetric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingDay {
    pub weekday: Weekday,
    pub exercise_count: usize,
    pub total_sets: usize,
    pub has_workout: bool,
}

impl Metric for TrainingSplitMetric {
    type Data = Vec<TrainingDay>;

    fn id(&self) -> &str {
        "training_split"
    }

    fn name(&self) -> &str {
        "Training Split"
    }

    fn description(&self) -> Option<&str> {
        Some("Visual representation of training days")
    }

    fn calculate(&self, program: &Program) -> Result<Self::Data, MetricError> {
        Ok(program
            .days()
            .map(|(weekday, entries)| TrainingDay {
                weekday,
                exercise_count: entries.len(),
                total_sets: entries.iter().map(|e| e.num_sets()).sum(),
                has_workout: !entries.is_empty(),
            })
            .collect())
    }

    fn render(&self, data: &Self::Data) -> View {
        View::Days(
            data.iter()
                .map(|day| DayTile {
                    name: day_name(day.weekday).to_string(),
                    sets: day.total_sets,
                    active: day.has_workout,
                })
                .collect(),
        )
    }
}
