use std::{collections::BTreeSet, fmt};

use crate::{MovementPattern, Muscle, Program, Stimulus};

/// Weekly number of sets attributed to a muscle, with a resolution of a tenth of a set.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u32);

impl Volume {
    pub const ZERO: Volume = Volume(0);

    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    #[must_use]
    pub const fn tenths(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Volume> for f32 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: Volume) -> Self {
        value.0 as f32 / 10.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 % 10 == 0 {
            write!(f, "{}", self.0 / 10)
        } else {
            write!(f, "{}.{}", self.0 / 10, self.0 % 10)
        }
    }
}

/// Sets of all entries with `muscle` as primary muscle, plus the sets of all
/// entries training `muscle` as auxiliary muscle weighted by its stimulus.
///
/// Auxiliary involvement below `threshold` is ignored. The result is rounded
/// half up to a tenth of a set.
#[must_use]
pub fn muscle_volume(program: &Program, muscle: &Muscle, threshold: Stimulus) -> Volume {
    // hundredths of a set
    let weighted: u64 = program
        .entries()
        .map(|(_, entry)| {
            let sets = entry.num_sets() as u64;
            let mut result = 0;
            if entry.exercise.primary_muscle == *muscle {
                result += sets * u64::from(*Stimulus::PRIMARY);
            }
            if let Some(stimulus) = entry.exercise.auxiliary_stimulus(muscle, threshold) {
                result += sets * u64::from(*stimulus);
            }
            result
        })
        .sum();
    Volume(u32::try_from((weighted + 5) / 10).unwrap_or(u32::MAX))
}

/// Number of distinct weekdays on which `muscle` is trained.
#[must_use]
pub fn muscle_frequency(program: &Program, muscle: &Muscle, threshold: Stimulus) -> usize {
    program
        .days()
        .filter(|(_, entries)| {
            entries
                .iter()
                .any(|entry| entry.exercise.trains(muscle, threshold))
        })
        .count()
}

/// All primary muscles and qualifying auxiliary muscles, sorted by name.
#[must_use]
pub fn targeted_muscles(program: &Program, threshold: Stimulus) -> Vec<Muscle> {
    program
        .entries()
        .flat_map(|(_, entry)| entry.exercise.targeted_muscles(threshold).cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[must_use]
pub fn movement_patterns(program: &Program) -> BTreeSet<MovementPattern> {
    program
        .entries()
        .map(|(_, entry)| entry.exercise.movement_pattern.clone())
        .collect()
}

#[must_use]
pub fn total_sets(program: &Program) -> usize {
    program.entries().map(|(_, entry)| entry.num_sets()).sum()
}
