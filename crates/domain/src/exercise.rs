use std::{collections::BTreeMap, fmt, iter, slice::Iter};

use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{Name, NameError};

/// Numeric exercise ids up to this value are reserved for the built-in catalog.
pub const BUILT_IN_THRESHOLD: u32 = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub primary_muscle: Muscle,
    pub auxiliary_muscles: BTreeMap<Muscle, Stimulus>,
    pub movement_pattern: MovementPattern,
    pub equipment: Equipment,
}

impl Exercise {
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.id.is_custom()
    }

    /// Stimulus of an auxiliary muscle, if it reaches `threshold`.
    ///
    /// Auxiliary involvement below the threshold is treated as no involvement at all.
    #[must_use]
    pub fn auxiliary_stimulus(&self, muscle: &Muscle, threshold: Stimulus) -> Option<Stimulus> {
        self.auxiliary_muscles
            .get(muscle)
            .copied()
            .filter(|stimulus| *stimulus > Stimulus::NONE && *stimulus >= threshold)
    }

    #[must_use]
    pub fn trains(&self, muscle: &Muscle, threshold: Stimulus) -> bool {
        self.primary_muscle == *muscle || self.auxiliary_stimulus(muscle, threshold).is_some()
    }

    /// The primary muscle followed by all qualifying auxiliary muscles.
    pub fn targeted_muscles(&self, threshold: Stimulus) -> impl Iterator<Item = &Muscle> {
        iter::once(&self.primary_muscle).chain(
            self.auxiliary_muscles
                .keys()
                .filter(move |m| self.auxiliary_stimulus(m, threshold).is_some()),
        )
    }

    #[must_use]
    pub fn auxiliary_summary(&self) -> String {
        if self.auxiliary_muscles.is_empty() {
            return String::from("None");
        }
        self.auxiliary_muscles
            .iter()
            .map(|(muscle, stimulus)| format!("{muscle} ({stimulus}%)"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExerciseID {
    Numeric(u32),
    Generated(Uuid),
}

impl ExerciseID {
    #[must_use]
    pub fn generate() -> Self {
        Self::Generated(Uuid::new_v4())
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        match self {
            ExerciseID::Numeric(id) => *id > BUILT_IN_THRESHOLD,
            ExerciseID::Generated(_) => true,
        }
    }
}

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self::Numeric(value)
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self::Generated(value)
    }
}

impl fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExerciseID::Numeric(id) => write!(f, "{id}"),
            ExerciseID::Generated(uuid) => write!(f, "{uuid}"),
        }
    }
}

macro_rules! label {
    ($name: ident, $field: literal) => {
        #[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: &str) -> Result<Self, ExerciseError> {
                let trimmed_value = value.trim();

                if trimmed_value.is_empty() {
                    return Err(ExerciseError::Missing($field));
                }

                Ok(Self(trimmed_value.to_string()))
            }
        }
    };
}

label!(Muscle, "muscle");
label!(MovementPattern, "movement pattern");
label!(Equipment, "equipment");

impl MovementPattern {
    #[must_use]
    pub fn key_movement(&self) -> Option<KeyMovement> {
        KeyMovement::from_key(&self.0)
    }

    /// Human readable form of the tag, e.g. "horizontal push".
    #[must_use]
    pub fn display_name(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl From<KeyMovement> for MovementPattern {
    fn from(value: KeyMovement) -> Self {
        Self(value.key().to_string())
    }
}

/// Share of the primary muscle's training effect, in percent.
#[derive(Deref, Debug, Display, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stimulus(u32);

impl Stimulus {
    pub const PRIMARY: Stimulus = Stimulus(100);
    pub const AUXILIARY_THRESHOLD: Stimulus = Stimulus(40);
    pub const NONE: Stimulus = Stimulus(0);

    pub fn new(value: u32) -> Result<Self, StimulusError> {
        if value > 100 {
            return Err(StimulusError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Like [`Stimulus::new`], but values above 100 are capped.
    #[must_use]
    pub fn saturating(value: u32) -> Self {
        Self(value.min(Self::PRIMARY.0))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StimulusError {
    #[error("Percentage must be 100 or less ({0} > 100)")]
    OutOfRange(u32),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExerciseError {
    #[error("The {0} is required")]
    Missing(&'static str),
    #[error(transparent)]
    InvalidStimulus(#[from] StimulusError),
}

impl From<NameError> for ExerciseError {
    fn from(value: NameError) -> Self {
        match value {
            NameError::Empty => ExerciseError::Missing("name"),
        }
    }
}

/// User input for a custom exercise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub primary_muscle: String,
    pub movement_pattern: String,
    pub equipment: String,
    pub auxiliary_muscles: Vec<(String, u32)>,
}

impl NewExercise {
    pub fn into_exercise(self, id: ExerciseID) -> Result<Exercise, ExerciseError> {
        let name = Name::new(&self.name)?;
        let primary_muscle = Muscle::new(&self.primary_muscle)?;
        let movement_pattern = MovementPattern::new(&self.movement_pattern)?;
        let equipment = Equipment::new(&self.equipment)?;

        let mut auxiliary_muscles = BTreeMap::new();
        for (muscle, percentage) in self.auxiliary_muscles {
            if muscle.trim().is_empty() || percentage == 0 {
                continue;
            }
            auxiliary_muscles.insert(Muscle::new(&muscle)?, Stimulus::new(percentage)?);
        }

        Ok(Exercise {
            id,
            name,
            primary_muscle,
            auxiliary_muscles,
            movement_pattern,
            equipment,
        })
    }
}

/// The seven movement patterns a balanced program is expected to cover.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum KeyMovement {
    HorizontalPush,
    VerticalPush,
    HorizontalPull,
    VerticalPull,
    Squat,
    Hinge,
    Carry,
}

impl KeyMovement {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            KeyMovement::HorizontalPush => "horizontal_push",
            KeyMovement::VerticalPush => "vertical_push",
            KeyMovement::HorizontalPull => "horizontal_pull",
            KeyMovement::VerticalPull => "vertical_pull",
            KeyMovement::Squat => "squat",
            KeyMovement::Hinge => "hinge",
            KeyMovement::Carry => "carry",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        KeyMovement::iter().copied().find(|m| m.key() == key)
    }
}

impl Property for KeyMovement {
    fn iter() -> Iter<'static, KeyMovement> {
        static KEY_MOVEMENTS: [KeyMovement; 7] = [
            KeyMovement::HorizontalPush,
            KeyMovement::VerticalPush,
            KeyMovement::HorizontalPull,
            KeyMovement::VerticalPull,
            KeyMovement::Squat,
            KeyMovement::Hinge,
            KeyMovement::Carry,
        ];
        KEY_MOVEMENTS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            KeyMovement::HorizontalPush => "Horizontal Push (Bench, Push-ups)",
            KeyMovement::VerticalPush => "Vertical Push (Overhead Press)",
            KeyMovement::HorizontalPull => "Horizontal Pull (Rows)",
            KeyMovement::VerticalPull => "Vertical Pull (Pull-ups, Lat Pulldown)",
            KeyMovement::Squat => "Squat Pattern",
            KeyMovement::Hinge => "Hinge Pattern (Deadlift, RDL)",
            KeyMovement::Carry => "Carry/Loaded Movement",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseFilter {
    pub search: String,
    pub movement_pattern: Option<MovementPattern>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises.filter(|e| self.matches(e)).collect()
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || exercise.name.as_ref().to_lowercase().contains(&search)
            || exercise
                .primary_muscle
                .as_ref()
                .to_lowercase()
                .contains(&search)
            || exercise.equipment.as_ref().to_lowercase().contains(&search);
        let matches_pattern = self
            .movement_pattern
            .as_ref()
            .is_none_or(|pattern| *pattern == exercise.movement_pattern);
        matches_search && matches_pattern
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.movement_pattern.is_none()
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}
