use std::{fmt, rc::Rc};

use chrono::Weekday;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{Catalog, Exercise, ReadError, WriteError};

#[allow(async_fn_in_trait)]
pub trait ProgramRepository {
    async fn read_program(&self, catalog: &Catalog) -> Result<Option<Program>, ReadError>;
    async fn write_program(&self, program: &Program, catalog: &Catalog) -> Result<(), WriteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProgramService {
    async fn get_program(&self, catalog: &Catalog) -> Result<Option<Program>, ReadError>;
    async fn save_program(&self, program: &Program, catalog: &Catalog) -> Result<(), WriteError>;
}

/// Days of the week in calendar order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[must_use]
pub fn weekday_from_index(index: usize) -> Option<Weekday> {
    WEEK.get(index).copied()
}

#[must_use]
pub fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

#[must_use]
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// A weekly training program.
///
/// Every weekday always has a (possibly empty) list of entries. Entries of a
/// day keep the order in which they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    days: [Vec<ExerciseEntry>; 7],
}

impl Program {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn day(&self, weekday: Weekday) -> &[ExerciseEntry] {
        &self.days[day_index(weekday)]
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[ExerciseEntry])> {
        WEEK.into_iter()
            .zip(self.days.iter().map(Vec::as_slice))
    }

    pub fn entries(&self) -> impl Iterator<Item = (Weekday, &ExerciseEntry)> {
        self.days()
            .flat_map(|(weekday, entries)| entries.iter().map(move |entry| (weekday, entry)))
    }

    pub fn add_entry(
        &mut self,
        weekday: Weekday,
        exercise: Rc<Exercise>,
        sets: Vec<SetConfig>,
    ) -> EntryID {
        let id = EntryID::generate();
        self.push_entry(
            weekday,
            ExerciseEntry {
                id,
                exercise,
                sets,
            },
        );
        id
    }

    pub fn push_entry(&mut self, weekday: Weekday, entry: ExerciseEntry) {
        self.days[day_index(weekday)].push(entry);
    }

    pub fn remove_entry(&mut self, weekday: Weekday, id: EntryID) -> Option<ExerciseEntry> {
        let entries = &mut self.days[day_index(weekday)];
        let position = entries.iter().position(|entry| entry.id == id)?;
        Some(entries.remove(position))
    }

    pub fn clear(&mut self) {
        for entries in &mut self.days {
            entries.clear();
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|entries| !entries.is_empty()).count()
    }
}

/// An exercise placed on a day of the program.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub id: EntryID,
    pub exercise: Rc<Exercise>,
    pub sets: Vec<SetConfig>,
}

impl ExerciseEntry {
    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Short description like "3 sets • 10@2RIR, 10@2RIR, 8@1RIR".
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} sets • {}",
            self.sets.len(),
            self.sets
                .iter()
                .map(|s| format!("{}@{}RIR", s.reps, s.rir))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[derive(Deref, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EntryID(Uuid);

impl EntryID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for EntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for EntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl fmt::Display for EntryID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetConfig {
    pub set_number: u32,
    pub reps: Reps,
    pub rir: RIR,
}

impl SetConfig {
    pub const DEFAULT_COUNT: usize = 3;
    pub const MAX_COUNT: usize = 10;

    /// `count` identical sets numbered from 1.
    #[must_use]
    pub fn series(count: usize, reps: Reps, rir: RIR) -> Vec<SetConfig> {
        (1..=count)
            .map(|n| SetConfig {
                set_number: u32::try_from(n).unwrap_or(u32::MAX),
                reps,
                rir,
            })
            .collect()
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub const MAX: Reps = Reps(999);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value > Self::MAX.0 {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn saturating(value: u32) -> Self {
        Self(value.min(Self::MAX.0))
    }
}

impl Default for Reps {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Reps in reserve, 0 meaning failure.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RIR(u8);

impl RIR {
    pub const FAILURE: RIR = RIR(0);
    pub const MAX: RIR = RIR(4);

    pub fn new(value: u8) -> Result<Self, RIRError> {
        if value > Self::MAX.0 {
            return Err(RIRError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn saturating(value: u8) -> Self {
        Self(value.min(Self::MAX.0))
    }
}

impl Default for RIR {
    fn default() -> Self {
        Self(2)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RIRError {
    #[error("RIR must be in the range 0 to 4 ({0} > 4)")]
    OutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Equipment, KeyMovement, Muscle, Name};

    use super::*;

    fn exercise() -> Rc<Exercise> {
        Rc::new(Exercise {
            id: 7.into(),
            name: Name::new("Romanian Deadlift").unwrap(),
            primary_muscle: Muscle::new("Hamstrings").unwrap(),
            auxiliary_muscles: BTreeMap::new(),
            movement_pattern: KeyMovement::Hinge.into(),
            equipment: Equipment::new("Barbell").unwrap(),
        })
    }

    #[test]
    fn test_program_new_has_all_days() {
        let program = Program::new();
        assert_eq!(
            program.days().map(|(d, e)| (d, e.len())).collect::<Vec<_>>(),
            WEEK.iter().map(|d| (*d, 0)).collect::<Vec<_>>()
        );
        assert!(program.is_empty());
        assert_eq!(program.active_days(), 0);
    }

    #[test]
    fn test_program_add_entry_preserves_order() {
        let mut program = Program::new();
        let sets = SetConfig::series(3, Reps::default(), RIR::default());
        let first = program.add_entry(Weekday::Wed, exercise(), sets.clone());
        let second = program.add_entry(Weekday::Wed, exercise(), sets.clone());
        let third = program.add_entry(Weekday::Sun, exercise(), sets);

        assert_eq!(
            program
                .day(Weekday::Wed)
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>(),
            vec![first, second]
        );
        assert_eq!(
            program.entries().map(|(d, e)| (d, e.id)).collect::<Vec<_>>(),
            vec![
                (Weekday::Wed, first),
                (Weekday::Wed, second),
                (Weekday::Sun, third)
            ]
        );
        assert_eq!(program.num_entries(), 3);
        assert_eq!(program.active_days(), 2);
    }

    #[test]
    fn test_program_remove_entry() {
        let mut program = Program::new();
        let id = program.add_entry(Weekday::Mon, exercise(), vec![]);
        let other = program.add_entry(Weekday::Mon, exercise(), vec![]);

        assert_eq!(program.remove_entry(Weekday::Tue, id), None);
        assert_eq!(program.remove_entry(Weekday::Mon, id).map(|e| e.id), Some(id));
        assert_eq!(program.remove_entry(Weekday::Mon, id), None);
        assert_eq!(
            program
                .day(Weekday::Mon)
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>(),
            vec![other]
        );
    }

    #[test]
    fn test_program_clear() {
        let mut program = Program::new();
        program.add_entry(Weekday::Fri, exercise(), vec![]);
        program.clear();
        assert_eq!(program, Program::new());
    }

    #[rstest]
    #[case(0, Some(Weekday::Mon))]
    #[case(6, Some(Weekday::Sun))]
    #[case(7, None)]
    fn test_weekday_from_index(#[case] index: usize, #[case] expected: Option<Weekday>) {
        assert_eq!(weekday_from_index(index), expected);
    }

    #[test]
    fn test_day_index() {
        for (index, weekday) in WEEK.iter().enumerate() {
            assert_eq!(day_index(*weekday), index);
        }
    }

    #[test]
    fn test_set_config_series() {
        assert_eq!(
            SetConfig::series(2, Reps::new(8).unwrap(), RIR::FAILURE),
            vec![
                SetConfig {
                    set_number: 1,
                    reps: Reps::new(8).unwrap(),
                    rir: RIR::FAILURE
                },
                SetConfig {
                    set_number: 2,
                    reps: Reps::new(8).unwrap(),
                    rir: RIR::FAILURE
                },
            ]
        );
        assert_eq!(SetConfig::series(0, Reps::default(), RIR::default()), vec![]);
    }

    #[test]
    fn test_exercise_entry_summary() {
        let entry = ExerciseEntry {
            id: 1.into(),
            exercise: exercise(),
            sets: vec![
                SetConfig {
                    set_number: 1,
                    reps: Reps::new(10).unwrap(),
                    rir: RIR::new(2).unwrap(),
                },
                SetConfig {
                    set_number: 2,
                    reps: Reps::new(8).unwrap(),
                    rir: RIR::new(1).unwrap(),
                },
            ],
        };
        assert_eq!(entry.num_sets(), 2);
        assert_eq!(entry.summary(), "2 sets • 10@2RIR, 8@1RIR");
    }

    #[rstest]
    #[case("10", Ok(Reps(10)))]
    #[case(" 0 ", Ok(Reps(0)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("ten", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case(0, Ok(RIR::FAILURE))]
    #[case(4, Ok(RIR::MAX))]
    #[case(5, Err(RIRError::OutOfRange(5)))]
    fn test_rir_new(#[case] value: u8, #[case] expected: Result<RIR, RIRError>) {
        assert_eq!(RIR::new(value), expected);
    }

    #[rstest]
    #[case(12, 3, Reps(12), RIR(3))]
    #[case(1000, 5, Reps::MAX, RIR::MAX)]
    #[case(u32::MAX, u8::MAX, Reps::MAX, RIR::MAX)]
    fn test_saturating(
        #[case] reps: u32,
        #[case] rir: u8,
        #[case] expected_reps: Reps,
        #[case] expected_rir: RIR,
    ) {
        assert_eq!(Reps::saturating(reps), expected_reps);
        assert_eq!(RIR::saturating(rir), expected_rir);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(u32::from(Reps::default()), 10);
        assert_eq!(u8::from(RIR::default()), 2);
    }
}
