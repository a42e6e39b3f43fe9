use std::{collections::BTreeMap, fmt};

use crate::{Muscle, Volume};

/// Recommended number of weekly sets for a muscle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeTarget {
    pub min: u32,
    pub max: u32,
}

impl VolumeTarget {
    #[must_use]
    pub fn status(&self, volume: Volume) -> VolumeStatus {
        let tenths = volume.tenths();
        if tenths < self.min * 10 {
            VolumeStatus::Below
        } else if tenths > self.max * 10 {
            VolumeStatus::OverTarget
        } else {
            VolumeStatus::OnTarget
        }
    }
}

impl fmt::Display for VolumeTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeStatus {
    Below,
    OnTarget,
    OverTarget,
    Neutral,
}

impl fmt::Display for VolumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            VolumeStatus::Below => "below",
            VolumeStatus::OnTarget => "on-target",
            VolumeStatus::OverTarget => "over-target",
            VolumeStatus::Neutral => "neutral",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeTargets(BTreeMap<Muscle, VolumeTarget>);

impl VolumeTargets {
    #[must_use]
    pub fn get(&self, muscle: &Muscle) -> Option<VolumeTarget> {
        self.0.get(muscle).copied()
    }

    /// Compare `volume` against the target band of `muscle`.
    #[must_use]
    pub fn status(&self, muscle: &Muscle, volume: Volume) -> VolumeStatus {
        self.get(muscle)
            .map_or(VolumeStatus::Neutral, |target| target.status(volume))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Muscle, &VolumeTarget)> {
        self.0.iter()
    }
}

impl FromIterator<(Muscle, VolumeTarget)> for VolumeTargets {
    fn from_iter<T: IntoIterator<Item = (Muscle, VolumeTarget)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Default for VolumeTargets {
    fn default() -> Self {
        DEFAULT_TARGETS
            .iter()
            .filter_map(|(muscle, min, max)| {
                Muscle::new(muscle)
                    .ok()
                    .map(|m| (m, VolumeTarget { min: *min, max: *max }))
            })
            .collect()
    }
}

const DEFAULT_TARGETS: [(&str, u32, u32); 28] = [
    ("Chest", 12, 20),
    ("Upper Chest", 8, 16),
    ("Back", 12, 20),
    ("Lats", 10, 18),
    ("Upper Back", 10, 18),
    ("Quads", 10, 16),
    ("Hamstrings", 8, 14),
    ("Glutes", 8, 14),
    ("Shoulders", 12, 20),
    ("Side Delts", 12, 20),
    ("Rear Delts", 10, 18),
    ("Front Delts", 8, 14),
    ("Biceps", 10, 18),
    ("Triceps", 10, 18),
    ("Brachialis", 8, 14),
    ("Calves", 8, 14),
    ("Abs", 10, 20),
    ("Core", 10, 20),
    ("Forearms", 8, 12),
    ("Traps", 8, 14),
    ("Glute Medius", 8, 14),
    ("Adductors", 6, 12),
    ("Tibialis", 6, 12),
    ("Hip Flexors", 6, 10),
    ("Rotator Cuff", 8, 14),
    ("Rhomboids", 8, 14),
    ("Obliques", 8, 14),
    ("Lower Back", 10, 16),
];
