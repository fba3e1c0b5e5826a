//! Coach feedback catalog.
//!
//! # Responsibility
//! - Enumerate every rule outcome as an explicit `Category` tag.
//! - Map each category to exactly one fixed `Evaluation` value.
//!
//! # Invariants
//! - The category → evaluation mapping is total and deterministic.
//! - Selection logic switches on `Evaluation::category`, never on asset text.

use serde::Serialize;

/// Discrete rule outcome that determines which feedback is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    FirstRecord,
    WeightDown,
    WeightUp,
    WeightStable,
    SleepGood,
    SleepOk,
    SleepLow,
    CalorieUnder,
    CalorieBalanced,
    CalorieOver,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstRecord => "FIRST_RECORD",
            Self::WeightDown => "WEIGHT_DOWN",
            Self::WeightUp => "WEIGHT_UP",
            Self::WeightStable => "WEIGHT_STABLE",
            Self::SleepGood => "SLEEP_GOOD",
            Self::SleepOk => "SLEEP_OK",
            Self::SleepLow => "SLEEP_LOW",
            Self::CalorieUnder => "CALORIE_UNDER",
            Self::CalorieBalanced => "CALORIE_BALANCED",
            Self::CalorieOver => "CALORIE_OVER",
        }
    }

    /// Returns the fixed catalog evaluation for this category.
    pub fn evaluation(self) -> Evaluation {
        let (message, image_ref, audio_ref) = match self {
            Self::FirstRecord => (
                "First record! This is where the work starts.",
                "image/coach_normal_0000.png",
                "voice/001_first_record.wav",
            ),
            Self::WeightDown => (
                "Well, well, not bad. Keep this pace going.",
                "image/coach_pointing_0003.png",
                "voice/006_not_bad.wav",
            ),
            Self::WeightUp => (
                "Hmm... what did you eat yesterday? Ramen? Fried chicken? That explains it.",
                "image/coach_angry_0001.png",
                "voice/008_what_did_you_eat.wav",
            ),
            Self::WeightStable => (
                "Unmoving as a mountain. Could be a plateau, no need to rush.",
                "image/coach_normal_0000.png",
                "voice/010_unmoving_mountain.wav",
            ),
            Self::SleepGood => (
                "Sleeping properly... you know what matters. Good job.",
                "image/coach_pointing_0003.png",
                "voice/022_sleeping_properly.wav",
            ),
            Self::SleepOk => (
                "That's a reasonable amount of sleep. Fine by most standards.",
                "image/coach_normal_0000.png",
                "voice/024_reasonable_sleep.wav",
            ),
            Self::SleepLow => (
                "Look... that is far too little sleep. Your eyes are wide open. Go to bed.",
                "image/coach_angry_0001.png",
                "voice/026_go_to_bed.wav",
            ),
            Self::CalorieUnder => (
                "The art of restraint... so stoic it's worrying. Have some chocolate now and then.",
                "image/coach_sad_0002.png",
                "voice/014_art_of_restraint.wav",
            ),
            Self::CalorieBalanced => (
                "So this is what a balanced person looks like. I'm a little impressed.",
                "image/coach_pointing_0003.png",
                "voice/016_balanced_person.wav",
            ),
            Self::CalorieOver => (
                "...Hmm. I was going to pretend not to notice, but that's a calorie bomb.",
                "image/coach_angry_0001.png",
                "voice/018_calorie_bomb.wav",
            ),
        };

        Evaluation {
            category: self,
            message,
            image_ref,
            audio_ref,
        }
    }
}

/// Immutable feedback unit handed to the display collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Rule outcome this feedback belongs to.
    pub category: Category,
    pub message: &'static str,
    /// Character image asset identifier.
    pub image_ref: &'static str,
    /// Voice clip asset identifier.
    pub audio_ref: &'static str,
}
