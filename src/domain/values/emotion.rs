use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the trader felt about a trade. Drives the card color and emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Confident,
    Happy,
    Excited,
    Neutral,
    Anxious,
    Fearful,
    Greedy,
    Frustrated,
    Angry,
    Sad,
}

impl Emotion {
    pub const ALL: [Emotion; 10] = [
        Emotion::Confident,
        Emotion::Happy,
        Emotion::Excited,
        Emotion::Neutral,
        Emotion::Anxious,
        Emotion::Fearful,
        Emotion::Greedy,
        Emotion::Frustrated,
        Emotion::Angry,
        Emotion::Sad,
    ];

    /// Card background color, as a CSS hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Confident => "#C8E6C9",
            Emotion::Happy => "#FFF59D",
            Emotion::Excited => "#FFCC80",
            Emotion::Neutral => "#E0E0E0",
            Emotion::Anxious => "#B3E5FC",
            Emotion::Fearful => "#D1C4E9",
            Emotion::Greedy => "#DCEDC8",
            Emotion::Frustrated => "#FFAB91",
            Emotion::Angry => "#EF9A9A",
            Emotion::Sad => "#90CAF9",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Confident => "😎",
            Emotion::Happy => "😊",
            Emotion::Excited => "🤩",
            Emotion::Neutral => "😐",
            Emotion::Anxious => "😰",
            Emotion::Fearful => "😨",
            Emotion::Greedy => "🤑",
            Emotion::Frustrated => "😤",
            Emotion::Angry => "😡",
            Emotion::Sad => "😢",
        }
    }

    pub fn from_emoji(emoji: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.emoji() == emoji)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emotion::Confident => write!(f, "confident"),
            Emotion::Happy => write!(f, "happy"),
            Emotion::Excited => write!(f, "excited"),
            Emotion::Neutral => write!(f, "neutral"),
            Emotion::Anxious => write!(f, "anxious"),
            Emotion::Fearful => write!(f, "fearful"),
            Emotion::Greedy => write!(f, "greedy"),
            Emotion::Frustrated => write!(f, "frustrated"),
            Emotion::Angry => write!(f, "angry"),
            Emotion::Sad => write!(f, "sad"),
        }
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(emotion) = Emotion::from_emoji(trimmed) {
            return Ok(emotion);
        }
        match trimmed.to_lowercase().as_str() {
            "confident" => Ok(Emotion::Confident),
            "happy" => Ok(Emotion::Happy),
            "excited" => Ok(Emotion::Excited),
            "neutral" => Ok(Emotion::Neutral),
            "anxious" => Ok(Emotion::Anxious),
            "fearful" => Ok(Emotion::Fearful),
            "greedy" => Ok(Emotion::Greedy),
            "frustrated" => Ok(Emotion::Frustrated),
            "angry" => Ok(Emotion::Angry),
            "sad" => Ok(Emotion::Sad),
            _ => Err(format!("Unknown emotion: {s}")),
        }
    }
}
