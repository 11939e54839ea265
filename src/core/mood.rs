/// Emotional tag attached to the character for a bounded time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Angry,
    Sad,
    Surprised,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Neutral,
        Mood::Happy,
        Mood::Angry,
        Mood::Sad,
        Mood::Surprised,
    ];

    /// Tag used for the bubble's `data-mood` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Angry => "angry",
            Mood::Sad => "sad",
            Mood::Surprised => "surprised",
        }
    }

    /// Moods that also fire the pop overlay when a reply lands.
    pub fn triggers_pop(self) -> bool {
        matches!(self, Mood::Happy | Mood::Surprised)
    }
}

/// The active mood and the time (seconds) at which it lapses back to neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodState {
    mood: Mood,
    expires_at: f64,
}

impl Default for MoodState {
    fn default() -> Self {
        Self {
            mood: Mood::Neutral,
            expires_at: 0.0,
        }
    }
}

impl MoodState {
    pub fn set(&mut self, mood: Mood, now: f64, valid_for_sec: f64) {
        self.mood = mood;
        self.expires_at = now + valid_for_sec.max(0.0);
    }

    /// Mood in effect at `now`, without mutating anything.
    pub fn current(&self, now: f64) -> Mood {
        if now >= self.expires_at {
            Mood::Neutral
        } else {
            self.mood
        }
    }

    /// Drop an expired mood. Returns true if a revert happened.
    pub fn expire(&mut self, now: f64) -> bool {
        if self.mood != Mood::Neutral && now >= self.expires_at {
            self.mood = Mood::Neutral;
            return true;
        }
        false
    }
}
