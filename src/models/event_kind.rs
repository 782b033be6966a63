use serde::Serialize;

/// Canonical classification of a raw clock event.
///
/// Raw records carry a free-text motive (device firmware) or a numeric
/// motive code (manual entry). Both are normalized here; anything that
/// matches neither table becomes `Unclassified`, which is kept for the
/// history listing but excluded from every duration computation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    Entrance,
    Exit,
    MealOut,
    MealIn,
    Unclassified,
}

impl EventKind {
    /// Normalize a raw motive. The text table wins; a numeric code 1..4 is
    /// the fallback for devices that only report codes. Unmatched input is
    /// `Unclassified`, never an error.
    pub fn from_motive(text: &str, code: Option<i64>) -> Self {
        match text.trim().to_lowercase().as_str() {
            "entrada" => return Self::Entrance,
            "salida" => return Self::Exit,
            "salida de comida" | "salida comida" => return Self::MealOut,
            "entrada de comida" | "entrada comida" => return Self::MealIn,
            _ => {}
        }

        match code {
            Some(1) => Self::Entrance,
            Some(2) => Self::Exit,
            Some(3) => Self::MealIn,
            Some(4) => Self::MealOut,
            _ => Self::Unclassified,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Entrance => "entrance",
            EventKind::Exit => "exit",
            EventKind::MealOut => "meal_out",
            EventKind::MealIn => "meal_in",
            EventKind::Unclassified => "unclassified",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entrance" => Some(EventKind::Entrance),
            "exit" => Some(EventKind::Exit),
            "meal_out" => Some(EventKind::MealOut),
            "meal_in" => Some(EventKind::MealIn),
            "unclassified" => Some(EventKind::Unclassified),
            _ => None,
        }
    }

    /// Human-readable label for history listings.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Entrance => "Entrance",
            EventKind::Exit => "Exit",
            EventKind::MealOut => "Meal out",
            EventKind::MealIn => "Meal back",
            EventKind::Unclassified => "Movement",
        }
    }

    /// Whether the event participates in worked-duration math.
    pub fn counts_for_duration(&self) -> bool {
        !matches!(self, EventKind::Unclassified)
    }
}
