/// Validation failures surfaced by record parsing, configuration and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid completion date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid week key '{value}': expected YYYY-W## with week 01-53")]
    InvalidWeekKey { value: String },

    #[error("unknown difficulty '{value}': expected Easy, Medium or Hard")]
    UnknownDifficulty { value: String },

    #[error("record {id} has an empty person name")]
    EmptyPerson { id: String },

    #[error("weekly target must be at least 1")]
    InvalidTarget,

    #[error("avatar list must not be empty")]
    NoAvatars,
}
