pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("invalid article option: {0}")]
    InvalidOption(String),

    #[error("no combination of article options fits the page area ({page_area} pt^2)")]
    NoFeasibleCombination { page_area: f64 },

    #[error("no layouts found with these article sizes ({attempts} attempts)")]
    NoFeasibleLayout { attempts: u64 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("size report error: {0}")]
    Report(String),

    #[error("typesetter error: {0}")]
    Typesetter(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    pub fn invalid_option(msg: impl Into<String>) -> Self {
        Self::InvalidOption(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    pub fn typesetter(msg: impl Into<String>) -> Self {
        Self::Typesetter(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the two outcomes where the content itself cannot be laid out,
    /// as opposed to bad input or a failing collaborator.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::NoFeasibleCombination { .. } | Self::NoFeasibleLayout { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
