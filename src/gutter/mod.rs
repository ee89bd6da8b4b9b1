/// Alley extraction and the layout description handed to the typesetter.
pub mod alleys;
