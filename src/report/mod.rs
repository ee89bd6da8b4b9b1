//! Text formats exchanged with the typesetter: the size report it prints during the
//! sizing pass and the layout file it reads back for the final pass.

/// Layout-file writer.
pub mod lay_file;
/// Size-report reader.
pub mod size_report;
