/// Driving the external LaTeX toolchain.
pub mod latex;
