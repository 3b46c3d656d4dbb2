//! Closed-loop controllers that turn a target and measured state into a correction.
//!
//! The dynamics never call a controller themselves; the host feeds a
//! [`Correction`] with target and actual state vectors and converts the
//! correction into a motor command.

mod pid;
pub use pid::{Pid, PidController};

/// A controller over `N` dimensions.
pub trait Correction<const N: usize> {
    /// Calculate the correction that moves `actual` towards `target`.
    fn correction(&mut self, target: &[f64; N], actual: &[f64; N]) -> [f64; N];
}

impl<C, const N: usize> Correction<N> for &mut C
where
    C: Correction<N> + ?Sized,
{
    fn correction(&mut self, target: &[f64; N], actual: &[f64; N]) -> [f64; N] {
        (**self).correction(target, actual)
    }
}
