//! Standard math functions

mod math;
mod trig;

pub use math::{Abs, Cbrt, Ceil, Exp, Floor, Ln, Log, Pow, Round, Sqrt};
pub use trig::{Acos, Asin, Atan, Cos, Sin, Tan};
