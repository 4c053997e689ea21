//! Domain model for TMMi assessments.
//!
//! Questions come from a static catalog; answers belong to an assessment
//! snapshot; assessments belong to an organization. Everything the scoring
//! engine derives from these lives in [`crate::scoring`] and is never stored.

mod answer;
mod assessment;
mod level;
mod question;

pub use answer::*;
pub use assessment::*;
pub use level::*;
pub use question::*;
