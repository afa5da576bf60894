//! The five-step inspection wizard.
//!
//! ```text
//! 1 SelectInspector -> 2 BusinessIdentity -> 3 SelectForm -> 4 Checklist -> 5 SignAndFinalize
//!                                         \______(form preselected)______/
//! ```

mod session;
mod step;

pub use session::{PAD_HEIGHT, PAD_WIDTH, PhotoBatch, WizardSession};
pub use step::{EntryContext, Phase, Step};
