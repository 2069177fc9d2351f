pub mod engine;
pub mod export;
pub mod extract;
pub mod io;
pub mod locate;
pub mod progress;
pub mod report;
pub mod wer;

pub mod prelude {
    pub use crate::extract::ExtractedReport;
    pub use crate::progress::Reporter;
}
