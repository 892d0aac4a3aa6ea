pub mod coordinator;
pub mod debounce;
pub mod device;
pub mod document;
pub mod error;
pub mod export;
pub mod feedback;
pub mod size;

pub use coordinator::{Artifact, EncodeStyle, ExportCoordinator};
pub use error::QrStudioError;
pub use export::{ExportFile, ExportFormat};
pub use size::TargetSize;
