// Application layer - Use case interactors

pub mod container;
pub mod inspect_interactor;
pub mod pipeline_interactor;
pub mod report;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, SubtitleInspection};
pub use pipeline_interactor::PipelineInteractor;
pub use report::{BatchReport, SkippedUnit};
