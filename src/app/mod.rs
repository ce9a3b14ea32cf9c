// Application layer - Use case interactors and their wiring

pub mod container;
pub mod staging;
pub mod trim_interactor;

// Re-export interactors
pub use container::AppContainer;
pub use staging::StagingArea;
pub use trim_interactor::TrimInteractor;
