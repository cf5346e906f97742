// Application layer - Use case interactors

pub mod compile_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod verify_interactor;

// Re-export interactors
pub use compile_interactor::CompileInteractor;
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, InspectReport};
pub use verify_interactor::VerifyInteractor;
