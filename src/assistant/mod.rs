// Module declarations
pub(crate) mod assistant_constants;
pub(crate) mod assistant_service;
pub(crate) mod assistant_traits;

// Re-export the public interface
pub use assistant_constants::*;
pub use assistant_service::AssistantService;
pub use assistant_traits::{AssistantServiceTrait, TextGeneratorTrait};
