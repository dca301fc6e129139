pub mod appwrite_profile_repository;
pub mod memory;
pub mod profile_repository;

pub use appwrite_profile_repository::AppwriteProfileRepository;
pub use memory::InMemoryProfileRepository;
pub use profile_repository::{DisabledProfileRepository, ProfileRecord, ProfileRepository};
