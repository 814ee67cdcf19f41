/// Mock implementations for testing
mod mock_bom_repository;
mod mock_notifier;

pub use mock_bom_repository::MockBomRepository;
pub use mock_notifier::MockNotifier;
