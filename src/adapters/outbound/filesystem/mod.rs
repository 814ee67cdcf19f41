/// Filesystem adapters for snapshot reading and output writing
mod file_writer;
mod snapshot_repository;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use snapshot_repository::SnapshotFileRepository;
