/// Ports module defining the interfaces of the hexagon
///
/// Only driven (outbound) ports exist: the CLI drives the application
/// layer directly.
pub mod outbound;
