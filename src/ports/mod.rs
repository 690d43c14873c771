/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains the outbound ports (driven ports - infrastructure
/// interfaces) that the use cases depend on.
pub mod outbound;
