//! Outbound query boundary to the Renaiscent analysis service.

mod gateway;

pub use gateway::{AnalysisGateway, BioNexusClient, GatewayError};
