pub mod client;
pub mod coercion;

pub use crate::domain::model::{ApiResponse, DnsRecordUpdate, NewDnsRecord};
pub use crate::domain::ports::CloudflareApi;
pub use crate::utils::error::Result;
