use crate::domain::model::{ApiResponse, DnsRecordUpdate, NewDnsRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Operations against the Cloudflare zone and DNS endpoints. One call, one request.
#[async_trait]
pub trait CloudflareApi: Send + Sync {
    async fn list_zones(&self) -> Result<ApiResponse>;
    async fn add_zone(&self, name: &str, account_id: &str) -> Result<ApiResponse>;
    async fn get_zone(&self, zone_id: &str) -> Result<ApiResponse>;
    async fn edit_zone_setting(
        &self,
        zone_id: &str,
        setting_name: &str,
        value: &str,
    ) -> Result<ApiResponse>;
    async fn delete_zone(&self, zone_id: &str) -> Result<ApiResponse>;

    async fn list_dns_records(&self, zone_id: &str) -> Result<ApiResponse>;
    async fn add_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> Result<ApiResponse>;
    async fn edit_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
    ) -> Result<ApiResponse>;
    async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<ApiResponse>;
}
