use crate::config::Configuration;
use crate::core::coercion::{new_record_payload, update_payload};
use crate::core::CloudflareApi;
use crate::domain::model::{ApiResponse, DnsRecordUpdate, NewDnsRecord};
use crate::utils::error::{CliError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde_json::{json, Value};

/// Cloudflare v4 client. Every call issues exactly one request and hands back the parsed body
/// untouched, whether or not Cloudflare reports success.
pub struct CloudflareClient {
    config: Configuration,
    client: Client,
}

impl CloudflareClient {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiResponse> {
        // Checked before anything touches the network.
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(CliError::missing_token)?;

        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = &body {
            tracing::debug!("Request body: {}", body);
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Response from {} is not JSON: {}", url, e);
            CliError::InvalidResponse {
                message: format!("HTTP {}: {}", status, e),
            }
        })?;

        let response = ApiResponse::new(body);
        if !response.success() {
            tracing::warn!("Cloudflare reported failure for {}: {}", url, response.errors());
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl CloudflareApi for CloudflareClient {
    async fn list_zones(&self) -> Result<ApiResponse> {
        self.send(Method::GET, "/zones", None).await
    }

    async fn add_zone(&self, name: &str, account_id: &str) -> Result<ApiResponse> {
        let payload = json!({
            "name": name,
            "account": {"id": account_id},
            "jump_start": true,
        });
        self.send(Method::POST, "/zones", Some(payload)).await
    }

    async fn get_zone(&self, zone_id: &str) -> Result<ApiResponse> {
        self.send(Method::GET, &format!("/zones/{}", zone_id), None)
            .await
    }

    async fn edit_zone_setting(
        &self,
        zone_id: &str,
        setting_name: &str,
        value: &str,
    ) -> Result<ApiResponse> {
        let path = format!("/zones/{}/settings/{}", zone_id, setting_name);
        self.send(Method::PATCH, &path, Some(json!({ "value": value })))
            .await
    }

    async fn delete_zone(&self, zone_id: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, &format!("/zones/{}", zone_id), None)
            .await
    }

    async fn list_dns_records(&self, zone_id: &str) -> Result<ApiResponse> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.send(Method::GET, &path, None).await
    }

    async fn add_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> Result<ApiResponse> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.send(Method::POST, &path, Some(new_record_payload(record)))
            .await
    }

    async fn edit_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        update: &DnsRecordUpdate,
    ) -> Result<ApiResponse> {
        if update.is_empty() {
            tracing::warn!("Updating record {} with no fields", record_id);
        }
        let path = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        self.send(Method::PUT, &path, Some(update_payload(update)))
            .await
    }

    async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<ApiResponse> {
        let path = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        self.send(Method::DELETE, &path, None).await
    }
}
