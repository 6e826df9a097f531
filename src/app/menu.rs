use crate::app::prompt::Prompter;
use crate::app::render;
use crate::core::coercion::parse_yes_flag;
use crate::core::{ApiResponse, CloudflareApi, DnsRecordUpdate, NewDnsRecord};
use crate::utils::error::{CliError, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

const FILL_FORM: &str = "Fill Form";
const CANCEL: &str = "Cancel/Back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    ViewZones,
    ManageDns,
    AddDomain,
    EditZoneSetting,
    DeleteDomain,
    Exit,
}

impl MainAction {
    pub const ALL: [MainAction; 6] = [
        MainAction::ViewZones,
        MainAction::ManageDns,
        MainAction::AddDomain,
        MainAction::EditZoneSetting,
        MainAction::DeleteDomain,
        MainAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainAction::ViewZones => "View All Zones",
            MainAction::ManageDns => "Manage DNS Records",
            MainAction::AddDomain => "Add New Domain",
            MainAction::EditZoneSetting => "Edit Zone Settings",
            MainAction::DeleteDomain => "Delete Domain",
            MainAction::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsAction {
    ViewRecords,
    ViewNameservers,
    AddRecord,
    EditRecord,
    DeleteRecord,
    Back,
}

impl DnsAction {
    pub const ALL: [DnsAction; 6] = [
        DnsAction::ViewRecords,
        DnsAction::ViewNameservers,
        DnsAction::AddRecord,
        DnsAction::EditRecord,
        DnsAction::DeleteRecord,
        DnsAction::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DnsAction::ViewRecords => "View all DNS Records",
            DnsAction::ViewNameservers => "View Nameservers",
            DnsAction::AddRecord => "Add DNS Record",
            DnsAction::EditRecord => "Edit DNS Record",
            DnsAction::DeleteRecord => "Delete DNS Record",
            DnsAction::Back => "Back",
        }
    }
}

/// Fields offered when editing a record.
const EDITABLE_FIELDS: [&str; 5] = ["content", "ttl", "proxied", "name", "type"];

/// Interactive menu loop. Every action ends back at its menu, whatever went wrong.
pub struct Menu<'a, A: CloudflareApi, R, W> {
    api: &'a A,
    prompt: Prompter<R, W>,
}

impl<'a, A: CloudflareApi, R: BufRead, W: Write> Menu<'a, A, R, W> {
    pub fn new(api: &'a A, prompt: Prompter<R, W>) -> Self {
        Self { api, prompt }
    }

    pub fn into_prompt(self) -> Prompter<R, W> {
        self.prompt
    }

    /// Runs until Exit is chosen or input ends.
    pub async fn run(&mut self) -> Result<()> {
        match self.main_loop().await {
            Err(CliError::InputClosed) => {
                tracing::debug!("Input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }

    async fn main_loop(&mut self) -> Result<()> {
        let labels: Vec<&str> = MainAction::ALL.iter().map(|a| a.label()).collect();

        loop {
            self.banner()?;
            let action = MainAction::ALL[self.prompt.select("Choose an action", &labels)?];
            tracing::debug!("Main menu: {:?}", action);

            let outcome = match action {
                MainAction::ViewZones => self.show_zones().await,
                MainAction::ManageDns => self.manage_dns().await,
                MainAction::AddDomain => self.add_domain().await,
                MainAction::EditZoneSetting => self.edit_zone_setting().await,
                MainAction::DeleteDomain => self.delete_domain().await,
                MainAction::Exit => {
                    self.prompt.say("\nThank you for using Cloudflare Manager CLI!")?;
                    return Ok(());
                }
            };
            self.settle(outcome)?;

            self.prompt.say("")?;
            self.prompt.pause("Press [Enter] to return to the main menu...")?;
        }
    }

    fn banner(&mut self) -> Result<()> {
        self.prompt.say("==============================")?;
        self.prompt.say("  Cloudflare Manager CLI")?;
        self.prompt.say("==============================")
    }

    /// Reports a failed action and carries on; only a closed input stops the loop.
    fn settle(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(CliError::InputClosed) => Err(CliError::InputClosed),
            Err(e) => {
                tracing::error!("Action failed: {} (Category: {:?})", e, e.category());
                self.prompt.say(format!("❌ {}", e.user_friendly_message()))?;
                self.prompt.say(format!("💡 {}", e.recovery_suggestion()))
            }
        }
    }

    fn report(&mut self, response: &ApiResponse, done: &str, failed: &str) -> Result<()> {
        if response.success() {
            self.prompt.say(format!("✅ {}", done))
        } else {
            self.report_failure(response, failed)
        }
    }

    fn report_failure(&mut self, response: &ApiResponse, failed: &str) -> Result<()> {
        self.prompt
            .say(format!("❌ {}: {}", failed, response.errors()))
    }

    /// Returns false when the user backs out of a form.
    fn open_form(&mut self, proceed_label: &str, back_message: &str) -> Result<bool> {
        let choice = self.prompt.select("Action", &[proceed_label, CANCEL])?;
        if choice != 0 {
            self.prompt.say(back_message)?;
            return Ok(false);
        }
        Ok(true)
    }

    async fn show_zones(&mut self) -> Result<()> {
        self.prompt.say("\nFetching zones...")?;
        let response = self.api.list_zones().await?;
        if !response.success() {
            return self.report_failure(&response, "Failed to list zones");
        }

        let zones = response.zones();
        if zones.is_empty() {
            return self.prompt.say("No zones found in this account.");
        }

        self.prompt.say("Cloudflare Zones")?;
        self.prompt.say(render::zones_table(&zones))
    }

    async fn add_domain(&mut self) -> Result<()> {
        self.prompt.say("\nAdd New Domain\n")?;
        if !self.open_form(FILL_FORM, "Returning to main menu.")? {
            return Ok(());
        }

        let name = self.prompt.text("Domain name (e.g. example.com)")?;
        let account_id = self.prompt.text("Cloudflare Account ID")?;

        self.prompt.say("Adding domain...")?;
        let response = self.api.add_zone(&name, &account_id).await?;
        self.report(&response, "Domain added successfully!", "Failed to add domain")
    }

    async fn edit_zone_setting(&mut self) -> Result<()> {
        self.prompt.say("\nEdit Zone Setting\n")?;
        if !self.open_form(FILL_FORM, "Returning to main menu.")? {
            return Ok(());
        }

        let zone_id = self.prompt.text("Enter Zone ID")?;
        let setting = self.prompt.text("Setting name (e.g. ssl)")?;
        let value = self.prompt.text("Value (e.g. full, strict, flexible)")?;

        self.prompt.say("Updating setting...")?;
        let response = self
            .api
            .edit_zone_setting(&zone_id, &setting, &value)
            .await?;
        self.report(&response, "Setting updated successfully!", "Failed to update setting")
    }

    async fn delete_domain(&mut self) -> Result<()> {
        self.prompt.say("\nDelete Domain\n")?;
        if !self.open_form("Delete by Zone ID", "Returning to main menu.")? {
            return Ok(());
        }

        let zone_id = self.prompt.text("Enter Zone ID to delete")?;
        if !self
            .prompt
            .confirm("Are you sure you want to delete this zone?", false)?
        {
            return self.prompt.say("Canceled by user.");
        }

        self.prompt.say("Deleting zone...")?;
        let response = self.api.delete_zone(&zone_id).await?;
        self.report(&response, "Zone deleted successfully!", "Failed to delete zone")
    }

    async fn manage_dns(&mut self) -> Result<()> {
        self.prompt.say("\nDNS Management")?;

        let response = self.api.list_zones().await?;
        if !response.success() {
            return self.report_failure(&response, "Failed to list zones");
        }
        let zones = response.zones();
        if zones.is_empty() {
            return self.prompt.say(
                "No zones available to choose from. Make sure the account has registered zones.",
            );
        }

        let choices: Vec<String> = zones
            .iter()
            .map(|z| format!("{} ({})", z.name, z.id))
            .collect();
        let zone_id = zones[self.prompt.select("Select domain", &choices)?].id.clone();
        tracing::debug!("Managing DNS for zone {}", zone_id);

        let labels: Vec<&str> = DnsAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let message = format!("DNS - Zone: {} - Choose action", zone_id);
            let action = DnsAction::ALL[self.prompt.select(&message, &labels)?];

            let outcome = match action {
                DnsAction::ViewRecords => self.show_records(&zone_id).await,
                DnsAction::ViewNameservers => self.show_nameservers(&zone_id).await,
                DnsAction::AddRecord => self.add_record(&zone_id).await,
                DnsAction::EditRecord => self.edit_record(&zone_id).await,
                DnsAction::DeleteRecord => self.delete_record(&zone_id).await,
                DnsAction::Back => return Ok(()),
            };
            self.settle(outcome)?;

            self.prompt.say("")?;
            self.prompt.pause("Press [Enter] to go back...")?;
        }
    }

    async fn show_records(&mut self, zone_id: &str) -> Result<()> {
        self.prompt.say("\nFetching DNS records...")?;
        let response = self.api.list_dns_records(zone_id).await?;
        if !response.success() {
            return self.report_failure(&response, "Failed to list DNS records");
        }

        let records = response.dns_records();
        if records.is_empty() {
            return self.prompt.say("No DNS records for this zone.");
        }

        self.prompt.say(format!("DNS Records for {}", zone_id))?;
        self.prompt.say(render::dns_records_table(&records))
    }

    async fn show_nameservers(&mut self, zone_id: &str) -> Result<()> {
        self.prompt.say("\nFetching zone info...")?;
        let response = self.api.get_zone(zone_id).await?;

        let Some(zone) = response.zone() else {
            return self.report_failure(&response, "Failed to fetch zone info");
        };
        if zone.name_servers.is_empty() {
            return self.prompt.say("No nameservers found in the response.");
        }

        let title = if zone.name.is_empty() {
            zone_id
        } else {
            zone.name.as_str()
        };
        self.prompt.say(format!("Cloudflare Nameservers for {}", title))?;
        self.prompt.say(render::nameservers_table(&zone.name_servers))
    }

    async fn add_record(&mut self, zone_id: &str) -> Result<()> {
        self.prompt.say("\nAdd New DNS Record\n")?;
        if !self.open_form(FILL_FORM, "Back to DNS menu.")? {
            return Ok(());
        }

        let record_type = self.prompt.text("Type (A, AAAA, CNAME, TXT, MX, etc)")?;
        let name = self.prompt.text("Name (e.g. sub.example.com)")?;
        let content = self.prompt.text("Content (e.g. 1.2.3.4 or cname target)")?;
        let ttl = self
            .prompt
            .text_with_default("TTL (seconds, use 1 for automatic)", "1")?;
        let proxied = self.prompt.confirm("Proxied through Cloudflare?", false)?;

        let record = NewDnsRecord::new(record_type, name, content)
            .with_ttl(ttl)
            .with_proxied(proxied);

        self.prompt.say("Adding DNS record...")?;
        let response = self.api.add_dns_record(zone_id, &record).await?;
        self.report(&response, "DNS record added!", "Failed to add DNS record")
    }

    async fn edit_record(&mut self, zone_id: &str) -> Result<()> {
        self.prompt.say("\nEdit DNS Record\n")?;
        if !self.open_form("Edit by ID", "Back to DNS menu.")? {
            return Ok(());
        }

        let record_id = self.prompt.text("DNS Record ID")?;
        let field = EDITABLE_FIELDS[self.prompt.select("Field to change", &EDITABLE_FIELDS)?];
        let raw = self.prompt.text(&format!("New value for {}", field))?;

        let value = if field == "proxied" {
            Value::Bool(parse_yes_flag(&raw))
        } else {
            Value::String(raw)
        };
        let update = DnsRecordUpdate::from_pairs([(field, value)]);

        self.prompt.say("Updating DNS record...")?;
        let response = self.api.edit_dns_record(zone_id, &record_id, &update).await?;
        self.report(&response, "DNS record updated!", "Failed to update DNS record")
    }

    async fn delete_record(&mut self, zone_id: &str) -> Result<()> {
        self.prompt.say("\nDelete DNS Record\n")?;
        if !self.open_form("Delete by ID", "Back to DNS menu.")? {
            return Ok(());
        }

        let record_id = self.prompt.text("DNS Record ID to delete")?;
        if !self
            .prompt
            .confirm("Are you sure you want to delete this record?", false)?
        {
            return self.prompt.say("Canceled by user.");
        }

        self.prompt.say("Deleting DNS record...")?;
        let response = self.api.delete_dns_record(zone_id, &record_id).await?;
        self.report(&response, "DNS record deleted!", "Failed to delete DNS record")
    }
}
