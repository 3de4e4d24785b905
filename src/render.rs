use crate::sheet::Sheet;
use crate::stages::address::HOST_SEPARATOR;
use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Deserialize;

/// One validated input row, mapped by header name into the fields the
/// monitor template consumes.
#[derive(Debug, Deserialize)]
pub struct MonitorRow {
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub id: String,
    pub name: String,
    pub hosts: String,
    pub ipv4: String,
    pub ipv6: String,
    #[serde(rename = "city name")]
    pub city_name: String,
    #[serde(rename = "country iso code")]
    pub country_iso_code: String,
    #[serde(rename = "country name")]
    pub country_name: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "geo.name")]
    pub geo_name: String,
    #[serde(rename = "location id")]
    pub location_id: String,
    #[serde(rename = "site id")]
    pub site_id: String,
    #[serde(rename = "site name")]
    pub site_name: String,
    #[serde(rename = "site uid")]
    pub site_uid: String,
    #[serde(rename = "site category")]
    pub site_category: String,
    #[serde(rename = "cmbd ci name")]
    pub cmdb_ci_name: String,
    #[serde(rename = "cmdb ci uid")]
    pub cmdb_ci_uid: String,
    #[serde(rename = "cmdb ci parent name")]
    pub cmdb_ci_parent_name: String,
    #[serde(rename = "cmdb ci parent uid")]
    pub cmdb_ci_parent_uid: String,
    #[serde(rename = "cmdb event category")]
    pub cmdb_event_category: String,
    pub mode: String,
    pub timeout: String,
    pub wait: String,
    pub tags: String,
}

/// Map a validated sheet into monitor rows, batch order preserved.
pub fn monitor_rows(sheet: &Sheet) -> Result<Vec<MonitorRow>> {
    let headers = sheet.header_record();

    sheet
        .rows()
        .iter()
        .map(|row| {
            let record = StringRecord::from(row.clone());
            record
                .deserialize(Some(&headers))
                .context("Failed to map sheet row into a monitor record")
        })
        .collect()
}

fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn quoted_list(cell: &str) -> String {
    cell.split(HOST_SEPARATOR)
        .filter(|item| !item.is_empty())
        .map(yaml_quote)
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_scalar(block: &mut String, key: &str, value: &str) {
    if !value.is_empty() {
        block.push_str(&format!("  {}: {}\n", key, value));
    }
}

fn push_field(fields: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !value.is_empty() {
        fields.push((key.to_string(), yaml_quote(value)));
    }
}

fn render_monitor(row: &MonitorRow) -> String {
    let mut block = String::new();
    block.push_str(&format!("- type: {}\n", row.monitor_type));
    block.push_str(&format!("  id: {}\n", yaml_quote(&row.id)));
    block.push_str(&format!("  name: {}\n", yaml_quote(&row.name)));
    block.push_str(&format!("  hosts: [{}]\n", quoted_list(&row.hosts)));

    push_scalar(&mut block, "ipv4", &row.ipv4);
    push_scalar(&mut block, "ipv6", &row.ipv6);
    push_scalar(&mut block, "mode", &row.mode);
    push_scalar(&mut block, "timeout", &row.timeout);
    push_scalar(&mut block, "wait", &row.wait);
    if !row.tags.is_empty() {
        block.push_str(&format!("  tags: [{}]\n", quoted_list(&row.tags)));
    }

    let mut fields: Vec<(String, String)> = Vec::new();
    push_field(&mut fields, "geo.name", &row.geo_name);
    push_field(&mut fields, "geo.city_name", &row.city_name);
    push_field(&mut fields, "geo.country_iso_code", &row.country_iso_code);
    push_field(&mut fields, "geo.country_name", &row.country_name);
    push_field(&mut fields, "geo.latitude", &row.latitude);
    push_field(&mut fields, "geo.longitude", &row.longitude);
    push_field(&mut fields, "location.id", &row.location_id);
    push_field(&mut fields, "site.id", &row.site_id);
    push_field(&mut fields, "site.name", &row.site_name);
    push_field(&mut fields, "site.uid", &row.site_uid);
    push_field(&mut fields, "site.category", &row.site_category);
    push_field(&mut fields, "cmdb.ci_name", &row.cmdb_ci_name);
    push_field(&mut fields, "cmdb.ci_uid", &row.cmdb_ci_uid);
    push_field(&mut fields, "cmdb.ci_parent_name", &row.cmdb_ci_parent_name);
    push_field(&mut fields, "cmdb.ci_parent_uid", &row.cmdb_ci_parent_uid);
    push_field(&mut fields, "cmdb.event_category", &row.cmdb_event_category);

    if !fields.is_empty() {
        block.push_str("  fields:\n");
        for (key, value) in fields {
            block.push_str(&format!("    {}: {}\n", key, value));
        }
    }

    block
}

/// Render the full heartbeat monitor document for a validated batch.
pub fn render_document(sheet: &Sheet) -> Result<String> {
    let rows = monitor_rows(sheet)?;

    let mut document = String::from("heartbeat.monitors:\n");
    for row in &rows {
        document.push_str(&render_monitor(row));
    }

    Ok(document)
}
