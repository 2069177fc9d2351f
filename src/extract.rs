//! Extraction of the fixed report schema from a raw key/value mapping.
//!
//! WER signature slots (`Sig[N].Value`) are positional and not reliable in
//! the wild, so two recovery rules apply:
//! - Application Version falls back to the `AppVersion` key when `Sig[1].Value`
//!   is absent.
//! - When a version was resolved and the `Sig[0].Value` name candidate
//!   contains a digit, the slots are assumed shifted and the name is taken
//!   from `AppName` instead. The trigger condition is kept exactly as-is; the
//!   format defines no correct general rule to "improve" it toward.
use std::path::Path;

use chrono::DateTime;
use serde::Serialize;

use crate::progress::Reporter;
use crate::wer::RawRecord;

/// One crash report, normalized. Field order is the CSV column order; the
/// serde renames are the CSV header names. Empty string means "absent";
/// `report_path` is always populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedReport {
    #[serde(rename = "Report Path")]
    pub report_path: String,
    #[serde(rename = "Application Name")]
    pub application_name: String,
    #[serde(rename = "Application Version")]
    pub application_version: String,
    #[serde(rename = "Application Timestamp")]
    pub application_timestamp: String,
    #[serde(rename = "Fault Module Name")]
    pub fault_module_name: String,
    #[serde(rename = "Fault Module Version")]
    pub fault_module_version: String,
    #[serde(rename = "Fault Module Timestamp")]
    pub fault_module_timestamp: String,
    #[serde(rename = "Exception Code")]
    pub exception_code: String,
    #[serde(rename = "Exception Offset")]
    pub exception_offset: String,
    #[serde(rename = "OS Version")]
    pub os_version: String,
    #[serde(rename = "Locale ID")]
    pub locale_id: String,
    #[serde(rename = "App Path")]
    pub app_path: String,
    #[serde(rename = "App Name")]
    pub app_name: String,
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Event Time")]
    pub event_time: String,
    #[serde(rename = "Report Identifier")]
    pub report_identifier: String,
    #[serde(rename = "Upload Time")]
    pub upload_time: String,
    #[serde(rename = "Metadata Hash")]
    pub metadata_hash: String,
}

impl ExtractedReport {
    /// True when the report carries at least one piece of real information
    /// beyond the input path. Reports failing this are not worth a CSV row.
    pub fn has_information(&self) -> bool {
        [
            &self.application_name,
            &self.application_version,
            &self.application_timestamp,
            &self.fault_module_name,
            &self.fault_module_version,
            &self.fault_module_timestamp,
            &self.exception_code,
            &self.exception_offset,
            &self.os_version,
            &self.locale_id,
            &self.app_path,
            &self.app_name,
            &self.event_type,
            &self.event_time,
            &self.report_identifier,
            &self.upload_time,
            &self.metadata_hash,
        ]
        .iter()
        .any(|f| !f.is_empty())
    }

    /// The application identity this report crashes under: the resolved
    /// Application Name when present, otherwise the raw `AppName` value.
    pub fn crashing_application(&self) -> &str {
        if !self.application_name.is_empty() {
            &self.application_name
        } else {
            &self.app_name
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("not a hexadecimal value: {0}")]
    NotHex(String),
    #[error("out of range for a Unix timestamp: {0}")]
    OutOfRange(String),
}

/// Convert a hex-encoded Unix timestamp (seconds since epoch, UTC) to a
/// `YYYY-MM-DD HH:MM:SS` calendar string.
pub fn convert_timestamp(raw: &str) -> Result<String, TimestampError> {
    let secs = u64::from_str_radix(raw.trim(), 16)
        .map_err(|_| TimestampError::NotHex(raw.to_string()))?;
    let secs = i64::try_from(secs).map_err(|_| TimestampError::OutOfRange(raw.to_string()))?;
    let dt = DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| TimestampError::OutOfRange(raw.to_string()))?;
    Ok(dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn get(data: &RawRecord, key: &str) -> String {
    data.get(key).cloned().unwrap_or_default()
}

/// Map a raw record into the fixed schema. Conversion failures are reported
/// and the raw value passes through unchanged; this never fails.
pub fn extract_information(
    data: &RawRecord,
    file_path: &Path,
    reporter: &dyn Reporter,
) -> ExtractedReport {
    let mut application_timestamp = get(data, "Sig[2].Value");
    if !application_timestamp.is_empty() {
        match convert_timestamp(&application_timestamp) {
            Ok(converted) => application_timestamp = converted,
            Err(e) => reporter.warn(&format!(
                "error converting timestamp {}: {}",
                application_timestamp, e
            )),
        }
    }

    let mut application_name = get(data, "Sig[0].Value");
    let mut application_version = get(data, "Sig[1].Value");
    if application_version.is_empty() {
        application_version = get(data, "AppVersion");
    }
    // Shifted-slot heuristic: a "name" with digits next to a resolved version
    // is almost certainly the version repeated.
    if !application_version.is_empty()
        && application_name.chars().any(|c| c.is_ascii_digit())
    {
        application_name = get(data, "AppName");
    }

    ExtractedReport {
        report_path: file_path.display().to_string(),
        application_name,
        application_version,
        application_timestamp,
        fault_module_name: get(data, "Sig[3].Value"),
        fault_module_version: get(data, "Sig[4].Value"),
        fault_module_timestamp: get(data, "Sig[5].Value"),
        exception_code: get(data, "Sig[6].Value"),
        exception_offset: get(data, "Sig[7].Value"),
        os_version: get(data, "DynamicSig[1].Value"),
        locale_id: get(data, "DynamicSig[2].Value"),
        app_path: get(data, "AppPath"),
        app_name: get(data, "AppName"),
        event_type: get(data, "EventType"),
        event_time: get(data, "EventTime"),
        report_identifier: get(data, "ReportIdentifier"),
        upload_time: get(data, "UploadTime"),
        metadata_hash: get(data, "MetadataHash"),
    }
}
