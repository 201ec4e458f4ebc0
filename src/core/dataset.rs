use crate::domain::model::{Contact, SentStatus};
use crate::utils::error::{BlastError, Result};
use serde::{Deserialize, Serialize};

/// CSV 列的線上格式。原始輸入檔可能沒有 SENT 欄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRow {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Company Name")]
    pub company: String,

    #[serde(rename = "Number")]
    pub number: String,

    #[serde(rename = "SENT", default)]
    pub sent: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        let status = SentStatus::from_cell(row.sent.as_deref());
        Contact {
            name: row.name,
            company: row.company,
            number: row.number,
            status,
        }
    }
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        ContactRow {
            name: contact.name.clone(),
            company: contact.company.clone(),
            number: contact.number.clone(),
            sent: contact.status.as_cell().map(str::to_string),
        }
    }
}

pub fn read_rows(bytes: &[u8]) -> Result<Vec<ContactRow>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn parse_contacts(bytes: &[u8]) -> Result<Vec<Contact>> {
    Ok(read_rows(bytes)?.into_iter().map(Contact::from).collect())
}

/// Serializes the whole dataset in one pass, SENT column always present.
pub fn write_contacts(contacts: &[Contact]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if contacts.is_empty() {
        writer.write_record(["Name", "Company Name", "Number", "SENT"])?;
    }

    for contact in contacts {
        writer.serialize(ContactRow::from(contact))?;
    }

    writer
        .into_inner()
        .map_err(|e| BlastError::ProcessingError {
            message: format!("CSV writer flush failed: {}", e),
        })
}
