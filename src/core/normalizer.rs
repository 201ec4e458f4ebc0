use crate::core::dataset::ContactRow;
use crate::domain::model::{Contact, SentStatus};

/// Normalizes a single phone number token: trim, strip interior whitespace,
/// prepend the default country code when no `+` prefix is present.
/// 不驗證位數，畸形輸入原樣傳遞
pub fn normalize_number(raw: &str, default_cc: &str) -> String {
    let number: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if number.starts_with('+') {
        number
    } else {
        format!("{}{}", default_cc, number)
    }
}

/// Expands multi-number rows so each contact holds exactly one normalized
/// number; every other field is copied verbatim.
pub fn expand_contacts(rows: Vec<ContactRow>, default_cc: &str) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for row in rows {
        let status = SentStatus::from_cell(row.sent.as_deref());
        for token in row.number.split(',') {
            contacts.push(Contact {
                name: row.name.clone(),
                company: row.company.clone(),
                number: normalize_number(token, default_cc),
                status,
            });
        }
    }

    contacts
}
