//! Domain records persisted to disk and exchanged over HTTP
//!
//! Every record deserializes leniently: absent fields take their zero value,
//! matching what the browser frontend sends for partially filled forms.

use serde::{Deserialize, Serialize};

/// Identifier shared by invoices and customers
pub type RecordId = u64;

/// A billing document with line items and computed totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Invoice {
    pub id: RecordId,
    pub invoice_num: String,
    pub date: String,
    pub due_date: String,
    pub client: Client,
    /// Only consulted at creation time to fill in `client`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<RecordId>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub notes: String,
    pub template: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template_name: String,
}

impl Invoice {
    /// Format the display number for an invoice id (`INV-0007`)
    pub fn number_for(id: RecordId) -> String {
        format!("INV-{:04}", id)
    }

    /// File name used when the invoice is downloaded as a PDF
    pub fn pdf_filename(&self) -> String {
        format!("invoice-{}.pdf", self.invoice_num)
    }
}

/// One line of an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    pub description: String,
    pub quantity: i64,
    pub rate: f64,
    pub percentage: f64,
    pub amount: f64,
}

/// Bill-to snapshot embedded in an invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
}

impl From<&Customer> for Client {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            address: customer.address.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// Editable contact record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub company: String,
}

/// Issuer details printed in the PDF header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: String,
}

/// User-editable application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub company: CompanyInfo,
    pub data_directory: String,
}

/// Counters and settings stored in `meta.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(rename = "nextID")]
    pub next_id: RecordId,
    #[serde(rename = "nextCustomerID")]
    pub next_customer_id: RecordId,
    pub settings: Settings,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            next_id: 1,
            next_customer_id: 1,
            settings: Settings::default(),
        }
    }
}
