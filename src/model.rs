use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::gradient::DEFAULT_GRADIENT_ID;
use crate::money::CurrencyCode;
use crate::palette::{BrandColor, DEFAULT_BRAND_COLOR};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    // opaque data URL, never inspected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data_url: Option<String>,
}

/// Informational only; nothing here feeds a computation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LineItem {
    /// List identity only; unique within a document.
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "qty")]
    pub quantity: f64,
    #[serde(rename = "price")]
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), description, quantity, unit_price)
    }

    pub fn with_id(id: impl Into<String>, description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self { id: id.into(), description: description.into(), quantity, unit_price }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub brand_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_logo_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "BrandColor::is_unset")]
    pub brand_color: BrandColor,
    pub invoice_number: String,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: CurrencyCode,
    /// Empty means "use the currency's own glyph".
    #[serde(default)]
    pub currency_symbol: String,
    pub from: CompanyInfo,
    pub to: ClientInfo,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
}

impl InvoiceDocument {
    /// Parses an exported or stored snapshot and fills the fields older
    /// snapshots may lack.
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(raw)?;
        Ok(doc.hydrate())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A snapshot without `brandColor` keeps the default swatch; a missing
    /// gradient becomes the default gradient.
    pub fn hydrate(mut self) -> Self {
        if self.brand_color.is_unset() {
            self.brand_color = BrandColor::hex(DEFAULT_BRAND_COLOR);
        }
        if self.gradient.is_none() {
            self.gradient = Some(DEFAULT_GRADIENT_ID.to_string());
        }
        self
    }

    /// Override symbol, or `None` when the currency glyph should be used.
    pub fn symbol_override(&self) -> Option<&str> {
        Some(self.currency_symbol.as_str()).filter(|s| !s.is_empty())
    }

    pub fn blank(today: NaiveDate) -> Self {
        Self {
            brand_name: String::new(),
            brand_logo_data_url: None,
            brand_color: BrandColor::hex(DEFAULT_BRAND_COLOR),
            invoice_number: String::new(),
            issued_date: today,
            due_date: today.checked_add_days(Days::new(30)).unwrap_or(today),
            currency: CurrencyCode::Usd,
            currency_symbol: String::new(),
            from: CompanyInfo::default(),
            to: ClientInfo::default(),
            items: vec![LineItem::new("", 1.0, 0.0)],
            terms: None,
            discount: None,
            tax: None,
            project: None,
            gradient: Some(DEFAULT_GRADIENT_ID.to_string()),
        }
    }

    pub fn sample() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self {
            brand_name: "brix".into(),
            brand_logo_data_url: None,
            brand_color: BrandColor::hex(DEFAULT_BRAND_COLOR),
            invoice_number: "000027".into(),
            issued_date: date(2024, 6, 26),
            due_date: date(2024, 7, 26),
            currency: CurrencyCode::Usd,
            currency_symbol: "$".into(),
            from: CompanyInfo {
                name: "BRIX Agency".into(),
                tax_number: Some("12345 6789 US0001".into()),
                address: Some("Pablo Alto, San Francisco, CA 94109, United States of America".into()),
                email: Some("contact@brixagency.com".into()),
                phone: Some("(684) 879 - 0102".into()),
                website: Some("www.brixagency.com".into()),
            },
            to: ClientInfo {
                name: "Mauro Sicard".into(),
                tax_number: Some("12345 6789 GB0001".into()),
                address: Some("Pablo Alto, San Francisco, CA 92102, United States of America".into()),
                email: Some("contact@maurosicard.com".into()),
                phone: Some("(612) 856 - 0989".into()),
                photo_data_url: None,
            },
            items: vec![
                LineItem::with_id("1", "Web design", 1.0, 5250.0),
                LineItem::with_id("2", "Brand book design", 1.0, 2750.0),
                LineItem::with_id("3", "UI/UX app design", 1.0, 7520.0),
                LineItem::with_id("4", "SEO & SEM optimization", 1.0, 2800.0),
                LineItem::with_id("5", "Website speed optimization", 1.0, 1250.0),
            ],
            terms: Some(
                "Fees and payment terms will be established in the contract or agreement prior to the \
                 commencement of the project. An initial deposit will be required before any design work \
                 begins. We reserve the right to suspend or halt work in the event of non-payment."
                    .into(),
            ),
            discount: Some(0.0),
            tax: Some(0.0),
            project: Some(ProjectInfo {
                name: Some("Corporate Website Redesign".into()),
                code: Some("PRJ-2024-027".into()),
                start_date: Some(date(2024, 6, 1)),
                end_date: Some(date(2024, 7, 26)),
                notes: Some("Revamp marketing site, deliver responsive UI kit, and integrate analytics.".into()),
            }),
            gradient: Some(DEFAULT_GRADIENT_ID.to_string()),
        }
    }
}
