//! Required-field and shape checks applied before a document is accepted
//! from the editor or an import. No business rules live here.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::gradient::GradientCatalog;
use crate::model::InvoiceDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invoice has {} invalid field(s): ", self.0.len())?;
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.path.as_str())
    }
}

struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, path: impl Into<String>, message: &'static str) {
        self.0.push(FieldError { path: path.into(), message });
    }

    fn required(&mut self, path: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(path, "Required");
        }
    }

    fn non_negative(&mut self, path: impl Into<String>, value: f64) {
        if !value.is_finite() {
            self.push(path, "Must be a number");
        } else if value < 0.0 {
            self.push(path, "Must be zero or more");
        }
    }
}

pub fn validate(doc: &InvoiceDocument, gradients: &GradientCatalog) -> Result<(), ValidationErrors> {
    let mut c = Collector(Vec::new());

    c.required("brandName", &doc.brand_name);
    c.required("invoiceNumber", &doc.invoice_number);
    c.required("from.name", &doc.from.name);
    c.required("to.name", &doc.to.name);

    if !doc.brand_color.is_valid() {
        c.push("brandColor", "Invalid color");
    }
    if let Some(id) = doc.gradient.as_deref() {
        if !id.is_empty() && !gradients.contains(id) {
            c.push("gradient", "Invalid gradient selection");
        }
    }

    let mut seen = HashSet::new();
    for (i, item) in doc.items.iter().enumerate() {
        if !seen.insert(item.id.as_str()) {
            c.push(format!("items.{i}.id"), "Duplicate item id");
        }
        c.non_negative(format!("items.{i}.qty"), item.quantity);
        c.non_negative(format!("items.{i}.price"), item.unit_price);
    }

    if let Some(discount) = doc.discount {
        c.non_negative("discount", discount);
    }
    if let Some(tax) = doc.tax {
        c.non_negative("tax", tax);
    }

    if c.0.is_empty() { Ok(()) } else { Err(ValidationErrors(c.0)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use crate::palette::BrandColor;

    fn check(doc: &InvoiceDocument) -> Vec<String> {
        match validate(doc, GradientCatalog::builtin()) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.fields().map(str::to_string).collect(),
        }
    }

    #[test]
    fn sample_is_valid() {
        assert!(check(&InvoiceDocument::sample()).is_empty());
    }

    #[test]
    fn blank_reports_required_fields() {
        let doc = InvoiceDocument::blank(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(check(&doc), ["brandName", "invoiceNumber", "from.name", "to.name"]);
    }

    #[test]
    fn shape_violations_are_all_collected() {
        let mut doc = InvoiceDocument::sample();
        doc.brand_color = BrandColor::hex("#12");
        doc.gradient = Some("aurora".into());
        doc.items.push(LineItem::with_id("1", "dup", -1.0, f64::NAN));
        doc.discount = Some(-5.0);

        assert_eq!(
            check(&doc),
            ["brandColor", "gradient", "items.5.id", "items.5.qty", "items.5.price", "discount"]
        );
    }

    #[test]
    fn explicit_none_and_missing_gradient_pass() {
        let mut doc = InvoiceDocument::sample();
        doc.brand_color = BrandColor::ExplicitNone;
        doc.gradient = None;
        doc.discount = None;
        assert!(check(&doc).is_empty());
    }

    #[test]
    fn empty_brand_color_string_is_accepted() {
        let json = InvoiceDocument::sample().to_json_pretty().unwrap();
        let raw = json.replace("\"brandColor\": \"#FF5722\"", "\"brandColor\": \"\"");
        let doc = InvoiceDocument::from_json(&raw).unwrap();
        assert_eq!(doc.brand_color, BrandColor::hex(""));
        assert!(check(&doc).is_empty());
    }

    #[test]
    fn error_message_lists_fields() {
        let mut doc = InvoiceDocument::sample();
        doc.to.name.clear();
        let err = validate(&doc, GradientCatalog::builtin()).unwrap_err();
        assert_eq!(err.to_string(), "invoice has 1 invalid field(s): to.name: Required");
    }
}
