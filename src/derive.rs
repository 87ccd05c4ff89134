//! Recomputes everything a renderer needs from one document snapshot.
//!
//! Callers invoke [`Engine::recompute`] after each batch of edits; there is
//! no observer graph and no cached state between calls.

use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::gradient::{GradientCatalog, GradientOption};
use crate::model::InvoiceDocument;
use crate::money::{CurrencyCatalog, MoneyFormatter};
use crate::palette::{Palette, PaletteDeriver};
use crate::pricing::{self, Totals};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedLine {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub grand_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedInvoice<'a> {
    pub totals: Totals,
    pub palette: Palette,
    pub gradient: &'a GradientOption,
    pub lines: Vec<FormattedLine>,
    pub formatted: FormattedTotals,
}

#[derive(Debug, Clone)]
pub struct Engine<'a> {
    palettes: PaletteDeriver,
    gradients: &'a GradientCatalog,
    money: MoneyFormatter<'a>,
}

impl Engine<'static> {
    pub fn builtin() -> Self {
        Self::new(PaletteDeriver::default(), GradientCatalog::builtin(), CurrencyCatalog::builtin())
    }
}

impl<'a> Engine<'a> {
    pub fn new(palettes: PaletteDeriver, gradients: &'a GradientCatalog, currencies: &'a CurrencyCatalog) -> Self {
        Self { palettes, gradients, money: MoneyFormatter::new(currencies) }
    }

    pub fn gradients(&self) -> &'a GradientCatalog {
        self.gradients
    }

    pub fn palette_deriver(&self) -> &PaletteDeriver {
        &self.palettes
    }

    pub fn money(&self) -> &MoneyFormatter<'a> {
        &self.money
    }

    pub fn recompute(&self, doc: &InvoiceDocument) -> Result<DerivedInvoice<'a>> {
        let totals = pricing::compute_totals(doc);
        let symbol = doc.symbol_override();
        let fmt = |amount: f64| self.money.format(amount, doc.currency, symbol);

        let lines = doc
            .items
            .iter()
            .map(|item| {
                Ok(FormattedLine {
                    id: item.id.clone(),
                    description: item.description.clone(),
                    quantity: pricing::sanitize_number(item.quantity),
                    unit_price: fmt(item.unit_price)?,
                    total: fmt(pricing::line_total(item))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let formatted = FormattedTotals {
            subtotal: fmt(totals.subtotal)?,
            discount: fmt(totals.discount)?,
            tax: fmt(totals.tax)?,
            grand_total: fmt(totals.grand_total)?,
        };

        trace!(invoice = %doc.invoice_number, grand_total = totals.grand_total, "recomputed derived values");

        Ok(DerivedInvoice {
            totals,
            palette: self.palettes.derive(&doc.brand_color),
            gradient: self.gradients.resolve(doc.gradient.as_deref()),
            lines,
            formatted,
        })
    }
}
