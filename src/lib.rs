//! Derivation core of the invoice builder: totals, brand palette, gradient
//! and money strings computed from an [`InvoiceDocument`] snapshot.

pub mod color;
pub mod derive;
pub mod error;
pub mod gradient;
pub mod model;
pub mod money;
pub mod palette;
pub mod pricing;
pub mod settings;
pub mod validate;

pub use derive::{DerivedInvoice, Engine};
pub use error::{Error, Result};
pub use gradient::{GradientCatalog, GradientOption};
pub use model::{ClientInfo, CompanyInfo, InvoiceDocument, LineItem, ProjectInfo};
pub use money::{CurrencyCatalog, CurrencyCode, MoneyFormatter};
pub use palette::{BrandColor, Palette, PaletteDeriver};
pub use validate::{ValidationErrors, validate};
