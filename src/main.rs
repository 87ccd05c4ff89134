use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Local;
use clap::{CommandFactory, Parser, Subcommand};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;

use invoice_engine::color::parse_hex;
use invoice_engine::settings::{self, AppSettings};
use invoice_engine::{BrandColor, CurrencyCatalog, CurrencyCode, Engine, InvoiceDocument, Palette, validate};

// ==========================================
// CLI
// ==========================================

#[derive(Parser)]
#[command(name = "invoice-engine", version, about = "Totals, palettes and money strings for invoice snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show line items, totals and theming for an invoice JSON file
    Summary {
        /// Invoice JSON (defaults to `default_invoice` from settings)
        path: Option<PathBuf>,
    },
    /// Check required fields and value shapes
    Validate {
        path: Option<PathBuf>,
    },
    /// Print the sample invoice as JSON
    Sample,
    /// Print an empty invoice template as JSON
    Blank,
    /// Show the palette derived from a brand color
    Palette {
        /// `#RRGGBB`; anything else falls back to the default brand color
        color: Option<String>,
        /// Explicitly opt out of a brand color
        #[arg(long, conflicts_with = "color")]
        none: bool,
    },
    /// List the gradient catalog
    Gradients,
    /// Format an amount in one of the supported currencies
    Format {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        code: String,
        /// Replace the currency glyph
        #[arg(long)]
        symbol: Option<String>,
    },
    /// List supported currencies
    Currencies,
    /// Update settings
    Config {
        #[arg(long)]
        default_invoice: Option<String>,
        #[arg(long)]
        color_output: Option<bool>,
    },
}

// ==========================================
// Main Function
// ==========================================

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "invoice_engine=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = settings::config_path();
    let settings = settings::load_settings(&config_path)?;
    let engine = Engine::builtin();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Summary { path } => {
            let doc = load_invoice(path, &settings)?;
            show_summary(&engine, &doc, settings.color_output)?;
        }
        Commands::Validate { path } => {
            let doc = load_invoice(path, &settings)?;
            match validate(&doc, engine.gradients()) {
                Ok(()) => println!("✅ Invoice {} is valid.", doc.invoice_number),
                Err(errors) => {
                    for e in &errors.0 {
                        println!("❌ {e}");
                    }
                    bail!("{} field(s) failed validation", errors.0.len());
                }
            }
        }
        Commands::Sample => println!("{}", InvoiceDocument::sample().to_json_pretty()?),
        Commands::Blank => {
            println!("{}", InvoiceDocument::blank(Local::now().date_naive()).to_json_pretty()?)
        }
        Commands::Palette { color, none } => {
            let brand = match (color, none) {
                (_, true) => BrandColor::ExplicitNone,
                (Some(c), false) => BrandColor::Hex(c),
                (None, false) => BrandColor::Unset,
            };
            let palette = engine.palette_deriver().derive(&brand);
            println!("{}", palette_table(&palette, settings.color_output));
        }
        Commands::Gradients => {
            let catalog = engine.gradients();
            let mut table = Table::new();
            table.set_header(vec!["Id", "Name", "Background", "Highlight"]);
            for option in catalog.options() {
                let id_cell = if option.id == catalog.default_id() {
                    Cell::new(format!("{} (default)", option.id)).add_attribute(Attribute::Bold)
                } else {
                    Cell::new(option.id)
                };
                table.add_row(vec![
                    id_cell,
                    Cell::new(option.name),
                    Cell::new(option.background_class),
                    Cell::new(option.highlight_class),
                ]);
            }
            println!("{table}");
        }
        Commands::Format { amount, code, symbol } => {
            let code: CurrencyCode = code.parse()?;
            println!("{}", engine.money().format(amount, code, symbol.as_deref())?);
        }
        Commands::Currencies => {
            let mut table = Table::new();
            table.set_header(vec!["", "Code", "Glyph", "Picker", "Example"]);
            for meta in CurrencyCatalog::builtin().entries() {
                table.add_row(vec![
                    Cell::new(meta.flag),
                    Cell::new(meta.code),
                    Cell::new(meta.glyph),
                    Cell::new(meta.picker_symbol),
                    Cell::new(engine.money().format(1234.5, meta.code, None)?)
                        .set_alignment(CellAlignment::Right),
                ]);
            }
            println!("{table}");
        }
        Commands::Config { default_invoice, color_output } => {
            let mut updated = settings.clone();
            if let Some(path) = default_invoice {
                updated.default_invoice = Some(path);
            }
            if let Some(flag) = color_output {
                updated.color_output = flag;
            }
            settings::save_settings(&config_path, &updated)?;
            info!(path = %config_path.display(), "settings saved");
            println!("✅ Settings saved to {}", config_path.display());
            println!("{}", toml::to_string_pretty(&updated)?);
        }
    }
    Ok(())
}

// ==========================================
// Loading
// ==========================================

fn load_invoice(path: Option<PathBuf>, settings: &AppSettings) -> anyhow::Result<InvoiceDocument> {
    let Some(path) = path.or_else(|| settings.default_invoice_path()) else {
        bail!("no invoice path given and no default_invoice configured (see `invoice-engine config`)");
    };
    read_invoice(&path)
}

fn read_invoice(path: &Path) -> anyhow::Result<InvoiceDocument> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = InvoiceDocument::from_json(&raw).with_context(|| format!("parsing {}", path.display()))?;
    info!(path = %path.display(), invoice = %doc.invoice_number, items = doc.items.len(), "loaded invoice");
    Ok(doc)
}

// ==========================================
// Summary
// ==========================================

fn show_summary(engine: &Engine<'_>, doc: &InvoiceDocument, color: bool) -> anyhow::Result<()> {
    if let Err(errors) = validate(doc, engine.gradients()) {
        for e in &errors.0 {
            println!("⚠️  {e}");
        }
    }

    let derived = engine.recompute(doc)?;

    let mut items = Table::new();
    items.set_header(vec!["#", "Description", "Qty", "Price", "Total"]);
    for (i, line) in derived.lines.iter().enumerate() {
        items.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&line.description),
            Cell::new(line.quantity).set_alignment(CellAlignment::Right),
            Cell::new(&line.unit_price).set_alignment(CellAlignment::Right),
            Cell::new(&line.total).set_alignment(CellAlignment::Right),
        ]);
    }

    let mut totals = Table::new();
    totals.add_row(vec![Cell::new("Subtotal"), right(&derived.formatted.subtotal)]);
    totals.add_row(vec![Cell::new("Discount"), right(&derived.formatted.discount)]);
    totals.add_row(vec![Cell::new("Tax"), right(&derived.formatted.tax)]);
    let grand = right(&derived.formatted.grand_total).add_attribute(Attribute::Bold);
    let grand = if color && derived.totals.grand_total < 0.0 {
        grand.fg(Color::Rgb { r: 185, g: 28, b: 28 })
    } else {
        grand
    };
    totals.add_row(vec![Cell::new("Total").add_attribute(Attribute::Bold), grand]);

    println!("\n--- Invoice {} ({}) ---", doc.invoice_number, doc.brand_name);
    println!("From: {}  →  To: {}", doc.from.name, doc.to.name);
    println!("Issued {}  ·  Due {}  ·  {}", doc.issued_date, doc.due_date, doc.currency);
    if let Some(name) = doc.project.as_ref().and_then(|p| p.name.as_deref()) {
        println!("Project: {name}");
    }
    println!("{items}");
    println!("{totals}");
    println!("\n--- Theme: {} gradient ---", derived.gradient.name);
    println!("{}", palette_table(&derived.palette, color));
    Ok(())
}

fn right(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn palette_table(palette: &Palette, color: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Role", "Value"]);
    let rows = [
        ("base", &palette.base),
        ("light", &palette.light),
        ("lighter", &palette.lighter),
        ("dark", &palette.dark),
        ("shadow", &palette.shadow_color),
    ];
    for (role, value) in rows {
        let swatch = Cell::new(value);
        let swatch = match parse_hex(value) {
            Some(rgb) if color => swatch.fg(Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }),
            _ => swatch,
        };
        table.add_row(vec![Cell::new(role), swatch]);
    }
    table
}
