//! CLI binary for catalogo.
//!
//! A thin shim over the library crate: maps flags to `CatalogConfig`,
//! runs the interactive category/size selection when no flags are given,
//! and prints results.

use anyhow::{bail, Context, Result};
use catalogo::{
    build_index, load_catalog, render_bucket, CatalogConfig, CatalogIndex, ProductRecord,
    RenderProgress,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: one bar across the bucket, a log line per record.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:40.green/238}] {pos}/{len}  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Generando");
        Arc::new(Self { bar })
    }
}

impl RenderProgress for CliProgress {
    fn on_render_start(&self, total_records: usize) {
        self.bar.set_length(total_records as u64);
    }

    fn on_record_start(&self, _index: usize, _total: usize, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn on_record_complete(&self, _index: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn on_record_error(&self, _index: usize, _total: usize, error: &str) {
        self.bar.println(format!("  {} {}", red("✗"), error));
        self.bar.inc(1);
    }

    fn on_render_complete(&self, total: usize, rendered: usize, _pdf_path: &Path) {
        self.bar.finish_and_clear();
        if rendered == total {
            eprintln!("{} {} productos dibujados", green("✔"), bold(&rendered.to_string()));
        } else {
            eprintln!(
                "{} {}/{} productos dibujados ({} omitidos)",
                green("✔"),
                bold(&rendered.to_string()),
                total,
                red(&(total - rendered).to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive: pick category and size from menus
  catalogo stock.json

  # Non-interactive selection
  catalogo stock.csv --category "Jogger" --size M

  # List the available categories and sizes, no PDF
  catalogo stock.json --list

  # Include the price line, write to a directory
  catalogo stock.json --category "Hoodie Oversize" --size XL \
      --show-price --output-dir catalogs/

INPUT FORMATS:
  .json   array of flat objects; keys normalized (lowercase, trimmed,
          spaces → underscores)
  .csv    header row + data rows; same normalization

  Encodings tried in order: utf-8 with BOM, utf-8, latin-1.

FIELDS CONSUMED (post-normalization):
  name, sku, stock, regular_price, thumbnail_id,
  attribute_pa_color, attribute_pa_talla

OUTPUT:
  One {category}_{size}.pdf per run: US-Letter, 0.5 in margins,
  2×3 product grid, automatic pagination. Products whose image cannot
  be downloaded are skipped, never fatal.
"#;

/// Generate a paginated PDF catalog from a JSON/CSV stock export.
#[derive(Parser, Debug)]
#[command(
    name = "catalogo",
    version,
    about = "Generate paginated PDF product catalogs from JSON/CSV stock exports",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the stock export (.json or .csv).
    input: PathBuf,

    /// Category to render (skips the interactive menu).
    #[arg(long, env = "CATALOGO_CATEGORY")]
    category: Option<String>,

    /// Size to render (skips the interactive prompt; uppercased).
    #[arg(long, env = "CATALOGO_SIZE")]
    size: Option<String>,

    /// Print the available categories and sizes, then exit.
    #[arg(long)]
    list: bool,

    /// Draw the "Precio:" line under each product.
    #[arg(long, env = "CATALOGO_SHOW_PRICE")]
    show_price: bool,

    /// Directory the PDF is written to.
    #[arg(short, long, env = "CATALOGO_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Image download timeout in seconds.
    #[arg(long, env = "CATALOGO_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Print the render report as JSON instead of text.
    #[arg(long, env = "CATALOGO_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "CATALOGO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "CATALOGO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "CATALOGO_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the progress bar is active;
    // the bar provides the feedback that matters.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Load and index ───────────────────────────────────────────────────
    // A load failure is fatal: exit code 1, no partial catalog without data.
    let records = load_catalog(&cli.input)
        .with_context(|| format!("Error al cargar el archivo: {}", cli.input.display()))?;

    let mut config = CatalogConfig::builder()
        .show_price(cli.show_price)
        .output_dir(cli.output_dir.clone())
        .download_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;

    let index = build_index(records, &config);

    if cli.list {
        print_index(&index);
        return Ok(());
    }

    if index.is_empty() {
        println!("No hay productos con stock en el archivo.");
        return Ok(());
    }

    // ── Selection (flags or interactive) ─────────────────────────────────
    let category = match cli.category {
        Some(c) => c,
        None => prompt_category(&index)?,
    };
    let size = match cli.size {
        Some(s) => s.to_uppercase(),
        None => prompt_size(&index, &category)?,
    };

    let bucket = match index.select(&category, &size) {
        Ok(bucket) => bucket,
        Err(e) => {
            // User-facing outcome, not a failure: exit 0 without a PDF.
            println!("{e}");
            return Ok(());
        }
    };

    if !cli.quiet && !cli.json {
        println!(
            "\nProductos en la categoría '{}' y talla '{}':",
            category, size
        );
        for product in bucket {
            print_product(product);
        }
        println!();
    }

    // ── Render ───────────────────────────────────────────────────────────
    if show_progress {
        let progress: Arc<dyn RenderProgress> = CliProgress::new();
        config.progress = Some(progress);
    }

    let report = render_bucket(bucket, &category, &size, &config)
        .context("No se pudo generar el PDF")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else if !cli.quiet {
        println!("PDF creado: {}", report.pdf_path.display());
        for failure in &report.failures {
            eprintln!(
                "  {} {} ({}): {}",
                red("✗"),
                failure.name,
                dim(&failure.sku),
                failure.error
            );
        }
    }

    Ok(())
}

/// Numbered category menu, 1-based selection from stdin.
fn prompt_category(index: &CatalogIndex) -> Result<String> {
    let categories = index.categories();
    println!("Categorías disponibles:");
    for (i, category) in categories.iter().enumerate() {
        println!("{}. {}", i + 1, category);
    }

    let answer = read_line("\nElija el número de la categoría: ")?;
    let choice: usize = answer
        .trim()
        .parse()
        .with_context(|| format!("'{}' no es un número válido", answer.trim()))?;
    if choice < 1 || choice > categories.len() {
        bail!("Opción fuera de rango: {choice}");
    }
    Ok(categories[choice - 1].to_string())
}

/// Free-text size prompt; input is uppercased before lookup.
fn prompt_size(index: &CatalogIndex, category: &str) -> Result<String> {
    println!("\nTallas disponibles para {category}:");
    if let Some(sizes) = index.sizes(category) {
        for size in sizes {
            println!("{size}");
        }
    }
    let answer = read_line("\nElija una talla: ")?;
    Ok(answer.trim().to_uppercase())
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line)
}

fn print_product(product: &ProductRecord) {
    println!("\nNombre: {}", product.name);
    println!("SKU: {}", product.sku);
    println!("Color: {}", product.color);
    println!("Precio: {}", product.regular_price);
    println!("Stock: {}", product.stock);
    println!("Imagen: {}", product.thumbnail_id);
}

fn print_index(index: &CatalogIndex) {
    if index.is_empty() {
        println!("No hay productos con stock en el archivo.");
        return;
    }
    for category in index.categories() {
        println!("{}", bold(category));
        if let Some(sizes) = index.sizes(category) {
            for size in sizes {
                let count = index.bucket(category, size).map_or(0, |b| b.len());
                let label = if size.is_empty() { "(sin talla)" } else { size };
                println!("  {label}  {}", dim(&format!("{count} productos")));
            }
        }
    }
}
