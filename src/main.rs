mod config;
mod error;
mod model;
mod report;
mod source;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::config::{
    config_dir, load_config, resolve_data_file, Config, CONFIG_TEMPLATE, SAMPLE_DATA,
};
use crate::error::{PofinError, Result};
use crate::model::{Currency, Dataset, InvoiceStatus, PurchaseOrder};
use crate::report::{
    project_spend_summaries, summarize, top_vendors_by_outstanding, AgingBucket, EntitySummary,
    FinancialSummary,
};

#[derive(Parser)]
#[command(name = "pofin")]
#[command(version, about = "Procurement finance reporting CLI", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.pofin or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config and sample dataset
    Init,

    /// Show config and dataset overview
    Status,

    /// Per-currency totals, percentages and status counts
    Summary {
        /// Restrict to one project's purchase orders (includes its budget)
        #[arg(short, long)]
        project: Option<String>,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Aging buckets for unpaid invoices, per currency
    Aging {
        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Top vendors by outstanding amount
    Vendors {
        /// Number of vendors to show (default: display.top_n)
        #[arg(short, long)]
        top: Option<usize>,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Project spend summary (budget, committed, utilization)
    Projects {
        /// Number of projects to show (default: display.top_n)
        #[arg(short, long)]
        top: Option<usize>,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Detail view for one project
    Project {
        /// Project id from the dataset
        id: String,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Detail view for one vendor
    Vendor {
        /// Vendor id from the dataset
        id: String,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Detail view for one purchase order
    Po {
        /// Purchase order id or number from the dataset
        id: String,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// List purchase orders with a financial footer
    List {
        /// Number of purchase orders to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Reference date for overdue/aging figures (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<String>,
    },

    /// Refresh the local dataset from the configured export URL
    Fetch {
        /// Override the configured [data] url
        #[arg(long)]
        url: Option<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Summary { project, as_of } => {
            cmd_summary(&cfg_dir, project.as_deref(), parse_as_of(as_of)?)
        }
        Commands::Aging { as_of } => cmd_aging(&cfg_dir, parse_as_of(as_of)?),
        Commands::Vendors { top, as_of } => cmd_vendors(&cfg_dir, top, parse_as_of(as_of)?),
        Commands::Projects { top, as_of } => cmd_projects(&cfg_dir, top, parse_as_of(as_of)?),
        Commands::Project { id, as_of } => cmd_project(&cfg_dir, &id, parse_as_of(as_of)?),
        Commands::Vendor { id, as_of } => cmd_vendor(&cfg_dir, &id, parse_as_of(as_of)?),
        Commands::Po { id, as_of } => cmd_po(&cfg_dir, &id, parse_as_of(as_of)?),
        Commands::List { limit, as_of } => cmd_list(&cfg_dir, limit, parse_as_of(as_of)?),
        Commands::Fetch { url } => cmd_fetch(&cfg_dir, url),
    }
}

/// Parse --as-of, defaulting to the local date. Overdue and aging figures are
/// always relative to this date, never to an ambient clock deeper down.
fn parse_as_of(arg: Option<String>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| PofinError::InvalidDate(s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn load_all(cfg_dir: &Path) -> Result<(Config, Dataset)> {
    if !cfg_dir.exists() {
        return Err(PofinError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let config = load_config(cfg_dir)?;
    let data = source::load_dataset(&resolve_data_file(&config, cfg_dir))?;
    Ok((config, data))
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(PofinError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("data.json"), SAMPLE_DATA)?;

    println!("Initialized pofin config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point [data] at your export:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Pull the latest dataset:      pofin fetch");
    println!();
    println!("Then try a report:");
    println!("  pofin summary");
    println!("  pofin vendors --top 5");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct TotalsRow {
    #[tabled(rename = "CURRENCY")]
    currency: &'static str,
    #[tabled(rename = "PO AMOUNT")]
    po_amount: String,
    #[tabled(rename = "INVOICED")]
    invoiced: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "OUTSTANDING")]
    outstanding: String,
    #[tabled(rename = "INVOICED %")]
    invoiced_pct: String,
    #[tabled(rename = "PAID %")]
    paid_pct: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "STATUS")]
    status: &'static str,
    #[tabled(rename = "COUNT")]
    count: usize,
}

#[derive(Tabled)]
struct AgingRow {
    #[tabled(rename = "BUCKET")]
    bucket: &'static str,
    #[tabled(rename = "PHP COUNT")]
    php_count: usize,
    #[tabled(rename = "PHP AMOUNT")]
    php_amount: String,
    #[tabled(rename = "USD COUNT")]
    usd_count: usize,
    #[tabled(rename = "USD AMOUNT")]
    usd_amount: String,
}

#[derive(Tabled)]
struct VendorRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "VENDOR")]
    vendor: String,
    #[tabled(rename = "OUTSTANDING PHP")]
    outstanding_php: String,
    #[tabled(rename = "OUTSTANDING USD")]
    outstanding_usd: String,
    #[tabled(rename = "INVOICES")]
    invoices: usize,
    #[tabled(rename = "OVERDUE")]
    overdue: usize,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "PROJECT")]
    project: String,
    #[tabled(rename = "BUDGET")]
    budget: String,
    #[tabled(rename = "COMMITTED")]
    committed: String,
    #[tabled(rename = "UTILIZATION")]
    utilization: String,
    #[tabled(rename = "REMAINING")]
    remaining: String,
}

#[derive(Tabled)]
struct PoRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "INVOICED")]
    invoiced: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "VENDOR")]
    vendor: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "NET AMOUNT")]
    net_amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "DUE DATE")]
    due_date: String,
    #[tabled(rename = "AGING")]
    aging: String,
}

fn format_whole_money(value: f64, currency_symbol: &str) -> String {
    let rounded = value.round() as i64;
    let grouped = format_grouped_int(rounded);
    format!("{}{:>6}", currency_symbol, grouped)
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

fn format_pct(value: f64) -> String {
    format!("{value:.1}%")
}

/// Progress bar for budget utilization. Display clamps at 100%; the summary
/// itself reports the raw ratio.
fn utilization_bar(pct: f64) -> String {
    let clamped = pct.clamp(0.0, 100.0);
    let filled = (clamped / 10.0).round() as usize;
    let mut bar = String::with_capacity(12);
    bar.push('[');
    for i in 0..10 {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    format!("{bar} {pct:.1}%")
}

fn add_financial_footer(table: &str, total: &str, paid: &str, outstanding: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() < 6 {
        return table.to_string();
    }

    // Merge columns #, NUMBER, DATE into one label cell; keep INVOICED; drop STATUS and VENDOR
    let left_width = widths[0] + widths[1] + widths[2] + 2; // +2 for the two ┴ replaced by spaces
    let amount_width = widths[3];
    let status_width = widths[4];
    let vendor_width = widths[5];

    let rows = [
        ("TOTAL", total),
        ("(-) PAID", paid),
        ("(=) OUTSTANDING", outstanding),
    ];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // First separator: merge left 3 columns, keep INVOICED, close off STATUS+VENDOR
    out.push_str(&format!(
        "├{}┴{}┴{}┼{}┼{}┴{}╯\n",
        "─".repeat(widths[0]),
        "─".repeat(widths[1]),
        "─".repeat(widths[2]),
        "─".repeat(amount_width),
        "─".repeat(status_width),
        "─".repeat(vendor_width),
    ));

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>amount$} │\n",
            label,
            value,
            left = left_width - 2,
            amount = amount_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(amount_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(amount_width)
    ));

    out
}

fn totals_rows(config: &Config, summary: &FinancialSummary) -> Vec<TotalsRow> {
    Currency::ALL
        .iter()
        .map(|c| TotalsRow {
            currency: c.code(),
            po_amount: format_whole_money(summary.total_po_amount.get(*c), config.symbol(*c)),
            invoiced: format_whole_money(summary.total_invoiced.get(*c), config.symbol(*c)),
            paid: format_whole_money(summary.total_paid.get(*c), config.symbol(*c)),
            outstanding: format_whole_money(summary.total_outstanding.get(*c), config.symbol(*c)),
            invoiced_pct: format_pct(summary.invoiced_percentage.get(*c)),
            paid_pct: format_pct(summary.paid_percentage.get(*c)),
        })
        .collect()
}

fn print_summary_tables(config: &Config, summary: &FinancialSummary) {
    let table = Table::new(totals_rows(config, summary))
        .with(Style::rounded())
        .to_string();
    println!("{table}");

    let status_rows: Vec<StatusRow> = InvoiceStatus::ALL
        .iter()
        .map(|s| StatusRow {
            status: s.label(),
            count: summary.status_counts.get(*s),
        })
        .collect();

    println!();
    let table = Table::new(status_rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!(
        "Purchase orders: {}   Invoices: {}   Overdue: {}",
        summary.po_count, summary.invoice_count, summary.overdue_count
    );

    if let Some(budget) = summary.budget {
        println!();
        println!(
            "Budget:      {}",
            format_whole_money(budget.budget, config.symbol(Currency::Php))
        );
        println!(
            "Remaining:   {}",
            format_whole_money(budget.remaining, config.symbol(Currency::Php))
        );
        println!("Utilization: {}", utilization_bar(budget.utilization));
    }
}

/// Show config and dataset overview
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PofinError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let data_file = resolve_data_file(&config, cfg_dir);

    println!("Pofin Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Data file:        {}", data_file.display());
    match &config.data.url {
        Some(url) => println!("Data URL:         {url}"),
        None => println!("Data URL:         (not configured)"),
    }

    if data_file.exists() {
        let data = source::load_dataset(&data_file)?;
        println!("Projects:         {}", data.projects.len());
        println!("Vendors:          {}", data.vendors.len());
        println!("Purchase orders:  {}", data.purchase_orders.len());
        println!("Invoices:         {}", data.invoice_count());
    } else {
        println!("Dataset:          (missing - run 'pofin fetch')");
    }

    Ok(())
}

/// Per-currency totals, percentages and status counts
fn cmd_summary(cfg_dir: &Path, project_id: Option<&str>, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;

    let summary = match project_id {
        Some(id) => {
            let project = data
                .project(id)
                .ok_or_else(|| PofinError::ProjectNotFound(id.to_string()))?;
            println!("Financial summary for '{}' as of {as_of}", project.title);
            summarize(data.orders_for_project(id), Some(project.budget), as_of)
        }
        None => {
            println!("Financial summary as of {as_of}");
            summarize(&data.purchase_orders, None, as_of)
        }
    };

    println!();
    print_summary_tables(&config, &summary);

    Ok(())
}

/// Aging buckets for unpaid invoices
fn cmd_aging(cfg_dir: &Path, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;
    let summary = summarize(&data.purchase_orders, None, as_of);

    let rows: Vec<AgingRow> = AgingBucket::ALL
        .iter()
        .map(|bucket| {
            let php = summary.aging.php.line(*bucket);
            let usd = summary.aging.usd.line(*bucket);
            AgingRow {
                bucket: bucket.label(),
                php_count: php.count,
                php_amount: format_whole_money(php.amount, config.symbol(Currency::Php)),
                usd_count: usd.count,
                usd_amount: format_whole_money(usd.amount, config.symbol(Currency::Usd)),
            }
        })
        .collect();

    println!("Unpaid invoice aging as of {as_of}");
    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!(
        "Unpaid invoices: {}   Overdue: {}",
        summary.invoice_count - summary.status_counts.paid,
        summary.overdue_count
    );

    Ok(())
}

fn resolve_top_n(config: &Config, top: Option<usize>) -> usize {
    top.unwrap_or(config.display.top_n)
}

/// Top vendors by outstanding amount
fn cmd_vendors(cfg_dir: &Path, top: Option<usize>, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;
    let n = resolve_top_n(&config, top);
    let vendors = top_vendors_by_outstanding(&data, as_of, n);

    if vendors.is_empty() {
        println!("No purchase orders in dataset.");
        return Ok(());
    }

    let rows: Vec<VendorRow> = vendors
        .iter()
        .enumerate()
        .map(|(idx, v)| VendorRow {
            index: idx + 1,
            vendor: v.name.clone(),
            outstanding_php: format_whole_money(
                v.summary.total_outstanding.php,
                config.symbol(Currency::Php),
            ),
            outstanding_usd: format_whole_money(
                v.summary.total_outstanding.usd,
                config.symbol(Currency::Usd),
            ),
            invoices: v.summary.invoice_count,
            overdue: v.summary.overdue_count,
        })
        .collect();

    println!("Top {} vendors by outstanding as of {as_of}", rows.len());
    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Project spend summary
fn cmd_projects(cfg_dir: &Path, top: Option<usize>, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;
    let n = resolve_top_n(&config, top);
    let projects = project_spend_summaries(&data, as_of, n);

    if projects.is_empty() {
        println!("No purchase orders in dataset.");
        return Ok(());
    }

    let php = config.symbol(Currency::Php);
    let rows: Vec<ProjectRow> = projects
        .iter()
        .enumerate()
        .map(|(idx, p)| project_row(idx, p, php))
        .collect();

    println!("Project spend as of {as_of}");
    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn project_row(idx: usize, entry: &EntitySummary, php_symbol: &str) -> ProjectRow {
    let (budget, utilization, remaining) = match entry.summary.budget {
        Some(b) => (
            format_whole_money(b.budget, php_symbol),
            format_pct(b.utilization),
            format_whole_money(b.remaining, php_symbol),
        ),
        None => ("-".to_string(), "-".to_string(), "-".to_string()),
    };

    ProjectRow {
        index: idx + 1,
        project: entry.name.clone(),
        budget,
        committed: format_whole_money(entry.summary.total_po_amount.php, php_symbol),
        utilization,
        remaining,
    }
}

/// Detail view for one project
fn cmd_project(cfg_dir: &Path, id: &str, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;

    let project = data
        .project(id)
        .ok_or_else(|| PofinError::ProjectNotFound(id.to_string()))?;
    let orders = data.orders_for_project(id);
    let summary = summarize(orders.iter().copied(), Some(project.budget), as_of);

    println!("Project {} - {}", project.id, project.title);
    println!("Kind:     {}", project.kind);
    println!("Status:   {}", project.status);
    println!(
        "Contract: {}",
        format_whole_money(project.contract_cost, config.symbol(Currency::Php))
    );
    println!("As of:    {as_of}");
    println!();
    print_summary_tables(&config, &summary);

    Ok(())
}

/// Detail view for one vendor
fn cmd_vendor(cfg_dir: &Path, id: &str, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;

    let vendor = data
        .vendor(id)
        .ok_or_else(|| PofinError::VendorNotFound(id.to_string()))?;
    let orders = data.orders_for_vendor(id);
    let summary = summarize(orders.iter().copied(), None, as_of);

    println!("Vendor {} - {}", vendor.id, vendor.name);
    println!("Category: {}", vendor.category);
    println!("Active:   {}", if vendor.active { "yes" } else { "no" });
    println!("As of:    {as_of}");
    println!();

    if orders.is_empty() {
        println!("No purchase orders for this vendor.");
        return Ok(());
    }

    print_po_listing(&config, &data, &orders, as_of);
    println!();
    print_summary_tables(&config, &summary);

    Ok(())
}

/// Detail view for one purchase order
fn cmd_po(cfg_dir: &Path, id: &str, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;

    let po = data
        .purchase_order(id)
        .ok_or_else(|| PofinError::PurchaseOrderNotFound(id.to_string()))?;
    let summary = summarize([po], None, as_of);
    let symbol = config.symbol(po.currency);

    let number = if po.number.is_empty() { &po.id } else { &po.number };
    println!("Purchase order {number}");
    println!(
        "Project:  {}",
        data.project(&po.project_id)
            .map(|p| p.title.as_str())
            .unwrap_or(po.project_id.as_str())
    );
    println!(
        "Vendor:   {}",
        data.vendor(&po.vendor_id)
            .map(|v| v.name.as_str())
            .unwrap_or(po.vendor_id.as_str())
    );
    println!("Status:   {}", po.status);
    println!("Amount:   {}", format_whole_money(po.amount, symbol));
    println!("As of:    {as_of}");

    if po.invoices.is_empty() {
        println!();
        println!("No invoices against this purchase order.");
        return Ok(());
    }

    let rows: Vec<InvoiceRow> = po
        .invoices
        .iter()
        .map(|inv| InvoiceRow {
            number: if inv.number.is_empty() {
                inv.id.clone()
            } else {
                inv.number.clone()
            },
            net_amount: format_whole_money(inv.net_amount, config.symbol(inv.currency)),
            status: inv.status.to_string(),
            due_date: inv
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            aging: if inv.is_paid() {
                "-".to_string()
            } else {
                AgingBucket::classify(inv.days_overdue(as_of)).to_string()
            },
        })
        .collect();

    println!();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!(
        "Invoiced: {}   Paid: {}   Outstanding: {}   ({} invoiced, {} paid)",
        format_whole_money(summary.total_invoiced.get(po.currency), symbol),
        format_whole_money(summary.total_paid.get(po.currency), symbol),
        format_whole_money(summary.total_outstanding.get(po.currency), symbol),
        format_pct(summary.invoiced_percentage.get(po.currency)),
        format_pct(summary.paid_percentage.get(po.currency)),
    );

    Ok(())
}

fn print_po_listing(config: &Config, data: &Dataset, orders: &[&PurchaseOrder], as_of: NaiveDate) {
    let rows: Vec<PoRow> = orders
        .iter()
        .enumerate()
        .map(|(idx, po)| {
            let invoiced: f64 = po
                .invoices
                .iter()
                .filter(|i| i.currency == po.currency)
                .map(|i| i.net_amount)
                .sum();
            PoRow {
                index: idx + 1,
                number: if po.number.is_empty() {
                    po.id.clone()
                } else {
                    po.number.clone()
                },
                date: po
                    .order_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                invoiced: format_whole_money(invoiced, config.symbol(po.currency)),
                status: po.status.to_string(),
                vendor: data
                    .vendor(&po.vendor_id)
                    .map(|v| v.name.clone())
                    .unwrap_or_else(|| po.vendor_id.clone()),
            }
        })
        .collect();

    // Footer carries the PHP leg; the USD leg is printed separately below so
    // the two currencies never share a sum.
    let summary = summarize(orders.iter().copied(), None, as_of);
    let php = config.symbol(Currency::Php);

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_financial_footer(
        &table,
        &format_whole_money(summary.total_invoiced.php, php),
        &format_whole_money(summary.total_paid.php, php),
        &format_whole_money(summary.total_outstanding.php, php),
    );
    println!("{table}");

    if !(summary.total_invoiced.usd == 0.0
        && summary.total_paid.usd == 0.0
        && summary.total_outstanding.usd == 0.0)
    {
        let usd = config.symbol(Currency::Usd);
        println!(
            "USD: invoiced {}, paid {}, outstanding {}",
            format_whole_money(summary.total_invoiced.usd, usd),
            format_whole_money(summary.total_paid.usd, usd),
            format_whole_money(summary.total_outstanding.usd, usd),
        );
    }
}

/// List purchase orders with a financial footer
fn cmd_list(cfg_dir: &Path, limit: Option<usize>, as_of: NaiveDate) -> Result<()> {
    let (config, data) = load_all(cfg_dir)?;

    if data.purchase_orders.is_empty() {
        println!("No purchase orders in dataset.");
        return Ok(());
    }

    let orders: Vec<&PurchaseOrder> = data.purchase_orders.iter().collect();
    let orders = match limit {
        Some(n) => &orders[..n.min(orders.len())],
        None => &orders[..],
    };

    print_po_listing(&config, &data, orders, as_of);

    println!();
    println!("Total: {} purchase orders", data.purchase_orders.len());

    Ok(())
}

/// Refresh the local dataset from the export URL
fn cmd_fetch(cfg_dir: &Path, url_override: Option<String>) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(PofinError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let url = match url_override.or_else(|| config.data.url.clone()) {
        Some(u) => u,
        None => return Err(PofinError::NoDataUrl),
    };

    let data_file = resolve_data_file(&config, cfg_dir);
    let data = source::fetch_dataset(&url, &data_file)?;

    println!("Fetched dataset from {url}");
    println!("  Projects:        {}", data.projects.len());
    println!("  Vendors:         {}", data.vendors.len());
    println!("  Purchase orders: {}", data.purchase_orders.len());
    println!("  Invoices:        {}", data.invoice_count());
    println!("  Saved:           {}", data_file.display());

    Ok(())
}
