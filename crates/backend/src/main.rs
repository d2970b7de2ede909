pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use contracts::usecases::common::{RecordIssue, UseCaseMetadata};
use contracts::usecases::u501_migrate_store::{MigrateStore, MigrationReport};
use contracts::usecases::u502_dedupe_products::DedupeRequest;
use contracts::usecases::u503_import_products_csv::{ImportRequest, VarietyStyle};
use contracts::usecases::u504_seed_catalog::SeedReport;
use shared::config::load_config;
use shared::data::db::{CatalogDb, DatabaseTarget};
use shared::data::store::CatalogStore;
use shared::format::{format_number, plural};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Marketplace catalog maintenance")]
struct Cli {
    /// Path to config.toml (default: next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Postgres URL for single-store commands (overrides config and env)
    #[arg(long, global = true)]
    db_url: Option<String>,

    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Copy categories and products from the SQLite store into Postgres
    Migrate {
        /// Source SQLite file (default: migration.source_path / DB_STORAGE)
        #[arg(long)]
        source: Option<PathBuf>,
        /// Destination Postgres URL (default: DATABASE_URL)
        #[arg(long)]
        dest: Option<String>,
        /// Require SSL on the destination connection
        #[arg(long, default_value_t = false)]
        ssl: bool,
    },
    /// Remove products that share a normalized title
    Dedupe {
        /// Limit to one category (case-insensitive name)
        #[arg(long)]
        category: Option<String>,
        /// Report the plan without deleting
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Import products from a CSV file
    ImportCsv {
        file: PathBuf,
        /// Replace every product of this category with the file rows
        #[arg(long)]
        replace_category: Option<String>,
        /// Mark replaced products as services
        #[arg(long, default_value_t = false, requires = "replace_category")]
        service: bool,
        #[arg(long, value_enum, default_value_t = VarietyArg::Verbatim)]
        variety: VarietyArg,
    },
    /// Seed an empty store with default categories and sample products
    Seed,
    /// Create missing default categories and fix their icons
    EnsureCategories,
    /// Repair category icons broken by a latin-1 round trip
    RepairIcons,
    /// Delete the demo products created by early seeding
    CleanupDemo,
    /// Mark all products of a category as services
    MarkService { category: String },
    /// Categories with product counts
    Stats {
        /// Only categories whose name contains this text
        filter: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum VarietyArg {
    Verbatim,
    TitleCase,
    Flowers,
}

impl From<VarietyArg> for VarietyStyle {
    fn from(arg: VarietyArg) -> Self {
        match arg {
            VarietyArg::Verbatim => VarietyStyle::Verbatim,
            VarietyArg::TitleCase => VarietyStyle::TitleCase,
            VarietyArg::Flowers => VarietyStyle::Flowers,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let log_file = system::tracing::initialize(cli.verbose)?;
    tracing::debug!("Logging to {}", log_file.display());

    let mut config = load_config(cli.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());

    match cli.command {
        Commands::Migrate { source, dest, ssl } => {
            let source = match source {
                Some(path) => DatabaseTarget::Sqlite { path },
                None => config.migration_source(),
            };
            let destination = match dest {
                Some(url) => DatabaseTarget::Postgres {
                    url,
                    ssl: ssl || config.migration.destination_ssl,
                },
                None => config.migration_destination()?,
            };
            let report = migrate(&source, &destination, config.database.max_connections).await?;
            print_migration(&report);
            if report.failed > 0 {
                bail!("{} products failed to migrate", report.failed);
            }
            Ok(())
        }
        command => {
            let target = match cli.db_url {
                Some(url) => DatabaseTarget::Postgres {
                    url,
                    ssl: config.database.ssl,
                },
                None => config.database_target(),
            };
            let db = CatalogDb::connect(&target, config.database.max_connections)
                .await
                .with_context(|| format!("Cannot open {}", target.describe()))?;
            let result = run_command(&db, command).await;
            close_quietly(db).await;
            result
        }
    }
}

/// Both handles are closed whatever the outcome of the run
async fn migrate(
    source: &DatabaseTarget,
    destination: &DatabaseTarget,
    max_connections: u32,
) -> anyhow::Result<MigrationReport> {
    tracing::info!("{}", MigrateStore::display_name());
    let source_db = CatalogDb::connect_read_only(source, max_connections)
        .await
        .with_context(|| format!("Cannot open source {}", source.describe()))?;
    let destination_db = match CatalogDb::connect(destination, max_connections).await {
        Ok(db) => db,
        Err(e) => {
            close_quietly(source_db).await;
            return Err(e).with_context(|| format!("Cannot open destination {}", destination.describe()));
        }
    };

    let result = usecases::u501_migrate_store::MigrationExecutor::new(&source_db, &destination_db)
        .run()
        .await;

    close_quietly(source_db).await;
    close_quietly(destination_db).await;
    Ok(result?)
}

async fn close_quietly(db: CatalogDb) {
    let label = db.label().to_string();
    if let Err(e) = db.close().await {
        tracing::warn!("Error closing {}: {}", label, e);
    }
}

async fn run_command(store: &dyn CatalogStore, command: Commands) -> anyhow::Result<()> {
    use usecases::{
        u502_dedupe_products::DedupeExecutor, u503_import_products_csv::ImportExecutor,
        u504_seed_catalog::SeedExecutor, u505_cleanup_demo_products::CleanupExecutor,
    };

    match command {
        Commands::Migrate { .. } => bail!("migrate opens its own stores"),
        Commands::Dedupe { category, dry_run } => {
            let category_id = match category {
                Some(name) => Some(
                    store
                        .find_category_by_name(&name)
                        .await?
                        .with_context(|| format!("Category '{}' not found", name))?
                        .id,
                ),
                None => None,
            };
            let report = DedupeExecutor::new(store)
                .run(&DedupeRequest {
                    category_id,
                    dry_run,
                })
                .await?;
            for outcome in &report.outcomes {
                println!(
                    "  '{}': keep #{}, remove {:?}",
                    outcome.title_key,
                    outcome.keeper_id,
                    outcome.removed_ids.iter().map(|id| id.0).collect::<Vec<_>>()
                );
            }
            let (verb, rows) = if report.dry_run {
                let planned = report
                    .outcomes
                    .iter()
                    .map(|o| o.removed_ids.len() as u64)
                    .sum::<u64>();
                ("would remove", planned)
            } else {
                ("removed", report.removed)
            };
            println!(
                "Duplicate groups: {}, {} {} {}",
                report.groups,
                verb,
                format_number(rows),
                plural(rows, "row", "rows")
            );
        }
        Commands::ImportCsv {
            file,
            replace_category,
            service,
            variety,
        } => {
            let request = match replace_category {
                Some(name) => ImportRequest::replace_category(name, service),
                None => ImportRequest::append(),
            }
            .with_variety(variety.into());
            let reader = std::fs::File::open(&file)
                .with_context(|| format!("CSV file not found: {}", file.display()))?;
            let report = ImportExecutor::new(store).run(reader, &request).await?;
            print_issues(&report.issues);
            println!(
                "Rows: {}, inserted: {}, deleted: {}, skipped: {}",
                format_number(report.rows_read as u64),
                format_number(report.inserted),
                format_number(report.deleted),
                report.issues.len()
            );
            if report.inserted == 0 {
                bail!("No valid rows in {}", file.display());
            }
        }
        Commands::Seed => {
            let report = SeedExecutor::new(store).seed_if_empty().await?;
            print_seed(&report);
            if report.products_present {
                println!("Products already present, nothing seeded");
            } else {
                println!("Sample products created: {}", report.products_seeded);
            }
        }
        Commands::EnsureCategories => {
            let report = SeedExecutor::new(store).ensure_default_categories().await?;
            print_seed(&report);
        }
        Commands::RepairIcons => {
            let report = SeedExecutor::new(store).repair_icons().await?;
            for fix in &report.fixed {
                println!("  #{} {}: {:?} -> {}", fix.id, fix.name, fix.before, fix.after);
            }
            println!(
                "Icons fixed: {}, unchanged: {}, without icon: {}",
                report.fixed.len(),
                report.unchanged,
                report.without_icon
            );
        }
        Commands::CleanupDemo => {
            let report = CleanupExecutor::new(store).run().await?;
            println!(
                "Deleted {} demo {}",
                format_number(report.deleted),
                plural(report.deleted, "product", "products")
            );
        }
        Commands::MarkService { category } => {
            let (category, updated) =
                domain::a002_product::service::mark_category_as_service(store, &category).await?;
            println!(
                "Marked {} {} in '{}' (#{}) as services",
                format_number(updated),
                plural(updated, "product", "products"),
                category.name,
                category.id
            );
        }
        Commands::Stats { filter } => {
            let stats =
                domain::a001_category::service::category_stats(store, filter.as_deref()).await?;
            for summary in &stats {
                println!(
                    "  #{:<4} {} {:<24} {:>8}",
                    summary.id,
                    summary.icon.as_deref().unwrap_or(" "),
                    summary.name,
                    format_number(summary.product_count)
                );
            }
            println!("Categories: {}", stats.len());
        }
    }
    Ok(())
}

fn print_issues(issues: &[RecordIssue]) {
    for issue in issues {
        println!("  {}", issue);
    }
}

fn print_migration(report: &MigrationReport) {
    print_issues(&report.issues);
    println!("Run {} ({})", report.run_id, report.status);
    println!(
        "Categories mapped: {} ({} created)",
        report.categories_mapped, report.categories_created
    );
    println!(
        "Products created: {}, skipped: {}, failed: {}",
        format_number(report.created as u64),
        format_number(report.skipped as u64),
        format_number(report.failed as u64)
    );
}

fn print_seed(report: &SeedReport) {
    for name in &report.categories_created {
        println!("  created   {}", name);
    }
    for name in &report.icons_updated {
        println!("  icon      {}", name);
    }
    for name in &report.categories_untouched {
        println!("  untouched {}", name);
    }
    println!(
        "Categories created: {}, icons updated: {}, already correct: {}",
        report.categories_created.len(),
        report.icons_updated.len(),
        report.categories_found.len()
    );
}
