use expense_ledger::{aggregate, apply, category_totals, open_ledger, Category, Config, FilterSpec};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expense_ledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Expense Ledger...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Storage: {}",
        config.environment,
        config.storage_description()
    );

    let ledger = open_ledger(&config)?;
    tracing::info!("{} registered users", ledger.records().users().len());

    let Some(user) = ledger.current_user() else {
        tracing::info!("No saved session, nothing to summarize");
        return Ok(());
    };

    let expenses = ledger.list_expenses();
    let visible = apply(expenses, &FilterSpec::default());
    let summary = aggregate(&visible);
    tracing::info!(
        "{} ({}): {} expenses, total {:.2}, average {:.2}",
        user,
        ledger.profile_name().unwrap_or_default(),
        summary.count,
        summary.total,
        summary.average
    );

    for (category, total) in category_totals(expenses, &Category::ALL) {
        tracing::info!("  {:<16} {:.2}", category.label(), total);
    }

    Ok(())
}
