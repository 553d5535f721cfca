use house_share::{
    config::{self, database},
    core::{
        identity::{self, NewResident},
        overview,
    },
    errors::{Error, Result},
    handlers::AppContext,
};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = config::settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        household_size = settings.household.size(),
        "Successfully processed application configuration."
    );

    // 4. Connect and make sure every table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let ctx = AppContext::new(db, settings);

    // 5. Seed the configured administrator (if necessary)
    seed_admin(&ctx)
        .await
        .inspect_err(|e| error!("Failed to seed administrator: {}", e))?;

    // 6. Summarize the current bills
    log_current_bills(&ctx).await
}

async fn seed_admin(ctx: &AppContext) -> Result<()> {
    let Some(admin) = &ctx.settings.admin else {
        return Ok(());
    };

    if let Some(existing) =
        identity::get_resident_by_username(&ctx.database, &admin.username).await?
    {
        identity::promote_to_admin(&ctx.database, existing.id).await?;
        return Ok(());
    }

    let Some(password) = config::settings::admin_password()? else {
        warn!(
            username = %admin.username,
            "ADMIN_PASSWORD not set; skipping administrator bootstrap"
        );
        return Ok(());
    };

    let resident = identity::register(
        &ctx.database,
        NewResident {
            username: admin.username.clone(),
            name: admin.name.clone(),
            surname: admin.surname.clone(),
            email: admin.email.clone(),
            password,
        },
    )
    .await?;
    identity::promote_to_admin(&ctx.database, resident.id).await?;
    info!(username = %resident.username, "Seeded administrator account");
    Ok(())
}

async fn log_current_bills(ctx: &AppContext) -> Result<()> {
    let household = &ctx.settings.household;

    match overview::current_charge_overview(&ctx.database, household).await {
        Ok(current) => info!(
            month = %current.period.month,
            year = current.period.year,
            per_capita = %current.per_capita,
            payments = current.payments.len(),
            "Current internet bill"
        ),
        Err(Error::Empty { category }) => info!("No {category} entries recorded yet"),
        Err(e) => return Err(e),
    }

    match overview::current_utility_overview(&ctx.database, household).await {
        Ok(current) => info!(
            month = %current.period.month,
            year = current.period.year,
            per_capita = %current.per_capita,
            payments = current.payments.len(),
            "Current utilities bill"
        ),
        Err(Error::Empty { category }) => info!("No {category} entries recorded yet"),
        Err(e) => return Err(e),
    }

    Ok(())
}
