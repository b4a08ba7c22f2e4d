use anyhow::{Context, Result};
use docslug::{
    application::{
        model::{Model, ModelDefinition},
        ports::{time::Clock, util::SlugGenerator},
        slug::SlugPlugin,
    },
    config::AppConfig,
    domain::{
        document::{DocumentReadRepository, DocumentWriteRepository, FieldName},
        schema::{AttributeSpec, Schema},
    },
    infrastructure::{
        database,
        repositories::{InMemoryDocumentStore, PostgresDocumentStore},
        time::SystemClock,
        util::AsciiSlugGenerator,
    },
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let sources: Vec<String> = std::env::args().skip(1).collect();
    if sources.is_empty() {
        anyhow::bail!("usage: docslug <source value>...");
    }

    let source_field = FieldName::new(config.slug().source_field.as_str())
        .context("SLUG_SOURCE_FIELD is not a valid field name")?;
    let schema = Schema::new(FieldName::new(config.collection())?)
        .attribute(source_field, AttributeSpec::string())?;

    let slugger: Arc<dyn SlugGenerator> = Arc::new(AsciiSlugGenerator);
    let mut definition = ModelDefinition::new(schema);
    definition.plugin(&SlugPlugin::new(config.slug().clone(), slugger))?;

    let (read_repo, write_repo) = open_store(&config, &definition).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let model = Model::new(definition, read_repo, write_repo, clock);

    let slug_field = config.slug().slug_field.as_str();
    for source in sources {
        let mut fields = Map::new();
        fields.insert(config.slug().source_field.clone(), Value::String(source.clone()));
        let created = model.create(fields).await?;

        let slug = created.get_str(slug_field).unwrap_or_default().to_string();
        let found = model.find_by_slug(&slug).await?;
        tracing::info!(
            id = ?created.id(),
            source = %source,
            slug = %slug,
            round_trip = found.is_some_and(|doc| doc.id() == created.id()),
            "document created"
        );
        println!("{slug}");
    }

    Ok(())
}

async fn open_store(
    config: &AppConfig,
    definition: &ModelDefinition,
) -> Result<(Arc<dyn DocumentReadRepository>, Arc<dyn DocumentWriteRepository>)> {
    match config.database_url() {
        Some(url) => {
            let pool = database::init_pool(url).await?;
            database::run_migrations(&pool).await?;
            let store = Arc::new(PostgresDocumentStore::new(pool, definition.schema()));
            store.ensure_indexes().await?;
            tracing::info!(collection = %config.collection(), "using postgres document store");
            let read_repo: Arc<dyn DocumentReadRepository> = store.clone();
            let write_repo: Arc<dyn DocumentWriteRepository> = store;
            Ok((read_repo, write_repo))
        }
        None => {
            let store = Arc::new(InMemoryDocumentStore::new(definition.schema()));
            tracing::info!(collection = %config.collection(), "using in-memory document store");
            let read_repo: Arc<dyn DocumentReadRepository> = store.clone();
            let write_repo: Arc<dyn DocumentWriteRepository> = store;
            Ok((read_repo, write_repo))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
