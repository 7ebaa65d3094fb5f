use anyhow::Result;
use folio_core::application::{
    ports::{
        identity::IdentityAllocator, media::MediaStore, time::Clock, util::SlugGenerator,
    },
    services::ApplicationServices,
    workflow::WorkflowPorts,
};
use folio_core::config::AppConfig;
use folio_core::domain::{
    article::{ArticleReadRepository, ArticleWriteRepository},
    tag::TagRepository,
};
use folio_core::infrastructure::{
    database,
    identity::TimeOrderedIdentityAllocator,
    media::LocalMediaStore,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository, PostgresTagRepository,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use folio_core::presentation::http::{
    routes::{DEFAULT_BODY_LIMIT, RouterOptions, UploadMount, build_router},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let read_repo: Arc<dyn ArticleReadRepository> =
        Arc::new(PostgresArticleReadRepository::new(pool.clone()));
    let write_repo: Arc<dyn ArticleWriteRepository> =
        Arc::new(PostgresArticleWriteRepository::new(pool.clone()));
    let tag_repo: Arc<dyn TagRepository> = Arc::new(PostgresTagRepository::new(pool));
    let media_store: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(
        config.upload_dir().clone(),
        config.upload_public_prefix(),
        config.upload_max_bytes(),
    ));
    let identities: Arc<dyn IdentityAllocator> = Arc::new(TimeOrderedIdentityAllocator::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(WorkflowPorts {
        read_repo,
        write_repo,
        tag_repo,
        media_store,
        identities,
        slugger,
        clock,
        tag_policy: config.unknown_tag_policy(),
    }));

    let state = HttpState { services };

    // Two base64 encoded images plus the JSON envelope.
    let body_limit = config
        .upload_max_bytes()
        .saturating_mul(3)
        .max(DEFAULT_BODY_LIMIT);
    let app = build_router(
        state,
        RouterOptions {
            uploads: Some(UploadMount {
                dir: config.upload_dir().clone(),
                public_prefix: config.upload_public_prefix().to_string(),
            }),
            allowed_origins: config.allowed_origins().to_vec(),
            body_limit,
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        %address,
        uploads = %config.upload_dir().display(),
        tag_policy = ?config.unknown_tag_policy(),
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
