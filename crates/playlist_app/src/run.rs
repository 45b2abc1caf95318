use std::fs;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use playlist_core::{parse_source_list, to_delimited, to_extended_m3u};
use playlist_engine::{
    copy_output, discover_sources, render_source_list, run_pipeline, write_atomic, BarkObserver,
    DiscoverySettings, FetchSettings, LogObserver, ObserverSet, PipelineSettings, ReqwestFetcher,
};

use crate::config::Config;

/// One full aggregation run: discover sources, fetch and merge
/// channels, write both playlist formats.
pub async fn run_task(cfg: &Config) -> anyhow::Result<()> {
    log::info!("============================================================");
    log::info!("starting channel aggregation run");

    let fetch_settings = FetchSettings {
        request_timeout: Duration::from_secs(cfg.http.timeout_secs.max(1)),
        cookie: if cfg.cookie.data.is_empty() {
            None
        } else {
            Some(cfg.cookie.data.clone())
        },
        ..FetchSettings::default()
    };
    let fetcher = Arc::new(ReqwestFetcher::new(fetch_settings)?);
    let (observers, bark) = build_observers(cfg);

    if cfg.discovery.enable {
        refresh_source_list(cfg, fetcher.as_ref()).await;
    } else {
        log::info!("source discovery disabled; using existing list");
    }

    let source_text = fs::read_to_string(&cfg.source.file)
        .with_context(|| format!("reading source list {}", cfg.source.file.display()))?;
    let tasks = parse_source_list(&source_text);
    anyhow::ensure!(
        !tasks.is_empty(),
        "no source urls in {}",
        cfg.source.file.display()
    );
    log::info!("loaded {} source urls", tasks.len());

    let pipeline = PipelineSettings {
        workers: if cfg.http.max_workers > 0 {
            cfg.http.max_workers
        } else {
            PipelineSettings::default().workers
        },
        debug_dump: cfg.output.debug.clone(),
    };
    let channels = run_pipeline(fetcher, tasks, &pipeline, &observers)
        .await
        .context("no channels aggregated; check that the cookie is still valid")?;

    // Each output format is attempted independently.
    match write_atomic(&cfg.output.m3u, &to_extended_m3u(&channels)) {
        Ok(()) => log::info!("wrote extended playlist: {}", cfg.output.m3u.display()),
        Err(err) => log::error!(
            "failed to write extended playlist {}: {err}",
            cfg.output.m3u.display()
        ),
    }
    match write_atomic(&cfg.output.delimited, &to_delimited(&channels)) {
        Ok(()) => log::info!("wrote delimited list: {}", cfg.output.delimited.display()),
        Err(err) => log::error!(
            "failed to write delimited list {}: {err}",
            cfg.output.delimited.display()
        ),
    }
    log::info!("aggregated {} unique channels", channels.len());

    if cfg.redirect.enable {
        match copy_output(&cfg.redirect.from, &cfg.redirect.to) {
            Ok(true) => log::info!(
                "copied {} -> {}",
                cfg.redirect.from.display(),
                cfg.redirect.to.display()
            ),
            Ok(false) => {}
            Err(err) => log::warn!("redirect copy failed: {err}"),
        }
    }

    // Pushes still in flight would be cancelled when main returns and
    // the runtime shuts down.
    if let Some(bark) = &bark {
        bark.flush().await;
    }

    Ok(())
}

async fn refresh_source_list(cfg: &Config, fetcher: &ReqwestFetcher) {
    let settings = DiscoverySettings {
        limit: cfg.discovery.limit,
        ..DiscoverySettings::default()
    };
    match discover_sources(fetcher, &settings).await {
        Ok(sources) if sources.is_empty() => {
            log::warn!("discovery found no multicast sources; keeping existing list");
        }
        Ok(sources) => {
            log::info!("discovered {} multicast sources", sources.len());
            match write_atomic(&cfg.source.file, &render_source_list(&sources)) {
                Ok(()) => log::info!("updated {}", cfg.source.file.display()),
                Err(err) => log::warn!("failed to update source list: {err}"),
            }
        }
        Err(err) => {
            log::warn!("source discovery failed: {err}; keeping existing list");
        }
    }
}

fn build_observers(cfg: &Config) -> (ObserverSet, Option<Arc<BarkObserver>>) {
    let mut observers = ObserverSet::new();
    observers.subscribe(Box::new(LogObserver));
    let mut bark = None;
    if let Some(settings) = &cfg.push.bark {
        match BarkObserver::new(&settings.host, settings.key.clone()) {
            Ok(observer) => {
                let observer = Arc::new(observer);
                observers.subscribe(Box::new(Arc::clone(&observer)));
                bark = Some(observer);
            }
            Err(err) => log::warn!("bark push disabled: {err}"),
        }
    }
    (observers, bark)
}
