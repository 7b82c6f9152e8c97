//! Demo embedder: runs one controller through a scripted session.
//!
//! Walks the full lifecycle (target declared, surface ready, guest
//! created and attached, autosize renegotiation, deferred resize, detach)
//! and logs every transition. Set `RUST_LOG=alcove_core=debug` for the
//! controller's view of it.

use alcove_core::{Extent, SizeDefaults};
use alcove_host::{EmbeddingSession, SimGuestService};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("alcove_core=info".parse()?)
                .add_directive("alcove_host=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let viewport = Extent::new(1280, 800);
    tracing::info!(%viewport, "starting demo session");

    let guests = SimGuestService::new(Duration::from_millis(20));
    let session = EmbeddingSession::start(SizeDefaults::for_viewport(viewport), guests.clone())?;
    session
        .element()
        .on_create_failed(|| tracing::warn!("createfailed event observed"));

    // Declarative setup: the embedder names the content, then the plugin
    // surface comes up.
    session.set_attribute("target", "settings-pane")?;
    let attachment = session.attach()?;
    tracing::info!(%attachment, "surface ready signalled");

    tokio::time::sleep(Duration::from_millis(100)).await;
    tracing::info!(live = guests.live_guests(), "guest created and attached");

    // The guest settles on a preferred size.
    session.report_size_changed(Extent::new(400, 300), Extent::new(0, 0))?;

    // Constraint change renegotiates without re-attaching.
    session.set_attribute("autosize", "on")?;
    session.set_attribute("maxwidth", "500")?;

    // Defer while the embedder animates, then apply the latest size once.
    session.set_defer_auto_size(true)?;
    session.report_size_changed(Extent::new(450, 320), Extent::new(400, 300))?;
    session.report_size_changed(Extent::new(480, 340), Extent::new(450, 320))?;
    session.resume_deferred_auto_size()?;
    session.set_defer_auto_size(false)?;

    tokio::time::sleep(Duration::from_millis(50)).await;
    tracing::info!(
        extent = ?session.surface().extent(),
        attach_calls = session.surface().attach_calls().len(),
        auto_size_updates = guests.auto_size_log().len(),
        "session steady state"
    );

    // Tear down.
    session.detach()?;
    let controller = session.shutdown().await?;
    tracing::info!(
        state = %controller.binding_state(),
        constraints = ?controller.constraints(),
        live = guests.live_guests(),
        "session finished"
    );
    Ok(())
}
