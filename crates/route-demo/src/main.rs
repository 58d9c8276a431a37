mod components;
mod routes;
mod systems;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use route_pulse_common::directions::Route;
use route_pulse_common::{
    build_path, init_tracing, Config, GreatCircleDirections, MercatorProjection, PulseAnimator,
    Viewport, ViewportObserver,
};
use tokio::signal;
use tokio::time::MissedTickBehavior;

use components::*;
use systems::camera::{camera_drift_system, clock_system};
use systems::observation::{phase_completion_system, region_observation_system};
use systems::render::render_system;

// Route fills this share of the initial view
const ROUTE_PADDING: f64 = 1.3;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load config, it also picks the log format
    let config = Config::from_env()?;
    init_tracing("route-demo", config.log_format()?);

    // 2. Ask for directions; without a route there is nothing to animate
    let provider = GreatCircleDirections::new(config.route_samples);
    let request = routes::request_from(&config)?;
    let Some(route) = routes::fetch_route(&provider, &request).await else {
        tracing::warn!("Route display not started");
        return Ok(());
    };

    // 3. Build the world and start the pulse
    let mut world = build_world(&config, route)?;
    // All callbacks run serially on one thread, like a UI run loop
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            clock_system,
            camera_drift_system,
            region_observation_system,
            phase_completion_system,
            render_system,
        )
            .chain(),
    );

    // 4. Graceful shutdown on Ctrl+C or after the configured run time
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::warn!("Received shutdown signal");
    };
    let deadline = async {
        match config.run_seconds {
            0 => std::future::pending::<()>().await,
            secs => tokio::time::sleep(Duration::from_secs(secs)).await,
        }
    };

    tracing::info!(interval_ms = config.frame_interval_ms, "Starting display loop...");
    tokio::select! {
        _ = run_frames(&mut world, &mut schedule, config.frame_interval()) => {}
        _ = shutdown => {}
        _ = deadline => {
            tracing::info!("Run time elapsed");
        }
    }

    teardown(&mut world);
    Ok(())
}

/// Sets up the map surface around the route and starts the pulse on it.
fn build_world(config: &Config, route: Route) -> Result<World> {
    let viewport = Viewport::fitting(&route.coordinates, ROUTE_PADDING)
        .context("Route has no coordinates to frame")?;
    let surface = MapSurface {
        viewport,
        projection: MercatorProjection::new(config.view_size()),
    };
    let styles = LayerStyles::default();

    tracing::info!(
        points = route.coordinates.len(),
        distance_km = route.distance_m / 1000.0,
        overlay_width = styles.overlay.line_width,
        overlay_color = ?styles.overlay.effective_color(),
        overlay_cap = ?styles.overlay.line_cap,
        ?viewport,
        "Route overlay added"
    );

    let mut animator = PulseAnimator::new(config.phase_duration());
    animator.start(
        build_path(&route.coordinates, &surface.viewport, &surface.projection),
        Duration::ZERO,
    );
    tracing::info!(
        phase_ms = animator.phase_duration().as_millis() as u64,
        pulse_width = styles.pulse.line_width,
        pulse_color = ?styles.pulse.effective_color(),
        pulse_cap = ?styles.pulse.line_cap,
        "Pulse animation started"
    );
    let mut observer = ViewportObserver::new();
    observer.start();

    let mut world = World::new();
    world.insert_resource(DeltaTime::default());
    world.insert_resource(FrameClock::default());
    world.insert_resource(FrameTimer::new(Instant::now()));
    world.insert_resource(surface);
    world.insert_resource(ActiveRoute(route));
    world.insert_resource(styles);
    world.insert_resource(CameraDrift::new(config.camera_drift));
    world.insert_resource(observer);
    world.insert_resource(animator);
    Ok(world)
}

/// Runs the schedule once per display refresh.
async fn run_frames(world: &mut World, schedule: &mut Schedule, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        schedule.run(world);
    }
}

/// Stops the pulse and the viewport subscription, as when the view goes away.
fn teardown(world: &mut World) {
    world.resource_mut::<PulseAnimator>().stop();
    world.resource_mut::<ViewportObserver>().stop();

    let clock = world.resource::<FrameClock>();
    tracing::info!(frames = clock.frame, elapsed = ?clock.elapsed, "Shutting down gracefully...");
}
