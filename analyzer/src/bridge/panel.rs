use crate::bridge::model::PanelModel;
use crate::feed::profile::VehicleObservation;
use crate::workflow::runner::Runner;
use anyhow::Result;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use tokio::task;
use warp::{http::StatusCode, Filter};

fn panel_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9100))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

/// Bridge that hosts the panel HTTP endpoint, the observation ingress, and
/// the operator override action.
pub struct PanelBridge {
    state: Arc<RwLock<PanelModel>>,
}

impl PanelBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(PanelModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let panel_route = warp::path("panel")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<PanelModel>>| warp::reply::json(&*state.read().unwrap()));

        let observe_route = warp::path("observe")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |observation: VehicleObservation,
                 state: Arc<RwLock<PanelModel>>,
                 runner: Arc<Runner>| async move {
                    // the resolver may block up to the configured timeout
                    let cycle = task::spawn_blocking(move || runner.execute(&observation));
                    match cycle.await {
                        Ok(outcome) => {
                            let model = PanelModel::from_outcome(&outcome);
                            let mut guard = state.write().unwrap();
                            *guard = model;
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "green_signal_time": outcome.green_signal_time
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("observe error: {}", err);
                            Err(warp::reject::custom(WarpError))
                        }
                    }
                },
            );

        let override_route = warp::path("override")
            .and(warp::post())
            .and(state_filter)
            .and(runner_filter)
            .map(|state: Arc<RwLock<PanelModel>>, runner: Arc<Runner>| {
                let resulting = runner.overrides().activate();
                let mut guard = state.write().unwrap();
                guard.override_active = true;
                warp::reply::json(&json!({ "state": resulting }))
            });

        thread::spawn(move || {
            let routes = panel_route.or(observe_route).or(override_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(panel_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &PanelModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[PANEL] vehicles: {}, green: {}s, density: {}, source: {}",
            guard.vehicle_count, guard.green_signal_time, guard.density_label, guard.decision_source
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[PANEL] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> PanelModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficcore::api::{DecisionQuery, ServiceDecision};
    use trafficcore::control::OverrideController;
    use trafficcore::journal::DecisionJournal;
    use trafficcore::prelude::{DecisionBackend, DecisionResult, PolicyConfig};

    struct StubBackend;

    impl DecisionBackend for StubBackend {
        fn request(&self, _query: &DecisionQuery) -> DecisionResult<ServiceDecision> {
            Ok(ServiceDecision {
                green_signal_time: 20,
                timestamp: "2024-05-01T09:30:00+00:00".to_string(),
            })
        }
    }

    #[test]
    fn panel_bridge_updates_state() {
        let dir = tempfile::tempdir().unwrap();
        let journal = DecisionJournal::open(dir.path().join("log.csv")).unwrap();
        let runner = Arc::new(Runner::new(
            Box::new(StubBackend),
            OverrideController::new(),
            journal,
            PolicyConfig::default(),
        ));
        let bridge = PanelBridge::new(runner.clone());

        let outcome = runner.execute(&VehicleObservation {
            frame_index: 0,
            vehicle_count: 4,
        });
        bridge.publish(&PanelModel::from_outcome(&outcome)).unwrap();

        let snapshot = bridge.snapshot();
        assert_eq!(snapshot.green_signal_time, 20);
        assert_eq!(snapshot.density_label, "Medium");
        assert_eq!(snapshot.decision_source, "service");
        assert!(!snapshot.override_active);
    }
}
