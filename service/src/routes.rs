use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use trafficcore::api::{DecisionQuery, ServiceDecision};
use trafficcore::policy::DecisionPolicy;
use warp::{http::StatusCode, Filter};

/// Builds the `/process` and `/health` routes over a shared policy.
///
/// Each call is independent; the policy is shared immutably, so concurrent
/// requests need no coordination.
pub fn routes(
    policy: Arc<DecisionPolicy>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let policy_filter = warp::any().map(move || policy.clone());

    let process_route = warp::path("process")
        .and(warp::post())
        .and(warp::body::json())
        .and(policy_filter)
        .map(
            |query: DecisionQuery, policy: Arc<DecisionPolicy>| match query.validated_count() {
                Ok(count) => {
                    let decision = ServiceDecision {
                        green_signal_time: policy.decide(count, query.emergency),
                        timestamp: Utc::now().to_rfc3339(),
                    };
                    warp::reply::with_status(warp::reply::json(&decision), StatusCode::OK)
                }
                Err(err) => warp::reply::with_status(
                    warp::reply::json(&json!({ "error": err.to_string() })),
                    StatusCode::BAD_REQUEST,
                ),
            },
        );

    let health_route = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    process_route.or(health_route)
}
