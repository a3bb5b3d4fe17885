use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    account, auth, branch, encounter, health, lab_test, medication, patient, provider, referral,
};
use crate::auth::middleware::{require_auth, role_guard};
use crate::models::Role;
use crate::state::AppState;

const PROVIDER_ONLY: &[Role] = &[Role::Provider];
const PATIENT_ONLY: &[Role] = &[Role::Patient];
const CLINICAL: &[Role] = &[Role::Provider, Role::Patient];
const CLINICAL_ADMIN: &[Role] = &[Role::Provider, Role::Patient, Role::Admin];
const PROVIDER_ADMIN: &[Role] = &[Role::Provider, Role::Admin];
const PROVIDER_STAFF: &[Role] = &[Role::Provider, Role::Admin, Role::SuperAdmin];
const ADMINS: &[Role] = &[Role::Admin, Role::SuperAdmin];

/// The full application router: every resource under `/api/v1`, plus the
/// health probe.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1/auth", auth_routes(state.clone()))
        .nest("/api/v1/accounts", account_routes(state.clone()))
        .nest("/api/v1/providers", provider_routes(state.clone()))
        .nest("/api/v1/branches", branch_routes(state.clone()))
        .nest("/api/v1/patients", patient_routes(state.clone()))
        .nest("/api/v1/encounters", encounter_routes(state.clone()))
        .nest("/api/v1/medications", medication_routes(state.clone()))
        .nest("/api/v1/tests", lab_test_routes(state.clone()))
        .nest("/api/v1/referrals", referral_routes(state.clone()))
        .route("/health-check", get(health::health_check).with_state(state))
}

fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/verify-email", post(auth::verify_email))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/resend-otp", post(auth::resend_otp))
        .route(
            "/change-password",
            post(auth::change_password)
                .layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        )
        .with_state(state)
}

fn account_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(account::list_accounts))
        .route("/me", get(account::get_me))
        .route("/:id", get(account::get_account))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn provider_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/me",
            get(provider::get_profile)
                .patch(provider::update_profile)
                .delete(provider::delete_my_profile)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ONLY)
                })),
        )
        .route(
            "/me/toggle-availability",
            patch(provider::toggle_availability)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ONLY)
                })),
        )
        .route("/", get(provider::list_providers))
        .route("/metrics", get(provider::fleet_metrics))
        .route("/:id", get(provider::get_provider))
        .route(
            "/:id",
            delete(provider::delete_provider)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, ADMINS)
                })),
        )
        .route("/:id/metrics", get(provider::provider_metric))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn branch_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(branch::create_branch)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ONLY)
                })),
        )
        .route("/", get(branch::list_branches))
        .route("/metrics", get(branch::branch_metrics))
        .route("/metrics/:provider_id", get(branch::provider_branch_metrics))
        .route("/:id", get(branch::get_branch))
        .route(
            "/:id",
            patch(branch::update_branch)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ONLY)
                })),
        )
        .route(
            "/:id",
            delete(branch::delete_branch)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_STAFF)
                })),
        )
        .route(
            "/:id/toggle-availability",
            patch(branch::toggle_availability)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_STAFF)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn patient_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/me",
            get(patient::get_profile)
                .patch(patient::update_profile)
                .delete(patient::delete_my_profile)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PATIENT_ONLY)
                })),
        )
        .route("/", get(patient::list_patients))
        .route("/:id", get(patient::get_patient))
        .route(
            "/:id",
            delete(patient::delete_patient)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, ADMINS)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn encounter_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(encounter::create_encounter).get(encounter::list_encounters),
        )
        .route("/metrics", get(encounter::encounter_metrics))
        .route("/:id", get(encounter::get_encounter))
        .route(
            "/:id",
            patch(encounter::update_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, CLINICAL)
                })),
        )
        .route(
            "/:id",
            delete(encounter::delete_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_STAFF)
                })),
        )
        .route(
            "/:id/start",
            patch(encounter::start_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, CLINICAL)
                })),
        )
        .route(
            "/:id/complete",
            patch(encounter::complete_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, CLINICAL)
                })),
        )
        .route(
            "/:id/cancel",
            patch(encounter::cancel_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, CLINICAL_ADMIN)
                })),
        )
        .route(
            "/:id/reschedule",
            patch(encounter::reschedule_encounter)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, CLINICAL)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn medication_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(medication::create_medication)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/", get(medication::list_medications))
        .route(
            "/metrics",
            get(medication::medication_metrics)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/:id", get(medication::get_medication))
        .route(
            "/:id",
            patch(medication::update_medication)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route(
            "/:id",
            delete(medication::delete_medication)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_STAFF)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn lab_test_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(lab_test::create_lab_test)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/", get(lab_test::list_lab_tests))
        .route(
            "/metrics",
            get(lab_test::lab_test_metrics)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/:id", get(lab_test::get_lab_test))
        .route(
            "/:id",
            patch(lab_test::update_lab_test)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route(
            "/:id",
            delete(lab_test::delete_lab_test)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_STAFF)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

fn referral_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(referral::create_referral)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/", get(referral::list_referrals))
        .route(
            "/metrics",
            get(referral::referral_metrics)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route("/:id", get(referral::get_referral))
        .route(
            "/:id",
            patch(referral::update_referral)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route(
            "/:id",
            delete(referral::delete_referral)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route(
            "/:id/approve",
            patch(referral::approve_referral)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route(
            "/:id/reject",
            patch(referral::reject_referral)
                .layer(middleware::from_fn(|req: Request, next: Next| {
                    role_guard(req, next, PROVIDER_ADMIN)
                })),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}
