use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::{CurrentAccount, TokenPair};
use crate::error::Result;
use crate::models::Account;
use crate::response::ApiResponse;
use crate::services::auth::{
    ChangePassword, ForgotPassword, Login, LoginResponse, RefreshToken, RegisterAccount,
    ResendOtp, ResetPassword, VerifyEmail,
};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAccount>,
) -> Result<ApiResponse<Account>> {
    payload.validate()?;
    let account = state.auth_service.register(payload).await?;
    Ok(ApiResponse::created(
        "Successfully created account. Check your email for the verification code.",
        account,
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Login>,
) -> Result<ApiResponse<LoginResponse>> {
    payload.validate()?;
    let login = state.auth_service.login(payload).await?;
    Ok(ApiResponse::ok("Successfully logged in", login))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshToken>,
) -> Result<ApiResponse<TokenPair>> {
    let tokens = state.auth_service.refresh(payload).await?;
    Ok(ApiResponse::ok("Token refreshed", tokens))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmail>,
) -> Result<ApiResponse<bool>> {
    payload.validate()?;
    let verified = state.auth_service.verify_email(payload).await?;
    Ok(ApiResponse::ok("Successfully verified account", verified))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPassword>,
) -> Result<ApiResponse<bool>> {
    payload.validate()?;
    let sent = state.auth_service.forgot_password(payload).await?;
    Ok(ApiResponse::ok("Password reset code sent successfully", sent))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPassword>,
) -> Result<ApiResponse<bool>> {
    payload.validate()?;
    let updated = state.auth_service.reset_password(payload).await?;
    Ok(ApiResponse::ok("Password updated successfully", updated))
}

pub async fn change_password(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(payload): Json<ChangePassword>,
) -> Result<ApiResponse<bool>> {
    payload.validate()?;
    let updated = state
        .auth_service
        .change_password(&account, payload)
        .await?;
    Ok(ApiResponse::ok("Password updated successfully", updated))
}

pub async fn resend_otp(
    State(state): State<AppState>,
    Json(payload): Json<ResendOtp>,
) -> Result<ApiResponse<bool>> {
    payload.validate()?;
    let sent = state.auth_service.resend_otp(payload).await?;
    Ok(ApiResponse::ok("OTP resent successfully", sent))
}
