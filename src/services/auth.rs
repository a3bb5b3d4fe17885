use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{hash_password, verify_password, Jwt, TokenPair};
use crate::error::{ApiError, Result};
use crate::mail::{MailMessage, Mailer};
use crate::models::{Account, Role};
use crate::repository::AccountRepository;
use crate::util::generate_otp;

const OTP_EXPIRY_HOURS: i64 = 24;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAccount {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, Validate)]
pub struct Login {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPassword {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPassword {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePassword {
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmail {
    #[validate(length(min = 1))]
    pub otp: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendOtp {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshToken {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub account: Account,
    pub tokens: TokenPair,
}

pub struct AuthService {
    accounts: Arc<AccountRepository>,
    jwt: Arc<Jwt>,
    mailer: Arc<Mailer>,
}

impl AuthService {
    pub fn new(accounts: Arc<AccountRepository>, jwt: Arc<Jwt>, mailer: Arc<Mailer>) -> Self {
        Self {
            accounts,
            jwt,
            mailer,
        }
    }

    fn otp_expiry() -> chrono::DateTime<Utc> {
        Utc::now() + Duration::hours(OTP_EXPIRY_HOURS)
    }

    pub async fn register(&self, payload: RegisterAccount) -> Result<Account> {
        if !matches!(payload.role, Role::Patient | Role::Provider) {
            return Err(ApiError::validation("Role must be Patient or Provider"));
        }

        if self.accounts.find_by_email(&payload.email).await?.is_some() {
            return Err(ApiError::validation(format!(
                "Account with email {} already exists",
                payload.email
            )));
        }

        let hashed = hash_password(&payload.password)?;
        let otp = generate_otp();

        let account = self
            .accounts
            .create(
                &payload.email,
                &hashed,
                payload.role,
                &otp,
                Self::otp_expiry(),
            )
            .await?;

        tracing::info!(account_id = %account.id, "registered new account");

        self.mailer
            .send(MailMessage {
                to: account.email.clone(),
                subject: "Verify Your Email".to_string(),
                text: Some(format!(
                    "Your OTP code is {}. It expires in {} hours.",
                    otp, OTP_EXPIRY_HOURS
                )),
                html: None,
                cc: None,
            })
            .await?;

        Ok(account)
    }

    pub async fn verify_email(&self, payload: VerifyEmail) -> Result<bool> {
        let account = self
            .accounts
            .find_by_otp(&payload.otp)
            .await?
            .ok_or_else(|| ApiError::validation("Invalid OTP"))?;

        let expired = account
            .otp_expires_at
            .map(|at| at < Utc::now())
            .unwrap_or(true);
        if expired {
            return Err(ApiError::validation("OTP expired. Please request another."));
        }

        self.accounts.mark_email_verified(&account.email).await?;
        self.mailer.send_detached(MailMessage {
            to: account.email,
            subject: "Email Verified".to_string(),
            text: Some(
                "Your email has been successfully verified. You can now log in.".to_string(),
            ),
            html: None,
            cc: None,
        });

        Ok(true)
    }

    pub async fn login(&self, payload: Login) -> Result<LoginResponse> {
        let account = self
            .accounts
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| ApiError::validation("Invalid email or password"))?;

        if !verify_password(&payload.password, &account.password) {
            return Err(ApiError::validation("Invalid email or password"));
        }

        let account = self.accounts.touch_last_login(account.id).await?;
        let tokens = self.jwt.issue_pair(&account)?;

        Ok(LoginResponse { account, tokens })
    }

    pub async fn refresh(&self, payload: RefreshToken) -> Result<TokenPair> {
        let access_token = self.jwt.refresh_access(&payload.refresh_token)?;
        Ok(TokenPair {
            access_token,
            refresh_token: payload.refresh_token,
        })
    }

    pub async fn forgot_password(&self, payload: ForgotPassword) -> Result<bool> {
        let account = self
            .accounts
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| ApiError::validation("No account found with this email"))?;

        let otp = generate_otp();
        self.accounts
            .set_otp(&account.email, &otp, Self::otp_expiry())
            .await?;

        self.mailer
            .send(MailMessage {
                to: account.email,
                subject: "Password Reset Code".to_string(),
                text: Some(format!(
                    "Your password reset code is {}. It expires in {} hours.",
                    otp, OTP_EXPIRY_HOURS
                )),
                html: None,
                cc: None,
            })
            .await?;

        Ok(true)
    }

    pub async fn reset_password(&self, payload: ResetPassword) -> Result<bool> {
        let account = self
            .accounts
            .find_by_otp(&payload.token)
            .await?
            .ok_or_else(|| ApiError::validation("Account not found"))?;

        let hashed = hash_password(&payload.new_password)?;
        self.accounts.set_password(&account.email, &hashed).await?;

        self.mailer.send_detached(MailMessage {
            to: account.email,
            subject: "Password Changed".to_string(),
            text: Some(
                "Your password was successfully changed. If this wasn't you, please contact \
                 support immediately."
                    .to_string(),
            ),
            html: None,
            cc: None,
        });

        Ok(true)
    }

    pub async fn change_password(&self, account: &Account, payload: ChangePassword) -> Result<bool> {
        if !verify_password(&payload.password, &account.password) {
            return Err(ApiError::validation("Invalid old password"));
        }

        let hashed = hash_password(&payload.new_password)?;
        self.accounts.set_password(&account.email, &hashed).await?;

        self.mailer.send_detached(MailMessage {
            to: account.email.clone(),
            subject: "Password Changed".to_string(),
            text: Some(
                "Your password was successfully changed. If this wasn't you, please reset it \
                 immediately."
                    .to_string(),
            ),
            html: None,
            cc: None,
        });

        Ok(true)
    }

    pub async fn resend_otp(&self, payload: ResendOtp) -> Result<bool> {
        let account = self
            .accounts
            .find_by_email(&payload.email)
            .await?
            .ok_or_else(|| ApiError::validation("No account found with this email"))?;

        let otp = generate_otp();
        self.accounts
            .set_otp(&account.email, &otp, Self::otp_expiry())
            .await?;

        self.mailer
            .send(MailMessage {
                to: account.email,
                subject: "New OTP Code".to_string(),
                text: Some(format!(
                    "Your new OTP is {}. It expires in {} hours.",
                    otp, OTP_EXPIRY_HOURS
                )),
                html: None,
                cc: None,
            })
            .await?;

        Ok(true)
    }
}
