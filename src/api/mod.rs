// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the expenses HTTP API.

pub mod wire;

use crate::calendar::MonthCursor;
use crate::config::Config;
use crate::meals::MealUpdate;
use crate::models::{DashboardData, MealRecord, MealSummary, Transaction, TransactionKind, User};
use crate::utils::http_client;
use chrono::NaiveDate;
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use thiserror::Error;
use wire::NewTransaction;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not logged in or session expired (401). Run `expenses login` again.")]
    Unauthorized,
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Request timed out. Please try again.")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

pub mod paths {
    use crate::models::TransactionKind;

    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const REGISTER: &str = "/api/v1/auth/register";
    pub const GET_USER: &str = "/api/v1/auth/getUser";
    pub const DASHBOARD: &str = "/api/v1/dashboard";
    pub const MEALS: &str = "/api/v1/meals";
    pub const MEAL_SUMMARY: &str = "/api/v1/meals/summary";
    pub const MEAL_UPDATE: &str = "/api/v1/meals/update";
    pub const MEAL_DOWNLOAD: &str = "/api/v1/meals/download";

    pub fn list(kind: TransactionKind) -> String {
        format!("/api/v1/{}/get", kind.as_str())
    }

    pub fn add(kind: TransactionKind) -> String {
        format!("/api/v1/{}/add", kind.as_str())
    }

    pub fn delete(kind: TransactionKind, id: &str) -> String {
        format!("/api/v1/{}/{}", kind.as_str(), id)
    }

    pub fn download(kind: TransactionKind) -> String {
        format!("/api/v1/{}/downloadexcel", kind.as_str())
    }

    pub fn download_filename(kind: TransactionKind) -> String {
        format!("{}_details.xlsx", kind.as_str())
    }
}

pub struct ApiClient {
    http: Client,
    base: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, token: Option<String>) -> ApiResult<Self> {
        let http = http_client(config.timeout).map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base: config.api_url.clone(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.http.request(method.clone(), self.url(path));
        tracing::debug!(%method, path, authed = self.token.is_some(), "api request");
        match &self.token {
            Some(t) => rb.bearer_auth(t),
            None => rb,
        }
    }

    fn send(&self, rb: RequestBuilder) -> ApiResult<Response> {
        let resp = rb.send().map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Network(e.to_string())
            }
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("api answered 401");
            return Err(ApiError::Unauthorized);
        }
        let message = resp
            .json::<wire::ErrorBody>()
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        tracing::warn!(status = status.as_u16(), %message, "api error");
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    fn json(resp: Response) -> ApiResult<Value> {
        // an empty body reads as null
        let text = resp.text().map_err(|e| ApiError::Decode(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn get_json(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Value> {
        let resp = self.send(self.request(Method::GET, path).query(query))?;
        Self::json(resp)
    }

    fn post_json(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let resp = self.send(self.request(Method::POST, path).json(body))?;
        Self::json(resp)
    }

    fn get_bytes(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Vec<u8>> {
        let resp = self.send(self.request(Method::GET, path).query(query))?;
        let bytes = resp.bytes().map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn auth(&self, path: &str, body: Value) -> ApiResult<(String, User)> {
        let value = self.post_json(path, &body)?;
        let resp: wire::AuthResponse =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        let token = resp
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Decode("response carried no token".into()))?;
        let user = resp
            .user
            .and_then(wire::user_from)
            .ok_or_else(|| ApiError::Decode("response carried no user".into()))?;
        Ok((token, user))
    }

    pub fn login(&self, email: &str, password: &str) -> ApiResult<(String, User)> {
        self.auth(
            paths::LOGIN,
            json!({ "email": email, "password": password }),
        )
    }

    pub fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<(String, User)> {
        self.auth(
            paths::REGISTER,
            json!({ "fullName": full_name, "email": email, "password": password }),
        )
    }

    pub fn current_user(&self) -> ApiResult<User> {
        let value = self.get_json(paths::GET_USER, &[])?;
        wire::user_from(value).ok_or_else(|| ApiError::Decode("no user in response".into()))
    }

    pub fn dashboard(&self) -> ApiResult<DashboardData> {
        Ok(wire::dashboard_from(self.get_json(paths::DASHBOARD, &[])?))
    }

    pub fn list_transactions(&self, kind: TransactionKind) -> ApiResult<Vec<Transaction>> {
        let value = self.get_json(&paths::list(kind), &[])?;
        let list = wire::transactions_from(value, kind);
        tracing::debug!(%kind, count = list.len(), "fetched transactions");
        Ok(list)
    }

    pub fn add_transaction(&self, kind: TransactionKind, tx: &NewTransaction) -> ApiResult<()> {
        self.post_json(&paths::add(kind), &tx.to_json(kind))?;
        tracing::info!(%kind, label = %tx.label, amount = %tx.amount, "transaction added");
        Ok(())
    }

    pub fn delete_transaction(&self, kind: TransactionKind, id: &str) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, &paths::delete(kind, id)))?;
        tracing::info!(%kind, id, "transaction deleted");
        Ok(())
    }

    pub fn download_transactions(&self, kind: TransactionKind) -> ApiResult<Vec<u8>> {
        self.get_bytes(&paths::download(kind), &[])
    }

    pub fn meals(&self, cursor: MonthCursor) -> ApiResult<Vec<MealRecord>> {
        let value = self.get_json(paths::MEALS, &month_query(cursor))?;
        Ok(wire::meals_from(value))
    }

    pub fn meal_summary(&self, cursor: MonthCursor) -> ApiResult<Option<MealSummary>> {
        let value = self.get_json(paths::MEAL_SUMMARY, &month_query(cursor))?;
        Ok(wire::meal_summary_from(value))
    }

    pub fn update_meal(&self, date: NaiveDate, update: &MealUpdate) -> ApiResult<()> {
        self.post_json(paths::MEAL_UPDATE, &wire::meal_update_json(date, update))?;
        tracing::info!(%date, field = update.field(), "meal updated");
        Ok(())
    }

    pub fn download_meals(&self, cursor: MonthCursor) -> ApiResult<Vec<u8>> {
        self.get_bytes(paths::MEAL_DOWNLOAD, &month_query(cursor))
    }
}

fn month_query(cursor: MonthCursor) -> [(&'static str, String); 2] {
    [
        ("month", cursor.month().to_string()),
        ("year", cursor.year().to_string()),
    ]
}
