use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::domain::repository::PaymentGateway;
use crate::domain::types::{GatewayVerification, PaymentTokenRequest};
use crate::error::GatewayError;

const APPROVED: &str = "000";
const TRANSPORT_RETRIES: u32 = 2;
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

/// DPO v6 client. All calls POST one XML document to the same endpoint; the
/// `Request` element selects the operation. Outbound concurrency is bounded
/// by a semaphore, and every call carries the client-level timeout.
#[derive(Clone)]
pub struct DpoGateway {
    client: reqwest::Client,
    endpoint: String,
    company_token: String,
    limiter: Arc<Semaphore>,
}

impl DpoGateway {
    pub fn new(
        endpoint: String,
        company_token: String,
        timeout: Duration,
        max_concurrency: usize,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build gateway HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            company_token,
            limiter: Arc::new(Semaphore::new(max_concurrency)),
        })
    }

    fn create_token_xml(&self, request: &PaymentTokenRequest) -> Result<String, GatewayError> {
        let payload = CreateTokenRequestXml {
            company_token: &self.company_token,
            request: "createToken",
            transaction: TransactionXml {
                payment_amount: request.amount,
                payment_currency: request.currency.code(),
                company_ref: request.company_ref.to_string(),
                redirect_url: &request.redirect_url,
                back_url: &request.back_url,
                company_ref_unique: 0,
                ptl: 5,
            },
            services: ServicesXml {
                service: ServiceXml {
                    service_type: 45,
                    service_description: "Payment for Airport Pickup",
                    service_date: Utc::now().format("%Y/%m/%d %H:%M").to_string(),
                },
            },
        };
        quick_xml::se::to_string(&payload)
            .map_err(|e| GatewayError::Malformed(format!("serialize createToken: {e}")))
    }

    fn verify_token_xml(&self, token: &str) -> Result<String, GatewayError> {
        let payload = VerifyTokenRequestXml {
            company_token: &self.company_token,
            request: "verifyToken",
            transaction_token: token,
        };
        quick_xml::se::to_string(&payload)
            .map_err(|e| GatewayError::Malformed(format!("serialize verifyToken: {e}")))
    }

    /// POST one XML document. Transport failures are retried with exponential
    /// backoff; a timeout is surfaced immediately because a timed-out
    /// createToken may have succeeded server-side.
    async fn post_xml(&self, body: String) -> Result<String, GatewayError> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| GatewayError::Transport("gateway limiter closed".to_owned()))?;

        let mut delay = RETRY_BASE_DELAY;
        let mut attempt = 0;
        loop {
            match self.try_post(&body).await {
                Err(GatewayError::Transport(reason)) if attempt < TRANSPORT_RETRIES => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %reason, "gateway transport failure, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                other => return other,
            }
        }
    }

    async fn try_post(&self, body: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/xml")
            .body(body.to_owned())
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Transport(format!("gateway returned {status}")));
        }
        response.text().await.map_err(request_error)
    }
}

impl PaymentGateway for DpoGateway {
    async fn create_token(&self, request: &PaymentTokenRequest) -> Result<String, GatewayError> {
        let body = self.create_token_xml(request)?;
        let response = self.post_xml(body).await?;
        parse_create_token_response(&response)
    }

    async fn verify_token(&self, token: &str) -> Result<GatewayVerification, GatewayError> {
        let body = self.verify_token_xml(token)?;
        let response = self.post_xml(body).await?;
        parse_verify_token_response(&response)
    }
}

fn request_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}

fn parse_create_token_response(xml: &str) -> Result<String, GatewayError> {
    let response: CreateTokenResponseXml = quick_xml::de::from_str(xml)
        .map_err(|e| GatewayError::Malformed(format!("parse createToken response: {e}")))?;
    if response.result != APPROVED {
        return Err(GatewayError::Rejected {
            code: response.result,
            explanation: response.result_explanation.unwrap_or_default(),
        });
    }
    response.trans_token.ok_or(GatewayError::MissingToken)
}

/// Any result code is a valid verification outcome; only an unreadable
/// response is an error here.
fn parse_verify_token_response(xml: &str) -> Result<GatewayVerification, GatewayError> {
    let response: VerifyTokenResponseXml = quick_xml::de::from_str(xml)
        .map_err(|e| GatewayError::Malformed(format!("parse verifyToken response: {e}")))?;
    Ok(GatewayVerification {
        result_code: response.result,
        explanation: response.result_explanation,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename = "API3G")]
struct CreateTokenRequestXml<'a> {
    #[serde(rename = "CompanyToken")]
    company_token: &'a str,
    #[serde(rename = "Request")]
    request: &'static str,
    #[serde(rename = "Transaction")]
    transaction: TransactionXml<'a>,
    #[serde(rename = "Services")]
    services: ServicesXml,
}

#[derive(Debug, Serialize)]
struct TransactionXml<'a> {
    #[serde(rename = "PaymentAmount")]
    payment_amount: f64,
    #[serde(rename = "PaymentCurrency")]
    payment_currency: &'a str,
    #[serde(rename = "CompanyRef")]
    company_ref: String,
    #[serde(rename = "RedirectURL")]
    redirect_url: &'a str,
    #[serde(rename = "BackURL")]
    back_url: &'a str,
    #[serde(rename = "CompanyRefUnique")]
    company_ref_unique: u8,
    #[serde(rename = "PTL")]
    ptl: u8,
}

#[derive(Debug, Serialize)]
struct ServicesXml {
    #[serde(rename = "Service")]
    service: ServiceXml,
}

#[derive(Debug, Serialize)]
struct ServiceXml {
    #[serde(rename = "ServiceType")]
    service_type: u32,
    #[serde(rename = "ServiceDescription")]
    service_description: &'static str,
    #[serde(rename = "ServiceDate")]
    service_date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename = "API3G")]
struct VerifyTokenRequestXml<'a> {
    #[serde(rename = "CompanyToken")]
    company_token: &'a str,
    #[serde(rename = "Request")]
    request: &'static str,
    #[serde(rename = "TransactionToken")]
    transaction_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTokenResponseXml {
    #[serde(rename = "Result")]
    result: String,
    #[serde(rename = "ResultExplanation", default)]
    result_explanation: Option<String>,
    #[serde(rename = "TransToken", default)]
    trans_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyTokenResponseXml {
    #[serde(rename = "Result")]
    result: String,
    #[serde(rename = "ResultExplanation", default)]
    result_explanation: Option<String>,
}
