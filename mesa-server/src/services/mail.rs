//! 邮件中继服务
//!
//! 通过 HTTP 中继发送事务性邮件（下单确认）。未配置
//! `MAIL_RELAY_URL` 时降级为日志输出；发送失败只记日志，
//! 从不影响订单流程。

use serde::Serialize;
use std::time::Duration;

use crate::utils::{AppError, AppResult, ErrorCode};

const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    to: &'a str,
    subject: String,
    body: String,
}

#[derive(Debug, Clone)]
pub struct MailService {
    client: reqwest::Client,
    relay_url: Option<String>,
}

impl MailService {
    pub fn new(relay_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, relay_url }
    }

    /// 下单确认邮件
    pub async fn send_order_confirmation(
        &self,
        recipient: &str,
        order_number: &str,
        total: f64,
    ) -> AppResult<()> {
        let payload = MailPayload {
            to: recipient,
            subject: format!("Order {order_number} confirmed"),
            body: format!(
                "Thanks for your order!\n\nOrder number: {order_number}\nTotal: {total:.2}\n\nWe'll let you know when it's on its way."
            ),
        };
        self.send(&payload).await
    }

    async fn send(&self, payload: &MailPayload<'_>) -> AppResult<()> {
        let Some(url) = &self.relay_url else {
            tracing::info!(to = payload.to, subject = %payload.subject, "Mail relay disabled, logging only");
            return Ok(());
        };

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::with_message(ErrorCode::MailRelayError, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::with_message(
                ErrorCode::MailRelayError,
                format!("Mail relay returned {}", response.status()),
            ));
        }

        tracing::debug!(to = payload.to, "Mail dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_relay_is_ok() {
        let mail = MailService::new(None);
        assert!(
            mail.send_order_confirmation("ana", "MS-1", 12.5)
                .await
                .is_ok()
        );
    }
}
