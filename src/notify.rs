//! Contact-form notification via a Telegram bot.
//!
//! Submissions are forwarded to a bot chat as plain text. Failures are the
//! caller's to log; the submitter never sees them — a lost notification is
//! not worth a broken contact form.

use std::error::Error;
use std::fmt;

use serde::Deserialize;

/// A contact-form submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactMessage {
    /// The text body posted to the chat.
    pub fn render(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nSubject: {}\nMessage: {}",
            self.name, self.email, self.subject, self.message
        )
    }
}

/// A notification that did not go out.
#[derive(Debug)]
pub enum NotifyError {
    Transport(String),
    Status(u16),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Transport(message) => write!(f, "notification not sent: {}", message),
            NotifyError::Status(code) => {
                write!(f, "notification endpoint returned status {}", code)
            }
        }
    }
}

impl Error for NotifyError {}

/// Posts contact submissions to the Telegram `sendMessage` endpoint.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: &str) -> Self {
        TelegramNotifier {
            client: reqwest::Client::new(),
            api_base: "https://api.telegram.org".to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Point the notifier at a different API host. Test seam.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Forward one submission to the bot chat.
    pub async fn send(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let text = message.render();
        let response = self
            .client
            .post(&url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text.as_str())])
            .send()
            .await
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status.as_u16()))
        }
    }
}
