use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::Messaging;
use crate::lifecycle::MountFlag;

pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const ENV_SERVICE_ID: &str = "EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "EMAILJS_PUBLIC_KEY";
pub const ENV_ENDPOINT: &str = "EMAILJS_ENDPOINT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    #[error("missing {0}")]
    Validation(Field),
    #[error("email relay not configured: {0} is unset")]
    NotConfigured(&'static str),
    #[error("couldn't reach email relay: {0}")]
    Transport(String),
    #[error("email relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl ContactError {
    pub fn user_message(&self) -> String {
        match self {
            ContactError::Validation(field) => format!("Please fill in your {field}."),
            _ => "Failed to send message. Please try again.".to_string(),
        }
    }
}

/// What the visitor has typed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whitespace-only counts as empty. Reports the first missing field.
    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| self.get(*f).trim().is_empty())
        {
            return Err(ContactError::Validation(field));
        }
        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// A validated message, ready to hand to a delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<ContactMessage> for ContactFormState {
    fn from(message: ContactMessage) -> Self {
        Self {
            name: message.name,
            email: message.email,
            message: message.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ContactError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ContactError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ContactError::NotConfigured(key))
        };
        Ok(Self {
            service_id: required(ENV_SERVICE_ID)?,
            template_id: required(ENV_TEMPLATE_ID)?,
            public_key: required(ENV_PUBLIC_KEY)?,
            endpoint: lookup(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_RELAY_ENDPOINT.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub name: String,
    pub email: String,
    pub message: String,
    pub title: String,
}

/// Body of an email relay send call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl RelayRequest {
    pub fn new(config: &RelayConfig, message: &ContactMessage, subject_prefix: &str) -> Self {
        Self {
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            user_id: config.public_key.clone(),
            template_params: TemplateParams {
                name: message.name.clone(),
                email: message.email.clone(),
                message: message.message.clone(),
                title: format!("{} {}", subject_prefix, message.name),
            },
        }
    }
}

/// Delivers relay requests. The real one speaks HTTP; tests count calls.
pub trait EmailRelay {
    fn send(
        &self,
        endpoint: &str,
        request: &RelayRequest,
    ) -> impl Future<Output = Result<(), ContactError>> + Send;
}

/// Validates and relays a message. Nothing is sent when validation or
/// configuration fails.
pub async fn deliver<R: EmailRelay>(
    relay: &R,
    config: Result<RelayConfig, ContactError>,
    form: &ContactFormState,
    subject_prefix: &str,
) -> Result<(), ContactError> {
    let message = form.validate()?;
    let config = config?;
    let request = RelayRequest::new(&config, &message, subject_prefix);
    relay.send(&config.endpoint, &request).await
}

/// Browser-side submit: validate, hand off, and clear the form on success.
/// The form is left untouched on any failure so the visitor can retry.
pub async fn submit<S, Fut>(form: &mut ContactFormState, send: S) -> Result<(), ContactError>
where
    S: FnOnce(ContactMessage) -> Fut,
    Fut: Future<Output = Result<(), ContactError>>,
{
    let message = form.validate()?;
    send(message).await?;
    form.clear();
    Ok(())
}

/// Submits a snapshot of the form on behalf of a mounted component. `apply`
/// receives the resulting form and outcome, and is skipped when the component
/// unmounted while the send was in flight. Returns whether it ran.
pub async fn submit_while_mounted<S, Fut, A>(
    mut draft: ContactFormState,
    mounted: &MountFlag,
    send: S,
    apply: A,
) -> bool
where
    S: FnOnce(ContactMessage) -> Fut,
    Fut: Future<Output = Result<(), ContactError>>,
    A: FnOnce(ContactFormState, Result<(), ContactError>),
{
    let res = submit(&mut draft, send).await;
    mounted.run_if_alive(|| apply(draft, res)).is_some()
}

/// `https://<domain>/<recipient>?text=<urlencoded>`
pub fn messaging_link(messaging: &Messaging, text: Option<&str>) -> String {
    let text = text.unwrap_or(&messaging.default_text);
    format!(
        "https://{}/{}?text={}",
        messaging.domain,
        messaging.recipient,
        urlencoding::encode(text)
    )
}

/// Mail-client fallback carrying the same content as a relay send.
pub fn mailto_link(address: &str, subject_prefix: &str, message: &ContactMessage) -> String {
    let subject = format!("{} {}", subject_prefix, message.name);
    let body = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        message.name, message.email, message.message
    );
    format!(
        "mailto:{}?subject={}&body={}",
        address,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ToastKind, Toaster};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    #[derive(Default)]
    struct CountingRelay {
        calls: AtomicUsize,
        last: Mutex<Option<(String, RelayRequest)>>,
        fail_with: Option<ContactError>,
    }

    impl EmailRelay for CountingRelay {
        async fn send(&self, endpoint: &str, request: &RelayRequest) -> Result<(), ContactError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some((endpoint.to_string(), request.clone()));
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    fn config() -> RelayConfig {
        RelayConfig::from_lookup(|key| match key {
            ENV_SERVICE_ID => Some("service_1".to_string()),
            ENV_TEMPLATE_ID => Some("template_1".to_string()),
            ENV_PUBLIC_KEY => Some("pk_1".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn filled() -> ContactFormState {
        ContactFormState {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello there".to_string(),
        }
    }

    #[test]
    fn test_validation_reports_first_missing_field() {
        let mut form = filled();
        form.email = "   ".to_string();
        assert_eq!(form.validate(), Err(ContactError::Validation(Field::Email)));
        form.name.clear();
        assert_eq!(form.validate(), Err(ContactError::Validation(Field::Name)));
        assert_eq!(
            ContactError::Validation(Field::Email).user_message(),
            "Please fill in your email."
        );
    }

    #[test]
    fn test_validation_trims() {
        let mut form = filled();
        form.name = "  Ada \n".to_string();
        assert_eq!(form.validate().unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_empty_email_never_reaches_relay() {
        let relay = CountingRelay::default();
        let mut form = filled();
        form.email.clear();
        let res = deliver(&relay, Ok(config()), &form, "Portfolio Contact from").await;
        assert_eq!(res, Err(ContactError::Validation(Field::Email)));
        assert_eq!(relay.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_deliver_builds_relay_request() {
        let relay = CountingRelay::default();
        deliver(&relay, Ok(config()), &filled(), "Portfolio Contact from")
            .await
            .unwrap();
        assert_eq!(relay.calls.load(Ordering::SeqCst), 1);
        let (endpoint, request) = relay.last.lock().unwrap().clone().unwrap();
        assert_eq!(endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(request.user_id, "pk_1");
        assert_eq!(request.template_params.title, "Portfolio Contact from Ada");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["service_id"], "service_1");
        assert_eq!(json["template_params"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_unconfigured_relay_is_not_called() {
        let relay = CountingRelay::default();
        let config = RelayConfig::from_lookup(|_| None);
        assert_eq!(config, Err(ContactError::NotConfigured(ENV_SERVICE_ID)));
        let res = deliver(&relay, config, &filled(), "x").await;
        assert!(matches!(res, Err(ContactError::NotConfigured(_))));
        assert_eq!(relay.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submit_clears_form_on_success() {
        let mut form = filled();
        let sent = Mutex::new(Vec::new());
        let res = submit(&mut form, |msg| {
            sent.lock().unwrap().push(msg);
            async { Ok(()) }
        })
        .await;
        assert_eq!(res, Ok(()));
        assert_eq!(form, ContactFormState::default());
        assert_eq!(sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_keeps_form_on_failure() {
        let mut form = filled();
        let res = submit(&mut form, |_| async {
            Err(ContactError::Transport("offline".to_string()))
        })
        .await;
        assert!(matches!(res, Err(ContactError::Transport(_))));
        assert_eq!(form, filled());
        assert_eq!(
            res.unwrap_err().user_message(),
            "Failed to send message. Please try again."
        );
    }

    #[tokio::test]
    async fn test_submit_empty_email_skips_send() {
        let mut form = filled();
        form.email.clear();
        let mut calls = 0;
        let res = submit(&mut form, |_| {
            calls += 1;
            async { Ok(()) }
        })
        .await;
        assert_eq!(res, Err(ContactError::Validation(Field::Email)));
        assert_eq!(calls, 0);
        assert_eq!(form.name, "Ada");
    }

    #[tokio::test]
    async fn test_send_resolving_after_unmount_writes_nothing() {
        let mut form = filled();
        let mut toaster = Toaster::default();
        let id = toaster.pending("Sending message...");
        let mounted = MountFlag::new();

        let applied = submit_while_mounted(
            form.clone(),
            &mounted,
            |_| {
                // the section goes away while the request is in flight
                mounted.release();
                async { Ok(()) }
            },
            |draft, res| {
                form = draft;
                if res.is_ok() {
                    toaster.succeed(id, "Message sent successfully!");
                }
            },
        )
        .await;

        assert!(!applied);
        assert_eq!(form, filled());
        assert_eq!(toaster.toasts()[0].kind, ToastKind::Pending);
    }

    #[tokio::test]
    async fn test_send_while_mounted_clears_form() {
        let mut form = filled();
        let mut toaster = Toaster::default();
        let id = toaster.pending("Sending message...");
        let mounted = MountFlag::new();

        let applied = submit_while_mounted(
            form.clone(),
            &mounted,
            |_| async { Ok(()) },
            |draft, res| {
                form = draft;
                assert_eq!(res, Ok(()));
                toaster.succeed(id, "Message sent successfully!");
            },
        )
        .await;

        assert!(applied);
        assert_eq!(form, ContactFormState::default());
        assert_eq!(toaster.toasts()[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_messaging_link() {
        let messaging = Messaging {
            domain: "wa.me".to_string(),
            recipient: "923000000000".to_string(),
            default_text: "Hi! I'm interested".to_string(),
        };
        assert_eq!(
            messaging_link(&messaging, None),
            "https://wa.me/923000000000?text=Hi%21%20I%27m%20interested"
        );
        assert_eq!(
            messaging_link(&messaging, Some("a&b")),
            "https://wa.me/923000000000?text=a%26b"
        );
    }

    #[test]
    fn test_mailto_link() {
        let message = filled().validate().unwrap();
        let link = mailto_link("me@example.com", "Portfolio Contact from", &message);
        assert!(link.starts_with("mailto:me@example.com?subject=Portfolio%20Contact%20from%20Ada&body="));
        assert!(link.contains("Name%3A%20Ada%0AEmail%3A%20ada%40example.com"));
    }

    #[test]
    fn test_endpoint_override() {
        let config = RelayConfig::from_lookup(|key| Some(format!("value-{key}"))).unwrap();
        assert_eq!(config.endpoint, format!("value-{ENV_ENDPOINT}"));
    }
}
