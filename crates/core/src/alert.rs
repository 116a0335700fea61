use serde::{Deserialize, Serialize};

/// Server-assigned alert identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub u64);

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AlertId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An alert rule evaluated by the service against incoming metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlertId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Data bucket token the alert watches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Kind of data the alert watches, e.g. `metric`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts_type: Option<String>,
    /// Condition such as `cpu.value > 20`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    /// Comma separated notification addresses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emails: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Evaluation period in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
}

impl Alert {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            alert_name: Some(name.into()),
            alert_expression: Some(expression.into()),
            ..Default::default()
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn alerts_type(mut self, alerts_type: impl Into<String>) -> Self {
        self.alerts_type = Some(alerts_type.into());
        self
    }

    pub fn severity(mut self, severity: impl Into<String>) -> Self {
        self.alert_severity = Some(severity.into());
        self
    }

    pub fn metric_name(mut self, metric_name: impl Into<String>) -> Self {
        self.metric_name = Some(metric_name.into());
        self
    }

    pub fn emails(mut self, emails: impl Into<String>) -> Self {
        self.emails = Some(emails.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn frequency(mut self, seconds: f64) -> Self {
        self.frequency = Some(seconds);
        self
    }

    /// Whether the fields the service requires to create a rule are set.
    pub fn is_complete(&self) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.alert_name) && present(&self.alert_expression)
    }

    /// Form fields for create and update requests. Unset and empty fields
    /// are left out; the id travels in the URL.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("alert_name", &self.alert_name),
            ("username", &self.username),
            ("token", &self.token),
            ("alerts_type", &self.alerts_type),
            ("alert_expression", &self.alert_expression),
            ("alert_severity", &self.alert_severity),
            ("metric_name", &self.metric_name),
            ("emails", &self.emails),
            ("status", &self.status),
        ];

        let mut form: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect();

        if let Some(frequency) = self.frequency {
            form.push(("frequency", frequency.to_string()));
        }
        form
    }
}
