use serde::{Deserialize, Deserializer, Serialize};

/// Waiting time applied when a checkpoint record carries none (or null).
pub const DEFAULT_WAIT_MINUTES: u32 = 15;

/// A physical scan point ("QR") belonging to one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(alias = "qr_id")]
    pub checkpoint_id: i64, // ⇔ qr.qr_id
    #[serde(alias = "qr_name")]
    pub display_name: String, // ⇔ qr.qr_name
    #[serde(alias = "factory_code")]
    pub site_id: String, // ⇔ qr.factory_code
    #[serde(
        alias = "waiting_time",
        default = "default_wait_minutes",
        deserialize_with = "wait_or_default"
    )]
    pub default_wait_minutes: u32, // ⇔ qr.waiting_time (NULL → 15)
}

/// Checkpoint payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheckpoint {
    #[serde(alias = "qr_name")]
    pub display_name: String,
    #[serde(alias = "factory_code")]
    pub site_id: String,
    #[serde(
        alias = "waiting_time",
        default = "default_wait_minutes",
        deserialize_with = "wait_or_default"
    )]
    pub default_wait_minutes: u32,
}

impl NewCheckpoint {
    pub fn new(display_name: &str, site_id: &str, wait: Option<u32>) -> Self {
        Self {
            display_name: display_name.to_string(),
            site_id: site_id.to_string(),
            default_wait_minutes: wait.unwrap_or(DEFAULT_WAIT_MINUTES),
        }
    }
}

/// Partial update. `default_wait_minutes: Some(None)` resets the wait to the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointUpdate {
    pub display_name: Option<String>,
    pub site_id: Option<String>,
    pub default_wait_minutes: Option<Option<u32>>,
}

impl CheckpointUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.site_id.is_none() && self.default_wait_minutes.is_none()
    }

    pub(crate) fn resolved_wait(&self) -> Option<u32> {
        self.default_wait_minutes
            .map(|w| w.unwrap_or(DEFAULT_WAIT_MINUTES))
    }
}

fn default_wait_minutes() -> u32 {
    DEFAULT_WAIT_MINUTES
}

fn wait_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_WAIT_MINUTES))
}
