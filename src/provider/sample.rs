//! Built-in sample form, delivered after a simulated fetch delay

use super::traits::{ConfigProvider, ProviderError};
use crate::state::{FieldDescriptor, FormConfig, QuestionGroup};
use async_trait::async_trait;
use std::time::Duration;

/// Serves the sample "about you" form. Never fails.
#[derive(Debug, Clone)]
pub struct SampleProvider {
    delay: Duration,
}

impl SampleProvider {
    /// Default simulated network delay
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The sample configuration itself
    pub fn config() -> FormConfig {
        FormConfig {
            groups: vec![
                QuestionGroup {
                    title: "Tell us about yourself".to_string(),
                    fields: vec![
                        FieldDescriptor::text("first_name", "First Name"),
                        FieldDescriptor::text("last_name", "Last Name"),
                        FieldDescriptor::text("email", "Email"),
                        FieldDescriptor::text("phone_number", "Phone Number"),
                    ],
                },
                QuestionGroup {
                    title: "Where do you live?".to_string(),
                    fields: vec![
                        FieldDescriptor::text("street_address", "Street Address"),
                        FieldDescriptor::text("post_code", "Post Code"),
                        FieldDescriptor::dropdown("country", "Country", &["Canada", "USA"]),
                    ],
                },
            ],
        }
    }
}

impl Default for SampleProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl ConfigProvider for SampleProvider {
    async fn load(&self) -> Result<FormConfig, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::config())
    }
}
