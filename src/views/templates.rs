//! Template library view state.

use std::sync::Arc;

use serde_json::json;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::models::{OutputKind, Template, TemplateCreate, TemplateUpdate};

use super::ValidationError;

pub struct TemplatesView {
    client: Arc<ApiClient>,
    pub templates: Vec<Template>,
    /// `None` lists every kind.
    pub kind_filter: Option<OutputKind>,
    pub selected_template_id: Option<i64>,
}

impl TemplatesView {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            templates: Vec::new(),
            kind_filter: None,
            selected_template_id: None,
        }
    }

    /// Reload the list for the current kind filter, then reconcile the
    /// selection: keep it while the template still exists, otherwise fall
    /// back to the first row (or nothing).
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.templates = self.client.templates(self.kind_filter).await?;

        self.selected_template_id = match self.selected_template_id {
            _ if self.templates.is_empty() => None,
            Some(id) if self.templates.iter().any(|template| template.id == id) => Some(id),
            _ => self.templates.first().map(|template| template.id),
        };
        Ok(())
    }

    pub fn selected_template(&self) -> Option<&Template> {
        let id = self.selected_template_id?;
        self.templates.iter().find(|template| template.id == id)
    }

    pub async fn create(&mut self, request: &TemplateCreate) -> Result<(), ClientError> {
        self.client.create_template(request).await?;
        self.refresh().await
    }

    pub async fn save(&mut self, id: i64, request: &TemplateUpdate) -> Result<(), ClientError> {
        self.client.update_template(id, request).await?;
        self.refresh().await
    }

    pub async fn remove(&mut self, id: i64) -> Result<(), ClientError> {
        self.client.delete_template(id).await?;
        self.refresh().await
    }
}

/// Build a create request: name and content are both required.
pub fn create_request(
    name: &str,
    kind: OutputKind,
    content: &str,
) -> Result<TemplateCreate, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::TemplateNameRequired);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::TemplateContentRequired);
    }
    Ok(TemplateCreate {
        name: name.to_string(),
        kind,
        content: content.to_string(),
        meta: json!({}),
    })
}

/// Build an update request: name and content are both required.
pub fn update_request(
    name: &str,
    kind: OutputKind,
    content: &str,
) -> Result<TemplateUpdate, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::TemplateNameRequired);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::TemplateContentRequired);
    }
    Ok(TemplateUpdate {
        name: Some(name.to_string()),
        kind: Some(kind),
        content: Some(content.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_name_and_content() {
        assert_eq!(
            create_request(" ", OutputKind::Tweet, "body"),
            Err(ValidationError::TemplateNameRequired)
        );
        assert_eq!(
            create_request("Hooks", OutputKind::Tweet, "  "),
            Err(ValidationError::TemplateContentRequired)
        );

        let request = create_request(" Hooks ", OutputKind::Tweet, " Write a tweet. ").unwrap();
        assert_eq!(request.name, "Hooks");
        assert_eq!(request.content, "Write a tweet.");
        assert_eq!(request.meta, json!({}));
    }

    #[test]
    fn update_requires_name_and_content() {
        assert!(update_request("Hooks", OutputKind::Blog, "body").is_ok());
        assert_eq!(
            update_request("", OutputKind::Blog, "body"),
            Err(ValidationError::TemplateNameRequired)
        );
    }
}
