use super::backend::StorageBackend;
use super::{ContextStore, ContextsSettings};
use crate::error::{ContextsError, Result};
use crate::model::{Context, ContextFilter};
use log::debug;
use uuid::Uuid;

pub struct ContextRegistry<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> ContextRegistry<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load settings, apply `change` to the context `id`, persist, and return it.
    fn update<F>(&mut self, id: &str, change: F) -> Result<Context>
    where
        F: FnOnce(&mut Context) -> Result<()>,
    {
        let mut settings = self.backend.load_settings()?;
        let ctx = find_mut(&mut settings, id)?;
        change(ctx)?;
        let updated = ctx.clone();
        self.backend.save_settings(&settings)?;
        Ok(updated)
    }
}

fn find_mut<'a>(settings: &'a mut ContextsSettings, id: &str) -> Result<&'a mut Context> {
    settings
        .contexts
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| ContextsError::ContextNotFound(id.to_string()))
}

/// Trim a name and check it is non-empty and not used by another context.
fn validate_name<'a>(
    settings: &ContextsSettings,
    name: &'a str,
    own_id: Option<&str>,
) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContextsError::InvalidContext(
            "Context name cannot be empty".to_string(),
        ));
    }
    let taken = settings
        .contexts
        .iter()
        .any(|c| c.name == name && Some(c.id.as_str()) != own_id);
    if taken {
        return Err(ContextsError::InvalidContext(format!(
            "A context named '{}' already exists",
            name
        )));
    }
    Ok(name)
}

impl<B: StorageBackend> ContextStore for ContextRegistry<B> {
    fn list_contexts(&self) -> Result<Vec<Context>> {
        Ok(self.backend.load_settings()?.contexts)
    }

    fn get_context(&self, id: &str) -> Result<Context> {
        self.backend
            .load_settings()?
            .contexts
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ContextsError::ContextNotFound(id.to_string()))
    }

    fn find_context(&self, selector: &str) -> Result<Context> {
        let contexts = self.backend.load_settings()?.contexts;
        let selector = selector.trim();

        if let Some(ctx) = contexts.iter().find(|c| c.id == selector) {
            return Ok(ctx.clone());
        }
        if let Some(ctx) = contexts.iter().find(|c| c.name == selector) {
            return Ok(ctx.clone());
        }
        if let Ok(position) = selector.parse::<usize>() {
            if let Some(ctx) = position.checked_sub(1).and_then(|i| contexts.get(i)) {
                return Ok(ctx.clone());
            }
        }
        Err(ContextsError::ContextNotFound(selector.to_string()))
    }

    fn create_context(&mut self, name: &str, filters: Vec<ContextFilter>) -> Result<Context> {
        let mut settings = self.backend.load_settings()?;
        let name = validate_name(&settings, name, None)?;

        let ctx = Context::new(Uuid::new_v4().to_string(), name).with_filters(filters);
        settings.contexts.push(ctx.clone());
        self.backend.save_settings(&settings)?;

        debug!("created context {} ({})", ctx.name, ctx.id);
        Ok(ctx)
    }

    fn rename_context(&mut self, id: &str, name: &str) -> Result<Context> {
        let settings = self.backend.load_settings()?;
        let name = validate_name(&settings, name, Some(id))?.to_string();
        self.update(id, move |ctx| {
            ctx.name = name;
            Ok(())
        })
    }

    fn set_filters(&mut self, id: &str, filters: Vec<ContextFilter>) -> Result<Context> {
        self.update(id, move |ctx| {
            ctx.filters = filters;
            Ok(())
        })
    }

    fn add_filter(&mut self, id: &str, filter: ContextFilter) -> Result<Context> {
        self.update(id, move |ctx| {
            ctx.filters.push(filter);
            Ok(())
        })
    }

    fn remove_filter(&mut self, id: &str, position: usize) -> Result<(Context, ContextFilter)> {
        let mut removed = None;
        let ctx = self.update(id, |ctx| {
            if position >= ctx.filters.len() {
                return Err(ContextsError::FilterNotFound(format!(
                    "Context '{}' has no filter #{}",
                    ctx.name,
                    position + 1
                )));
            }
            removed = Some(ctx.filters.remove(position));
            Ok(())
        })?;
        let removed = removed.ok_or_else(|| {
            ContextsError::FilterNotFound(format!("filter #{}", position + 1))
        })?;
        Ok((ctx, removed))
    }

    fn delete_context(&mut self, id: &str) -> Result<Context> {
        let mut settings = self.backend.load_settings()?;
        let idx = settings
            .contexts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ContextsError::ContextNotFound(id.to_string()))?;

        let ctx = settings.contexts.remove(idx);
        if settings.active_context.as_deref() == Some(id) {
            settings.active_context = None;
        }
        self.backend.save_settings(&settings)?;

        debug!("deleted context {} ({})", ctx.name, ctx.id);
        Ok(ctx)
    }

    fn active_context(&self) -> Result<Option<Context>> {
        let settings = self.backend.load_settings()?;
        let Some(active_id) = settings.active_context else {
            return Ok(None);
        };
        // A dangling id (e.g. settings edited by hand) reads as "no context"
        Ok(settings.contexts.into_iter().find(|c| c.id == active_id))
    }

    fn set_active_context(&mut self, id: Option<&str>) -> Result<()> {
        let mut settings = self.backend.load_settings()?;
        if let Some(id) = id {
            if !settings.contexts.iter().any(|c| c.id == id) {
                return Err(ContextsError::ContextNotFound(id.to_string()));
            }
        }
        settings.active_context = id.map(str::to_string);
        self.backend.save_settings(&settings)
    }
}
