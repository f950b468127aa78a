//! Tera implementation of the template renderer port

use super::resolver::{TemplateOrigin, TemplateResolver};
use agentgen_application::{TemplateRenderError, TemplateRenderer};
use agentgen_domain::TemplateName;
use std::collections::BTreeMap;
use std::error::Error as _;
use tera::{Context, Tera};
use tracing::debug;

/// Template renderer backed by Tera.
///
/// All templates are resolved and compiled once in [`TeraTemplateRenderer::new`];
/// rendering reads nothing from disk. Autoescaping is off since none of
/// the output is HTML.
pub struct TeraTemplateRenderer {
    tera: Tera,
    origins: BTreeMap<TemplateName, TemplateOrigin>,
}

impl TeraTemplateRenderer {
    pub fn new(resolver: &TemplateResolver) -> Result<Self, TemplateRenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        let mut origins = BTreeMap::new();

        for name in TemplateName::ALL {
            let Some(resolved) = resolver.resolve(name)? else {
                continue;
            };
            tera.add_raw_template(name.as_str(), &resolved.content)
                .map_err(|e| TemplateRenderError::Syntax {
                    template: name.to_string(),
                    message: error_chain(&e).join(": "),
                })?;
            origins.insert(name, resolved.origin);
        }

        debug!("Compiled {} template(s)", origins.len());
        Ok(Self { tera, origins })
    }

    /// Renderer over the bundled templates only
    pub fn bundled() -> Result<Self, TemplateRenderError> {
        Self::new(&TemplateResolver::default())
    }

    /// Where each compiled template came from
    pub fn origins(&self) -> &BTreeMap<TemplateName, TemplateOrigin> {
        &self.origins
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(
        &self,
        template: TemplateName,
        variables: &serde_json::Value,
    ) -> Result<String, TemplateRenderError> {
        if !self.origins.contains_key(&template) {
            return Err(TemplateRenderError::TemplateNotFound(template.to_string()));
        }
        let context = Context::from_serialize(variables).map_err(|e| TemplateRenderError::Failed {
            template: template.to_string(),
            message: error_chain(&e).join(": "),
        })?;
        self.tera
            .render(template.as_str(), &context)
            .map_err(|e| classify(template, &e))
    }
}

fn classify(template: TemplateName, error: &tera::Error) -> TemplateRenderError {
    if let tera::ErrorKind::TemplateNotFound(name) = &error.kind {
        return TemplateRenderError::TemplateNotFound(name.clone());
    }
    let chain = error_chain(error);
    if let Some(variable) = chain.iter().find_map(|m| undefined_variable(m)) {
        return TemplateRenderError::MissingVariable {
            template: template.to_string(),
            variable,
        };
    }
    TemplateRenderError::Failed {
        template: template.to_string(),
        message: chain.join(": "),
    }
}

/// Messages of an error and all of its sources, outermost first.
fn error_chain(error: &tera::Error) -> Vec<String> {
    let mut messages = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        messages.push(inner.to_string());
        source = inner.source();
    }
    messages
}

/// Extract `x` from "Variable `x` not found in context while rendering '...'".
fn undefined_variable(message: &str) -> Option<String> {
    let rest = message.strip_prefix("Variable `")?;
    let (name, tail) = rest.split_once('`')?;
    tail.starts_with(" not found in context")
        .then(|| name.to_string())
}
