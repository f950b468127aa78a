//! Ordered template lookup
//!
//! A [`TemplateResolver`] holds an explicit list of override directories.
//! Each logical template is looked up as `<name>.tera` in every directory in
//! order; the first hit wins, and the bundled default is used when no
//! directory has it.

use agentgen_application::TemplateRenderError;
use agentgen_domain::{TemplateName, TemplateSource};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a resolved template came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Bundled,
    File(PathBuf),
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOrigin::Bundled => f.write_str("bundled"),
            TemplateOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Template text together with its origin
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub name: TemplateName,
    pub origin: TemplateOrigin,
    pub content: Cow<'static, str>,
}

/// Bundled default text for a template
pub fn bundled(name: TemplateName) -> &'static str {
    match name {
        TemplateName::Tool => include_str!("bundled/tool.tera"),
        TemplateName::Agent => include_str!("bundled/agent.tera"),
        TemplateName::Readme => include_str!("bundled/readme.tera"),
        TemplateName::ToolsInit => include_str!("bundled/tools_init.tera"),
        TemplateName::EnvExample => include_str!("bundled/env_example.tera"),
        TemplateName::SystemPrompt => include_str!("bundled/system_prompt.tera"),
    }
}

#[derive(Debug, Clone)]
pub struct TemplateResolver {
    directories: Vec<PathBuf>,
    use_bundled: bool,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            use_bundled: true,
        }
    }
}

impl TemplateResolver {
    /// Resolver over `directories` (highest priority first) with bundled fallback
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self {
            directories,
            use_bundled: true,
        }
    }

    pub fn from_source(source: &TemplateSource) -> Self {
        match source {
            TemplateSource::Bundled => Self::default(),
            TemplateSource::Directory(dir) => Self::new(vec![dir.clone()]),
        }
    }

    /// Disable the bundled fallback (builder pattern)
    pub fn without_bundled(mut self) -> Self {
        self.use_bundled = false;
        self
    }

    /// Find the template for `name`.
    ///
    /// Returns `Ok(None)` only when the bundled fallback is disabled and no
    /// directory has the file.
    pub fn resolve(&self, name: TemplateName) -> Result<Option<ResolvedTemplate>, TemplateRenderError> {
        for dir in &self.directories {
            let path = dir.join(name.file_name());
            if path.is_file() {
                let content = read_template(name, &path)?;
                debug!("Template {} resolved to {}", name, path.display());
                return Ok(Some(ResolvedTemplate {
                    name,
                    origin: TemplateOrigin::File(path),
                    content: Cow::Owned(content),
                }));
            }
        }

        if !self.use_bundled {
            return Ok(None);
        }
        debug!("Template {} resolved to bundled default", name);
        Ok(Some(ResolvedTemplate {
            name,
            origin: TemplateOrigin::Bundled,
            content: Cow::Borrowed(bundled(name)),
        }))
    }
}

fn read_template(name: TemplateName, path: &Path) -> Result<String, TemplateRenderError> {
    std::fs::read_to_string(path).map_err(|e| TemplateRenderError::Failed {
        template: name.to_string(),
        message: format!("cannot read {}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_templates_exist_for_every_name() {
        for name in TemplateName::ALL {
            let resolved = TemplateResolver::default().resolve(name).unwrap().unwrap();
            assert_eq!(resolved.origin, TemplateOrigin::Bundled);
            assert!(!resolved.content.is_empty(), "{} is empty", name);
        }
    }

    #[test]
    fn test_first_directory_wins() {
        let high = TempDir::new().unwrap();
        let low = TempDir::new().unwrap();
        fs::write(high.path().join("readme.tera"), "high").unwrap();
        fs::write(low.path().join("readme.tera"), "low").unwrap();
        fs::write(low.path().join("agent.tera"), "low agent").unwrap();

        let resolver =
            TemplateResolver::new(vec![high.path().to_path_buf(), low.path().to_path_buf()]);

        let readme = resolver.resolve(TemplateName::Readme).unwrap().unwrap();
        assert_eq!(readme.content, "high");
        assert_eq!(
            readme.origin,
            TemplateOrigin::File(high.path().join("readme.tera"))
        );

        let agent = resolver.resolve(TemplateName::Agent).unwrap().unwrap();
        assert_eq!(agent.content, "low agent");

        let tool = resolver.resolve(TemplateName::Tool).unwrap().unwrap();
        assert_eq!(tool.origin, TemplateOrigin::Bundled);
    }

    #[test]
    fn test_without_bundled_reports_absence() {
        let dir = TempDir::new().unwrap();
        let resolver = TemplateResolver::new(vec![dir.path().to_path_buf()]).without_bundled();
        assert!(resolver.resolve(TemplateName::Tool).unwrap().is_none());
    }

    #[test]
    fn test_missing_directory_falls_back() {
        let resolver = TemplateResolver::from_source(&TemplateSource::Directory(
            PathBuf::from("/nonexistent/agentgen/templates"),
        ));
        let resolved = resolver.resolve(TemplateName::EnvExample).unwrap().unwrap();
        assert_eq!(resolved.origin, TemplateOrigin::Bundled);
    }
}
