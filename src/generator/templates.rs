use minijinja::{context, Environment};

use crate::generator::{
    names::{capitalize, pluralize},
    GeneratorError,
};

/// One generated source file of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Model,
    Service,
    Controller,
    Routes,
    Validation,
    RouteConfig,
}

impl Artifact {
    pub const ALL: [Artifact; 6] = [
        Artifact::Model,
        Artifact::Service,
        Artifact::Controller,
        Artifact::Routes,
        Artifact::Validation,
        Artifact::RouteConfig,
    ];

    fn template_name(self) -> &'static str {
        match self {
            Artifact::Model => "model",
            Artifact::Service => "service",
            Artifact::Controller => "controller",
            Artifact::Routes => "routes",
            Artifact::Validation => "validation",
            Artifact::RouteConfig => "route_config",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Artifact::Model => include_str!("../../templates/model.rs.j2"),
            Artifact::Service => include_str!("../../templates/service.rs.j2"),
            Artifact::Controller => include_str!("../../templates/controller.rs.j2"),
            Artifact::Routes => include_str!("../../templates/routes.rs.j2"),
            Artifact::Validation => include_str!("../../templates/validation.rs.j2"),
            Artifact::RouteConfig => include_str!("../../templates/route.config.toml.j2"),
        }
    }

    pub fn file_name(self, name: &str) -> String {
        match self {
            Artifact::RouteConfig => "route.config.toml".to_string(),
            other => format!("{name}.{}.rs", other.template_name()),
        }
    }
}

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, GeneratorError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        for artifact in Artifact::ALL {
            env.add_template(artifact.template_name(), artifact.source())?;
        }
        Ok(Self { env })
    }

    /// Renders `artifact` for an already validated, lower-case `name`.
    pub fn render(&self, artifact: Artifact, name: &str) -> Result<String, GeneratorError> {
        let plural = pluralize(name);
        let template = self.env.get_template(artifact.template_name())?;
        let rendered = template.render(context! {
            name => name,
            Name => capitalize(name),
            plural => plural.clone(),
            Plural => capitalize(&plural),
        })?;
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_the_module_layout() {
        assert_eq!(Artifact::Model.file_name("vessel"), "vessel.model.rs");
        assert_eq!(Artifact::Routes.file_name("vessel"), "vessel.routes.rs");
        assert_eq!(Artifact::RouteConfig.file_name("vessel"), "route.config.toml");
    }

    #[test]
    fn route_config_uses_the_plural_path() {
        let renderer = Renderer::new().unwrap();
        let rendered = renderer.render(Artifact::RouteConfig, "knife").unwrap();
        assert!(rendered.starts_with("path = \"/api/knives\"\n"));
        assert!(rendered.contains("description = \"Knife management endpoints\""));

        let parsed: crate::loader::route_config::RouteConfigOverride =
            toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.enabled, Some(true));
    }

    #[test]
    fn shipped_category_module_matches_the_templates() {
        let renderer = Renderer::new().unwrap();
        let shipped = [
            (Artifact::Model, include_str!("../modules/category/category.model.rs")),
            (Artifact::Service, include_str!("../modules/category/category.service.rs")),
            (Artifact::Controller, include_str!("../modules/category/category.controller.rs")),
            (Artifact::Routes, include_str!("../modules/category/category.routes.rs")),
            (Artifact::Validation, include_str!("../modules/category/category.validation.rs")),
            (Artifact::RouteConfig, include_str!("../modules/category/route.config.toml")),
        ];
        for (artifact, expected) in shipped {
            assert_eq!(renderer.render(artifact, "category").unwrap(), expected, "{artifact:?}");
        }
    }
}
