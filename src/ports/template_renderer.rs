use std::collections::BTreeMap;

use crate::domain::AppError;

/// Factory class template.
pub const FACTORY_TEMPLATE: &str = "factory.php";
/// Module `ConfigProvider` class template.
pub const CONFIG_PROVIDER_TEMPLATE: &str = "config_provider.php";

/// Variables passed to a template.
pub type TemplateVars = BTreeMap<&'static str, String>;

/// Port for rendering the generated PHP sources.
pub trait TemplateRenderer {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String, AppError>;
}
