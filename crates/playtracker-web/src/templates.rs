use std::path::Path;

use minijinja::{Environment, Value, path_loader};
use playtracker_common::{Error, Result};

/// HTML page renderer backed by a directory of Jinja templates.
///
/// Templates ending in `.html` are auto-escaped. The site title is exposed to
/// every template as the `site_title` global.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn load(dir: impl AsRef<Path>, site_title: &str) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::Template(format!(
                "templates directory {} not found",
                dir.display()
            )));
        }

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.add_global("site_title", site_title.to_string());
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Error::Template(format!("failed to load {name}: {e}")))?;
        template
            .render(ctx)
            .map_err(|e| Error::Template(format!("failed to render {name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use minijinja::context;

    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = Templates::load("/definitely/not/here", "Site").err().unwrap();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn renders_with_site_title_global() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.html", "<title>{{ title }} - {{ site_title }}</title>");

        let templates = Templates::load(dir.path(), "Tracker").unwrap();
        let html = templates
            .render("page.html", context! { title => "Plays" })
            .unwrap();
        assert_eq!(html, "<title>Plays - Tracker</title>");
    }

    #[test]
    fn html_templates_escape_values() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "page.html", "{{ notes }}");

        let templates = Templates::load(dir.path(), "Tracker").unwrap();
        let html = templates
            .render("page.html", context! { notes => "<script>" })
            .unwrap();
        assert_eq!(html, "&lt;script&gt;");
    }

    #[test]
    fn unknown_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let templates = Templates::load(dir.path(), "Tracker").unwrap();
        let err = templates.render("nope.html", context! {}).unwrap_err();
        assert!(err.to_string().contains("nope.html"));
    }
}
