use std::sync::Arc;

use anyhow::Context;
use tera::Tera;
use ysyw_di::Build;
use ysyw_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use ysyw_utils::trace_instrument;

#[derive(Debug, Clone, Default, Build)]
pub struct TemplateServiceImpl {
    #[di(default)]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        tera.add_raw_templates(std::iter::once(BASE_TEMPLATE).chain(TEMPLATES.iter().copied()))
            .expect("Built-in templates are valid");

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    #[trace_instrument(skip(self, template), fields(template = T::NAME))]
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)
            .with_context(|| format!("Failed to serialize context of {}", T::NAME))?;
        self.state
            .0
            .render(T::NAME, &context)
            .with_context(|| format!("Failed to render {}", T::NAME))
    }
}

#[cfg(test)]
mod tests {
    use ysyw_models::{contact::ContactFormFields, notice::Notice};
    use ysyw_templates_contracts::{LandingTemplate, NotFoundTemplate, SubjectOption};

    use super::*;

    fn landing(sitekey: Option<&str>) -> LandingTemplate {
        LandingTemplate {
            title: "Your Sport Your World - Coming Soon".into(),
            sitekey: sitekey.map(Into::into),
            subjects: SubjectOption::all(),
            fields: ContactFormFields {
                subject: "other".into(),
                custom_subject: "<b>Scouting</b>".into(),
                ..Default::default()
            },
            notices: vec![Notice::warning("Email notification failed: Status: 400")],
            error: None,
            can_submit: sitekey.is_none(),
        }
    }

    #[test]
    fn landing_with_challenge() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&landing(Some("test-sitekey"))).unwrap();

        // Assert
        assert!(result.contains("COMING SOON"));
        assert!(result.contains(r#"data-sitekey="test-sitekey""#));
        assert!(result.contains(r#"<button type="submit" id="submit" disabled>"#));
        assert!(result.contains(r#"class="notice notice-warning""#));
        assert!(result.contains(r#"<option value="other" selected>Other</option>"#));
        assert!(result.contains("&lt;b&gt;Scouting&lt;&#x2F;b&gt;"));
        for path in ["/about", "/athlete", "/adv"] {
            assert!(result.contains(&format!(r#"href="{path}""#)));
        }
    }

    #[test]
    fn landing_without_challenge() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&landing(None)).unwrap();

        // Assert
        assert!(result.contains("reCAPTCHA not configured"));
        assert!(!result.contains("g-recaptcha"));
        assert!(result.contains(r#"<button type="submit" id="submit" >"#));
    }

    #[test]
    fn not_found() {
        // Arrange
        let sut = TemplateServiceImpl {
            state: Default::default(),
        };

        // Act
        let result = sut.render(&NotFoundTemplate {
            title: "Your Sport Your World - Coming Soon".into(),
        });

        // Assert
        assert!(result.unwrap().contains("PAGE NOT FOUND"));
    }
}
