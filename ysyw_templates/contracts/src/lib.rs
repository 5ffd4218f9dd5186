use serde::Serialize;
use ysyw_models::{
    contact::{ContactFormFields, ContactSubject},
    notice::Notice,
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

pub trait Template: Serialize {
    /// Name of the template. Names ending in `.html` are autoescaped.
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    LandingTemplate("landing.html"),
    NotFoundTemplate("not_found.html"),
}

/// The coming-soon page with the footer and the contact form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingTemplate {
    pub title: String,
    /// Site key of the challenge widget. The widget is omitted if `None`.
    pub sitekey: Option<String>,
    pub subjects: Vec<SubjectOption>,
    pub fields: ContactFormFields,
    pub notices: Vec<Notice>,
    pub error: Option<String>,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SubjectOption {
    pub fn all() -> Vec<Self> {
        ContactSubject::ALL
            .into_iter()
            .map(|subject| Self {
                value: subject.as_str(),
                label: subject.label(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundTemplate {
    pub title: String,
}
