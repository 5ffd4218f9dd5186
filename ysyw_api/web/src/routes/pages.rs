use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing, Form, Router,
};
use ysyw_core_contact_contracts::ContactFeatureService;
use ysyw_core_contact_impl::form::ContactForm;
use ysyw_models::notice::Notice;
use ysyw_templates_contracts::{
    LandingTemplate, NotFoundTemplate, SubjectOption, Template, TemplateService,
};

use super::internal_server_error;
use crate::models::LandingContactForm;

pub struct Pages<Contact, Templates> {
    pub contact: Arc<Contact>,
    pub template: Templates,
    pub title: Arc<str>,
}

pub fn router<Contact, Templates>(pages: Arc<Pages<Contact, Templates>>) -> Router<()>
where
    Contact: ContactFeatureService,
    Templates: TemplateService,
{
    Router::new()
        .route("/", routing::get(landing).post(submit))
        .fallback(not_found)
        .with_state(pages)
}

async fn landing(
    State(pages): State<Arc<Pages<impl ContactFeatureService, impl TemplateService>>>,
) -> Response {
    let sitekey = pages.contact.challenge_sitekey();
    let form = ContactForm::new(&*pages.contact, sitekey.is_some());
    pages.render_landing(sitekey, &form, Vec::new())
}

async fn submit(
    State(pages): State<Arc<Pages<impl ContactFeatureService, impl TemplateService>>>,
    Form(request): Form<LandingContactForm>,
) -> Response {
    let sitekey = pages.contact.challenge_sitekey();
    let (fields, challenge_token) = request.into_parts();

    let mut form = ContactForm::new(&*pages.contact, sitekey.is_some()).with_fields(fields);
    if let Some(token) = challenge_token {
        form.set_challenge_token(token);
    }

    let notices = form.submit().await;

    // the widget is rendered unsolved on the new page
    form.expire_challenge();

    pages.render_landing(sitekey, &form, notices)
}

async fn not_found(
    State(pages): State<Arc<Pages<impl ContactFeatureService, impl TemplateService>>>,
) -> Response {
    pages.render(
        StatusCode::NOT_FOUND,
        &NotFoundTemplate {
            title: pages.title.to_string(),
        },
    )
}

impl<Contact, Templates> Pages<Contact, Templates>
where
    Contact: ContactFeatureService,
    Templates: TemplateService,
{
    fn render_landing(
        &self,
        sitekey: Option<String>,
        form: &ContactForm<'_, Contact>,
        notices: Vec<Notice>,
    ) -> Response {
        self.render(
            StatusCode::OK,
            &LandingTemplate {
                title: self.title.to_string(),
                sitekey,
                subjects: SubjectOption::all(),
                fields: form.fields().clone(),
                notices,
                error: form.error().map(Into::into),
                can_submit: form.can_submit(),
            },
        )
    }

    fn render<T: Template + 'static>(&self, status: StatusCode, template: &T) -> Response {
        match self.template.render(template) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => internal_server_error(err),
        }
    }
}
