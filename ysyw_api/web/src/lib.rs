use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use ysyw_core_contact_contracts::ContactFeatureService;
use ysyw_di::Build;
use ysyw_templates_contracts::TemplateService;

use crate::routes::pages::Pages;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct WebServer<Contact, Template> {
    config: WebServerConfig,
    contact: Contact,
    template: Template,
}

#[derive(Debug, Clone)]
pub struct WebServerConfig {
    pub addr: SocketAddr,
    pub site_title: Arc<str>,
}

impl<Contact, Template> WebServer<Contact, Template>
where
    Contact: ContactFeatureService,
    Template: TemplateService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("Listening on http://{addr}");
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let contact = Arc::new(self.contact);
        let pages = Pages {
            contact: Arc::clone(&contact),
            template: self.template,
            title: self.config.site_title,
        };

        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::contact::router(contact))
            .merge(routes::pages::router(pages.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
