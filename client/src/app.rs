//! Root application component with routing, context providers, and the
//! service graph.
//!
//! ARCHITECTURE
//! ============
//! All credential handling lives in the `session` crate; this module owns
//! exactly one instance of each of its pieces. Every page talks to the
//! same [`ApiGateway`], so concurrent calls share one refresh cycle, and
//! the [`SessionState`] signal provided here is the only session state the
//! view layer reads.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use session::auth::AuthClient;
use session::config::SessionConfig;
use session::controller::SessionController;
use session::gateway::ApiGateway;
use session::tokens::TokenStore;

use crate::net::browser::{self, BrowserBackend};
use crate::net::http::RestTransport;
use crate::pages::categories::CategoriesPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::items::ItemsPage;
use crate::pages::locations::LocationsPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::pages::reports::ReportsPage;
use crate::pages::transactions::TransactionsPage;
use crate::state::session::SessionState;

/// Shared service graph: one gateway, one controller, built once at mount.
#[derive(Clone)]
pub struct AppServices {
    pub gateway: Rc<ApiGateway>,
    pub controller: Rc<SessionController>,
}

/// Context handle for [`AppServices`]; stored unsync because the graph
/// holds `Rc`s.
pub type ServicesHandle = StoredValue<AppServices, LocalStorage>;

fn build_services() -> AppServices {
    let config = SessionConfig::default();
    let store = Rc::new(TokenStore::new(Rc::new(BrowserBackend::new())));
    let transport = Rc::new(RestTransport::new());
    let auth = Rc::new(AuthClient::new(store, transport.clone(), config.clone()));
    let gateway = Rc::new(ApiGateway::new(
        auth.clone(),
        transport,
        config,
        Box::new(browser::redirect_to_login),
    ));
    let controller = Rc::new(SessionController::new(auth, gateway.clone()));
    AppServices {
        gateway,
        controller,
    }
}

/// Root application component.
///
/// Provides the service graph and session signal, kicks off the session
/// bootstrap, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let services: ServicesHandle = StoredValue::new_local(build_services());
    provide_context(session);
    provide_context(services);

    // Revive any stored session; route guards hold until this settles.
    #[cfg(feature = "csr")]
    {
        let controller = services.with_value(|s| s.controller.clone());
        leptos::task::spawn_local(async move {
            let snapshot = controller.initialize().await;
            session.set(SessionState::from_snapshot(&snapshot));
        });
    }

    view! {
        <Title text="Stockroom"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("items") view=ItemsPage/>
                <Route path=StaticSegment("categories") view=CategoriesPage/>
                <Route path=StaticSegment("locations") view=LocationsPage/>
                <Route path=StaticSegment("transactions") view=TransactionsPage/>
                <Route path=StaticSegment("reports") view=ReportsPage/>
            </Routes>
        </Router>
    }
}
