//! Browser bindings of the directory controller and the context that shares
//! it with the page's components.

use std::{future::Future, rc::Rc, time::Duration};

use anyhow::{Context, anyhow};
use client::{
    ClientConfig, DirectoryController, DirectoryLocation, HttpResourceApi, LocationWriter,
    banner::KeyValueStorage,
    debounce::Timer,
};
use dioxus::{logger::tracing, prelude::*};

use crate::{data_definitions::directory_params::DirectoryParams, routes::Route};


pub struct BrowserTimer;

impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// Writes locations through the router so that the page props follow.
pub struct RouterLocation {
    navigator: Navigator,
}

impl RouterLocation {
    fn route(location: &DirectoryLocation) -> Route {
        Route::DirectoryPage { params: DirectoryParams(location.clone()) }
    }
}

impl LocationWriter for RouterLocation {
    fn replace(&self, location: &DirectoryLocation) {
        self.navigator.replace(Self::route(location));
    }

    fn push(&self, location: &DirectoryLocation) {
        self.navigator.push(Self::route(location));
    }
}

/// `window.localStorage`; reads and writes degrade to no-ops where it is
/// unavailable.
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> anyhow::Result<web_sys::Storage> {
        let window = web_sys::window().context("no window")?;
        window
            .local_storage()
            .map_err(|err| anyhow!("localStorage refused: {err:?}"))?
            .context("localStorage unavailable")
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match Self::storage() {
            Ok(storage) => storage.get_item(key).ok().flatten(),
            Err(err) => {
                tracing::warn!("Cannot read {key}: {err:#}");
                None
            }
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        let written = Self::storage()
            .and_then(|storage| storage.set_item(key, value).map_err(|err| anyhow!("{err:?}")));
        if let Err(err) = written {
            tracing::warn!("Cannot write {key}: {err:#}");
        }
    }
}

/// Configuration for the page's origin; the REST API is served next to the
/// app. Desktop builds have no origin and take `GROWER_API_URL` instead.
fn client_config() -> ClientConfig {
    let config = ClientConfig::from_env();
    let origin = web_sys::window().and_then(|window| window.location().origin().ok());
    match origin {
        Some(origin) => config.with_base_url(origin),
        None => config,
    }
}


pub type BrowserController = DirectoryController<HttpResourceApi, BrowserTimer, RouterLocation>;

#[derive(Clone, Copy)]
pub struct DirectoryContext {
    controller: CopyValue<Rc<BrowserController>>,
    /// Bumped on every controller change; read it to re-render with the controller.
    pub revision: ReadSignal<u64>,
}

impl DirectoryContext {
    pub fn controller(&self) -> Rc<BrowserController> {
        self.controller.cloned()
    }

    /// Runs an async controller operation. The task is not tied to the
    /// calling component, so a button that disappears while its request is
    /// in flight does not cancel it.
    pub fn run<F, Fut>(&self, action: F)
    where
        F: FnOnce(Rc<BrowserController>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_forever(action(self.controller()));
    }
}

/// Creates the page's controller, keeps it in step with the route and
/// provides it as context.
pub fn use_directory_provider(location: ReadSignal<DirectoryLocation>) -> DirectoryContext {
    let revision = use_signal(|| 0_u64);
    let controller = use_hook(move || {
        let config = client_config();
        Rc::new(DirectoryController::new(
            HttpResourceApi::new(&config),
            BrowserTimer,
            RouterLocation { navigator: navigator() },
            config,
            location.peek().clone(),
        ))
    });

    let listener = use_hook({
        let controller = controller.clone();
        move || {
            controller.subscribe(move || {
                let mut revision = revision;
                *revision.write() += 1;
            })
        }
    });
    use_drop({
        let controller = controller.clone();
        move || controller.unsubscribe(listener)
    });

    // initial load and back/forward navigation
    let effect_controller = controller.clone();
    use_effect(move || {
        let location = location.read().clone();
        let controller = effect_controller.clone();
        spawn(async move {
            controller.restore(location).await;
        });
    });

    use_context_provider(move || DirectoryContext {
        controller: CopyValue::new(controller),
        revision: revision.into(),
    })
}

pub fn use_directory() -> DirectoryContext {
    use_context::<DirectoryContext>()
}
