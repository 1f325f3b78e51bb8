use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use reading_core::time::fixed_clock;
use services::{
    AppServices, AuthContext, Clock, InMemoryReadingApi, ReadingApi, ReadingService,
    StaticTokenSource,
};

use crate::context::{UiApp, build_app_context};
use crate::views::reading::ReadingTestHandles;
use crate::views::{HistoryView, HomeView, PassageReadAlong, ReadingView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn history_page_size(&self) -> u32 {
        self.services.page_size()
    }

    fn speech_enabled(&self) -> bool {
        false
    }

    fn auth(&self) -> Arc<AuthContext> {
        self.services.auth()
    }

    fn api(&self) -> Arc<dyn ReadingApi> {
        self.services.api()
    }

    fn reading_service(&self) -> Arc<ReadingService> {
        self.services.reading_service()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Reading,
    History,
    /// A bare read-along passage whose text the test can swap.
    ReadAlong,
}

const FIRST_PASSAGE: &str = "The tide came in. Gulls circled the pier.";

/// Lets a test replace the text fed to the read-along passage.
#[derive(Clone, Default)]
pub struct PassageTextHandle {
    text: Rc<RefCell<Option<Signal<String>>>>,
}

impl PassageTextHandle {
    fn register(&self, text: Signal<String>) {
        *self.text.borrow_mut() = Some(text);
    }

    /// Call inside the dom's runtime.
    pub fn set(&self, value: &str) {
        let mut text = (*self.text.borrow()).expect("passage text registered");
        text.set(value.to_string());
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    reading_handles: Option<ReadingTestHandles>,
    passage_text: PassageTextHandle,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.reading_handles.clone() {
        use_context_provider(|| handles);
    }
    let passage_text = props.passage_text.clone();
    use_context_provider(|| passage_text);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Reading => rsx! { ReadingView {} },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::ReadAlong => rsx! { SwappablePassage {} },
    }
}

#[component]
fn SwappablePassage() -> Element {
    let text = use_signal(|| FIRST_PASSAGE.to_string());
    let handle = use_context::<PassageTextHandle>();
    use_hook(|| handle.register(text));
    rsx! { PassageReadAlong { text: text() } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub reading_handles: Option<ReadingTestHandles>,
    pub passage_text: PassageTextHandle,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources and effects settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Run `f` inside the dom's runtime, e.g. to call a registered callback.
    pub fn in_runtime(&self, f: impl FnOnce()) {
        self.dom.in_runtime(f);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn handles(&self) -> &ReadingTestHandles {
        self.reading_handles
            .as_ref()
            .expect("reading handles registered")
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api: InMemoryReadingApi) -> ViewHarness {
    setup_view_harness_with_api(view, Arc::new(api))
}

pub fn setup_view_harness_with_api(view: ViewKind, api: Arc<dyn ReadingApi>) -> ViewHarness {
    let tokens = Arc::new(StaticTokenSource::new(Some("test-token".to_string())));
    let services = AppServices::with_api(api, tokens, fixed_clock());
    let app = Arc::new(TestApp { services });
    let reading_handles = match view {
        ViewKind::Reading => Some(ReadingTestHandles::default()),
        ViewKind::Home | ViewKind::History | ViewKind::ReadAlong => None,
    };
    let passage_text = PassageTextHandle::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            reading_handles: reading_handles.clone(),
            passage_text: passage_text.clone(),
        },
    );

    ViewHarness {
        dom,
        reading_handles,
        passage_text,
    }
}
